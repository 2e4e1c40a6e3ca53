//! Message templates
//!
//! Message values use Go `text/template` syntax, parsed and executed by
//! [`gtmpl`]: `{{ .name }}` substitutes a field of the params, `{{ .user.name }}`
//! walks nested objects, `{{/* note */}}` is a comment, and `{{- ` / ` -}}` trim
//! the whitespace of the adjacent text. A field missing from the params renders
//! `<no value>`.

use crate::error::TemplateError;
use crate::params::Params;
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// A parsed message template.
pub struct Template {
    name: String,
    // gtmpl::Template is Send but not Sync.
    inner: Mutex<gtmpl::Template>,
}

impl Template {
    /// Parse `source`, naming the template `name` in errors.
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut inner = gtmpl::Template::default();
        inner.parse(source).map_err(|err| TemplateError::Parse {
            name: name.to_string(),
            message: err.to_string(),
        })?;

        Ok(Self {
            name: name.to_string(),
            inner: Mutex::new(inner),
        })
    }

    /// The template name, which is the message key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute against `data`, writing the output to `out`.
    ///
    /// Nothing is written when execution fails.
    pub fn execute(&self, out: &mut dyn Write, data: &Params) -> Result<(), TemplateError> {
        let context = gtmpl::Context::from(params_value(data));
        let rendered = self.inner.lock().render(&context).map_err(|err| TemplateError::Exec {
            name: self.name.clone(),
            message: err.to_string(),
        })?;

        out.write_all(rendered.as_bytes()).map_err(|source| TemplateError::Write {
            name: self.name.clone(),
            source,
        })
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template").field("name", &self.name).finish_non_exhaustive()
    }
}

fn params_value(data: &Params) -> gtmpl::Value {
    let fields: HashMap<String, gtmpl::Value> = data.iter().map(|(k, v)| (k.clone(), json_value(v))).collect();
    gtmpl::Value::Map(fields)
}

fn json_value(value: &JsonValue) -> gtmpl::Value {
    match value {
        JsonValue::Null => gtmpl::Value::Nil,
        JsonValue::Bool(b) => gtmpl::Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                gtmpl::Value::from(i)
            } else if let Some(u) = n.as_u64() {
                gtmpl::Value::from(u)
            } else {
                gtmpl::Value::from(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => gtmpl::Value::String(s.clone()),
        JsonValue::Array(items) => gtmpl::Value::Array(items.iter().map(json_value).collect()),
        JsonValue::Object(map) => params_value(map),
    }
}
