//! Catalog messages and their lazily compiled templates

use crate::error::TemplateError;
use crate::params::{merge_params, Params};
use crate::template::Template;
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use tracing::trace;

/// Compilation state of a message template.
#[derive(Debug, Clone, Default)]
pub enum TemplateState {
    /// Never compiled
    #[default]
    Uncompiled,
    /// Compiled and ready to execute
    Compiled(Arc<Template>),
    /// The compiled template was discarded and must be rebuilt before use
    Stale,
}

impl TemplateState {
    /// Whether a compiled template is available.
    pub const fn is_compiled(&self) -> bool {
        matches!(self, Self::Compiled(_))
    }
}

/// A single catalog entry: a flat key, its raw text, and the compiled template.
///
/// Messages are shared between the catalog and the cache behind an `Arc`; the
/// template state has its own lock so rendering never needs the bundle lock.
pub struct Message {
    key: String,
    raw: String,
    state: Mutex<TemplateState>,
}

impl Message {
    /// Create an uncompiled message.
    pub fn new(key: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw: raw.into(),
            state: Mutex::new(TemplateState::Uncompiled),
        }
    }

    /// The flat catalog key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw, uncompiled message text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// A snapshot of the current template state.
    pub fn state(&self) -> TemplateState {
        self.state.lock().clone()
    }

    /// Whether the template was discarded by [`Message::mark_dirty`].
    pub fn is_dirty(&self) -> bool {
        matches!(*self.state.lock(), TemplateState::Stale)
    }

    /// Return the compiled template, compiling the raw text first if needed.
    pub fn compile(&self) -> Result<Arc<Template>, TemplateError> {
        let mut state = self.state.lock();
        if let TemplateState::Compiled(template) = &*state {
            return Ok(Arc::clone(template));
        }

        trace!(key = %self.key, "compiling message template");
        let template = Arc::new(Template::parse(&self.key, &self.raw)?);
        *state = TemplateState::Compiled(Arc::clone(&template));
        Ok(template)
    }

    /// Compile the template, panicking if the raw text is not a valid template.
    ///
    /// # Panics
    ///
    /// Panics with the parse error when compilation fails.
    pub fn must_compile(&self) -> Arc<Template> {
        match self.compile() {
            Ok(template) => template,
            Err(err) => panic!("{err}"),
        }
    }

    /// Discard the compiled template. Calling this more than once is harmless.
    pub fn mark_dirty(&self) {
        *self.state.lock() = TemplateState::Stale;
    }

    /// Render the message into `out` with the merged `params`.
    pub fn render(&self, out: &mut dyn Write, params: &[Option<&Params>]) -> Result<(), TemplateError> {
        let template = self.compile()?;
        let data = merge_params(params);
        template.execute(out, &data)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("key", &self.key)
            .field("raw", &self.raw)
            .field("compiled", &self.state.lock().is_compiled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    fn render(message: &Message, params: &[Option<&Params>]) -> String {
        let mut out = Vec::new();
        message.render(&mut out, params).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_new_message_is_uncompiled() {
        let message = Message::new("greet", "Hello");
        assert!(matches!(message.state(), TemplateState::Uncompiled));
        assert!(!message.is_dirty());
        assert_eq!(message.key(), "greet");
        assert_eq!(message.raw(), "Hello");
    }

    #[test]
    fn test_compile_is_cached() {
        let message = Message::new("greet", "Hello, {{ .name }}");
        let first = message.compile().unwrap();
        let second = message.compile().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "greet");
    }

    #[test]
    fn test_mark_dirty_forces_recompile() {
        let message = Message::new("greet", "Hello");
        let first = message.compile().unwrap();

        message.mark_dirty();
        message.mark_dirty();
        assert!(message.is_dirty());

        let second = message.compile().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(message.state().is_compiled());
    }

    #[test]
    fn test_render_merges_params() {
        let message = Message::new("greet", "{{ .greeting }}, {{ .name }}");
        let defaults = params! { "greeting" => "Hello", "name" => "nobody" };
        let call = params! { "name" => "world" };
        assert_eq!(render(&message, &[Some(&defaults), None, Some(&call)]), "Hello, world");
        assert_eq!(render(&message, &[]), "<no value>, <no value>");
    }

    #[test]
    fn test_compile_failure_leaves_state_unchanged() {
        let message = Message::new("broken", "{{ .name");
        assert!(message.compile().is_err());
        assert!(matches!(message.state(), TemplateState::Uncompiled));
    }

    #[test]
    #[should_panic(expected = "template: broken: ")]
    fn test_must_compile_panics() {
        Message::new("broken", "{{ .name").must_compile();
    }

    #[test]
    fn test_debug_hides_template() {
        let message = Message::new("k", "v");
        let debug = format!("{message:?}");
        assert!(debug.contains("compiled: false"));
    }
}
