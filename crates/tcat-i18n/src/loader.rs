//! Loading catalogs from files, directories, buffers, readers, URLs and
//! virtual filesystems
//!
//! Every source is read and decoded before the bundle lock is taken. Sources
//! made of several files decode all of them first, so one bad file leaves the
//! catalog untouched.

use crate::bundle::Bundle;
use crate::error::{CatalogError, CatalogResult};
use crate::flatten::check_shape;
use crate::format::{resolve_format, DecodeFn, Format, RECOGNIZED_EXTENSIONS};
use crate::value::Value;
use crate::vfs::VirtualFs;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tcat_common::utils::file_extension;
use tracing::{debug, info, instrument};
use url::Url;

const OP_LOAD_FILE: &str = "load file";
const OP_LOAD_DIR: &str = "load dir";
const OP_LOAD_BYTES: &str = "load bytes";
const OP_LOAD_READER: &str = "load reader";
const OP_LOAD_URL: &str = "load url";
const OP_LOAD_FS: &str = "load fs";

/// Decode a whole document and check that it can be ingested.
fn decode_document(bytes: &[u8], format: Format) -> CatalogResult<Value> {
    if bytes.is_empty() {
        return Err(CatalogError::Empty);
    }
    let document = format.decode(bytes)?;
    check_shape(&document)?;
    Ok(document)
}

/// The format named by a file name's extension, if it is recognized.
fn recognized_format(name: &str) -> Option<Format> {
    file_extension(name).and_then(|ext| resolve_format(ext).ok())
}

fn metadata(path: &Path) -> CatalogResult<fs::Metadata> {
    fs::metadata(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => CatalogError::PathNotFound(path.to_path_buf()),
        _ => CatalogError::Io(err),
    })
}

fn read_file_document(path: &Path) -> CatalogResult<Value> {
    if metadata(path)?.is_dir() {
        return Err(CatalogError::TargetIsDirectory(path.to_path_buf()));
    }

    let name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    let ext = file_extension(&name).ok_or(CatalogError::UnknownFormat)?;
    let format = resolve_format(ext)?;
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), %format, bytes = bytes.len(), "read catalog file");
    decode_document(&bytes, format)
}

/// Entries of `dir`, sorted by path.
fn sorted_entries(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

/// Collect every file beneath `dir` whose extension is recognized.
fn collect_tree(dir: &Path, files: &mut Vec<PathBuf>) -> CatalogResult<()> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            collect_tree(&path, files)?;
            continue;
        }
        let name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
        if recognized_format(&name).is_some() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "skipping file without a catalog extension");
        }
    }
    Ok(())
}

/// Files directly inside `dir` named `<locale>.<ext>`.
fn collect_locale_files(dir: &Path, locale: &str) -> CatalogResult<Vec<PathBuf>> {
    let wanted: Vec<String> = RECOGNIZED_EXTENSIONS
        .iter()
        .map(|ext| format!("{locale}.{ext}"))
        .collect();

    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| wanted.iter().any(|w| w == name))
        })
        .collect())
}

fn read_files(files: &[PathBuf]) -> CatalogResult<Vec<Value>> {
    files
        .iter()
        .map(|path| read_file_document(path).map_err(|err| err.in_load(OP_LOAD_FILE, path.display().to_string())))
        .collect()
}

/// Parse a remote catalog URL, defaulting the scheme to `http`.
fn parse_remote_url(raw: &str) -> CatalogResult<Url> {
    let url = match Url::parse(raw) {
        Ok(url) if raw.contains("://") || !looks_like_host_port(&url) => url,
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{raw}"))?,
        Err(err) => return Err(err.into()),
    };

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CatalogError::IncorrectProtocol(other.to_string())),
    }
}

/// `localhost:8080/en.yaml` parses as scheme `localhost` with an opaque path.
fn looks_like_host_port(url: &Url) -> bool {
    url.cannot_be_a_base()
        && url
            .path()
            .split('/')
            .next()
            .is_some_and(|port| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()))
}

fn format_from_url(url: &Url) -> CatalogResult<Format> {
    let ext = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(file_extension)
        .ok_or(CatalogError::UnknownFormat)?;
    resolve_format(ext)
}

fn fetch(url: &Url) -> CatalogResult<Vec<u8>> {
    let response = reqwest::blocking::get(url.clone())?.error_for_status()?;
    debug!(status = %response.status(), "fetched remote catalog");
    Ok(response.bytes()?.to_vec())
}

fn collect_fs_tree(vfs: &dyn VirtualFs, dir: &str, files: &mut Vec<(String, Format)>) -> CatalogResult<()> {
    let mut entries = vfs.read_dir(dir)?;
    entries.sort();
    for entry in entries {
        if entry.is_dir {
            collect_fs_tree(vfs, &entry.path, files)?;
        } else if let Some(format) = recognized_format(&entry.path) {
            files.push((entry.path, format));
        } else {
            debug!(path = %entry.path, "skipping file without a catalog extension");
        }
    }
    Ok(())
}

fn read_fs_files(vfs: &dyn VirtualFs, files: &[(String, Format)]) -> CatalogResult<Vec<Value>> {
    files
        .iter()
        .map(|(path, format)| {
            vfs.read_file(path)
                .map_err(CatalogError::from)
                .and_then(|bytes| decode_document(&bytes, *format))
                .map_err(|err| err.in_load(OP_LOAD_FILE, path.as_str()))
        })
        .collect()
}

impl Bundle {
    /// Load a single catalog file, choosing the decoder from its extension.
    ///
    /// Returns the number of keys written.
    #[instrument(skip_all, fields(locale = %self.locale(), path = %path.as_ref().display()))]
    pub fn load_file(&self, path: impl AsRef<Path>) -> CatalogResult<usize> {
        let path = path.as_ref();
        let load = || -> CatalogResult<_> {
            let document = read_file_document(path)?;
            self.commit(std::slice::from_ref(&document))
        };
        let written = load().map_err(|err| err.in_load(OP_LOAD_FILE, path.display().to_string()))?;
        info!(keys = written, "loaded catalog file");
        Ok(written)
    }

    /// Load the catalog for this bundle's locale from a directory.
    ///
    /// A `<dir>/<locale>/` subdirectory is walked recursively, skipping files
    /// without a recognized extension. Without one, only the files
    /// `<dir>/<locale>.{yaml,yml,json,toml}` are loaded.
    #[instrument(skip_all, fields(locale = %self.locale(), dir = %dir.as_ref().display()))]
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> CatalogResult<usize> {
        let dir = dir.as_ref();
        let load = || -> CatalogResult<_> {
            if metadata(dir)?.is_file() {
                return Err(CatalogError::TargetIsRegularFile(dir.to_path_buf()));
            }

            let locale = self.locale().to_string();
            let locale_dir = dir.join(&locale);
            let files = if locale_dir.is_dir() {
                let mut files = Vec::new();
                collect_tree(&locale_dir, &mut files)?;
                files
            } else {
                debug!("no {locale} subdirectory, scanning for {locale}.* files");
                collect_locale_files(dir, &locale)?
            };

            let documents = read_files(&files)?;
            let written = self.commit(&documents)?;
            Ok((files.len(), written))
        };

        let (files, written) = load().map_err(|err| err.in_load(OP_LOAD_DIR, dir.display().to_string()))?;
        info!(files, keys = written, "loaded catalog directory");
        Ok(written)
    }

    /// Load a document from memory, naming its format with a hint such as
    /// `yaml` or `json`.
    pub fn load_bytes(&self, bytes: &[u8], format_hint: &str) -> CatalogResult<usize> {
        let load = || -> CatalogResult<_> {
            let format = resolve_format(format_hint)?;
            let document = decode_document(bytes, format)?;
            self.commit(std::slice::from_ref(&document))
        };
        let written = load().map_err(|err| err.in_load(OP_LOAD_BYTES, format_hint))?;
        debug!(locale = %self.locale(), keys = written, "loaded catalog bytes");
        Ok(written)
    }

    /// Load a document from memory with a caller-supplied decoder.
    pub fn load_bytes_with(&self, bytes: &[u8], decode: DecodeFn) -> CatalogResult<usize> {
        let load = || -> CatalogResult<_> {
            if bytes.is_empty() {
                return Err(CatalogError::Empty);
            }
            let document = decode(bytes).map_err(CatalogError::CustomDecode)?;
            check_shape(&document)?;
            self.commit(std::slice::from_ref(&document))
        };
        let written = load().map_err(|err| err.in_load(OP_LOAD_BYTES, "custom decoder"))?;
        debug!(locale = %self.locale(), keys = written, "loaded catalog bytes");
        Ok(written)
    }

    /// Read `reader` to the end and load the result as a document.
    pub fn load_reader(&self, mut reader: impl Read, format_hint: &str) -> CatalogResult<usize> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|err| CatalogError::from(err).in_load(OP_LOAD_READER, format_hint))?;
        self.load_bytes(&bytes, format_hint)
    }

    /// Fetch and load a remote catalog with a blocking GET.
    ///
    /// The scheme defaults to `http` and must be `http` or `https`. Without a
    /// format hint, the format comes from the extension of the last path
    /// segment.
    #[instrument(skip(self), fields(locale = %self.locale()))]
    pub fn load_url(&self, url: &str, format: Option<&str>) -> CatalogResult<usize> {
        let load = || -> CatalogResult<_> {
            let parsed = parse_remote_url(url)?;
            let format = match format {
                Some(hint) => resolve_format(hint)?,
                None => format_from_url(&parsed)?,
            };
            let bytes = fetch(&parsed)?;
            let document = decode_document(&bytes, format)?;
            self.commit(std::slice::from_ref(&document))
        };
        let written = load().map_err(|err| err.in_load(OP_LOAD_URL, url))?;
        info!(keys = written, "loaded remote catalog");
        Ok(written)
    }

    /// Load every catalog file of a virtual filesystem.
    ///
    /// The directory named after the locale is walked when it exists,
    /// otherwise the whole tree from the root.
    #[instrument(skip_all, fields(locale = %self.locale()))]
    pub fn load_fs(&self, vfs: &dyn VirtualFs) -> CatalogResult<usize> {
        let locale = self.locale().to_string();
        let load = || -> CatalogResult<_> {
            let root = match vfs.read_dir(&locale) {
                Ok(_) => locale.as_str(),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!("no {locale} directory, walking the whole filesystem");
                    ""
                }
                Err(err) => return Err(err.into()),
            };

            let mut files = Vec::new();
            collect_fs_tree(vfs, root, &mut files)?;
            let documents = read_fs_files(vfs, &files)?;
            let written = self.commit(&documents)?;
            Ok((files.len(), written))
        };

        let (files, written) = load().map_err(|err| err.in_load(OP_LOAD_FS, locale.as_str()))?;
        info!(files, keys = written, "loaded embedded catalog");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_url_scheme_defaults_to_http() {
        assert_eq!(parse_remote_url("example.com/en.yaml").unwrap().as_str(), "http://example.com/en.yaml");
        assert_eq!(
            parse_remote_url("localhost:8080/en.yaml").unwrap().as_str(),
            "http://localhost:8080/en.yaml"
        );
        assert_eq!(
            parse_remote_url("https://example.com/en.json").unwrap().scheme(),
            "https"
        );
    }

    #[test]
    fn test_remote_url_rejects_other_schemes() {
        for raw in ["ftp://example.com/en.yaml", "file:///tmp/en.yaml", "mailto:someone"] {
            match parse_remote_url(raw) {
                Err(CatalogError::IncorrectProtocol(_)) => {}
                other => panic!("{raw} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_format_from_url_path() {
        let url = Url::parse("http://example.com/i18n/zh-Hans.yml?v=2").unwrap();
        assert_eq!(format_from_url(&url).unwrap(), Format::Yaml);

        let url = Url::parse("http://example.com/i18n/").unwrap();
        assert!(matches!(format_from_url(&url), Err(CatalogError::UnknownFormat)));

        let url = Url::parse("http://example.com/catalog.ini").unwrap();
        assert!(matches!(format_from_url(&url), Err(CatalogError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_document_checks_empty_and_shape() {
        assert!(matches!(decode_document(b"", Format::Yaml), Err(CatalogError::Empty)));
        assert!(matches!(
            decode_document(b"just text", Format::Yaml),
            Err(CatalogError::IncorrectDecodedShape("string"))
        ));
        assert!(decode_document(b"[a, b]", Format::Yaml).is_ok());
    }

    #[test]
    fn test_recognized_format() {
        assert_eq!(recognized_format("zh-Hans/menu.toml"), Some(Format::Toml));
        assert_eq!(recognized_format("README.md"), None);
        assert_eq!(recognized_format("Makefile"), None);
    }
}
