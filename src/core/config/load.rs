//! Loading logic.
//!
//! Every entry point funnels into [`resolve`], which validates the raw shape
//! into a [`ConfigurationDocument`]. Nothing here decides whether the result
//! is exported; see `crate::export` for that.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::AppError;

use super::raw::RawDocument;
use super::types::{check_module_name, ConfigurationDocument, ModuleEntry};

/// The literal compiled into the binary and used when no file is given.
const EMBEDDED: &str = include_str!("../../../config/default.json");

/// Env var naming a config file to load instead of the embedded literal.
pub const CONFIG_ENV: &str = "MIRROR_CONFIG";

/// On-disk literal formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// `.toml` selects TOML; any other extension (or none) is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Embedded,
}

impl Source {
    /// `config_path` if given, else the file named by `MIRROR_CONFIG`, else
    /// the embedded literal.
    pub fn select(config_path: Option<&Path>) -> Self {
        Self::choose(config_path, env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Internal selector — tests pass the env value directly instead of
    /// mutating env vars.
    fn choose(config_path: Option<&Path>, env_path: Option<PathBuf>) -> Self {
        match config_path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Source::File(path),
            None => Source::Embedded,
        }
    }

    pub fn load(&self) -> Result<ConfigurationDocument, AppError> {
        match self {
            Source::File(path) => load_from(path),
            Source::Embedded => load(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Embedded => f.write_str("embedded"),
        }
    }
}

/// Load the embedded literal.
pub fn load() -> Result<ConfigurationDocument, AppError> {
    parse(EMBEDDED, Format::Json, "embedded config")
}

/// Load from [`Source::select`].
pub fn load_with(config_path: Option<&Path>) -> Result<ConfigurationDocument, AppError> {
    Source::select(config_path).load()
}

/// Read and parse a config file. A leading `~` is expanded first.
pub fn load_from(path: &Path) -> Result<ConfigurationDocument, AppError> {
    let path = expand_home(path);
    debug!(path = %path.display(), "reading configuration file");
    let raw = fs::read_to_string(&path)?;
    parse(&raw, Format::from_path(&path), &path.display().to_string())
}

pub fn from_json_str(literal: &str) -> Result<ConfigurationDocument, AppError> {
    parse(literal, Format::Json, "json literal")
}

pub fn from_toml_str(literal: &str) -> Result<ConfigurationDocument, AppError> {
    parse(literal, Format::Toml, "toml literal")
}

fn parse(literal: &str, format: Format, source: &str) -> Result<ConfigurationDocument, AppError> {
    let malformed = |e: String| AppError::MalformedConfiguration(format!("{source}: {e}"));
    let raw: RawDocument = match format {
        Format::Json => serde_json::from_str(literal).map_err(|e| malformed(e.to_string()))?,
        Format::Toml => {
            let value: toml::Value = toml::from_str(literal).map_err(|e| malformed(e.to_string()))?;
            serde_json::from_value(toml_to_json(value).map_err(malformed)?)
                .map_err(|e| malformed(e.to_string()))?
        }
    };
    let doc = resolve(raw, source)?;
    debug!(source, modules = doc.len(), "configuration parsed");
    Ok(doc)
}

/// Option values are JSON-shaped; TOML datetimes become their RFC 3339 text.
fn toml_to_json(value: toml::Value) -> Result<Value, String> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("non-finite float {f} has no JSON form"))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_to_json).collect::<Result<_, _>>()?)
        }
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| toml_to_json(v).map(|v| (k, v)))
                .collect::<Result<Map<_, _>, _>>()?,
        ),
    })
}

fn resolve(raw: RawDocument, source: &str) -> Result<ConfigurationDocument, AppError> {
    let modules = raw
        .modules
        .into_iter()
        .enumerate()
        .map(|(i, entry)| -> Result<ModuleEntry, AppError> {
            check_module_name(&entry.module).map_err(|e| {
                AppError::MalformedConfiguration(format!("{source}: modules[{i}]: {e}"))
            })?;
            Ok(ModuleEntry::from_parts(
                entry.module,
                entry.position,
                entry.header,
                entry.disabled,
                entry.config.unwrap_or_default(),
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ConfigurationDocument::new(modules))
}

/// Expand a leading `~` component to the user's home directory.
/// Paths without one are returned unchanged, byte for byte.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            if rest.as_os_str().is_empty() {
                return home;
            }
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_MODULES: &str = r#"{"modules":[{"module":"clock"},{"module":"calendar"}]}"#;

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("config.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("config.TOML")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("config.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("config")), Format::Json);
    }

    #[test]
    fn no_paths_selects_embedded() {
        let source = Source::choose(None, None);
        assert_eq!(source, Source::Embedded);
        assert_eq!(source.to_string(), "embedded");
        assert_eq!(source.load().unwrap(), load().unwrap());
    }

    #[test]
    fn explicit_path_beats_env_path() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("explicit.json");
        std::fs::write(&explicit, TWO_MODULES).unwrap();

        let source = Source::choose(Some(explicit.as_path()), Some(PathBuf::from("/nonexistent/env.json")));
        assert_eq!(source, Source::File(explicit.clone()));
        assert_eq!(source.load().unwrap().len(), 2);
    }

    #[test]
    fn env_path_used_without_explicit() {
        let dir = TempDir::new().unwrap();
        let from_env = dir.path().join("env.json");
        std::fs::write(&from_env, TWO_MODULES).unwrap();

        let source = Source::choose(None, Some(from_env.clone()));
        assert_eq!(source.to_string(), from_env.display().to_string());
        assert_eq!(source.load().unwrap().modules()[1].module(), "calendar");
    }

    #[test]
    fn load_with_explicit_path_ignores_env() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("explicit.json");
        std::fs::write(&explicit, TWO_MODULES).unwrap();

        assert_eq!(load_with(Some(explicit.as_path())).unwrap().len(), 2);
    }

    #[test]
    fn error_names_the_offending_entry() {
        let err = from_json_str(r#"{"modules":[{"module":"clock"},{"module":"  "}]}"#).unwrap_err();
        assert!(err.to_string().contains("modules[1]"), "got: {err}");
    }

    #[test]
    fn bare_tilde_is_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~other/x"), PathBuf::from("~other/x"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_loads() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"cfg\xff.json"));
        std::fs::write(&path, r#"{"modules":[]}"#).unwrap();

        assert_eq!(expand_home(&path), path);
        assert!(load_from(&path).unwrap().is_empty());
    }

    #[test]
    fn toml_datetime_becomes_rfc3339_string() {
        let doc = from_toml_str(
            "[[modules]]\nmodule = \"calendar\"\n\n[modules.config]\nstart = 1979-05-27T07:32:00Z\nday = 1979-05-27\n",
        )
        .unwrap();
        let calendar = &doc.modules()[0];
        assert_eq!(calendar.option("start"), Some(&Value::from("1979-05-27T07:32:00Z")));
        assert_eq!(calendar.option("day"), Some(&Value::from("1979-05-27")));

        let json = doc.to_json_string().unwrap();
        assert!(!json.contains("toml_private"), "got: {json}");
        assert_eq!(from_toml_str(&doc.to_toml_string().unwrap()).unwrap(), doc);
    }

    #[test]
    fn toml_options_keep_order() {
        let doc = from_toml_str("[[modules]]\nmodule = \"a\"\n\n[modules.config]\nzeta = 1\nalpha = 2\nmid = 3\n")
            .unwrap();
        let keys: Vec<_> = doc.modules()[0].config().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn toml_non_finite_float_is_malformed() {
        let err = from_toml_str("[[modules]]\nmodule = \"a\"\n\n[modules.config]\nx = nan\n").unwrap_err();
        assert!(matches!(err, AppError::MalformedConfiguration(_)), "got: {err}");
    }
}
