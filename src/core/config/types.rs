//! Public configuration types.
//!
//! These are the validated, read-only values handed to the host. Raw
//! deserialization types live in `raw.rs`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;

// ── Module entry ────────────────────────────────────────────────────────────

/// One module the host should load.
///
/// Only shared-reference accessors are public; an entry cannot be changed
/// once it is part of a [`ConfigurationDocument`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleEntry {
    module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    disabled: bool,
    /// Written last so TOML output places the table after the scalars.
    config: Map<String, Value>,
}

impl ModuleEntry {
    /// Build an entry, rejecting an empty or whitespace-only module name.
    pub fn new(
        module: impl Into<String>,
        position: Option<String>,
        config: Map<String, Value>,
    ) -> Result<Self, AppError> {
        let module = module.into();
        check_module_name(&module).map_err(AppError::MalformedConfiguration)?;
        Ok(Self::from_parts(module, position, None, false, config))
    }

    /// Caller must have run [`check_module_name`] already.
    pub(super) fn from_parts(
        module: String,
        position: Option<String>,
        header: Option<String>,
        disabled: bool,
        config: Map<String, Value>,
    ) -> Self {
        Self { module, position, header, disabled, config }
    }

    pub fn with_header(self, header: impl Into<String>) -> Self {
        Self { header: Some(header.into()), ..self }
    }

    pub fn with_disabled(self, disabled: bool) -> Self {
        Self { disabled, ..self }
    }

    /// Name of the module implementation the host should load.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Host layout region, e.g. `"fullscreen_above"`. Not validated.
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Module-private options; empty when the literal omitted them.
    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }
}

/// Error text when `name` is not a usable module identifier.
pub(super) fn check_module_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("module name must not be empty".to_string());
    }
    Ok(())
}

fn is_false(b: &bool) -> bool {
    !*b
}

// ── Document ────────────────────────────────────────────────────────────────

/// The startup configuration handed to the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConfigurationDocument {
    modules: Vec<ModuleEntry>,
}

impl ConfigurationDocument {
    /// Infallible: every [`ModuleEntry`] was validated when it was built.
    pub fn new(modules: Vec<ModuleEntry>) -> Self {
        Self { modules }
    }

    /// All entries, in the order they were written.
    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Entries not marked `disabled`, in order.
    pub fn enabled_modules(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.modules.iter().filter(|m| !m.disabled)
    }

    /// Every entry naming `module`. Duplicates are kept, in order.
    pub fn find<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a ModuleEntry> {
        self.modules.iter().filter(move |m| m.module == module)
    }

    /// Pretty JSON literal that loads back to an equal document.
    pub fn to_json_string(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::MalformedConfiguration(format!("cannot encode as JSON: {e}")))
    }

    /// TOML literal (`[[modules]]` tables) that loads back to an equal document.
    ///
    /// Fails when an option value has no TOML form: `null`, or an integer
    /// above `i64::MAX`.
    pub fn to_toml_string(&self) -> Result<String, AppError> {
        toml::to_string(self)
            .map_err(|e| AppError::MalformedConfiguration(format!("cannot encode as TOML: {e}")))
    }
}
