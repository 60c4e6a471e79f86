//! Raw deserialization types.
//!
//! These structs mirror the literal's shape (JSON or TOML) and use `serde`
//! defaults. The `load` module validates them into the public `types` structs.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw document shape — serde target before validation.
///
/// `modules` has no default: a literal without it is malformed.
#[derive(Deserialize)]
pub(super) struct RawDocument {
    pub modules: Vec<RawModuleEntry>,
}

#[derive(Deserialize)]
pub(super) struct RawModuleEntry {
    pub module: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    /// `None` covers both an absent key and an explicit `null`.
    #[serde(default)]
    pub config: Option<Map<String, Value>>,
}
