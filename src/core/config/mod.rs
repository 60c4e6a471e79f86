//! Startup configuration document for the display host.
//!
//! The default literal lives in `config/default.json` and is compiled in.
//! A file can be loaded instead, either passed explicitly or named by the
//! `MIRROR_CONFIG` env var.
//!
//! # Module layout
//!
//! - **types** — Public read-only structs handed to the host
//!   (`ConfigurationDocument`, `ModuleEntry`).
//! - **raw** — Raw deserialization types (`RawDocument`, `RawModuleEntry`).
//!   These mirror the literal shape and use serde defaults; kept private.
//! - **load** — Loading logic: `Source`, `load`, `load_with`, `load_from`,
//!   `from_json_str`, `from_toml_str`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{
    expand_home, from_json_str, from_toml_str, load, load_from, load_with, Format, Source, CONFIG_ENV,
};
pub use types::*;
