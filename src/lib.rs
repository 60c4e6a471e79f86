//! Typed startup configuration for magic-mirror display hosts.
//!
//! [`config::load`] turns the embedded literal into an immutable
//! [`ConfigurationDocument`]; [`export::expose`] hands it to a host.

mod core;
pub mod bootstrap;
pub mod export;

pub use crate::bootstrap::logger;
pub use crate::core::{config, error};

pub use crate::config::{ConfigurationDocument, ModuleEntry};
pub use crate::error::AppError;
pub use crate::export::{expose, ExportSlot, JsonHost, ModuleHost};
