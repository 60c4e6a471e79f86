//! Bootstrap layer — runs before the document is loaded.
//!
//! - **logger** — tracing-subscriber initialisation.

pub mod logger;
