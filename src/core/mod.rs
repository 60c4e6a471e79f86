//! Core infrastructure — shared foundation used across the whole crate.
//!
//! - **config** — configuration document types and loaders.
//! - **error** — application-wide error enum.

pub mod config;
pub mod error;
