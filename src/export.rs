//! Handing the loaded document to a host.
//!
//! Loading never exports anything by itself. The caller decides whether a
//! host is present and passes it to [`expose`]; without one the document is
//! simply returned for in-process use.

use std::io::Write;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, info};

use crate::config::ConfigurationDocument;
use crate::error::AppError;

/// A host-side mechanism that can receive the configuration document.
pub trait ModuleHost {
    fn register(&self, doc: Arc<ConfigurationDocument>) -> Result<(), AppError>;
}

/// Freeze `doc` behind an `Arc` and, if a host is given, register it there.
///
/// The returned value is the same allocation the host received.
pub fn expose(
    doc: ConfigurationDocument,
    host: Option<&dyn ModuleHost>,
) -> Result<Arc<ConfigurationDocument>, AppError> {
    let doc = Arc::new(doc);
    match host {
        Some(host) => {
            host.register(Arc::clone(&doc))?;
            info!(modules = doc.len(), "configuration exported to host");
        }
        None => debug!("no module host present, keeping configuration in-process"),
    }
    Ok(doc)
}

/// Write-once export slot. The first registration wins; later ones fail.
#[derive(Debug, Default)]
pub struct ExportSlot {
    cell: OnceLock<Arc<ConfigurationDocument>>,
}

impl ExportSlot {
    pub const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    pub fn get(&self) -> Option<Arc<ConfigurationDocument>> {
        self.cell.get().cloned()
    }
}

impl ModuleHost for ExportSlot {
    fn register(&self, doc: Arc<ConfigurationDocument>) -> Result<(), AppError> {
        self.cell
            .set(doc)
            .map_err(|_| AppError::Export("document already exported".into()))
    }
}

/// Host that writes the document as pretty JSON, one document per register.
pub struct JsonHost<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> JsonHost<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> Result<W, AppError> {
        self.writer
            .into_inner()
            .map_err(|_| AppError::Export("json host writer poisoned".into()))
    }
}

impl<W: Write> ModuleHost for JsonHost<W> {
    fn register(&self, doc: Arc<ConfigurationDocument>) -> Result<(), AppError> {
        let json = doc.to_json_string()?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| AppError::Export("json host writer poisoned".into()))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}
