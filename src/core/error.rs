//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The literal or file does not describe a usable configuration document.
    #[error("malformed configuration: {0}")]
    MalformedConfiguration(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn malformed_configuration_display() {
        let e = AppError::MalformedConfiguration("missing field `modules`".into());
        assert!(e.to_string().starts_with("malformed configuration"));
        assert!(e.to_string().contains("missing field `modules`"));
    }

    #[test]
    fn export_error_display() {
        let e = AppError::Export("document already exported".into());
        assert!(e.to_string().contains("already exported"));
    }

    #[test]
    fn logger_error_display() {
        let e = AppError::Logger("already initialized".into());
        assert!(e.to_string().contains("already initialized"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }
}
