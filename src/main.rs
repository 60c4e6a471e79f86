//! mirror-config — loads the startup configuration and hands it to the host.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Init logger (`MIRROR_LOG_LEVEL` > `RUST_LOG` > info)
//!   3. Load config (CLI path > `MIRROR_CONFIG` > embedded literal)
//!   4. Expose it as JSON on stdout

use std::env;
use std::io;
use std::path::PathBuf;

use tracing::info;

use mirror_config::logger::{self, LOG_LEVEL_ENV};
use mirror_config::{config, export, AppError, JsonHost};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Optional file; absence is not an error.
    let _ = dotenvy::dotenv();

    match env::var(LOG_LEVEL_ENV).ok() {
        Some(level) => logger::init(&level, true)?,
        None => logger::init("info", false)?,
    }

    let config_path = env::args_os().nth(1).map(PathBuf::from);
    let source = config::Source::select(config_path.as_deref());
    let doc = source.load()?;

    info!(
        source = %source,
        modules = doc.len(),
        enabled = doc.enabled_modules().count(),
        "config loaded"
    );

    let host = JsonHost::new(io::stdout());
    export::expose(doc, Some(&host))?;

    Ok(())
}
