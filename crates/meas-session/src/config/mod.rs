//! Session config loader (strict parsing).
//!
//! The library never reads files or the environment on its own; clients that
//! want file-based config call [`load_from_file`] and hand the result to
//! `Session::with_config`.

pub mod schema;

use std::fs;
use std::path::Path;

use meas_core::error::{MeasError, Result};

pub use schema::{MeasConfig, ReportSection, TickPreference, TicksSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<MeasConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        MeasError::BadConfig(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MeasConfig> {
    let cfg: MeasConfig = serde_yaml::from_str(s)
        .map_err(|e| MeasError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
