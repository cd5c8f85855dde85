use std::fs;
use std::path::Path;

use crate::config::types::Config;
use crate::config::validator::validate;
use crate::error::{Result, ScanwatchError};

/// Read, parse and validate a TOML configuration file.
///
/// `interface`, when given (CLI flag or `SCANWATCH_INTERFACE`), replaces the
/// file's value before validation.
pub fn load_from_path<P: AsRef<Path>>(p: P, interface: Option<String>) -> Result<Config> {
    let txt = fs::read_to_string(p)
        .map_err(|e| ScanwatchError::Config(format!("Failed to read config file: {e}")))?;
    let mut cfg: Config = toml::from_str(&txt)
        .map_err(|e| ScanwatchError::Config(format!("Failed to parse config: {e}")))?;

    if let Some(interface) = interface {
        cfg.interface = interface;
    }

    validate(&cfg).map_err(ScanwatchError::Config)?;

    Ok(cfg)
}
