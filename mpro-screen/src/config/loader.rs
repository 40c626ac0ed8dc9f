//! Configuration loading
//!
//! Reads `--config` if given, otherwise falls back to the embedded
//! `mpro.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ScreenConfig;

/// Default configuration compiled into the binary
pub const EMBEDDED_CONFIG: &str = include_str!("../../mpro.toml");

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parse a configuration document
pub fn parse_config(text: &str) -> Result<ScreenConfig, LoadError> {
    Ok(toml::from_str(text)?)
}

/// Load from `path`, or the embedded default when `None`
pub fn load(path: Option<&Path>) -> Result<ScreenConfig, LoadError> {
    let Some(path) = path else {
        tracing::debug!("using embedded configuration");
        return parse_config(EMBEDDED_CONFIG);
    };

    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
