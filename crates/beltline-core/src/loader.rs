//! Loading [`LineConfig`] from data files.
//!
//! Feature-gated behind `data-loader`. The format is chosen from the file
//! extension: `.toml`, `.ron` or `.json`. Loaded configs are not validated
//! here; callers merge overrides first and then call
//! [`LineConfig::validate`].

use std::path::{Path, PathBuf};

use crate::config::LineConfig;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {}", .file.display())]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {}: {detail}", .file.display())]
    Parse { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error("failed to read {}: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, LoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(LoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Parsing
// ===========================================================================

/// Parse config text in the given format. `origin` is only used in errors.
pub fn parse_config(text: &str, format: Format, origin: &Path) -> Result<LineConfig, LoadError> {
    let parsed: Result<LineConfig, String> = match format {
        Format::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        Format::Ron => ron::from_str(text).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|detail| LoadError::Parse {
        file: origin.to_path_buf(),
        detail,
    })
}

/// Read and parse a config file.
pub fn load_config(path: &Path) -> Result<LineConfig, LoadError> {
    let format = detect_format(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        file: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text, format, path)?;
    log::debug!("loaded {:?} config from {}", format, path.display());
    Ok(config)
}
