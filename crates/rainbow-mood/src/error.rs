//! Error types for emotion mapping and configuration loading.

use std::path::PathBuf;

use rainbow_color::ColorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("color {name:?} not found in configuration")]
    UnknownColor { name: String },

    #[error("tint {tint:?} not found for color {color:?}")]
    UnknownTint { color: String, tint: String },

    #[error("invalid color configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed color configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// True for the "referenced color or tint is not in the table" cases.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownColor { .. } | Self::UnknownTint { .. } | Self::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
