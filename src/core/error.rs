//! Error handling for componentry.
//!
//! The error surface is intentionally small. The resolution pipeline treats
//! most gaps as defined, recoverable conditions rather than failures:
//!
//! - *Configuration gaps* - a component id with no template mapping, or a
//!   location policy naming an unknown id - are resolved by silent omission.
//! - *Missing templates* - no candidate file under either root - skip the
//!   component and continue the build.
//!
//! What does fail, fails fast at the caller boundary:
//!
//! - [`ComponentryError::InvalidOverride`] - a caller-supplied override that
//!   would break a resolver invariant (an empty suffix list, duplicate
//!   components) is rejected immediately instead of being coerced.
//! - [`ComponentryError::ConfigRead`] / [`ComponentryError::ConfigParse`] -
//!   the configuration file could not be read or is not valid TOML; both carry
//!   the offending path.
//! - [`ComponentryError::Render`] - the template engine rejected a template
//!   that was found; carries the template path.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ComponentryError>;

/// All failure modes surfaced by componentry.
#[derive(Debug, Error)]
pub enum ComponentryError {
    /// A caller-supplied override violates a resolver invariant.
    #[error("invalid override: {reason}")]
    InvalidOverride {
        /// Which invariant the override would break.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file: {}", path.display())]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("failed to parse config file: {}", path.display())]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A located template failed to render.
    #[error("failed to render template: {}", path.display())]
    Render {
        /// Path of the template that was being rendered.
        path: PathBuf,
        /// Underlying template engine error.
        #[source]
        source: tera::Error,
    },

    /// An I/O error outside of configuration loading (template reads, output
    /// writes).
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_override_formats_reason() {
        let err = ComponentryError::InvalidOverride {
            reason: "suffix override may not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid override: suffix override may not be empty"
        );
    }

    #[test]
    fn config_errors_include_path() {
        let err = ComponentryError::ConfigRead {
            path: PathBuf::from("/etc/componentry.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("componentry.toml"));
    }
}
