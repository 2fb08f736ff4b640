//! Configuration errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Sources could not be read or merged
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A setting is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The configuration could not be rendered as TOML
    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    /// Refused to replace an existing file
    #[error("Configuration file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The platform has no per-user configuration directory
    #[error("No configuration directory available for this user")]
    NoConfigDir,

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path() {
        let err = ConfigError::NotFound(PathBuf::from("/tmp/missing.toml"));
        assert!(err.to_string().contains("/tmp/missing.toml"));

        let err = ConfigError::AlreadyExists(PathBuf::from("/tmp/config.toml"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn io_error_has_source() {
        use std::error::Error as _;

        let err = ConfigError::Io {
            path: PathBuf::from("/nope"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("denied"));
    }
}
