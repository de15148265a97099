//! Error types for dt-core

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// dt-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// The second-runtime executable (normally `node`) was not found
    /// on `PATH` when a subprocess plugin was invoked. This is the
    /// only error that terminates the whole process by design.
    #[error("{runtime} runtime not found on PATH")]
    RuntimeMissing { runtime: String },

    /// An in-process plugin entry point failed to resolve. Recovered
    /// per-plugin: reported as a warning, never fatal.
    #[error("failed to load plugin '{name}': {message}")]
    PluginLoad { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn plugin_load(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PluginLoad {
            name: name.into(),
            message: message.into(),
        }
    }
}
