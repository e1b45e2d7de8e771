//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the embedview crate.
#[derive(Debug)]
pub enum EmbedError {
    /// The requested GUI backend was not compiled into this build.
    BackendUnavailable {
        /// Display name of the backend that was requested.
        backend: &'static str,
        /// Cargo feature that enables it.
        feature: &'static str,
    },
    /// An option or runtime setter received an out-of-range value.
    InvalidConfiguration(String),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A GPU operation failed while rendering, releasing or reading back.
    Render(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// Standalone host window or event-loop failure.
    Host(String),
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendUnavailable { backend, feature } => write!(
                f,
                "GUI backend '{backend}' is unavailable: rebuild with the \
                 '{feature}' feature enabled"
            ),
            Self::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Render(msg) => write!(f, "render error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for EmbedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for EmbedError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for EmbedError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_unavailable_names_the_feature() {
        let err = EmbedError::BackendUnavailable {
            backend: "egui",
            feature: "egui",
        };
        let msg = err.to_string();
        assert!(msg.contains("'egui'"));
        assert!(msg.contains("feature"));
    }

    #[test]
    fn io_errors_expose_their_source() {
        use std::error::Error;
        let err = EmbedError::from(std::io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(EmbedError::Render("lost".into()).source().is_none());
    }
}
