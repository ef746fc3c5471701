#![forbid(unsafe_code)]

//! Error types.
//!
//! None of these reach the visitor. Config errors stop the mount, everything
//! else degrades to a page with one feature fewer.

/// Configuration could not be parsed or failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON document was malformed or had the wrong shape.
    Parse(String),
    /// A field parsed but holds an unusable value.
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid page config: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid page config: {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Failure reported by the external 3D scene renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The scene descriptor could not be fetched or decoded.
    Load(String),
    /// The scene export does not define the named variable.
    UnknownVariable(String),
}

impl core::fmt::Display for SceneError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Load(msg) => write!(f, "scene load failed: {msg}"),
            Self::UnknownVariable(name) => write!(f, "scene has no variable `{name}`"),
        }
    }
}

impl std::error::Error for SceneError {}

/// The host refused to start media playback (autoplay policy, no source, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRejected(pub String);

impl core::fmt::Display for PlaybackRejected {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "playback rejected: {}", self.0)
    }
}

impl std::error::Error for PlaybackRejected {}
