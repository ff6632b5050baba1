//! Error types for the colour bar generator

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Colour bar error types
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected request parameters; nothing was rendered
    #[error("ColorBars: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// IO errors (output files, log files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON request/sidecar errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Every way a request can be rejected by the validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid compatability mode {0}")]
    Compatibility(i64),

    #[error("invalid resolution {0}")]
    Resolution(i64),

    #[error("invalid hdr mode {0}, expected 0 (off), 1 (HLG), 2 (PQ) or 3 (PQ full range)")]
    HdrMode(i64),

    #[error("invalid pixelformat {0}, only YUV444P10 and YUV444P12 supported")]
    SdrPixelFormat(i64),

    #[error("invalid pixelformat {0}, only RGB30 and RGB36 supported with HDR")]
    HdrPixelFormat(i64),

    #[error("invalid I/Q mode {0}")]
    IqMode(i64),

    #[error("wide color (Rec.2020) only valid with UHDTV systems")]
    WideGamutResolution,

    #[error("-I/+Q and +I not valid with wide color (Rec.2020)")]
    WideGamutIq,

    #[error("HDR only valid with 1080p and higher systems")]
    HdrResolution,

    #[error("half-line blanking only valid with NTSC and PAL systems")]
    HalfLineResolution,
}

impl Error {
    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns the validation cause if this error rejected a request
    pub fn config_error(&self) -> Option<&ConfigError> {
        match self {
            Self::InvalidConfig(cause) => Some(cause),
            _ => None,
        }
    }
}
