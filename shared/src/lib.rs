//! Colour bar generator shared library
//!
//! This crate provides everything a host needs to emit SMPTE RP 219 /
//! ITU-R BT.2111 colour bars:
//! - Request validation into a typed format configuration
//! - Bar width, band height and sample value tables
//! - The pattern renderer and its planar buffers
//! - Frame properties, host glue and raw planar output
//! - Statistics and logging utilities

pub mod buffer;
pub mod config;
pub mod error;
pub mod host;
pub mod layout;
pub mod logging;
pub mod palette;
pub mod props;
pub mod raw;
pub mod stats;
pub mod test_pattern;
pub mod validate;

pub use buffer::{PixelBuffer, Planes};
pub use config::{FormatConfig, Request};
pub use error::{ConfigError, Error, Result};
pub use host::{ColorBars, Frame};
pub use validate::{validate, Advisory, Validated};

use config::{Compat, Resolution};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolution used when a request leaves it out
pub const DEFAULT_RESOLUTION: Resolution = Resolution::Hd1080;

/// Compatibility variant used when a request leaves it out
pub const DEFAULT_COMPAT: Compat = Compat::Rp219;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        // VERSION is set at compile time from Cargo.toml, verify it's semver-like
        assert!(VERSION.contains('.'), "Version should contain a dot");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_RESOLUTION.dimensions(DEFAULT_COMPAT), (1920, 1080));
        let config = validate(&Request::default()).unwrap().config;
        assert_eq!(config.resolution(), DEFAULT_RESOLUTION);
        assert_eq!(config.compat(), DEFAULT_COMPAT);
    }
}
