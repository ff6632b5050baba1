//! Host glue
//!
//! [`ColorBars`] follows a source filter's lifecycle: `create` validates the
//! request and fixes the clip description, `get_frame` renders and tags the
//! single frame.

use tracing::{debug, info};

use crate::buffer::{PixelBuffer, Planes};
use crate::config::{FormatConfig, Request};
use crate::error::{Error, Result};
use crate::props::{FrameProps, VideoInfo};
use crate::test_pattern;
use crate::validate::{validate, Advisory};

/// A rendered frame and its properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub buffer: PixelBuffer,
    pub props: FrameProps,
}

/// A created colour bar source
#[derive(Debug, Clone)]
pub struct ColorBars {
    config: FormatConfig,
    info: VideoInfo,
    props: FrameProps,
    advisories: Vec<Advisory>,
}

impl ColorBars {
    /// Validate `request` and fix the output description
    pub fn create(request: &Request) -> Result<Self> {
        let validated = validate(request)?;
        let config = validated.config;
        let info = VideoInfo::for_config(&config);
        info!(
            "ColorBars: {:?} {}x{} {}",
            config.resolution(),
            info.width,
            info.height,
            info.format.name()
        );
        Ok(Self {
            config,
            info,
            props: FrameProps::for_config(&config),
            advisories: validated.advisories,
        })
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    pub fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    pub fn props(&self) -> &FrameProps {
        &self.props
    }

    /// Warnings raised while validating the request
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    fn check_frame(&self, n: usize) -> Result<()> {
        if n >= self.info.num_frames {
            return Err(Error::other(format!(
                "ColorBars: frame {} requested, clip has {}",
                n, self.info.num_frames
            )));
        }
        Ok(())
    }

    /// Render frame `n` into a new buffer
    pub fn get_frame(&self, n: usize) -> Result<Frame> {
        self.check_frame(n)?;
        debug!(frame = n, "get_frame");
        Ok(Frame {
            buffer: test_pattern::generate_color_bars(&self.config),
            props: self.props,
        })
    }

    /// Render frame `n` into host-owned planes and return its properties
    pub fn get_frame_into(&self, n: usize, planes: &mut Planes<'_>) -> Result<FrameProps> {
        self.check_frame(n)?;
        if (planes.width(), planes.height()) != (self.info.width, self.info.height) {
            return Err(Error::other(format!(
                "ColorBars: planes are {}x{}, clip is {}x{}",
                planes.width(),
                planes.height(),
                self.info.width,
                self.info.height
            )));
        }
        test_pattern::render(&self.config, planes);
        Ok(self.props)
    }
}
