//! Bootstrap configuration.
//!
//! Nothing is read from disk or the environment: the defaults reproduce the constants of
//! the stock native-activity sample, and the `with_*` methods exist for embedders that
//! drive the loop themselves.

use log::LevelFilter;

use crate::PixelFormatRequirements;

/// Tag under which every message of this crate shows up in logcat.
pub const DEFAULT_LOG_TAG: &str = "native-activity";

/// Opaque yellow.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Framebuffer configuration to look for.
    pub pf_reqs: PixelFormatRequirements,

    /// RGBA color the screen is cleared to every frame.
    pub clear_color: [f32; 4],

    pub log_tag: &'static str,

    pub max_log_level: LevelFilter,
}

impl Default for Settings {
    #[inline]
    fn default() -> Settings {
        Settings {
            pf_reqs: PixelFormatRequirements::default(),
            clear_color: DEFAULT_CLEAR_COLOR,
            log_tag: DEFAULT_LOG_TAG,
            max_log_level: LevelFilter::Info,
        }
    }
}

impl Settings {
    #[inline]
    pub fn new() -> Settings {
        Settings::default()
    }

    /// Sets the color the screen is cleared to. Components are clamped to `[0, 1]`.
    #[inline]
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Settings {
        let mut clamped = color;
        for c in clamped.iter_mut() {
            *c = c.max(0.0).min(1.0);
        }
        self.clear_color = clamped;
        self
    }

    #[inline]
    pub fn with_pixel_format(mut self, pf_reqs: PixelFormatRequirements) -> Settings {
        self.pf_reqs = pf_reqs;
        self
    }

    /// Requests a specific GLES major version for the rendering context.
    ///
    /// Only `2` and `3` can be requested; creating the display fails with `NotSupported`
    /// for anything else.
    #[inline]
    pub fn with_gles_version(mut self, major: u8) -> Settings {
        self.pf_reqs.gles_version = Some(major);
        self
    }

    #[inline]
    pub fn with_depth_buffer(mut self, bits: u8) -> Settings {
        self.pf_reqs.depth_bits = bits;
        self
    }

    #[inline]
    pub fn with_log_tag(mut self, tag: &'static str) -> Settings {
        self.log_tag = tag;
        self
    }

    #[inline]
    pub fn with_max_log_level(mut self, level: LevelFilter) -> Settings {
        self.max_log_level = level;
        self
    }
}
