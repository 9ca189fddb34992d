//! Minimal Android native-activity bootstrap.
//!
//! Once the host runtime reports a native window, an EGL display, window surface and
//! rendering context are created against it, the OpenGL driver strings are logged and
//! every following iteration of the event loop clears the screen to a constant color.
//!
//! The entry point (`android_main`) only exists when building for Android. Everything
//! else (configuration selection, the engine state machine) is plain Rust and can be
//! driven from any host.
//!
//! # Example
//!
//! ```no_run
//! use egl_bootstrap::{AppCommand, ContextError, DrawTarget, Engine, Settings};
//!
//! struct Screen;
//!
//! impl DrawTarget for Screen {
//!     fn clear(&self, _color: [f32; 4]) {}
//!     fn present(&self) -> Result<(), ContextError> { Ok(()) }
//! }
//!
//! let mut engine = Engine::new(&Settings::default());
//! engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| Ok(Screen));
//! engine.draw_frame().unwrap();
//! ```

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate libc;
extern crate shared_library;

use std::error::Error;
use std::fmt;

pub use display::Display;
pub use engine::{AppCommand, DrawTarget, Engine, PresentErrors};
pub use settings::Settings;

pub mod api;
pub mod display;
pub mod engine;
mod platform;
pub mod settings;

/// Trait that describes objects that have access to an OpenGL context.
pub trait GlContext {
    /// Sets the context as the current context.
    unsafe fn make_current(&self) -> Result<(), ContextError>;

    /// Returns true if this context is the current one in this thread.
    fn is_current(&self) -> bool;

    /// Returns the address of an OpenGL function.
    fn get_proc_address(&self, addr: &str) -> *const ();

    /// Posts the back buffer to the window.
    fn swap_buffers(&self) -> Result<(), ContextError>;

    /// Returns the OpenGL API being used.
    fn get_api(&self) -> Api;

    /// Returns the pixel format of the main framebuffer of the context.
    fn get_pixel_format(&self) -> PixelFormat;
}

/// Error that can happen while creating a display.
#[derive(Debug)]
pub enum CreationError {
    OsError(String),
    NotSupported(&'static str),
    NoBackendAvailable(Box<dyn Error + Send + Sync>),
    NoAvailablePixelFormat,
    ContextActivationFailed(ContextError),
}

impl CreationError {
    fn as_str(&self) -> &str {
        match *self {
            CreationError::OsError(ref text) => text,
            CreationError::NotSupported(text) => text,
            CreationError::NoBackendAvailable(_) => "No backend is available",
            CreationError::NoAvailablePixelFormat => "Unable to initialize EGLConfig",
            CreationError::ContextActivationFailed(_) => "Unable to eglMakeCurrent",
        }
    }
}

impl fmt::Display for CreationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        formatter.write_str(self.as_str())?;

        if let Some(err) = self.source() {
            write!(formatter, ": {}", err)?;
        }

        Ok(())
    }
}

impl Error for CreationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            CreationError::NoBackendAvailable(ref err) => Some(&**err),
            CreationError::ContextActivationFailed(ref err) => Some(err),
            _ => None,
        }
    }
}

/// Error that can happen when manipulating an OpenGL context.
#[derive(Debug)]
pub enum ContextError {
    OsError(String),
    ContextLost,
}

impl fmt::Display for ContextError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            ContextError::OsError(ref text) => formatter.write_str(text),
            ContextError::ContextLost => formatter.write_str("Context lost"),
        }
    }
}

impl Error for ContextError {}

/// The client API a context renders with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Api {
    /// OpenGL for embedded systems, the only API EGL contexts are created for here.
    OpenGlEs,
}

/// Describes a possible format of the framebuffer that was actually selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    pub hardware_accelerated: bool,
    /// Sum of the red, green and blue channel sizes.
    pub color_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub double_buffer: bool,
    pub multisampling: Option<u16>,
}

/// Describes how the framebuffer configuration should be picked.
///
/// The color and depth sizes are both a minimum passed to the driver and the exact value
/// preferred while scanning the configurations it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFormatRequirements {
    /// Bits per red, green and blue channel. Default is `8`.
    pub channel_bits: u8,

    /// Minimum number of bits for the alpha channel. Default is `None`.
    pub alpha_bits: Option<u8>,

    /// Preferred number of bits for the depth buffer. Default is `0`, i.e. no depth buffer.
    pub depth_bits: u8,

    /// Minimum number of bits for the stencil buffer. Default is `None`.
    pub stencil_bits: Option<u8>,

    /// Major GLES version to request for the context, `2` or `3`. Any other version makes
    /// context creation fail with `NotSupported`. `None` leaves the choice to the driver.
    /// Default is `None`.
    pub gles_version: Option<u8>,
}

impl Default for PixelFormatRequirements {
    #[inline]
    fn default() -> PixelFormatRequirements {
        PixelFormatRequirements {
            channel_bits: 8,
            alpha_bits: None,
            depth_bits: 0,
            stencil_bits: None,
            gles_version: None,
        }
    }
}
