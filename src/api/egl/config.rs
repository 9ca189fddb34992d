//! Framebuffer configuration selection.
//!
//! The driver is asked for every configuration compatible with on-screen windows and at
//! least the requested color depth. Among those, the first one with exactly the requested
//! channel and depth sizes wins; when there is none, the very first one is used.

use super::ffi::{self, EGLint};
use crate::{CreationError, PixelFormatRequirements};

/// Configuration attributes the selection rule inspects.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigAttrib {
    RedSize,
    GreenSize,
    BlueSize,
    DepthSize,
}

impl ConfigAttrib {
    #[inline]
    pub fn to_egl(self) -> EGLint {
        match self {
            ConfigAttrib::RedSize => ffi::egl::RED_SIZE as EGLint,
            ConfigAttrib::GreenSize => ffi::egl::GREEN_SIZE as EGLint,
            ConfigAttrib::BlueSize => ffi::egl::BLUE_SIZE as EGLint,
            ConfigAttrib::DepthSize => ffi::egl::DEPTH_SIZE as EGLint,
        }
    }
}

/// Builds the `EGL_NONE`-terminated attribute list passed to `eglChooseConfig`.
pub fn attrib_list(reqs: &PixelFormatRequirements) -> Vec<EGLint> {
    let mut out = Vec::with_capacity(16);

    out.push(ffi::egl::SURFACE_TYPE as EGLint);
    out.push(ffi::egl::WINDOW_BIT as EGLint);

    out.push(ffi::egl::BLUE_SIZE as EGLint);
    out.push(reqs.channel_bits as EGLint);
    out.push(ffi::egl::GREEN_SIZE as EGLint);
    out.push(reqs.channel_bits as EGLint);
    out.push(ffi::egl::RED_SIZE as EGLint);
    out.push(reqs.channel_bits as EGLint);

    if let Some(alpha) = reqs.alpha_bits {
        out.push(ffi::egl::ALPHA_SIZE as EGLint);
        out.push(alpha as EGLint);
    }

    // zero is the driver default, only a real depth buffer needs asking for
    if reqs.depth_bits > 0 {
        out.push(ffi::egl::DEPTH_SIZE as EGLint);
        out.push(reqs.depth_bits as EGLint);
    }

    if let Some(stencil) = reqs.stencil_bits {
        out.push(ffi::egl::STENCIL_SIZE as EGLint);
        out.push(stencil as EGLint);
    }

    if let Some(bit) = reqs.gles_version.and_then(renderable_bit) {
        out.push(ffi::egl::RENDERABLE_TYPE as EGLint);
        out.push(bit);
    }

    out.push(ffi::egl::NONE as EGLint);
    out
}

/// The `EGL_RENDERABLE_TYPE` bit of a GLES major version, `None` if EGL has no such version.
#[inline]
pub fn renderable_bit(major: u8) -> Option<EGLint> {
    match major {
        2 => Some(ffi::egl::OPENGL_ES2_BIT as EGLint),
        3 => Some(ffi::egl::OPENGL_ES3_BIT as EGLint),
        _ => None,
    }
}

/// Rejects requirements no configuration or context could satisfy.
pub fn check_requirements(reqs: &PixelFormatRequirements) -> Result<(), CreationError> {
    match reqs.gles_version {
        Some(major) if renderable_bit(major).is_none() => {
            Err(CreationError::NotSupported("only GLES 2 and 3 contexts can be requested"))
        }
        _ => Ok(()),
    }
}

/// Picks a configuration out of `configs`, in the order the driver returned them.
///
/// `query` returns the value of an attribute for a configuration, or `None` if the driver
/// couldn't answer. A configuration with an unanswered attribute never matches exactly.
pub fn choose_config<C, F>(configs: &[C], reqs: &PixelFormatRequirements, mut query: F)
                           -> Result<C, CreationError>
    where C: Copy, F: FnMut(C, ConfigAttrib) -> Option<EGLint>
{
    let first = match configs.first() {
        Some(config) => *config,
        None => return Err(CreationError::NoAvailablePixelFormat),
    };

    let channel = Some(reqs.channel_bits as EGLint);
    let depth = Some(reqs.depth_bits as EGLint);

    let exact = configs.iter().cloned().find(|&config| {
        query(config, ConfigAttrib::RedSize) == channel &&
        query(config, ConfigAttrib::GreenSize) == channel &&
        query(config, ConfigAttrib::BlueSize) == channel &&
        query(config, ConfigAttrib::DepthSize) == depth
    });

    Ok(exact.unwrap_or(first))
}
