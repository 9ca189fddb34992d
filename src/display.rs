//! The initialized display: EGL handles, GLES entry points and surface size.

use crate::api::egl::Context;
use crate::api::gles::{self, Gl};
use crate::engine::DrawTarget;
use crate::{ContextError, CreationError, GlContext, PixelFormat};

/// Everything needed to draw a frame on the native window.
///
/// The display, surface and context handles live and die together inside `context`.
pub struct Display {
    context: Context,
    gl: Gl,
    width: u32,
    height: u32,
}

impl Display {
    /// Activates `context` on the calling thread and prepares the GL state.
    pub fn new(context: Context) -> Result<Display, CreationError> {
        unsafe { context.make_current() }.map_err(CreationError::ContextActivationFailed)?;

        if context.get_proc_address("glClear").is_null() {
            return Err(CreationError::NotSupported("the GLES library does not export glClear"));
        }

        let gl = gles::load(&context);
        let (width, height) = context.get_dimensions().unwrap_or((0, 0));
        debug!("surface is {}x{}", width, height);

        gles::log_driver_info(&gl);
        gles::init_state(&gl);

        Ok(Display {
            context,
            gl,
            width,
            height,
        })
    }

    /// Size of the surface in pixels, as reported when it was created.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.context.get_pixel_format()
    }
}

impl DrawTarget for Display {
    #[inline]
    fn clear(&self, color: [f32; 4]) {
        gles::clear(&self.gl, color);
    }

    #[inline]
    fn present(&self) -> Result<(), ContextError> {
        self.context.swap_buffers()
    }
}
