//! EGL display, window surface and rendering context.
//!
//! Creation happens in two steps, the same way the driver wants it: `Context::new` opens
//! the default display and picks a framebuffer configuration, which tells the caller
//! what buffer format the native window should use. `ContextPrototype::finish` then
//! creates the surface and the context against that window.

use std::ffi::CString;
use std::ops::Deref;
use std::ptr;

use self::ffi::EGLint;
use super::library::{LIBEGL, LIBGLES};
use crate::{Api, ContextError, CreationError, GlContext, PixelFormat, PixelFormatRequirements};

pub mod config;
pub mod ffi;

/// The EGL entry points, resolved from the process-wide `libEGL.so` handle.
#[derive(Clone)]
pub struct Egl(ffi::egl::Egl);

impl Egl {
    pub fn load() -> Result<Egl, CreationError> {
        let lib = match *LIBEGL {
            Ok(ref lib) => lib,
            Err(ref err) => return Err(CreationError::NoBackendAvailable(err.clone().into())),
        };

        if lib.symbol("eglGetDisplay").is_null() {
            return Err(CreationError::NotSupported("libEGL.so does not export eglGetDisplay"));
        }

        Ok(Egl(ffi::egl::Egl::load_with(|sym| lib.symbol(sym))))
    }
}

impl Deref for Egl {
    type Target = ffi::egl::Egl;

    #[inline]
    fn deref(&self) -> &ffi::egl::Egl {
        &self.0
    }
}

/// A display with a chosen configuration, waiting for a native window.
pub struct ContextPrototype {
    egl: Egl,
    display: ffi::EGLDisplay,
    config: ffi::EGLConfig,
    pixel_format: PixelFormat,
    gles_version: Option<u8>,
}

/// A window surface and the rendering context bound to it.
pub struct Context {
    egl: Egl,
    display: ffi::EGLDisplay,
    context: ffi::EGLContext,
    surface: ffi::EGLSurface,
    pixel_format: PixelFormat,
}

impl Context {
    /// Initializes the default display and chooses a configuration for `pf_reqs`.
    pub fn new(egl: Egl, pf_reqs: &PixelFormatRequirements)
               -> Result<ContextPrototype, CreationError>
    {
        config::check_requirements(pf_reqs)?;

        // null is EGL_DEFAULT_DISPLAY
        let display = unsafe { egl.GetDisplay(ptr::null()) };
        if display.is_null() {
            return Err(CreationError::OsError(format!("Could not create EGL display object")));
        }

        let (major, minor) = unsafe {
            let mut major: EGLint = 0;
            let mut minor: EGLint = 0;

            if egl.Initialize(display, &mut major, &mut minor) == 0 {
                return Err(CreationError::OsError(format!("eglInitialize failed")));
            }

            (major, minor)
        };
        debug!("EGL {}.{} initialized", major, minor);

        let configs = unsafe { query_configs(&egl, display, pf_reqs)? };
        debug!("{} framebuffer configurations match the request", configs.len());

        let config = config::choose_config(&configs, pf_reqs, |config, attrib| unsafe {
            get_config_attrib(&egl, display, config, attrib.to_egl())
        })?;

        let pixel_format = unsafe { read_pixel_format(&egl, display, config) };
        debug!("chose {:?}", pixel_format);

        Ok(ContextPrototype {
            egl,
            display,
            config,
            pixel_format,
            gles_version: pf_reqs.gles_version,
        })
    }

    /// Returns the size of the surface in pixels.
    pub fn get_dimensions(&self) -> Option<(u32, u32)> {
        let query = |attrib: EGLint| -> Option<EGLint> {
            let mut value = 0;
            let ret = unsafe { self.egl.QuerySurface(self.display, self.surface, attrib, &mut value) };
            if ret == 0 { None } else { Some(value) }
        };

        let width = query(ffi::egl::WIDTH as EGLint)?;
        let height = query(ffi::egl::HEIGHT as EGLint)?;
        Some((width.max(0) as u32, height.max(0) as u32))
    }

    #[inline]
    fn last_error(&self, call: &str) -> ContextError {
        context_error(call, unsafe { self.egl.GetError() })
    }
}

/// Turns the `eglGetError` code reported after `call` failed into a `ContextError`.
fn context_error(call: &str, code: EGLint) -> ContextError {
    if code == ffi::egl::CONTEXT_LOST as EGLint {
        ContextError::ContextLost
    } else {
        ContextError::OsError(format!("{} failed (eglGetError returned 0x{:x})", call, code))
    }
}

impl GlContext for Context {
    unsafe fn make_current(&self) -> Result<(), ContextError> {
        let ret = self.egl.MakeCurrent(self.display, self.surface, self.surface, self.context);

        if ret == 0 {
            return Err(self.last_error("eglMakeCurrent"));
        }

        Ok(())
    }

    #[inline]
    fn is_current(&self) -> bool {
        unsafe { self.egl.GetCurrentContext() == self.context }
    }

    fn get_proc_address(&self, addr: &str) -> *const () {
        // core GLES functions are not guaranteed to go through eglGetProcAddress
        if let Ok(ref lib) = *LIBGLES {
            let symbol = lib.symbol(addr);
            if !symbol.is_null() {
                return symbol as *const ();
            }
        }

        let addr = match CString::new(addr.as_bytes()) {
            Ok(addr) => addr,
            Err(_) => return ptr::null(),
        };

        unsafe { self.egl.GetProcAddress(addr.as_ptr()) as *const () }
    }

    #[inline]
    fn swap_buffers(&self) -> Result<(), ContextError> {
        let ret = unsafe { self.egl.SwapBuffers(self.display, self.surface) };

        if ret == 0 {
            return Err(self.last_error("eglSwapBuffers"));
        }

        Ok(())
    }

    #[inline]
    fn get_api(&self) -> Api {
        Api::OpenGlEs
    }

    #[inline]
    fn get_pixel_format(&self) -> PixelFormat {
        self.pixel_format.clone()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe {
            if self.is_current() {
                self.egl.MakeCurrent(self.display, ptr::null(), ptr::null(), ptr::null());
            }

            // The default display is shared by every context of the process, so it is
            // left initialized.
            self.egl.DestroyContext(self.display, self.context);
            self.egl.DestroySurface(self.display, self.surface);
        }
    }
}

impl ContextPrototype {
    /// Returns the `EGL_NATIVE_VISUAL_ID` of the chosen configuration.
    ///
    /// This is guaranteed to be accepted by `ANativeWindow_setBuffersGeometry`.
    pub fn native_visual_id(&self) -> EGLint {
        unsafe {
            get_config_attrib(&self.egl, self.display, self.config,
                              ffi::egl::NATIVE_VISUAL_ID as EGLint).unwrap_or(0)
        }
    }

    #[inline]
    pub fn pixel_format(&self) -> &PixelFormat {
        &self.pixel_format
    }

    /// Creates the window surface and the rendering context.
    pub fn finish(self, native_window: ffi::EGLNativeWindowType)
                  -> Result<Context, CreationError>
    {
        let surface = unsafe {
            self.egl.CreateWindowSurface(self.display, self.config, native_window, ptr::null())
        };
        if surface.is_null() {
            return Err(CreationError::OsError(format!(
                "eglCreateWindowSurface failed (eglGetError returned 0x{:x})",
                unsafe { self.egl.GetError() })));
        }

        let mut attribs = Vec::with_capacity(3);
        if let Some(version) = self.gles_version {
            attribs.push(ffi::egl::CONTEXT_CLIENT_VERSION as EGLint);
            attribs.push(version as EGLint);
        }
        attribs.push(ffi::egl::NONE as EGLint);

        // null is EGL_NO_CONTEXT, nothing is shared
        let context = unsafe {
            self.egl.CreateContext(self.display, self.config, ptr::null(), attribs.as_ptr())
        };
        if context.is_null() {
            let code = unsafe { self.egl.GetError() };
            unsafe { self.egl.DestroySurface(self.display, surface) };
            return Err(CreationError::OsError(format!(
                "eglCreateContext failed (eglGetError returned 0x{:x})", code)));
        }

        Ok(Context {
            egl: self.egl,
            display: self.display,
            context,
            surface,
            pixel_format: self.pixel_format,
        })
    }
}

unsafe fn query_configs(egl: &Egl, display: ffi::EGLDisplay, pf_reqs: &PixelFormatRequirements)
                        -> Result<Vec<ffi::EGLConfig>, CreationError>
{
    let attribs = config::attrib_list(pf_reqs);

    let mut num_configs: EGLint = 0;
    if egl.ChooseConfig(display, attribs.as_ptr(), ptr::null_mut(), 0, &mut num_configs) == 0 {
        return Err(CreationError::OsError(format!("eglChooseConfig failed")));
    }
    if num_configs <= 0 {
        return Ok(Vec::new());
    }

    let mut configs: Vec<ffi::EGLConfig> = vec![ptr::null(); num_configs as usize];
    if egl.ChooseConfig(display, attribs.as_ptr(), configs.as_mut_ptr(), num_configs,
                        &mut num_configs) == 0
    {
        return Err(CreationError::OsError(format!("eglChooseConfig failed")));
    }
    configs.truncate(num_configs.max(0) as usize);

    Ok(configs)
}

unsafe fn get_config_attrib(egl: &Egl, display: ffi::EGLDisplay, config: ffi::EGLConfig,
                            attrib: EGLint) -> Option<EGLint>
{
    let mut value = 0;

    if egl.GetConfigAttrib(display, config, attrib, &mut value) == 0 {
        None
    } else {
        Some(value)
    }
}

unsafe fn read_pixel_format(egl: &Egl, display: ffi::EGLDisplay, config: ffi::EGLConfig)
                            -> PixelFormat
{
    let attrib = |attrib: EGLint| get_config_attrib(egl, display, config, attrib).unwrap_or(0);

    let color = attrib(ffi::egl::RED_SIZE as EGLint) + attrib(ffi::egl::GREEN_SIZE as EGLint) +
                attrib(ffi::egl::BLUE_SIZE as EGLint);

    PixelFormat {
        hardware_accelerated: attrib(ffi::egl::CONFIG_CAVEAT as EGLint) !=
                              ffi::egl::SLOW_CONFIG as EGLint,
        color_bits: color as u8,
        alpha_bits: attrib(ffi::egl::ALPHA_SIZE as EGLint) as u8,
        depth_bits: attrib(ffi::egl::DEPTH_SIZE as EGLint) as u8,
        stencil_bits: attrib(ffi::egl::STENCIL_SIZE as EGLint) as u8,
        double_buffer: true,
        multisampling: if attrib(ffi::egl::SAMPLE_BUFFERS as EGLint) != 0 {
            Some(attrib(ffi::egl::SAMPLES as EGLint) as u16)
        } else {
            None
        },
    }
}
