//! The handful of GLES calls the bootstrap needs.

use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

use crate::GlContext;

#[allow(non_camel_case_types, non_upper_case_globals, non_snake_case, unused_qualifications,
        dead_code, clippy::all)]
pub mod ffi {
    include!(concat!(env!("OUT_DIR"), "/gles_bindings.rs"));
}

pub use self::ffi::Gles2 as Gl;

/// Driver strings logged once the context is current.
pub const DRIVER_INFO: [ffi::types::GLenum; 4] =
    [ffi::VENDOR, ffi::RENDERER, ffi::VERSION, ffi::EXTENSIONS];

/// Resolves the GLES entry points through `context`.
///
/// The context should be current, some drivers only hand out valid pointers then.
pub fn load<C: GlContext>(context: &C) -> Gl {
    Gl::load_with(|symbol| context.get_proc_address(symbol) as *const c_void)
}

/// Returns one of the `glGetString` values, `None` if the driver has no answer.
pub fn get_string(gl: &Gl, name: ffi::types::GLenum) -> Option<String> {
    unsafe {
        let ptr = gl.GetString(name);
        if ptr.is_null() {
            return None;
        }

        Some(CStr::from_ptr(ptr as *const c_char).to_string_lossy().into_owned())
    }
}

pub fn log_driver_info(gl: &Gl) {
    for &name in DRIVER_INFO.iter() {
        info!("{}", info_line(get_string(gl, name).as_ref().map(|s| s.as_str())));
    }
}

/// Formats one driver string for the log.
pub fn info_line(info: Option<&str>) -> String {
    format!("OpenGL Info: {}", info.unwrap_or("<unavailable>"))
}

pub fn init_state(gl: &Gl) {
    unsafe {
        gl.Enable(ffi::CULL_FACE);
        gl.Disable(ffi::DEPTH_TEST);
    }
}

/// Fills the color buffer with `color`.
#[inline]
pub fn clear(gl: &Gl, color: [f32; 4]) {
    unsafe {
        gl.ClearColor(color[0], color[1], color[2], color[3]);
        gl.Clear(ffi::COLOR_BUFFER_BIT);
    }
}
