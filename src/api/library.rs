//! Process-wide handles on the driver libraries.
//!
//! Both libraries are opened at most once per process and stay loaded until it exits.

use std::os::raw::c_void;
use std::path::Path;
use std::ptr;

use shared_library::dynamic_library::DynamicLibrary;

pub struct SharedLibrary(DynamicLibrary);

// The handle is only ever used to look up symbols, which `dlsym` allows from any thread.
unsafe impl Send for SharedLibrary {}
unsafe impl Sync for SharedLibrary {}

impl SharedLibrary {
    /// Opens the first library of `names` that can be loaded.
    pub fn open(names: &[&str]) -> Result<SharedLibrary, String> {
        let mut errors = Vec::with_capacity(names.len());

        for name in names {
            match DynamicLibrary::open(Some(Path::new(name))) {
                Ok(lib) => return Ok(SharedLibrary(lib)),
                Err(err) => errors.push(format!("{}: {}", name, err)),
            }
        }

        Err(errors.join("; "))
    }

    /// Returns the address of `symbol`, or null if the library doesn't export it.
    pub fn symbol(&self, symbol: &str) -> *const c_void {
        unsafe { self.0.symbol::<c_void>(symbol) }
            .map(|ptr| ptr as *const c_void)
            .unwrap_or(ptr::null())
    }
}

lazy_static! {
    pub static ref LIBEGL: Result<SharedLibrary, String> =
        SharedLibrary::open(&["libEGL.so", "libEGL.so.1"]);

    pub static ref LIBGLES: Result<SharedLibrary, String> =
        SharedLibrary::open(&["libGLESv2.so", "libGLESv2.so.2"]);
}
