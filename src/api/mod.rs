pub mod egl;
pub mod gles;

mod library;
