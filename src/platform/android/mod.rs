#![cfg(target_os = "android")]

use std::time::Duration;

use android_activity::{AndroidApp, MainEvent, PollEvent};
use ndk::native_window::NativeWindow;

use crate::api::egl::{ffi, Context, Egl};
use crate::engine::{AppCommand, DrawTarget, Engine, PresentErrors};
use crate::{ContextError, CreationError, Display, Settings};

/// The display together with the window its surface was created on.
pub struct WindowDisplay {
    display: Display,
    // dropped after `display`, the surface must not outlive the window
    _window: NativeWindow,
}

impl DrawTarget for WindowDisplay {
    #[inline]
    fn clear(&self, color: [f32; 4]) {
        self.display.clear(color);
    }

    #[inline]
    fn present(&self) -> Result<(), ContextError> {
        self.display.present()
    }
}

#[no_mangle]
fn android_main(app: AndroidApp) {
    let settings = Settings::default();

    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(settings.max_log_level)
            .with_tag(settings.log_tag),
    );

    run(&app, &settings);
}

/// Runs the poll loop until the application is destroyed.
pub fn run(app: &AndroidApp, settings: &Settings) {
    let mut engine = Engine::new(settings);
    let mut present_errors = PresentErrors::new();

    while !engine.destroy_requested() {
        app.poll_events(Some(Duration::ZERO), |event| {
            if let PollEvent::Main(ref main_event) = event {
                engine.handle_cmd(to_command(main_event), app.native_window(),
                                  |window| init_display(window, settings));
            }
        });

        if let Some(err) = present_errors.record(engine.draw_frame()) {
            warn!("{}", err);
        }
    }
}

fn to_command(event: &MainEvent<'_>) -> AppCommand {
    match *event {
        MainEvent::InitWindow { .. } => AppCommand::InitWindow,
        MainEvent::Destroy => AppCommand::Destroy,
        _ => AppCommand::Other,
    }
}

fn init_display(window: NativeWindow, settings: &Settings) -> Result<WindowDisplay, CreationError> {
    let egl = Egl::load()?;
    let prototype = Context::new(egl, &settings.pf_reqs)?;

    let format = prototype.native_visual_id();
    let ret = unsafe {
        ndk_sys::ANativeWindow_setBuffersGeometry(window.ptr().as_ptr(), 0, 0, format)
    };
    if ret != 0 {
        warn!("ANativeWindow_setBuffersGeometry failed ({})", ret);
    }

    let context = prototype.finish(window.ptr().as_ptr() as ffi::EGLNativeWindowType)?;

    Ok(WindowDisplay {
        display: Display::new(context)?,
        _window: window,
    })
}
