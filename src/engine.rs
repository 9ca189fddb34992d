//! Lifecycle-command dispatch and the per-frame step.
//!
//! The engine starts out with no display. The first `InitWindow` that comes with a window
//! builds one; from then on every frame clears the screen and presents it. If building the
//! display fails the engine stays empty and frames do nothing.

use crate::{ContextError, CreationError, Settings};

/// Lifecycle commands delivered by the host runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// The native window is being shown.
    InitWindow,
    /// The application is being destroyed, the loop must stop.
    Destroy,
    /// Any other transition. Ignored.
    Other,
}

/// Something a frame can be drawn on.
pub trait DrawTarget {
    /// Fills the whole color buffer with `color`.
    fn clear(&self, color: [f32; 4]);

    /// Shows what has been drawn since the last call.
    fn present(&self) -> Result<(), ContextError>;
}

pub struct Engine<D> {
    display: Option<D>,
    clear_color: [f32; 4],
    destroy_requested: bool,
}

impl<D: DrawTarget> Engine<D> {
    pub fn new(settings: &Settings) -> Engine<D> {
        Engine {
            display: None,
            clear_color: settings.clear_color,
            destroy_requested: false,
        }
    }

    /// Reacts to a lifecycle command.
    ///
    /// `window` is the native window currently attached to the application, if any, and
    /// `init` turns it into a display. A failed `init` is logged and otherwise ignored.
    pub fn handle_cmd<W, F>(&mut self, cmd: AppCommand, window: Option<W>, init: F)
        where F: FnOnce(W) -> Result<D, CreationError>
    {
        match cmd {
            AppCommand::InitWindow => {
                let window = match window {
                    Some(window) => window,
                    None => return,
                };

                // the previous display, if any, goes away before its replacement is built
                self.display = None;

                match init(window) {
                    Ok(display) => self.display = Some(display),
                    Err(err) => warn!("{}", err),
                }
            }
            AppCommand::Destroy => self.destroy_requested = true,
            AppCommand::Other => (),
        }
    }

    /// Clears the screen and presents it. Does nothing until a display exists.
    pub fn draw_frame(&self) -> Result<(), ContextError> {
        if let Some(ref display) = self.display {
            display.clear(self.clear_color);
            display.present()?;
        }

        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.display.is_some()
    }

    #[inline]
    pub fn destroy_requested(&self) -> bool {
        self.destroy_requested
    }

    #[inline]
    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }
}

/// Remembers whether the previous frame failed to present.
///
/// The poll loop never blocks, so a broken surface fails on every iteration; only the
/// first failure of each run is handed back for logging.
#[derive(Debug, Default)]
pub struct PresentErrors {
    failing: bool,
}

impl PresentErrors {
    #[inline]
    pub fn new() -> PresentErrors {
        PresentErrors::default()
    }

    /// Records the outcome of a frame. Returns the error when it starts a new run of failures.
    pub fn record(&mut self, result: Result<(), ContextError>) -> Option<ContextError> {
        match result {
            Ok(()) => {
                self.failing = false;
                None
            }
            Err(_) if self.failing => None,
            Err(err) => {
                self.failing = true;
                Some(err)
            }
        }
    }

    #[inline]
    pub fn is_failing(&self) -> bool {
        self.failing
    }
}
