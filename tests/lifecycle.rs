extern crate egl_bootstrap;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use egl_bootstrap::{AppCommand, ContextError, CreationError, DrawTarget, Engine, PresentErrors, Settings};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear(usize, [f32; 4]),
    Present(usize),
    Dropped(usize),
}

type Log = Rc<RefCell<Vec<Call>>>;

struct Screen {
    id: usize,
    log: Log,
    lost: bool,
}

impl DrawTarget for Screen {
    fn clear(&self, color: [f32; 4]) {
        self.log.borrow_mut().push(Call::Clear(self.id, color));
    }

    fn present(&self) -> Result<(), ContextError> {
        self.log.borrow_mut().push(Call::Present(self.id));
        if self.lost {
            Err(ContextError::ContextLost)
        } else {
            Ok(())
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Call::Dropped(self.id));
    }
}

fn screen(id: usize, log: &Log) -> Screen {
    Screen { id, log: log.clone(), lost: false }
}

#[test]
fn nothing_is_drawn_before_the_window_exists() {
    let log = Log::default();
    let engine: Engine<Screen> = Engine::new(&Settings::default());

    assert!(!engine.is_initialized());
    engine.draw_frame().unwrap();
    engine.draw_frame().unwrap();

    assert!(log.borrow().is_empty());
}

#[test]
fn init_window_without_a_window_is_ignored() {
    let log = Log::default();
    let mut engine = Engine::new(&Settings::default());

    engine.handle_cmd(AppCommand::InitWindow, None::<()>, |()| -> Result<Screen, CreationError> {
        panic!("init must not run without a window")
    });

    assert!(!engine.is_initialized());
    engine.draw_frame().unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn every_frame_clears_and_presents() {
    let log = Log::default();
    let mut engine = Engine::new(&Settings::default());

    engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| Ok(screen(1, &log)));
    assert!(engine.is_initialized());

    engine.draw_frame().unwrap();
    engine.draw_frame().unwrap();

    let yellow = [1.0, 1.0, 0.0, 1.0];
    assert_eq!(*log.borrow(), vec![
        Call::Clear(1, yellow), Call::Present(1),
        Call::Clear(1, yellow), Call::Present(1),
    ]);
}

#[test]
fn clear_color_comes_from_the_settings() {
    let log = Log::default();
    let settings = Settings::new().with_clear_color([0.0, 0.25, 0.5, 1.0]);
    let mut engine = Engine::new(&settings);

    engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| Ok(screen(1, &log)));
    engine.draw_frame().unwrap();

    assert_eq!(log.borrow()[0], Call::Clear(1, [0.0, 0.25, 0.5, 1.0]));
}

#[test]
fn failed_init_leaves_the_engine_empty() {
    let log = Log::default();
    let mut engine: Engine<Screen> = Engine::new(&Settings::default());

    engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| Err(CreationError::NoAvailablePixelFormat));

    assert!(!engine.is_initialized());
    assert!(!engine.destroy_requested());
    engine.draw_frame().unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn window_is_handed_to_init() {
    let log = Log::default();
    let mut engine = Engine::new(&Settings::default());

    engine.handle_cmd(AppCommand::InitWindow, Some(7usize), |window| Ok(screen(window, &log)));
    engine.draw_frame().unwrap();

    assert_eq!(log.borrow()[1], Call::Present(7));
    assert_eq!(engine.display().map(|s| s.id), Some(7));
}

#[test]
fn second_init_window_replaces_the_display() {
    let log = Log::default();
    let mut engine = Engine::new(&Settings::default());

    engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| Ok(screen(1, &log)));
    engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| {
        log.borrow_mut().push(Call::Present(0));
        Ok(screen(2, &log))
    });
    engine.draw_frame().unwrap();

    // the old display is released before the new one is built
    assert_eq!(log.borrow()[0], Call::Dropped(1));
    assert_eq!(log.borrow()[1], Call::Present(0));
    assert_eq!(log.borrow()[3], Call::Present(2));
}

#[test]
fn present_errors_reach_the_caller() {
    let log = Log::default();
    let mut engine = Engine::new(&Settings::default());

    engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| {
        Ok(Screen { id: 1, log: log.clone(), lost: true })
    });

    match engine.draw_frame() {
        Err(ContextError::ContextLost) => (),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(engine.is_initialized());
}

#[test]
fn other_commands_change_nothing() {
    let log = Log::default();
    let mut engine = Engine::new(&Settings::default());

    engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| Ok(screen(1, &log)));
    engine.handle_cmd(AppCommand::Other, Some(()), |()| Ok(screen(2, &log)));

    assert_eq!(engine.display().map(|s| s.id), Some(1));
    assert!(!engine.destroy_requested());
}

#[test]
fn destroy_stops_the_loop() {
    let log = Log::default();
    let mut engine = Engine::new(&Settings::default());
    engine.handle_cmd(AppCommand::InitWindow, Some(()), |()| Ok(screen(1, &log)));

    let mut frames = 0;
    while !engine.destroy_requested() {
        engine.draw_frame().unwrap();
        frames += 1;
        if frames == 3 {
            engine.handle_cmd(AppCommand::Destroy, None, |()| Ok(screen(2, &log)));
        }
    }

    assert_eq!(frames, 3);
    assert_eq!(log.borrow().iter().filter(|c| **c == Call::Present(1)).count(), 3);
}

struct Flaky {
    lost: Rc<Cell<bool>>,
}

impl DrawTarget for Flaky {
    fn clear(&self, _color: [f32; 4]) {}

    fn present(&self) -> Result<(), ContextError> {
        if self.lost.get() {
            Err(ContextError::ContextLost)
        } else {
            Ok(())
        }
    }
}

#[test]
fn present_errors_are_reported_once_per_run() {
    let lost = Rc::new(Cell::new(false));
    let mut engine = Engine::new(&Settings::default());
    let flaky = Flaky { lost: lost.clone() };
    engine.handle_cmd(AppCommand::InitWindow, Some(()), move |()| Ok(flaky));

    let mut errors = PresentErrors::new();
    let mut reported = Vec::new();
    for &fails in [true, true, false, true].iter() {
        lost.set(fails);
        reported.push(errors.record(engine.draw_frame()).is_some());
    }

    assert_eq!(reported, vec![true, false, false, true]);
    assert!(errors.is_failing());
}

#[test]
fn frames_without_a_display_never_report() {
    let engine: Engine<Flaky> = Engine::new(&Settings::default());
    let mut errors = PresentErrors::new();

    for _ in 0..3 {
        assert!(errors.record(engine.draw_frame()).is_none());
    }
    assert!(!errors.is_failing());
}
