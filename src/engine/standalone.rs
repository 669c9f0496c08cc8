// src/engine/standalone.rs
//! Self-hosted loop for running one game without the arcade host.
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;

use crate::constants::{BASE_HEIGHT, BASE_WIDTH, DEFAULT_FPS};
use crate::errors::{ArcadeError, Result};
use crate::game::GameModule;
use crate::input::InputEvent;
use crate::screen::{FrameClock, Screen, ScreenContext, Surface};

use super::{step_frame, FrameOutcome};

/// Lets an operator (a signal handler, another thread) end a standalone run.
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle(Arc<AtomicBool>);

impl InterruptHandle {
    pub fn interrupt(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Stops the game when dropped, whichever way the run ends.
struct Session<'a, G: GameModule + ?Sized> {
    game: &'a mut G,
}

impl<G: GameModule + ?Sized> Drop for Session<'_, G> {
    fn drop(&mut self) {
        self.game.stop();
    }
}

/// Screen context at the base resolution and default frame-rate cap, for
/// games built outside the arcade host.
pub fn base_context() -> Rc<ScreenContext> {
    Rc::new(ScreenContext::new(
        BASE_WIDTH,
        BASE_HEIGHT,
        Surface::shared(BASE_WIDTH, BASE_HEIGHT),
        FrameClock::shared(),
        DEFAULT_FPS,
    ))
}

/// Set once the process has created its event loop; winit allows only one.
static EVENT_LOOP_CLAIMED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static CURRENT: RefCell<Option<Standalone>> = RefCell::new(None);
}

fn claim_event_loop(flag: &AtomicBool) -> Result<()> {
    if flag.swap(true, Ordering::SeqCst) {
        return Err(ArcadeError::Window(
            "The display subsystem is already active on another thread".to_string(),
        ));
    }
    Ok(())
}

/// Runs `f` on the value in `slot`, creating it with `init` first if the slot
/// is empty. Fails instead of re-entering a value that is already in use.
fn with_slot<T, R>(
    slot: &RefCell<Option<T>>,
    init: impl FnOnce() -> Result<T>,
    f: impl FnOnce(&mut T) -> R,
) -> Result<R> {
    let mut slot = slot
        .try_borrow_mut()
        .map_err(|_| ArcadeError::Window("A standalone run is already in progress".to_string()))?;
    if slot.is_none() {
        *slot = Some(init()?);
    }
    match slot.as_mut() {
        Some(value) => Ok(f(value)),
        None => Err(ArcadeError::Window("Display subsystem unavailable".to_string())),
    }
}

/// Owns the display subsystem for standalone runs.
///
/// There is one per process, created on first use by [`Standalone::with_current`]
/// and reused by every later run.
pub struct Standalone {
    event_loop: EventLoop<()>,
    icon_path: Option<PathBuf>,
    interrupt: InterruptHandle,
}

impl Standalone {
    fn new() -> Result<Self> {
        claim_event_loop(&EVENT_LOOP_CLAIMED)?;
        log::debug!("Initializing display subsystem");
        Ok(Self {
            event_loop: EventLoop::new(),
            icon_path: None,
            interrupt: InterruptHandle::default(),
        })
    }

    /// Calls `f` with the process's display subsystem, initializing it if it
    /// is not already active. Must be called from the main thread.
    pub fn with_current<R>(f: impl FnOnce(&mut Standalone) -> R) -> Result<R> {
        CURRENT.with(|current| with_slot(current, Standalone::new, f))
    }

    /// Icon used for the windows of later runs.
    pub fn set_icon(&mut self, path: impl Into<PathBuf>) {
        self.icon_path = Some(path.into());
    }

    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    /// Opens a window for `game`'s screen context, starts the game on the
    /// context's surface and loops until the window is closed, the game stops
    /// itself or the run is interrupted. The game is stopped and the window
    /// closed on every exit path.
    pub fn run<G: GameModule + ?Sized>(&mut self, game: &mut G) -> Result<()> {
        let mut screen = Screen::for_context(
            game.metadata().title(),
            self.icon_path.as_deref(),
            game.base().shared_context(),
            &self.event_loop,
        )?;

        game.start(screen.surface());
        let mut session = Session { game };
        let interrupt = self.interrupt.clone();

        let mut pending: Vec<InputEvent> = Vec::new();
        let mut failure: Option<ArcadeError> = None;
        let window_id = screen.window().id();

        let game = &mut *session.game;
        self.event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, window_id: id } if id == window_id => {
                    if let WindowEvent::Resized(size) = event {
                        screen.resize(size);
                    }
                    if let Some(input) = InputEvent::from_window_event(&event) {
                        pending.push(input);
                    }
                }
                Event::MainEventsCleared => {
                    if interrupt.is_interrupted() {
                        log::info!("Standalone run interrupted");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }

                    let events = std::mem::take(&mut pending);
                    match step_frame(game, &events, &mut screen) {
                        Ok(FrameOutcome::Continue) => {}
                        Ok(FrameOutcome::Exit) => *control_flow = ControlFlow::Exit,
                        Err(err) => {
                            log::error!("Standalone frame failed: {}", err);
                            failure = Some(err);
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                }
                _ => {}
            }
        });

        drop(session);
        drop(screen);
        log::info!("Closed standalone window");
        self.interrupt.reset();

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Runs `game` in its own window, reusing the display subsystem of earlier
/// runs. See [`Standalone::run`].
pub fn run_independently<G: GameModule + ?Sized>(game: &mut G) -> Result<()> {
    Standalone::with_current(|standalone| standalone.run(game))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn slot_is_initialized_once_and_reused() {
        let slot = RefCell::new(None);
        let inits = Cell::new(0);
        let init = || {
            inits.set(inits.get() + 1);
            Ok(0u32)
        };

        for expected in 1..=3 {
            let value = with_slot(&slot, init, |runs| {
                *runs += 1;
                *runs
            })
            .unwrap();
            assert_eq!(value, expected);
        }
        assert_eq!(inits.get(), 1);
    }

    #[test]
    fn failed_init_leaves_the_slot_empty() {
        let slot: RefCell<Option<u32>> = RefCell::new(None);
        let result = with_slot(&slot, || Err(ArcadeError::Window("no display".to_string())), |_| ());
        assert!(matches!(result, Err(ArcadeError::Window(_))));
        assert!(slot.borrow().is_none());
    }

    #[test]
    fn nested_use_is_an_error_not_a_panic() {
        let slot = RefCell::new(Some(1u32));
        let inner = with_slot(&slot, || Ok(0), |_| with_slot(&slot, || Ok(0), |_| ())).unwrap();
        assert!(matches!(inner, Err(ArcadeError::Window(_))));
    }

    #[test]
    fn event_loop_can_only_be_claimed_once() {
        let flag = AtomicBool::new(false);
        assert!(claim_event_loop(&flag).is_ok());
        assert!(matches!(claim_event_loop(&flag), Err(ArcadeError::Window(_))));
    }

    #[test]
    fn interrupt_handle_clones_share_the_flag() {
        let handle = InterruptHandle::default();
        let other = handle.clone();
        other.interrupt();
        assert!(handle.is_interrupted());
        handle.reset();
        assert!(!other.is_interrupted());
    }
}
