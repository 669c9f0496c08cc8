// src/engine/mod.rs
//! Frame driving. [`drive_frame`] is what the arcade host runs for the active
//! game every frame; [`standalone`] lets a game be its own host while it is
//! being developed.
pub mod standalone;

use crate::errors::Result;
use crate::game::GameModule;
use crate::input::InputEvent;
use crate::screen::{Color, Screen};

pub use standalone::{base_context, run_independently, InterruptHandle, Standalone};

/// Runs one host frame: input is always delivered, `update` and `render`
/// only while the game is running. Returns whether the game is still running.
pub fn drive_frame<G>(game: &mut G, events: &[InputEvent], dt: f32) -> bool
where
    G: GameModule + ?Sized,
{
    game.handle_input(events);
    if game.is_running() {
        game.update(dt);
    }
    if game.is_running() {
        game.render();
    }
    game.is_running()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Exit,
}

/// Where a self-hosted loop shows its frames and keeps time.
pub trait FrameTarget {
    /// Fills the surface with `color` before the game draws.
    fn clear(&mut self, color: Color);

    /// Shows the surface contents.
    fn present(&mut self) -> Result<()>;

    /// Duration of the previous frame in seconds.
    fn frame_time(&self) -> f32;

    /// Ends the frame, capping the loop rate.
    fn tick(&mut self);
}

impl FrameTarget for Screen {
    fn clear(&mut self, color: Color) {
        Screen::clear(self, color);
    }

    fn present(&mut self) -> Result<()> {
        Screen::present(self)
    }

    fn frame_time(&self) -> f32 {
        self.clock().last_frame_seconds()
    }

    fn tick(&mut self) {
        Screen::tick(self);
    }
}

/// One iteration of the standalone loop.
///
/// A quit event stops the game and ends the loop before anything else runs.
/// Otherwise each stage runs only while the game is still running, so a game
/// that stops itself mid-frame skips the rest. The surface is cleared with the
/// game's background color right before it renders.
pub fn step_frame<G, T>(game: &mut G, events: &[InputEvent], target: &mut T) -> Result<FrameOutcome>
where
    G: GameModule + ?Sized,
    T: FrameTarget + ?Sized,
{
    if events.iter().any(InputEvent::is_quit) {
        game.stop();
        return Ok(FrameOutcome::Exit);
    }

    if game.is_running() {
        game.handle_input(events);
    }
    if game.is_running() {
        game.update(target.frame_time());
    }
    if game.is_running() {
        target.clear(game.bg_color());
        game.render();
        target.present()?;
    }
    target.tick();

    Ok(if game.is_running() {
        FrameOutcome::Continue
    } else {
        FrameOutcome::Exit
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ArcadeError;
    use crate::input::VirtualKeyCode;
    use crate::screen::Surface;
    use crate::testing::{self, RecordingGame};

    #[derive(Default)]
    struct FakeTarget {
        cleared: Vec<Color>,
        presented: usize,
        ticks: usize,
        fail_present: bool,
    }

    impl FrameTarget for FakeTarget {
        fn clear(&mut self, color: Color) {
            self.cleared.push(color);
        }

        fn present(&mut self) -> Result<()> {
            if self.fail_present {
                return Err(ArcadeError::Render("device lost".to_string()));
            }
            self.presented += 1;
            Ok(())
        }

        fn frame_time(&self) -> f32 {
            0.016
        }

        fn tick(&mut self) {
            self.ticks += 1;
        }
    }

    fn started_game() -> RecordingGame {
        let mut game = RecordingGame::new(testing::headless_context(16, 16)).unwrap();
        game.start(Surface::shared(16, 16));
        game
    }

    #[test]
    fn drive_frame_runs_all_stages_while_running() {
        let mut game = started_game();
        let events = [InputEvent::KeyPressed(VirtualKeyCode::Space)];

        assert!(drive_frame(&mut game, &events, 0.5));
        assert_eq!(game.inputs, vec![events.to_vec()]);
        assert_eq!(game.updates, vec![0.5]);
        assert_eq!(game.renders, 1);
    }

    #[test]
    fn drive_frame_skips_update_and_render_when_stopped() {
        let mut game = RecordingGame::new(testing::headless_context(16, 16)).unwrap();

        assert!(!drive_frame(&mut game, &[], 0.5));
        assert_eq!(game.inputs.len(), 1);
        assert!(game.updates.is_empty());
        assert_eq!(game.renders, 0);
    }

    #[test]
    fn step_runs_a_full_frame() {
        let mut game = started_game();
        let mut target = FakeTarget::default();

        let outcome = step_frame(&mut game, &[], &mut target).unwrap();
        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(game.updates, vec![0.016]);
        assert_eq!(game.renders, 1);
        assert_eq!(target.cleared, vec![game.bg_color()]);
        assert_eq!((target.presented, target.ticks), (1, 1));
    }

    #[test]
    fn quit_stops_the_game_before_anything_else() {
        let mut game = started_game();
        let mut target = FakeTarget::default();
        let events = [InputEvent::KeyPressed(VirtualKeyCode::A), InputEvent::Quit];

        let outcome = step_frame(&mut game, &events, &mut target).unwrap();
        assert_eq!(outcome, FrameOutcome::Exit);
        assert!(!game.is_running());
        assert!(game.inputs.is_empty());
        assert!(game.updates.is_empty());
        assert!(target.cleared.is_empty());
        assert_eq!((target.presented, target.ticks), (0, 0));
    }

    #[test]
    fn game_stopping_itself_ends_the_loop() {
        let mut game = started_game();
        game.stop_on_update = true;
        let mut target = FakeTarget::default();

        let outcome = step_frame(&mut game, &[], &mut target).unwrap();
        assert_eq!(outcome, FrameOutcome::Exit);
        assert_eq!(game.renders, 0);
        assert_eq!(target.presented, 0);
        assert_eq!(target.ticks, 1);
    }

    #[test]
    fn present_errors_propagate() {
        let mut game = started_game();
        let mut target = FakeTarget {
            fail_present: true,
            ..Default::default()
        };

        assert!(matches!(
            step_frame(&mut game, &[], &mut target),
            Err(ArcadeError::Render(_))
        ));
    }
}
