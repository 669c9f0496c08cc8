// src/demo/mod.rs
//! Bouncing box: the smallest complete game module, used by `arcade-demo`.
use std::rc::Rc;

use glam::Vec2;

use crate::errors::{ArcadeError, Result};
use crate::game::{GameBase, GameConfig, GameMeta, GameModule};
use crate::input::{InputEvent, InputState};
use crate::screen::{Color, ScreenContext};

const DEFAULT_BOX_SIZE: f32 = 48.0;
const DEFAULT_SPEED: f32 = 240.0;

const BACKGROUND: Color = Color::rgb(16, 16, 32);
const BOX_COLOR: Color = Color::rgb(100, 200, 50);
const PAUSED_COLOR: Color = Color::rgb(120, 120, 120);

/// A box that bounces around the screen. Arrows/WASD steer it, confirm
/// pauses and cancel returns to the host.
#[derive(Debug)]
pub struct BouncingBox {
    base: GameBase,
    input: InputState,
    position: Vec2,
    velocity: Vec2,
    size: f32,
    speed: f32,
    paused: bool,
    bounces: u32,
}

impl BouncingBox {
    pub fn metadata() -> GameMeta {
        let mut meta = GameMeta::new();
        meta.with_title("Bouncing Box")
            .with_description("Keep the box moving around the screen.")
            .with_release_date("2025-03-01")
            .with_tags(["demo", "arcade"])
            .with_group_number(0)
            .with_authors(["Arcade Machine SDK"]);
        meta
    }

    pub fn new(context: Rc<ScreenContext>) -> Result<Self> {
        Ok(Self {
            base: GameBase::new(Self::metadata(), context, BACKGROUND)?,
            input: InputState::with_default_actions(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: DEFAULT_BOX_SIZE,
            speed: DEFAULT_SPEED,
            paused: false,
            bounces: 0,
        })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    fn read_positive(config: &GameConfig, key: &str, default: f32) -> Result<f32> {
        match config.get_f64(key) {
            None => Ok(default),
            Some(value) if value > 0.0 => Ok(value as f32),
            Some(value) => Err(ArcadeError::Config(format!(
                "\"{}\" must be positive, got {}",
                key, value
            ))),
        }
    }

    fn bounce_axis(position: &mut f32, velocity: &mut f32, max: f32) -> bool {
        if *position < 0.0 {
            *position = 0.0;
            *velocity = velocity.abs();
            true
        } else if *position > max {
            *position = max;
            *velocity = -velocity.abs();
            true
        } else {
            false
        }
    }
}

impl GameModule for BouncingBox {
    fn base(&self) -> &GameBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GameBase {
        &mut self.base
    }

    fn initialize(&mut self, config: &GameConfig) -> Result<()> {
        let size = Self::read_positive(config, "box_size", DEFAULT_BOX_SIZE)?;
        let speed = Self::read_positive(config, "speed", DEFAULT_SPEED)?;

        let (width, height) = self.context().size();
        if size > width.min(height) as f32 {
            return Err(ArcadeError::Config(format!(
                "box_size {} does not fit a {}x{} screen",
                size, width, height
            )));
        }

        self.size = size;
        self.speed = speed;
        log::debug!("Bouncing box initialized: size {}, speed {}", size, speed);
        Ok(())
    }

    fn on_start(&mut self) {
        let (cx, cy) = self.context().center();
        let half = self.size / 2.0;
        self.position = Vec2::new(cx as f32 - half, cy as f32 - half);
        self.velocity = Vec2::ONE.normalize() * self.speed;
        self.paused = false;
        self.bounces = 0;
        self.input = InputState::with_default_actions();
    }

    fn handle_input(&mut self, events: &[InputEvent]) {
        self.input.apply(events);

        if self.input.is_action_just_pressed("cancel") {
            self.stop();
            return;
        }
        if self.input.is_action_just_pressed("confirm") {
            self.paused = !self.paused;
        }
    }

    fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        let steer = self.input.movement_vector();
        if steer != Vec2::ZERO {
            self.velocity = steer * self.speed;
        }
        self.position += self.velocity * dt;

        let (width, height) = self.context().size();
        let max_x = width as f32 - self.size;
        let max_y = height as f32 - self.size;
        if Self::bounce_axis(&mut self.position.x, &mut self.velocity.x, max_x) {
            self.bounces += 1;
        }
        if Self::bounce_axis(&mut self.position.y, &mut self.velocity.y, max_y) {
            self.bounces += 1;
        }
    }

    fn render(&mut self) {
        let surface = match self.surface() {
            Ok(surface) => surface,
            Err(err) => {
                log::warn!("Bouncing box cannot render: {}", err);
                return;
            }
        };

        let mut surface = surface.borrow_mut();
        surface.fill(self.bg_color());
        let color = if self.paused { PAUSED_COLOR } else { BOX_COLOR };
        let side = self.size as u32;
        surface.fill_rect(self.position.x as i32, self.position.y as i32, side, side, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::VirtualKeyCode;
    use crate::testing;

    fn started(width: u32, height: u32) -> BouncingBox {
        let ctx = testing::headless_context(width, height);
        let mut game = BouncingBox::new(Rc::clone(&ctx)).unwrap();
        game.initialize(&GameConfig::new()).unwrap();
        game.start(ctx.surface());
        game
    }

    #[test]
    fn follows_the_lifecycle_contract() {
        let ctx = testing::headless_context(200, 200);
        let surface = ctx.surface();
        let mut game = BouncingBox::new(ctx).unwrap();

        testing::contract_starts_stopped(&game);
        testing::contract_running_follows_start_stop(&mut game, &surface);
        testing::contract_surface_is_the_started_one(&mut game, &surface);
    }

    #[test]
    fn initialize_reads_size_and_speed() {
        let mut game = BouncingBox::new(testing::headless_context(200, 200)).unwrap();
        let mut config = GameConfig::new();
        config.insert("box_size", 20).insert("speed", 100.0);

        game.initialize(&config).unwrap();
        assert_eq!(game.size, 20.0);
        assert_eq!(game.speed, 100.0);
    }

    #[test]
    fn initialize_rejects_bad_values() {
        let mut game = BouncingBox::new(testing::headless_context(100, 100)).unwrap();

        let mut config = GameConfig::new();
        config.insert("speed", -5);
        assert!(matches!(game.initialize(&config), Err(ArcadeError::Config(_))));

        let mut config = GameConfig::new();
        config.insert("box_size", 500);
        assert!(matches!(game.initialize(&config), Err(ArcadeError::Config(_))));
    }

    #[test]
    fn start_centers_the_box() {
        let game = started(200, 100);
        let half = DEFAULT_BOX_SIZE / 2.0;
        assert_eq!(game.position(), Vec2::new(100.0 - half, 50.0 - half));
    }

    #[test]
    fn bounces_off_the_right_edge() {
        let mut game = started(200, 200);
        game.position = Vec2::new(150.0, 50.0);
        game.velocity = Vec2::new(100.0, 0.0);

        game.update(0.5);
        assert_eq!(game.position().x, 200.0 - DEFAULT_BOX_SIZE);
        assert!(game.velocity.x < 0.0);
        assert_eq!(game.bounces(), 1);
    }

    #[test]
    fn confirm_pauses_and_cancel_stops() {
        let mut game = started(200, 200);

        game.handle_input(&[InputEvent::KeyPressed(VirtualKeyCode::Space)]);
        assert!(game.is_paused());
        let before = game.position();
        game.update(1.0);
        assert_eq!(game.position(), before);

        game.handle_input(&[InputEvent::KeyPressed(VirtualKeyCode::Escape)]);
        assert!(!game.is_running());
    }

    #[test]
    fn render_draws_the_box_over_the_background() {
        let mut game = started(100, 100);
        game.render();

        let surface = game.surface().unwrap();
        let surface = surface.borrow();
        assert_eq!(surface.pixel(50, 50), Some(BOX_COLOR));
        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
    }
}
