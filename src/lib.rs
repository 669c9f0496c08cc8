// ============================================================================
// FILE: src/lib.rs - Library Root
// ============================================================================
pub mod constants;
pub mod demo;
pub mod engine;
pub mod errors;
pub mod game;
pub mod input;
pub mod renderer;
pub mod screen;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod util;

pub use constants::{BASE_HEIGHT, BASE_RESOLUTION, BASE_WIDTH, DEFAULT_FPS};
pub use engine::{drive_frame, run_independently, Standalone};
pub use errors::{ArcadeError, Result};
pub use game::{GameBase, GameConfig, GameMeta, GameModule, MetaError, MetaField};
pub use input::{InputEvent, InputState};
pub use screen::{Color, DisplayConfig, Screen, ScreenContext, SharedSurface, Surface};
