// src/screen/mod.rs
//! The host's display: one window, one drawing surface, one frame clock.
pub mod clock;
pub mod context;
pub mod icon;
pub mod surface;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder};

use crate::constants::{BASE_HEIGHT, BASE_WIDTH, DEFAULT_FPS};
use crate::errors::{ArcadeError, Result};
use crate::renderer::Renderer;
use crate::util::json;

pub use clock::FrameClock;
pub use context::ScreenContext;
pub use surface::{Color, SharedSurface, Surface};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    pub icon_path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Arcade Machine".to_string(),
            icon_path: None,
            width: BASE_WIDTH,
            height: BASE_HEIGHT,
            fps: DEFAULT_FPS,
        }
    }
}

impl DisplayConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        json::load_as(path)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

pub struct Screen {
    // Dropped before `window`: the GPU surface borrows the native window.
    renderer: Renderer,
    window: Window,
    surface: SharedSurface,
    clock: Rc<FrameClock>,
    context: Rc<ScreenContext>,
    fps: u32,
}

impl Screen {
    /// Opens the host display described by `config`.
    pub fn new(config: &DisplayConfig, event_loop: &EventLoopWindowTarget<()>) -> Result<Self> {
        let context = Rc::new(ScreenContext::new(
            config.width,
            config.height,
            Surface::shared(config.width, config.height),
            FrameClock::shared(),
            config.fps,
        ));
        Self::for_context(&config.title, config.icon_path.as_deref(), context, event_loop)
    }

    /// Opens a window for an existing context, reusing its surface, clock,
    /// size and frame-rate cap.
    pub fn for_context(
        title: &str,
        icon_path: Option<&Path>,
        context: Rc<ScreenContext>,
        event_loop: &EventLoopWindowTarget<()>,
    ) -> Result<Self> {
        let (width, height) = context.size();
        let fps = context.limit_fps();
        log::info!("Opening {}x{} window \"{}\" at {} fps", width, height, title, fps);

        let icon = icon::window_icon(icon_path)?.into_window_icon()?;
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height))
            .with_resizable(true)
            .with_window_icon(Some(icon))
            .build(event_loop)
            .map_err(|e| ArcadeError::Window(format!("Window creation failed: {}", e)))?;

        let renderer = pollster::block_on(Renderer::new(&window, width, height))?;

        Ok(Self {
            renderer,
            window,
            surface: context.surface(),
            clock: context.clock(),
            context,
            fps,
        })
    }

    /// Fills the whole surface with `color`.
    pub fn clear(&self, color: Color) {
        self.surface.borrow_mut().fill(color);
    }

    /// Shows the current surface contents. Call once per frame.
    pub fn present(&mut self) -> Result<()> {
        let surface = self.surface.borrow();
        self.renderer.present(&surface)
    }

    /// Ends the frame: caps the rate and returns the real frame time in seconds.
    pub fn tick(&self) -> f32 {
        self.clock.tick(self.fps)
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.renderer.resize(size);
    }

    pub fn context(&self) -> Rc<ScreenContext> {
        Rc::clone(&self.context)
    }

    pub fn surface(&self) -> SharedSurface {
        Rc::clone(&self.surface)
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}
