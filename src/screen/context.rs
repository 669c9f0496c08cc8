// src/screen/context.rs
use std::rc::Rc;

use super::clock::FrameClock;
use super::surface::SharedSurface;

/// Read-only view of the host's screen handed to every game module.
///
/// The host creates one context when the display comes up and shares it
/// through an `Rc`; games never get a way to resize, close or replace the
/// window.
#[derive(Debug)]
pub struct ScreenContext {
    width: u32,
    height: u32,
    surface: SharedSurface,
    clock: Rc<FrameClock>,
    fps: u32,
}

impl ScreenContext {
    pub fn new(width: u32, height: u32, surface: SharedSurface, clock: Rc<FrameClock>, fps: u32) -> Self {
        Self {
            width,
            height,
            surface,
            clock,
            fps,
        }
    }

    /// Center of the screen, rounded down on odd dimensions.
    pub fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Configured frame-rate cap.
    pub fn limit_fps(&self) -> u32 {
        self.fps
    }

    /// Frame rate currently measured by the host; changes from frame to frame.
    pub fn actual_fps(&self) -> f32 {
        self.clock.fps()
    }

    pub fn surface(&self) -> SharedSurface {
        Rc::clone(&self.surface)
    }

    pub(crate) fn clock(&self) -> Rc<FrameClock> {
        Rc::clone(&self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::surface::Surface;
    use std::time::{Duration, Instant};

    fn context(width: u32, height: u32) -> ScreenContext {
        ScreenContext::new(width, height, Surface::shared(width, height), FrameClock::shared(), 60)
    }

    #[test]
    fn center_of_even_screen() {
        assert_eq!(context(800, 600).center(), (400, 300));
    }

    #[test]
    fn center_rounds_down_on_odd_dimensions() {
        assert_eq!(context(801, 601).center(), (400, 300));
    }

    #[test]
    fn accessors_report_construction_values() {
        let ctx = context(320, 240);
        assert_eq!(ctx.size(), (320, 240));
        assert_eq!(ctx.width(), 320);
        assert_eq!(ctx.height(), 240);
        assert_eq!(ctx.limit_fps(), 60);
    }

    #[test]
    fn surface_handles_point_at_the_same_surface() {
        let ctx = context(2, 2);
        assert!(Rc::ptr_eq(&ctx.surface(), &ctx.surface()));
    }

    #[test]
    fn actual_fps_follows_the_host_clock() {
        let clock = FrameClock::shared();
        let ctx = ScreenContext::new(10, 10, Surface::shared(10, 10), Rc::clone(&clock), 30);
        assert_eq!(ctx.actual_fps(), 0.0);

        let start = Instant::now();
        clock.tick_at(start);
        clock.tick_at(start + Duration::from_millis(40));
        assert!((ctx.actual_fps() - 25.0).abs() < 0.01);
    }
}
