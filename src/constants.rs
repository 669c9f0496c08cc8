//! Fixed display settings shared by the host, the screen and standalone mode.

pub const BASE_WIDTH: u32 = 800;
pub const BASE_HEIGHT: u32 = 600;
pub const BASE_RESOLUTION: (u32, u32) = (BASE_WIDTH, BASE_HEIGHT);

/// Frame-rate cap used when nothing else is configured.
pub const DEFAULT_FPS: u32 = 60;
