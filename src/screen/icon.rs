// src/screen/icon.rs
use std::path::Path;

use winit::window::Icon;

use crate::errors::{ArcadeError, Result};

const PLACEHOLDER_SIZE: u32 = 32;
const PLACEHOLDER_COLOR: [u8; 4] = [100, 200, 50, 255];

/// Decoded window icon pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl IconImage {
    pub fn into_window_icon(self) -> Result<Icon> {
        Icon::from_rgba(self.rgba, self.width, self.height)
            .map_err(|e| ArcadeError::Window(format!("Invalid window icon: {}", e)))
    }
}

pub fn load_icon(path: impl AsRef<Path>) -> Result<IconImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ArcadeError::not_found(path));
    }

    let image = image::open(path)?.into_rgba8();
    let (width, height) = image.dimensions();
    Ok(IconImage {
        rgba: image.into_raw(),
        width,
        height,
    })
}

/// Solid green square used when the configured icon cannot be loaded.
pub fn placeholder_icon() -> IconImage {
    let pixels = (PLACEHOLDER_SIZE * PLACEHOLDER_SIZE) as usize;
    IconImage {
        rgba: PLACEHOLDER_COLOR.repeat(pixels),
        width: PLACEHOLDER_SIZE,
        height: PLACEHOLDER_SIZE,
    }
}

/// Loads the icon at `path`, falling back to [`placeholder_icon`] when the
/// file is missing or is not a decodable image. Other errors propagate.
pub fn window_icon(path: Option<&Path>) -> Result<IconImage> {
    let Some(path) = path else {
        return Ok(placeholder_icon());
    };

    match load_icon(path) {
        Ok(icon) => Ok(icon),
        Err(err @ (ArcadeError::NotFound { .. } | ArcadeError::Image(_))) => {
            log::warn!("Using placeholder window icon: {}", err);
            Ok(placeholder_icon())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_solid_32x32() {
        let icon = placeholder_icon();
        assert_eq!((icon.width, icon.height), (32, 32));
        assert_eq!(icon.rgba.len(), 32 * 32 * 4);
        assert!(icon.rgba.chunks(4).all(|px| px == PLACEHOLDER_COLOR));
    }

    #[test]
    fn missing_icon_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        assert!(matches!(load_icon(&path), Err(ArcadeError::NotFound { .. })));
    }

    #[test]
    fn missing_icon_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        assert_eq!(window_icon(Some(&path)).unwrap(), placeholder_icon());
        assert_eq!(window_icon(None).unwrap(), placeholder_icon());
    }

    #[test]
    fn undecodable_icon_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert_eq!(window_icon(Some(&path)).unwrap(), placeholder_icon());
    }

    #[test]
    fn loads_a_real_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let icon = window_icon(Some(&path)).unwrap();
        assert_eq!((icon.width, icon.height), (4, 2));
        assert_eq!(&icon.rgba[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn placeholder_converts_to_window_icon() {
        assert!(placeholder_icon().into_window_icon().is_ok());
    }
}
