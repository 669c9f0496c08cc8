// src/errors.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::game::meta::MetaError;

#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error("Invalid game metadata: {0}")]
    Validation(#[from] MetaError),

    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("No surface available: the game has not been started yet")]
    SurfaceUnavailable,

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Window Error: {0}")]
    Window(String),

    #[error("Render Error: {0}")]
    Render(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl ArcadeError {
    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Self {
        ArcadeError::NotFound { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
