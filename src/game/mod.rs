// src/game/mod.rs
pub mod base;
pub mod config;
pub mod meta;

pub use base::{GameBase, GameModule};
pub use config::GameConfig;
pub use meta::{GameMeta, MetaError, MetaField};
