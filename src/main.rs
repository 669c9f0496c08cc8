// src/main.rs
use std::path::PathBuf;

use env_logger::Env;
use log::info;

use arcade_machine_sdk::demo::BouncingBox;
use arcade_machine_sdk::engine;
use arcade_machine_sdk::{GameConfig, GameModule};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting arcade demo...");

    // Optional game config path as the first argument.
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => GameConfig::load(&path)?,
        None => GameConfig::new(),
    };

    let mut game = BouncingBox::new(engine::base_context())?;
    game.initialize(&config)?;

    game.run_independently()?;

    info!("Arcade demo finished");
    Ok(())
}
