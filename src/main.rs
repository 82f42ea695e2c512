mod config;
mod game;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::config::Options;
use crate::game::{Flow, SnakeGame};

fn main() -> Result<()> {
    let options = Options::parse();
    init_logging(&options)?;
    info!("starting with {:?}", options);

    let mut game = SnakeGame::new(options)?;
    let result = run(&mut game);
    if let Err(err) = &result {
        error!("exiting on error: {:#}", err);
    }

    // The terminal goes back to normal even when the game failed
    let restored = game.shutdown();
    settle(result, restored)
}

/// The game's own error wins over a failure to restore the terminal.
fn settle(result: Result<()>, restored: Result<()>) -> Result<()> {
    match result {
        Err(err) => {
            if let Err(restore_err) = restored {
                error!("restoring the terminal failed too: {:#}", restore_err);
            }
            Err(err)
        }
        Ok(()) => restored,
    }
}

fn run(game: &mut SnakeGame) -> Result<()> {
    game.initialize()?;

    if let Flow::Quit = game.show_intro()? {
        return Ok(());
    }

    while let Flow::Again = game.play()? {}

    info!("player quit");
    Ok(())
}

fn init_logging(options: &Options) -> Result<()> {
    let level = if options.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let file = File::create(&options.log_file)
        .with_context(|| format!("creating log file {}", options.log_file.display()))?;

    WriteLogger::init(level, Config::default(), file).context("installing the logger")?;
    Ok(())
}
