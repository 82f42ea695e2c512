use std::path::PathBuf;

use clap::Parser;
use torus_snake::{GridInt, DEFAULT_GRID_SIZE};

pub const DEFAULT_TICK_MS: u64 = 80;

#[derive(Debug, Clone, Parser)]
#[command(name = "torus-snake", version, about = "Snake on a wrap-around board, in the terminal")]
pub struct Options {
    /// Cells per side of the square board
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, value_parser = clap::value_parser!(i16).range(4..=60))]
    pub grid_size: GridInt,

    /// Delay between two simulation steps, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(10..=2000))]
    pub tick_ms: u64,

    /// Let the autopilot steer from the first tick
    #[arg(long)]
    pub autopilot: bool,

    /// Seed for food placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes, the terminal is taken by the board
    #[arg(long, default_value = "torus-snake.log")]
    pub log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Options {
    /// Terminal columns and rows needed: two columns per cell, the border and a status line.
    pub fn required_terminal_size(&self) -> (u16, u16) {
        let side = self.grid_size as u16;
        (2 * side + 2, side + 3)
    }
}
