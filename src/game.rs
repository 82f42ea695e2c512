use std::{thread::sleep, time::Duration};

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::config::Options;
use crate::term::{ScreenPos, TermManager};

use torus_snake::autopilot::auto_direction;
use torus_snake::body::Segment;
use torus_snake::geometry::Direction::{self, *};
use torus_snake::shape::{Sprite, SpriteFrame};
use torus_snake::sim::{GameOverReason, SimulationState, Status, StepOutcome};
use torus_snake::Coords;

const POLL_INTERVAL_MS: u64 = 5;

const FOOD_GLYPH: [char; 2] = ['(', ')'];
const DEAD_GLYPH: [char; 2] = ['X', ' '];
const EMPTY_GLYPH: [char; 2] = [' ', ' '];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    Turn(Direction),
    ToggleAutopilot,
    TogglePause,
}

/// What the player wants after a round.
pub enum Flow {
    Again,
    Quit,
}

pub struct SnakeGame {
    options: Options,
    term: TermManager,
    rng: StdRng,
    autopilot: bool,
    paused: bool,
}

impl SnakeGame {
    pub fn new(options: Options) -> Result<Self> {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let autopilot = options.autopilot;

        Ok(SnakeGame { options, term: TermManager::new()?, rng, autopilot, paused: false })
    }

    pub fn initialize(&mut self) -> Result<()> {
        let (need_w, need_h) = self.options.required_terminal_size();
        let (w, h) = self.term.size();
        if w < need_w || h < need_h {
            bail!(
                "terminal is {}x{}, a {} cell board needs at least {}x{}",
                w, h, self.options.grid_size, need_w, need_h
            );
        }

        self.term.setup()?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    pub fn show_intro(&mut self) -> Result<Flow> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause, P toggles autopilot",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
            "(A starts on autopilot)",
        ])?;

        let key = self.term.read_key_blocking()?;
        if is_ctrl_c(&key) {
            return Ok(Flow::Quit);
        }
        if matches!(key.code, KeyCode::Char('a')) {
            self.autopilot = true;
        }

        self.term.hide_message()?;
        Ok(Flow::Again)
    }

    pub fn play(&mut self) -> Result<Flow> {
        let grid = self.options.grid_size;
        self.term.clear()?;
        self.term.draw_borders(2 * grid as u16, grid as u16)?;

        let mut state = SimulationState::new(grid, &mut self.rng)?;
        info!("round started, autopilot {}", self.autopilot);
        self.draw_all(&state)?;

        let ticks_per_step = (self.options.tick_ms / POLL_INTERVAL_MS).max(1);
        let mut ticks_until_step = ticks_per_step;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key in self.term.read_key_events_queue()? {
                if is_ctrl_c(&key) {
                    return Ok(Flow::Quit);
                }
                match key_action(key.code) {
                    Some(KeyAction::Turn(dir)) => state.request_direction(dir),
                    Some(KeyAction::ToggleAutopilot) => self.toggle_autopilot(),
                    Some(KeyAction::TogglePause) => self.toggle_pause()?,
                    None => {}
                }
            }

            if self.paused {
                continue;
            }

            ticks_until_step -= 1;
            if ticks_until_step > 0 {
                continue;
            }
            ticks_until_step = ticks_per_step;

            if self.autopilot {
                state.request_direction(auto_direction(&state));
            }

            match state.step(&mut self.rng) {
                StepOutcome::Moved { old_tail, ate_food, .. } => {
                    if ate_food {
                        self.term.bell()?;
                    }
                    self.draw_step(&state, old_tail)?;
                }
                StepOutcome::Crashed { .. } | StepOutcome::BoardFull => {
                    self.draw_all(&state)?;
                    self.game_over(&state)?;
                    break;
                }
                StepOutcome::Halted => break,
            }
        }

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }
        Ok(Flow::Again)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, state: &SimulationState) -> Result<()> {
        let won = state.status() == Status::GameOver(GameOverReason::BoardFull);
        info!("round over, score {}, board filled: {}", state.score(), won);

        if !won {
            for pos in state.body().positions() {
                self.print_cell(pos, DEAD_GLYPH)?;
            }
        }

        let score = format!("Score: {}", state.score());
        self.term.show_message(&[
            if won { "You filled the board!" } else { "Game over!" },
            &score,
            "",
            "Press any key to play again,",
            "or CTRL+C to quit.",
        ])?;
        Ok(())
    }

    fn draw_all(&mut self, state: &SimulationState) -> Result<()> {
        for segment in state.body().segments() {
            self.print_cell(segment.pos, segment_glyph(segment))?;
        }
        if let Some(food) = state.food() {
            self.print_cell(food, FOOD_GLYPH)?;
        }

        self.draw_status(state)
    }

    /// Redraws only what a step can change: the vacated tail cell, the new head, the old
    /// head turned body, the new tail and the food.
    fn draw_step(&mut self, state: &SimulationState, old_tail: Option<Coords>) -> Result<()> {
        let body = state.body();

        if let Some(pos) = old_tail {
            self.print_cell(pos, EMPTY_GLYPH)?;
        }

        for segment in [body.get(1), Some(body.tail()), Some(body.head())].iter().flatten() {
            self.print_cell(segment.pos, segment_glyph(segment))?;
        }

        if let Some(food) = state.food() {
            self.print_cell(food, FOOD_GLYPH)?;
        }

        self.draw_status(state)
    }

    fn draw_status(&mut self, state: &SimulationState) -> Result<()> {
        let row = self.options.grid_size as u16 + 2;
        let mode = if self.autopilot { "autopilot" } else { "manual" };
        let line = format!("Score: {:<5} Length: {:<5} {:<9}", state.score(), state.body().len(), mode);

        self.term.print_str_at((0, row), &line)?;
        self.term.flush()?;
        Ok(())
    }

    fn print_cell(&mut self, pos: Coords, glyph: [char; 2]) -> Result<()> {
        let origin = cell_origin(pos);
        self.term.print_at(origin, glyph[0])?;
        self.term.print_at((origin.0 + 1, origin.1), glyph[1])?;
        Ok(())
    }

    fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
        info!("autopilot {}", if self.autopilot { "on" } else { "off" });
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        info!("paused: {}", self.paused);
        Ok(())
    }
}

/// Cells are two columns wide so the board comes out roughly square.
fn cell_origin(pos: Coords) -> ScreenPos {
    (1 + 2 * pos.0 as u16, 1 + pos.1 as u16)
}

/// Terminal rendering of one segment. The second column continues the body to the right.
fn segment_glyph(segment: &Segment) -> [char; 2] {
    let sprite = Sprite::from(segment.shape);
    let sides = sprite.connections();

    let lead = match sprite.frame {
        SpriteFrame::Head => head_char(Direction::from_orientation(segment.shape.rotation())),
        _ => box_char(&sides),
    };
    let trail = if sides.contains(&Right) { '─' } else { ' ' };

    [lead, trail]
}

fn head_char(heading: Direction) -> char {
    match heading {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}

fn box_char(sides: &[Direction]) -> char {
    let has = |d: Direction| sides.contains(&d);

    match (has(Right), has(Down), has(Left), has(Up)) {
        (true, false, true, false) => '─',
        (false, true, false, true) => '│',
        (true, true, false, false) => '┌',
        (false, true, true, false) => '┐',
        (false, false, true, true) => '┘',
        (true, false, false, true) => '└',
        (true, false, false, false) => '╶',
        (false, true, false, false) => '╷',
        (false, false, true, false) => '╴',
        (false, false, false, true) => '╵',
        _ => '█',
    }
}

fn key_action(code: KeyCode) -> Option<KeyAction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(KeyAction::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(KeyAction::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(KeyAction::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(KeyAction::Turn(Right)),
        KeyCode::Char('p') => Some(KeyAction::ToggleAutopilot),
        KeyCode::Esc => Some(KeyAction::TogglePause),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use torus_snake::body::Body;

    fn glyphs(positions: &[Coords], heading: Direction) -> Vec<[char; 2]> {
        let body = Body::from_positions(positions, heading, 30).unwrap();
        body.segments().iter().map(segment_glyph).collect()
    }

    #[test]
    fn test_straight_body_glyphs() {
        let g = glyphs(&[(5, 5), (4, 5), (3, 5)], Right);
        assert_eq!(g, vec![['>', ' '], ['─', '─'], ['╶', '─']]);
    }

    #[test]
    fn test_corner_glyphs() {
        // came in from the left, turned down
        let g = glyphs(&[(5, 6), (5, 5), (4, 5)], Down);
        assert_eq!(g[1], ['┐', ' ']);
        // came in from the left, turned up
        let g = glyphs(&[(5, 4), (5, 5), (4, 5)], Up);
        assert_eq!(g[1], ['┘', ' ']);
        // came up from below, turned right
        let g = glyphs(&[(6, 5), (5, 5), (5, 6)], Right);
        assert_eq!(g[1], ['┌', '─']);
        assert_eq!(g[2], ['╵', ' ']);
    }

    #[test]
    fn test_left_moving_head_connects_right() {
        let g = glyphs(&[(5, 5), (6, 5), (7, 5)], Left);
        assert_eq!(g[0], ['<', '─']);
        assert_eq!(g[2], ['╴', ' ']);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_action(KeyCode::Char('a')), Some(KeyAction::Turn(Left)));
        assert_eq!(key_action(KeyCode::Left), Some(KeyAction::Turn(Left)));
        assert_eq!(key_action(KeyCode::Char('w')), Some(KeyAction::Turn(Up)));
        assert_eq!(key_action(KeyCode::Char('p')), Some(KeyAction::ToggleAutopilot));
        assert_eq!(key_action(KeyCode::Esc), Some(KeyAction::TogglePause));
        assert_eq!(key_action(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_cell_origin() {
        assert_eq!(cell_origin((0, 0)), (1, 1));
        assert_eq!(cell_origin((29, 29)), (59, 30));
    }
}
