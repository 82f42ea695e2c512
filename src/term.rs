use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal, Result};

pub type ScreenPos = (u16, u16);

/// Full-screen terminal with a shadow copy of what has been drawn, so message boxes can be
/// laid over the board and removed again.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<char>,
    overlay: Option<Overlay>,
    active: bool,
}

struct Overlay {
    top_left: ScreenPos,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, overlay: None, active: false })
    }

    pub fn size(&self) -> ScreenPos {
        (self.width, self.height)
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()?;
        self.active = true;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        self.active = false;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Drains every key press that arrived since the last call.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Frame of `inner_width` x `inner_height` cells starting at the top left corner.
    pub fn draw_borders(&mut self, inner_width: u16, inner_height: u16) -> Result<()> {
        let end_x = inner_width + 1;
        let end_y = inner_height + 1;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        self.hide_message()?;

        let height = lines.len() as u16 + 2;
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2;
        let top_left = (
            (self.width / 2).saturating_sub(width / 2),
            (self.height / 2).saturating_sub(height / 2),
        );

        for y in [top_left.1, top_left.1 + height - 1].iter() {
            for dx in 0..width {
                self.print_transient((top_left.0 + dx, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (dx, ch) in padded.chars().enumerate() {
                self.print_transient((top_left.0 + dx as u16, y), ch)?;
            }
        }

        self.overlay = Some(Overlay { top_left, width, height });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let overlay = match self.overlay.take() {
            Some(overlay) => overlay,
            None => return Ok(()),
        };

        for dy in 0..overlay.height {
            for dx in 0..overlay.width {
                let pos = (overlay.top_left.0 + dx, overlay.top_left.1 + dy);
                let ch = self.cell(pos).unwrap_or(' ');
                self.print_transient(pos, ch)?;
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: ScreenPos, ch: char) -> Result<()> {
        let index = self.index(pos);
        if let Some(slot) = index.and_then(|i| self.screen.get_mut(i)) {
            *slot = ch;
        }
        self.print_transient(pos, ch)
    }

    pub fn print_str_at(&mut self, pos: ScreenPos, text: &str) -> Result<()> {
        for (dx, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + dx as u16, pos.1), ch)?;
        }
        Ok(())
    }

    /// Terminal bell, the only sound a terminal has.
    pub fn bell(&mut self) -> Result<()> {
        queue!(self.stdout, style::Print('\u{7}'))
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.overlay = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    // Draws without touching the shadow screen, so overlays can be undone.
    fn print_transient(&mut self, pos: ScreenPos, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn index(&self, pos: ScreenPos) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn cell(&self, pos: ScreenPos) -> Option<char> {
        self.index(pos).and_then(|i| self.screen.get(i)).copied()
    }
}
