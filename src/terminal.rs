//! Terminal side effects: screen refresh between questions and optional
//! text styling. Both are injected into the session loop, so tests and
//! embedders can substitute no-op or recording fakes.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

/// Capability invoked once after each question is scored.
pub trait DisplayRefresh {
    fn refresh(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Built-in refresh strategies, selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshMode {
    /// Home the cursor and clear the visible screen, like `^L`.
    CtrlL,
    /// Clear the screen and the scrollback buffer.
    #[default]
    Full,
    /// Leave the previous question on screen.
    None,
    /// Push the previous question away with blank lines.
    Spacer(u16),
}

impl DisplayRefresh for RefreshMode {
    fn refresh(&self, mut out: &mut dyn Write) -> io::Result<()> {
        match self {
            RefreshMode::CtrlL => {
                queue!(&mut out, MoveTo(0, 0), Clear(ClearType::All))?;
                out.flush()
            }
            RefreshMode::Full => {
                queue!(
                    &mut out,
                    Clear(ClearType::All),
                    Clear(ClearType::Purge),
                    MoveTo(0, 0)
                )?;
                out.flush()
            }
            RefreshMode::None => Ok(()),
            RefreshMode::Spacer(lines) => {
                for _ in 0..*lines {
                    writeln!(out)?;
                }
                Ok(())
            }
        }
    }
}

/// Styled-text capability. With color disabled every helper passes the
/// text through untouched, which keeps rendered output assertable in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme {
    color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn good(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bad(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn hint(&self, text: &str) -> String {
        if self.color {
            text.dark_grey().to_string()
        } else {
            text.to_string()
        }
    }

    /// Score line coloring, stepped by percentage.
    pub fn grade(&self, text: &str, percentage: f64) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = match percentage as u32 {
            90..=100 => text.green(),
            70..=89 => text.cyan(),
            50..=69 => text.yellow(),
            _ => text.red(),
        };
        styled.bold().to_string()
    }
}
