// console sink - styled writes for status lines, warnings, and replies

use crossterm::style::Stylize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Ok => "ok",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

pub struct Console {
    out: Box<dyn Write + Send>,
    styled: bool,
    dark: bool,
}

impl Console {
    pub fn stdout(styled: bool, dark: bool) -> Self {
        Self::new(Box::new(io::stdout()), styled, dark)
    }

    pub fn new(out: Box<dyn Write + Send>, styled: bool, dark: bool) -> Self {
        Self { out, styled, dark }
    }

    // status line with a level tag
    pub fn log(&mut self, level: Level, message: &str) {
        let line = if self.styled {
            let tag = level.tag();
            let tag = match level {
                Level::Ok => tag.green(),
                Level::Info => tag.blue(),
                Level::Warn => tag.yellow(),
                Level::Error => tag.red(),
            };
            format!("[{tag}] {message}")
        } else {
            format!("[{}] {message}", level.tag())
        };
        self.write_line(&line);
    }

    // gate warnings get their own loud style
    pub fn warning(&mut self, message: &str) {
        let line = if self.styled {
            message.bold().yellow().to_string()
        } else {
            message.to_string()
        };
        self.write_line(&line);
    }

    // assistant replies; the accent follows the terminal background
    pub fn reply(&mut self, who: &str, message: &str) {
        let line = if self.styled {
            let body = if self.dark {
                message.magenta()
            } else {
                message.dark_magenta()
            };
            format!("{}: {body}", who.bold())
        } else {
            format!("{who}: {message}")
        };
        self.write_line(&line);
    }

    // input prompt, no newline
    pub fn prompt(&mut self) {
        let text = if self.styled {
            "You: ".bold().to_string()
        } else {
            "You: ".to_string()
        };
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }

    // unadorned line
    pub fn line(&mut self, message: &str) {
        self.write_line(message);
    }

    fn write_line(&mut self, line: &str) {
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}
