//! User-facing notices, the terminal stand-in for toast messages.

use std::fmt;

use crate::errors::AppError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A single message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            Level::Success => "ok",
            Level::Info => "info",
            Level::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// Ordered collection of notices raised by one view.
#[derive(Debug, Default, Clone)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message.into());
    }

    /// Record a failure using its user-facing message.
    pub fn failure(&mut self, err: &AppError) {
        self.error(err.user_message());
    }

    fn push(&mut self, level: Level, message: String) {
        match level {
            Level::Error => tracing::warn!("notice: {}", message),
            _ => tracing::info!("notice: {}", message),
        }
        self.items.push(Notice { level, message });
    }

    #[cfg(test)]
    pub fn all(&self) -> &[Notice] {
        &self.items
    }

    #[cfg(test)]
    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter().filter(|n| n.level == Level::Error)
    }

    /// Hand over everything collected so far.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.items)
    }
}
