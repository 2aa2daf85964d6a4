//! Core domain type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Marker that tags a raw message as a one-line message.
pub const INLINE_MARKER: &str = "o:";

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" | "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            _ => Err(Error::unknown_level(s)),
        }
    }
}

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// The call site a record was emitted from.
///
/// Two records belong together when their sites render to the same header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Site {
    pub level: Level,
    pub subsystem: String,
    pub file: String,
    pub function: String,
}

impl Site {
    pub fn new(
        level: Level,
        subsystem: impl Into<String>,
        file: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            level,
            subsystem: subsystem.into(),
            file: file.into(),
            function: function.into(),
        }
    }

    /// Subsystem name as displayed, with `__main__` shortened to `main`
    pub fn display_subsystem(&self) -> &str {
        if self.subsystem == "__main__" {
            "main"
        } else {
            &self.subsystem
        }
    }
}

/// Message text, tagged with how it should be laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Multi-line text, indented under the header
    Normal(String),
    /// Single physical line, printed next to the header
    Inline(String),
}

impl Message {
    /// Tag raw message text.
    ///
    /// Text starting with [`INLINE_MARKER`] becomes [`Message::Inline`] with the
    /// marker removed and line breaks folded into spaces.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.strip_prefix(INLINE_MARKER) {
            Some(rest) => Message::Inline(rest.lines().collect::<Vec<_>>().join(" ")),
            None => Message::Normal(trimmed.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Message::Normal(text) | Message::Inline(text) => text,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Message::Inline(_))
    }
}

/// One log event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub site: Site,
    pub message: Message,
    /// Milliseconds since process start
    pub elapsed_ms: u64,
}

impl Record {
    pub fn new(site: Site, message: Message, elapsed_ms: u64) -> Self {
        Self {
            site,
            message,
            elapsed_ms,
        }
    }

    pub fn level(&self) -> Level {
        self.site.level
    }
}

/// Wire shape of a record, one JSON object per line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordLine {
    pub level: String,
    #[serde(default = "default_subsystem")]
    pub subsystem: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub elapsed_ms: u64,
}

fn default_subsystem() -> String {
    "main".to_string()
}

impl RecordLine {
    /// Parse one JSON line
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// Convert into a [`Record`], tagging the message on the way.
    ///
    /// An unrecognized level name is a configuration error.
    pub fn into_record(self) -> Result<Record> {
        let level: Level = self.level.parse()?;
        Ok(Record {
            site: Site::new(level, self.subsystem, self.file, self.function),
            message: Message::parse(&self.message),
            elapsed_ms: self.elapsed_ms,
        })
    }
}
