//! Session banner written once when a destination is opened

use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use jaclog_core::prelude::*;

use crate::destination::Destination;
use crate::elapsed::humanize;
use crate::theme::Theme;

/// Default idle time, in seconds, above which a separator is printed
pub const DEFAULT_SESSION_INTERVAL_SECS: u64 = 5;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Writes the launch banner for a new process run.
#[derive(Debug, Clone)]
pub struct SessionAnnouncer {
    theme: Theme,
    session_interval: Duration,
    compact: bool,
    command: String,
}

impl SessionAnnouncer {
    pub fn new(theme: Theme, session_interval: Duration, compact: bool) -> Self {
        Self {
            theme,
            session_interval,
            compact,
            command: command_line(),
        }
    }

    /// Replace the command line shown on the launch line
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Append the banner to `primary`, then the same bytes to `secondary`.
    ///
    /// The separator decision uses the modification time of `primary` only.
    /// Both destinations are opened before either is written, so a target
    /// that cannot be opened leaves the other untouched.
    pub fn announce(
        &self,
        primary: &dyn Destination,
        secondary: Option<&dyn Destination>,
    ) -> Result<()> {
        self.announce_at(SystemTime::now(), Local::now(), primary, secondary)
    }

    /// [`announce`](Self::announce) with an explicit clock.
    pub fn announce_at(
        &self,
        now: SystemTime,
        timestamp: DateTime<Local>,
        primary: &dyn Destination,
        secondary: Option<&dyn Destination>,
    ) -> Result<()> {
        let mtime = primary.modified()?;
        let idle = now.duration_since(mtime).unwrap_or_default();
        let block = self.block(idle, timestamp);

        let mut writers = vec![primary.open_append()?];
        if let Some(secondary) = secondary {
            writers.push(secondary.open_append()?);
        }

        for writer in &mut writers {
            writer.write_all(block.as_bytes())?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Full banner for a destination idle for `idle`
    pub fn block(&self, idle: Duration, timestamp: DateTime<Local>) -> String {
        let separator = self.separator(idle).unwrap_or_default();
        let launch = self.launch_line(timestamp);
        let launch = if self.compact {
            format!("\n{}\n\n", launch)
        } else {
            format!("\n\n{}\n\n", launch)
        };
        self.theme
            .paint(&format!("{}{}", separator, launch), self.theme.colors.session)
    }

    /// Separator line with its padding, if `idle` exceeds the session interval
    pub fn separator(&self, idle: Duration) -> Option<String> {
        if idle <= self.session_interval {
            return None;
        }

        let dots = "\u{b7}".repeat(self.theme.margin + self.theme.symbol_width);
        let line = self
            .theme
            .paint(&format!("{}[ {} ]", dots, humanize(idle)), self.theme.colors.time);

        let padding = vec![String::new(); self.theme.session_padding];
        let mut lines = padding.clone();
        lines.push(line);
        lines.extend(padding);
        Some(lines.join("\n"))
    }

    /// Launch symbol, timestamp and command on one line
    pub fn launch_line(&self, timestamp: DateTime<Local>) -> String {
        let colors = &self.theme.colors;
        let symbol = self
            .theme
            .paint(&self.theme.pad_symbol(self.theme.launch_symbol()), colors.launch);
        let time = self
            .theme
            .paint(&timestamp.format(TIMESTAMP_FORMAT).to_string(), colors.time);
        let command = self.theme.paint(&self.command, colors.launch);
        format!(" {}{} {}", symbol, time, command)
    }
}

/// Program name followed by its arguments, space-joined
pub fn command_line() -> String {
    let mut args = std::env::args();
    let program = args
        .next()
        .map(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or(arg0)
        })
        .unwrap_or_default();

    std::iter::once(program)
        .chain(args)
        .collect::<Vec<_>>()
        .join(" ")
}
