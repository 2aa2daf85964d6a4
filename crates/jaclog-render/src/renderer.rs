//! Stateful line renderer.
//!
//! [`LineRenderer`] remembers the header and timestamp of the record it
//! rendered last. That memory decides whether the next record repeats the
//! header, continues under it, or gets an elapsed-time marker first.
//!
//! One renderer serves one output stream. Streams never share state, so a
//! log file and a tty can each keep their own grouping.

use std::time::Duration;

use jaclog_core::{indent, Message, Record, Site};

use crate::elapsed::humanize;
use crate::theme::Theme;

/// Default gap, in milliseconds, above which a time marker is inserted
pub const DEFAULT_EVENT_INTERVAL_MS: u64 = 2_000;

/// Glyph that stands in for a repeated header in compact mode
const CONTINUATION: &str = "\u{b7} "; // ·

/// Layout mode, fixed for the lifetime of a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Blank line between records
    Regular,
    /// No separating blank lines, repeated headers collapse to a glyph
    Compact,
}

impl RenderMode {
    pub fn from_compact(compact: bool) -> Self {
        if compact {
            RenderMode::Compact
        } else {
            RenderMode::Regular
        }
    }
}

/// What the renderer remembers about the previous record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub last_header: String,
    pub last_elapsed_ms: u64,
}

/// Turns records into display text, one record at a time.
///
/// Not synchronized: callers sharing a renderer between threads must wrap it
/// in a lock.
#[derive(Debug, Clone)]
pub struct LineRenderer {
    theme: Theme,
    mode: RenderMode,
    event_interval_ms: u64,
    state: RenderState,
}

impl LineRenderer {
    pub fn new(theme: Theme, mode: RenderMode) -> Self {
        Self::with_interval(theme, mode, DEFAULT_EVENT_INTERVAL_MS)
    }

    pub fn with_interval(theme: Theme, mode: RenderMode, event_interval_ms: u64) -> Self {
        Self {
            theme,
            mode,
            event_interval_ms,
            state: RenderState::default(),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Render one record and remember it as the previous one.
    ///
    /// The returned block has no trailing newline; writers terminate it.
    pub fn render(&mut self, record: &Record) -> String {
        let header = self.header(&record.site);
        let same_site = header == self.state.last_header;
        let gap = self.gap_marker(record.elapsed_ms);

        let lines = match self.mode {
            RenderMode::Regular => self.layout_regular(&header, &record.message, same_site, gap),
            RenderMode::Compact => self.layout_compact(&header, &record.message, same_site, gap),
        };

        self.state = RenderState {
            last_header: header,
            last_elapsed_ms: record.elapsed_ms,
        };

        indent(&lines, &" ".repeat(self.theme.margin))
    }

    /// Styled `symbol subsystem` followed by styled `[file] function`
    pub fn header(&self, site: &Site) -> String {
        let symbol = self.theme.pad_symbol(self.theme.symbol(site.level));
        let head = self.theme.paint(
            &format!("{}{}", symbol, site.display_subsystem()),
            self.theme.colors.level(site.level),
        );
        let location = self.theme.paint(
            &format!("[{}] {}", site.file, site.function),
            self.theme.colors.file,
        );
        format!("{} {}", head, location)
    }

    /// Marker line for a record at `elapsed_ms`, if the pause since the
    /// previous record exceeds the event interval.
    pub fn gap_marker(&self, elapsed_ms: u64) -> Option<String> {
        let gap = elapsed_ms.saturating_sub(self.state.last_elapsed_ms);
        if gap <= self.event_interval_ms {
            return None;
        }
        let line = format!(
            "  \u{2500}\u{2500}\u{2500} {} elapsed",
            humanize(Duration::from_millis(gap))
        );
        Some(self.theme.paint(&line, self.theme.colors.time))
    }

    fn body(&self, text: &str) -> String {
        indent(text, &" ".repeat(self.theme.symbol_width))
    }

    fn layout_regular(
        &self,
        header: &str,
        message: &Message,
        same_site: bool,
        gap: Option<String>,
    ) -> String {
        let block = match message {
            Message::Inline(text) => format!("{} {}", header, text),
            Message::Normal(text) if same_site => self.body(text),
            Message::Normal(text) => format!("{}\n{}", header, self.body(text)),
        };

        match gap {
            Some(gap) => format!("\n{}\n\n{}", gap, block),
            None => format!("\n{}", block),
        }
    }

    fn layout_compact(
        &self,
        header: &str,
        message: &Message,
        same_site: bool,
        gap: Option<String>,
    ) -> String {
        let text = match message {
            Message::Inline(text) => return format!("{} {}", header, text),
            Message::Normal(text) => text,
        };

        let body = self.body(text);
        let block = if same_site {
            let glyph = self.theme.paint(CONTINUATION, self.theme.colors.time);
            format!("{}{}", glyph, body.strip_prefix("  ").unwrap_or(&body))
        } else {
            format!("{}\n{}", header, body)
        };

        match gap {
            Some(gap) => format!("{}\n{}", gap, block),
            None => block,
        }
    }
}
