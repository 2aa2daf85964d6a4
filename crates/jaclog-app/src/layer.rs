//! `tracing` layer that renders events through a [`LineRenderer`].
//!
//! Each layer owns one renderer and one writer behind a single mutex, so
//! the header grouping of one stream never leaks into another.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use jaclog_core::prelude::*;
use jaclog_core::{strip_ansi_codes, Level, Message, Record, Site};
use jaclog_render::LineRenderer;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Field that promotes an ERROR event to [`Level::Critical`]
pub const CRITICAL_FIELD: &str = "critical";

/// A renderer bound to its output
#[derive(Debug)]
pub struct LineWriter<W> {
    renderer: LineRenderer,
    writer: W,
}

impl LineWriter<File> {
    /// Open `path` for appending, creating it if absent
    pub fn append_to(path: &Path, renderer: LineRenderer) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(renderer, file))
    }
}

impl<W: Write> LineWriter<W> {
    pub fn new(renderer: LineRenderer, writer: W) -> Self {
        Self { renderer, writer }
    }

    /// Render `record` and write it as one newline-terminated block
    pub fn write(&mut self, record: &Record) -> Result<()> {
        let text = self.renderer.render(record);
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn renderer(&self) -> &LineRenderer {
        &self.renderer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Layer feeding every event into its own [`LineWriter`]
#[derive(Debug)]
pub struct RenderLayer<W> {
    writer: Mutex<LineWriter<W>>,
    start: Instant,
}

impl RenderLayer<File> {
    pub fn append_to(path: &Path, renderer: LineRenderer) -> Result<Self> {
        Ok(Self::new(LineWriter::append_to(path, renderer)?))
    }
}

impl<W: Write> RenderLayer<W> {
    pub fn new(writer: LineWriter<W>) -> Self {
        Self {
            writer: Mutex::new(writer),
            start: Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl<S, W> Layer<S> for RenderLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let record = record_from_event(event, &ctx, self.elapsed_ms());

        let Ok(mut writer) = self.writer.lock() else {
            eprintln!("jaclog: renderer lock poisoned, dropping record");
            return;
        };
        // Nobody to return the error to; the logger itself is what failed.
        if let Err(err) = writer.write(&record) {
            eprintln!("jaclog: failed to write log record: {}", err);
        }
    }
}

fn record_from_event<S>(event: &Event<'_>, ctx: &Context<'_, S>, elapsed_ms: u64) -> Record
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let metadata = event.metadata();

    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);

    let mut level = Level::from(metadata.level());
    let promoted = visitor.critical && level == Level::Error;
    if promoted {
        level = Level::Critical;
    }

    let file = metadata
        .file()
        .and_then(|f| Path::new(f).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "?".to_string());

    let function = ctx
        .event_scope(event)
        .and_then(|mut scope| scope.next())
        .map(|span| span.name().to_string())
        .or_else(|| {
            metadata
                .module_path()
                .and_then(|path| path.rsplit("::").next())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "?".to_string());

    let site = Site::new(level, metadata.target(), file, function);
    let message = Message::parse(&strip_ansi_codes(&visitor.text(promoted)));
    Record::new(site, message, elapsed_ms)
}

/// Collects the `message` field and renders the rest as `key=value`
#[derive(Debug, Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
    critical: bool,
    /// Position of the critical field in `fields`
    critical_at: Option<usize>,
}

impl MessageVisitor {
    /// Message followed by the fields; the critical field is left out when
    /// it promoted the event.
    fn text(&self, promoted: bool) -> String {
        let fields = self
            .fields
            .iter()
            .enumerate()
            .filter(|(i, _)| !(promoted && self.critical_at == Some(*i)))
            .map(|(_, field)| field.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if fields.is_empty() {
            self.message.clone()
        } else if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == CRITICAL_FIELD {
            self.critical = value;
            self.critical_at = Some(self.fields.len());
        }
        self.fields.push(format!("{}={}", field.name(), value));
    }
}
