//! Command-line interface

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use jaclog_app::{config_dir, load_settings, LineWriter, Settings};
use jaclog_core::prelude::*;
use jaclog_core::RecordLine;
use jaclog_render::{Destination, FileDestination, LineRenderer, RenderMode, SessionAnnouncer, Theme};
use tracing::info_span;

/// jaclog - grouped, colored, human-readable logs
#[derive(Parser, Debug)]
#[command(name = "jaclog")]
#[command(about = "Grouped, colored, human-readable log output", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render JSON-lines records read from stdin
    Render {
        /// Layout mode (defaults to the settings file)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Gap marker threshold in milliseconds
        #[arg(long, value_name = "MS")]
        interval: Option<u64>,

        /// Directory containing jaclog.toml
        #[arg(long, value_name = "DIR")]
        config: Option<PathBuf>,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Append a session banner to a log file
    Announce {
        /// Log file
        #[arg(value_name = "FILE")]
        file: String,

        /// Second destination receiving the same banner
        #[arg(long, value_name = "PATH")]
        tty: Option<String>,

        /// Idle seconds after which a separator is printed (defaults to the
        /// settings file)
        #[arg(long, value_name = "SECS")]
        session_interval: Option<u64>,

        /// Compact spacing
        #[arg(long)]
        compact: bool,

        /// Directory containing jaclog.toml
        #[arg(long, value_name = "DIR")]
        config: Option<PathBuf>,
    },

    /// Configure logging for an app and emit sample events
    Demo {
        /// Application name (selects the log directory)
        #[arg(long, default_value = "jaclog-demo")]
        app: String,

        /// Directory containing jaclog.toml
        #[arg(long, value_name = "DIR")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Regular,
    Compact,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Regular => RenderMode::Regular,
            ModeArg::Compact => RenderMode::Compact,
        }
    }
}

/// Settings from `dir`, or defaults when no directory is given
pub fn settings_from(dir: Option<&Path>) -> Result<Settings> {
    match dir {
        Some(dir) => load_settings(dir),
        None => Ok(Settings::default()),
    }
}

/// Build the renderer for `render`, applying command-line overrides
pub fn renderer_for(
    settings: &Settings,
    mode: Option<ModeArg>,
    interval: Option<u64>,
    no_color: bool,
) -> LineRenderer {
    let mut theme = settings.theme.clone();
    if no_color {
        theme.ansi = false;
    }
    let mode = mode.map(RenderMode::from).unwrap_or_else(|| settings.mode());
    LineRenderer::with_interval(theme, mode, interval.unwrap_or(settings.event_interval_ms))
}

/// Session interval for `announce`, falling back to the settings file
pub fn session_interval_for(settings: &Settings, secs: Option<u64>) -> Duration {
    Duration::from_secs(secs.unwrap_or(settings.session_interval_secs))
}

/// Render every non-empty JSON line of `input` into `output`.
///
/// Stops at the first line that is not a valid record. Returns the number
/// of records written.
pub fn render_stream<R: BufRead, W: Write>(
    input: R,
    output: W,
    renderer: LineRenderer,
) -> Result<usize> {
    let mut writer = LineWriter::new(renderer, output);
    let mut count = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = RecordLine::parse(&line)
            .and_then(RecordLine::into_record)
            .with_context(|| format!("Invalid record on line {}", index + 1))?;
        writer.write(&record)?;
        count += 1;
    }

    Ok(count)
}

/// Append a session banner to `file` and optionally `tty`
pub fn announce(
    file: &str,
    tty: Option<&str>,
    session_interval: Duration,
    compact: bool,
    theme: Theme,
) -> Result<()> {
    let primary = FileDestination::parse(file)?;
    let tty = tty.map(FileDestination::parse).transpose()?;
    primary.ensure_exists()?;

    let announcer = SessionAnnouncer::new(theme, session_interval, compact);
    announcer.announce(&primary, tty.as_ref().map(|d| d as &dyn Destination))
}

/// Configure logging for `app` and emit a short burst of sample events
pub fn demo(app: &str, config: Option<&Path>) -> Result<PathBuf> {
    let dir = config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_dir(app));
    let settings = load_settings(&dir)?;
    let log_file = jaclog_app::configure(app, &settings)?;

    let span = info_span!("startup");
    {
        let _guard = span.enter();
        info!("loading configuration from {}", dir.display());
        debug!(entries = 3, "settings parsed");
        info!("o:ready");
    }

    std::thread::sleep(pause_after_startup(&settings));

    warn!(target: "net", retries = 2, "upstream slow");
    error!(target: "net", "connection reset\nretrying with backoff");
    error!(target: "net", critical = true, "giving up");

    Ok(log_file)
}

/// Long enough for the next demo event to get a gap marker
fn pause_after_startup(settings: &Settings) -> Duration {
    Duration::from_millis(settings.event_interval_ms.saturating_add(250))
}
