//! jaclog - grouped, colored, human-readable log output
//!
//! This is the binary entry point. All logic lives in the library.

use std::io::{self, BufWriter};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use jaclog::cli::{self, Args, Command};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    match args.command {
        Command::Render {
            mode,
            interval,
            config,
            no_color,
        } => {
            let settings = cli::settings_from(config.as_deref())?;
            let renderer = cli::renderer_for(&settings, mode, interval, no_color);
            let stdin = io::stdin().lock();
            let stdout = BufWriter::new(io::stdout().lock());
            cli::render_stream(stdin, stdout, renderer).wrap_err("Failed to render records")?;
        }
        Command::Announce {
            file,
            tty,
            session_interval,
            compact,
            config,
        } => {
            let settings = cli::settings_from(config.as_deref())?;
            cli::announce(
                &file,
                tty.as_deref(),
                cli::session_interval_for(&settings, session_interval),
                compact,
                settings.theme.clone(),
            )
            .wrap_err_with(|| format!("Failed to announce session in {}", file))?;
        }
        Command::Demo { app, config } => {
            let log_file = cli::demo(&app, config.as_deref())?;
            eprintln!("Wrote demo events to {}", log_file.display());
            eprintln!("   View them with: cat {}", log_file.display());
        }
    }

    Ok(())
}
