//! Logging configuration using tracing

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use jaclog_core::prelude::*;
use jaclog_render::{Destination, FileDestination, SessionAnnouncer};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::layer::RenderLayer;
use crate::settings::{default_log_file, Settings, LOG_ENV};

/// Set once `configure` has installed its subscriber
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Initialize logging for `app_name`.
///
/// Logs are written to `~/.local/share/{app_name}/log/{app_name}.log` (or
/// the platform equivalent), and mirrored to `settings.tty` when set.
/// The filter is controlled by the `JACLOG_LOG` environment variable,
/// falling back to `settings.filter`.
///
/// Returns the log file path.
pub fn configure(app_name: &str, settings: &Settings) -> Result<PathBuf> {
    settings.validate()?;
    let log_file = default_log_file(app_name, settings);
    configure_at(&log_file, settings)?;
    Ok(log_file)
}

/// [`configure`] with an explicit log file path.
pub fn configure_at(log_file: &Path, settings: &Settings) -> Result<()> {
    settings.validate()?;
    if INSTALLED.load(Ordering::Acquire) {
        return Err(Error::config("jaclog is already configured"));
    }

    let primary = FileDestination::new(log_file);
    let tty = settings
        .tty
        .as_deref()
        .map(FileDestination::parse)
        .transpose()?;
    let filter = build_filter(settings)?;

    // Every output is opened before the banner is written anywhere
    let tty_layer = tty
        .as_ref()
        .map(|dest| RenderLayer::append_to(dest.path(), settings.renderer()))
        .transpose()?;
    primary.ensure_exists()?;
    let file_layer = RenderLayer::append_to(primary.path(), settings.renderer())?;

    announce_session(settings, &primary, tty.as_ref())?;

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(tty_layer)
        .try_init()
        .map_err(|e| Error::config(format!("A global logger is already installed: {}", e)))?;
    INSTALLED.store(true, Ordering::Release);

    Ok(())
}

/// Write the session banner to the log file and, if present, the tty.
pub fn announce_session(
    settings: &Settings,
    primary: &FileDestination,
    tty: Option<&FileDestination>,
) -> Result<()> {
    let announcer = SessionAnnouncer::new(
        settings.theme.clone(),
        Duration::from_secs(settings.session_interval_secs),
        settings.compact,
    );
    announcer.announce(primary, tty.map(|dest| dest as &dyn Destination))
}

fn build_filter(settings: &Settings) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(&settings.filter).map_err(|e| {
        Error::config_invalid(format!("Invalid filter {:?}: {}", settings.filter, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jaclog_core::strip_ansi_codes;
    use tempfile::tempdir;

    #[test]
    fn test_announce_session_mirrors_to_tty() {
        let temp = tempdir().unwrap();
        let primary = FileDestination::new(temp.path().join("app.log"));
        primary.ensure_exists().unwrap();
        let tty = FileDestination::new(temp.path().join("tty"));

        announce_session(&Settings::default(), &primary, Some(&tty)).unwrap();

        let a = std::fs::read_to_string(primary.path()).unwrap();
        let b = std::fs::read_to_string(tty.path()).unwrap();
        assert_eq!(a, b);
        assert!(strip_ansi_codes(&a).contains('\u{25b6}'));
    }

    #[test]
    fn test_configure_rejects_directory_tty_before_writing() {
        let temp = tempdir().unwrap();
        let log_file = temp.path().join("app.log");
        let settings = Settings {
            tty: Some(temp.path().to_string_lossy().into_owned()),
            ..Settings::default()
        };

        let err = configure_at(&log_file, &settings).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDestination { .. }));
        assert!(!log_file.exists());
    }

    #[test]
    fn test_configure_unopenable_tty_leaves_log_file_alone() {
        let temp = tempdir().unwrap();
        let log_file = temp.path().join("app.log");
        let settings = Settings {
            tty: Some(
                temp.path()
                    .join("missing/dir/tty")
                    .to_string_lossy()
                    .into_owned(),
            ),
            ..Settings::default()
        };

        let err = configure_at(&log_file, &settings).unwrap_err();
        assert!(err.is_io());
        assert!(!log_file.exists());
    }

    #[test]
    fn test_configure_rejects_bad_filter_before_writing() {
        let temp = tempdir().unwrap();
        let log_file = temp.path().join("app.log");
        let settings = Settings {
            filter: "app=notalevel".to_string(),
            ..Settings::default()
        };

        if std::env::var(LOG_ENV).is_err() {
            let err = configure_at(&log_file, &settings).unwrap_err();
            assert!(err.is_config());
            assert!(!log_file.exists());
        }
    }
}
