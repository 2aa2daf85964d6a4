//! Settings parser for jaclog.toml

use std::path::{Path, PathBuf};

use jaclog_core::prelude::*;
use jaclog_render::{
    LineRenderer, RenderMode, Theme, DEFAULT_EVENT_INTERVAL_MS, DEFAULT_SESSION_INTERVAL_SECS,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "jaclog.toml";

/// Environment variable overriding [`Settings::filter`]
pub const LOG_ENV: &str = "JACLOG_LOG";

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Log file name, defaults to `{app}.log`
    pub file_name: Option<String>,

    /// Compact layout: no separating blank lines, continuation glyphs
    pub compact: bool,

    /// Pause, in milliseconds, after which a gap marker is printed
    pub event_interval_ms: u64,

    /// Idle time, in seconds, after which the session banner gets a separator
    pub session_interval_secs: u64,

    /// Second destination (usually a tty device) receiving the same output
    pub tty: Option<String>,

    /// `EnvFilter` directives
    pub filter: String,

    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_name: None,
            compact: true,
            event_interval_ms: DEFAULT_EVENT_INTERVAL_MS,
            session_interval_secs: DEFAULT_SESSION_INTERVAL_SECS,
            tty: None,
            filter: "trace".to_string(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub fn mode(&self) -> RenderMode {
        RenderMode::from_compact(self.compact)
    }

    /// A fresh renderer for one output stream
    pub fn renderer(&self) -> LineRenderer {
        LineRenderer::with_interval(self.theme.clone(), self.mode(), self.event_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        self.theme.validate()?;
        if let Some(name) = &self.file_name {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(Error::config_invalid(format!(
                    "file_name must be a plain file name, got {:?}",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn file_name_for(&self, app_name: &str) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| format!("{}.log", app_name))
    }
}

/// Default settings directory: `{config_dir}/{app}`
pub fn config_dir(app_name: &str) -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(app_name)
}

/// Log file location: `{base}/{app}/log/{file_name}`
pub fn log_file_path(base: &Path, app_name: &str, settings: &Settings) -> PathBuf {
    base.join(app_name)
        .join("log")
        .join(settings.file_name_for(app_name))
}

/// Log file under the platform's local data directory
pub fn default_log_file(app_name: &str, settings: &Settings) -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    log_file_path(&base, app_name, settings)
}

/// Load settings from `dir/jaclog.toml`.
///
/// A missing file yields defaults. A file that cannot be read or parsed, or
/// that fails validation, is a configuration error.
pub fn load_settings(dir: &Path) -> Result<Settings> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_invalid(format!("Failed to read {}: {}", config_path.display(), e))
    })?;
    let settings: Settings = toml::from_str(&content).map_err(|e| {
        Error::config_invalid(format!("Failed to parse {}: {}", config_path.display(), e))
    })?;
    settings.validate()?;

    debug!("Loaded settings from {:?}", config_path);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jaclog_render::SymbolMode;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path()).unwrap();

        assert!(settings.compact);
        assert_eq!(settings.event_interval_ms, 2_000);
        assert_eq!(settings.session_interval_secs, 5);
        assert_eq!(settings.tty, None);
        assert_eq!(settings.filter, "trace");
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let config = r#"
compact = false
event_interval_ms = 500
tty = "/dev/pts/3"

[theme]
mode = "nerd_fonts"
session_padding = 2
"#;
        std::fs::write(temp.path().join(CONFIG_FILENAME), config).unwrap();

        let settings = load_settings(temp.path()).unwrap();

        assert!(!settings.compact);
        assert_eq!(settings.mode(), RenderMode::Regular);
        assert_eq!(settings.event_interval_ms, 500);
        assert_eq!(settings.session_interval_secs, 5);
        assert_eq!(settings.tty.as_deref(), Some("/dev/pts/3"));
        assert_eq!(settings.theme.mode, SymbolMode::NerdFonts);
        assert_eq!(settings.theme.session_padding, 2);
        assert_eq!(settings.theme.margin, 1);
    }

    #[test]
    fn test_load_settings_invalid_toml_fails_fast() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILENAME), "compact = [").unwrap();

        let err = load_settings(temp.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
        assert!(err.is_config());
        assert!(err.to_string().contains(CONFIG_FILENAME));
    }

    #[test]
    fn test_load_settings_invalid_theme_rejected() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILENAME),
            "[theme]\nsymbol_width = 1\n",
        )
        .unwrap();

        let err = load_settings(temp.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_file_name_with_separator_rejected() {
        let settings = Settings {
            file_name: Some("../escape.log".to_string()),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_log_file_path_layout() {
        let settings = Settings::default();
        let path = log_file_path(Path::new("/data"), "myapp", &settings);
        assert_eq!(path, PathBuf::from("/data/myapp/log/myapp.log"));

        let settings = Settings {
            file_name: Some("custom.log".to_string()),
            ..Settings::default()
        };
        let path = log_file_path(Path::new("/data"), "myapp", &settings);
        assert_eq!(path, PathBuf::from("/data/myapp/log/custom.log"));
    }

    #[test]
    fn test_renderer_follows_settings() {
        let settings = Settings {
            compact: false,
            ..Settings::default()
        };
        assert_eq!(settings.renderer().mode(), RenderMode::Regular);
    }
}
