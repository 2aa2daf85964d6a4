//! # jaclog-app - Logging Façade
//!
//! Wires the renderer into `tracing`:
//! - [`Settings`] / [`load_settings()`] - `jaclog.toml` parsing
//! - [`RenderLayer`] - `tracing_subscriber` layer owning one renderer per stream
//! - [`configure()`] - Resolve the log file, write the session banner, install the subscriber

pub mod layer;
pub mod logging;
pub mod settings;

pub use layer::{LineWriter, RenderLayer, CRITICAL_FIELD};
pub use logging::{announce_session, configure, configure_at};
pub use settings::{
    config_dir, default_log_file, load_settings, log_file_path, Settings, CONFIG_FILENAME,
    LOG_ENV,
};
