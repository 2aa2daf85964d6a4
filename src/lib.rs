//! jaclog Library
//!
//! Command implementations behind the `jaclog` binary. The rendering engine
//! lives in `jaclog-render`, the tracing integration in `jaclog-app`.

pub mod cli;

pub use jaclog_app::{configure, load_settings, Settings};
pub use jaclog_core::{Error, Level, Message, Record, Result, Site};
pub use jaclog_render::{LineRenderer, RenderMode, SessionAnnouncer, Theme};
