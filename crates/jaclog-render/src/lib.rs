//! # jaclog-render - Rendering Engine
//!
//! Turns [`Record`](jaclog_core::Record)s into styled text and writes the
//! per-run session banner.
//!
//! ## Public API
//!
//! - [`LineRenderer`] - Stateful per-record renderer (Regular or Compact layout)
//! - [`RenderState`] - Header and timestamp of the previous record
//! - [`SessionAnnouncer`] - Launch banner with optional idle-time separator
//! - [`Destination`], [`FileDestination`] - Append-only output targets
//! - [`Theme`] - Symbol and color tables plus layout constants

pub mod destination;
pub mod elapsed;
pub mod renderer;
pub mod session;
pub mod theme;

pub use destination::{Destination, FileDestination};
pub use elapsed::humanize;
pub use renderer::{LineRenderer, RenderMode, RenderState, DEFAULT_EVENT_INTERVAL_MS};
pub use session::{command_line, SessionAnnouncer, DEFAULT_SESSION_INTERVAL_SECS};
pub use theme::{Colors, SymbolMode, SymbolOverrides, Theme};
