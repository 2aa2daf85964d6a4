//! # jaclog-core - Core Types
//!
//! Foundation crate for jaclog. Provides the record model, the error
//! taxonomy and the ANSI styling primitive every other crate builds on.
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Level`] - Closed set of severities (Debug, Info, Warning, Error, Critical)
//! - [`Site`] - Call-site identity: level, subsystem, file, function
//! - [`Message`] - Message text tagged Normal or Inline
//! - [`Record`] - One log event
//! - [`RecordLine`] - JSON wire shape of a record
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Configuration vs I/O errors
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Styling (`ansi`)
//! - [`style()`] - Wrap text in a 256-color escape sequence
//! - [`strip_ansi_codes()`] - Remove escape sequences from text

pub mod ansi;
pub mod error;
pub mod types;

/// Prelude for common imports used throughout all jaclog crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use ansi::{contains_ansi_codes, indent, strip_ansi_codes, style, Color};
pub use error::{Error, Result, ResultExt};
pub use types::{Level, Message, Record, RecordLine, Site, INLINE_MARKER};
