//! Symbol and color tables read by the renderer.
//!
//! Symbols resolve at runtime from [`SymbolMode`]:
//! - `SymbolMode::Unicode`: safe characters that work in all terminals
//! - `SymbolMode::NerdFonts`: Nerd Font glyphs (requires a Nerd Font)
//!
//! Any single symbol can be overridden from the settings file.

use jaclog_core::prelude::*;
use jaclog_core::{style, Color, Level};
use serde::{Deserialize, Serialize};

/// Which glyph set the built-in symbols come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolMode {
    /// Safe Unicode characters (default)
    #[default]
    Unicode,
    /// Nerd Font glyphs
    NerdFonts,
}

impl std::fmt::Display for SymbolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolMode::Unicode => write!(f, "unicode"),
            SymbolMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// Per-key symbol overrides. Unset keys fall back to the mode's glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SymbolOverrides {
    pub debug: Option<String>,
    pub info: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub critical: Option<String>,
    pub launch: Option<String>,
}

/// Color table, 256-color palette indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Colors {
    pub debug: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
    pub critical: Color,
    pub launch: Color,
    /// `[file] function` segment of the header
    pub file: Color,
    /// Gap markers, continuation glyph and session timestamps
    pub time: Color,
    /// Wraps the whole session block
    pub session: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            debug: Color(244),
            info: Color(39),
            warning: Color(214),
            error: Color(196),
            critical: Color(201),
            launch: Color(35),
            file: Color(242),
            time: Color(246),
            session: Color(242),
        }
    }
}

impl Colors {
    pub fn level(&self, level: Level) -> Color {
        match level {
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warning => self.warning,
            Level::Error => self.error,
            Level::Critical => self.critical,
        }
    }
}

/// Layout constants plus the symbol and color tables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub mode: SymbolMode,
    pub symbols: SymbolOverrides,
    pub colors: Colors,

    /// Width of the symbol column; message bodies are indented by it
    pub symbol_width: usize,

    /// Left margin applied to every rendered block
    pub margin: usize,

    /// Empty lines above and below the session separator
    pub session_padding: usize,

    /// Emit ANSI escape sequences
    pub ansi: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: SymbolMode::default(),
            symbols: SymbolOverrides::default(),
            colors: Colors::default(),
            symbol_width: 3,
            margin: 1,
            session_padding: 1,
            ansi: true,
        }
    }
}

impl Theme {
    /// Check the invariants the renderer relies on.
    ///
    /// The continuation glyph of compact mode occupies two columns of the
    /// symbol column, so narrower columns are rejected.
    pub fn validate(&self) -> Result<()> {
        if self.symbol_width < 2 {
            return Err(Error::config_invalid(format!(
                "theme.symbol_width must be at least 2, got {}",
                self.symbol_width
            )));
        }
        Ok(())
    }

    pub fn plain() -> Self {
        Self {
            ansi: false,
            ..Self::default()
        }
    }

    pub fn symbol(&self, level: Level) -> &str {
        let custom = match level {
            Level::Debug => &self.symbols.debug,
            Level::Info => &self.symbols.info,
            Level::Warning => &self.symbols.warning,
            Level::Error => &self.symbols.error,
            Level::Critical => &self.symbols.critical,
        };
        custom
            .as_deref()
            .unwrap_or_else(|| builtin_symbol(self.mode, level))
    }

    pub fn launch_symbol(&self) -> &str {
        self.symbols
            .launch
            .as_deref()
            .unwrap_or_else(|| builtin_launch(self.mode))
    }

    /// Style with this theme's ANSI setting
    pub fn paint(&self, text: &str, color: Color) -> String {
        style(text, color, self.ansi)
    }

    /// `text` left-aligned in the symbol column
    pub fn pad_symbol(&self, text: &str) -> String {
        format!("{:<width$}", text, width = self.symbol_width)
    }
}

fn builtin_symbol(mode: SymbolMode, level: Level) -> &'static str {
    match (mode, level) {
        (SymbolMode::Unicode, Level::Debug) => "\u{25cb}", // ○
        (SymbolMode::Unicode, Level::Info) => "\u{25cf}",  // ●
        (SymbolMode::Unicode, Level::Warning) => "\u{25b2}", // ▲
        (SymbolMode::Unicode, Level::Error) => "\u{2717}", // ✗
        (SymbolMode::Unicode, Level::Critical) => "\u{2739}", // ✹
        (SymbolMode::NerdFonts, Level::Debug) => "\u{f188}", // nf-fa-bug
        (SymbolMode::NerdFonts, Level::Info) => "\u{f05a}", // nf-fa-info_circle
        (SymbolMode::NerdFonts, Level::Warning) => "\u{f071}", // nf-fa-warning
        (SymbolMode::NerdFonts, Level::Error) => "\u{f00d}", // nf-fa-close
        (SymbolMode::NerdFonts, Level::Critical) => "\u{f0e7}", // nf-fa-bolt
    }
}

fn builtin_launch(mode: SymbolMode) -> &'static str {
    match mode {
        SymbolMode::Unicode => "\u{25b6}",   // ▶
        SymbolMode::NerdFonts => "\u{f135}", // nf-fa-rocket
    }
}
