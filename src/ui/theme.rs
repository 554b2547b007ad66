//! Table color schemes and truecolor escapes.
//!
//! A [`Theme`] maps every styled element of the rendered table (headers,
//! selected rows, search matches, the error line) to a `#rrggbb` color. Four
//! Catppuccin flavours are bundled; custom themes load from TOML files with
//! the same shape.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha` (default)
//! - `catppuccin-latte`
//! - `catppuccin-frappe`
//! - `catppuccin-macchiato`
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! column_header_fg = "#cba6f7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! accent_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use datagrid::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! let styled = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(styled.ends_with("\u{1b}[0m"));
//! # let _ = theme;
//! ```

use crate::domain::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for table rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title bar text.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Column header labels.
    pub column_header_fg: String,

    /// Selected row colors.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, toolbar and secondary text.
    pub text_dim: String,

    /// Separator lines.
    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Sort indicators and checkboxes.
    pub accent_fg: String,

    /// Fetch error messages.
    pub error_fg: String,
}

/// Built-in themes, compiled into the binary.
const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("catppuccin-frappe", include_str!("../../themes/catppuccin-frappe.toml")),
    ("catppuccin-macchiato", include_str!("../../themes/catppuccin-macchiato.toml")),
];

/// White, used when a color string is not `#rrggbb`.
const FALLBACK_RGB: (u8, u8, u8) = (255, 255, 255);

impl Theme {
    /// Loads a built-in theme by name. See [`Theme::builtin_names`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_THEMES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .and_then(|(_, source)| toml::from_str(source).ok())
    }

    /// Names accepted by [`Theme::from_name`].
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_THEMES.iter().map(|(name, _)| *name)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Theme`] if the file cannot be read or its TOML
    /// content cannot be parsed (invalid syntax, missing fields, type
    /// mismatches).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| GridError::Theme(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&source)
            .map_err(|e| GridError::Theme(format!("invalid theme file {}: {e}", path.display())))
    }

    fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
        let digits = color.trim().strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let packed = u32::from_str_radix(digits, 16).ok()?;
        let [_, r, g, b] = packed.to_be_bytes();
        Some((r, g, b))
    }

    /// 24-bit color escape for layer 38 (foreground) or 48 (background).
    fn truecolor(layer: u8, color: &str) -> String {
        let (r, g, b) = Self::parse_hex(color).unwrap_or(FALLBACK_RGB);
        format!("\u{001b}[{layer};2;{r};{g};{b}m")
    }

    /// Foreground escape for a `#rrggbb` color; invalid colors render white.
    #[must_use]
    pub fn fg(color: &str) -> String {
        Self::truecolor(38, color)
    }

    /// Background escape for a `#rrggbb` color; invalid colors render white.
    #[must_use]
    pub fn bg(color: &str) -> String {
        Self::truecolor(48, color)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme file does not parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("bundled catppuccin-mocha theme must parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_theme_parses() {
        for name in Theme::builtin_names() {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_colors_become_truecolor_escapes() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("nonsense"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::fg("#12345"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_files_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut theme = Theme::default();
        theme.name = "custom".into();
        fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(GridError::Theme(_))
        ));
    }
}
