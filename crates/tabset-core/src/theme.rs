//! Colour themes for settings screens
//!
//! A [`Theme`] is chosen by [`ThemeName`], which is itself a settings
//! value: it serializes as a lowercase string and is offered to users
//! through a dropdown built by [`ThemeName::options`].

use crate::dropdown::{DropdownOption, DropdownOptions};
use crate::error::CoreResult;
use crate::setting::SettingValue;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Built-in theme identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeName {
    /// All themes in menu order
    #[must_use]
    pub const fn all() -> &'static [ThemeName] {
        &[ThemeName::Dark, ThemeName::Light, ThemeName::Nord]
    }

    /// Stable key, identical to the serialized form
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::Nord => "nord",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
            ThemeName::Nord => "Nord",
        }
    }

    /// Dropdown options for picking a theme
    pub fn options() -> CoreResult<DropdownOptions<ThemeName>> {
        DropdownOptions::new(
            Self::all()
                .iter()
                .map(|name| DropdownOption::new(name.key(), name.label(), *name)),
        )
    }
}

impl SettingValue for ThemeName {}

/// Colour palette used by the terminal widgets
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Main background colour
    pub background: Color,
    /// Main text colour
    pub foreground: Color,
    /// Active tab and focused control
    pub accent: Color,
    /// Focused row background
    pub selection: Color,
    /// Error line in the status bar
    pub error: Color,
    /// Confirmation line in the status bar
    pub success: Color,
    /// Descriptions, placeholders and inactive tabs
    pub muted: Color,
}

/// Complete theme definition
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    #[must_use]
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Light => Theme::light(),
            ThemeName::Nord => Theme::nord(),
        }
    }

    /// Catppuccin mocha palette
    #[must_use]
    pub fn dark() -> Self {
        Theme {
            name: ThemeName::Dark,
            colors: ThemeColors {
                background: Color::Rgb(30, 30, 46),
                foreground: Color::Rgb(205, 214, 244),
                accent: Color::Rgb(137, 180, 250),
                selection: Color::Rgb(88, 91, 112),
                error: Color::Rgb(243, 139, 168),
                success: Color::Rgb(166, 227, 161),
                muted: Color::Rgb(147, 153, 178),
            },
        }
    }

    /// Catppuccin latte palette
    #[must_use]
    pub fn light() -> Self {
        Theme {
            name: ThemeName::Light,
            colors: ThemeColors {
                background: Color::Rgb(239, 241, 245),
                foreground: Color::Rgb(76, 79, 105),
                accent: Color::Rgb(30, 102, 245),
                selection: Color::Rgb(188, 192, 204),
                error: Color::Rgb(210, 15, 57),
                success: Color::Rgb(64, 160, 43),
                muted: Color::Rgb(108, 111, 133),
            },
        }
    }

    #[must_use]
    pub fn nord() -> Self {
        Theme {
            name: ThemeName::Nord,
            colors: ThemeColors {
                background: Color::Rgb(46, 52, 64),
                foreground: Color::Rgb(236, 239, 244),
                accent: Color::Rgb(136, 192, 208),
                selection: Color::Rgb(67, 76, 94),
                error: Color::Rgb(191, 97, 106),
                success: Color::Rgb(163, 190, 140),
                muted: Color::Rgb(76, 86, 106),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}
