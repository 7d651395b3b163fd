//! Process-wide user settings persisted with the rest of the app data.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Color theme. Serialized with the display names the data file has always used.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
    IntoStaticStr, EnumIter,
)]
pub enum Theme {
    #[default]
    #[serde(rename = "CourseMate Theme")]
    #[strum(serialize = "CourseMate Theme")]
    CourseMate,
    #[serde(rename = "Light Theme")]
    #[strum(serialize = "Light Theme")]
    Light,
    #[serde(rename = "Dark Theme")]
    #[strum(serialize = "Dark Theme")]
    Dark,
    #[serde(rename = "Baby Pink")]
    #[strum(serialize = "Baby Pink")]
    BabyPink,
    #[serde(rename = "Baby Blue")]
    #[strum(serialize = "Baby Blue")]
    BabyBlue,
}

impl Theme {
    pub fn names() -> Vec<&'static str> {
        Theme::iter().map(|t| t.display_name()).collect()
    }

    pub fn display_name(self) -> &'static str {
        self.into()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr,
)]
pub enum FontSize {
    #[default]
    Normal,
    Large,
}

pub const DEFAULT_FONT_FAMILY: &str = "Open Sans";
pub const DEFAULT_QUOTE_TIMER_SECS: u32 = 30;

/// Built-in quotes copied into settings on first run so the user can edit or delete them.
pub const DEFAULT_QUOTES: &[&str] = &[
    "The only way to do great work is to love what you do. - Steve Jobs",
    "Tell me and I forget. Teach me and I remember. Involve me and I learn. - Benjamin Franklin",
    "Practice doesn't make perfect. Practice makes permanent. - Unknown",
    "Strive for progress, not perfection. - Unknown",
    "We are what we repeatedly do. Excellence, then, is not an act, but a habit. - Aristotle",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default = "crate::config::default_ai_model")]
    pub ai_model: String,
    #[serde(default = "default_quotes")]
    pub quotes: Vec<String>,
    #[serde(default = "default_quote_timer_secs")]
    pub quote_timer_secs: u32,
}

fn default_font_family() -> String { DEFAULT_FONT_FAMILY.to_string() }
fn default_quote_timer_secs() -> u32 { DEFAULT_QUOTE_TIMER_SECS }
fn default_quotes() -> Vec<String> {
    DEFAULT_QUOTES.iter().map(|q| q.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_family: default_font_family(),
            font_size: FontSize::default(),
            ai_model: crate::config::default_ai_model(),
            quotes: default_quotes(),
            quote_timer_secs: default_quote_timer_secs(),
        }
    }
}

/// Partial settings update. Absent fields are left alone; unknown JSON keys
/// are ignored by serde.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub font_family: Option<String>,
    pub font_size: Option<FontSize>,
    pub ai_model: Option<String>,
    pub quotes: Option<Vec<String>>,
    pub quote_timer_secs: Option<u32>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self == &SettingsPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_round_trips_display_names() {
        for name in Theme::names() {
            let theme: Theme = name.parse().unwrap();
            assert_eq!(theme.display_name(), name);
            let json = serde_json::to_string(&theme).unwrap();
            assert_eq!(json, format!("\"{}\"", name));
        }
        assert!("Neon".parse::<Theme>().is_err());
    }

    #[test]
    fn test_settings_fill_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"Dark Theme"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(settings.quotes.len(), DEFAULT_QUOTES.len());
        assert_eq!(settings.quote_timer_secs, 30);
    }

    #[test]
    fn test_patch_ignores_unknown_keys() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"fontSize":"Large","sidebarWidth":240}"#).unwrap();
        assert_eq!(patch.font_size, Some(FontSize::Large));
        assert!(patch.theme.is_none());
        assert!(!patch.is_empty());
    }
}
