//! Theming system for NEETHub

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::quiz::Subject;

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Subject accents
    pub biology: Color,
    pub physics: Color,
    pub chemistry: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

impl Theme {
    /// Look up a built-in theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "tokyo night" | "tokyo-night" | "tokyonight" => Some(Self::tokyo_night()),
            _ => None,
        }
    }

    /// Accent color for a subject
    pub fn subject_color(&self, subject: Subject) -> Color {
        match subject {
            Subject::Biology => self.biology,
            Subject::Physics => self.physics,
            Subject::Chemistry => self.chemistry,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_tokyo_night() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Tokyo Night");
    }

    #[test]
    fn subjects_have_distinct_accents() {
        let theme = Theme::default();
        assert_ne!(theme.subject_color(Subject::Biology), theme.subject_color(Subject::Physics));
        assert_ne!(theme.subject_color(Subject::Physics), theme.subject_color(Subject::Chemistry));
    }

    #[test]
    fn by_name_is_case_insensitive() {
        assert!(Theme::by_name("TOKYO NIGHT").is_some());
        assert!(Theme::by_name("dracula").is_none());
    }
}
