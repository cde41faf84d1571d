//! Domain types for enchanted-moods.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// CATEGORY DATA
// ============================================================================

/// One emotional category: how it looks and what it can say.
///
/// Leaf data. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Creature glyph shown on the sanctuary screen.
    pub icon: String,
    /// Creature display name.
    pub name: String,
    /// Message variants (the pool). May be empty.
    #[serde(default)]
    pub variants: Vec<String>,
    /// Palette marker: a named palette or a `#rrggbb` color.
    #[serde(default)]
    pub accent: String,
    /// Glyph prefixed to the interaction button label.
    #[serde(default)]
    pub button_icon: String,
}

impl Category {
    /// Label shown on the interaction button, e.g. "😊 Click Me".
    pub fn button_label(&self) -> String {
        if self.button_icon.is_empty() {
            "Click Me".to_string()
        } else {
            format!("{} Click Me", self.button_icon)
        }
    }
}

// ============================================================================
// REPORTS
// ============================================================================

/// A catalog entry as printed by `list`.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub key: String,
    pub icon: String,
    pub name: String,
    pub accent: String,
    pub variant_count: usize,
}

/// Result of drawing successive quotes for one category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawReport {
    /// Category the quotes were drawn from.
    pub category: String,
    /// Seed used for the generator, if one was given.
    pub seed: Option<u64>,
    /// Quotes in the order they were served.
    pub quotes: Vec<String>,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// How long the quote card stays lifted after an interaction.
pub const DEFAULT_LIFT_DURATION: Duration = Duration::from_millis(520);

/// Configuration for an interactive session.
#[derive(Debug)]
pub struct SessionConfig {
    /// Category preselected in the picker (None = catalog default).
    pub initial_category: Option<String>,
    /// Suppress the audio cue.
    pub mute: bool,
    /// Duration of the transient lift after an interaction.
    pub lift_duration: Duration,
    /// Seed for the quote shuffler (None = OS entropy).
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_category: None,
            mute: false,
            lift_duration: DEFAULT_LIFT_DURATION,
            seed: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn owl() -> Category {
        Category {
            icon: "🦉".into(),
            name: "Wise Owl".into(),
            variants: vec!["hoot".into()],
            accent: "sad".into(),
            button_icon: "😔".into(),
        }
    }

    #[test]
    fn button_label_prefixes_icon() {
        assert_eq!(owl().button_label(), "😔 Click Me");
    }

    #[test]
    fn button_label_without_icon_is_plain() {
        let mut c = owl();
        c.button_icon.clear();
        assert_eq!(c.button_label(), "Click Me");
    }

    #[test]
    fn category_optional_fields_default_when_missing() {
        let c: Category = serde_json::from_str(r#"{"icon":"🦉","name":"Owl"}"#).unwrap();
        assert!(c.variants.is_empty());
        assert!(c.accent.is_empty());
        assert!(c.button_icon.is_empty());
    }

    #[test]
    fn session_config_default_lift_is_520ms() {
        let config = SessionConfig::default();
        assert_eq!(config.lift_duration, Duration::from_millis(520));
        assert!(!config.mute);
        assert!(config.seed.is_none());
        assert!(config.initial_category.is_none());
    }
}
