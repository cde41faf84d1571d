//! TUI color semantics, style constants and per-mood palettes.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Chrome styles are fixed. The sanctuary card takes its colors from the
//! current mood's [`Palette`], resolved from the category accent marker:
//! - a built-in palette name ("happy", "sad", ...)
//! - a `#rrggbb` hex color
//! - anything else falls back to [`NEUTRAL`]

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// CHROME STYLES
// ============================================================================

/// Interactive element / keybinding hint (cyan).
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata (dark gray).
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text (bold).
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Cursor row in the picker.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// PALETTES
// ============================================================================

/// Colors for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Borders, creature name, button.
    pub accent: Color,
    /// Quote text.
    pub text: Color,
}

impl Palette {
    /// Style of the quote card border; brighter while lifted.
    pub fn card_border(&self, lifted: bool) -> Style {
        let style = Style::new().fg(self.accent);
        if lifted {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn quote(&self) -> Style {
        Style::new().fg(self.text).add_modifier(Modifier::ITALIC)
    }

    /// Creature name; it pulses (reversed, blinking) while lifted.
    pub fn creature(&self, lifted: bool) -> Style {
        let style = Style::new().fg(self.accent).add_modifier(Modifier::BOLD);
        if lifted {
            style.add_modifier(Modifier::REVERSED | Modifier::SLOW_BLINK)
        } else {
            style
        }
    }

    /// Interaction button.
    pub fn button(&self) -> Style {
        Style::new().fg(Color::Black).bg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Current mood in the dock.
    pub fn dock_current(&self) -> Style {
        Style::new().fg(self.accent).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }
}

pub const NEUTRAL: Palette = Palette {
    accent: Color::Cyan,
    text: Color::White,
};

const HAPPY: Palette = Palette {
    accent: Color::Rgb(255, 196, 61),
    text: Color::Rgb(255, 236, 179),
};

const SAD: Palette = Palette {
    accent: Color::Rgb(110, 140, 210),
    text: Color::Rgb(200, 214, 240),
};

const ANXIOUS: Palette = Palette {
    accent: Color::Rgb(240, 120, 70),
    text: Color::Rgb(250, 214, 196),
};

const EXCITED: Palette = Palette {
    accent: Color::Rgb(214, 84, 200),
    text: Color::Rgb(246, 204, 240),
};

const CALM: Palette = Palette {
    accent: Color::Rgb(86, 170, 120),
    text: Color::Rgb(204, 234, 214),
};

/// Resolve an accent marker to a palette.
pub fn palette_for(accent: &str) -> Palette {
    match accent.trim().to_ascii_lowercase().as_str() {
        "happy" => HAPPY,
        "sad" => SAD,
        "anxious" => ANXIOUS,
        "excited" => EXCITED,
        "calm" => CALM,
        other => parse_hex(other)
            .map(|(r, g, b)| Palette {
                accent: Color::Rgb(r, g, b),
                text: Color::Rgb(lighten(r), lighten(g), lighten(b)),
            })
            .unwrap_or(NEUTRAL),
    }
}

/// Parse `#rrggbb`.
fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Move a channel two thirds of the way to white.
fn lighten(c: u8) -> u8 {
    (c as u16 + (255 - c as u16) * 2 / 3) as u8
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_styles_have_expected_colors() {
        assert_eq!(STYLE_INTERACTIVE.fg, Some(Color::Cyan));
        assert_eq!(STYLE_DIM.fg, Some(Color::DarkGray));
        assert!(STYLE_IMPORTANT.add_modifier.contains(Modifier::BOLD));
        assert!(STYLE_CURSOR.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn builtin_moods_have_distinct_palettes() {
        let names = ["happy", "sad", "anxious", "excited", "calm"];
        for (i, a) in names.iter().enumerate() {
            assert_ne!(palette_for(a), NEUTRAL);
            for b in &names[i + 1..] {
                assert_ne!(palette_for(a), palette_for(b), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn palette_names_are_case_insensitive() {
        assert_eq!(palette_for("Calm "), palette_for("calm"));
    }

    #[test]
    fn hex_accent_becomes_rgb() {
        let palette = palette_for("#102030");
        assert_eq!(palette.accent, Color::Rgb(0x10, 0x20, 0x30));
    }

    #[test]
    fn hex_text_is_lighter_than_accent() {
        let palette = palette_for("#000000");
        assert_eq!(palette.text, Color::Rgb(170, 170, 170));
    }

    #[test]
    fn unknown_or_malformed_accent_is_neutral() {
        assert_eq!(palette_for(""), NEUTRAL);
        assert_eq!(palette_for("mauve"), NEUTRAL);
        assert_eq!(palette_for("#12345"), NEUTRAL);
        assert_eq!(palette_for("#gg0000"), NEUTRAL);
    }

    #[test]
    fn lifted_creature_pulses() {
        let palette = palette_for("happy");
        let pulse = Modifier::REVERSED | Modifier::SLOW_BLINK;
        assert!(palette.creature(true).add_modifier.contains(pulse));
        assert!(!palette.creature(false).add_modifier.intersects(pulse));
        assert!(palette.creature(false).add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn lifted_card_border_is_bold() {
        let palette = palette_for("calm");
        assert!(palette.card_border(true).add_modifier.contains(Modifier::BOLD));
        assert!(!palette.card_border(false).add_modifier.contains(Modifier::BOLD));
    }
}
