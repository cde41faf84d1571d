//! TUI state algebra: pure types, zero effects.
//!
//! Screen variants carry only per-screen transient state (the picker
//! cursor). What the sanctuary shows (current mood, current quote, lift
//! flag) lives in [`App`] because it persists behind the picker.

use crossterm::event::KeyEvent;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Producers:
/// - A key reader thread sends `Key`
/// - One short-lived timer thread per interaction sends `LiftExpired`
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The lift started by interaction number `generation` has run its course.
    LiftExpired { generation: u64 },
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Current screen.
    pub screen: Screen,

    /// Key of the mood the sanctuary is themed for.
    pub mood: String,

    /// Quote currently displayed.
    pub quote: String,

    /// True while the quote card is lifted after an interaction.
    pub lifted: bool,

    /// Incremented on every interaction; stale timers are ignored.
    pub lift_generation: u64,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, PartialEq)]
pub enum Screen {
    /// "How are you feeling today?" modal over the sanctuary.
    Picker {
        /// Highlighted catalog index.
        cursor: usize,
    },

    /// Themed creature, quote and button.
    Sanctuary,
}

/// Default screen is Sanctuary (used as placeholder during transitions).
impl Default for Screen {
    fn default() -> Self {
        Screen::Sanctuary
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move picker cursor up.
    MoveUp,
    /// Move picker cursor down.
    MoveDown,
    /// Previous mood in the dock.
    PrevMood,
    /// Next mood in the dock.
    NextMood,
    /// Jump to a mood by its 1-based dock number.
    NumberKey(u8),
    /// Confirm in the picker; interact in the sanctuary.
    Enter,
    /// Press the sanctuary button.
    Interact,
    /// Reopen the mood picker.
    OpenPicker,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Execute a side effect.
    Effect(Effect),
}

/// Side effect requested by a pure transition.
///
/// Both draw from the quote manager, which is stateful, so neither can be
/// resolved in pure code.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Re-theme the sanctuary for `key`, draw a quote, show the sanctuary.
    SelectMood { key: String },
    /// Draw the next quote, play the chime, lift the card.
    Interact,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// App on the picker, with the sanctuary behind it already themed for `mood`.
    pub fn picking(mood: &str, cursor: usize, quote: String) -> Self {
        App {
            screen: Screen::Picker { cursor },
            mood: mood.to_string(),
            quote,
            lifted: false,
            lift_generation: 0,
            should_quit: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
