//! Pure state transitions: (Screen, Action) -> Transition.
//!
//! Fully testable without a terminal. Unhandled actions return the
//! current screen unchanged.

use crate::catalog::Catalog;

use super::state::{Action, App, AppEvent, Effect, Screen, Transition};

/// Pure state transition function.
///
/// `mood` is the key the sanctuary is currently themed for; the catalog
/// supplies ordering for the picker and dock.
pub fn update(screen: Screen, action: &Action, mood: &str, catalog: &Catalog) -> Transition {
    match screen {
        Screen::Picker { cursor } => update_picker(cursor, action, catalog),
        Screen::Sanctuary => update_sanctuary(action, mood, catalog),
    }
}

/// Apply a non-key event to the app.
pub fn handle_background_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::LiftExpired { generation } => {
            // A newer interaction restarted the lift; let its timer end it.
            if generation == app.lift_generation {
                app.lifted = false;
            }
        }
        AppEvent::Key(_) => {}
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Picker: move, jump, confirm.
fn update_picker(cursor: usize, action: &Action, catalog: &Catalog) -> Transition {
    let len = catalog.len();

    match action {
        Action::MoveUp => Transition::Screen(Screen::Picker {
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveDown => {
            let new_cursor = if len == 0 { 0 } else { (cursor + 1).min(len - 1) };
            Transition::Screen(Screen::Picker { cursor: new_cursor })
        }
        Action::NumberKey(n) => {
            let index = (*n as usize).wrapping_sub(1);
            if index < len {
                Transition::Screen(Screen::Picker { cursor: index })
            } else {
                Transition::Screen(Screen::Picker { cursor })
            }
        }
        Action::Enter | Action::Interact => {
            // Nothing highlighted falls back to the catalog default.
            match catalog.key_at(cursor).or_else(|| catalog.default_key()) {
                Some(key) => Transition::Effect(Effect::SelectMood {
                    key: key.to_string(),
                }),
                None => Transition::Screen(Screen::Picker { cursor }),
            }
        }
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Picker { cursor }),
    }
}

/// Sanctuary: interact, switch mood through the dock, reopen picker.
fn update_sanctuary(action: &Action, mood: &str, catalog: &Catalog) -> Transition {
    match action {
        Action::Enter | Action::Interact => Transition::Effect(Effect::Interact),
        Action::PrevMood | Action::NextMood => {
            let len = catalog.len();
            let Some(current) = catalog.position(mood) else {
                return Transition::Screen(Screen::Sanctuary);
            };
            let target = if *action == Action::NextMood {
                (current + 1) % len
            } else {
                (current + len - 1) % len
            };
            select(catalog.key_at(target))
        }
        Action::NumberKey(n) => select(catalog.key_at((*n as usize).wrapping_sub(1))),
        Action::OpenPicker => Transition::Screen(Screen::Picker {
            cursor: catalog.position(mood).unwrap_or(0),
        }),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Sanctuary),
    }
}

fn select(key: Option<&str>) -> Transition {
    match key {
        Some(key) => Transition::Effect(Effect::SelectMood {
            key: key.to_string(),
        }),
        None => Transition::Screen(Screen::Sanctuary),
    }
}

// ============================================================================
// TESTS
// ============================================================================
