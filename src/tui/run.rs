//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only TUI module with side effects. It owns the quote
//! manager and the audio cue, and wires the pure layers (state, update,
//! view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Lift timers: one per interaction, report when the lift should end
//! The event loop consumes from the channel, dispatching to pure handlers.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::Rng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::catalog::Catalog;
use crate::chime::{AudioCue, Chime, Silent, TerminalBell};
use crate::quotes::QuoteManager;
use crate::types::SessionConfig;

use super::state::{Action, App, AppEvent, Effect, Screen, Transition};
use super::update::{handle_background_event, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevMood),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(Action::NextMood),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Char(' ') => Some(Action::Interact),
        KeyCode::Char('m') | KeyCode::Esc => Some(Action::OpenPicker),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(c @ '1'..='9') => Some(Action::NumberKey(c as u8 - b'0')),
        _ => None,
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Everything the effects layer mutates besides the App itself.
pub struct Session<R> {
    pub catalog: Catalog,
    pub quotes: QuoteManager<R>,
    pub cue: Box<dyn AudioCue>,
    pub chime: Chime,
}

impl<R: Rng> Session<R> {
    /// Initial app: the sanctuary is themed and quoted for `mood`, and the
    /// picker is open over it with `mood` highlighted.
    pub fn open(&mut self, mood: &str) -> App {
        let quote = self.quotes.next(mood);
        let cursor = self.catalog.position(mood).unwrap_or(0);
        App::picking(mood, cursor, quote)
    }

    /// Execute an effect. Returns the lift generation to schedule a revert
    /// for, if the effect started one.
    pub fn apply(&mut self, effect: Effect, app: &mut App) -> Option<u64> {
        match effect {
            Effect::SelectMood { key } => {
                tracing::debug!("mood selected: {}", key);
                app.quote = self.quotes.next(&key);
                app.mood = key;
                app.screen = Screen::Sanctuary;
                app.lifted = false;
                None
            }
            Effect::Interact => {
                app.quote = self.quotes.next(&app.mood);
                self.cue.play(&self.chime);
                app.lift_generation += 1;
                app.lifted = true;
                Some(app.lift_generation)
            }
        }
    }
}

/// Choose the audio sink for a session.
pub fn audio_cue(mute: bool) -> Box<dyn AudioCue> {
    if mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell)
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore releases, mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

/// Spawn a timer that reports the end of lift `generation` after `delay`.
fn spawn_lift_timer(generation: u64, delay: Duration, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        thread::sleep(delay);
        // Best-effort: the TUI may already be gone
        let _ = tx.send(AppEvent::LiftExpired { generation });
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
pub fn run(catalog: Catalog, config: &SessionConfig) -> io::Result<()> {
    let quotes = match config.seed {
        Some(seed) => QuoteManager::seeded(&catalog, seed),
        None => QuoteManager::new(&catalog),
    };

    let mood = config
        .initial_category
        .as_deref()
        .filter(|key| catalog.get(key).is_some())
        .or_else(|| catalog.default_key())
        .unwrap_or_default()
        .to_string();

    tracing::debug!(moods = catalog.len(), mood = %mood, "starting session");

    let mut session = Session {
        catalog,
        quotes,
        cue: audio_cue(config.mute),
        chime: Chime::default(),
    };
    let mut app = session.open(&mood);

    install_panic_hook();
    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => return finish(Err(e), restore_terminal),
    };

    let result = event_loop(&mut terminal, &mut session, &mut app, config);
    finish(result, restore_terminal)
}

/// Restore the terminal whatever the loop returned. The loop's error wins.
fn finish(result: io::Result<()>, restore: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    let restored = restore();
    result.and(restored)
}

fn event_loop<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session<R>,
    app: &mut App,
    config: &SessionConfig,
) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx.clone());

    loop {
        terminal.draw(|frame| render(app, &session.catalog, frame))?;

        if app.should_quit {
            return Ok(());
        }

        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => return Ok(()), // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                let Some(action) = map_key(key) else {
                    continue;
                };
                let screen = std::mem::take(&mut app.screen);
                let transition = update(screen, &action, &app.mood, &session.catalog);

                match transition {
                    Transition::Screen(new_screen) => {
                        app.screen = new_screen;
                    }
                    Transition::Quit => {
                        app.should_quit = true;
                    }
                    Transition::Effect(effect) => {
                        // Effects that don't set a screen leave the sanctuary up.
                        app.screen = Screen::Sanctuary;
                        if let Some(generation) = session.apply(effect, app) {
                            spawn_lift_timer(generation, config.lift_duration, tx.clone());
                        }
                    }
                }
            }
            background_event => {
                handle_background_event(app, background_event);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
