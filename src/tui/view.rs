//! Pure rendering: map App state to ratatui widget trees.
//!
//! The sanctuary is always drawn; the picker is a modal on top of it.
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::Catalog;
use crate::types::Category;

use super::state::{App, Screen};
use super::theme::{self, Palette};

/// Shown in the card when a mood has nothing to say.
const EMPTY_QUOTE: &str = "(no quotes for this mood yet)";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current state to the terminal frame.
pub fn render(app: &App, catalog: &Catalog, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // sanctuary
        Constraint::Length(1), // description
        Constraint::Length(1), // help
    ])
    .split(area);

    let category = catalog.get(&app.mood);
    let palette = category
        .map(|c| theme::palette_for(&c.accent))
        .unwrap_or(theme::NEUTRAL);

    frame.render_widget(render_title(category), chunks[0]);
    render_sanctuary(app, category, catalog, palette, frame, chunks[1]);
    frame.render_widget(
        Paragraph::new(Span::styled(describe(app, catalog), theme::STYLE_DIM)),
        chunks[2],
    );
    frame.render_widget(render_help(&app.screen), chunks[3]);

    if let Screen::Picker { cursor } = app.screen {
        render_picker(cursor, catalog, frame, chunks[1]);
    }
}

/// One-line screen-reader summary: "<key> — <name> — <quote>".
pub fn describe(app: &App, catalog: &Catalog) -> String {
    let name = catalog.get(&app.mood).map(|c| c.name.as_str()).unwrap_or("");
    format!("{} — {} — {}", app.mood, name, app.quote)
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(category: Option<&Category>) -> Paragraph<'static> {
    let mut spans = vec![Span::styled("enchanted-moods", theme::STYLE_TITLE)];
    if let Some(c) = category {
        spans.push(Span::styled(format!("  ·  {}", c.name), theme::STYLE_DIM));
    }
    Paragraph::new(Line::from(spans))
}

fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Picker { .. } => "[j/k] move  [1-9] jump  [Enter] choose  [q] quit",
        Screen::Sanctuary => "[Space/Enter] click  [h/l] mood  [1-9] jump  [m] picker  [q] quit",
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Center a `width` x `height` box inside `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// ============================================================================
// SCREEN: SANCTUARY
// ============================================================================

fn render_sanctuary(
    app: &App,
    category: Option<&Category>,
    catalog: &Catalog,
    palette: Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // padding
        Constraint::Length(3), // creature (last row left free for the lift)
        Constraint::Min(5),    // quote card
        Constraint::Length(1), // button
        Constraint::Length(1), // padding
        Constraint::Length(1), // dock
    ])
    .split(area);

    let (icon, name) = category
        .map(|c| (c.icon.as_str(), c.name.as_str()))
        .unwrap_or(("?", "Unknown"));
    let creature = Paragraph::new(vec![
        Line::from(icon.to_string()).centered(),
        Line::from(Span::styled(name.to_string(), palette.creature(app.lifted))).centered(),
    ]);
    frame.render_widget(creature, chunks[1]);

    // Lifting raises the card one row into the creature's spare row.
    let mut card_area = chunks[2];
    if app.lifted && card_area.y > chunks[1].y {
        card_area.y -= 1;
    }
    frame.render_widget(render_card(&app.quote, palette, app.lifted), card_area);

    let label = category
        .map(Category::button_label)
        .unwrap_or_else(|| "Click Me".to_string());
    let button = Paragraph::new(
        Line::from(Span::styled(format!("  {}  ", label), palette.button())).centered(),
    );
    frame.render_widget(button, chunks[3]);

    frame.render_widget(render_dock(&app.mood, catalog, palette), chunks[5]);
}

fn render_card(quote: &str, palette: Palette, lifted: bool) -> Paragraph<'static> {
    let block = Block::bordered().border_style(palette.card_border(lifted));

    let line = if quote.is_empty() {
        Line::from(Span::styled(EMPTY_QUOTE, theme::STYLE_DIM))
    } else {
        Line::from(Span::styled(quote.to_string(), palette.quote()))
    };

    Paragraph::new(vec![Line::from(""), line.centered()])
        .block(block)
        .wrap(Wrap { trim: true })
}

fn render_dock(mood: &str, catalog: &Catalog, palette: Palette) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, (key, category)) in catalog.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::STYLE_DIM));
        }
        let label = format!("{} {}", category.icon, key);
        if key == mood {
            spans.push(Span::styled(label, palette.dock_current()));
        } else {
            spans.push(Span::styled(label, theme::STYLE_DIM));
        }
    }
    Paragraph::new(Line::from(spans).centered())
}

// ============================================================================
// SCREEN: PICKER
// ============================================================================

fn render_picker(cursor: usize, catalog: &Catalog, frame: &mut Frame, area: Rect) {
    let height = catalog.len() as u16 + 4;
    let popup = centered(area, 44, height);

    let mut lines = vec![Line::from("")];
    for (i, (key, category)) in catalog.iter().enumerate() {
        let spans = vec![
            Span::styled(format!(" [{}] ", i + 1), theme::STYLE_INTERACTIVE),
            Span::raw(format!("{} ", category.icon)),
            Span::styled(category.name.clone(), theme::STYLE_IMPORTANT),
            Span::styled(format!("  {}", key), theme::STYLE_DIM),
        ];
        let line = if i == cursor {
            Line::from(spans).style(theme::STYLE_CURSOR)
        } else {
            Line::from(spans)
        };
        lines.push(line);
    }

    let block = Block::bordered()
        .title(" How are you feeling today? ")
        .border_style(theme::STYLE_INTERACTIVE);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::style::Modifier;
    use ratatui::Terminal;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn sanctuary(mood: &str, quote: &str) -> App {
        let mut app = App::picking(mood, 0, quote.to_string());
        app.screen = Screen::Sanctuary;
        app
    }

    #[test]
    fn picker_renders_question_and_moods() {
        let mut terminal = make_terminal();
        let app = App::picking("happy", 0, "Keep smiling".into());
        terminal
            .draw(|frame| render(&app, &Catalog::builtin(), frame))
            .expect("render should not panic");

        let content = buffer_text(&terminal);
        assert!(content.contains("How are you feeling today?"));
        assert!(content.contains("Unicorn"));
        assert!(content.contains("Forest Hawk"));
    }

    #[test]
    fn sanctuary_shows_creature_quote_and_button() {
        let mut terminal = make_terminal();
        let app = sanctuary("sad", "Rest now");
        terminal
            .draw(|frame| render(&app, &Catalog::builtin(), frame))
            .unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("Wise Owl"));
        assert!(content.contains("Rest now"));
        assert!(content.contains("Click Me"));
        assert!(!content.contains("How are you feeling today?"));
    }

    #[test]
    fn sanctuary_dock_lists_every_mood() {
        let mut terminal = make_terminal();
        let app = sanctuary("calm", "Breathe");
        terminal
            .draw(|frame| render(&app, &Catalog::builtin(), frame))
            .unwrap();

        let content = buffer_text(&terminal);
        for key in ["happy", "sad", "anxious", "excited", "calm"] {
            assert!(content.contains(key), "dock should list {}", key);
        }
    }

    #[test]
    fn empty_quote_shows_placeholder() {
        let mut terminal = make_terminal();
        let app = sanctuary("happy", "");
        terminal
            .draw(|frame| render(&app, &Catalog::builtin(), frame))
            .unwrap();
        assert!(buffer_text(&terminal).contains("no quotes for this mood"));
    }

    #[test]
    fn lifted_card_renders_one_row_higher() {
        let catalog = Catalog::builtin();
        let quote_row = |lifted: bool| {
            let mut terminal = make_terminal();
            let mut app = sanctuary("calm", "Steady");
            app.lifted = lifted;
            terminal.draw(|frame| render(&app, &catalog, frame)).unwrap();
            let buffer = terminal.backend().buffer().clone();
            (0..buffer.area.height)
                .find(|&y| {
                    let row: String = (0..buffer.area.width)
                        .map(|x| buffer[(x, y)].symbol().to_string())
                        .collect();
                    row.contains("Steady")
                })
                .expect("quote should be visible")
        };
        assert_eq!(quote_row(true) + 1, quote_row(false));
    }

    #[test]
    fn lifted_creature_name_is_highlighted() {
        let catalog = Catalog::builtin();
        let name_style = |lifted: bool| {
            let mut terminal = make_terminal();
            let mut app = sanctuary("calm", "Steady");
            app.lifted = lifted;
            terminal.draw(|frame| render(&app, &catalog, frame)).unwrap();
            let buffer = terminal.backend().buffer().clone();
            let width = buffer.area.width;
            (0..buffer.area.height)
                .find_map(|y| {
                    let row: String = (0..width)
                        .map(|x| buffer[(x, y)].symbol().to_string())
                        .collect();
                    let x = row.find("Forest")? as u16;
                    Some(buffer[(x, y)].modifier)
                })
                .expect("creature name should be visible")
        };
        assert!(name_style(true).contains(Modifier::REVERSED));
        assert!(!name_style(false).contains(Modifier::REVERSED));
    }

    #[test]
    fn unknown_mood_renders_without_panic() {
        let mut terminal = make_terminal();
        let app = sanctuary("bored", "");
        terminal
            .draw(|frame| render(&app, &Catalog::builtin(), frame))
            .expect("render should not panic");
    }

    #[test]
    fn tiny_terminal_renders_without_panic() {
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        let app = App::picking("happy", 0, "x".into());
        terminal
            .draw(|frame| render(&app, &Catalog::builtin(), frame))
            .expect("render should not panic");
    }

    #[test]
    fn describe_matches_assistive_label() {
        let app = sanctuary("sad", "Soft nights");
        assert_eq!(describe(&app, &Catalog::builtin()), "sad — Wise Owl — Soft nights");
    }

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(centered(area, 44, 9), area);
        assert_eq!(centered(area, 10, 3), Rect::new(5, 1, 10, 3));
    }
}
