//! Screen layout (header, form, status bar)

use super::form::draw_form;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BROWSE_HINTS: &str = " ↑/↓:move  Enter:edit  d:enable/disable  v:validate  q:quit ";
const EDIT_HINTS: &str = " Enter:next  Tab:next  Esc:done ";

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let (header, content, status) = create_layout(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        " Profile ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, header);

    let cursor = (!app.is_editing()).then_some(app.cursor());
    draw_form(frame, content, app.former(), cursor);
    draw_status_bar(frame, status, app);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.is_editing() {
        EDIT_HINTS
    } else {
        BROWSE_HINTS
    };
    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::Gray))];
    if let Some(message) = app.status_message() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(message, Style::default().fg(Color::Green)));
    }
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormerConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_create_layout_reserves_header_and_status() {
        let (header, content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, 1);
        assert_eq!(status.height, 1);
        assert_eq!(status.y, 23);
        assert_eq!(content.height, 22);
    }

    #[test]
    fn test_draw_shows_rows_and_hints() {
        let app = App::new(&FormerConfig::default()).unwrap();
        let screen = render(&app);
        assert!(screen.contains("Profile"));
        assert!(screen.contains("Name"));
        assert!(screen.contains("Birthday"));
        assert!(screen.contains("2000-01-01"));
        assert!(screen.contains("q:quit"));
    }

    #[test]
    fn test_draw_while_editing() {
        let mut app = App::new(&FormerConfig::default()).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::NONE));
        let screen = render(&app);
        assert!(screen.contains("Esc:done"));
        assert!(screen.contains("Name: R"));
    }
}
