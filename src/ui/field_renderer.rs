//! Field rendering for form cells

use crate::cells::{SelectorDatePickerCell, TextFieldCell};
use crate::controls::Label;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CURSOR: &str = "▌";

fn border_style(is_active: bool, highlighted: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else if highlighted {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn title_line(label: Option<&Label>) -> Line<'_> {
    match label {
        Some(label) => Line::from(Span::styled(
            format!(" {} ", label.text().unwrap_or_default()),
            Style::default().fg(label.text_color()),
        )),
        None => Line::default(),
    }
}

/// Draw a text field cell: title in the border, text or placeholder inside
pub fn draw_text_field_cell(frame: &mut Frame, area: Rect, cell: &TextFieldCell, highlighted: bool) {
    let field = &cell.text_field;
    let is_active = field.is_editing();

    let value = match field.text().filter(|text| !text.is_empty()) {
        Some(text) => Span::styled(text, Style::default().fg(field.text_color())),
        None => Span::styled(
            field.placeholder().unwrap_or_default(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    };
    let cursor = if is_active { CURSOR } else { "" };

    let block = Block::default()
        .title(title_line(cell.title_label.as_ref()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, highlighted));

    let content = Paragraph::new(Line::from(vec![
        value,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));
    frame.render_widget(content.block(block), area);
}

/// Draw a date picker cell. While focused the picker's arrows and the
/// accessory view are shown.
pub fn draw_date_picker_cell(
    frame: &mut Frame,
    area: Rect,
    cell: &SelectorDatePickerCell,
    highlighted: bool,
) {
    let is_active = cell.is_focused();

    let display = cell
        .display_label
        .as_ref()
        .map(|label| {
            Span::styled(
                label.text().unwrap_or_default(),
                Style::default().fg(label.text_color()),
            )
        })
        .unwrap_or_default();

    let mut line = Line::default();
    if is_active {
        line.spans
            .push(Span::styled("◀ ", Style::default().fg(Color::Cyan)));
        line.spans.push(display);
        line.spans
            .push(Span::styled(" ▶", Style::default().fg(Color::Cyan)));
    } else {
        line.spans.push(display);
    }
    let mut lines = vec![line];
    if is_active {
        if let Some(accessory) = cell.selector_accessory_view() {
            lines.push(Line::from(Span::styled(
                accessory.text().unwrap_or_default(),
                Style::default().fg(accessory.text_color()),
            )));
        }
    }

    let block = Block::default()
        .title(title_line(cell.title_label.as_ref()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, highlighted));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
