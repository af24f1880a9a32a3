//! Cell with a title and a single-line text field

use crate::controls::{Label, PendingEvent, TextField};
use crate::former::{FormableRow, FormerObserver, KeyResponse, SelectionStyle, TextEntryCapable};
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};

#[derive(Debug, Default)]
pub struct TextFieldCell {
    pub title_label: Option<Label>,
    pub text_field: TextField,
    pub observer: FormerObserver,
    selection_style: SelectionStyle,
}

impl TextFieldCell {
    pub fn new(title: &str) -> Self {
        Self {
            title_label: Some(Label::new(title)),
            ..Self::default()
        }
    }

    /// A cell that shows only the field
    pub fn without_title() -> Self {
        Self::default()
    }
}

impl FormableRow for TextFieldCell {
    fn selection_style(&self) -> SelectionStyle {
        self.selection_style
    }

    fn set_selection_style(&mut self, style: SelectionStyle) {
        self.selection_style = style;
    }

    fn become_first_responder(&mut self) -> bool {
        self.text_field.become_first_responder()
    }

    fn resign_first_responder(&mut self) -> bool {
        self.text_field.resign_first_responder()
    }

    fn is_first_responder(&self) -> bool {
        self.text_field.is_editing()
    }

    fn take_pending_events(&mut self) -> Vec<PendingEvent> {
        self.text_field.targets_mut().take_pending()
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResponse {
        if !self.text_field.is_editing() {
            return KeyResponse::Ignored;
        }
        match key.code {
            KeyCode::Enter => KeyResponse::Return,
            KeyCode::Esc => KeyResponse::Resign,
            KeyCode::Backspace => {
                self.text_field.delete_backward();
                KeyResponse::Handled
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.text_field.insert_char(c);
                KeyResponse::Handled
            }
            _ => KeyResponse::Ignored,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, highlighted: bool) {
        ui::draw_text_field_cell(frame, area, self, highlighted);
    }

    fn as_text_entry(&mut self) -> Option<&mut dyn TextEntryCapable> {
        Some(self)
    }
}

impl TextEntryCapable for TextFieldCell {
    fn observer(&self) -> FormerObserver {
        self.observer
    }

    fn former_text_field(&mut self) -> &mut TextField {
        &mut self.text_field
    }

    fn former_title_label(&mut self) -> Option<&mut Label> {
        self.title_label.as_mut()
    }
}
