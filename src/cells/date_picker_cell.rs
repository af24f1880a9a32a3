//! Cell that shows a date and surfaces a picker while focused

use crate::controls::{DatePicker, Label, PendingEvent};
use crate::former::{DateSelectableCapable, FormableRow, KeyResponse, SelectionStyle};
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct SelectorDatePickerCell {
    pub title_label: Option<Label>,
    pub display_label: Option<Label>,
    selector_date_picker: Option<Rc<RefCell<DatePicker>>>,
    selector_accessory_view: Option<Label>,
    focused: bool,
    selection_style: SelectionStyle,
}

impl SelectorDatePickerCell {
    pub fn new(title: &str) -> Self {
        Self {
            title_label: Some(Label::new(title)),
            display_label: Some(Label::default()),
            ..Self::default()
        }
    }

    pub fn selector_date_picker(&self) -> Option<&Rc<RefCell<DatePicker>>> {
        self.selector_date_picker.as_ref()
    }

    pub fn selector_accessory_view(&self) -> Option<&Label> {
        self.selector_accessory_view.as_ref()
    }

    /// The picker is surfaced while the cell holds focus
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn step_picker(&mut self, units: i64) -> KeyResponse {
        if let Some(picker) = &self.selector_date_picker {
            match picker.try_borrow_mut() {
                Ok(mut picker) => {
                    picker.step(units);
                }
                Err(_) => tracing::warn!("date picker busy, key dropped"),
            }
        }
        KeyResponse::Handled
    }
}

impl FormableRow for SelectorDatePickerCell {
    fn selection_style(&self) -> SelectionStyle {
        self.selection_style
    }

    fn set_selection_style(&mut self, style: SelectionStyle) {
        self.selection_style = style;
    }

    /// Focus shows the picker, so a cell without one refuses it
    fn become_first_responder(&mut self) -> bool {
        if self.selector_date_picker.is_none() {
            return false;
        }
        self.focused = true;
        true
    }

    fn resign_first_responder(&mut self) -> bool {
        std::mem::replace(&mut self.focused, false)
    }

    fn is_first_responder(&self) -> bool {
        self.focused
    }

    fn take_pending_events(&mut self) -> Vec<PendingEvent> {
        match &self.selector_date_picker {
            Some(picker) => match picker.try_borrow_mut() {
                Ok(mut picker) => picker.targets_mut().take_pending(),
                Err(_) => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResponse {
        if !self.focused {
            return KeyResponse::Ignored;
        }
        match key.code {
            KeyCode::Up | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('k') => {
                self.step_picker(1)
            }
            KeyCode::Down | KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('j') => {
                self.step_picker(-1)
            }
            KeyCode::PageUp => self.step_picker(7),
            KeyCode::PageDown => self.step_picker(-7),
            KeyCode::Enter | KeyCode::Esc => KeyResponse::Resign,
            _ => KeyResponse::Ignored,
        }
    }

    fn height(&self) -> u16 {
        if self.focused && self.selector_accessory_view.is_some() {
            4
        } else {
            3
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, highlighted: bool) {
        ui::draw_date_picker_cell(frame, area, self, highlighted);
    }

    fn as_date_selectable(&mut self) -> Option<&mut dyn DateSelectableCapable> {
        Some(self)
    }
}

impl DateSelectableCapable for SelectorDatePickerCell {
    fn set_selector_date_picker(&mut self, picker: Option<Rc<RefCell<DatePicker>>>) {
        if picker.is_none() {
            self.focused = false;
        }
        self.selector_date_picker = picker;
    }

    fn set_selector_accessory_view(&mut self, view: Option<Label>) {
        self.selector_accessory_view = view;
    }

    fn former_title_label(&mut self) -> Option<&mut Label> {
        self.title_label.as_mut()
    }

    fn former_display_label(&mut self) -> Option<&mut Label> {
        self.display_label.as_mut()
    }
}
