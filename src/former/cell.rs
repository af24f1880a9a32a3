//! Cell contracts
//!
//! Every cell implements [`FormableRow`]. Input capabilities are optional and
//! discovered at bind time through the `as_*` queries, so a row former bound
//! to a cell lacking its capability degrades to a no-op instead of failing.

use super::observer::FormerObserver;
use crate::controls::{DatePicker, Label, PendingEvent, TextField};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::cell::RefCell;
use std::rc::Rc;

/// Whether selecting the row leaves a highlight behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStyle {
    None,
    #[default]
    Default,
}

/// What a focused cell did with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Not consumed, the caller may use it
    Ignored,
    /// Consumed, control events may be queued
    Handled,
    /// Return was pressed in a text field
    Return,
    /// The cell asks to give up focus
    Resign,
}

/// Base contract for a reusable form cell
pub trait FormableRow: 'static {
    fn selection_style(&self) -> SelectionStyle;

    fn set_selection_style(&mut self, style: SelectionStyle);

    /// Ask the cell to take input focus
    fn become_first_responder(&mut self) -> bool {
        false
    }

    /// Ask the cell to give up input focus
    fn resign_first_responder(&mut self) -> bool {
        false
    }

    fn is_first_responder(&self) -> bool {
        false
    }

    /// Drain control events queued by this cell's controls
    fn take_pending_events(&mut self) -> Vec<PendingEvent> {
        Vec::new()
    }

    /// Route a key press while the cell holds focus
    fn handle_key(&mut self, _key: KeyEvent) -> KeyResponse {
        KeyResponse::Ignored
    }

    /// Rows the cell occupies when drawn
    fn height(&self) -> u16 {
        3
    }

    fn render(&self, frame: &mut Frame, area: Rect, highlighted: bool);

    fn as_text_entry(&mut self) -> Option<&mut dyn TextEntryCapable> {
        None
    }

    fn as_date_selectable(&mut self) -> Option<&mut dyn DateSelectableCapable> {
        None
    }
}

/// A cell with a text field, usable with `TextFieldRowFormer`
pub trait TextEntryCapable {
    fn observer(&self) -> FormerObserver;
    fn former_text_field(&mut self) -> &mut TextField;
    fn former_title_label(&mut self) -> Option<&mut Label>;
}

/// A cell that surfaces a date picker, usable with `SelectorDatePickerRowFormer`
pub trait DateSelectableCapable {
    /// The picker is owned by the row former; the cell only shows it
    fn set_selector_date_picker(&mut self, picker: Option<Rc<RefCell<DatePicker>>>);
    fn set_selector_accessory_view(&mut self, view: Option<Label>);
    fn former_title_label(&mut self) -> Option<&mut Label>;
    fn former_display_label(&mut self) -> Option<&mut Label>;
}
