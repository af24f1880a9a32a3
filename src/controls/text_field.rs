//! Single-line text entry control

use super::events::{ControlEvent, EventTargets};
use ratatui::style::Color;
use std::fmt;
use std::rc::{Rc, Weak};

/// Receives the return key on behalf of a [`TextField`]
pub trait TextFieldDelegate {
    /// Return `false` to suppress the field's default return action
    fn text_field_should_return(&self) -> bool;
}

/// Editable text control
///
/// The field only accepts focus while interactive, and only accepts typed
/// input while editing. User-originated changes queue control events on
/// [`TextField::targets_mut`]; programmatic setters never do.
#[derive(Default)]
pub struct TextField {
    text: Option<String>,
    placeholder: Option<String>,
    text_color: Option<Color>,
    interactive: bool,
    editing: bool,
    delegate: Option<Weak<dyn TextFieldDelegate>>,
    targets: EventTargets,
}

impl TextField {
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }

    /// Current color, `Color::Reset` when none was assigned
    pub fn text_color(&self) -> Color {
        self.text_color.unwrap_or(Color::Reset)
    }

    pub fn set_text_color(&mut self, color: Option<Color>) {
        self.text_color = color;
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_delegate(&mut self, delegate: Option<Weak<dyn TextFieldDelegate>>) {
        self.delegate = delegate;
    }

    /// The delegate, if one is set and still alive
    pub fn delegate(&self) -> Option<Rc<dyn TextFieldDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Check if `delegate` is the one currently set
    pub fn is_delegate(&self, delegate: &Weak<dyn TextFieldDelegate>) -> bool {
        self.delegate
            .as_ref()
            .is_some_and(|current| Weak::ptr_eq(current, delegate))
    }

    pub fn targets(&self) -> &EventTargets {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut EventTargets {
        &mut self.targets
    }

    /// Take input focus. Fails unless the field is interactive.
    pub fn become_first_responder(&mut self) -> bool {
        if !self.interactive {
            return false;
        }
        if !self.editing {
            self.editing = true;
            self.targets.send_action(ControlEvent::EditingDidBegin);
        }
        true
    }

    /// Give up input focus
    pub fn resign_first_responder(&mut self) -> bool {
        if !self.editing {
            return false;
        }
        self.editing = false;
        self.targets.send_action(ControlEvent::EditingDidEnd);
        true
    }

    /// Type a character at the end of the text
    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.editing {
            return false;
        }
        self.text.get_or_insert_with(String::new).push(c);
        self.targets.send_action(ControlEvent::ValueChanged);
        true
    }

    /// Remove the last character
    pub fn delete_backward(&mut self) -> bool {
        if !self.editing {
            return false;
        }
        match self.text.as_mut().and_then(String::pop) {
            Some(_) => {
                self.targets.send_action(ControlEvent::ValueChanged);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("text", &self.text)
            .field("placeholder", &self.placeholder)
            .field("text_color", &self.text_color)
            .field("interactive", &self.interactive)
            .field("editing", &self.editing)
            .field("has_delegate", &self.delegate.is_some())
            .field("targets", &self.targets)
            .finish()
    }
}
