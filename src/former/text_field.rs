//! Row former for text entry rows

use super::cell::{FormableRow, SelectionStyle, TextEntryCapable};
use super::observer::target_action;
use super::row::{CellSetup, InstantiateType, RowFormer, RowFormerBase};
use super::slot::{assign_if_present, capture_if_absent};
use super::validatable::Validatable;
use crate::controls::{ControlEvent, TextFieldDelegate};
use ratatui::style::Color;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type TextValidator = Box<dyn Fn(Option<&str>) -> bool>;
pub type TextChanged = Box<dyn Fn(&str)>;

/// Binds a text field row.
///
/// The text field is kept non-interactive outside of an edit session;
/// focus is only handed to it from [`RowFormer::cell_selected`].
pub struct TextFieldRowFormer {
    base: RowFormerBase,
    this: Weak<RefCell<TextFieldRowFormer>>,
    pub on_validate: Option<TextValidator>,
    pub on_text_changed: Option<TextChanged>,
    pub text: Option<String>,
    pub placeholder: Option<String>,
    pub text_disabled_color: Option<Color>,
    pub title_disabled_color: Option<Color>,
    pub title_editing_color: Option<Color>,
    /// Return moves focus to the next editable row instead of inserting
    pub return_to_next_row: bool,
    text_color: Option<Color>,
    title_color: Option<Color>,
}

impl TextFieldRowFormer {
    pub fn new<C>(
        instantiate: InstantiateType<C>,
        on_text_changed: Option<TextChanged>,
        cell_setup: Option<CellSetup<C>>,
    ) -> Rc<RefCell<Self>>
    where
        C: FormableRow + Default,
    {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                base: RowFormerBase::new(instantiate, cell_setup),
                this: this.clone(),
                on_validate: None,
                on_text_changed,
                text: None,
                placeholder: None,
                text_disabled_color: Some(Color::DarkGray),
                title_disabled_color: Some(Color::DarkGray),
                title_editing_color: None,
                return_to_next_row: true,
                text_color: None,
                title_color: None,
            })
        })
    }

    /// Title color saved while a disabled or editing style is applied
    pub fn saved_title_color(&self) -> Option<Color> {
        self.title_color
    }

    /// Text color saved while the disabled style is applied
    pub fn saved_text_color(&self) -> Option<Color> {
        self.text_color
    }

    /// Value changed handler
    pub fn text_changed(&mut self) {
        if !self.base.enabled() {
            return;
        }
        let Some(text) = with_text_entry(&self.base, |row| {
            row.former_text_field()
                .text()
                .unwrap_or_default()
                .to_string()
        }) else {
            return;
        };
        self.text = Some(text.clone());
        if let Some(on_text_changed) = &self.on_text_changed {
            on_text_changed(&text);
        }
    }

    /// Editing began handler
    pub fn editing_did_begin(&mut self) {
        if !self.base.enabled() {
            return;
        }
        let editing_color = self.title_editing_color;
        let title_color = &mut self.title_color;
        with_text_entry(&self.base, |row| {
            if let Some(title) = row.former_title_label() {
                capture_if_absent(title_color, Some(title.text_color()));
                assign_if_present(editing_color, |c| title.set_text_color(Some(c)));
            }
        });
    }

    /// Editing ended handler
    pub fn editing_did_end(&mut self) {
        let enabled = self.base.enabled();
        let editing_color = self.title_editing_color;
        let title_color = &mut self.title_color;
        with_text_entry(&self.base, |row| {
            if let Some(title) = row.former_title_label() {
                if enabled {
                    assign_if_present(*title_color, |c| title.set_text_color(Some(c)));
                } else {
                    capture_if_absent(title_color, Some(title.text_color()));
                    assign_if_present(editing_color, |c| title.set_text_color(Some(c)));
                }
            }
            if enabled {
                *title_color = None;
            }
            row.former_text_field().set_interactive(false);
        });
    }

    fn delegate(&self) -> Weak<dyn TextFieldDelegate> {
        let delegate: Weak<dyn TextFieldDelegate> = self.this.clone();
        delegate
    }
}

impl RowFormer for TextFieldRowFormer {
    fn base(&self) -> &RowFormerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RowFormerBase {
        &mut self.base
    }

    fn can_become_editing(&self) -> bool {
        self.base.enabled()
    }

    fn update(&mut self) {
        let enabled = self.base.enabled();
        let editing = self.base.is_editing();
        tracing::trace!(enabled, editing, "updating text field row");

        let delegate = self.delegate();
        let actions = vec![
            (
                ControlEvent::ValueChanged,
                target_action(&self.this, Self::text_changed),
            ),
            (
                ControlEvent::EditingDidBegin,
                target_action(&self.this, Self::editing_did_begin),
            ),
            (
                ControlEvent::EditingDidEnd,
                target_action(&self.this, Self::editing_did_end),
            ),
        ];

        let Self {
            base,
            text,
            placeholder,
            text_disabled_color,
            title_disabled_color,
            title_editing_color,
            text_color,
            title_color,
            ..
        } = self;

        base.with_cell(|cell| {
            cell.set_selection_style(SelectionStyle::None);
            let Some(row) = cell.as_text_entry() else {
                tracing::debug!("cell has no text field, update skipped");
                return;
            };

            let field = row.former_text_field();
            field.set_text(text.clone());
            assign_if_present(placeholder.clone(), |p| field.set_placeholder(Some(p)));
            field.set_interactive(false);
            field.set_delegate(Some(delegate));

            if enabled {
                if let Some(title) = row.former_title_label() {
                    if editing {
                        capture_if_absent(title_color, Some(title.text_color()));
                        assign_if_present(*title_editing_color, |c| {
                            title.set_text_color(Some(c))
                        });
                    } else {
                        assign_if_present(*title_color, |c| title.set_text_color(Some(c)));
                    }
                }
                if !editing {
                    *title_color = None;
                }
                let field = row.former_text_field();
                assign_if_present(*text_color, |c| field.set_text_color(Some(c)));
                *text_color = None;
            } else {
                if let Some(title) = row.former_title_label() {
                    capture_if_absent(title_color, Some(title.text_color()));
                    title.set_text_color(*title_disabled_color);
                }
                let field = row.former_text_field();
                capture_if_absent(text_color, Some(field.text_color()));
                field.set_text_color(*text_disabled_color);
            }

            let observer = row.observer();
            observer.set_target_row_former(row.former_text_field().targets_mut(), actions);
        });
    }

    fn cell_selected(&mut self, _index: usize) {
        if let Some(former) = self.base.former() {
            former.deselect(true);
        }
        if !self.base.enabled() {
            return;
        }
        with_text_entry(&self.base, |row| {
            let field = row.former_text_field();
            if !field.is_editing() {
                field.set_interactive(true);
                field.become_first_responder();
            }
        });
    }

    fn as_validatable(&self) -> Option<&dyn Validatable> {
        Some(self)
    }
}

impl Validatable for TextFieldRowFormer {
    fn validate(&self) -> bool {
        self.on_validate
            .as_ref()
            .map_or(true, |validate| validate(self.text.as_deref()))
    }
}

impl TextFieldDelegate for RefCell<TextFieldRowFormer> {
    fn text_field_should_return(&self) -> bool {
        let (return_to_next_row, former) = match self.try_borrow() {
            Ok(row) => (row.return_to_next_row, row.base.former()),
            Err(_) => {
                tracing::warn!("text field row busy, return key left to the field");
                return true;
            }
        };
        if return_to_next_row {
            if let Some(former) = former {
                if former.can_become_editing_next() {
                    former.become_editing_next();
                } else {
                    former.end_editing();
                }
            }
        }
        !return_to_next_row
    }
}

impl Drop for TextFieldRowFormer {
    fn drop(&mut self) {
        let ours = self.delegate();
        with_text_entry(&self.base, |row| {
            let observer = row.observer();
            let field = row.former_text_field();
            if field.is_delegate(&ours) {
                field.set_delegate(None);
                observer.remove_target(field.targets_mut());
            }
        });
    }
}

fn with_text_entry<R>(
    base: &RowFormerBase,
    f: impl FnOnce(&mut dyn TextEntryCapable) -> R,
) -> Option<R> {
    base.with_cell(|cell| match cell.as_text_entry() {
        Some(row) => Some(f(row)),
        None => {
            tracing::debug!("cell has no text field");
            None
        }
    })
    .flatten()
}
