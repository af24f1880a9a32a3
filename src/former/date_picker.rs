//! Row former for rows that select a date through a picker

use super::cell::{DateSelectableCapable, FormableRow};
use super::observer::target_action;
use super::row::{CellSetup, InstantiateType, RowFormer, RowFormerBase};
use super::slot::{assign_if_present, capture_if_absent};
use super::validatable::Validatable;
use crate::controls::{ControlEvent, DatePicker, Label};
use chrono::{DateTime, Utc};
use ratatui::style::Color;
use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};
use uuid::Uuid;

pub type DateValidator = Box<dyn Fn(&DateTime<Utc>) -> bool>;
pub type DateChanged = Box<dyn Fn(DateTime<Utc>)>;
pub type DateFormatter = Box<dyn Fn(&DateTime<Utc>) -> String>;
pub type InputViewUpdate = Box<dyn Fn(&mut DatePicker)>;

/// Binds a row whose input is a date picker.
///
/// The picker belongs to the row former, not to the cell: it is built once,
/// on first use, and handed to whichever cell the row is bound to.
pub struct SelectorDatePickerRowFormer {
    base: RowFormerBase,
    this: Weak<RefCell<SelectorDatePickerRowFormer>>,
    target_id: Uuid,
    pub on_validate: Option<DateValidator>,
    pub on_date_changed: Option<DateChanged>,
    /// Called with the picker on every update
    pub input_view_update: Option<InputViewUpdate>,
    pub display_text_from_date: Option<DateFormatter>,
    pub date: DateTime<Utc>,
    pub input_accessory_view: Option<Label>,
    pub title_disabled_color: Option<Color>,
    pub display_disabled_color: Option<Color>,
    title_color: Option<Color>,
    display_text_color: Option<Color>,
    input_view: OnceCell<Rc<RefCell<DatePicker>>>,
}

impl SelectorDatePickerRowFormer {
    pub fn new<C>(
        instantiate: InstantiateType<C>,
        on_date_changed: Option<DateChanged>,
        cell_setup: Option<CellSetup<C>>,
    ) -> Rc<RefCell<Self>>
    where
        C: FormableRow + Default,
    {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                base: RowFormerBase::new(instantiate, cell_setup),
                this: this.clone(),
                target_id: Uuid::new_v4(),
                on_validate: None,
                on_date_changed,
                input_view_update: None,
                display_text_from_date: None,
                date: Utc::now(),
                input_accessory_view: None,
                title_disabled_color: Some(Color::DarkGray),
                display_disabled_color: Some(Color::DarkGray),
                title_color: None,
                display_text_color: None,
                input_view: OnceCell::new(),
            })
        })
    }

    /// The row's picker, built and subscribed on first access
    pub fn input_view(&self) -> Rc<RefCell<DatePicker>> {
        let picker = self.input_view.get_or_init(|| {
            tracing::debug!("creating date picker");
            let mut picker = DatePicker::new(self.date);
            picker.targets_mut().add_target(
                self.target_id,
                ControlEvent::ValueChanged,
                target_action(&self.this, Self::date_changed),
            );
            Rc::new(RefCell::new(picker))
        });
        Rc::clone(picker)
    }

    /// Text shown in the display label for `date`
    pub fn display_text(&self, date: &DateTime<Utc>) -> String {
        match &self.display_text_from_date {
            Some(format) => format(date),
            None => date.to_string(),
        }
    }

    pub fn saved_title_color(&self) -> Option<Color> {
        self.title_color
    }

    pub fn saved_display_color(&self) -> Option<Color> {
        self.display_text_color
    }

    /// Picker value changed handler
    pub fn date_changed(&mut self) {
        if !self.base.enabled() {
            return;
        }
        let Some(picker) = self.input_view.get() else {
            return;
        };
        let Ok(date) = picker.try_borrow().map(|p| p.date()) else {
            tracing::warn!("date picker busy, change skipped");
            return;
        };
        let text = self.display_text(&date);
        let shown = with_date_selectable(&self.base, |row| {
            if let Some(display) = row.former_display_label() {
                display.set_text(Some(text));
            }
        });
        if shown.is_none() {
            return;
        }
        self.date = date;
        if let Some(on_date_changed) = &self.on_date_changed {
            on_date_changed(date);
        }
    }
}

impl RowFormer for SelectorDatePickerRowFormer {
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
        tracing::trace!(enabled, "updating date picker row");

        let picker = self.input_view();
        match picker.try_borrow_mut() {
            Ok(mut picker) => {
                picker.set_date(self.date);
                if let Some(input_view_update) = &self.input_view_update {
                    input_view_update(&mut picker);
                }
            }
            Err(_) => tracing::warn!("date picker busy, input view update skipped"),
        }
        let text = self.display_text(&self.date);

        let Self {
            base,
            input_accessory_view,
            title_disabled_color,
            display_disabled_color,
            title_color,
            display_text_color,
            ..
        } = self;

        with_date_selectable(base, |row| {
            row.set_selector_date_picker(Some(picker));
            row.set_selector_accessory_view(input_accessory_view.clone());

            if let Some(display) = row.former_display_label() {
                display.set_text(Some(text));
            }
            if enabled {
                if let Some(title) = row.former_title_label() {
                    assign_if_present(*title_color, |c| title.set_text_color(Some(c)));
                }
                if let Some(display) = row.former_display_label() {
                    assign_if_present(*display_text_color, |c| display.set_text_color(Some(c)));
                }
                *title_color = None;
                *display_text_color = None;
            } else {
                if let Some(title) = row.former_title_label() {
                    capture_if_absent(title_color, Some(title.text_color()));
                    title.set_text_color(*title_disabled_color);
                }
                if let Some(display) = row.former_display_label() {
                    capture_if_absent(display_text_color, Some(display.text_color()));
                    display.set_text_color(*display_disabled_color);
                }
            }
        });
    }

    fn cell_selected(&mut self, _index: usize) {
        if let Some(former) = self.base.former() {
            former.deselect(true);
        }
        if self.base.enabled() {
            self.base.with_cell(|cell| cell.become_first_responder());
        }
    }

    fn as_validatable(&self) -> Option<&dyn Validatable> {
        Some(self)
    }
}

impl Validatable for SelectorDatePickerRowFormer {
    fn validate(&self) -> bool {
        self.on_validate
            .as_ref()
            .map_or(true, |validate| validate(&self.date))
    }
}

fn with_date_selectable<R>(
    base: &RowFormerBase,
    f: impl FnOnce(&mut dyn DateSelectableCapable) -> R,
) -> Option<R> {
    base.with_cell(|cell| match cell.as_date_selectable() {
        Some(row) => Some(f(row)),
        None => {
            tracing::debug!("cell has no date picker slot");
            None
        }
    })
    .flatten()
}
