//! Form orchestrator owning rows and their cells

use super::cell::{FormableRow, KeyResponse};
use super::observer::dispatch_pending;
use super::owner::FormOwner;
use super::row::RowFormer;
use crossterm::event::KeyEvent;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Clone)]
struct FormRow {
    former: Rc<RefCell<dyn RowFormer>>,
    cell: Rc<RefCell<dyn FormableRow>>,
}

/// An ordered collection of row formers and the cells they are bound to.
///
/// The form owns both sides strongly; row formers point back at the form
/// and at their cell weakly. It also acts as the responder chain: at most
/// one row is editing at a time, and focus moves between rows through
/// [`FormOwner`].
pub struct Former {
    this: Weak<Former>,
    rows: RefCell<Vec<FormRow>>,
    selected: Cell<Option<usize>>,
    editing: Cell<Option<usize>>,
}

impl Former {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            rows: RefCell::new(Vec::new()),
            selected: Cell::new(None),
            editing: Cell::new(None),
        })
    }

    /// Add a row at the end, creating and configuring its cell.
    /// Returns the row's index.
    pub fn append(&self, row: Rc<RefCell<dyn RowFormer>>) -> usize {
        let owner: Weak<dyn FormOwner> = self.this.clone();
        let cell = {
            let mut former = row.borrow_mut();
            let cell = former.base().instantiate_cell();
            former.base_mut().bind_cell(&cell);
            former.base_mut().set_former(owner);
            former.update();
            cell
        };
        let mut rows = self.rows.borrow_mut();
        rows.push(FormRow { former: row, cell });
        tracing::debug!(index = rows.len() - 1, "row appended");
        rows.len() - 1
    }

    pub fn row_count(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn row(&self, index: usize) -> Option<Rc<RefCell<dyn RowFormer>>> {
        self.entry(index).map(|entry| entry.former)
    }

    pub fn cell(&self, index: usize) -> Option<Rc<RefCell<dyn FormableRow>>> {
        self.entry(index).map(|entry| entry.cell)
    }

    /// Cells in row order
    pub fn cells(&self) -> Vec<Rc<RefCell<dyn FormableRow>>> {
        self.rows
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.cell))
            .collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing.get()
    }

    /// Update every row
    pub fn reload(&self) {
        for index in 0..self.row_count() {
            self.reload_row(index);
        }
    }

    /// Update one row
    pub fn reload_row(&self, index: usize) {
        if let Some(entry) = self.entry(index) {
            update_row(&entry.former);
        }
    }

    /// Bind a recycled cell to a row. The row's update overwrites whatever
    /// the cell still shows from its previous row.
    ///
    /// A cell that still holds focus for another row ends that edit first.
    pub fn rebind(&self, index: usize, cell: Rc<RefCell<dyn FormableRow>>) {
        let incoming_focused = cell
            .try_borrow()
            .is_ok_and(|cell| cell.is_first_responder());
        if self.editing.get() == Some(index) || incoming_focused {
            self.resign_editing();
        }
        if incoming_focused {
            if let Ok(mut cell) = cell.try_borrow_mut() {
                cell.resign_first_responder();
            }
            dispatch_pending(&cell);
        }
        let entry = {
            let mut rows = self.rows.borrow_mut();
            let Some(entry) = rows.get_mut(index) else {
                return;
            };
            entry.cell = cell;
            entry.clone()
        };
        match entry.former.try_borrow_mut() {
            Ok(mut row) => row.base_mut().bind_cell(&entry.cell),
            Err(_) => {
                tracing::warn!(index, "row busy, cell not rebound");
                return;
            }
        }
        update_row(&entry.former);
    }

    /// Enable or disable a row and refresh it.
    ///
    /// Disabling the editing row ends its edit session after the disabled
    /// style has been applied.
    pub fn set_enabled(&self, index: usize, enabled: bool) {
        let Some(entry) = self.entry(index) else {
            return;
        };
        match entry.former.try_borrow_mut() {
            Ok(mut row) => row.set_enabled(enabled),
            Err(_) => {
                tracing::warn!(index, "row busy, enabled flag unchanged");
                return;
            }
        }
        update_row(&entry.former);
        if !enabled && self.editing.get() == Some(index) {
            self.resign_editing();
        }
    }

    /// Select a row as if it had been tapped
    pub fn select(&self, index: usize) {
        let Some(entry) = self.entry(index) else {
            return;
        };
        self.selected.set(Some(index));
        match entry.former.try_borrow_mut() {
            Ok(mut row) => row.cell_selected(index),
            Err(_) => {
                tracing::warn!(index, "row busy, selection skipped");
                return;
            }
        }
        self.settle_focus(index);
    }

    /// Route a key press to the editing cell. Returns whether it was consumed.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        let Some(index) = self.editing.get() else {
            return false;
        };
        let Some(entry) = self.entry(index) else {
            return false;
        };
        let response = match entry.cell.try_borrow_mut() {
            Ok(mut cell) => cell.handle_key(key),
            Err(_) => return false,
        };
        match response {
            KeyResponse::Ignored => false,
            KeyResponse::Handled => {
                dispatch_pending(&entry.cell);
                true
            }
            KeyResponse::Return => {
                let delegate = entry.cell.try_borrow_mut().ok().and_then(|mut cell| {
                    cell.as_text_entry()
                        .and_then(|row| row.former_text_field().delegate())
                });
                let allow_default =
                    delegate.map_or(true, |delegate| delegate.text_field_should_return());
                if allow_default {
                    tracing::trace!(index, "return key left to the text field");
                }
                dispatch_pending(&entry.cell);
                true
            }
            KeyResponse::Resign => {
                self.end_editing();
                true
            }
        }
    }

    /// Indices of rows whose validation fails
    pub fn validate(&self) -> Vec<usize> {
        let rows = self.rows.borrow().clone();
        rows.iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry
                    .former
                    .try_borrow()
                    .map(|row| row.as_validatable().map_or(true, |v| v.validate()))
                    .map_or(false, |valid| !valid)
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn entry(&self, index: usize) -> Option<FormRow> {
        self.rows.borrow().get(index).cloned()
    }

    fn next_editable_index(&self) -> Option<usize> {
        let start = self.editing.get().map_or(0, |index| index + 1);
        let rows = self.rows.borrow().clone();
        rows.iter()
            .enumerate()
            .skip(start)
            .find(|(_, entry)| {
                entry
                    .former
                    .try_borrow()
                    .is_ok_and(|row| row.can_become_editing())
            })
            .map(|(index, _)| index)
    }

    /// Move editing to `index` if its cell took focus, then deliver its events.
    fn settle_focus(&self, index: usize) {
        let Some(entry) = self.entry(index) else {
            return;
        };
        let focused = entry
            .cell
            .try_borrow()
            .is_ok_and(|cell| cell.is_first_responder());
        if focused && self.editing.get() != Some(index) {
            self.resign_editing();
            self.editing.set(Some(index));
            set_row_editing(&entry.former, true);
            tracing::debug!(index, "row became editing");
        }
        dispatch_pending(&entry.cell);
    }

    fn resign_editing(&self) {
        let Some(index) = self.editing.take() else {
            return;
        };
        let Some(entry) = self.entry(index) else {
            return;
        };
        if let Ok(mut cell) = entry.cell.try_borrow_mut() {
            cell.resign_first_responder();
        }
        set_row_editing(&entry.former, false);
        dispatch_pending(&entry.cell);
        tracing::debug!(index, "row stopped editing");
    }
}

impl FormOwner for Former {
    fn deselect(&self, animated: bool) {
        tracing::trace!(animated, "deselecting row");
        self.selected.set(None);
    }

    fn can_become_editing_next(&self) -> bool {
        self.next_editable_index().is_some()
    }

    fn become_editing_next(&self) {
        if let Some(index) = self.next_editable_index() {
            self.select(index);
        }
    }

    fn end_editing(&self) {
        self.resign_editing();
    }
}

fn update_row(row: &RefCell<dyn RowFormer>) {
    match row.try_borrow_mut() {
        Ok(mut row) => row.update(),
        Err(_) => tracing::warn!("row busy, update skipped"),
    }
}

fn set_row_editing(row: &RefCell<dyn RowFormer>, editing: bool) {
    match row.try_borrow_mut() {
        Ok(mut row) => row.set_editing(editing),
        Err(_) => tracing::warn!(editing, "row busy, editing flag unchanged"),
    }
}
