//! Row former base

use super::cell::FormableRow;
use super::owner::FormOwner;
use super::validatable::Validatable;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// How a row former creates its cell
pub enum InstantiateType<C> {
    /// `C::default()`
    Class,
    /// Built by a caller-supplied closure
    Factory(Box<dyn Fn() -> C>),
}

/// Closure run on every freshly instantiated cell
pub type CellSetup<C> = Box<dyn Fn(&mut C)>;

type CellFactory = Box<dyn Fn() -> Rc<RefCell<dyn FormableRow>>>;

/// State shared by every row former
///
/// The cell and the owning form are both weak references: the form owns
/// the cells and the row formers, a row former only points back at them.
pub struct RowFormerBase {
    cell: Option<Weak<RefCell<dyn FormableRow>>>,
    former: Option<Weak<dyn FormOwner>>,
    enabled: bool,
    editing: bool,
    factory: CellFactory,
}

impl RowFormerBase {
    pub fn new<C>(instantiate: InstantiateType<C>, cell_setup: Option<CellSetup<C>>) -> Self
    where
        C: FormableRow + Default,
    {
        let factory: CellFactory = Box::new(move || {
            let mut cell = match &instantiate {
                InstantiateType::Class => C::default(),
                InstantiateType::Factory(make) => make(),
            };
            if let Some(setup) = &cell_setup {
                setup(&mut cell);
            }
            let cell: Rc<RefCell<dyn FormableRow>> = Rc::new(RefCell::new(cell));
            cell
        });
        Self {
            cell: None,
            former: None,
            enabled: true,
            editing: false,
            factory,
        }
    }

    /// Create a new cell through the instantiation strategy
    pub fn instantiate_cell(&self) -> Rc<RefCell<dyn FormableRow>> {
        (self.factory)()
    }

    /// Point this row at a cell owned by someone else
    pub fn bind_cell(&mut self, cell: &Rc<RefCell<dyn FormableRow>>) {
        self.cell = Some(Rc::downgrade(cell));
    }

    /// The bound cell, if it is still alive
    pub fn cell(&self) -> Option<Rc<RefCell<dyn FormableRow>>> {
        self.cell.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_former(&mut self, former: Weak<dyn FormOwner>) {
        self.former = Some(former);
    }

    /// The owning form, if it is still alive
    pub fn former(&self) -> Option<Rc<dyn FormOwner>> {
        self.former.as_ref().and_then(Weak::upgrade)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Run `f` against the bound cell.
    ///
    /// Returns `None` when no cell is bound, the cell was dropped, or the
    /// cell is borrowed elsewhere.
    pub fn with_cell<R>(&self, f: impl FnOnce(&mut dyn FormableRow) -> R) -> Option<R> {
        let Some(cell) = self.cell() else {
            tracing::debug!("row former has no live cell");
            return None;
        };
        let Ok(mut cell) = cell.try_borrow_mut() else {
            tracing::warn!("cell busy, row former skipped it");
            return None;
        };
        Some(f(&mut *cell))
    }
}

impl fmt::Debug for RowFormerBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowFormerBase")
            .field("has_cell", &self.cell().is_some())
            .field("has_former", &self.former().is_some())
            .field("enabled", &self.enabled)
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

/// Logical controller for one form row
pub trait RowFormer {
    fn base(&self) -> &RowFormerBase;

    fn base_mut(&mut self) -> &mut RowFormerBase;

    /// Push the row's state onto its bound cell
    fn update(&mut self);

    /// The row at `index` was selected in the form
    fn cell_selected(&mut self, index: usize);

    fn can_become_editing(&self) -> bool {
        false
    }

    fn enabled(&self) -> bool {
        self.base().enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    fn is_editing(&self) -> bool {
        self.base().is_editing()
    }

    fn set_editing(&mut self, editing: bool) {
        self.base_mut().set_editing(editing);
    }

    fn as_validatable(&self) -> Option<&dyn Validatable> {
        None
    }
}
