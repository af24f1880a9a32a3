//! Row formers and the form that owns them
//!
//! - `row`: the `RowFormer` contract and shared base state
//! - `text_field`: text entry rows
//! - `date_picker`: date selection rows
//! - `form`: the `Former` orchestrator
//! - `observer`: control event routing
//! - `cell`: capability contracts cells implement

mod cell;
mod date_picker;
mod form;
mod observer;
mod owner;
mod row;
mod slot;
mod text_field;
mod validatable;

pub use cell::{
    DateSelectableCapable, FormableRow, KeyResponse, SelectionStyle, TextEntryCapable,
};
pub use date_picker::{
    DateChanged, DateFormatter, DateValidator, InputViewUpdate, SelectorDatePickerRowFormer,
};
pub use form::Former;
pub use observer::{dispatch_pending, target_action, FormerObserver};
#[cfg(test)]
pub use owner::MockFormOwner;
pub use owner::FormOwner;
pub use row::{CellSetup, InstantiateType, RowFormer, RowFormerBase};
pub use slot::{assign_if_present, capture_if_absent};
pub use text_field::{TextChanged, TextFieldRowFormer, TextValidator};
pub use validatable::Validatable;

