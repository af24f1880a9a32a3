//! Former TUI - declarative row-former forms for terminal user interfaces
//!
//! A form is an ordered list of row formers. Each row former is bound to a
//! reusable cell, pushes its model onto the cell's controls on `update()`,
//! and receives the controls' events back through typed handlers.

pub mod app;
pub mod cells;
pub mod config;
pub mod controls;
pub mod former;
pub mod ui;

pub use former::{
    Former, FormOwner, InstantiateType, RowFormer, SelectorDatePickerRowFormer,
    TextFieldRowFormer, Validatable,
};
