//! Terminal cells for form rows

mod date_picker_cell;
mod text_field_cell;

pub use date_picker_cell::SelectorDatePickerCell;
pub use text_field_cell::TextFieldCell;
