//! UI module for rendering form cells and the demo screen

mod field_renderer;
mod form;
mod layout;

pub use field_renderer::{draw_date_picker_cell, draw_text_field_cell};
pub use form::draw_form;
pub use layout::{create_layout, draw, draw_status_bar};
