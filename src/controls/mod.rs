//! Input controls
//!
//! Controls are plain state models. They never call back into row formers
//! themselves; user-originated changes are queued as control events and
//! dispatched by the form once the owning cell is released.

mod date_picker;
mod events;
mod label;
mod text_field;

pub use date_picker::{DatePicker, DatePickerMode};
pub use events::{ControlEvent, EventHandler, EventTargets, PendingEvent};
pub use label::Label;
pub use text_field::{TextField, TextFieldDelegate};
