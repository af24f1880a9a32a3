//! Contract a row former expects from the form that owns it

/// Operations a row former may request from its owning form.
///
/// Row formers only hold a weak handle to their owner, so every method
/// takes `&self`; implementations use interior mutability.
#[cfg_attr(test, mockall::automock)]
pub trait FormOwner {
    /// Clear the row selection highlight
    fn deselect(&self, animated: bool);

    /// Check if some row after the editing one can take focus
    fn can_become_editing_next(&self) -> bool;

    /// Move focus to the next row that can take it
    fn become_editing_next(&self);

    /// Drop focus from whichever row holds it
    fn end_editing(&self);
}
