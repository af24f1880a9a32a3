//! Validation capability for row formers

/// A row former whose current value can be checked
pub trait Validatable {
    /// Apply the configured predicate to the current value.
    /// Rows without a predicate are always valid.
    fn validate(&self) -> bool;
}
