//! Save/restore primitives for style slots

/// Store `source` into `slot` unless the slot already holds a value.
pub fn capture_if_absent<T>(slot: &mut Option<T>, source: Option<T>) {
    if slot.is_none() {
        *slot = source;
    }
}

/// Hand `source` to `assign` only when it holds a value.
pub fn assign_if_present<T>(source: Option<T>, assign: impl FnOnce(T)) {
    if let Some(value) = source {
        assign(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_fills_empty_slot() {
        let mut slot = None;
        capture_if_absent(&mut slot, Some(1));
        assert_eq!(slot, Some(1));
    }

    #[test]
    fn test_capture_keeps_existing_value() {
        let mut slot = Some(1);
        capture_if_absent(&mut slot, Some(2));
        assert_eq!(slot, Some(1));
    }

    #[test]
    fn test_capture_of_nothing_leaves_slot_empty() {
        let mut slot: Option<u8> = None;
        capture_if_absent(&mut slot, None);
        assert!(slot.is_none());
    }

    #[test]
    fn test_assign_skips_absent_source() {
        let mut dest = 5;
        assign_if_present(None, |v| dest = v);
        assert_eq!(dest, 5);
        assign_if_present(Some(7), |v| dest = v);
        assert_eq!(dest, 7);
    }
}
