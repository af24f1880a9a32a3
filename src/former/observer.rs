//! Routing of control events into row former handlers

use super::cell::FormableRow;
use crate::controls::{ControlEvent, EventHandler, EventTargets};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Upper bound on drain rounds for a single dispatch
const MAX_DISPATCH_ROUNDS: usize = 16;

/// Binds one row former's handlers onto a cell's control.
///
/// Each cell carries its own observer. Binding again replaces whatever this
/// observer bound before, so a recycled cell never keeps calling into the
/// row former it was previously configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormerObserver {
    id: Uuid,
}

impl Default for FormerObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl FormerObserver {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Point the given events of a control at a row former's handlers
    pub fn set_target_row_former(
        &self,
        targets: &mut EventTargets,
        actions: Vec<(ControlEvent, EventHandler)>,
    ) {
        targets.remove_targets(self.id);
        for (event, handler) in actions {
            targets.add_target(self.id, event, handler);
        }
    }

    /// Unbind everything this observer registered
    pub fn remove_target(&self, targets: &mut EventTargets) {
        targets.remove_targets(self.id);
    }
}

/// Build a handler that calls `action` on the target if it is still alive.
///
/// A target that has been dropped, or is borrowed at dispatch time, makes
/// the handler a no-op.
pub fn target_action<T: 'static>(target: &Weak<RefCell<T>>, action: fn(&mut T)) -> EventHandler {
    let target = target.clone();
    Rc::new(move |event| {
        let Some(target) = target.upgrade() else {
            tracing::debug!(?event, "event target dropped");
            return;
        };
        match target.try_borrow_mut() {
            Ok(mut target) => action(&mut target),
            Err(_) => tracing::warn!(?event, "event target busy, event skipped"),
        };
    })
}

/// Deliver every event queued by the cell's controls.
///
/// Events are drained while the cell is borrowed and fired after the borrow
/// is released, so handlers are free to reconfigure the cell. Handlers may
/// queue further events; draining repeats until the cell is quiet.
/// Returns the number of handler invocations.
pub fn dispatch_pending(cell: &RefCell<dyn FormableRow>) -> usize {
    let mut fired = 0;
    for _ in 0..MAX_DISPATCH_ROUNDS {
        let pending = match cell.try_borrow_mut() {
            Ok(mut cell) => cell.take_pending_events(),
            Err(_) => {
                tracing::warn!("cell busy, pending events left queued");
                return fired;
            }
        };
        if pending.is_empty() {
            return fired;
        }
        for event in pending {
            event.fire();
            fired += 1;
        }
    }
    tracing::warn!(
        rounds = MAX_DISPATCH_ROUNDS,
        "control events kept arriving, dispatch stopped"
    );
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::TextFieldCell;

    #[derive(Default)]
    struct Counter {
        hits: usize,
    }

    impl Counter {
        fn hit(&mut self) {
            self.hits += 1;
        }
    }

    #[test]
    fn test_rebinding_replaces_previous_handlers() {
        let observer = FormerObserver::new();
        let mut targets = EventTargets::default();
        let first = Rc::new(RefCell::new(Counter::default()));
        let second = Rc::new(RefCell::new(Counter::default()));

        observer.set_target_row_former(
            &mut targets,
            vec![(
                ControlEvent::ValueChanged,
                target_action(&Rc::downgrade(&first), Counter::hit),
            )],
        );
        observer.set_target_row_former(
            &mut targets,
            vec![(
                ControlEvent::ValueChanged,
                target_action(&Rc::downgrade(&second), Counter::hit),
            )],
        );

        targets.send_action(ControlEvent::ValueChanged);
        for event in targets.take_pending() {
            event.fire();
        }

        assert_eq!(targets.target_count(), 1);
        assert_eq!(first.borrow().hits, 0);
        assert_eq!(second.borrow().hits, 1);
    }

    #[test]
    fn test_remove_target_keeps_other_observers() {
        let mine = FormerObserver::new();
        let other = FormerObserver::new();
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut targets = EventTargets::default();
        for observer in [mine, other] {
            observer.set_target_row_former(
                &mut targets,
                vec![(
                    ControlEvent::ValueChanged,
                    target_action(&Rc::downgrade(&counter), Counter::hit),
                )],
            );
        }

        mine.remove_target(&mut targets);

        assert_eq!(targets.target_count(), 1);
        targets.send_action(ControlEvent::ValueChanged);
        for event in targets.take_pending() {
            event.fire();
        }
        assert_eq!(counter.borrow().hits, 1);
    }

    #[test]
    fn test_handler_for_dropped_target_is_noop() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let handler = target_action(&Rc::downgrade(&counter), Counter::hit);
        drop(counter);
        handler(ControlEvent::ValueChanged);
    }

    #[test]
    fn test_handler_skips_busy_target() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let handler = target_action(&Rc::downgrade(&counter), Counter::hit);
        {
            let _held = counter.borrow_mut();
            handler(ControlEvent::ValueChanged);
        }
        assert_eq!(counter.borrow().hits, 0);
    }

    #[test]
    fn test_dispatch_pending_fires_cell_events() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let cell = Rc::new(RefCell::new(TextFieldCell::default()));
        {
            let mut cell = cell.borrow_mut();
            let observer = cell.observer;
            let field = &mut cell.text_field;
            observer.set_target_row_former(
                field.targets_mut(),
                vec![(
                    ControlEvent::EditingDidBegin,
                    target_action(&Rc::downgrade(&counter), Counter::hit),
                )],
            );
            field.set_interactive(true);
            field.become_first_responder();
        }
        let cell: Rc<RefCell<dyn FormableRow>> = cell;

        assert_eq!(dispatch_pending(&cell), 1);
        assert_eq!(dispatch_pending(&cell), 0);
        assert_eq!(counter.borrow().hits, 1);
    }
}
