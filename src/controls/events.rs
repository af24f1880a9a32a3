//! Control events and the handler tables controls dispatch through

use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Events a control can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// The control's value was changed by the user
    ValueChanged,
    /// The control gained input focus
    EditingDidBegin,
    /// The control gave up input focus
    EditingDidEnd,
}

/// Typed replacement for a target/action pair
pub type EventHandler = Rc<dyn Fn(ControlEvent)>;

/// A queued event already resolved to the handler that will receive it
#[derive(Clone)]
pub struct PendingEvent {
    pub event: ControlEvent,
    pub handler: EventHandler,
}

impl PendingEvent {
    /// Invoke the handler with the event
    pub fn fire(self) {
        (self.handler)(self.event);
    }
}

impl fmt::Debug for PendingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingEvent")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

struct Target {
    owner: Uuid,
    event: ControlEvent,
    handler: EventHandler,
}

/// Handler table and event queue embedded in every control.
///
/// Controls never call handlers directly. They queue events with
/// [`EventTargets::send_action`], and whoever drives the form drains the
/// queue once the control is no longer borrowed.
#[derive(Default)]
pub struct EventTargets {
    targets: Vec<Target>,
    pending: Vec<ControlEvent>,
}

impl EventTargets {
    /// Register `handler` for `event` on behalf of `owner`
    pub fn add_target(&mut self, owner: Uuid, event: ControlEvent, handler: EventHandler) {
        self.targets.push(Target {
            owner,
            event,
            handler,
        });
    }

    /// Drop every handler registered by `owner`
    pub fn remove_targets(&mut self, owner: Uuid) {
        self.targets.retain(|t| t.owner != owner);
    }

    /// Check if any handler listens for `event`
    pub fn has_target(&self, event: ControlEvent) -> bool {
        self.targets.iter().any(|t| t.event == event)
    }

    /// Number of registered handlers
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Queue an event for later dispatch
    pub fn send_action(&mut self, event: ControlEvent) {
        self.pending.push(event);
    }

    /// Number of queued events
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drain the queue, pairing each event with every handler listening for it.
    ///
    /// Events without a listener are discarded.
    pub fn take_pending(&mut self) -> Vec<PendingEvent> {
        let events = std::mem::take(&mut self.pending);
        events
            .into_iter()
            .flat_map(|event| {
                self.targets
                    .iter()
                    .filter(move |t| t.event == event)
                    .map(move |t| PendingEvent {
                        event,
                        handler: Rc::clone(&t.handler),
                    })
            })
            .collect()
    }
}

impl fmt::Debug for EventTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTargets")
            .field("targets", &self.targets.len())
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<(&'static str, ControlEvent)>>>, name: &'static str) -> EventHandler {
        let log = Rc::clone(log);
        Rc::new(move |event| log.borrow_mut().push((name, event)))
    }

    #[test]
    fn test_take_pending_resolves_handlers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let owner = Uuid::new_v4();
        let mut targets = EventTargets::default();
        targets.add_target(owner, ControlEvent::EditingDidBegin, recorder(&log, "begin"));
        targets.add_target(owner, ControlEvent::ValueChanged, recorder(&log, "changed"));

        targets.send_action(ControlEvent::ValueChanged);
        targets.send_action(ControlEvent::EditingDidBegin);
        for pending in targets.take_pending() {
            pending.fire();
        }

        assert_eq!(
            *log.borrow(),
            vec![
                ("changed", ControlEvent::ValueChanged),
                ("begin", ControlEvent::EditingDidBegin)
            ]
        );
        assert_eq!(targets.pending_count(), 0);
    }

    #[test]
    fn test_events_without_listener_are_discarded() {
        let mut targets = EventTargets::default();
        targets.send_action(ControlEvent::EditingDidEnd);
        assert!(targets.take_pending().is_empty());
        assert_eq!(targets.pending_count(), 0);
    }

    #[test]
    fn test_remove_targets_only_affects_owner() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let mut targets = EventTargets::default();
        targets.add_target(first, ControlEvent::ValueChanged, recorder(&log, "first"));
        targets.add_target(second, ControlEvent::ValueChanged, recorder(&log, "second"));

        targets.remove_targets(first);

        assert_eq!(targets.target_count(), 1);
        assert!(targets.has_target(ControlEvent::ValueChanged));
        assert!(!targets.has_target(ControlEvent::EditingDidEnd));
    }
}
