use super::EventId;
use std::collections::HashSet;

/// Tombstone set for cancelled events.
///
/// Cancelling never touches the heap. The id is only recorded here, and the queue checks this set when the event is
/// eventually popped, discarding it instead of handing it to the driver. The entry is removed at that moment so the
/// set only ever holds ids that are cancelled and still pending (or that were never pending at all, see [`cancel()`]).
///
/// [`cancel()`]: CancellationRegistry::cancel
#[derive(Debug, Default)]
pub(super) struct CancellationRegistry {
    cancelled: HashSet<EventId>,
}

impl CancellationRegistry {
    /// Record `id` as cancelled. Returns `false` if the id was newly recorded and `true` if it was already present.
    ///
    /// No check is made against the heap, so unknown and already-executed ids are recorded just like pending ones.
    pub(super) fn cancel(&mut self, id: EventId) -> bool {
        !self.cancelled.insert(id)
    }

    pub(super) fn is_cancelled(&self, id: EventId) -> bool {
        self.cancelled.contains(&id)
    }

    /// Remove the tombstone for a popped event, reporting whether there was one.
    pub(super) fn take(&mut self, id: EventId) -> bool {
        self.cancelled.remove(&id)
    }

    pub(super) fn len(&self) -> usize {
        self.cancelled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cancel_returns_false_and_repeat_returns_true() {
        let mut registry = CancellationRegistry::default();
        let id = EventId::new(3);

        assert!(!registry.cancel(id), "first cancellation should report false");
        assert!(registry.cancel(id), "repeated cancellation should report true");
        assert!(registry.is_cancelled(id));
        assert_eq!(1, registry.len());
    }

    #[test]
    fn take_clears_entry() {
        let mut registry = CancellationRegistry::default();
        let id = EventId::new(8);
        registry.cancel(id);

        assert!(registry.take(id));
        assert!(!registry.is_cancelled(id));
        assert!(!registry.take(id), "tombstone should only be taken once");
        assert!(!registry.cancel(id), "id should be cancellable afresh once its tombstone is gone");
    }

    #[test]
    fn is_cancelled_does_not_mutate() {
        let registry = CancellationRegistry::default();
        assert!(!registry.is_cancelled(EventId::new(1)));
        assert_eq!(0, registry.len());
    }
}
