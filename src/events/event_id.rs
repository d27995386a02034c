use std::fmt::{Display, Formatter};

/// Opaque handle to a scheduled event.
///
/// Ids are handed out by the [`EventQueue`] in strictly increasing order and are never reused within one simulation.
/// Besides identifying an event for [`cancel()`], the id is the tiebreaker between events scheduled for equal times:
/// the event with the smaller id executes first.
///
/// Raw values can be recovered with [`EventId::get()`] or `u64::from`, and an id can be built from any `u64` so that
/// handles survive being logged or stored outside the simulation. An id built that way carries no guarantee that a
/// matching event was ever scheduled.
///
/// [`EventQueue`]: crate::EventQueue
/// [`cancel()`]: crate::EventQueue::cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EventId(u64);

impl EventId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EventId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<EventId> for u64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mints [`EventId`]s. Each call to [`next()`] returns a value one greater than the last.
///
/// [`next()`]: IdSequence::next
#[derive(Debug)]
pub(super) struct IdSequence {
    /// `None` once `u64::MAX` has been handed out.
    next: Option<u64>,
}

impl IdSequence {
    pub(super) fn starting_at(first: u64) -> Self {
        Self { next: Some(first) }
    }

    /// # Panics
    ///
    /// If called again after handing out `u64::MAX`, in every build profile.
    pub(super) fn next(&mut self) -> EventId {
        let raw = self.next.expect("event id sequence exhausted after u64::MAX");
        self.next = raw.checked_add(1);
        EventId(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_strictly_increasing() {
        let mut sequence = IdSequence::starting_at(41);
        let ids: Vec<EventId> = (0..4).map(|_| sequence.next()).collect();
        assert_eq!(
            vec![EventId::new(41), EventId::new(42), EventId::new(43), EventId::new(44)],
            ids
        );
    }

    #[test]
    fn last_id_is_u64_max() {
        let mut sequence = IdSequence::starting_at(u64::MAX - 1);
        assert_eq!(EventId::new(u64::MAX - 1), sequence.next());
        assert_eq!(EventId::new(u64::MAX), sequence.next());
    }

    #[test]
    #[should_panic(expected = "event id sequence exhausted")]
    fn exhausted_sequence_panics_instead_of_wrapping() {
        let mut sequence = IdSequence::starting_at(u64::MAX);
        sequence.next();
        sequence.next();
    }

    #[test]
    fn raw_conversions() {
        let id = EventId::from(9);
        assert_eq!(9, u64::from(id));
        assert_eq!(9, id.get());
        assert_eq!("#9", id.to_string());
    }
}
