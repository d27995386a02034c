use super::{EventId, EventQueue};
use crate::SimTime;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

/// A scheduled action in its type-erased, run-once form. Infallible actions are wrapped to return `Ok(())` before they
/// get here.
pub(crate) type Action<State, Time> = Box<dyn FnOnce(&mut State, &mut EventQueue<State, Time>) -> crate::Result>;

/// Helper struct for the event queue. This struct holds a [`Box`] to the action itself alongside the data necessary to
/// sort events within the priority queue, namely the execution time and the event's id.
///
/// The implementation of [`Ord`] on this struct cares first about the execution time, comparing ids only to break ties.
/// Ids are minted in creation order, so equal-time events come out in the order they were scheduled.
pub(super) struct EventHolder<State, Time>
where
    Time: SimTime,
{
    pub execution_time: Time,
    pub id: EventId,
    pub action: Action<State, Time>,
}

impl<State, Time> Debug for EventHolder<State, Time>
where
    Time: SimTime,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHolder")
            .field("execution_time", &self.execution_time)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<State, Time> PartialEq<Self> for EventHolder<State, Time>
where
    Time: SimTime,
{
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.execution_time == other.execution_time
    }
}

impl<State, Time> Eq for EventHolder<State, Time> where Time: SimTime {}

impl<State, Time> PartialOrd<Self> for EventHolder<State, Time>
where
    Time: SimTime,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<State, Time> Ord for EventHolder<State, Time>
where
    Time: SimTime,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.execution_time
            .cmp(&other.execution_time)
            .then_with(|| self.id.cmp(&other.id))
    }
}
