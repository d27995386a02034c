mod cancellation;
mod event_holder;
mod event_id;

pub use event_id::EventId;

use crate::{SimTime, SimulationConfig, Tick};
use cancellation::CancellationRegistry;
use event_holder::{Action, EventHolder};
use event_id::IdSequence;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::{Debug, Formatter};
use std::ops::Add;
use tracing::{debug, trace};

/// Priority queue of scheduled events, plus the clock and the set of cancelled ids.
///
/// Events execute in ascending order of execution time, with ties broken by [`EventId`]. Ids are minted in strictly
/// increasing order as events are scheduled, so events scheduled for the same time execute in the order they were
/// scheduled, even when one of them is scheduled by an action that is currently executing at that same time.
///
/// This struct is generic over the type used to represent clock time for the sake of tracking the current time, as well
/// as over the type used to represent simulation state so that every action receives exclusive access to it.
///
/// An [`EventQueue`] is handed to each action as it executes, so actions can schedule and cancel further events. It
/// does not publicly support popping; popping only occurs inside the drivers on [`Simulation`].
///
/// # Scheduling into the past
///
/// No scheduling method compares the requested time against the clock. An event scheduled before [`now()`] is the next
/// to pop and moves the clock back to its time when it does. Avoiding this is the caller's responsibility.
///
/// # Cancellation
///
/// [`cancel()`] only records a tombstone; the event stays in the heap and is discarded unexecuted when it reaches the
/// front. Discarded events still advance the clock and still count towards [`pending_count()`] until then.
///
/// [`Simulation`]: crate::Simulation
/// [`now()`]: EventQueue::now
/// [`cancel()`]: EventQueue::cancel
/// [`pending_count()`]: EventQueue::pending_count
pub struct EventQueue<State, Time = Tick>
where
    Time: SimTime,
{
    events: BinaryHeap<Reverse<EventHolder<State, Time>>>,
    cancelled: CancellationRegistry,
    ids: IdSequence,
    last_execution_time: Time,
}

/// What the queue found at the front of the heap.
pub(crate) enum Popped<State, Time>
where
    Time: SimTime,
{
    Live { id: EventId, action: Action<State, Time> },
    Tombstone { id: EventId },
}

impl<State, Time> EventQueue<State, Time>
where
    Time: SimTime,
{
    /// Construct a new [`EventQueue`] with no scheduled events and a clock initialized to the configured start time.
    pub(crate) fn new(config: SimulationConfig<Time>) -> Self {
        Self {
            events: BinaryHeap::with_capacity(config.initial_capacity),
            cancelled: CancellationRegistry::default(),
            ids: IdSequence::starting_at(config.first_event_id),
            last_execution_time: config.start_time,
        }
    }

    /// Schedule the provided action at the specified time, returning the id that can later be passed to
    /// [`cancel()`]. Always succeeds; `time` may be earlier than [`now()`].
    ///
    /// # Panics
    ///
    /// If the id sequence is exhausted, i.e. an event with id `u64::MAX` has already been scheduled. Only reachable
    /// with a [`first_event_id`] close to `u64::MAX`.
    ///
    /// [`first_event_id`]: crate::SimulationConfig::first_event_id
    /// [`cancel()`]: EventQueue::cancel
    /// [`now()`]: EventQueue::now
    pub fn schedule_at<F>(&mut self, time: Time, action: F) -> EventId
    where
        F: FnOnce(&mut State, &mut EventQueue<State, Time>) + 'static,
    {
        self.schedule_boxed(
            time,
            Box::new(move |state: &mut State, queue: &mut EventQueue<State, Time>| -> crate::Result {
                action(state, queue);
                Ok(())
            }),
        )
    }

    /// Schedule a fallible action at the specified time. If the action returns an error when it executes, the driver
    /// that executed it stops and returns that error to its caller.
    ///
    /// # Panics
    ///
    /// Under the same condition as [`schedule_at()`].
    ///
    /// [`schedule_at()`]: EventQueue::schedule_at
    pub fn schedule_fallible_at<F>(&mut self, time: Time, action: F) -> EventId
    where
        F: FnOnce(&mut State, &mut EventQueue<State, Time>) -> crate::Result + 'static,
    {
        self.schedule_boxed(time, Box::new(action))
    }

    fn schedule_boxed(&mut self, time: Time, action: Action<State, Time>) -> EventId {
        let id = self.ids.next();
        trace!(id = id.get(), time = ?time, now = ?self.last_execution_time, "scheduling event");
        self.events.push(Reverse(EventHolder {
            execution_time: time,
            id,
            action,
        }));
        id
    }

    /// Mark an event so that it is discarded instead of executed when popped.
    ///
    /// Returns `false` the first time a given id is cancelled and `true` if it was already cancelled and has not been
    /// popped since. The queue does not check whether `id` refers to a pending event: ids that already executed, or were
    /// never issued, are recorded the same way and the first call for them also returns `false`.
    pub fn cancel(&mut self, id: EventId) -> bool {
        let already_cancelled = self.cancelled.cancel(id);
        debug!(id = id.get(), already_cancelled, "cancelled event");
        already_cancelled
    }

    /// Whether `id` is currently marked as cancelled. The mark is cleared once the cancelled event is popped.
    pub fn is_cancelled(&self, id: EventId) -> bool {
        self.cancelled.is_cancelled(id)
    }

    /// Number of ids currently marked as cancelled.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled.len()
    }

    /// The simulation's current clock time: the execution time of the most recently popped event, or the start time if
    /// nothing has been popped yet.
    pub fn now(&self) -> Time {
        self.last_execution_time.clone()
    }

    /// Whether the heap is empty. Cancelled events that have not been popped yet count as pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events in the heap, cancelled ones included.
    pub fn pending_count(&self) -> usize {
        self.events.len()
    }

    /// Execution time of the event at the front of the heap, which may be a cancelled one.
    pub fn next_event_time(&self) -> Option<&Time> {
        self.events.peek().map(|Reverse(holder)| &holder.execution_time)
    }

    /// Crate-internal function to pop an event from the queue. Updates the current clock time to match the execution
    /// time of the popped event and clears its tombstone if it had one, both before the caller gets to run anything.
    pub(crate) fn next(&mut self) -> Option<Popped<State, Time>> {
        let Reverse(holder) = self.events.pop()?;
        self.last_execution_time = holder.execution_time;

        if self.cancelled.take(holder.id) {
            Some(Popped::Tombstone { id: holder.id })
        } else {
            Some(Popped::Live {
                id: holder.id,
                action: holder.action,
            })
        }
    }
}

impl<State, Time> EventQueue<State, Time>
where
    Time: SimTime + Add<Output = Time>,
{
    /// Schedule the provided action after the specified delay, i.e. at `self.now() + delay`.
    ///
    /// A delay of zero schedules the action for the current time, after every event already pending at that time.
    ///
    /// # Panics
    ///
    /// Overflow in `now() + delay` behaves as `Time`'s [`Add`] does: for the integer clocks that means a panic in debug
    /// builds and a wrapped, earlier time in release builds. Also panics under the same condition as
    /// [`schedule_at()`].
    ///
    /// [`schedule_at()`]: EventQueue::schedule_at
    pub fn schedule_after<F>(&mut self, delay: Time, action: F) -> EventId
    where
        F: FnOnce(&mut State, &mut EventQueue<State, Time>) + 'static,
    {
        let event_time = self.now() + delay;
        self.schedule_at(event_time, action)
    }

    /// Schedule a fallible action after the specified delay, i.e. at `self.now() + delay`.
    ///
    /// # Panics
    ///
    /// Same as [`schedule_after()`].
    ///
    /// [`schedule_after()`]: EventQueue::schedule_after
    pub fn schedule_fallible_after<F>(&mut self, delay: Time, action: F) -> EventId
    where
        F: FnOnce(&mut State, &mut EventQueue<State, Time>) -> crate::Result + 'static,
    {
        let event_time = self.now() + delay;
        self.schedule_fallible_at(event_time, action)
    }
}

impl<State, Time> Default for EventQueue<State, Time>
where
    Time: SimTime + Default,
{
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl<State, Time> Debug for EventQueue<State, Time>
where
    Time: SimTime,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("events", &self.events)
            .field("cancelled", &self.cancelled)
            .field("ids", &self.ids)
            .field("last_execution_time", &self.last_execution_time)
            .finish()
    }
}

impl<State, Time> std::fmt::Display for EventQueue<State, Time>
where
    Time: SimTime,
{
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        write!(
            formatter,
            "EventQueue with {} scheduled events ({} cancelled) at current time {:?}",
            self.events.len(),
            self.cancelled.len(),
            self.last_execution_time
        )
    }
}
