use crate::events::Popped;
use crate::{EventId, EventQueue, SimTime, SimulationConfig, Tick};

use std::fmt::{Debug, Formatter};
use std::ops::Add;
use tracing::{debug, trace};

/// Contains the event queue, the clock and the client state belonging to a simulation.
///
/// The defining struct for a discrete-event simulation in tickwise. A [`Simulation`] owns both its state and its event
/// queue, providing both shared and mutable access to each so clients can set up and tear down instances as needed -
/// for example, scheduling initial events or reading the final state after a run. Every instance is independent: there
/// is no global clock, so any number of simulations can coexist on one thread.
///
/// The expected workflow for a Simulation is:
///
/// 1. Pick a state type. Anything works, including `()` when all state lives in captured variables.
/// 2. Pass the state and the start time to [`new()`], or a [`SimulationConfig`] to [`with_config()`].
/// 3. Schedule at least one initial action.
/// 4. Call one of the drivers: [`run()`], [`run_until()`] or [`step()`]. Handle any error it might return.
/// 5. Use the [`state()`], [`state_mut()`] or [`into_state()`] accessors to finish processing the results.
///
/// Each action receives exclusive references to the state and to the [`EventQueue`], through which it may schedule or
/// cancel further events. Those events are visible to the driver call that is executing the action.
///
/// [`new()`]: Simulation::new
/// [`with_config()`]: Simulation::with_config
/// [`run()`]: Simulation::run
/// [`run_until()`]: Simulation::run_until
/// [`step()`]: Simulation::step
/// [`state()`]: Simulation::state
/// [`state_mut()`]: Simulation::state_mut
/// [`into_state()`]: Simulation::into_state
pub struct Simulation<State, Time = Tick>
where
    Time: SimTime,
{
    /// A priority queue of events that have been scheduled to execute, ordered ascending by execution time then id.
    event_queue: EventQueue<State, Time>,
    /// The current shared state of the Simulation. Exclusive access will be granted to each action that executes.
    state: State,
}

impl<State, Time> Simulation<State, Time>
where
    Time: SimTime,
{
    /// Initialize a Simulation instance with the provided starting state and an event queue with clock set to the
    /// provided starting time.
    pub fn new(initial_state: State, start_time: Time) -> Self {
        Self::with_config(initial_state, SimulationConfig::new(start_time))
    }

    /// Initialize a Simulation instance from a [`SimulationConfig`], which also sets the first event id and the
    /// queue's initial capacity.
    pub fn with_config(initial_state: State, config: SimulationConfig<Time>) -> Self {
        Self {
            event_queue: EventQueue::new(config),
            state: initial_state,
        }
    }

    /// Execute events from the priority queue, one at a time, until the queue is empty.
    ///
    /// Follows this loop:
    ///
    /// 1. Attempt to pop the next event from the queue. If there isn't one, return `Ok(())`.
    /// 2. Advance the clock to the event's execution time.
    /// 3. If the event was cancelled, discard it and go back to step 1.
    /// 4. Pass exclusive references to the state and event queue to the action.
    ///     1. If an error is returned, forward it as-is to the caller.
    ///     2. Otherwise, go back to step 1.
    ///
    /// Events scheduled by executing actions are drained by the same call, so a simulation whose actions always
    /// schedule a successor will never return from this method.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::BadExecution`] produced by a fallible action. The failing event has already been
    /// removed from the queue and the clock already points at its time; everything else is left pending, so a later
    /// driver call resumes with the next event.
    ///
    /// [`Error::BadExecution`]: crate::Error::BadExecution
    pub fn run(&mut self) -> crate::Result {
        debug!(now = ?self.event_queue.now(), pending = self.event_queue.pending_count(), "draining event queue");

        let mut executed = 0_usize;
        while let Some(popped) = self.event_queue.next() {
            if self.dispatch(popped)? {
                executed += 1;
            }
        }

        debug!(now = ?self.event_queue.now(), executed, "event queue drained");
        Ok(())
    }

    /// Execute events in order for as long as the next one is scheduled at or before `limit`.
    ///
    /// The next event is peeked before popping, so the first event later than `limit` stays pending and the clock is
    /// left at the time of the last event this call popped (or untouched if it popped nothing). Events scheduled by
    /// executing actions are picked up by the same call if they fall at or before `limit`.
    ///
    /// # Errors
    ///
    /// Same as [`run()`]: the first error produced by a fallible action is returned unchanged.
    ///
    /// [`run()`]: Simulation::run
    pub fn run_until(&mut self, limit: Time) -> crate::Result {
        debug!(
            now = ?self.event_queue.now(),
            limit = ?limit,
            pending = self.event_queue.pending_count(),
            "draining event queue up to limit"
        );

        let mut executed = 0_usize;
        while self.event_queue.next_event_time().is_some_and(|time| *time <= limit) {
            let Some(popped) = self.event_queue.next() else {
                break;
            };
            if self.dispatch(popped)? {
                executed += 1;
            }
        }

        debug!(
            now = ?self.event_queue.now(),
            executed,
            pending = self.event_queue.pending_count(),
            "reached limit"
        );
        Ok(())
    }

    /// Execute exactly one live event.
    ///
    /// Cancelled events at the front of the queue are popped and discarded first, each advancing the clock to its own
    /// time. Returns `Ok(true)` once a live action has executed, or `Ok(false)` if the queue ran empty without finding
    /// one.
    ///
    /// # Errors
    ///
    /// Returns the error produced by the executed action, if it was fallible and failed.
    pub fn step(&mut self) -> crate::Result<bool> {
        while let Some(popped) = self.event_queue.next() {
            if self.dispatch(popped)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute a popped event unless it was cancelled. Returns whether an action ran.
    fn dispatch(&mut self, popped: Popped<State, Time>) -> crate::Result<bool> {
        match popped {
            Popped::Live { id, action } => {
                trace!(id = id.get(), now = ?self.event_queue.now(), "executing event");
                action(&mut self.state, &mut self.event_queue)?;
                Ok(true)
            },
            Popped::Tombstone { id } => {
                debug!(id = id.get(), now = ?self.event_queue.now(), "discarded cancelled event");
                Ok(false)
            },
        }
    }

    /// Schedule the provided action at the specified time. See [`EventQueue::schedule_at()`], including its panic on an
    /// exhausted id sequence.
    pub fn schedule_at<F>(&mut self, time: Time, action: F) -> EventId
    where
        F: FnOnce(&mut State, &mut EventQueue<State, Time>) + 'static,
    {
        self.event_queue.schedule_at(time, action)
    }

    /// Schedule a fallible action at the specified time. See [`EventQueue::schedule_fallible_at()`].
    pub fn schedule_fallible_at<F>(&mut self, time: Time, action: F) -> EventId
    where
        F: FnOnce(&mut State, &mut EventQueue<State, Time>) -> crate::Result + 'static,
    {
        self.event_queue.schedule_fallible_at(time, action)
    }

    /// Mark an event as cancelled. Note the polarity: returns `false` when the id is newly cancelled and `true` when it
    /// was already cancelled. See [`EventQueue::cancel()`].
    pub fn cancel(&mut self, id: EventId) -> bool {
        self.event_queue.cancel(id)
    }

    /// Whether `id` is marked as cancelled and not yet popped. See [`EventQueue::is_cancelled()`].
    pub fn is_cancelled(&self, id: EventId) -> bool {
        self.event_queue.is_cancelled(id)
    }

    /// Number of ids currently marked as cancelled.
    pub fn cancelled_count(&self) -> usize {
        self.event_queue.cancelled_count()
    }

    /// The current clock time.
    pub fn now(&self) -> Time {
        self.event_queue.now()
    }

    /// Whether no events are pending, counting cancelled events that have not been popped yet.
    pub fn is_empty(&self) -> bool {
        self.event_queue.is_empty()
    }

    /// Number of pending events, counting cancelled events that have not been popped yet.
    pub fn pending_count(&self) -> usize {
        self.event_queue.pending_count()
    }

    /// Execution time of the next event to pop, which may be a cancelled one.
    pub fn next_event_time(&self) -> Option<&Time> {
        self.event_queue.next_event_time()
    }

    /// Get a shared reference to the simulation state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Get an exclusive reference to the simulation state.
    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Consume the simulation, dropping any pending events, and return its state.
    pub fn into_state(self) -> State {
        self.state
    }

    /// Get a shared reference to the event queue.
    pub fn event_queue(&self) -> &EventQueue<State, Time> {
        &self.event_queue
    }

    /// Get an exclusive reference to the event queue.
    pub fn event_queue_mut(&mut self) -> &mut EventQueue<State, Time> {
        &mut self.event_queue
    }
}

impl<State, Time> Simulation<State, Time>
where
    Time: SimTime + Add<Output = Time>,
{
    /// Schedule the provided action after the specified delay. See [`EventQueue::schedule_after()`].
    pub fn schedule_after<F>(&mut self, delay: Time, action: F) -> EventId
    where
        F: FnOnce(&mut State, &mut EventQueue<State, Time>) + 'static,
    {
        self.event_queue.schedule_after(delay, action)
    }

    /// Schedule a fallible action after the specified delay. See [`EventQueue::schedule_fallible_after()`].
    pub fn schedule_fallible_after<F>(&mut self, delay: Time, action: F) -> EventId
    where
        F: FnOnce(&mut State, &mut EventQueue<State, Time>) -> crate::Result + 'static,
    {
        self.event_queue.schedule_fallible_after(delay, action)
    }
}

impl<State, Time> Default for Simulation<State, Time>
where
    State: Default,
    Time: SimTime + Default,
{
    fn default() -> Self {
        Self::with_config(State::default(), SimulationConfig::default())
    }
}

impl<State, Time> Debug for Simulation<State, Time>
where
    State: Debug,
    Time: SimTime,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("event_queue", &self.event_queue)
            .field("state", &self.state)
            .finish()
    }
}

impl<State, Time> std::fmt::Display for Simulation<State, Time>
where
    Time: SimTime,
{
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Simulation at time {:?}", self.event_queue.now())
    }
}
