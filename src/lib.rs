//! # Overview
//!
//! tickwise is a small, deterministic framework for discrete-event simulation. A [`Simulation`] owns a logical clock,
//! a priority queue of deferred actions and a state value of your choosing, and it dispatches those actions strictly in
//! order of execution time:
//!
//! * Actions are plain closures. Each one is boxed when scheduled and consumed when it executes, so it can never run
//!   twice. While it executes it receives exclusive access to the simulation state and to the [`EventQueue`], which
//!   lets it schedule or cancel further events without interior mutability.
//! * Ties between events scheduled for the same time are always broken by creation order. Every scheduled event gets
//!   an [`EventId`] from a strictly increasing sequence and the heap orders on `(time, id)`, so an action that schedules
//!   with zero delay runs after everything already pending at the current time.
//! * Cancellation is lazy. [`EventQueue::cancel()`] records a tombstone for the id; the event stays in the heap and is
//!   discarded, still advancing the clock, when it reaches the front.
//! * Three drivers consume the queue: [`Simulation::run()`] drains it, [`Simulation::run_until()`] drains everything at
//!   or before a limit, and [`Simulation::step()`] executes a single live event.
//! * Parameterizing over the [`SimTime`] trait gives control over the clock type. [`Tick`] (`u64`) is the default.
//!
//! Simulations are single-threaded and fully synchronous. Nothing is global, so independent simulations can run side by
//! side, for example one per thread when replicating an experiment.
//!
//! Scheduling never checks the requested time against the clock. An event scheduled before [`Simulation::now()`] is
//! popped next and moves the clock back to its time.
//!
//! # Logging
//!
//! Scheduling, cancellation and dispatch are reported through [`tracing`] at `trace` and `debug` level. tickwise never
//! installs a subscriber.
//!
//! # Features
//!
//! * `ordered-float` adds a dependency on the [`ordered-float`] crate so that its [`OrderedFloat`] and [`NotNan`]
//!   structs may be used as [`SimTime`].
//! * `serde` derives `Serialize` and `Deserialize` for [`SimulationConfig`] and [`EventId`].
//!
//! [`ordered-float`]: https://docs.rs/ordered-float/4
//! [`OrderedFloat`]: https://docs.rs/ordered-float/4/ordered_float/struct.OrderedFloat.html
//! [`NotNan`]: https://docs.rs/ordered-float/4/ordered_float/struct.NotNan.html
//! [`tracing`]: https://docs.rs/tracing/0.1

mod config;
mod error;
mod events;
mod generic_parameters;
mod simulation;

pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use events::{EventId, EventQueue};
pub use generic_parameters::{SimTime, Tick};
pub use simulation::Simulation;
