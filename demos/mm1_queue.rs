//! An M/M/1 queue with impatient customers that logs arrival, service and give-up events through `tracing`. Arrivals
//! are spaced with a mean of thirty minutes and service times with a mean of twenty minutes. Time is measured in
//! whole seconds.
//!
//! The store is open for nine hours, so this could represent a small, service-oriented business's typical workday.
//! After closing no new customers arrive, but everyone already inside is still served.
//!
//! Arrival events check whether the server is currently busy. If not, the arriving customer goes directly to the
//! server and a Service event is scheduled. If so, the customer gets in line and a GiveUp event is scheduled for
//! forty-five minutes later. Either way, a new Arrival event is scheduled if it would fall before closing.
//!
//! Service events check the line. If someone is waiting, that customer's GiveUp event is cancelled and a new Service
//! event scheduled for them. GiveUp events that do execute remove their customer from the line.
//!
//! Logs at INFO. Raise the level in `main` to DEBUG to also see the engine's own logs.

use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use rand_pcg::Pcg64;
use std::collections::VecDeque;
use tickwise::{Error, EventId, EventQueue, Simulation, Tick};
use tracing::info;

const OPENING_HOURS: Tick = 9 * 60 * 60;
const PATIENCE: Tick = 45 * 60;

/// A customer waiting in line, with the handle of the event that makes them leave.
struct Waiting {
    number: usize,
    give_up: EventId,
}

/// Tracks the line, whether the server is busy or idle, and the random number generator from which arrival and
/// service times are drawn.
struct Store {
    line: VecDeque<Waiting>,
    server_busy: bool,
    customers: usize,
    served: usize,
    gave_up: usize,
    rng: Pcg64,
}

impl Store {
    fn new() -> Self {
        Self {
            line: VecDeque::new(),
            server_busy: false,
            customers: 0,
            served: 0,
            gave_up: 0,
            rng: Pcg64::from_rng(&mut rand::rng()),
        }
    }

    /// Draw an exponential delay with the given mean, in whole seconds.
    fn draw_delay(&mut self, mean_minutes: f64) -> tickwise::Result<Tick> {
        let distribution = Exp::new(1.0 / (mean_minutes * 60.0)).map_err(Error::bad_execution)?;
        Ok(distribution.sample(&mut self.rng).ceil() as Tick)
    }
}

type Events = EventQueue<Store>;

/// If the server is idle, mark it busy and schedule a service event. Otherwise, get in line and start the patience
/// timer. Regardless, schedule the next arrival unless the store has closed by then.
fn arrival(store: &mut Store, events: &mut Events) -> tickwise::Result {
    let number = store.customers;
    store.customers += 1;
    info!(time = events.now(), customer = number, "customer arrived");

    if store.server_busy {
        let timer = events.schedule_after(PATIENCE, move |store: &mut Store, events: &mut Events| {
            give_up(number, store, events)
        });
        info!(ahead = store.line.len(), "server occupied, getting in line");
        store.line.push_back(Waiting { number, give_up: timer });
    } else {
        info!("server idle, moving to counter");
        store.server_busy = true;
        schedule_service(store, events)?;
    }

    let next_arrival = events.now() + store.draw_delay(30.0)?;
    if next_arrival < OPENING_HOURS {
        events.schedule_fallible_at(next_arrival, arrival);
    }
    Ok(())
}

fn schedule_service(store: &mut Store, events: &mut Events) -> tickwise::Result {
    let service_length = store.draw_delay(20.0)?;
    events.schedule_fallible_after(service_length, service);
    Ok(())
}

/// Serve the next customer in line, if any, cancelling their patience timer. Otherwise go idle.
fn service(store: &mut Store, events: &mut Events) -> tickwise::Result {
    store.served += 1;
    info!(time = events.now(), "completed service");

    match store.line.pop_front() {
        Some(next) => {
            events.cancel(next.give_up);
            info!(customer = next.number, remaining = store.line.len(), "beginning service for next customer");
            schedule_service(store, events)?;
        },
        None => {
            info!("line empty, waiting for next arrival");
            store.server_busy = false;
        },
    }
    Ok(())
}

fn give_up(number: usize, store: &mut Store, events: &mut Events) {
    store.line.retain(|waiting| waiting.number != number);
    store.gave_up += 1;
    info!(time = events.now(), customer = number, "customer gave up waiting");
}

fn main() -> tickwise::Result {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let mut sim = Simulation::new(Store::new(), 0);
    let first_arrival = sim.state_mut().draw_delay(30.0)?;
    sim.schedule_fallible_at(first_arrival, arrival);

    sim.run_until(OPENING_HOURS)?;
    info!(inside = sim.state().line.len(), "doors closed");
    sim.run()?;

    let store = sim.into_state();
    info!(
        customers = store.customers,
        served = store.served,
        gave_up = store.gave_up,
        "day complete"
    );
    Ok(())
}
