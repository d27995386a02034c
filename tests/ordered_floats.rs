#[cfg(feature = "ordered-float")]
mod ordered_float_tests {
    use ordered_float::NotNan;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Distribution, Exp};
    use rand_pcg::Pcg64;
    use std::collections::VecDeque;
    use tickwise::{EventQueue, Simulation};

    type Time = NotNan<f64>;
    type Events = EventQueue<Store, Time>;

    /// Data storage for individual customer
    struct Customer {
        service_time_random_draw: f64,
        arrival_time: Time,
    }

    /// Simulation state
    struct Store {
        num_servers: u32,                   // 1, 2, or 3 for comparing different config
        service_rate: f64,                  // rate of 6.0, 3.0, or 2.0
        servers_busy: u32,                  // check if a server is idle
        arrival_distr: Exp<f64>,            // rate of 4.0
        customer_queue: VecDeque<Customer>, // FIFO queue
        customers_served: usize,            // output stat
        total_time_in_queue: Time,          // output stat
        rng: Pcg64,                         // random number generator
    }

    impl Store {
        fn new(num_servers: u32, service_rate: f64, rng: Pcg64) -> Self {
            Self {
                num_servers,
                service_rate,
                servers_busy: 0,
                arrival_distr: Exp::new(4.0).expect("rate should be positive"),
                customer_queue: VecDeque::new(),
                customers_served: 0,
                total_time_in_queue: NotNan::new(0.0).expect("0 should not be NaN"),
                rng,
            }
        }

        fn gen_arrival_delay(&mut self) -> Time {
            NotNan::new(self.arrival_distr.sample(&mut self.rng)).expect("exponential draw should not be NaN")
        }
    }

    /// Customer enters the store
    fn arrival(store: &mut Store, events: &mut Events) {
        let customer = Customer {
            service_time_random_draw: store.rng.random(),
            arrival_time: events.now(),
        };

        if store.servers_busy < store.num_servers {
            // go directly to counter
            store.servers_busy += 1;
            schedule_service(customer, store, events);
        } else {
            // get in line
            store.customer_queue.push_back(customer);
        }

        let delay = store.gen_arrival_delay();
        events.schedule_after(delay, arrival);
    }

    fn schedule_service(customer: Customer, store: &mut Store, events: &mut Events) {
        store.total_time_in_queue += events.now() - customer.arrival_time;

        let service_delay = customer.service_time_random_draw.ln() / -store.service_rate;
        let service_delay = NotNan::new(service_delay).expect("service delay should not be NaN");
        events.schedule_after(service_delay, departure);
    }

    /// Customer departs the store
    fn departure(store: &mut Store, events: &mut Events) {
        // wrap up current customer
        store.customers_served += 1;

        match store.customer_queue.pop_front() {
            Some(next_customer) => schedule_service(next_customer, store, events),
            // go idle
            None => store.servers_busy -= 1,
        }
    }

    /// Add time in queue for customers who haven't reached the counter yet
    fn closing(store: &mut Store, events: &mut Events) {
        let now = events.now();
        for customer in store.customer_queue.iter() {
            store.total_time_in_queue += now - customer.arrival_time;
        }
    }

    fn run_sim(seed: u64, num_servers: u32, service_rate: f64) -> (usize, Time) {
        let rng = Pcg64::seed_from_u64(seed);
        let store = Store::new(num_servers, service_rate, rng);

        let start_time = NotNan::new(0.0).expect("start time should not be NaN");
        let end_time = NotNan::new(540.0).expect("end time should not be NaN");

        let mut sim = Simulation::new(store, start_time);
        sim.schedule_at(end_time, closing);
        let first_arrival = sim.state_mut().gen_arrival_delay();
        sim.schedule_after(first_arrival, arrival);

        sim.run_until(end_time).expect("simulation should complete normally");

        assert_eq!(end_time, sim.now(), "unexpected end time");
        assert!(!sim.is_empty(), "arrivals should still be pending past closing");
        assert!(sim.next_event_time().is_some_and(|time| *time > end_time));

        (sim.state().customers_served, sim.state().total_time_in_queue)
    }

    #[test]
    fn ordered_float_types_are_available_with_feature_enabled() {
        let (customers_served, time_in_queue) = run_sim(11434450237083315284, 1, 6.0);
        assert!(customers_served > 0, "no customers made it through the system");
        assert!(time_in_queue >= NotNan::new(0.0).expect("0 should not be NaN"));
    }

    #[test]
    fn same_seed_gives_same_results() {
        let first = run_sim(7082446179938253086, 2, 3.0);
        let second = run_sim(7082446179938253086, 2, 3.0);
        assert_eq!(first, second, "simulation is not deterministic");
    }
}
