use crate::{SimTime, Tick};

/// Construction parameters for a [`Simulation`].
///
/// Everything here has a sensible default, so most clients will reach for [`Simulation::new()`] instead and only build
/// a config when they need ids to start somewhere other than zero (for example, to keep handles from two replications
/// visually distinct in logs) or want to pre-size the event heap for a known workload.
///
/// With the `serde` feature enabled this struct can be deserialized from a harness's own configuration files.
///
/// [`Simulation`]: crate::Simulation
/// [`Simulation::new()`]: crate::Simulation::new
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig<Time = Tick>
where
    Time: SimTime,
{
    /// Initial value of the clock.
    pub start_time: Time,
    /// Raw value of the first [`EventId`] handed out. Later ids count up from here.
    ///
    /// [`EventId`]: crate::EventId
    #[cfg_attr(feature = "serde", serde(default))]
    pub first_event_id: u64,
    /// Number of events the heap can hold before reallocating.
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_capacity: usize,
}

impl<Time> SimulationConfig<Time>
where
    Time: SimTime,
{
    /// A config with the given start time and default values for everything else.
    pub fn new(start_time: Time) -> Self {
        Self {
            start_time,
            first_event_id: 0,
            initial_capacity: 0,
        }
    }

    pub fn with_start_time(mut self, start_time: Time) -> Self {
        self.start_time = start_time;
        self
    }

    /// Start minting ids at `first_event_id`.
    ///
    /// Ids never wrap: a queue built from this config panics when asked to schedule after id `u64::MAX` has been
    /// issued, so a start near `u64::MAX` bounds how many events the simulation can ever schedule. See
    /// [`EventQueue::schedule_at()`].
    ///
    /// [`EventQueue::schedule_at()`]: crate::EventQueue::schedule_at
    pub fn with_first_event_id(mut self, first_event_id: u64) -> Self {
        self.first_event_id = first_event_id;
        self
    }

    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl<Time> Default for SimulationConfig<Time>
where
    Time: SimTime + Default,
{
    fn default() -> Self {
        Self::new(Time::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_starts_at_zero() {
        let config: SimulationConfig = SimulationConfig::default();
        assert_eq!(0, config.start_time);
        assert_eq!(0, config.first_event_id);
        assert_eq!(0, config.initial_capacity);
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = SimulationConfig::new(5_u32).with_first_event_id(100).with_capacity(64).with_start_time(7);
        assert_eq!(
            SimulationConfig {
                start_time: 7,
                first_event_id: 100,
                initial_capacity: 64,
            },
            config
        );
    }
}
