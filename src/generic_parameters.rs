use std::fmt::Debug;

/// The default clock type: an indivisible, non-negative unit of logical simulation time.
pub type Tick = u64;

/// The generic type used for a simulation's clock.
///
/// Kept generic to support as many variations of clock as possible. This trait is a superset of [`Ord`], [`Clone`] and
/// [`Debug`] with no additional requirements or functionality.
///
/// Events execute in ascending order of execution time as determined by your type's implementation of [`Ord`]. Ties are
/// always broken by the [`EventId`] each event received when it was scheduled, so two events at equal times run in the
/// order they were created regardless of how the underlying heap treats equal keys.
///
/// [`Clone`] lets [`Simulation::now()`] hand out the clock by value and lets [`Simulation::schedule_after()`] compute
/// `now + delay`. [`Debug`] is used when logging and when printing an [`EventQueue`].
///
/// Implementations are provided for integral builtin types, but not for floating-point builtin types as the latter do
/// not implement [`Ord`]. If you wish to use either [`f32`] or [`f64`] as your [`SimTime`], either enable the
/// `ordered-float` feature (and so add a dependency on the [`ordered-float`] crate) to gain access to an implementation
/// on the [`OrderedFloat`] and [`NotNan`] structs, or create your own wrapper that guarantees full ordering.
///
/// [`EventId`]: crate::EventId
/// [`EventQueue`]: crate::EventQueue
/// [`Simulation::now()`]: crate::Simulation::now
/// [`Simulation::schedule_after()`]: crate::Simulation::schedule_after
/// [`ordered-float`]: https://docs.rs/ordered-float/4
/// [`OrderedFloat`]: https://docs.rs/ordered-float/4/ordered_float/struct.OrderedFloat.html
/// [`NotNan`]: https://docs.rs/ordered-float/4/ordered_float/struct.NotNan.html
pub trait SimTime: Ord + Clone + Debug {}

impl SimTime for u8 {}
impl SimTime for u16 {}
impl SimTime for u32 {}
impl SimTime for u64 {}
impl SimTime for u128 {}
impl SimTime for usize {}
impl SimTime for i8 {}
impl SimTime for i16 {}
impl SimTime for i32 {}
impl SimTime for i64 {}
impl SimTime for i128 {}
impl SimTime for isize {}

#[cfg(feature = "ordered-float")]
impl<Float> SimTime for ordered_float::OrderedFloat<Float> where Float: ordered_float::FloatCore + Debug {}

#[cfg(feature = "ordered-float")]
impl<Float> SimTime for ordered_float::NotNan<Float> where Float: ordered_float::FloatCore + Debug {}
