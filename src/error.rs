/// Errors that may be encountered while executing a simulation.
///
/// The engine itself never fails: scheduling, cancelling and popping are total over their inputs. The only source of
/// errors is client code, so the single [`BadExecution`] variant wraps whatever a fallible action reported and carries
/// it back out of [`Simulation::run()`], [`Simulation::run_until()`] or [`Simulation::step()`] in a type-safe manner.
/// Invoking [`std::error::Error::source()`] on this variant will acquire a shared reference to the wrapped error for
/// handling on the client side.
///
/// [`Simulation::run()`]: crate::Simulation::run
/// [`Simulation::run_until()`]: crate::Simulation::run_until
/// [`Simulation::step()`]: crate::Simulation::step
/// [`BadExecution`]: Error::BadExecution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A client-generated error was encountered while executing an action. Call [`source()`] or unpack this value to
    /// handle it directly.
    ///
    /// [`source()`]: #method.source
    #[error("error while executing event: {0}")]
    BadExecution(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wrap a client error, or anything convertible into a boxed error such as a `String` or `&str`.
    pub fn bad_execution<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::BadExecution(error.into())
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::BadExecution(e1), Error::BadExecution(e2)) => {
                // compare data addresses only, vtable pointers may differ across codegen units
                let e1: *const dyn std::error::Error = e1.as_ref();
                let e2: *const dyn std::error::Error = e2.as_ref();
                std::ptr::eq(e1 as *const (), e2 as *const ())
            },
        }
    }
}

impl Eq for Error {}

/// [`std::result::Result`]`<T, `[`tickwise::Error`]`>`, defaulting to `T = ()`.
///
/// Fallible actions return the default form; [`Simulation::step()`] returns `Result<bool>`.
///
/// [`tickwise::Error`]: Error
/// [`Simulation::step()`]: crate::Simulation::step
pub type Result<T = ()> = std::result::Result<T, Error>;
