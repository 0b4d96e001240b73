use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The same handler method was marked more than once.
    ///
    /// A method may carry exactly one marker; marking it again, whether with the
    /// same or the other marker, is rejected.
    #[error("Handler {method} on {owner} is already marked")]
    DuplicateHandler {
        /// Type name of the gateway declaring the handler
        owner: &'static str,
        /// Fully-qualified name of the handler method
        method: &'static str,
    },

    /// An event name does not match any subscribable event.
    #[error("Unknown event name: {0}")]
    UnknownEvent(String),
}
