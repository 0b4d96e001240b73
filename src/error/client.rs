use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClientError {
    /// The client accessor was called before the client was constructed.
    #[error("Discord client is not ready yet")]
    NotReady,

    /// A second client was installed into a provider that already owns one.
    #[error("Discord client has already been constructed")]
    AlreadyConstructed,
}
