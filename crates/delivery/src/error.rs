//! Error type for channel dispatch failures.

/// A per-delivery dispatch failure.
///
/// Dispatch errors are recovered at the call site and recorded in the
/// delivery row's `error_message`; they never propagate out of the fan-out
/// loop.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Message build error: {0}")]
    Build(String),

    /// Any other channel-specific failure.
    #[error("Channel failure: {0}")]
    Channel(String),
}
