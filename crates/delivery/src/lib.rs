//! Channel transports for notification delivery.
//!
//! This crate is the seam between the fan-out engine and the outside
//! world:
//!
//! - [`ChannelTransport`] — one async send operation per channel
//!   implementation.
//! - [`Dispatcher`] — routes an [`OutboundMessage`] to the transport for a
//!   [`Channel`](notifyhub_core::channel::Channel).
//! - [`in_app`] / [`email`] / [`sms`] — the three built-in transports.
//!
//! Transports report success or failure; recording that outcome in the
//! delivery ledger is the caller's job, so a transport failure can never
//! abort sibling deliveries.

pub mod email;
pub mod error;
pub mod in_app;
pub mod message;
pub mod sms;
pub mod transport;

pub use email::{EmailConfig, EmailTransport};
pub use error::DispatchError;
pub use in_app::InAppTransport;
pub use message::OutboundMessage;
pub use sms::SmsTransport;
pub use transport::{ChannelTransport, Dispatcher};
