//! Domain types shared across the NotifyHub workspace.
//!
//! This crate holds the closed vocabularies of the notification system
//! (channels, trigger events, delivery statuses), the shared ID and
//! timestamp aliases, and the [`error::CoreError`] taxonomy that the API
//! layer maps onto HTTP status codes.

pub mod channel;
pub mod error;
pub mod event;
pub mod status;
pub mod types;
