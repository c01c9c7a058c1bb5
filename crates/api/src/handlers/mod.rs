//! Request handlers, one module per resource.

pub mod auth;
pub mod health;
pub mod notification;
pub mod preference;
