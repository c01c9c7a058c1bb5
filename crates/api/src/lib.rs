//! NotifyHub HTTP API and fan-out engine.
//!
//! Library surface exists so integration tests can build the same router
//! and engine that `main.rs` serves.

pub mod auth;
pub mod config;
pub mod error;
pub mod fanout;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
