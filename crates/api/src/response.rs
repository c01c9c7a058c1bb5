//! Shared response envelope types for API handlers.
//!
//! Read endpoints use a `{ "data": ... }` envelope; the trigger and read
//! endpoints return the fixed `{ "detail": ... }` shapes their clients
//! expect.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
