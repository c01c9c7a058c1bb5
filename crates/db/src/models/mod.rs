//! Entity models and DTOs, one module per resource.

pub mod notification;
pub mod user;
