//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods accept `impl PgExecutor<'_>` rather than `&PgPool` so the
//! fan-out engine can run them against an open transaction (`&mut *tx`)
//! while handlers pass the pool directly.

pub mod delivery_repo;
pub mod notification_preference_repo;
pub mod notification_repo;
pub mod notification_type_repo;
pub mod user_repo;

pub use delivery_repo::DeliveryRepo;
pub use notification_preference_repo::NotificationPreferenceRepo;
pub use notification_repo::NotificationRepo;
pub use notification_type_repo::NotificationTypeRepo;
pub use user_repo::UserRepo;
