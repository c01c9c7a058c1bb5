//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication; `/trigger` additionally requires
//! an admin token (enforced by the handler's extractor).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{notification, preference};
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /trigger            -> trigger (admin only)
/// GET    /history            -> history
/// GET    /unread             -> unread
/// POST   /read               -> mark_read
/// GET    /types              -> list_types
///
/// GET    /preferences        -> preference::list
/// POST   /preferences        -> preference::create
/// PUT    /preferences/{id}   -> preference::update
/// DELETE /preferences/{id}   -> preference::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Event fan-out and per-user delivery views
        .route("/trigger", post(notification::trigger))
        .route("/history", get(notification::history))
        .route("/unread", get(notification::unread))
        .route("/read", post(notification::mark_read))
        .route("/types", get(notification::list_types))
        // Preference CRUD
        .route(
            "/preferences",
            get(preference::list).post(preference::create),
        )
        .route(
            "/preferences/{id}",
            put(preference::update).delete(preference::delete),
        )
}
