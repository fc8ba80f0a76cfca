use axum::routing::{get, patch, post};
use axum::{Extension, Router};

use super::handlers::{self, Api};

/// HTTP surface of the module. Handlers reach the module through the
/// [`Api`] extension only.
#[must_use]
pub fn router(api: Api) -> Router {
    Router::new()
        .route("/catalog/status", get(handlers::catalog_status))
        .route("/spots", get(handlers::search_spots))
        .route("/spots/{id}", get(handlers::get_spot))
        .route("/home", get(handlers::home_feed))
        .route("/courses", get(handlers::list_courses))
        .route("/courses/{id}", get(handlers::get_course))
        .route("/tags", get(handlers::list_tags))
        .route("/favorites", get(handlers::list_favorites))
        .route("/favorites/toggle", post(handlers::toggle_favorite))
        .route(
            "/spots/{id}/reviews",
            get(handlers::list_reviews).post(handlers::add_comment),
        )
        .route("/spots/{id}/reviews/visible", get(handlers::visible_reviews))
        .route(
            "/spots/{id}/reviews/{review_id}",
            patch(handlers::edit_comment).delete(handlers::delete_review),
        )
        .route("/spots/{id}/votes", post(handlers::add_vote))
        .route("/spots/{id}/summary", get(handlers::vote_summary))
        .route("/spots/{id}/favorite", get(handlers::favorite_state))
        .layer(Extension(api))
}
