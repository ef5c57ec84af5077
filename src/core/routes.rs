// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(crate::handlers::login::login_handler))
        .route(
            "/users",
            get(crate::handlers::users::list_users_handler)
                .post(crate::handlers::users::create_user_handler),
        )
        .route(
            "/users/{id}",
            get(crate::handlers::user_item::get_user_handler)
                .put(crate::handlers::user_item::update_user_handler)
                .delete(crate::handlers::user_item::delete_user_handler),
        )
        .route("/health", get(crate::handlers::health::health_handler))

        // JSON 404 for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
