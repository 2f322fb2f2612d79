use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use campus_shared::middleware::metrics_middleware;

use crate::store::Store;
use crate::AppState;

pub mod health;
pub mod messages;
pub mod users;

pub fn router<S: Store>(state: Arc<AppState<S>>) -> Router {
    let mut app = Router::new()
        // Health
        .route("/health", get(health::health_check::<S>))
        // Messages
        .route("/api/messages/between", get(messages::get_messages_between::<S>))
        .route("/api/messages/send", post(messages::send_message::<S>))
        // Users
        .route("/api/users/exists/:username", get(users::user_exists::<S>))
        .route("/api/users/:username", get(users::get_user::<S>));

    if state.metrics.is_some() {
        app = app.route("/metrics", get(health::metrics::<S>));
    }

    app.layer(middleware::from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
