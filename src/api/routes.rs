use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::{require_admin, AppState};

use super::admin::{admin_login, admin_logout, admin_queue, admin_remove};
use super::health::{health, stats};
use super::metrics::prometheus_metrics;
use super::queue::{join, legacy_position, status};

pub fn api_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/queue", get(admin_queue))
        .route("/remove", post(admin_remove))
        .route("/logout", post(admin_logout))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
        .route("/login", post(admin_login));

    Router::new()
        // Health & Stats
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/metrics", get(prometheus_metrics))
        // Queue endpoints
        .nest(
            "/api",
            Router::new()
                .route("/join", post(join))
                .route("/status/{device_id}", get(status))
                .nest("/admin", admin),
        )
        // Aliases kept for the original web form
        .route("/join", post(join))
        .route("/position", post(legacy_position))
}
