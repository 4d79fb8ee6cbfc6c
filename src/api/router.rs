use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Protected API routes — require Bearer token when API_TOKEN is set
    let protected = Router::new()
        // Accounts
        .route(
            "/api/accounts",
            get(handlers::accounts::list).post(handlers::accounts::create),
        )
        .route(
            "/api/accounts/:id",
            get(handlers::accounts::detail).delete(handlers::accounts::remove),
        )
        .route("/api/accounts/:id/deposit", post(handlers::accounts::deposit))
        .route("/api/accounts/:id/withdraw", post(handlers::accounts::withdraw))
        // Journal entries
        .route(
            "/api/entries",
            get(handlers::entries::list).post(handlers::entries::create),
        )
        .route(
            "/api/entries/:id",
            put(handlers::entries::update).delete(handlers::entries::remove),
        )
        // Analytics
        .route(
            "/api/accounts/:id/performance",
            get(handlers::analytics::performance),
        )
        .route("/api/accounts/:id/calendar", get(handlers::analytics::calendar))
        .route("/api/accounts/:id/tags", get(handlers::analytics::tags))
        .route("/api/accounts/:id/emotions", get(handlers::analytics::emotions))
        .route("/api/accounts/:id/export", get(handlers::analytics::export))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // CORS: the journal UI may be served from a different origin in dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
