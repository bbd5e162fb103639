use axum::{middleware, Json, Router};
use chrono::Utc;
use std::sync::Arc;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use crate::accounts::{login, registration};
use crate::auth::middleware::JwtSecret;
use crate::learning::routes as learning_routes;
use crate::mentor::routes as mentor_routes;
use crate::state::AppState;
use crate::ws::handler as ws_handler;

/// Inject the JWT secret into request extensions so the Claims extractor can find it.
async fn inject_jwt_secret(
    axum::extract::State(state): axum::extract::State<AppState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    req.extensions_mut()
        .insert(JwtSecret(state.jwt_secret.clone()));
    next.run(req).await
}

/// Build the full axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Rate limiting: 5 requests per minute per IP on auth endpoints
    // Uses PeerIpKeyExtractor which reads from ConnectInfo<SocketAddr>
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(12) // 1 token every 12 seconds = 5 per minute
            .burst_size(5) // Allow burst of 5
            .finish()
            .expect("Failed to build governor config"),
    );
    let governor_limiter = governor_config.limiter().clone();

    // Spawn background task to clean up rate limiter state
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            governor_limiter.retain_recent();
        }
    });

    // Auth routes with rate limiting
    let auth_routes = Router::new()
        .route(
            "/api/auth/register",
            axum::routing::post(registration::register),
        )
        .route("/api/auth/login", axum::routing::post(login::login))
        .layer(GovernorLayer::new(governor_config));

    // Authenticated routes (JWT required — Claims extractor validates token)
    let authenticated_routes = Router::new()
        .route("/api/auth/profile", axum::routing::get(login::profile))
        .route(
            "/api/learning-path/generate",
            axum::routing::post(learning_routes::generate_path),
        )
        .route(
            "/api/learning-path",
            axum::routing::get(learning_routes::list_paths),
        )
        .route(
            "/api/chat/mentor",
            axum::routing::post(mentor_routes::mentor_chat),
        );

    // WebSocket endpoint (identity asserted in-band via join-chat)
    let ws_routes = Router::new().route("/ws", axum::routing::get(ws_handler::ws_upgrade));

    // Health check
    let health = Router::new().route("/healthz", axum::routing::get(health_check));

    Router::new()
        .merge(auth_routes)
        .merge(authenticated_routes)
        .merge(ws_routes)
        .merge(health)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            inject_jwt_secret,
        ))
        .with_state(state)
}

/// Basic health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now(),
    }))
}
