use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod validate;

use auth::TokenIssuer;
use config::AppConfig;
use database::UserStore;
use middleware::ApiResponse;

/// Shared request-handling state: read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub tokens: TokenIssuer,
    pub static_token: String,
}

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL and the secrets.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("refusing to start: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("starting account API in {:?} mode", config.environment);

    let pool = match database::pool(&config.database) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("invalid database configuration: {}", e);
            std::process::exit(1);
        }
    };
    database::prepare(&pool).await;

    let state = AppState {
        store: UserStore::new(
            pool.clone(),
            Duration::from_secs(config.database.query_timeout_secs),
        ),
        tokens: TokenIssuer::from_config(&config.security),
        static_token: config.security.static_token.clone(),
    };

    let app = app(state, config.security.gate_public_routes);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("account API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    pool.close().await;
    tracing::info!("database pool closed");
}

fn app(state: AppState, gate_public_routes: bool) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(profile_routes(state.clone()))
        .merge(public_routes(state.clone(), gate_public_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Registration, login and token refresh, plus the catch-all 404. The
/// static-token gate in front of them is deployment configuration: both
/// gates are composable and GATE_PUBLIC_ROUTES picks the wiring.
fn public_routes(state: AppState, gated: bool) -> Router<AppState> {
    let router = Router::new()
        .route(
            "/api/register",
            post(handlers::register).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/login",
            post(handlers::login).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/refresh-token",
            post(handlers::refresh_token).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found);

    if gated {
        router.layer(axum::middleware::from_fn_with_state(
            state,
            middleware::static_token_gate,
        ))
    } else {
        router
    }
}

/// Profile operations, always behind the per-user session gate.
fn profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/profile",
            get(handlers::get_profile)
                .patch(handlers::patch_profile)
                .put(handlers::put_profile)
                .fallback(handlers::method_not_allowed),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::user_session_gate,
        ))
}

async fn health() -> ApiResponse<Value> {
    ApiResponse::success(json!({ "status": "up" }))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
