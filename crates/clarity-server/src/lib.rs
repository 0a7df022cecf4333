//! clarity-server
//!
//! Reference implementation of the patient history REST contract, served
//! from the local file store. The remote backend in `clarity-storage`
//! speaks to this.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/patients/{patient_id}/history",
            get(routes::history::list_history).post(routes::history::create_entry),
        )
        .route(
            "/patients/{patient_id}/history/{entry_id}",
            put(routes::history::update_entry).delete(routes::history::delete_entry),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
