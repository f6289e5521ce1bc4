pub mod auth;
pub mod error;
pub mod pagination;
pub mod routes;
pub mod state;
pub mod timefmt;

use axum::{
    Router,
    routing::{get, post},
};
use state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// The gateway ingestion endpoint plus the operator CRUD/read API,
/// laid out one module per resource under `routes/`.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Gateway ingestion. No auth — the gateway is trusted on the
        // private network.
        .route("/gateway-endpoint", post(routes::ingest::ingest))
        // Login/bootstrap.
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/register", post(routes::auth::register))
        // Shipyards
        .route(
            "/api/shipyards",
            get(routes::shipyards::list).post(routes::shipyards::create),
        )
        .route(
            "/api/shipyards/{id}",
            get(routes::shipyards::get)
                .put(routes::shipyards::update)
                .delete(routes::shipyards::delete),
        )
        // Activator beacons, nested under their shipyard
        .route(
            "/api/shipyards/{shipyard_id}/beacons",
            get(routes::beacons::list_for_shipyard).post(routes::beacons::create),
        )
        .route(
            "/api/shipyards/{shipyard_id}/beacons/{id}",
            axum::routing::delete(routes::beacons::delete),
        )
        // Ships
        .route(
            "/api/ships",
            get(routes::ships::list).post(routes::ships::create),
        )
        .route(
            "/api/ships/{id}",
            get(routes::ships::get)
                .put(routes::ships::update)
                .delete(routes::ships::delete),
        )
        // Roles
        .route(
            "/api/roles",
            get(routes::roles::list).post(routes::roles::create),
        )
        .route("/api/roles/{id}", axum::routing::delete(routes::roles::delete))
        // Crew members
        .route(
            "/api/crew",
            get(routes::crew::list).post(routes::crew::create),
        )
        .route(
            "/api/crew/{id}",
            get(routes::crew::get)
                .put(routes::crew::update)
                .delete(routes::crew::delete),
        )
        // Tags
        .route(
            "/api/tags",
            get(routes::tags::list).post(routes::tags::create),
        )
        .route(
            "/api/tags/{id}",
            get(routes::tags::get).delete(routes::tags::delete),
        )
        // Read-side event tables
        .route("/api/entries", get(routes::entries::list))
        .route("/api/logs", get(routes::logs::list))
        // Exports
        .route("/api/exports/logs", get(routes::export::permanence_logs))
        .route("/api/exports/entries", get(routes::export::unassigned_entries))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
