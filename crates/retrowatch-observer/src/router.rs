//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS enabled so browser overlays on other origins can poll it.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws` -- `WebSocket` change event stream
/// - `GET /api/gamedata` -- full current snapshot
/// - `GET /api/party` -- party members
/// - `GET /api/party/{slot}` -- one party member, 1-based
/// - `GET /api/player` -- trainer summary
/// - `GET /api/items` -- bag contents
/// - `GET /api/badges` -- badges
/// - `GET /api/status` -- link health and counters
///
/// `/api/pokemon` and `/api/pokemon/{slot}` are kept as aliases of the
/// party routes for existing overlays.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws", get(ws::ws_updates))
        // REST API
        .route("/api/gamedata", get(handlers::get_game_data))
        .route("/api/party", get(handlers::list_party))
        .route("/api/party/{slot}", get(handlers::get_party_member))
        .route("/api/pokemon", get(handlers::list_party))
        .route("/api/pokemon/{slot}", get(handlers::get_party_member))
        .route("/api/player", get(handlers::get_player))
        .route("/api/items", get(handlers::list_items))
        .route("/api/badges", get(handlers::list_badges))
        .route("/api/status", get(handlers::get_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
