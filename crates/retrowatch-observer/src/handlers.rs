//! REST API endpoint handlers for the Observer server.
//!
//! All handlers read the engine's current snapshot, which is the latest
//! completed cycle whether or not it was broadcast.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/gamedata` | Full current snapshot |
//! | `GET` | `/api/party` | Party members |
//! | `GET` | `/api/party/{slot}` | One party member, 1-based |
//! | `GET` | `/api/player` | Trainer summary |
//! | `GET` | `/api/items` | Bag contents |
//! | `GET` | `/api/badges` | All eight badges with obtained flags |
//! | `GET` | `/api/status` | Connection health and engine counters |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing link health and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = state.engine.status();
    let snapshot = state.engine.current_snapshot();
    let health = status.health;
    let health_class = if health.is_usable() { "ok" } else { "down" };
    let trainer = if snapshot.state.player_name.is_empty() {
        String::from("--")
    } else {
        snapshot.state.player_name.clone()
    };
    let location = &snapshot.state.location_name;
    let party_size = snapshot.state.party.len();
    let generation = status.generation;
    let subscribers = status.subscriber_count;
    let started = state.started_at.format("%Y-%m-%d %H:%M:%S UTC");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Retrowatch</title>
    <style>
        body {{
            background: #0f380f;
            color: #9bbc0f;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8bac0f; margin-top: 0; }}
        .metric {{
            display: inline-block;
            border: 2px solid #306230;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ font-size: 0.85rem; }}
        .metric .value {{ font-size: 1.5rem; font-weight: bold; }}
        .ok {{ color: #9bbc0f; }}
        .down {{ color: #e04040; }}
        a {{ color: #9bbc0f; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>Retrowatch</h1>
    <p class="subtitle">Live game state mirror, up since {started}</p>

    <p>Link: <span class="{health_class}">{health}</span></p>

    <div>
        <div class="metric"><div class="label">Trainer</div><div class="value">{trainer}</div></div>
        <div class="metric"><div class="label">Location</div><div class="value">{location}</div></div>
        <div class="metric"><div class="label">Party</div><div class="value">{party_size}</div></div>
        <div class="metric"><div class="label">Generation</div><div class="value">{generation}</div></div>
        <div class="metric"><div class="label">Live clients</div><div class="value">{subscribers}</div></div>
    </div>

    <h2>API</h2>
    <ul>
        <li><a href="/api/gamedata">/api/gamedata</a></li>
        <li><a href="/api/party">/api/party</a></li>
        <li><a href="/api/player">/api/player</a></li>
        <li><a href="/api/items">/api/items</a></li>
        <li><a href="/api/badges">/api/badges</a></li>
        <li><a href="/api/status">/api/status</a></li>
        <li><code>ws://host:port/ws</code></li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/gamedata -- full snapshot
// ---------------------------------------------------------------------------

/// Return the full current snapshot.
pub async fn get_game_data(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.engine.current_snapshot();
    Ok(Json(serde_json::to_value(snapshot.as_ref())?))
}

// ---------------------------------------------------------------------------
// GET /api/party, /api/party/{slot}
// ---------------------------------------------------------------------------

/// Return every party member in slot order.
pub async fn list_party(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.engine.current_snapshot();
    Ok(Json(serde_json::to_value(&snapshot.state.party)?))
}

/// Return one party member by its 1-based party slot. A slot whose member
/// was omitted from the current snapshot is not found.
pub async fn get_party_member(
    State(state): State<Arc<AppState>>,
    Path(slot_str): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let slot: usize = slot_str
        .parse()
        .map_err(|e| ObserverError::BadRequest(format!("invalid party slot {slot_str}: {e}")))?;
    let index = slot
        .checked_sub(1)
        .ok_or_else(|| ObserverError::BadRequest(String::from("party slots start at 1")))?;

    let snapshot = state.engine.current_snapshot();
    let member = snapshot
        .state
        .party
        .iter()
        .find(|m| usize::from(m.slot) == index)
        .ok_or_else(|| ObserverError::NotFound(format!("party slot {slot}")))?;

    Ok(Json(serde_json::to_value(member)?))
}

// ---------------------------------------------------------------------------
// GET /api/player
// ---------------------------------------------------------------------------

/// Return the trainer summary: identity, money, position, play time and
/// pokedex progress.
pub async fn get_player(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.engine.current_snapshot();
    let s = &snapshot.state;
    Ok(Json(serde_json::json!({
        "name": s.player_name,
        "id": s.player_id,
        "money": s.money,
        "location": s.location_name,
        "map": s.current_map,
        "x": s.player_x,
        "y": s.player_y,
        "hours": s.hours,
        "minutes": s.minutes,
        "seconds": s.seconds,
        "badge_count": s.badge_count,
        "pokedex_seen": s.pokedex_seen,
        "pokedex_caught": s.pokedex_caught,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/items, /api/badges
// ---------------------------------------------------------------------------

/// Return the bag contents.
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.engine.current_snapshot();
    Ok(Json(serde_json::to_value(&snapshot.state.bag_items)?))
}

/// Return all badges with their obtained flags.
pub async fn list_badges(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.engine.current_snapshot();
    Ok(Json(serde_json::to_value(&snapshot.state.badges)?))
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Return link health and engine counters.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let status = state.engine.status();
    let snapshot = state.engine.current_snapshot();

    let mut body = serde_json::to_value(&status)?;
    if let Some(map) = body.as_object_mut() {
        map.insert(
            String::from("connected"),
            serde_json::Value::Bool(status.health.is_usable()),
        );
        map.insert(
            String::from("last_updated"),
            serde_json::to_value(snapshot.captured_at)?,
        );
        map.insert(
            String::from("websocket_clients"),
            serde_json::Value::from(status.subscriber_count),
        );
    }
    Ok(Json(body))
}
