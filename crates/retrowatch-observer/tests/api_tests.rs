//! Integration tests for the Observer API endpoints.
//!
//! Route tests use Axum's `Router` directly via `tower::ServiceExt`
//! without starting a TCP server; only the lifecycle test binds a real
//! socket. The engine handle is assembled from a store,
//! a hub and a fixed link status, so no poll loop runs.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use retrowatch_core::engine::{EngineHandle, LinkStatus};
use retrowatch_core::hub::BroadcastHub;
use retrowatch_core::orchestrator::CycleReport;
use retrowatch_core::store::SnapshotStore;
use retrowatch_observer::router::build_router;
use retrowatch_observer::state::AppState;
use retrowatch_observer::{ServerConfig, spawn_observer};
use retrowatch_types::{
    Badge, BagItem, ConnectionHealth, GameSnapshot, GameState, MoveSlot, PartyMember,
};
use serde_json::Value;
use tokio::sync::watch;
use tower::ServiceExt;

struct FixedLink(ConnectionHealth);

impl LinkStatus for FixedLink {
    fn health(&self) -> ConnectionHealth {
        self.0
    }

    fn consecutive_failures(&self) -> u32 {
        0
    }
}

fn member(slot: u8, species: u8, name: &str, level: u8, current_hp: u16, max_hp: u16) -> PartyMember {
    PartyMember {
        slot,
        species,
        name: String::from(name),
        level,
        current_hp,
        max_hp,
        moves: vec![MoveSlot {
            id: 33,
            name: String::from("TACKLE"),
        }],
        ..PartyMember::default()
    }
}

fn sample_state() -> GameState {
    GameState {
        player_name: String::from("RED"),
        player_id: 12345,
        money: 3000,
        team_count: 2,
        current_map: 1,
        location_name: String::from("VIRIDIAN CITY"),
        player_x: 7,
        player_y: 12,
        badges: vec![
            Badge {
                name: String::from("BOULDER"),
                obtained: true,
            },
            Badge {
                name: String::from("CASCADE"),
                obtained: false,
            },
        ],
        badge_count: 1,
        hours: 3,
        minutes: 41,
        seconds: 9,
        bag_item_count: 1,
        bag_items: vec![BagItem {
            slot: 0,
            id: 4,
            name: String::from("POKE BALL"),
            quantity: 5,
        }],
        party: vec![
            member(0, 176, "CHARMANDER", 12, 30, 35),
            member(1, 36, "PIDGEY", 5, 0, 19),
        ],
        ..GameState::default()
    }
}

fn make_test_state() -> (Arc<AppState>, Arc<BroadcastHub>) {
    state_with(sample_state())
}

fn state_with(state: GameState) -> (Arc<AppState>, Arc<BroadcastHub>) {
    let store = Arc::new(SnapshotStore::default());
    let snapshot = GameSnapshot {
        generation: 4,
        captured_at: Utc::now(),
        state,
    };
    let report = CycleReport {
        fresh_reads: 10,
        stale_fields: vec![String::from("money")],
    };
    store.commit(Arc::new(snapshot), &report);

    let hub = Arc::new(BroadcastHub::new(4));
    let link: Arc<dyn LinkStatus> = Arc::new(FixedLink(ConnectionHealth::Connected));
    let engine = EngineHandle::new(store, Arc::clone(&hub), link);
    (Arc::new(AppState::new(engine)), hub)
}

async fn get(path: &str) -> (StatusCode, Value) {
    let (state, _hub) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let (state, _hub) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("RED"));
    assert!(page.contains("VIRIDIAN CITY"));
    assert!(page.contains("connected"));
}

#[tokio::test]
async fn test_get_game_data() {
    let (status, json) = get("/api/gamedata").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["generation"], 4);
    assert_eq!(json["player_name"], "RED");
    assert_eq!(json["money"], 3000);
    assert_eq!(json["pokemon"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_party() {
    let (status, json) = get("/api/party").await;

    assert_eq!(status, StatusCode::OK);
    let party = json.as_array().unwrap();
    assert_eq!(party.len(), 2);
    assert_eq!(party[0]["name"], "CHARMANDER");
    assert_eq!(party[0]["slot"], 0);
    assert_eq!(party[1]["slot"], 1);
    assert_eq!(party[1]["current_hp"], 0);
}

#[tokio::test]
async fn test_party_lookup_follows_slot_after_omission() {
    // Slot 0 was omitted, so Pidgey sits first in the list but keeps slot 1.
    let mut state = sample_state();
    state.party.remove(0);
    let (app, _hub) = state_with(state);

    let response = build_router(Arc::clone(&app))
        .oneshot(Request::get("/api/party/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = build_router(app)
        .oneshot(Request::get("/api/party/2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["name"], "PIDGEY");
}

#[tokio::test]
async fn test_pokemon_alias_matches_party() {
    let (_, party) = get("/api/party").await;
    let (status, alias) = get("/api/pokemon").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(party, alias);
}

#[tokio::test]
async fn test_party_slot_is_one_based() {
    let (status, json) = get("/api/party/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "CHARMANDER");
    assert_eq!(json["moves"][0]["name"], "TACKLE");

    let (status, json) = get("/api/party/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "PIDGEY");
}

#[tokio::test]
async fn test_party_slot_zero_is_bad_request() {
    let (status, json) = get("/api/party/0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_party_slot_not_a_number_is_bad_request() {
    let (status, _) = get("/api/party/lead").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_party_slot_out_of_range_is_not_found() {
    let (status, json) = get("/api/party/3").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_get_player() {
    let (status, json) = get("/api/player").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "RED");
    assert_eq!(json["id"], 12345);
    assert_eq!(json["location"], "VIRIDIAN CITY");
    assert_eq!(json["x"], 7);
    assert_eq!(json["y"], 12);
    assert_eq!(json["minutes"], 41);
    assert_eq!(json["badge_count"], 1);
}

#[tokio::test]
async fn test_list_items() {
    let (status, json) = get("/api/items").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["name"], "POKE BALL");
    assert_eq!(json[0]["quantity"], 5);
}

#[tokio::test]
async fn test_list_badges() {
    let (status, json) = get("/api/badges").await;

    assert_eq!(status, StatusCode::OK);
    let badges = json.as_array().unwrap();
    assert_eq!(badges.len(), 2);
    assert_eq!(badges[0]["obtained"], true);
    assert_eq!(badges[1]["obtained"], false);
}

#[tokio::test]
async fn test_get_status() {
    let (status, json) = get("/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["health"], "connected");
    assert_eq!(json["connected"], true);
    assert_eq!(json["generation"], 4);
    assert_eq!(json["cycles_completed"], 1);
    assert_eq!(json["stale_fields_last_cycle"], 1);
    assert_eq!(json["websocket_clients"], 0);
    assert!(json["last_successful_cycle"].is_string());
}

#[tokio::test]
async fn test_status_counts_registered_subscribers() {
    let (state, hub) = make_test_state();
    let (_id, _rx) = hub.register();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["subscriber_count"], 1);
    assert_eq!(json["websocket_clients"], 1);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (state, _hub) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_spawned_observer_stops_on_signal() {
    let (state, _hub) = make_test_state();
    let config = ServerConfig {
        host: String::from("127.0.0.1"),
        port: 0,
    };
    let (stop, stop_rx) = watch::channel(false);

    let handle = spawn_observer(&config, state, stop_rx).await.unwrap();
    stop.send(true).unwrap();

    tokio::time::timeout(Duration::from_secs(5), handle.task)
        .await
        .unwrap()
        .unwrap();
}
