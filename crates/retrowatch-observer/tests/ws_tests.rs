//! End-to-end tests for the `/ws` stream.
//!
//! Each test binds a real listener on an ephemeral port through
//! [`spawn_observer`] and talks to it with a `tokio-tungstenite` client,
//! watching the hub's subscriber set from the outside.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt as _;
use retrowatch_core::engine::{EngineHandle, LinkStatus};
use retrowatch_core::hub::BroadcastHub;
use retrowatch_core::store::SnapshotStore;
use retrowatch_observer::{AppState, ObserverHandle, ServerConfig, spawn_observer};
use retrowatch_types::{ChangeEvent, ConnectionHealth, GameSnapshot};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(5);

struct FixedLink;

impl LinkStatus for FixedLink {
    fn health(&self) -> ConnectionHealth {
        ConnectionHealth::Connected
    }

    fn consecutive_failures(&self) -> u32 {
        0
    }
}

async fn start() -> (ObserverHandle, Arc<BroadcastHub>, watch::Sender<bool>) {
    let hub = Arc::new(BroadcastHub::new(4));
    let engine = EngineHandle::new(
        Arc::new(SnapshotStore::default()),
        Arc::clone(&hub),
        Arc::new(FixedLink),
    );
    let config = ServerConfig {
        host: String::from("127.0.0.1"),
        port: 0,
    };
    let (stop, stop_rx) = watch::channel(false);
    let observer = spawn_observer(&config, Arc::new(AppState::new(engine)), stop_rx)
        .await
        .unwrap();
    (observer, hub, stop)
}

async fn connect(addr: SocketAddr) -> Client {
    let (ws, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    ws
}

/// Poll until the hub holds exactly `n` subscribers.
async fn wait_for_subscribers(hub: &BroadcastHub, n: usize) {
    tokio::time::timeout(WAIT, async {
        while hub.subscriber_count() != n {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
}

async fn stop(observer: ObserverHandle, stop: &watch::Sender<bool>) {
    stop.send(true).unwrap();
    tokio::time::timeout(WAIT, observer.task)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn client_close_deregisters_subscriber() {
    let (observer, hub, stop_tx) = start().await;
    let mut ws = connect(observer.local_addr).await;
    wait_for_subscribers(&hub, 1).await;

    let event = Arc::new(ChangeEvent::new(Arc::new(GameSnapshot::bootstrap())));
    assert_eq!(hub.publish(&event).delivered, 1);
    let frame = tokio::time::timeout(WAIT, ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let text = frame.into_text().unwrap();
    let json: Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(json["type"], "game_update");
    assert_eq!(json["generation"], 0);

    ws.close(None).await.unwrap();
    wait_for_subscribers(&hub, 0).await;

    stop(observer, &stop_tx).await;
}

#[tokio::test]
async fn closing_the_hub_sends_going_away() {
    let (observer, hub, stop_tx) = start().await;
    let mut ws = connect(observer.local_addr).await;
    wait_for_subscribers(&hub, 1).await;

    assert_eq!(hub.close_all(), 1);

    let frame = tokio::time::timeout(WAIT, ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(
        matches!(
            &frame,
            Message::Close(Some(close))
                if u16::from(close.code) == 1001 && close.reason.as_str() == "stream closed"
        ),
        "unexpected frame: {frame:?}"
    );
    assert_eq!(hub.subscriber_count(), 0);

    stop(observer, &stop_tx).await;
}
