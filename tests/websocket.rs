// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Integration tests for the IG streaming client using a mock Axum WebSocket server.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::any,
};
use ig_trading::{
    common::enums::IgSubscriptionMode,
    config::IgClientConfig,
    session::{IgAuthenticationData, IgSession},
    websocket::{
        client::IgStreamingClient,
        error::IgStreamingError,
        messages::SubscriptionEvent,
    },
};
use rstest::rstest;
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct TestServerState {
    frames: Arc<tokio::sync::Mutex<Vec<Value>>>,
}

impl TestServerState {
    async fn frames(&self) -> Vec<Value> {
        self.frames.lock().await.clone()
    }

    async fn frames_of_type(&self, frame_type: &str) -> Vec<Value> {
        self.frames()
            .await
            .into_iter()
            .filter(|f| f["type"] == frame_type)
            .collect()
    }
}

async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<TestServerState>,
) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: TestServerState) {
    while let Some(Ok(message)) = socket.recv().await {
        let Message::Text(text) = message else {
            continue;
        };
        let Ok(frame) = serde_json::from_str::<Value>(&text) else {
            continue;
        };
        state.frames.lock().await.push(frame.clone());

        match frame["type"].as_str() {
            Some("auth") => {
                let status = json!({"type": "status", "status": "CONNECTED:WS-STREAMING"});
                if socket
                    .send(Message::Text(status.to_string().into()))
                    .await
                    .is_err()
                {
                    break;
                }
            }
            Some("subscribe") => {
                let id = frame["id"].as_str().unwrap_or_default().to_string();
                let item = frame["items"][0].as_str().unwrap_or_default().to_string();

                // Identifiers prefixed "bad" are rejected at the subscription level
                let reply = if id.starts_with("bad") {
                    json!({
                        "type": "subscription_error",
                        "id": id,
                        "code": 17,
                        "message": "Invalid item",
                    })
                } else {
                    json!({
                        "type": "update",
                        "id": id,
                        "item": item,
                        "fields": {"BID": "6084.2", "OFFER": "6085.2"},
                    })
                };
                if socket
                    .send(Message::Text(reply.to_string().into()))
                    .await
                    .is_err()
                {
                    break;
                }
            }
            _ => {}
        }
    }
}

async fn start_test_server() -> (SocketAddr, TestServerState) {
    let state = TestServerState::default();
    let router = Router::new()
        .route("/stream", any(handle_websocket))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });

    (addr, state)
}

fn authenticated_session(addr: SocketAddr) -> IgSession {
    let session = IgSession::new();
    session.set_authentication_data(IgAuthenticationData {
        account_token: Some("A".to_string()),
        client_token: Some("C".to_string()),
        lightstreamer_endpoint: Some(format!("ws://{addr}/stream")),
        api_key: Some("key-123".to_string()),
        account_id: Some("PAR44".to_string()),
    });
    session
}

async fn connected_client(addr: SocketAddr) -> IgStreamingClient {
    let client = IgStreamingClient::new(
        &IgClientConfig::default(),
        authenticated_session(addr),
    );
    let mut status_rx = client.connect().await.unwrap();

    // Wait for the auth round trip to complete
    tokio::time::timeout(Duration::from_secs(5), status_rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status_rx.borrow().as_str(), "CONNECTED:WS-STREAMING");

    client
}

async fn recv_event(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<SubscriptionEvent>,
) -> Option<SubscriptionEvent> {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("Timed out waiting for event")
}

#[rstest]
#[tokio::test]
async fn test_connect_authenticates_with_composed_password() {
    let (addr, state) = start_test_server().await;
    let client = connected_client(addr).await;

    let auth_frames = state.frames_of_type("auth").await;
    assert_eq!(auth_frames.len(), 1);
    assert_eq!(auth_frames[0]["user"], "PAR44");
    assert_eq!(auth_frames[0]["password"], "CST-C|XST-A");

    assert!(client.is_connected().await);
    assert!(client.is_streaming().await);
}

#[rstest]
#[tokio::test]
async fn test_connect_fails_fast_without_endpoint() {
    let session = IgSession::new();
    session.set_authentication_data(IgAuthenticationData {
        account_token: Some("A".to_string()),
        client_token: Some("C".to_string()),
        account_id: Some("PAR44".to_string()),
        ..Default::default()
    });
    let client = IgStreamingClient::new(&IgClientConfig::default(), session);

    let result = client.connect().await;
    assert!(matches!(
        result,
        Err(IgStreamingError::AuthenticationRequired)
    ));
}

#[rstest]
#[tokio::test]
async fn test_subscribe_delivers_start_and_updates() {
    let (addr, state) = start_test_server().await;
    let client = connected_client(addr).await;

    let mut events = client
        .subscribe(
            "prices",
            IgSubscriptionMode::Merge,
            vec!["L1:IX.D.FTSE.DAILY.IP".to_string()],
            vec!["BID".to_string(), "OFFER".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(recv_event(&mut events).await, Some(SubscriptionEvent::Start));

    match recv_event(&mut events).await {
        Some(SubscriptionEvent::Update(update)) => {
            assert_eq!(update.item, "L1:IX.D.FTSE.DAILY.IP");
            assert_eq!(update.fields.get("BID").map(String::as_str), Some("6084.2"));
        }
        other => panic!("Expected Update, was {other:?}"),
    }

    assert!(client.has_subscription("prices"));
    assert_eq!(client.subscription_count(), 1);

    let subscribe_frames = state.frames_of_type("subscribe").await;
    assert_eq!(subscribe_frames.len(), 1);
    assert_eq!(subscribe_frames[0]["mode"], "MERGE");
}

#[rstest]
#[tokio::test]
async fn test_resubscribe_replaces_previous_subscription() {
    let (addr, state) = start_test_server().await;
    let client = connected_client(addr).await;

    let mut first = client
        .subscribe(
            "prices",
            IgSubscriptionMode::Merge,
            vec!["L1:IX.D.FTSE.DAILY.IP".to_string()],
            vec!["BID".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(recv_event(&mut first).await, Some(SubscriptionEvent::Start));

    let mut second = client
        .subscribe(
            "prices",
            IgSubscriptionMode::Distinct,
            vec!["L1:CS.D.EURUSD.TODAY.IP".to_string()],
            vec!["BID".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(recv_event(&mut second).await, Some(SubscriptionEvent::Start));

    // The first channel closes once its registration is replaced
    loop {
        match tokio::time::timeout(Duration::from_secs(5), first.recv())
            .await
            .expect("Timed out waiting for channel close")
        {
            Some(_) => continue,
            None => break,
        }
    }

    assert_eq!(client.subscription_count(), 1);

    // The gateway was told to drop the old registration before the new subscribe
    let frames = state.frames().await;
    let unsubscribe_position = frames
        .iter()
        .position(|f| f["type"] == "unsubscribe")
        .expect("Expected an unsubscribe frame");
    let second_subscribe_position = frames
        .iter()
        .rposition(|f| f["type"] == "subscribe")
        .unwrap();
    assert!(unsubscribe_position < second_subscribe_position);
}

#[rstest]
#[tokio::test]
async fn test_unsubscribe_removes_registration() {
    let (addr, state) = start_test_server().await;
    let client = connected_client(addr).await;

    let mut events = client
        .subscribe(
            "prices",
            IgSubscriptionMode::Merge,
            vec!["L1:IX.D.FTSE.DAILY.IP".to_string()],
            vec!["BID".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(recv_event(&mut events).await, Some(SubscriptionEvent::Start));

    client.unsubscribe("prices").await;
    assert!(!client.has_subscription("prices"));

    // Drain: the channel closes once the registration is removed
    loop {
        match tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("Timed out waiting for channel close")
        {
            Some(_) => continue,
            None => break,
        }
    }

    let unsubscribe_frames = state.frames_of_type("unsubscribe").await;
    assert_eq!(unsubscribe_frames.len(), 1);
    assert_eq!(unsubscribe_frames[0]["id"], "prices");

    // Unknown identifiers are a no-op
    client.unsubscribe("unknown").await;
    assert_eq!(state.frames_of_type("unsubscribe").await.len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_subscription_error_does_not_affect_others() {
    let (addr, _state) = start_test_server().await;
    let client = connected_client(addr).await;

    let mut good = client
        .subscribe(
            "prices",
            IgSubscriptionMode::Merge,
            vec!["L1:IX.D.FTSE.DAILY.IP".to_string()],
            vec!["BID".to_string()],
        )
        .await
        .unwrap();
    let mut bad = client
        .subscribe(
            "bad-item",
            IgSubscriptionMode::Merge,
            vec!["L1:NO.SUCH.EPIC".to_string()],
            vec!["BID".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(recv_event(&mut bad).await, Some(SubscriptionEvent::Start));
    match recv_event(&mut bad).await {
        Some(SubscriptionEvent::Error { code, message }) => {
            assert_eq!(code, 17);
            assert_eq!(message, "Invalid item");
        }
        other => panic!("Expected Error, was {other:?}"),
    }

    // The healthy subscription still receives its events
    assert_eq!(recv_event(&mut good).await, Some(SubscriptionEvent::Start));
    assert!(matches!(
        recv_event(&mut good).await,
        Some(SubscriptionEvent::Update(_))
    ));
    assert!(client.has_subscription("prices"));
}

#[rstest]
#[tokio::test]
async fn test_disconnect_closes_channels_and_clears_registry() {
    let (addr, _state) = start_test_server().await;
    let client = connected_client(addr).await;

    let mut events = client
        .subscribe(
            "prices",
            IgSubscriptionMode::Merge,
            vec!["L1:IX.D.FTSE.DAILY.IP".to_string()],
            vec!["BID".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(recv_event(&mut events).await, Some(SubscriptionEvent::Start));

    client.disconnect().await;

    assert!(!client.is_connected().await);
    assert_eq!(client.subscription_count(), 0);

    // Drain: the event channel ends after disconnect
    loop {
        match tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("Timed out waiting for channel close")
        {
            Some(_) => continue,
            None => break,
        }
    }
}

#[rstest]
#[tokio::test]
async fn test_status_channel_reports_disconnect() {
    let (addr, _state) = start_test_server().await;
    let client = IgStreamingClient::new(
        &IgClientConfig::default(),
        authenticated_session(addr),
    );

    let mut status_rx = client.connect().await.unwrap();

    // Wait for the auth round trip before tearing down
    tokio::time::timeout(Duration::from_secs(5), status_rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status_rx.borrow().as_str(), "CONNECTED:WS-STREAMING");

    client.disconnect().await;
    assert_eq!(status_rx.borrow().as_str(), "DISCONNECTED");
}
