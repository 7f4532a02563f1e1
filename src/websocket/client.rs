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

//! Provides the streaming client for IG market-data subscriptions.
//!
//! [`IgStreamingClient`] connects to the streaming endpoint captured in the session during
//! authentication, authenticates the connection with the composed token password, and
//! manages a registry of named subscriptions. Connection status changes arrive on a watch
//! channel returned by [`IgStreamingClient::connect`]; each subscription delivers its
//! events on its own channel returned by [`IgStreamingClient::subscribe`].

use std::{fmt::Debug, sync::Arc};

use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{
    error::IgStreamingError,
    messages::{IgItemUpdate, IgStreamMessage, IgStreamRequest, SubscriptionEvent},
};
use crate::{common::enums::IgSubscriptionMode, config::IgClientConfig, session::IgSession};

/// Initial status published when a connection is being established.
pub const CONNECTING_STATUS: &str = "CONNECTING";

/// Terminal status published when a connection ends.
pub const DISCONNECTED_STATUS: &str = "DISCONNECTED";

/// Default predicate deciding whether a status string means data is flowing.
///
/// Matches any status containing `STREAMING`, covering both the plain and the
/// sensing/polling variants the gateway reports.
#[must_use]
pub fn is_streaming_status(status: &str) -> bool {
    status.contains("STREAMING")
}

type StatusPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

struct SubscriptionRecord {
    event_tx: mpsc::UnboundedSender<SubscriptionEvent>,
}

struct ConnectionHandle {
    request_tx: mpsc::UnboundedSender<IgStreamRequest>,
    status_tx: watch::Sender<String>,
    reader_task: tokio::task::JoinHandle<()>,
    writer_task: tokio::task::JoinHandle<()>,
}

/// Provides a streaming client for IG market-data subscriptions.
///
/// Cheap to clone; clones share the same connection and subscription registry.
#[derive(Clone)]
pub struct IgStreamingClient {
    session: IgSession,
    url_override: Option<String>,
    subscriptions: Arc<DashMap<String, SubscriptionRecord>>,
    conn: Arc<tokio::sync::RwLock<Option<ConnectionHandle>>>,
    status_predicate: StatusPredicate,
}

impl Debug for IgStreamingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(IgStreamingClient))
            .field("session", &self.session)
            .field("url_override", &self.url_override)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl IgStreamingClient {
    /// Creates a new [`IgStreamingClient`] sharing the given session.
    ///
    /// The streaming URL is normally the Lightstreamer endpoint captured in the session
    /// during authentication; a `streaming_url` override in `config` takes precedence.
    #[must_use]
    pub fn new(config: &IgClientConfig, session: IgSession) -> Self {
        Self {
            session,
            url_override: config.streaming_url.clone(),
            subscriptions: Arc::new(DashMap::new()),
            conn: Arc::new(tokio::sync::RwLock::new(None)),
            status_predicate: Arc::new(is_streaming_status),
        }
    }

    /// Replaces the predicate used by [`IgStreamingClient::is_streaming`].
    #[must_use]
    pub fn with_status_predicate(
        mut self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.status_predicate = Arc::new(predicate);
        self
    }

    /// Returns the session shared by this client.
    #[must_use]
    pub fn session(&self) -> &IgSession {
        &self.session
    }

    /// Returns `true` when a connection is active.
    pub async fn is_connected(&self) -> bool {
        self.conn.read().await.is_some()
    }

    /// Returns the most recent connection status, if connected.
    pub async fn status(&self) -> Option<String> {
        self.conn
            .read()
            .await
            .as_ref()
            .map(|handle| handle.status_tx.borrow().clone())
    }

    /// Returns `true` when the current status satisfies the streaming predicate.
    pub async fn is_streaming(&self) -> bool {
        match self.status().await {
            Some(status) => (self.status_predicate)(&status),
            None => false,
        }
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns `true` when a subscription with the given identifier is registered.
    #[must_use]
    pub fn has_subscription(&self, subscription_id: &str) -> bool {
        self.subscriptions.contains_key(subscription_id)
    }

    /// Connects to the streaming endpoint and authenticates the connection.
    ///
    /// Returns a watch channel carrying status changes, starting at `CONNECTING` and
    /// ending at `DISCONNECTED` when the connection closes for any reason. An existing
    /// connection is torn down first.
    ///
    /// # Errors
    ///
    /// Returns [`IgStreamingError::AuthenticationRequired`] if the session is missing the
    /// streaming endpoint or account identifier, or a transport error if the websocket
    /// connection fails.
    pub async fn connect(&self) -> Result<watch::Receiver<String>, IgStreamingError> {
        let endpoint = self
            .url_override
            .clone()
            .or_else(|| self.session.lightstreamer_endpoint())
            .ok_or(IgStreamingError::AuthenticationRequired)?;
        let account_id = self
            .session
            .account_id()
            .ok_or(IgStreamingError::AuthenticationRequired)?;

        self.disconnect().await;

        tracing::debug!(%endpoint, "Connecting");
        let (ws_stream, _) = connect_async(&endpoint).await?;
        let (mut write, mut read) = ws_stream.split();

        let (status_tx, status_rx) = watch::channel(CONNECTING_STATUS.to_string());
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<IgStreamRequest>();

        let writer_task = tokio::spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let json = match serde_json::to_string(&request) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize frame: {e}");
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(json.into())).await {
                    tracing::error!("Failed to send frame: {e}");
                    break;
                }
            }
        });

        let subscriptions = self.subscriptions.clone();
        let reader_status_tx = status_tx.clone();
        let reader_task = tokio::spawn(async move {
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        Self::handle_frame(text.as_str(), &subscriptions, &reader_status_tx);
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {} // Ping/pong and binary frames carry no protocol data
                    Err(e) => {
                        tracing::warn!("Transport error: {e}");
                        break;
                    }
                }
            }
            let _ = reader_status_tx.send(DISCONNECTED_STATUS.to_string());
        });

        request_tx
            .send(IgStreamRequest::Auth {
                user: account_id,
                password: self.session.compose_stream_password(),
            })
            .map_err(|_| IgStreamingError::TransportError("Writer closed".to_string()))?;

        *self.conn.write().await = Some(ConnectionHandle {
            request_tx,
            status_tx,
            reader_task,
            writer_task,
        });

        Ok(status_rx)
    }

    /// Opens a subscription under the caller-chosen identifier.
    ///
    /// Returns a channel delivering this subscription's events, beginning with
    /// [`SubscriptionEvent::Start`]. Reusing an identifier replaces the previous
    /// subscription: the gateway is told to drop it and its event channel closes.
    ///
    /// # Errors
    ///
    /// Returns [`IgStreamingError::NotConnected`] if no connection is active, or a
    /// transport error if the connection is closing.
    pub async fn subscribe(
        &self,
        subscription_id: &str,
        mode: IgSubscriptionMode,
        items: Vec<String>,
        fields: Vec<String>,
    ) -> Result<mpsc::UnboundedReceiver<SubscriptionEvent>, IgStreamingError> {
        let guard = self.conn.read().await;
        let handle = guard.as_ref().ok_or(IgStreamingError::NotConnected)?;

        // Replacing a live identifier drops the old record, closing its event channel
        if self.subscriptions.remove(subscription_id).is_some() {
            let _ = handle.request_tx.send(IgStreamRequest::Unsubscribe {
                id: subscription_id.to_string(),
            });
        }

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        self.subscriptions.insert(
            subscription_id.to_string(),
            SubscriptionRecord {
                event_tx: event_tx.clone(),
            },
        );

        handle
            .request_tx
            .send(IgStreamRequest::Subscribe {
                id: subscription_id.to_string(),
                mode,
                items,
                fields,
            })
            .map_err(|_| IgStreamingError::TransportError("Writer closed".to_string()))?;

        let _ = event_tx.send(SubscriptionEvent::Start);

        Ok(event_rx)
    }

    /// Closes the subscription with the given identifier.
    ///
    /// Unknown identifiers are a no-op.
    pub async fn unsubscribe(&self, subscription_id: &str) {
        if self.subscriptions.remove(subscription_id).is_some() {
            if let Some(handle) = self.conn.read().await.as_ref() {
                let _ = handle.request_tx.send(IgStreamRequest::Unsubscribe {
                    id: subscription_id.to_string(),
                });
            }
        }
    }

    /// Disconnects from the streaming endpoint and clears the subscription registry.
    ///
    /// All subscription event channels close, and the status channel publishes
    /// `DISCONNECTED`. A no-op when already disconnected.
    pub async fn disconnect(&self) {
        if let Some(handle) = self.conn.write().await.take() {
            handle.reader_task.abort();
            handle.writer_task.abort();
            let _ = handle.status_tx.send(DISCONNECTED_STATUS.to_string());
        }
        self.subscriptions.clear();
    }

    fn handle_frame(
        text: &str,
        subscriptions: &DashMap<String, SubscriptionRecord>,
        status_tx: &watch::Sender<String>,
    ) {
        let message: IgStreamMessage = match serde_json::from_str(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Failed to parse frame: {e}");
                return;
            }
        };

        match message {
            IgStreamMessage::Status { status } => {
                tracing::debug!(%status, "Status changed");
                let _ = status_tx.send(status);
            }
            IgStreamMessage::Update { id, item, fields } => {
                if let Some(record) = subscriptions.get(&id) {
                    let _ = record
                        .event_tx
                        .send(SubscriptionEvent::Update(IgItemUpdate { item, fields }));
                } else {
                    tracing::warn!(subscription_id = %id, "Update for unknown subscription");
                }
            }
            IgStreamMessage::SubscriptionError { id, code, message } => {
                if let Some(record) = subscriptions.get(&id) {
                    let _ = record
                        .event_tx
                        .send(SubscriptionEvent::Error { code, message });
                } else {
                    tracing::warn!(subscription_id = %id, "Error for unknown subscription");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn client_with_session(session: IgSession) -> IgStreamingClient {
        IgStreamingClient::new(&IgClientConfig::default(), session)
    }

    #[rstest]
    #[case("STREAMING", true)]
    #[case("CONNECTED:WS-STREAMING", true)]
    #[case("CONNECTED:HTTP-STREAMING", true)]
    #[case("CONNECTING", false)]
    #[case("STALLED", false)]
    #[case("DISCONNECTED", false)]
    fn test_is_streaming_status(#[case] status: &str, #[case] expected: bool) {
        assert_eq!(is_streaming_status(status), expected);
    }

    #[rstest]
    fn test_new_client_has_no_subscriptions() {
        let client = client_with_session(IgSession::new());
        assert_eq!(client.subscription_count(), 0);
        assert!(!client.has_subscription("prices"));
    }

    #[tokio::test]
    async fn test_connect_fails_fast_without_session_data() {
        let client = client_with_session(IgSession::new());

        let result = client.connect().await;
        assert!(matches!(
            result,
            Err(IgStreamingError::AuthenticationRequired)
        ));
        assert!(!client.is_connected().await);
    }

    #[tokio::test]
    async fn test_subscribe_fails_when_disconnected() {
        let client = client_with_session(IgSession::new());

        let result = client
            .subscribe(
                "prices",
                IgSubscriptionMode::Merge,
                vec!["L1:IX.D.FTSE.DAILY.IP".to_string()],
                vec!["BID".to_string()],
            )
            .await;
        assert!(matches!(result, Err(IgStreamingError::NotConnected)));
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown_id_is_noop() {
        let client = client_with_session(IgSession::new());
        client.unsubscribe("unknown").await;
        assert_eq!(client.subscription_count(), 0);
    }

    #[tokio::test]
    async fn test_custom_status_predicate() {
        let client = client_with_session(IgSession::new())
            .with_status_predicate(|status| status == "LIVE");

        // No connection yet, so no status satisfies any predicate
        assert!(!client.is_streaming().await);
        assert!((client.status_predicate)("LIVE"));
        assert!(!(client.status_predicate)("STREAMING"));
    }
}
