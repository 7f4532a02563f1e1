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

//! Provides the HTTP client integration for the [IG](https://www.ig.com) REST API.
//!
//! All requests flow through [`IgHttpClient::send`], which attaches the session headers,
//! strips the vendor key from outgoing bodies, and captures rotated tokens from every
//! response. Typed endpoint methods wrap `send` with the matching request/response models.

use std::{
    sync::{
        Arc, RwLock,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    error::{IgErrorResponse, IgHttpError},
    models::{
        IgAuthenticateRequest, IgAuthenticateResponse, IgCreateSprintPositionRequest,
        IgCreateSprintPositionResponse, IgMarketNavigationResponse, IgPriceHistoryResponse,
        IgSprintMarketPositionsResponse, IgWatchlistResponse, IgWatchlistsResponse,
    },
    templates::resolve_template,
};
use crate::{
    common::{
        consts::{
            IG_API_KEY_HEADER, IG_AUTHENTICATE_API_VERSION, IG_CST_HEADER, IG_JSON_CONTENT_TYPE,
            IG_SECURITY_TOKEN_HEADER, IG_VERSION_HEADER,
        },
        enums::IgPriceResolution,
    },
    config::IgClientConfig,
    session::IgSession,
};

/// Field name holding the vendor key in outgoing request bodies.
///
/// The key never travels in a body: it is removed before serialization, stored in the
/// session, and sent as the `X-IG-API-KEY` header on this and every subsequent request.
const VENDOR_KEY_FIELD: &str = "vendorKey";

const ACCOUNT_ID_FIELD: &str = "currentAccountId";
const LIGHTSTREAMER_ENDPOINT_FIELD: &str = "lightstreamerEndpoint";

/// Provides a HTTP client for connecting to the [IG](https://www.ig.com) REST API.
///
/// Cheap to clone; clones share the same session and request counter.
#[derive(Clone, Debug)]
pub struct IgHttpClient {
    base_url: Arc<RwLock<String>>,
    client: reqwest::Client,
    session: IgSession,
    default_timeout: Duration,
    call_count: Arc<AtomicU64>,
}

impl Default for IgHttpClient {
    fn default() -> Self {
        Self::new(IgClientConfig::default())
    }
}

impl IgHttpClient {
    /// Creates a new [`IgHttpClient`] with a fresh empty session.
    #[must_use]
    pub fn new(config: IgClientConfig) -> Self {
        Self::with_session(config, IgSession::new())
    }

    /// Creates a new [`IgHttpClient`] sharing the given session.
    ///
    /// Used to pair the client with a streaming client, or to resume a session whose
    /// tokens were restored via [`IgSession::set_authentication_data`].
    #[must_use]
    pub fn with_session(config: IgClientConfig, session: IgSession) -> Self {
        Self {
            base_url: Arc::new(RwLock::new(config.http_base_url())),
            client: reqwest::Client::new(),
            session,
            default_timeout: Duration::from_secs(config.http_timeout_secs),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the session shared by this client.
    #[must_use]
    pub fn session(&self) -> &IgSession {
        &self.session
    }

    /// Returns the current REST base URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        self.base_url.read().expect("Lock poisoned").clone()
    }

    /// Replaces the REST base URL for subsequent requests.
    pub fn set_base_url(&self, base_url: impl Into<String>) {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        *self.base_url.write().expect("Lock poisoned") = base_url.into();
    }

    /// Returns the number of requests dispatched by this client.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Sends a request to the given endpoint path and returns the raw JSON response.
    ///
    /// Session headers are attached from the current session state. Any `vendorKey` field
    /// in `body` is moved into the session before the body is serialized. Tokens returned
    /// in the `X-SECURITY-TOKEN` and `CST` response headers and the account and streaming
    /// endpoint fields of the response body are written back into the session, so token
    /// rotations are picked up on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails, the call times out, the response is not
    /// valid JSON, or IG returns a non-success HTTP status.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        api_version: Option<u8>,
        timeout: Option<Duration>,
    ) -> Result<Value, IgHttpError> {
        let url = format!("{}{path}", self.base_url());
        let body = body.map(|b| self.extract_vendor_key(b));

        tracing::debug!(%method, %url, "Sending request");
        self.call_count.fetch_add(1, Ordering::Relaxed);

        let mut request = self
            .client
            .request(method, url)
            .timeout(timeout.unwrap_or(self.default_timeout))
            .header(reqwest::header::CONTENT_TYPE, IG_JSON_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, IG_JSON_CONTENT_TYPE);

        if let Some(api_key) = self.session.api_key() {
            request = request.header(IG_API_KEY_HEADER, api_key);
        }
        if let Some(version) = api_version {
            request = request.header(IG_VERSION_HEADER, version.to_string());
        }
        // The token pair is attached together or not at all
        if let Some((account_token, client_token)) = self.session.tokens() {
            request = request
                .header(IG_SECURITY_TOKEN_HEADER, account_token)
                .header(IG_CST_HEADER, client_token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        self.capture_response_headers(response.headers());

        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %text, "Request failed");
            let error_code = serde_json::from_str::<IgErrorResponse>(&text)
                .ok()
                .and_then(|e| e.error_code);
            return Err(IgHttpError::UnexpectedStatus {
                status: status.as_u16(),
                body: text,
                error_code,
            });
        }

        let value: Value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        self.capture_response_body(&value);

        Ok(value)
    }

    /// Sends a request and deserializes the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`IgHttpClient::send`], or when the
    /// response body does not match `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        api_version: Option<u8>,
        timeout: Option<Duration>,
    ) -> Result<T, IgHttpError> {
        let value = self.send(method, path, body, api_version, timeout).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates a session by authenticating against POST `/session`.
    ///
    /// On success the session holds the token pair from the response headers, the current
    /// account identifier, and the Lightstreamer endpoint, making the client ready for
    /// authenticated REST calls and streaming connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
        api_key: &str,
    ) -> Result<IgAuthenticateResponse, IgHttpError> {
        let request = IgAuthenticateRequest::new(identifier, password, api_key);
        self.send_json(
            Method::POST,
            "/session",
            Some(serde_json::to_value(&request)?),
            Some(IG_AUTHENTICATE_API_VERSION),
            None,
        )
        .await
    }

    /// Browses the market navigation hierarchy via GET `/marketnavigation/{nodeId}`.
    ///
    /// Passing `None` browses the root of the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`IgHttpError::AuthenticationRequired`] if the session holds no token pair,
    /// or an error if the request fails.
    pub async fn browse(
        &self,
        node_id: Option<&str>,
    ) -> Result<IgMarketNavigationResponse, IgHttpError> {
        self.require_authenticated()?;
        let path = match node_id {
            Some(node_id) => resolve_template("/marketnavigation/{nodeId}", &[("nodeId", node_id)])?,
            None => "/marketnavigation".to_string(),
        };
        self.send_json(Method::GET, &path, None, None, None).await
    }

    /// Fetches historical prices via GET `/prices/{epic}/{resolution}/{numPoints}`.
    ///
    /// # Errors
    ///
    /// Returns [`IgHttpError::AuthenticationRequired`] if the session holds no token pair,
    /// or an error if the request fails.
    pub async fn price_search_by_num(
        &self,
        epic: &str,
        resolution: IgPriceResolution,
        num_points: u32,
    ) -> Result<IgPriceHistoryResponse, IgHttpError> {
        self.require_authenticated()?;
        let path = resolve_template(
            "/prices/{epic}/{resolution}/{numPoints}",
            &[
                ("epic", epic),
                ("resolution", resolution.as_ref()),
                ("numPoints", &num_points.to_string()),
            ],
        )?;
        self.send_json(Method::GET, &path, None, None, None).await
    }

    /// Fetches all watchlists for the account via GET `/watchlists`.
    ///
    /// # Errors
    ///
    /// Returns [`IgHttpError::AuthenticationRequired`] if the session holds no token pair,
    /// or an error if the request fails.
    pub async fn watchlists(&self) -> Result<IgWatchlistsResponse, IgHttpError> {
        self.require_authenticated()?;
        self.send_json(Method::GET, "/watchlists", None, None, None)
            .await
    }

    /// Fetches the contents of one watchlist via GET `/watchlists/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`IgHttpError::AuthenticationRequired`] if the session holds no token pair,
    /// or an error if the request fails.
    pub async fn watchlist(&self, watchlist_id: &str) -> Result<IgWatchlistResponse, IgHttpError> {
        self.require_authenticated()?;
        let path = resolve_template("/watchlists/{id}", &[("id", watchlist_id)])?;
        self.send_json(Method::GET, &path, None, None, None).await
    }

    /// Opens a sprint-market position via POST `/positions/sprintmarkets`.
    ///
    /// # Errors
    ///
    /// Returns [`IgHttpError::AuthenticationRequired`] if the session holds no token pair,
    /// or an error if the request fails. Rejections carry the upstream dotted error code,
    /// e.g. `error.sprintmarket.create-position.market-closed`, retrievable via
    /// [`IgHttpError::error_code`].
    pub async fn create_sprint_position(
        &self,
        request: IgCreateSprintPositionRequest,
    ) -> Result<IgCreateSprintPositionResponse, IgHttpError> {
        self.require_authenticated()?;
        self.send_json(
            Method::POST,
            "/positions/sprintmarkets",
            Some(serde_json::to_value(&request)?),
            None,
            None,
        )
        .await
    }

    /// Fetches open sprint-market positions via GET `/positions/sprintmarkets`.
    ///
    /// # Errors
    ///
    /// Returns [`IgHttpError::AuthenticationRequired`] if the session holds no token pair,
    /// or an error if the request fails.
    pub async fn sprint_market_positions(
        &self,
    ) -> Result<IgSprintMarketPositionsResponse, IgHttpError> {
        self.require_authenticated()?;
        self.send_json(Method::GET, "/positions/sprintmarkets", None, None, None)
            .await
    }

    fn require_authenticated(&self) -> Result<(), IgHttpError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(IgHttpError::AuthenticationRequired)
        }
    }

    /// Removes any `vendorKey` field from the body, storing it in the session.
    fn extract_vendor_key(&self, mut body: Value) -> Value {
        if let Some(map) = body.as_object_mut() {
            if let Some(Value::String(api_key)) = map.remove(VENDOR_KEY_FIELD) {
                self.session.set_api_key(api_key);
            }
        }
        body
    }

    fn capture_response_headers(&self, headers: &reqwest::header::HeaderMap) {
        if let Some(token) = headers
            .get(IG_SECURITY_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            self.session.set_account_token(token.to_string());
        }
        if let Some(token) = headers
            .get(IG_CST_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            self.session.set_client_token(token.to_string());
        }
    }

    fn capture_response_body(&self, value: &Value) {
        if let Some(account_id) = value.get(ACCOUNT_ID_FIELD).and_then(Value::as_str) {
            self.session.set_account_id(account_id.to_string());
        }
        if let Some(endpoint) = value
            .get(LIGHTSTREAMER_ENDPOINT_FIELD)
            .and_then(Value::as_str)
        {
            self.session.set_lightstreamer_endpoint(endpoint.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::common::enums::IgEnvironment;

    #[rstest]
    fn test_default_client_targets_production() {
        let client = IgHttpClient::default();
        assert_eq!(client.base_url(), "https://deal-api.ig.com/gateway/deal");
        assert_eq!(client.call_count(), 0);
    }

    #[rstest]
    fn test_set_base_url() {
        let client = IgHttpClient::new(IgClientConfig {
            environment: IgEnvironment::Demo,
            ..Default::default()
        });
        assert_eq!(client.base_url(), "https://demo-api.ig.com/gateway/deal");

        client.set_base_url("http://localhost:9999");
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[rstest]
    fn test_extract_vendor_key_moves_key_into_session() {
        let client = IgHttpClient::default();
        let body = client.extract_vendor_key(json!({
            "identifier": "user",
            "password": "pass",
            "vendorKey": "key-123",
        }));

        assert!(body.get("vendorKey").is_none());
        assert_eq!(body["identifier"], "user");
        assert_eq!(client.session().api_key().as_deref(), Some("key-123"));
    }

    #[rstest]
    fn test_extract_vendor_key_without_key_is_noop() {
        let client = IgHttpClient::default();
        let body = client.extract_vendor_key(json!({"identifier": "user"}));

        assert_eq!(body, json!({"identifier": "user"}));
        assert!(client.session().api_key().is_none());
    }

    #[tokio::test]
    async fn test_operations_fail_fast_without_authentication() {
        let client = IgHttpClient::default();

        let result = client.browse(None).await;
        assert!(matches!(result, Err(IgHttpError::AuthenticationRequired)));

        let result = client.watchlists().await;
        assert!(matches!(result, Err(IgHttpError::AuthenticationRequired)));

        let result = client
            .price_search_by_num("IX.D.FTSE.DAILY.IP", IgPriceResolution::Day, 10)
            .await;
        assert!(matches!(result, Err(IgHttpError::AuthenticationRequired)));

        // Nothing reached the network
        assert_eq!(client.call_count(), 0);
    }
}
