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

//! Session state shared by the HTTP and streaming clients of one IG client instance.
//!
//! [`IgSession`] holds the credential pair returned by the session endpoint
//! (`X-SECURITY-TOKEN` and `CST`), the vendor API key, the current account identifier, and
//! the Lightstreamer endpoint URL. The HTTP client writes into the session as responses
//! arrive; the streaming client reads from it when connecting. Each client instance owns
//! its session explicitly, so multiple independent sessions can coexist in one process.

use std::{
    fmt::Debug,
    sync::{Arc, RwLock},
};

use crate::common::credential::Credential;

/// Previously captured session credentials for resuming without re-authenticating.
///
/// Persistence of these values (cookies, local storage, a keyring) is the collaborator's
/// responsibility; the core only accepts them back.
#[derive(Clone, Debug, Default)]
pub struct IgAuthenticationData {
    /// The `X-SECURITY-TOKEN` value.
    pub account_token: Option<String>,
    /// The `CST` value.
    pub client_token: Option<String>,
    /// The Lightstreamer endpoint URL.
    pub lightstreamer_endpoint: Option<String>,
    /// The vendor/application API key.
    pub api_key: Option<String>,
    /// The current trading account identifier.
    pub account_id: Option<String>,
}

#[derive(Default)]
struct SessionInner {
    credential: Option<Credential>,
    account_token: Option<String>,
    client_token: Option<String>,
    account_id: Option<String>,
    lightstreamer_endpoint: Option<String>,
}

/// Mutable session state for one logical IG client.
///
/// Cheap to clone; clones share the same underlying record. The session performs no
/// validation itself: operations that need an authenticated or streaming-capable session
/// check before use and fail fast.
#[derive(Clone, Default)]
pub struct IgSession {
    inner: Arc<RwLock<SessionInner>>,
}

impl Debug for IgSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        let guard = self.inner.read().expect("Lock poisoned");
        f.debug_struct(stringify!(IgSession))
            .field("credential", &guard.credential)
            .field("has_account_token", &guard.account_token.is_some())
            .field("has_client_token", &guard.client_token.is_some())
            .field("account_id", &guard.account_id)
            .field("lightstreamer_endpoint", &guard.lightstreamer_endpoint)
            .finish()
    }
}

impl IgSession {
    /// Creates a new empty [`IgSession`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the session atomically from previously captured credentials.
    ///
    /// Used to resume a prior session without re-authenticating; all fields are replaced,
    /// including ones absent from `data`.
    pub fn set_authentication_data(&self, data: IgAuthenticationData) {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        let mut guard = self.inner.write().expect("Lock poisoned");
        guard.account_token = data.account_token;
        guard.client_token = data.client_token;
        guard.lightstreamer_endpoint = data.lightstreamer_endpoint;
        guard.credential = data.api_key.map(Credential::new);
        guard.account_id = data.account_id;
    }

    /// Returns `true` when both session tokens are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        let guard = self.inner.read().expect("Lock poisoned");
        guard.account_token.is_some() && guard.client_token.is_some()
    }

    /// Returns the vendor API key, if known.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        let guard = self.inner.read().expect("Lock poisoned");
        guard.credential.as_ref().map(|c| c.api_key().to_string())
    }

    /// Returns the token pair when both halves are present.
    #[must_use]
    pub fn tokens(&self) -> Option<(String, String)> {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        let guard = self.inner.read().expect("Lock poisoned");
        match (&guard.account_token, &guard.client_token) {
            (Some(account), Some(client)) => Some((account.clone(), client.clone())),
            _ => None,
        }
    }

    /// Returns the current trading account identifier, if known.
    #[must_use]
    pub fn account_id(&self) -> Option<String> {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        self.inner
            .read()
            .expect("Lock poisoned")
            .account_id
            .clone()
    }

    /// Returns the Lightstreamer endpoint URL, if known.
    #[must_use]
    pub fn lightstreamer_endpoint(&self) -> Option<String> {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        self.inner
            .read()
            .expect("Lock poisoned")
            .lightstreamer_endpoint
            .clone()
    }

    /// Composes the streaming transport password from the stored tokens.
    ///
    /// The fixed form is `CST-{client_token}|XST-{account_token}`; either half is omitted
    /// when its token is absent, and the `|` separator appears only when both are present.
    #[must_use]
    pub fn compose_stream_password(&self) -> String {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        let guard = self.inner.read().expect("Lock poisoned");

        let mut password = String::new();
        if let Some(client) = &guard.client_token {
            password.push_str("CST-");
            password.push_str(client);
        }
        if guard.client_token.is_some() && guard.account_token.is_some() {
            password.push('|');
        }
        if let Some(account) = &guard.account_token {
            password.push_str("XST-");
            password.push_str(account);
        }
        password
    }

    pub(crate) fn set_api_key(&self, api_key: String) {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        self.inner.write().expect("Lock poisoned").credential = Some(Credential::new(api_key));
    }

    pub(crate) fn set_account_token(&self, token: String) {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        self.inner.write().expect("Lock poisoned").account_token = Some(token);
    }

    pub(crate) fn set_client_token(&self, token: String) {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        self.inner.write().expect("Lock poisoned").client_token = Some(token);
    }

    pub(crate) fn set_account_id(&self, account_id: String) {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        self.inner.write().expect("Lock poisoned").account_id = Some(account_id);
    }

    pub(crate) fn set_lightstreamer_endpoint(&self, endpoint: String) {
        // SAFETY: Lock poisoning indicates a panic in another thread, which is fatal
        self.inner
            .write()
            .expect("Lock poisoned")
            .lightstreamer_endpoint = Some(endpoint);
    }
}
