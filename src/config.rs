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

//! Configuration structures for the IG client.

use crate::common::enums::IgEnvironment;

/// Configuration for [`IgHttpClient`](crate::http::client::IgHttpClient) and
/// [`IgStreamingClient`](crate::websocket::client::IgStreamingClient).
#[derive(Clone, Debug)]
pub struct IgClientConfig {
    /// Target environment; selects the default REST base URL.
    pub environment: IgEnvironment,
    /// Optional override for the REST base URL.
    pub base_url: Option<String>,
    /// Optional override for the streaming endpoint URL.
    ///
    /// Normally the endpoint is captured from the authenticate response; this override
    /// takes precedence when set.
    pub streaming_url: Option<String>,
    /// Default REST timeout in seconds, applied when a call supplies none.
    pub http_timeout_secs: u64,
}

impl Default for IgClientConfig {
    fn default() -> Self {
        Self {
            environment: IgEnvironment::Production,
            base_url: None,
            streaming_url: None,
            http_timeout_secs: 30,
        }
    }
}

impl IgClientConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the REST base URL, considering overrides and environment.
    #[must_use]
    pub fn http_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.environment.http_url().to_string())
    }
}
