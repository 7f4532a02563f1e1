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

//! Error types for the IG streaming client.

use thiserror::Error;

/// A typed error enumeration for the IG streaming client.
#[derive(Debug, Clone, Error)]
pub enum IgStreamingError {
    /// A streaming connection was requested before the session held the endpoint and
    /// account details captured during authentication.
    #[error("Authentication required: authenticate before connecting the stream")]
    AuthenticationRequired,
    /// An operation needing an active connection was invoked while disconnected.
    #[error("Not connected: call connect first")]
    NotConnected,
    /// Failure in the underlying websocket transport.
    #[error("Transport error: {0}")]
    TransportError(String),
    /// Failure serializing an outgoing frame.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for IgStreamingError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for IgStreamingError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::TransportError(error.to_string())
    }
}
