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

//! Message types for the IG streaming protocol.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::enums::IgSubscriptionMode;

/// Frames sent from the client to the streaming gateway.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IgStreamRequest {
    /// Authenticates the connection.
    ///
    /// `user` is the trading account identifier; `password` is the composed token
    /// password of the form `CST-{client_token}|XST-{account_token}`.
    Auth { user: String, password: String },
    /// Opens a subscription under the caller-chosen identifier.
    Subscribe {
        id: String,
        mode: IgSubscriptionMode,
        items: Vec<String>,
        fields: Vec<String>,
    },
    /// Closes the subscription with the given identifier.
    Unsubscribe { id: String },
}

/// Frames received from the streaming gateway.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IgStreamMessage {
    /// Connection lifecycle status change, e.g. `STREAMING`, `STALLED`.
    Status { status: String },
    /// Field values for one item of a subscription.
    Update {
        id: String,
        item: String,
        fields: HashMap<String, String>,
    },
    /// A subscription-level failure; other subscriptions are unaffected.
    SubscriptionError {
        id: String,
        code: i64,
        message: String,
    },
}

/// A field update for a single subscribed item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgItemUpdate {
    /// The item the update belongs to, e.g. `L1:IX.D.FTSE.DAILY.IP`.
    pub item: String,
    /// Updated field values keyed by field name.
    pub fields: HashMap<String, String>,
}

/// Events delivered on a per-subscription channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubscriptionEvent {
    /// The subscription request was dispatched to the gateway.
    Start,
    /// An item update arrived.
    Update(IgItemUpdate),
    /// The gateway rejected or aborted this subscription.
    Error { code: i64, message: String },
}
