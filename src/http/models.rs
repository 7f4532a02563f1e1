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

//! Request and response structures for the IG REST API.
//!
//! All payloads are camelCase JSON on the wire. Response models keep fields optional where
//! the upstream API omits them depending on account type or market state.

use serde::{Deserialize, Serialize};

use crate::common::enums::{IgOrderDirection, IgSprintExpiryPeriod};

/// Request body for the POST /session endpoint.
///
/// The `vendorKey` field is extracted by the request executor before the body is sent:
/// it is stored in the session and travels as the `X-IG-API-KEY` header instead.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgAuthenticateRequest {
    /// Account username.
    pub identifier: String,
    /// Account password.
    pub password: String,
    /// Vendor/application API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_key: Option<String>,
}

impl IgAuthenticateRequest {
    /// Creates a new [`IgAuthenticateRequest`].
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        password: impl Into<String>,
        vendor_key: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
            vendor_key: Some(vendor_key.into()),
        }
    }
}

/// A trading account attached to the authenticated login.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgAccount {
    /// Account identifier, e.g. `PAR44`.
    pub account_id: String,
    /// Display name.
    #[serde(default)]
    pub account_name: Option<String>,
    /// Account type, e.g. `SPREADBET`, `CFD`.
    #[serde(default)]
    pub account_type: Option<String>,
    /// Whether this is the preferred account.
    #[serde(default)]
    pub preferred: bool,
}

/// Response body of the POST /session endpoint.
///
/// The credential pair itself arrives in the `X-SECURITY-TOKEN` and `CST` response
/// headers; the body carries the account and streaming endpoint details.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgAuthenticateResponse {
    /// Identifier of the account in use.
    #[serde(default)]
    pub current_account_id: Option<String>,
    /// URL of the Lightstreamer endpoint for this session.
    #[serde(default)]
    pub lightstreamer_endpoint: Option<String>,
    /// Account currency ISO code.
    #[serde(default)]
    pub currency_iso_code: Option<String>,
    /// Offset from UTC in hours.
    #[serde(default)]
    pub timezone_offset: Option<f64>,
    /// Accounts attached to this login.
    #[serde(default)]
    pub accounts: Vec<IgAccount>,
}

/// A node in the market navigation hierarchy.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgNavigationNode {
    /// Node identifier, browsable via `/marketnavigation/{nodeId}`.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A market as listed under navigation nodes and watchlists.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgMarket {
    /// Instrument epic.
    pub epic: String,
    /// Display name.
    #[serde(default)]
    pub instrument_name: Option<String>,
    /// Instrument type, e.g. `CURRENCIES`.
    #[serde(default)]
    pub instrument_type: Option<String>,
    /// Current market status, e.g. `TRADEABLE`.
    #[serde(default)]
    pub market_status: Option<String>,
    /// Current bid price.
    #[serde(default)]
    pub bid: Option<f64>,
    /// Current offer price.
    #[serde(default)]
    pub offer: Option<f64>,
}

/// Response body of the GET /marketnavigation/{nodeId} endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgMarketNavigationResponse {
    /// Sub-nodes of the browsed node.
    #[serde(default)]
    pub nodes: Vec<IgNavigationNode>,
    /// Markets attached directly to the browsed node.
    #[serde(default)]
    pub markets: Vec<IgMarket>,
}

/// One side of a price quote.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgPricePoint {
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub last_traded: Option<f64>,
}

/// A single historical price bar.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgPriceBar {
    /// Bar timestamp, e.g. `2015/06/09 17:00:00`.
    pub snapshot_time: String,
    pub open_price: IgPricePoint,
    pub close_price: IgPricePoint,
    pub high_price: IgPricePoint,
    pub low_price: IgPricePoint,
    /// Traded volume for the bar, when published.
    #[serde(default)]
    pub last_traded_volume: Option<f64>,
}

/// Remaining historical data allowance reported alongside price responses.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgPriceAllowance {
    #[serde(default)]
    pub remaining_allowance: Option<i64>,
    #[serde(default)]
    pub total_allowance: Option<i64>,
    #[serde(default)]
    pub allowance_expiry: Option<i64>,
}

/// Response body of the GET /prices/{epic}/{resolution}/{numPoints} endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgPriceHistoryResponse {
    /// Price bars, most recent last.
    #[serde(default)]
    pub prices: Vec<IgPriceBar>,
    /// Instrument type of the requested epic.
    #[serde(default)]
    pub instrument_type: Option<String>,
    /// Historical data allowance after this call.
    #[serde(default)]
    pub allowance: Option<IgPriceAllowance>,
}

/// A watchlist owned by the authenticated account.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgWatchlist {
    /// Watchlist identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether this is a system-provided watchlist.
    #[serde(default)]
    pub default_system_watchlist: Option<bool>,
    /// Whether the watchlist can be edited.
    #[serde(default)]
    pub editable: Option<bool>,
}

/// Response body of the GET /watchlists endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgWatchlistsResponse {
    #[serde(default)]
    pub watchlists: Vec<IgWatchlist>,
}

/// Response body of the GET /watchlists/{id} endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgWatchlistResponse {
    /// Markets contained in the watchlist.
    #[serde(default)]
    pub markets: Vec<IgMarket>,
}

/// Request body for the POST /positions/sprintmarkets endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgCreateSprintPositionRequest {
    /// Instrument epic.
    pub epic: String,
    /// Deal direction.
    pub direction: IgOrderDirection,
    /// Sprint expiry period.
    pub expiry_period: IgSprintExpiryPeriod,
    /// Deal size.
    pub size: f64,
}

impl IgCreateSprintPositionRequest {
    /// Creates a new [`IgCreateSprintPositionRequest`].
    #[must_use]
    pub fn new(
        epic: impl Into<String>,
        direction: IgOrderDirection,
        expiry_period: IgSprintExpiryPeriod,
        size: f64,
    ) -> Self {
        Self {
            epic: epic.into(),
            direction,
            expiry_period,
            size,
        }
    }
}

/// Response body of the POST /positions/sprintmarkets endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgCreateSprintPositionResponse {
    /// Reference for tracking the deal confirmation.
    pub deal_reference: String,
}

/// An open sprint-market position.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgSprintMarketPosition {
    /// Deal identifier.
    pub deal_id: String,
    /// Instrument epic.
    #[serde(default)]
    pub epic: Option<String>,
    /// Display name.
    #[serde(default)]
    pub instrument_name: Option<String>,
    /// Deal direction.
    #[serde(default)]
    pub direction: Option<IgOrderDirection>,
    /// Deal size.
    #[serde(default)]
    pub size: Option<f64>,
    /// Payout amount if the position expires in the money.
    #[serde(default)]
    pub payout_amount: Option<f64>,
    /// Strike level the position was opened at.
    #[serde(default)]
    pub strike_level: Option<f64>,
    /// Expiry timestamp.
    #[serde(default)]
    pub expiry_time: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_date: Option<String>,
    /// Position currency.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Response body of the GET /positions/sprintmarkets endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgSprintMarketPositionsResponse {
    #[serde(default)]
    pub sprint_market_positions: Vec<IgSprintMarketPosition>,
}
