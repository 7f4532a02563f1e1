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

//! Enumerations that model IG string enums across HTTP and streaming payloads.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::consts::{IG_DEMO_HTTP_URL, IG_HTTP_URL};

/// IG API environment.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IgEnvironment {
    /// Production/live environment.
    #[default]
    Production,
    /// Demo environment.
    Demo,
}

impl IgEnvironment {
    /// Returns the REST gateway base URL for this environment.
    #[must_use]
    pub const fn http_url(&self) -> &'static str {
        match self {
            Self::Production => IG_HTTP_URL,
            Self::Demo => IG_DEMO_HTTP_URL,
        }
    }
}

/// Price bar resolution accepted by the historical prices endpoint.
///
/// Values outside this enumeration are rejected by the upstream API, not validated
/// client-side.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    PartialEq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum IgPriceResolution {
    #[serde(rename = "MINUTE")]
    #[strum(serialize = "MINUTE")]
    Minute,
    #[serde(rename = "MINUTE_2")]
    #[strum(serialize = "MINUTE_2")]
    Minute2,
    #[serde(rename = "MINUTE_3")]
    #[strum(serialize = "MINUTE_3")]
    Minute3,
    #[serde(rename = "MINUTE_5")]
    #[strum(serialize = "MINUTE_5")]
    Minute5,
    #[serde(rename = "MINUTE_10")]
    #[strum(serialize = "MINUTE_10")]
    Minute10,
    #[serde(rename = "MINUTE_15")]
    #[strum(serialize = "MINUTE_15")]
    Minute15,
    #[serde(rename = "MINUTE_30")]
    #[strum(serialize = "MINUTE_30")]
    Minute30,
    #[serde(rename = "HOUR")]
    #[strum(serialize = "HOUR")]
    Hour,
    #[serde(rename = "HOUR_2")]
    #[strum(serialize = "HOUR_2")]
    Hour2,
    #[serde(rename = "HOUR_3")]
    #[strum(serialize = "HOUR_3")]
    Hour3,
    #[serde(rename = "HOUR_4")]
    #[strum(serialize = "HOUR_4")]
    Hour4,
    #[serde(rename = "DAY")]
    #[strum(serialize = "DAY")]
    Day,
    #[serde(rename = "WEEK")]
    #[strum(serialize = "WEEK")]
    Week,
    #[serde(rename = "MONTH")]
    #[strum(serialize = "MONTH")]
    Month,
}

/// Subscription mode for streaming items.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    PartialEq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IgSubscriptionMode {
    /// Field updates are merged into the last snapshot per item.
    Merge,
    /// Every distinct update is delivered.
    Distinct,
    /// Updates are delivered exactly as produced by the feed.
    Raw,
    /// Add/update/delete commands over a dynamic item list.
    Command,
}

/// Deal direction for sprint-market positions.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    PartialEq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IgOrderDirection {
    Buy,
    Sell,
}

/// Expiry period for sprint-market positions.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    PartialEq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IgSprintExpiryPeriod {
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    TwentyMinutes,
    SixtyMinutes,
}
