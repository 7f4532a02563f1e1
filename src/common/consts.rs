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

//! Core constants shared across the IG client components.

pub const IG: &str = "IG";

// HTTP endpoints
pub const IG_HTTP_URL: &str = "https://deal-api.ig.com/gateway/deal";
pub const IG_DEMO_HTTP_URL: &str = "https://demo-api.ig.com/gateway/deal";

// Request headers
pub const IG_API_KEY_HEADER: &str = "X-IG-API-KEY";
pub const IG_VERSION_HEADER: &str = "VERSION";

// Credential-carrying headers, inspected on every response
pub const IG_SECURITY_TOKEN_HEADER: &str = "X-SECURITY-TOKEN";
pub const IG_CST_HEADER: &str = "CST";

pub const IG_JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// API version sent in the `VERSION` header of the session creation request.
pub const IG_AUTHENTICATE_API_VERSION: u8 = 2;
