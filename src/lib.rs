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

//! Client library for the [IG](https://www.ig.com) trading platform.
//!
//! IG's public API exposes REST endpoints for session management, market navigation,
//! historical prices, watchlists, and sprint-market positions, plus a Lightstreamer-style
//! publish/subscribe endpoint for real-time field updates. This crate provides:
//!
//! - **HTTP client** ([`http::client::IgHttpClient`]): issues REST calls, attaches the
//!   `X-IG-API-KEY` / `X-SECURITY-TOKEN` / `CST` headers, and reconciles rotated session
//!   credentials from every response back into the session.
//! - **Session state** ([`session::IgSession`]): the credential record shared by the HTTP
//!   and streaming clients of one logical client instance. Sessions can be resumed from
//!   previously captured credentials without re-authenticating.
//! - **Streaming client** ([`websocket::client::IgStreamingClient`]): manages a registry of
//!   named subscriptions over the persistent streaming connection, delivering updates as
//!   per-subscription event channels.
//!
//! The crate performs no UI work and never persists credentials; collaborators decide how
//! failures are rendered and where resumed sessions come from.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod config;
pub mod http;
pub mod session;
pub mod websocket;
