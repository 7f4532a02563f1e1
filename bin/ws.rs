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

//! Manual verification script for IG streaming subscriptions.
//!
//! Authenticates over REST, connects the streaming client with the captured session,
//! subscribes to a price item, and prints updates. Defaults to the demo environment.
//!
//! Requires environment variables:
//! - `IG_IDENTIFIER`: Account username
//! - `IG_PASSWORD`: Account password
//! - `IG_API_KEY`: Vendor/application API key
//!
//! Optional:
//! - `IG_STREAM_ITEM`: Item to subscribe to (default `L1:IX.D.FTSE.DAILY.IP`)
//!
//! Usage:
//! ```bash
//! IG_IDENTIFIER=your_user \
//!   IG_PASSWORD=your_password \
//!   IG_API_KEY=your_key \
//!   cargo run --bin ig-ws
//! ```

use std::time::Duration;

use anyhow::Context;
use ig_trading::{
    common::enums::{IgEnvironment, IgSubscriptionMode},
    config::IgClientConfig,
    http::client::IgHttpClient,
    websocket::{client::IgStreamingClient, messages::SubscriptionEvent},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let identifier =
        std::env::var("IG_IDENTIFIER").context("IG_IDENTIFIER environment variable required")?;
    let password =
        std::env::var("IG_PASSWORD").context("IG_PASSWORD environment variable required")?;
    let api_key = std::env::var("IG_API_KEY").context("IG_API_KEY environment variable required")?;
    let item = std::env::var("IG_STREAM_ITEM")
        .unwrap_or_else(|_| "L1:IX.D.FTSE.DAILY.IP".to_string());

    let config = IgClientConfig {
        environment: IgEnvironment::Demo,
        ..Default::default()
    };

    let http_client = IgHttpClient::new(config.clone());

    tracing::info!("Authenticating...");
    http_client
        .authenticate(&identifier, &password, &api_key)
        .await?;
    tracing::info!("Authenticated");

    let streaming_client = IgStreamingClient::new(&config, http_client.session().clone());

    tracing::info!(
        "Connecting to {} ...",
        http_client
            .session()
            .lightstreamer_endpoint()
            .unwrap_or_default()
    );
    let mut status_rx = streaming_client.connect().await?;

    let status_task = tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            tracing::info!("Status: {}", status_rx.borrow().clone());
        }
    });

    tracing::info!("Subscribing to {item} ...");
    let mut events = streaming_client
        .subscribe(
            "prices",
            IgSubscriptionMode::Merge,
            vec![item],
            vec!["BID".to_string(), "OFFER".to_string(), "UPDATE_TIME".to_string()],
        )
        .await?;

    tracing::info!("Listening for updates (30 seconds)...");
    let mut update_count = 0u32;
    let listen = async {
        while let Some(event) = events.recv().await {
            match event {
                SubscriptionEvent::Start => tracing::info!("Subscription started"),
                SubscriptionEvent::Update(update) => {
                    update_count += 1;
                    tracing::info!("{}: {:?}", update.item, update.fields);
                }
                SubscriptionEvent::Error { code, message } => {
                    tracing::error!("Subscription error {code}: {message}");
                    break;
                }
            }
        }
    };
    let _ = tokio::time::timeout(Duration::from_secs(30), listen).await;

    tracing::info!("Disconnecting...");
    streaming_client.disconnect().await;
    status_task.abort();

    tracing::info!("Received {update_count} updates");
    tracing::info!("Done");

    Ok(())
}
