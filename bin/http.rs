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

//! Manual verification script for the IG REST API.
//!
//! Authenticates, browses the market navigation root, fetches watchlists, and pulls a
//! small price history. Defaults to the demo environment.
//!
//! Requires environment variables:
//! - `IG_IDENTIFIER`: Account username
//! - `IG_PASSWORD`: Account password
//! - `IG_API_KEY`: Vendor/application API key
//!
//! Usage:
//! ```bash
//! IG_IDENTIFIER=your_user \
//!   IG_PASSWORD=your_password \
//!   IG_API_KEY=your_key \
//!   cargo run --bin ig-http
//! ```

use anyhow::Context;
use ig_trading::{
    common::enums::{IgEnvironment, IgPriceResolution},
    config::IgClientConfig,
    http::client::IgHttpClient,
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

    let environment = if std::env::var("IG_IS_PRODUCTION")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
    {
        IgEnvironment::Production
    } else {
        IgEnvironment::Demo
    };

    tracing::info!("Environment: {environment}");

    let client = IgHttpClient::new(IgClientConfig {
        environment,
        ..Default::default()
    });

    tracing::info!("Authenticating to {}/session ...", client.base_url());
    let auth = client.authenticate(&identifier, &password, &api_key).await?;
    tracing::info!(
        "Authenticated, account: {}",
        auth.current_account_id.as_deref().unwrap_or("<unknown>")
    );
    tracing::info!(
        "Lightstreamer endpoint: {}",
        auth.lightstreamer_endpoint.as_deref().unwrap_or("<none>")
    );

    tracing::info!("Browsing market navigation root...");
    let navigation = client.browse(None).await?;
    tracing::info!(
        "Root has {} nodes and {} markets",
        navigation.nodes.len(),
        navigation.markets.len()
    );
    for node in navigation.nodes.iter().take(5) {
        tracing::info!("  {} ({})", node.name, node.id);
    }

    if let Some(node) = navigation.nodes.first() {
        tracing::info!("Browsing into {} ...", node.name);
        let child = client.browse(Some(&node.id)).await?;
        tracing::info!(
            "  {} nodes, {} markets",
            child.nodes.len(),
            child.markets.len()
        );
    }

    tracing::info!("Fetching watchlists...");
    let watchlists = client.watchlists().await?;
    for watchlist in &watchlists.watchlists {
        tracing::info!(
            "  {} ({})",
            watchlist.name.as_deref().unwrap_or("<unnamed>"),
            watchlist.id
        );
    }

    if let Some(watchlist) = watchlists.watchlists.first() {
        let contents = client.watchlist(&watchlist.id).await?;
        tracing::info!("First watchlist has {} markets", contents.markets.len());

        if let Some(market) = contents.markets.first() {
            tracing::info!("Fetching price history for {} ...", market.epic);
            let history = client
                .price_search_by_num(&market.epic, IgPriceResolution::Day, 5)
                .await?;
            for bar in &history.prices {
                tracing::info!(
                    "  {} open_bid={:?} close_bid={:?}",
                    bar.snapshot_time,
                    bar.open_price.bid,
                    bar.close_price.bid
                );
            }
            if let Some(allowance) = history.allowance {
                tracing::info!(
                    "Remaining allowance: {:?}",
                    allowance.remaining_allowance
                );
            }
        }
    }

    tracing::info!("Requests dispatched: {}", client.call_count());
    tracing::info!("Done");

    Ok(())
}
