//! Multi-Market Orchestrator: fan one product out across markets.
//!
//! The input is validated exactly once, then every resolved market is
//! dispatched concurrently, so total latency tracks the slowest market rather
//! than the sum. Markets are fully independent: a fallback-quality result in
//! one market never delays or cancels another. Unknown market codes never
//! abort the batch; they are reported per market in the result's failure
//! list.
use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use futures::future::join_all;
use labelforge_core::{
    Label, LabelError, MarketCode, MarketFailure, MultiMarketResult, ProductData,
};
use labelforge_gen::GenerationClient;
use tracing::{debug, warn};

pub struct Orchestrator {
    client: GenerationClient,
}

impl Orchestrator {
    pub fn new(client: GenerationClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GenerationClient {
        &self.client
    }

    /// Generate a label for a single market given its wire code.
    pub async fn generate_single(
        &self,
        product: &ProductData,
        market: &str,
    ) -> Result<Label, LabelError> {
        labelforge_schema::check_product(product)?;
        let market = MarketCode::parse(market)?;
        Ok(self.client.generate(product, market).await)
    }

    /// Fan a product out across the requested markets.
    ///
    /// Fails fast on invalid input (no per-market calls are attempted).
    /// Otherwise the result maps every successfully generated market to its
    /// label and lists the markets that could not be processed at all; no
    /// market is ever silently dropped. Duplicate codes collapse to one
    /// generation.
    pub async fn generate_for_markets(
        &self,
        product: &ProductData,
        requested: &[String],
    ) -> Result<MultiMarketResult, LabelError> {
        labelforge_schema::check_product(product)?;

        let mut seen = BTreeSet::new();
        let mut resolved = Vec::new();
        let mut failures = Vec::new();
        for raw in requested {
            let key = raw.trim().to_ascii_uppercase();
            if !seen.insert(key) {
                continue;
            }
            match MarketCode::parse(raw) {
                Ok(market) => resolved.push(market),
                Err(err) => {
                    warn!(market = %raw.trim(), "skipping unknown market in batch request");
                    failures.push(MarketFailure {
                        market: raw.trim().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        debug!(
            trace_id = %self.client.context().trace_id,
            markets = resolved.len(),
            rejected = failures.len(),
            "dispatching batch generation"
        );

        let generated = join_all(resolved.into_iter().map(|market| async move {
            (market, self.client.generate(product, market).await)
        }))
        .await;

        let labels: BTreeMap<MarketCode, Label> = generated.into_iter().collect();

        Ok(MultiMarketResult {
            labels,
            failures,
            generated_at: Utc::now(),
        })
    }
}
