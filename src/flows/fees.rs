// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-chain fee estimation.
//!
//! The fee is the native-asset value of a fixed ZETA amount, quoted on the
//! connected chain's DEX, plus a 1% margin, rounded up to the cent.

use std::sync::Arc;

use alloy::primitives::U256;

use super::{FlowError, Precondition};
use crate::blockchain::{NetworkRegistry, QuoteRoute, QuoteSource};

/// Margin applied on top of the quote, in percent of the quote.
const MARGIN_PERCENT: u64 = 101;

pub struct FeeEstimator {
    quotes: Arc<dyn QuoteSource>,
    /// ZETA amount quoted, in azeta.
    amount_in: U256,
}

impl FeeEstimator {
    pub fn new(quotes: Arc<dyn QuoteSource>, amount_in: U256) -> Self {
        Self { quotes, amount_in }
    }

    /// Fee for settling through `network`, as a 2-decimal string.
    pub async fn estimate(
        &self,
        registry: &NetworkRegistry,
        network: Option<&str>,
    ) -> Result<String, FlowError> {
        let name = network
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(FlowError::MissingPrecondition(Precondition::Network))?;

        let network = registry
            .get(name)
            .ok_or_else(|| FlowError::UnsupportedNetwork(name.to_string()))?;

        let (Some(route), Some(zeta), Some(wrapped)) = (
            network.quote_route,
            network.zeta_token,
            network.wrapped_native,
        ) else {
            return Err(FlowError::UnsupportedNetwork(network.name.to_string()));
        };

        let quoted = match route {
            QuoteRoute::UniswapV3Quoter { quoter, fee_tier } => {
                self.quotes
                    .quote_exact_input_single(network, quoter, zeta, wrapped, fee_tier, self.amount_in)
                    .await
            }
            QuoteRoute::UniswapV2Router { router } => {
                self.quotes
                    .amounts_out(network, router, vec![zeta, wrapped], self.amount_in)
                    .await
            }
        }
        .map_err(|e| {
            tracing::warn!(network = network.name, error = %e, "Fee quote failed");
            e
        })?;

        let fee = apply_margin(quoted);
        tracing::debug!(network = network.name, quoted = %quoted, fee = %fee, "Fee estimated");
        Ok(fee)
    }
}

/// `ceil(quoted × 1.01)` to two decimals, for an 18-decimal `quoted`.
pub fn apply_margin(quoted: U256) -> String {
    let unit = U256::from(10u64).pow(U256::from(18));
    let scaled = quoted.saturating_mul(U256::from(MARGIN_PERCENT));

    let mut cents = scaled / unit;
    if !(scaled % unit).is_zero() {
        cents += U256::from(1u64);
    }

    let hundred = U256::from(100u64);
    let whole = cents / hundred;
    let fraction = (cents % hundred).as_limbs()[0];
    format!("{whole}.{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeQuotes;

    fn wei(amount: &str) -> U256 {
        crate::blockchain::parse_amount(amount, 18).unwrap()
    }

    fn estimator(quotes: &Arc<FakeQuotes>) -> FeeEstimator {
        FeeEstimator::new(quotes.clone(), wei("1"))
    }

    #[test]
    fn margin_rounds_up_to_the_cent() {
        assert_eq!(apply_margin(wei("1.236")), "1.25");
        assert_eq!(apply_margin(wei("1")), "1.01");
        assert_eq!(apply_margin(U256::ZERO), "0.00");
        assert_eq!(apply_margin(wei("0.0001")), "0.01");
        assert_eq!(apply_margin(wei("250")), "252.50");
    }

    #[test]
    fn fee_is_never_below_the_quote_plus_margin() {
        for quoted in ["0.5", "1.236", "3.333333", "17.99", "0.000000000000000001"] {
            let fee = wei(&apply_margin(wei(quoted)));
            let floor = wei(quoted) * U256::from(101u64) / U256::from(100u64);
            assert!(fee >= floor, "{quoted}");
        }
    }

    #[tokio::test]
    async fn v3_networks_use_the_quoter() {
        let quotes = Arc::new(FakeQuotes::returning(wei("1.236")));
        let fee = estimator(&quotes)
            .estimate(&NetworkRegistry::testnet(), Some("goerli_testnet"))
            .await
            .unwrap();

        assert_eq!(fee, "1.25");
        assert_eq!(*quotes.calls.lock().unwrap(), ["v3"]);
    }

    #[tokio::test]
    async fn v2_networks_use_the_router() {
        let quotes = Arc::new(FakeQuotes::returning(wei("0.2")));
        let fee = estimator(&quotes)
            .estimate(&NetworkRegistry::testnet(), Some("BSC_TESTNET"))
            .await
            .unwrap();

        assert_eq!(fee, "0.21");
        assert_eq!(*quotes.calls.lock().unwrap(), ["v2"]);
    }

    #[tokio::test]
    async fn missing_network_is_a_precondition() {
        let quotes = Arc::new(FakeQuotes::returning(wei("1")));
        let result = estimator(&quotes)
            .estimate(&NetworkRegistry::testnet(), Some("  "))
            .await;

        assert!(matches!(
            result,
            Err(FlowError::MissingPrecondition(Precondition::Network))
        ));
        assert!(quotes.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ledger_and_unknown_networks_are_unsupported() {
        let quotes = Arc::new(FakeQuotes::returning(wei("1")));
        let registry = NetworkRegistry::testnet();

        for name in ["zeta_testnet", "sepolia"] {
            let result = estimator(&quotes).estimate(&registry, Some(name)).await;
            assert!(matches!(result, Err(FlowError::UnsupportedNetwork(_))), "{name}");
        }
    }

    #[tokio::test]
    async fn quote_failures_propagate() {
        let quotes = Arc::new(FakeQuotes::failing("rpc down"));
        let result = estimator(&quotes)
            .estimate(&NetworkRegistry::testnet(), Some("mumbai_testnet"))
            .await;

        let err = result.unwrap_err();
        assert!(err.is_retryable());
    }
}
