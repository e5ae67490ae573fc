// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account balances across every registered network.

use std::collections::HashMap;

use alloy::primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::client::{ChainClientError, EvmClient};
use super::transactions::format_amount;
use super::types::NetworkRegistry;

/// Kind of asset a balance row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CoinType {
    /// Native gas asset of the chain.
    Gas,
    /// ERC-20 token on a connected chain.
    #[serde(rename = "ERC20")]
    Erc20,
    /// ZRC-20 token on the ledger chain.
    #[serde(rename = "ZRC20")]
    Zrc20,
}

impl std::fmt::Display for CoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoinType::Gas => f.write_str("Gas"),
            CoinType::Erc20 => f.write_str("ERC20"),
            CoinType::Zrc20 => f.write_str("ZRC20"),
        }
    }
}

/// One balance as fetched from a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRecord {
    pub ticker: String,
    pub chain_name: String,
    pub coin_type: CoinType,
    /// USD price, when known.
    pub price: Option<f64>,
    /// Decimal string; `None` when the chain could not report it.
    pub balance: Option<String>,
}

/// Source of balance records for an account.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balances(&self, account: Address) -> Result<Vec<BalanceRecord>, ChainClientError>;
}

/// [`BalanceSource`] querying each network's RPC endpoint.
pub struct EvmBalanceSource {
    registry: NetworkRegistry,
    prices: HashMap<String, f64>,
}

impl EvmBalanceSource {
    /// `prices` maps upper-case tickers to USD prices.
    pub fn new(registry: NetworkRegistry, prices: HashMap<String, f64>) -> Self {
        Self { registry, prices }
    }

    fn price_of(&self, ticker: &str) -> Option<f64> {
        self.prices.get(&ticker.to_ascii_uppercase()).copied()
    }
}

#[async_trait]
impl BalanceSource for EvmBalanceSource {
    async fn balances(&self, account: Address) -> Result<Vec<BalanceRecord>, ChainClientError> {
        let mut records = Vec::new();

        for network in self.registry.all() {
            let client = match EvmClient::new(network.clone()) {
                Ok(client) => client,
                Err(e) => {
                    tracing::warn!(network = network.name, error = %e, "Skipping network");
                    continue;
                }
            };

            match client.get_native_balance(account).await {
                Ok(balance) => records.push(BalanceRecord {
                    ticker: network.native_symbol.to_string(),
                    chain_name: network.name.to_string(),
                    coin_type: CoinType::Gas,
                    price: self.price_of(network.native_symbol),
                    balance: Some(format_amount(balance, 18)),
                }),
                Err(e) => {
                    tracing::warn!(
                        network = network.name,
                        error = %e,
                        "Failed to get native balance"
                    );
                }
            }

            let Some(zeta_token) = network.zeta_token else {
                continue;
            };
            match client.get_token_balance(account, zeta_token).await {
                Ok((balance, decimals)) => records.push(BalanceRecord {
                    ticker: "ZETA".to_string(),
                    chain_name: network.name.to_string(),
                    coin_type: CoinType::Erc20,
                    price: self.price_of("ZETA"),
                    balance: Some(format_amount(balance, decimals)),
                }),
                Err(e) => {
                    tracing::warn!(
                        network = network.name,
                        token = %zeta_token,
                        error = %e,
                        "Failed to get ZETA token balance"
                    );
                }
            }
        }

        Ok(records)
    }
}
