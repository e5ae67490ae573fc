// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ZetaChain Cosmos REST API (staking delegations).

use std::time::Duration;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use bech32::{ToBase32, Variant};
use reqwest::Client;
use serde::Deserialize;

/// Public Athens testnet LCD endpoint.
pub const DEFAULT_ZETA_API_URL: &str = "https://zetachain-athens.blockpi.network/lcd/v1/public";

/// Bech32 prefix of ZetaChain account addresses.
const ZETA_HRP: &str = "zeta";

/// Base denomination of ZETA (18 decimals).
const STAKE_DENOM: &str = "azeta";

#[derive(Debug, thiserror::Error)]
pub enum ZetaApiError {
    #[error("ZetaChain API request failed: {0}")]
    Request(String),

    #[error("ZetaChain API response was invalid: {0}")]
    InvalidResponse(String),

    #[error("Address encoding failed: {0}")]
    Encoding(String),
}

/// Source of the total amount an account has staked.
#[async_trait]
pub trait StakingSource: Send + Sync {
    /// Sum of all delegations of `account`, in azeta.
    async fn staked_total(&self, account: Address) -> Result<U256, ZetaApiError>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct DelegationsResponse {
    #[serde(default)]
    delegation_responses: Vec<DelegationResponse>,
}

#[derive(Debug, Deserialize)]
struct DelegationResponse {
    balance: Coin,
}

#[derive(Debug, Deserialize)]
struct Coin {
    denom: String,
    amount: String,
}

#[derive(Debug, Clone)]
pub struct ZetaApiClient {
    base_url: String,
    http: Client,
}

impl ZetaApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ZetaApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ZetaApiError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn delegations_url(&self, bech32_address: &str) -> String {
        format!(
            "{}/cosmos/staking/v1beta1/delegations/{}",
            self.base_url, bech32_address
        )
    }
}

#[async_trait]
impl StakingSource for ZetaApiClient {
    async fn staked_total(&self, account: Address) -> Result<U256, ZetaApiError> {
        let delegator = evm_to_bech32(account)?;
        let response = self
            .http
            .get(self.delegations_url(&delegator))
            .send()
            .await
            .map_err(|e| ZetaApiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZetaApiError::Request(format!(
                "delegations lookup returned {status}"
            )));
        }

        let body: DelegationsResponse = response
            .json()
            .await
            .map_err(|e| ZetaApiError::InvalidResponse(e.to_string()))?;

        sum_delegations(&body)
    }
}

/// Encode an EVM address as a `zeta1…` account address.
pub fn evm_to_bech32(address: Address) -> Result<String, ZetaApiError> {
    bech32::encode(ZETA_HRP, address.as_slice().to_base32(), Variant::Bech32)
        .map_err(|e| ZetaApiError::Encoding(e.to_string()))
}

/// Total of every `azeta` delegation balance.
pub(crate) fn sum_delegations(body: &DelegationsResponse) -> Result<U256, ZetaApiError> {
    body.delegation_responses
        .iter()
        .filter(|d| d.balance.denom == STAKE_DENOM)
        .try_fold(U256::ZERO, |total, d| {
            let amount: U256 = d.balance.amount.parse().map_err(|_| {
                ZetaApiError::InvalidResponse(format!(
                    "delegation amount {:?} is not an integer",
                    d.balance.amount
                ))
            })?;
            Ok(total.saturating_add(amount))
        })
}
