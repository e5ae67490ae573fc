// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction submission and amount helpers.
//!
//! Settlement transactions are plain value transfers carrying call data, so
//! the sender only needs `to`, `value` and `input`; nonce, gas and fees are
//! filled by the provider.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;

use super::client::{ChainClientError, EvmClient};
use super::types::NetworkConfig;

/// An unsigned transaction ready to be signed by any wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    /// Chain the transaction must be sent on
    pub chain_id: u64,
    /// Recipient
    pub to: Address,
    /// Native value in wei
    pub value: U256,
    /// Call data
    pub data: Bytes,
}

/// Transaction send result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    /// Transaction hash
    pub tx_hash: String,
    /// Explorer URL for the transaction
    pub explorer_url: String,
}

/// Something that can sign and broadcast transactions on one network.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Network the sender is bound to.
    fn network(&self) -> &NetworkConfig;

    /// Address transactions are sent from.
    fn address(&self) -> Address;

    /// Sign and broadcast `tx`, returning as soon as the node accepts it.
    async fn send(&self, tx: PreparedTransaction) -> Result<SendResult, ChainClientError>;
}

/// [`TransactionSender`] backed by a local private key.
pub struct WalletSender {
    client: EvmClient,
    from: Address,
}

impl WalletSender {
    pub fn new(network: NetworkConfig, signer: PrivateKeySigner) -> Result<Self, ChainClientError> {
        let from = signer.address();
        let client = EvmClient::with_wallet(network, EvmClient::create_wallet(signer))?;
        Ok(Self { client, from })
    }
}

#[async_trait]
impl TransactionSender for WalletSender {
    fn network(&self) -> &NetworkConfig {
        self.client.network()
    }

    fn address(&self) -> Address {
        self.from
    }

    async fn send(&self, tx: PreparedTransaction) -> Result<SendResult, ChainClientError> {
        let network = self.client.network();
        if tx.chain_id != network.chain_id {
            return Err(ChainClientError::TransactionFailed(format!(
                "transaction for chain {} cannot be sent on {}",
                tx.chain_id, network.name
            )));
        }

        let request = TransactionRequest::default()
            .with_from(self.from)
            .with_to(tx.to)
            .with_value(tx.value)
            .with_input(tx.data)
            .with_chain_id(tx.chain_id);

        let pending = self
            .client
            .provider()
            .send_transaction(request)
            .await
            .map_err(ChainClientError::from_send)?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        let explorer_url = network.tx_url(&tx_hash);

        tracing::info!(
            network = network.name,
            tx_hash = %tx_hash,
            "Transaction broadcast"
        );

        Ok(SendResult {
            tx_hash,
            explorer_url,
        })
    }
}

/// Parse a human-readable amount to wei (or token units).
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "0.01")
/// * `decimals` - Number of decimals (18 for native assets)
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, ChainClientError> {
    let amount = amount.trim();
    let parts: Vec<&str> = amount.split('.').collect();

    if amount.is_empty() || parts.len() > 2 {
        return Err(ChainClientError::InvalidAmount(format!(
            "Invalid amount format: {amount:?}"
        )));
    }

    let whole = if parts[0].is_empty() {
        0u128
    } else {
        parts[0]
            .parse::<u128>()
            .map_err(|_| ChainClientError::InvalidAmount("Invalid whole number".to_string()))?
    };

    let decimal_part = if parts.len() == 2 {
        let dec_str = parts[1];
        if dec_str.len() > decimals as usize {
            return Err(ChainClientError::InvalidAmount(format!(
                "Too many decimal places (max {})",
                decimals
            )));
        }
        if dec_str.is_empty() {
            0u128
        } else {
            let padded = format!("{:0<width$}", dec_str, width = decimals as usize);
            padded
                .parse::<u128>()
                .map_err(|_| ChainClientError::InvalidAmount("Invalid decimal".to_string()))?
        }
    } else {
        0u128
    };

    let multiplier = 10u128.pow(decimals as u32);
    let total = whole
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(decimal_part))
        .ok_or_else(|| ChainClientError::InvalidAmount("Amount overflow".to_string()))?;

    Ok(U256::from(total))
}

/// Format wei (or token units) to a human-readable amount.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        }
    }
}
