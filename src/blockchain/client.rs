// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only EVM client for one network.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, TxHash, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::TransportError,
};

use super::erc20::Erc20Contract;
use super::types::{redact_rpc_url, NetworkConfig};

/// Transaction receipt summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction hash
    pub tx_hash: String,
    /// Block number where transaction was included
    pub block_number: u64,
    /// Gas actually used
    pub gas_used: u64,
    /// Whether the transaction was successful
    pub success: bool,
}

/// EVM client bound to a single network endpoint.
#[derive(Clone)]
pub struct EvmClient {
    /// Network configuration
    network: NetworkConfig,
    /// Alloy HTTP provider
    provider: DynProvider,
}

impl EvmClient {
    /// Create a new client for the specified network.
    pub fn new(network: NetworkConfig) -> Result<Self, ChainClientError> {
        let url = parse_rpc_url(&network)?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        tracing::debug!(
            network = network.name,
            rpc = %redact_rpc_url(&network.rpc_url),
            "EVM client created"
        );

        Ok(Self { network, provider })
    }

    /// Create a client whose provider signs transactions with `wallet`.
    pub fn with_wallet(
        network: NetworkConfig,
        wallet: EthereumWallet,
    ) -> Result<Self, ChainClientError> {
        let url = parse_rpc_url(&network)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased();

        Ok(Self { network, provider })
    }

    /// Get the native balance for an address.
    pub async fn get_native_balance(&self, address: Address) -> Result<U256, ChainClientError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ChainClientError::RpcError(e.to_string()))
    }

    /// Get the ERC-20 token balance for an address, in token units.
    pub async fn get_token_balance(
        &self,
        wallet_address: Address,
        token_address: Address,
    ) -> Result<(U256, u8), ChainClientError> {
        let contract = Erc20Contract::new(&self.provider, token_address);
        contract.balance_of(wallet_address).await
    }

    /// Get the current block number.
    pub async fn get_block_number(&self) -> Result<u64, ChainClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| ChainClientError::RpcError(e.to_string()))
    }

    /// Get the transaction status by checking for a receipt.
    ///
    /// Returns `None` while the transaction is not mined.
    pub async fn get_transaction_status(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TxReceipt>, ChainClientError> {
        let hash: TxHash = tx_hash
            .parse()
            .map_err(|e| ChainClientError::InvalidTxHash(format!("{e}")))?;

        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| ChainClientError::RpcError(format!("Failed to get receipt: {}", e)))?;

        Ok(receipt.map(|r| TxReceipt {
            tx_hash: tx_hash.to_string(),
            block_number: r.block_number.unwrap_or(0),
            gas_used: r.gas_used,
            success: r.status(),
        }))
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Underlying provider, for contract bindings.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Create a signer from a private key (hex string, optional 0x prefix).
    pub fn create_signer(private_key_hex: &str) -> Result<PrivateKeySigner, ChainClientError> {
        let trimmed = private_key_hex.trim();
        let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let key_bytes = alloy::hex::decode(hex)
            .map_err(|e| ChainClientError::InvalidPrivateKey(e.to_string()))?;

        PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| ChainClientError::InvalidPrivateKey(e.to_string()))
    }

    /// Create an Ethereum wallet from a signer.
    pub fn create_wallet(signer: PrivateKeySigner) -> EthereumWallet {
        EthereumWallet::from(signer)
    }
}

fn parse_rpc_url(network: &NetworkConfig) -> Result<url::Url, ChainClientError> {
    network
        .rpc_url
        .parse()
        .map_err(|e: url::ParseError| ChainClientError::InvalidRpcUrl(e.to_string()))
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl ChainClientError {
    /// Transport failures may succeed on a later attempt; everything else is
    /// a terminal input, contract-logic or rejected-transaction failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RpcError(_))
    }

    /// Classify a failed contract call. Only an error response from the node
    /// (revert, bad call) is a contract error; a request that never got a
    /// response is a transport failure.
    pub fn from_contract(e: alloy::contract::Error) -> Self {
        match e {
            alloy::contract::Error::TransportError(e) if e.is_error_resp() => {
                Self::ContractError(e.to_string())
            }
            alloy::contract::Error::TransportError(e) => Self::RpcError(e.to_string()),
            other => Self::ContractError(other.to_string()),
        }
    }

    /// Classify a failed `eth_sendTransaction` or filler request. The node
    /// rejecting the transaction (revert, insufficient funds) is terminal.
    pub fn from_send(e: TransportError) -> Self {
        if e.is_error_resp() {
            Self::TransactionFailed(e.to_string())
        } else {
            Self::RpcError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::ZETA_TESTNET;

    // Well-known anvil test key #0.
    const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn create_signer_accepts_prefixed_and_bare_hex() {
        let bare = EvmClient::create_signer(TEST_KEY).unwrap();
        let prefixed = EvmClient::create_signer(&format!("0x{TEST_KEY}")).unwrap();
        assert_eq!(bare.address(), prefixed.address());
        assert_eq!(
            format!("{:?}", bare.address()).to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn create_signer_rejects_garbage() {
        assert!(matches!(
            EvmClient::create_signer("zz"),
            Err(ChainClientError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn invalid_rpc_url_is_rejected() {
        let network = ZETA_TESTNET.with_rpc_url("not a url");
        assert!(matches!(
            EvmClient::new(network),
            Err(ChainClientError::InvalidRpcUrl(_))
        ));
    }

    #[test]
    fn retryable_classification() {
        assert!(ChainClientError::RpcError("timeout".into()).is_retryable());
        assert!(!ChainClientError::ContractError("revert".into()).is_retryable());
        assert!(!ChainClientError::TransactionFailed("insufficient funds".into()).is_retryable());
        assert!(!ChainClientError::InvalidTxHash("x".into()).is_retryable());
    }

    #[test]
    fn transport_failures_of_contract_calls_are_retryable() {
        let transport = alloy::transports::TransportErrorKind::custom_str("connection refused");
        let err = ChainClientError::from_contract(alloy::contract::Error::TransportError(transport));
        assert!(matches!(err, ChainClientError::RpcError(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn abi_failures_of_contract_calls_are_terminal() {
        let err = ChainClientError::from_contract(alloy::contract::Error::UnknownFunction(
            "getInvoice".into(),
        ));
        assert!(matches!(err, ChainClientError::ContractError(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn send_transport_failures_are_retryable() {
        let err = ChainClientError::from_send(
            alloy::transports::TransportErrorKind::custom_str("timed out"),
        );
        assert!(matches!(err, ChainClientError::RpcError(_)));
    }

    #[tokio::test]
    async fn invalid_tx_hash_is_rejected_before_rpc() {
        let client = EvmClient::new(ZETA_TESTNET.with_rpc_url("http://127.0.0.1:1")).unwrap();
        assert!(matches!(
            client.get_transaction_status("0x1234").await,
            Err(ChainClientError::InvalidTxHash(_))
        ));
    }
}
