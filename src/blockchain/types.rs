// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network table and shared blockchain types.
//!
//! Every chain the service talks to is described by a [`NetworkConfig`]. The
//! ledger chain (ZetaChain Athens testnet) hosts the invoice contract; every
//! other entry is a *connected* chain from which payers settle invoices by
//! depositing into the ZetaChain TSS address.

use std::borrow::Cow;

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How the native-asset price of ZETA is quoted on a connected chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteRoute {
    /// Uniswap V3 `Quoter.quoteExactInputSingle`.
    UniswapV3Quoter { quoter: Address, fee_tier: u32 },
    /// Uniswap V2-style `Router02.getAmountsOut`.
    UniswapV2Router { router: Address },
}

/// Chain network configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Network identifier used in requests (e.g. `goerli_testnet`)
    pub name: &'static str,
    /// Network name for display
    pub display_name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: Cow<'static, str>,
    /// Block explorer URL
    pub explorer_url: &'static str,
    /// Ticker of the native gas asset
    pub native_symbol: &'static str,
    /// ZetaChain TSS address accepting cross-chain deposits (connected chains only)
    pub tss_address: Option<Address>,
    /// ZETA ERC-20 token on this chain
    pub zeta_token: Option<Address>,
    /// Wrapped native asset used as the quote output token
    pub wrapped_native: Option<Address>,
    /// DEX route used for fee quotes
    pub quote_route: Option<QuoteRoute>,
}

impl NetworkConfig {
    /// Replace the RPC endpoint, keeping everything else.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Cow::Owned(rpc_url.into());
        self
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }
}

/// ZetaChain TSS address on the Athens testnet connected chains.
const ATHENS_TSS: Address = address!("8531a5ab847ff5b22d855633c25ed1da3255247e");

/// ZetaChain Athens testnet (ledger chain).
pub const ZETA_TESTNET: NetworkConfig = NetworkConfig {
    name: "zeta_testnet",
    display_name: "ZetaChain Athens Testnet",
    chain_id: 7001,
    rpc_url: Cow::Borrowed("https://zetachain-athens-evm.blockpi.network/v1/rpc/public"),
    explorer_url: "https://athens.explorer.zetachain.com",
    native_symbol: "ZETA",
    tss_address: None,
    zeta_token: None,
    wrapped_native: None,
    quote_route: None,
};

/// Ethereum Goerli testnet.
pub const GOERLI_TESTNET: NetworkConfig = NetworkConfig {
    name: "goerli_testnet",
    display_name: "Ethereum Goerli",
    chain_id: 5,
    rpc_url: Cow::Borrowed("https://rpc.ankr.com/eth_goerli"),
    explorer_url: "https://goerli.etherscan.io",
    native_symbol: "ETH",
    tss_address: Some(ATHENS_TSS),
    zeta_token: Some(address!("0000c304d2934c00db1d51995b9f6996affd17c0")),
    wrapped_native: Some(address!("b4fbf271143f4fbf7b91a5ded31805e42b2208d6")),
    quote_route: Some(QuoteRoute::UniswapV3Quoter {
        quoter: address!("b27308f9f90d607463bb33ea1bebb41c27ce5ab6"),
        fee_tier: 500,
    }),
};

/// Polygon Mumbai testnet.
pub const MUMBAI_TESTNET: NetworkConfig = NetworkConfig {
    name: "mumbai_testnet",
    display_name: "Polygon Mumbai",
    chain_id: 80001,
    rpc_url: Cow::Borrowed("https://rpc.ankr.com/polygon_mumbai"),
    explorer_url: "https://mumbai.polygonscan.com",
    native_symbol: "MATIC",
    tss_address: Some(ATHENS_TSS),
    zeta_token: Some(address!("0000a7db254145767262c6a81a7ee1650684258e")),
    wrapped_native: Some(address!("9c3c9283d3e44854697cd22d3faa240cfb032889")),
    quote_route: Some(QuoteRoute::UniswapV2Router {
        router: address!("8954afa98594b838bda56fe4c12a09d7739d179b"),
    }),
};

/// BNB Smart Chain testnet.
pub const BSC_TESTNET: NetworkConfig = NetworkConfig {
    name: "bsc_testnet",
    display_name: "BNB Chain Testnet",
    chain_id: 97,
    rpc_url: Cow::Borrowed("https://data-seed-prebsc-1-s1.binance.org:8545"),
    explorer_url: "https://testnet.bscscan.com",
    native_symbol: "BNB",
    tss_address: Some(ATHENS_TSS),
    zeta_token: Some(address!("0000c9ec4042283e8139c74f4c64bcd1e0b9b54f")),
    wrapped_native: Some(address!("ae13d989dac2f0debff460ac112a837c89baa7cd")),
    quote_route: Some(QuoteRoute::UniswapV2Router {
        router: address!("9ac64cc6e4415144c455bd8e4837fea55603e5c3"),
    }),
};

/// Default invoice ledger contract on the ZetaChain testnet.
pub const DEFAULT_INVOICE_CONTRACT: Address = address!("8a3f33ee4fd57b5065633d12d2e834d14bdfe667");

/// The set of networks known to this deployment.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    ledger: NetworkConfig,
    connected: Vec<NetworkConfig>,
}

impl NetworkRegistry {
    pub fn new(ledger: NetworkConfig, connected: Vec<NetworkConfig>) -> Self {
        Self { ledger, connected }
    }

    /// Registry of the ZetaChain Athens testnet and its connected chains.
    pub fn testnet() -> Self {
        Self::new(
            ZETA_TESTNET,
            vec![GOERLI_TESTNET, MUMBAI_TESTNET, BSC_TESTNET],
        )
    }

    /// The chain hosting the invoice ledger.
    pub fn ledger(&self) -> &NetworkConfig {
        &self.ledger
    }

    /// Chains from which invoices can be paid.
    pub fn connected(&self) -> &[NetworkConfig] {
        &self.connected
    }

    /// Every network, ledger first.
    pub fn all(&self) -> impl Iterator<Item = &NetworkConfig> {
        std::iter::once(&self.ledger).chain(self.connected.iter())
    }

    /// Look a network up by identifier (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&NetworkConfig> {
        let wanted = name.trim();
        self.all().find(|n| n.name.eq_ignore_ascii_case(wanted))
    }

    /// Whether `network` is the ledger chain.
    pub fn is_ledger(&self, network: &NetworkConfig) -> bool {
        network.chain_id == self.ledger.chain_id
    }

    /// Apply an RPC override to the named network.
    pub fn override_rpc_url(&mut self, name: &str, rpc_url: String) {
        if self.ledger.name == name {
            self.ledger.rpc_url = Cow::Owned(rpc_url);
            return;
        }
        if let Some(network) = self.connected.iter_mut().find(|n| n.name == name) {
            network.rpc_url = Cow::Owned(rpc_url);
        }
    }
}

/// Reduce an RPC URL to scheme and host so that API keys embedded in the path
/// or query never reach the logs.
pub fn redact_rpc_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(url) => match url.host_str() {
            Some(host) => format!("{}://{}", url.scheme(), host),
            None => url.scheme().to_string(),
        },
        Err(_) => "<invalid url>".to_string(),
    }
}

/// Network summary returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NetworkSummary {
    /// Network identifier
    pub name: String,
    /// Display name
    pub display_name: String,
    /// Chain ID
    pub chain_id: u64,
    /// Native asset ticker
    pub native_symbol: String,
    /// Whether this chain hosts the invoice ledger
    pub ledger: bool,
    /// Whether invoices can be paid from this chain
    pub payable: bool,
}

impl NetworkSummary {
    pub fn from_config(network: &NetworkConfig, ledger: bool) -> Self {
        Self {
            name: network.name.to_string(),
            display_name: network.display_name.to_string(),
            chain_id: network.chain_id,
            native_symbol: network.native_symbol.to_string(),
            ledger,
            payable: !ledger && network.tss_address.is_some(),
        }
    }
}
