// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DEX quote contracts used to price ZETA in a chain's native asset.

use alloy::{
    primitives::{aliases::U24, Address, U160, U256},
    sol,
};
use async_trait::async_trait;

use super::client::{ChainClientError, EvmClient};
use super::types::NetworkConfig;

sol! {
    #[sol(rpc)]
    interface IQuoter {
        function quoteExactInputSingle(
            address tokenIn,
            address tokenOut,
            uint24 fee,
            uint256 amountIn,
            uint160 sqrtPriceLimitX96
        ) external returns (uint256 amountOut);
    }
}

sol! {
    #[sol(rpc)]
    interface IUniswapV2Router02 {
        function getAmountsOut(uint256 amountIn, address[] calldata path)
            external
            view
            returns (uint256[] memory amounts);
    }
}

/// Source of "amount out" quotes on a network's DEX contracts.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Uniswap V3 single-pool exact-input quote.
    async fn quote_exact_input_single(
        &self,
        network: &NetworkConfig,
        quoter: Address,
        token_in: Address,
        token_out: Address,
        fee_tier: u32,
        amount_in: U256,
    ) -> Result<U256, ChainClientError>;

    /// Uniswap V2 router quote along `path`; returns the final hop amount.
    async fn amounts_out(
        &self,
        network: &NetworkConfig,
        router: Address,
        path: Vec<Address>,
        amount_in: U256,
    ) -> Result<U256, ChainClientError>;
}

/// [`QuoteSource`] issuing `eth_call`s against the network's RPC endpoint.
#[derive(Default)]
pub struct DexQuoter;

impl DexQuoter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuoteSource for DexQuoter {
    async fn quote_exact_input_single(
        &self,
        network: &NetworkConfig,
        quoter: Address,
        token_in: Address,
        token_out: Address,
        fee_tier: u32,
        amount_in: U256,
    ) -> Result<U256, ChainClientError> {
        let client = EvmClient::new(network.clone())?;
        let fee = U24::try_from(fee_tier)
            .map_err(|_| ChainClientError::InvalidAmount(format!("fee tier {fee_tier}")))?;

        // The V3 quoter is not a view function; `call` simulates it.
        IQuoter::new(quoter, client.provider().clone())
            .quoteExactInputSingle(token_in, token_out, fee, amount_in, U160::ZERO)
            .call()
            .await
            .map_err(ChainClientError::from_contract)
    }

    async fn amounts_out(
        &self,
        network: &NetworkConfig,
        router: Address,
        path: Vec<Address>,
        amount_in: U256,
    ) -> Result<U256, ChainClientError> {
        let client = EvmClient::new(network.clone())?;

        let amounts = IUniswapV2Router02::new(router, client.provider().clone())
            .getAmountsOut(amount_in, path)
            .call()
            .await
            .map_err(ChainClientError::from_contract)?;

        amounts
            .last()
            .copied()
            .ok_or_else(|| ChainClientError::ContractError("empty getAmountsOut result".into()))
    }
}
