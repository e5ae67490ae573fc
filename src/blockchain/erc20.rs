// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 token contract interactions (ZETA on connected chains).

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    sol,
};

use super::client::ChainClientError;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
    }
}

/// ERC-20 contract wrapper.
pub struct Erc20Contract<P> {
    contract: IERC20::IERC20Instance<P>,
}

impl<P: Provider + Clone> Erc20Contract<P> {
    pub fn new(provider: &P, contract_address: Address) -> Self {
        Self {
            contract: IERC20::new(contract_address, provider.clone()),
        }
    }

    /// Get the token decimals.
    pub async fn decimals(&self) -> Result<u8, ChainClientError> {
        self.contract
            .decimals()
            .call()
            .await
            .map_err(ChainClientError::from_contract)
    }

    /// Raw balance of `wallet_address` together with the token decimals.
    pub async fn balance_of(
        &self,
        wallet_address: Address,
    ) -> Result<(U256, u8), ChainClientError> {
        let decimals: u8 = self.decimals().await.unwrap_or(18);

        let balance: U256 = self
            .contract
            .balanceOf(wallet_address)
            .call()
            .await
            .map_err(ChainClientError::from_contract)?;

        Ok((balance, decimals))
    }
}
