// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Balance table view-model.
//!
//! Records and the staked total are fetched once per [`BalanceView::load`];
//! collapsing or expanding the table is local state and never re-fetches.

use alloy::primitives::{Address, U256};
use serde::Serialize;
use utoipa::ToSchema;

use super::FlowError;
use crate::blockchain::{BalanceRecord, BalanceSource, CoinType};
use crate::providers::StakingSource;

/// Rows shown while the table is collapsed.
pub const COLLAPSED_ROW_LIMIT: usize = 5;

const SHOW_ALL_LABEL: &str = "Show all assets";
const COLLAPSE_LABEL: &str = "Collapse";

#[derive(Debug, Clone)]
pub struct BalanceView {
    records: Vec<BalanceRecord>,
    staked_total: U256,
    show_all: bool,
}

/// One rendered row of the balance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BalanceRow {
    pub ticker: String,
    pub chain_name: String,
    pub coin_type: CoinType,
    /// USD price with 2 decimals, empty when unknown
    pub price: String,
    /// Balance with 2 decimals, `N/A` when unknown
    pub balance: String,
    /// Staking affordance, only on the native ZETA row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stake: Option<String>,
}

impl BalanceView {
    /// Fetch balances and the staked total for `account`, collapsed.
    pub async fn load(
        account: Address,
        balances: &dyn BalanceSource,
        staking: &dyn StakingSource,
    ) -> Result<Self, FlowError> {
        let records = balances.balances(account).await.map_err(|e| {
            tracing::warn!(account = %account, error = %e, "Failed to load balances");
            e
        })?;

        let staked_total = match staking.staked_total(account).await {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(account = %account, error = %e, "Staking lookup failed, assuming none");
                U256::ZERO
            }
        };

        Ok(Self::from_records(records, staked_total))
    }

    pub fn from_records(records: Vec<BalanceRecord>, staked_total: U256) -> Self {
        Self {
            records,
            staked_total,
            show_all: false,
        }
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn total_rows(&self) -> usize {
        self.records.len()
    }

    pub fn staked_total(&self) -> U256 {
        self.staked_total
    }

    /// Label of the expand/collapse control, absent when nothing is hidden.
    pub fn toggle_label(&self) -> Option<&'static str> {
        if self.records.len() <= COLLAPSED_ROW_LIMIT {
            None
        } else if self.show_all {
            Some(COLLAPSE_LABEL)
        } else {
            Some(SHOW_ALL_LABEL)
        }
    }

    pub fn rows(&self) -> Vec<BalanceRow> {
        let visible = if self.show_all {
            self.records.len()
        } else {
            COLLAPSED_ROW_LIMIT
        };

        self.records
            .iter()
            .take(visible)
            .map(|record| BalanceRow {
                ticker: record.ticker.clone(),
                chain_name: record.chain_name.clone(),
                coin_type: record.coin_type,
                price: format_price(record.price),
                balance: format_balance_cell(record.balance.as_deref()),
                stake: (record.ticker == "ZETA" && record.coin_type == CoinType::Gas)
                    .then(|| stake_label(self.staked_total)),
            })
            .collect()
    }
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) if price.is_finite() => format!("{price:.2}"),
        _ => String::new(),
    }
}

pub fn format_balance_cell(balance: Option<&str>) -> String {
    match balance.and_then(|b| b.trim().parse::<f64>().ok()) {
        Some(value) if value.is_finite() => format!("{value:.2}"),
        _ => "N/A".to_string(),
    }
}

/// `Stake ZETA`, or the staked total in whole ZETA rounded half-up.
pub fn stake_label(staked: U256) -> String {
    if staked.is_zero() {
        return "Stake ZETA".to_string();
    }
    let unit = U256::from(10u64).pow(U256::from(18));
    let half = unit / U256::from(2u64);
    format!("Staked: {}", staked.saturating_add(half) / unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{balance, FakeBalances, FakeStaking, OWNER};

    fn records(count: usize) -> Vec<BalanceRecord> {
        (0..count)
            .map(|i| balance("ETH", &format!("chain_{i}"), CoinType::Gas, Some("1")))
            .collect()
    }

    #[test]
    fn collapsed_table_shows_five_rows() {
        let mut view = BalanceView::from_records(records(7), U256::ZERO);
        assert_eq!(view.rows().len(), 5);
        assert_eq!(view.toggle_label(), Some("Show all assets"));

        view.toggle_show_all();
        assert_eq!(view.rows().len(), 7);
        assert_eq!(view.toggle_label(), Some("Collapse"));

        view.toggle_show_all();
        assert_eq!(view.rows().len(), 5);
    }

    #[test]
    fn no_toggle_for_short_tables() {
        let view = BalanceView::from_records(records(5), U256::ZERO);
        assert_eq!(view.rows().len(), 5);
        assert_eq!(view.toggle_label(), None);

        let empty = BalanceView::from_records(Vec::new(), U256::ZERO);
        assert!(empty.rows().is_empty());
    }

    #[test]
    fn cells_are_formatted() {
        assert_eq!(format_price(Some(1.5)), "1.50");
        assert_eq!(format_price(None), "");
        assert_eq!(format_balance_cell(Some("12.3456")), "12.35");
        assert_eq!(format_balance_cell(Some("0")), "0.00");
        assert_eq!(format_balance_cell(Some("lots")), "N/A");
        assert_eq!(format_balance_cell(None), "N/A");
    }

    #[test]
    fn stake_affordance_only_on_native_zeta() {
        let view = BalanceView::from_records(
            vec![
                balance("ZETA", "zeta_testnet", CoinType::Gas, Some("3")),
                balance("ZETA", "goerli_testnet", CoinType::Erc20, Some("1")),
                balance("ETH", "goerli_testnet", CoinType::Gas, Some("1")),
            ],
            U256::ZERO,
        );
        let rows = view.rows();
        assert_eq!(rows[0].stake.as_deref(), Some("Stake ZETA"));
        assert_eq!(rows[1].stake, None);
        assert_eq!(rows[2].stake, None);
    }

    #[test]
    fn staked_label_rounds_half_up() {
        assert_eq!(stake_label(U256::ZERO), "Stake ZETA");
        assert_eq!(stake_label(U256::from(2_500_000_000_000_000_000u128)), "Staked: 3");
        assert_eq!(stake_label(U256::from(2_499_999_999_999_999_999u128)), "Staked: 2");
        assert_eq!(stake_label(U256::from(1u64)), "Staked: 0");
    }

    #[tokio::test]
    async fn toggling_never_refetches() {
        let source = FakeBalances::new(records(6));
        let mut view = BalanceView::load(OWNER, &source, &FakeStaking(Some(U256::ZERO)))
            .await
            .unwrap();

        assert_eq!(view.rows().len(), 5);
        view.toggle_show_all();
        assert_eq!(view.rows().len(), 6);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn staking_failure_counts_as_zero() {
        let source = FakeBalances::new(vec![balance("ZETA", "zeta_testnet", CoinType::Gas, None)]);
        let view = BalanceView::load(OWNER, &source, &FakeStaking(None))
            .await
            .unwrap();

        assert_eq!(view.staked_total(), U256::ZERO);
        let rows = view.rows();
        assert_eq!(rows[0].stake.as_deref(), Some("Stake ZETA"));
        assert_eq!(rows[0].balance, "N/A");
    }
}
