// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. All types derive `ToSchema`
//! for OpenAPI documentation.
//!
//! Amounts cross the API as decimal strings: `uint256` values do not fit in
//! a JSON number.
//!
//! ## Model Categories
//!
//! - **Balances**: Balance table rows and toggle state
//! - **Invoices**: Creation, lookup and listing
//! - **Settlement**: Unsigned and submitted settlement transactions
//! - **Fees**: Cross-chain fee estimates
//! - **Transactions**: Receipt status lookups

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::{InvoiceRecord, TxReceipt};
use crate::flows::balances::{BalanceRow, BalanceView};
use crate::flows::invoices::{InvoiceListing, InvoiceStatus, InvoiceSummary};
use crate::flows::settlement::PreparedSettlement;
use crate::store::SettlementRecord;

// =============================================================================
// Balances
// =============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct BalancesResponse {
    pub address: String,
    pub rows: Vec<BalanceRow>,
    /// Number of balances before collapsing
    pub total_rows: usize,
    pub show_all: bool,
    /// Label of the expand/collapse control, absent when nothing is hidden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_label: Option<String>,
}

impl BalancesResponse {
    pub fn from_view(address: String, view: &BalanceView) -> Self {
        Self {
            address,
            rows: view.rows(),
            total_rows: view.total_rows(),
            show_all: view.show_all(),
            toggle_label: view.toggle_label().map(str::to_string),
        }
    }
}

// =============================================================================
// Invoices
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    /// Whole US dollars, e.g. "120"
    pub amount: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateInvoiceResponse {
    /// Hash of the `createInvoice` transaction
    pub tx_hash: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: u64,
    pub description: String,
    /// Whole US dollars
    pub price_usd: String,
    pub paid: bool,
    pub status: InvoiceStatus,
}

impl InvoiceResponse {
    pub fn new(invoice: InvoiceRecord, status: InvoiceStatus) -> Self {
        Self {
            id: invoice.id,
            description: invoice.description,
            price_usd: invoice.price_usd.to_string(),
            paid: invoice.paid,
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingState {
    /// Client-side placeholder while the listing request is pending
    Loading,
    Empty,
    Populated,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceListResponse {
    pub state: ListingState,
    pub invoices: Vec<InvoiceSummary>,
}

impl From<InvoiceListing> for InvoiceListResponse {
    fn from(listing: InvoiceListing) -> Self {
        match listing {
            InvoiceListing::Loading => Self {
                state: ListingState::Loading,
                invoices: Vec::new(),
            },
            InvoiceListing::Empty => Self {
                state: ListingState::Empty,
                invoices: Vec::new(),
            },
            InvoiceListing::Populated(invoices) => Self {
                state: ListingState::Populated,
                invoices,
            },
        }
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// Unsigned settlement transaction for an external wallet.
#[derive(Debug, Serialize, ToSchema)]
pub struct SettlementTransaction {
    pub invoice_id: u64,
    pub network: String,
    pub chain_id: u64,
    /// ZetaChain TSS address on the network
    pub to: String,
    /// Native value in wei
    pub value: String,
    /// Hex call data
    pub data: String,
}

impl From<PreparedSettlement> for SettlementTransaction {
    fn from(prepared: PreparedSettlement) -> Self {
        Self {
            invoice_id: prepared.invoice.id,
            network: prepared.network.name.to_string(),
            chain_id: prepared.tx.chain_id,
            to: prepared.tx.to.to_checksum(None),
            value: prepared.tx.value.to_string(),
            data: alloy::hex::encode_prefixed(&prepared.tx.data),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayInvoiceRequest {
    /// Network to settle from, e.g. `bsc_testnet`
    pub network: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettlementResponse {
    pub settlement_id: String,
    pub invoice_id: u64,
    pub network: String,
    pub tx_hash: String,
    pub explorer_url: String,
    /// RFC 3339 timestamp
    pub submitted_at: String,
}

impl From<SettlementRecord> for SettlementResponse {
    fn from(record: SettlementRecord) -> Self {
        Self {
            settlement_id: record.id.to_string(),
            invoice_id: record.invoice_id,
            network: record.network,
            tx_hash: record.tx_hash,
            explorer_url: record.explorer_url,
            submitted_at: record.submitted_at.to_rfc3339(),
        }
    }
}

// =============================================================================
// Fees
// =============================================================================

/// Fee estimate; `fee` is null and `error` set when no estimate is available.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeeResponse {
    pub network: Option<String>,
    /// Fee in the network's native asset, 2 decimals
    pub fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionStatusResponse {
    pub tx_hash: String,
    pub network: String,
    /// `pending`, `confirmed` or `failed`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    pub explorer_url: String,
}

impl TransactionStatusResponse {
    pub fn new(tx_hash: String, network: String, explorer_url: String, receipt: Option<TxReceipt>) -> Self {
        let status = match &receipt {
            None => "pending",
            Some(r) if r.success => "confirmed",
            Some(_) => "failed",
        };
        Self {
            tx_hash,
            network,
            status: status.to_string(),
            block_number: receipt.as_ref().map(|r| r.block_number),
            gas_used: receipt.as_ref().map(|r| r.gas_used),
            explorer_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn listing_states_serialize_lowercase() {
        let empty = InvoiceListResponse::from(InvoiceListing::Empty);
        let json = serde_json::to_value(&empty).unwrap();
        assert_eq!(json["state"], "empty");
        assert_eq!(json["invoices"], serde_json::json!([]));

        let loading = serde_json::to_value(InvoiceListResponse::from(InvoiceListing::Loading)).unwrap();
        assert_eq!(loading["state"], "loading");
    }

    #[test]
    fn invoice_price_is_a_string() {
        let response = InvoiceResponse::new(
            InvoiceRecord {
                id: 3,
                description: "Hosting".to_string(),
                price_usd: U256::from(42u64),
                paid: true,
            },
            InvoiceStatus::Paid,
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["price_usd"], "42");
        assert_eq!(json["status"], "paid");
    }

    #[test]
    fn transaction_status_from_receipt() {
        let pending = TransactionStatusResponse::new("0x1".into(), "bsc_testnet".into(), String::new(), None);
        assert_eq!(pending.status, "pending");

        let failed = TransactionStatusResponse::new(
            "0x1".into(),
            "bsc_testnet".into(),
            String::new(),
            Some(TxReceipt {
                tx_hash: "0x1".into(),
                block_number: 10,
                gas_used: 21_000,
                success: false,
            }),
        );
        assert_eq!(failed.status, "failed");
        assert_eq!(failed.block_number, Some(10));
    }
}
