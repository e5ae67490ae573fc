// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration for ZetaChain and its connected EVM chains.
//!
//! This module provides functionality for:
//! - Reading and creating invoices on the ledger contract
//! - Querying native and ZETA token balances
//! - Quoting ZETA against native assets on DEX contracts
//! - Encoding and broadcasting cross-chain settlement transactions

pub mod balances;
pub mod client;
pub mod erc20;
pub mod invoice_manager;
pub mod message;
pub mod quoter;
pub mod transactions;
pub mod types;

pub use balances::{BalanceRecord, BalanceSource, CoinType, EvmBalanceSource};
pub use client::{ChainClientError, EvmClient, TxReceipt};
pub use invoice_manager::{ContractLedger, InvoiceLedger, InvoiceRecord};
pub use quoter::{DexQuoter, QuoteSource};
pub use transactions::{
    format_amount, parse_amount, PreparedTransaction, SendResult, TransactionSender, WalletSender,
};
pub use types::*;
