// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Zetatransfer - Cross-Chain Invoice Payment Service
//!
//! Invoices live in an `InvoiceManager` contract on ZetaChain. Payers settle
//! them from any connected EVM chain by sending native value to the ZetaChain
//! TSS address with call data naming the invoice; ZetaChain relays the call
//! and the contract marks the invoice paid.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - ZetaChain and connected EVM chain integration
//! - `context` - Shared chain context built once at startup
//! - `flows` - Balance, invoice, settlement and fee flows
//! - `providers` - ZetaChain Cosmos REST API (staking)

pub mod api;
pub mod blockchain;
pub mod config;
pub mod context;
pub mod error;
pub mod flows;
pub mod models;
pub mod providers;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
