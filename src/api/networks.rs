// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network listing and transaction status endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    blockchain::{ChainClientError, EvmClient, NetworkSummary},
    error::ApiError,
    models::TransactionStatusResponse,
    state::AppState,
};

/// List every network known to the service.
#[utoipa::path(
    get,
    path = "/v1/networks",
    tag = "Networks",
    responses(
        (status = 200, description = "Ledger chain first, then connected chains", body = [NetworkSummary])
    )
)]
pub async fn list_networks(State(state): State<AppState>) -> Json<Vec<NetworkSummary>> {
    let registry = &state.context.registry;
    Json(
        registry
            .all()
            .map(|n| NetworkSummary::from_config(n, registry.is_ledger(n)))
            .collect(),
    )
}

/// Look up the receipt of a transaction.
///
/// A single lookup: `pending` means no receipt yet.
#[utoipa::path(
    get,
    path = "/v1/networks/{network}/transactions/{tx_hash}",
    tag = "Networks",
    params(
        ("network" = String, Path, description = "Network identifier"),
        ("tx_hash" = String, Path, description = "Transaction hash")
    ),
    responses(
        (status = 200, description = "Transaction status", body = TransactionStatusResponse),
        (status = 400, description = "Unknown network or invalid hash"),
        (status = 503, description = "Network unavailable")
    )
)]
pub async fn get_transaction_status(
    State(state): State<AppState>,
    Path((network, tx_hash)): Path<(String, String)>,
) -> Result<Json<TransactionStatusResponse>, ApiError> {
    let network = state
        .context
        .registry
        .get(&network)
        .ok_or_else(|| ApiError::bad_request(format!("Unsupported network: {network}")))?
        .clone();

    let client = EvmClient::new(network.clone())
        .map_err(|e| ApiError::service_unavailable(e.to_string()))?;
    let receipt = client.get_transaction_status(&tx_hash).await.map_err(|e| match e {
        ChainClientError::InvalidTxHash(_) => ApiError::bad_request(e.to_string()),
        _ => {
            tracing::warn!(network = network.name, tx_hash = %tx_hash, error = %e, "Receipt lookup failed");
            ApiError::service_unavailable(e.to_string())
        }
    })?;

    Ok(Json(TransactionStatusResponse::new(
        tx_hash.clone(),
        network.name.to_string(),
        network.tx_url(&tx_hash),
        receipt,
    )))
}
