// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Invoice settlement endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{PayInvoiceRequest, SettlementResponse, SettlementTransaction},
    state::AppState,
};

/// Query parameters of the unsigned settlement request.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SettlementQuery {
    /// Invoice ID
    pub id: Option<u64>,
    /// Network the payer's wallet is connected to
    pub network: Option<String>,
}

/// Query parameters selecting the invoice to pay.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PayQuery {
    /// Invoice ID
    pub id: Option<u64>,
}

/// Build the unsigned settlement transaction for an external wallet.
#[utoipa::path(
    get,
    path = "/v1/invoice/settlement",
    tag = "Settlement",
    params(SettlementQuery),
    responses(
        (status = 200, description = "Unsigned settlement transaction", body = SettlementTransaction),
        (status = 400, description = "Missing invoice ID or network, or unsupported network"),
        (status = 404, description = "Invoice not found"),
        (status = 409, description = "Wallet is on the ledger chain or the invoice is already paid")
    )
)]
pub async fn prepare_settlement(
    State(state): State<AppState>,
    Query(query): Query<SettlementQuery>,
) -> Result<Json<SettlementTransaction>, ApiError> {
    let prepared = state
        .context
        .settlement()
        .prepare(query.id, query.network.as_deref())
        .await?;

    Ok(Json(prepared.into()))
}

/// Pay an invoice from a connected chain with the server's payer signer.
#[utoipa::path(
    post,
    path = "/v1/invoice/pay",
    tag = "Settlement",
    params(PayQuery),
    request_body = PayInvoiceRequest,
    responses(
        (status = 202, description = "Settlement submitted", body = SettlementResponse),
        (status = 400, description = "Missing invoice ID or network, or unsupported network"),
        (status = 404, description = "Invoice not found"),
        (status = 409, description = "Network is the ledger chain or the invoice is already paid"),
        (status = 503, description = "No payer signer configured or network unavailable")
    )
)]
pub async fn pay_invoice(
    State(state): State<AppState>,
    Query(query): Query<PayQuery>,
    Json(request): Json<PayInvoiceRequest>,
) -> Result<(StatusCode, Json<SettlementResponse>), ApiError> {
    let record = state
        .context
        .settlement()
        .pay(
            query.id,
            request.network.as_deref(),
            &state.context.senders,
            &state.store,
        )
        .await?;

    Ok((StatusCode::ACCEPTED, Json(record.into())))
}
