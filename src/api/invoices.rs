// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Invoice creation, lookup and listing endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    flows::invoices::{self, InvoiceStatus},
    models::{CreateInvoiceRequest, CreateInvoiceResponse, InvoiceListResponse, InvoiceResponse},
    state::AppState,
};

/// Query parameters selecting one invoice.
#[derive(Debug, Deserialize, IntoParams)]
pub struct InvoiceQuery {
    /// Invoice ID
    pub id: Option<u64>,
}

/// Create an invoice on the ledger contract.
///
/// Only one creation is accepted at a time.
#[utoipa::path(
    post,
    path = "/v1/invoices",
    tag = "Invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 202, description = "Invoice creation submitted", body = CreateInvoiceResponse),
        (status = 400, description = "Missing or invalid amount or description"),
        (status = 409, description = "Another creation is in flight"),
        (status = 503, description = "No ledger signer configured or ledger unavailable")
    )
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<CreateInvoiceResponse>), ApiError> {
    let tx_hash = invoices::create_invoice(
        state.context.ledger.as_ref(),
        &state.creation_guard,
        &request.amount,
        &request.description,
    )
    .await?;

    Ok((StatusCode::ACCEPTED, Json(CreateInvoiceResponse { tx_hash })))
}

/// List invoices created by the ledger signer.
#[utoipa::path(
    get,
    path = "/v1/invoices",
    tag = "Invoices",
    responses(
        (status = 200, description = "Invoices of the ledger signer", body = InvoiceListResponse),
        (status = 503, description = "No ledger signer configured or ledger unavailable")
    )
)]
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<InvoiceListResponse>, ApiError> {
    let listing = invoices::list_invoices(
        state.context.ledger.as_ref(),
        &state.store,
        &state.context.settings.payment_link_base,
    )
    .await?;

    Ok(Json(listing.into()))
}

/// Get one invoice by ID.
#[utoipa::path(
    get,
    path = "/v1/invoice",
    tag = "Invoices",
    params(InvoiceQuery),
    responses(
        (status = 200, description = "Invoice found", body = InvoiceResponse),
        (status = 400, description = "No invoice ID given"),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    Query(query): Query<InvoiceQuery>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = invoices::get_invoice(state.context.ledger.as_ref(), query.id).await?;
    let status = InvoiceStatus::derive(&invoice, &*state.store.read().await);

    Ok(Json(InvoiceResponse::new(invoice, status)))
}
