// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Balance table endpoint.

use alloy::primitives::Address;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError, flows::balances::BalanceView, models::BalancesResponse, state::AppState,
};

/// Query parameters for the balance table.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BalanceQuery {
    /// Return every row instead of the collapsed first five.
    #[param(default = false)]
    pub show_all: Option<bool>,
}

/// Get the balance table of an account across every network.
#[utoipa::path(
    get,
    path = "/v1/balances/{address}",
    tag = "Balances",
    params(
        ("address" = String, Path, description = "EVM account address"),
        BalanceQuery
    ),
    responses(
        (status = 200, description = "Balances retrieved successfully", body = BalancesResponse),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "Blockchain network unavailable")
    )
)]
pub async fn get_balances(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<BalancesResponse>, ApiError> {
    let account: Address = address
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid address: {address}")))?;

    let context = &state.context;
    let mut view = BalanceView::load(account, context.balances.as_ref(), context.staking.as_ref()).await?;
    view.set_show_all(query.show_all.unwrap_or(false));

    Ok(Json(BalancesResponse::from_view(
        account.to_checksum(None),
        &view,
    )))
}
