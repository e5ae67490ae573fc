// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-chain call payload for deposits into the ZetaChain TSS address.
//!
//! Layout: `target (20 bytes) ‖ abi.encode(args)`. ZetaChain routes the
//! deposit to `target` on the zEVM and hands it the ABI-encoded arguments.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolValue,
};

const ADDRESS_LEN: usize = 20;

/// Encode a call to `target` carrying the invoice id as a single `uint256`.
pub fn encode_invoice_payment(target: Address, invoice_id: u64) -> Bytes {
    let args = U256::from(invoice_id).abi_encode();
    let mut data = Vec::with_capacity(ADDRESS_LEN + args.len());
    data.extend_from_slice(target.as_slice());
    data.extend_from_slice(&args);
    data.into()
}

/// Split a payload back into its target and invoice id.
pub fn decode_invoice_payment(data: &[u8]) -> Option<(Address, u64)> {
    if data.len() != ADDRESS_LEN + 32 {
        return None;
    }
    let (target, args) = data.split_at(ADDRESS_LEN);
    let id = U256::abi_decode(args).ok()?;
    Some((Address::from_slice(target), u64::try_from(id).ok()?))
}
