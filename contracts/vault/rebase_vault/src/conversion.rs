//! Share math.
//!
//! Raw shares are the unit of account; the rebase index turns them into the visible
//! balance. Conversions that decide how much a user gives up round against the user
//! (ceil), everything else rounds down.

use soroban_sdk::Env;
use rebase_vault_interface::VaultError;

use crate::storage;

/// 1_000_000 = 1.0x
pub const INDEX_PRECISION: i128 = 1_000_000;
pub const BPS_DENOMINATOR: i128 = 10_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rounding {
    Floor,
    Ceil,
}

pub fn mul_div(a: i128, b: i128, denominator: i128, rounding: Rounding) -> Result<i128, VaultError> {
    if denominator <= 0 {
        return Err(VaultError::MathOverflow);
    }
    let product = a.checked_mul(b).ok_or(VaultError::MathOverflow)?;
    let quotient = product / denominator;
    match rounding {
        Rounding::Ceil if product % denominator != 0 => Ok(quotient + 1),
        _ => Ok(quotient),
    }
}

pub fn raw_to_rebased(raw: i128, index: i128, rounding: Rounding) -> Result<i128, VaultError> {
    mul_div(raw, index, INDEX_PRECISION, rounding)
}

pub fn rebased_to_raw(amount: i128, index: i128, rounding: Rounding) -> Result<i128, VaultError> {
    mul_div(amount, INDEX_PRECISION, index, rounding)
}

/// Fee charged on an amount actually paid out.
pub fn fee_on(amount: i128, fee_bps: u32) -> Result<i128, VaultError> {
    mul_div(amount, fee_bps as i128, BPS_DENOMINATOR, Rounding::Floor)
}

/// Totals that price raw shares against deposited assets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShareState {
    pub total_raw: i128,
    pub total_deposited: i128,
    pub index: i128,
}

impl ShareState {
    pub fn load(e: &Env) -> Self {
        ShareState {
            total_raw: storage::read_total_raw_shares(e),
            total_deposited: storage::read_total_deposited(e),
            index: storage::read_rebase_index(e),
        }
    }

    fn is_empty(&self) -> bool {
        self.total_raw == 0 || self.total_deposited == 0
    }

    // With nothing deposited the index alone prices shares, which is 1:1 at the start.
    pub fn assets_to_raw(&self, assets: i128, rounding: Rounding) -> Result<i128, VaultError> {
        if self.is_empty() {
            return rebased_to_raw(assets, self.index, rounding);
        }
        mul_div(assets, self.total_raw, self.total_deposited, rounding)
    }

    pub fn raw_to_assets(&self, raw: i128, rounding: Rounding) -> Result<i128, VaultError> {
        if self.is_empty() {
            return raw_to_rebased(raw, self.index, rounding);
        }
        mul_div(raw, self.total_deposited, self.total_raw, rounding)
    }
}
