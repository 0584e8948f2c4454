//! Raw-share ledger.
//!
//! Balances are stored as raw shares and only change on mint, burn or transfer. The
//! global index makes them grow without touching any account. Bridge ("ghost") mints
//! and burns move an account's raw shares without touching `TotalRawShares`, so shares
//! living on another chain neither dilute nor shrink the local share price.

use soroban_sdk::{log, Address, Env};
use rebase_vault_interface::{ComplianceClient, VaultError};

use crate::conversion::{raw_to_rebased, Rounding};
use crate::events::RebaseIndexUpdated;
use crate::storage;

fn credit(e: &Env, owner: &Address, raw: i128, affects_total: bool) -> Result<(), VaultError> {
    let balance = storage::read_raw_balance(e, owner)
        .checked_add(raw)
        .ok_or(VaultError::MathOverflow)?;
    storage::write_raw_balance(e, owner, balance);

    if affects_total {
        let total = storage::read_total_raw_shares(e)
            .checked_add(raw)
            .ok_or(VaultError::MathOverflow)?;
        storage::write_total_raw_shares(e, total);
    }
    Ok(())
}

fn debit(e: &Env, owner: &Address, raw: i128, affects_total: bool) -> Result<(), VaultError> {
    let balance = storage::read_raw_balance(e, owner);
    if balance < raw {
        log!(e, "insufficient raw shares", owner.clone(), raw, balance);
        return Err(VaultError::InsufficientBalance);
    }

    // Bridged shares never entered the total, so a local burn can exceed it.
    if affects_total {
        let total = storage::read_total_raw_shares(e);
        if total < raw {
            log!(e, "burn exceeds local share total", raw, total);
            return Err(VaultError::InsufficientBalance);
        }
        storage::write_total_raw_shares(e, total - raw);
    }
    storage::write_raw_balance(e, owner, balance - raw);
    Ok(())
}

fn ensure_recipient(e: &Env, to: &Address) -> Result<(), VaultError> {
    if *to == e.current_contract_address() {
        return Err(VaultError::ZeroAddress);
    }
    Ok(())
}

pub fn mint(e: &Env, owner: &Address, raw: i128) -> Result<(), VaultError> {
    ensure_recipient(e, owner)?;
    credit(e, owner, raw, true)
}

pub fn burn(e: &Env, owner: &Address, raw: i128) -> Result<(), VaultError> {
    debit(e, owner, raw, true)
}

pub fn ghost_mint(e: &Env, owner: &Address, raw: i128) -> Result<(), VaultError> {
    ensure_recipient(e, owner)?;
    credit(e, owner, raw, false)
}

pub fn ghost_burn(e: &Env, owner: &Address, raw: i128) -> Result<(), VaultError> {
    debit(e, owner, raw, false)
}

/// Moves raw shares. Deposit timestamps stay with the deposit, never with the transfer.
pub fn transfer(e: &Env, from: &Address, to: &Address, raw: i128) -> Result<(), VaultError> {
    ensure_recipient(e, to)?;
    if let Some(compliance) = storage::read_compliance(e) {
        let client = ComplianceClient::new(e, &compliance);
        if client.is_blocked(from) || client.is_blocked(to) {
            return Err(VaultError::ComplianceDenied);
        }
    }
    debit(e, from, raw, false)?;
    credit(e, to, raw, false)
}

pub fn balance_of(e: &Env, owner: &Address) -> Result<i128, VaultError> {
    raw_to_rebased(
        storage::read_raw_balance(e, owner),
        storage::read_rebase_index(e),
        Rounding::Floor,
    )
}

pub fn total_supply(e: &Env) -> Result<i128, VaultError> {
    raw_to_rebased(
        storage::read_total_raw_shares(e),
        storage::read_rebase_index(e),
        Rounding::Floor,
    )
}

pub fn update_index(e: &Env, new_index: i128) -> Result<(), VaultError> {
    let old_index = storage::read_rebase_index(e);
    if new_index < old_index {
        log!(e, "rebase index cannot decrease", old_index, new_index);
        return Err(VaultError::IndexDecrease);
    }
    storage::write_rebase_index(e, new_index);
    RebaseIndexUpdated {
        old_index,
        new_index,
    }
    .publish(e);
    Ok(())
}
