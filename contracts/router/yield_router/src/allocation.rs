//! Weighted allocation ledger.
//!
//! Deposits and redemptions are split across active entries in registration order,
//! proportional to `weight_bps / 10_000`. The last active entry takes the exact
//! remainder so no rounding dust is left behind. Every realized amount is measured as
//! a balance delta on the router rather than trusted from the protocol.

use soroban_sdk::{log, token, Address, Env, Vec};
use yield_router_interface::{ProtocolKind, RouterError, YieldAssetEntry};

use crate::accounting;
use crate::adapters::{DrainOutcome, ProtocolAdapter};
use crate::events::{AssetAdded, AssetDrained, AssetRemoved, Allocated, Redeemed, WeightsUpdated};
use crate::registry;
use crate::storage;

pub const MAX_ASSETS: u32 = 10;
pub const BPS_DENOMINATOR: u32 = 10_000;

fn asset_balance(env: &Env) -> i128 {
    token::Client::new(env, &storage::get_asset(env)).balance(&env.current_contract_address())
}

pub fn add_asset(
    env: &Env,
    token: &Address,
    deposit_token: &Address,
    manager: &Address,
    kind: ProtocolKind,
) -> Result<(), RouterError> {
    if registry::contains(env, token) {
        return Err(RouterError::AssetAlreadyExists);
    }
    if registry::len(env) >= MAX_ASSETS {
        return Err(RouterError::MaxAssetsReached);
    }
    if *deposit_token != storage::get_asset(env) {
        return Err(RouterError::InvalidDepositToken);
    }

    let entry = YieldAssetEntry {
        token: token.clone(),
        manager: manager.clone(),
        deposit_token: deposit_token.clone(),
        kind,
        weight_bps: 0,
    };
    registry::insert(env, &entry);

    AssetAdded {
        token: token.clone(),
        manager: manager.clone(),
        deposit_token: deposit_token.clone(),
        kind,
    }
    .publish(env);
    Ok(())
}

/// Applies a full weight vector in registration order.
///
/// Entries going from a nonzero weight to zero are drained before the new weights are
/// stored. A drain refused for being below the protocol's minimum redemption is logged
/// and leaves the residual position in place; any other failure aborts the update.
pub fn update_weights(env: &Env, weights: &Vec<u32>) -> Result<(), RouterError> {
    let entries = registry::entries(env);
    if weights.len() != entries.len() {
        return Err(RouterError::LengthMismatch);
    }

    let mut total: u32 = 0;
    for weight in weights.iter() {
        total = total
            .checked_add(weight)
            .ok_or(RouterError::InvalidTotalWeight)?;
    }
    if total != BPS_DENOMINATOR && total != 0 {
        return Err(RouterError::InvalidTotalWeight);
    }

    for (entry, weight) in entries.iter().zip(weights.iter()) {
        if entry.weight_bps > 0 && weight == 0 {
            drain_entry(env, &entry)?;
        }
    }

    for (mut entry, weight) in entries.iter().zip(weights.iter()) {
        entry.weight_bps = weight;
        registry::update(env, &entry);
    }

    WeightsUpdated {
        weights: weights.clone(),
    }
    .publish(env);
    Ok(())
}

/// Redeems the whole position of `entry` into tracked idle balance.
fn drain_entry(env: &Env, entry: &YieldAssetEntry) -> Result<i128, RouterError> {
    let adapter = ProtocolAdapter::from_entry(entry);
    let before = asset_balance(env);
    let outcome = adapter.source().drain(env)?;
    let drained = asset_balance(env) - before;

    let amount = match outcome {
        DrainOutcome::Redeemed => drained,
        DrainOutcome::Skipped => {
            log!(env, "drain skipped, residual position left", entry.token);
            0
        }
    };
    if amount > 0 {
        accounting::credit(env, amount)?;
    }

    AssetDrained {
        token: entry.token.clone(),
        amount,
    }
    .publish(env);
    Ok(amount)
}

pub fn remove_asset(env: &Env, token: &Address) -> Result<(), RouterError> {
    let entry = registry::get(env, token).ok_or(RouterError::AssetNotFound)?;
    if entry.weight_bps > 0 {
        return Err(RouterError::AssetStillActive);
    }
    let remaining = ProtocolAdapter::from_entry(&entry).source().position(env);
    if remaining > 0 {
        log!(env, "asset still holds a position", token, remaining);
        return Err(RouterError::FundsRemaining);
    }

    registry::remove(env, token);
    AssetRemoved {
        token: token.clone(),
    }
    .publish(env);
    Ok(())
}

/// Proportional split of `amount` over `entries`; inactive entries get zero and the
/// last active entry gets the remainder.
pub fn split_amount(
    env: &Env,
    amount: i128,
    entries: &Vec<YieldAssetEntry>,
) -> Result<Vec<i128>, RouterError> {
    let mut last_active = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.weight_bps > 0 {
            last_active = Some(i);
        }
    }

    let mut parts = Vec::new(env);
    let mut assigned: i128 = 0;
    for (i, entry) in entries.iter().enumerate() {
        let part = if entry.weight_bps == 0 {
            0
        } else if Some(i) == last_active {
            amount - assigned
        } else {
            amount
                .checked_mul(entry.weight_bps as i128)
                .ok_or(RouterError::MathOverflow)?
                / BPS_DENOMINATOR as i128
        };
        assigned += part;
        parts.push_back(part);
    }
    Ok(parts)
}

fn has_active(entries: &Vec<YieldAssetEntry>) -> bool {
    entries.iter().any(|entry| entry.weight_bps > 0)
}

/// Deploys `amount` of tracked idle balance. Returns the amount deployed, which is zero
/// when no entry is active.
pub fn allocate(env: &Env, amount: i128) -> Result<i128, RouterError> {
    if amount <= 0 {
        return Ok(0);
    }
    let entries = registry::entries(env);
    if !has_active(&entries) {
        log!(env, "no active yield assets, funds stay idle", amount);
        return Ok(0);
    }

    accounting::debit(env, amount)?;
    let parts = split_amount(env, amount, &entries)?;
    for (entry, part) in entries.iter().zip(parts.iter()) {
        if part <= 0 {
            continue;
        }
        ProtocolAdapter::from_entry(&entry).source().deposit(env, part)?;
        Allocated {
            token: entry.token.clone(),
            amount: part,
        }
        .publish(env);
    }
    Ok(amount)
}

/// Pulls up to `target` from one entry, bounded by its reported value.
fn pull(env: &Env, entry: &YieldAssetEntry, target: i128) -> Result<i128, RouterError> {
    let adapter = ProtocolAdapter::from_entry(entry);
    let source = adapter.source();
    let requested = target.min(source.value(env)?);
    if requested <= 0 {
        return Ok(0);
    }

    let before = asset_balance(env);
    source.redeem(env, requested)?;
    let realized = (asset_balance(env) - before).max(0);

    Redeemed {
        token: entry.token.clone(),
        requested,
        realized,
    }
    .publish(env);
    Ok(realized)
}

/// Best-effort redemption of `amount` into tracked idle balance.
///
/// A proportional pass over the active entries runs first; any shortfall is then pulled
/// from every entry in registration order. Returns what actually arrived, which may be
/// less than `amount`.
pub fn redeem(env: &Env, amount: i128) -> Result<i128, RouterError> {
    if amount <= 0 {
        return Ok(0);
    }
    let entries = registry::entries(env);
    let mut realized: i128 = 0;

    if has_active(&entries) {
        let parts = split_amount(env, amount, &entries)?;
        for (entry, part) in entries.iter().zip(parts.iter()) {
            if part > 0 {
                realized += pull(env, &entry, part)?;
            }
        }
    }

    for entry in entries.iter() {
        let shortfall = amount - realized;
        if shortfall <= 0 {
            break;
        }
        realized += pull(env, &entry, shortfall)?;
    }

    if realized > 0 {
        accounting::credit(env, realized)?;
    }
    if realized < amount {
        log!(env, "redemption shortfall", amount, realized);
    }
    Ok(realized)
}

/// Reference-asset value of every position, inactive residuals included.
pub fn deployed_value(env: &Env) -> Result<i128, RouterError> {
    let mut total: i128 = 0;
    for entry in registry::entries(env).iter() {
        let value = ProtocolAdapter::from_entry(&entry).source().value(env)?;
        total = total.checked_add(value).ok_or(RouterError::MathOverflow)?;
    }
    Ok(total)
}

/// Drains every position and deactivates every entry.
pub fn drain_all(env: &Env) -> Result<i128, RouterError> {
    let mut total: i128 = 0;
    let mut weights = Vec::new(env);
    for mut entry in registry::entries(env).iter() {
        if ProtocolAdapter::from_entry(&entry).source().position(env) > 0 {
            total += drain_entry(env, &entry)?;
        }
        entry.weight_bps = 0;
        registry::update(env, &entry);
        weights.push_back(0u32);
    }
    WeightsUpdated { weights }.publish(env);
    Ok(total)
}
