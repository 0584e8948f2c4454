//! Upkeep cycle that nets pending deposits against harvestable yield.
//!
//! Only the difference between the two moves through the protocols: surplus deposits
//! are allocated, surplus yield is redeemed, and equal amounts cause no protocol call.
//! The index is always published from the pre-netting yield figure.

use soroban_sdk::Env;
use rebase_vault_interface::RebaseVaultClient;
use yield_router_interface::{RouterError, UpkeepOutcome};

use crate::accrual;
use crate::allocation;
use crate::events::UpkeepPerformed;
use crate::storage;

pub fn enqueue(env: &Env, amount: i128) -> Result<(), RouterError> {
    let pending = storage::get_pending_deposits(env)
        .checked_add(amount)
        .ok_or(RouterError::MathOverflow)?;
    storage::set_pending_deposits(env, pending);
    Ok(())
}

pub fn interval_elapsed(env: &Env) -> bool {
    let now = env.ledger().timestamp();
    now.saturating_sub(storage::get_last_accrual(env)) >= storage::get_interval(env)
}

pub fn check_upkeep(env: &Env) -> Result<bool, RouterError> {
    if !interval_elapsed(env) {
        return Ok(false);
    }
    if storage::get_pending_deposits(env) > 0 {
        return Ok(true);
    }
    Ok(accrual::snapshot(env)?.yield_amount > 0)
}

pub fn perform_upkeep(env: &Env) -> Result<UpkeepOutcome, RouterError> {
    if !interval_elapsed(env) {
        return Err(RouterError::UpkeepNotNeeded);
    }

    let snapshot = accrual::snapshot(env)?;
    let pending = storage::get_pending_deposits(env);
    let yield_amount = snapshot.yield_amount;

    storage::set_pending_deposits(env, 0);
    storage::set_last_accrual(env, env.ledger().timestamp());

    let mut deployed = 0;
    let mut withdrawn = 0;
    if pending > yield_amount {
        deployed = allocation::allocate(env, pending - yield_amount)?;
    } else if yield_amount > pending {
        withdrawn = allocation::redeem(env, yield_amount - pending)?;
    }

    let new_index = if yield_amount > 0 {
        let new_total = snapshot
            .total_deposited
            .checked_add(yield_amount)
            .ok_or(RouterError::MathOverflow)?;
        accrual::publish_index(env, snapshot.total_deposited, new_total)?
    } else {
        RebaseVaultClient::new(env, &storage::get_vault(env)).rebase_index()
    };

    UpkeepPerformed {
        pending,
        yield_amount,
        deployed,
        withdrawn,
    }
    .publish(env);

    Ok(UpkeepOutcome {
        pending,
        yield_amount,
        deployed,
        withdrawn,
        new_index,
    })
}
