use soroban_sdk::Env;
use rebase_vault_interface::RebaseVaultClient;
use yield_router_interface::RouterError;

use crate::accounting;
use crate::allocation;
use crate::events::YieldAccrued;
use crate::storage;

/// Backing measured against the vault's deposited total at one point in time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct YieldSnapshot {
    pub total_deposited: i128,
    pub actual_value: i128,
    pub yield_amount: i128,
}

/// Deployed value plus tracked idle balance. Donations are never counted.
pub fn total_value(env: &Env) -> Result<i128, RouterError> {
    allocation::deployed_value(env)?
        .checked_add(accounting::tracked_balance(env))
        .ok_or(RouterError::MathOverflow)
}

pub fn snapshot(env: &Env) -> Result<YieldSnapshot, RouterError> {
    let vault = RebaseVaultClient::new(env, &storage::get_vault(env));
    let total_deposited = vault.total_deposited_assets();
    let actual_value = total_value(env)?;
    let yield_amount = if total_deposited > 0 && actual_value > total_deposited {
        actual_value - total_deposited
    } else {
        0
    };
    Ok(YieldSnapshot {
        total_deposited,
        actual_value,
        yield_amount,
    })
}

/// Harvests unrealized yield and raises the rebase index. Returns the yield recognised.
///
/// A loss is never reflected: when the backing is at or below the deposited total the
/// call only refreshes the accrual timestamp.
pub fn accrue(env: &Env) -> Result<i128, RouterError> {
    storage::set_last_accrual(env, env.ledger().timestamp());

    let before = snapshot(env)?;
    if before.yield_amount == 0 {
        return Ok(0);
    }

    allocation::redeem(env, before.yield_amount)?;

    let actual_value = total_value(env)?;
    if actual_value <= before.total_deposited {
        return Ok(0);
    }
    publish_index(env, before.total_deposited, actual_value)?;
    Ok(actual_value - before.total_deposited)
}

/// Scales the vault index by `new_total / old_total` and pushes both values to the vault.
pub fn publish_index(env: &Env, old_total: i128, new_total: i128) -> Result<i128, RouterError> {
    let vault = RebaseVaultClient::new(env, &storage::get_vault(env));
    let old_index = vault.rebase_index();
    let new_index = old_index
        .checked_mul(new_total)
        .and_then(|v| v.checked_div(old_total))
        .ok_or(RouterError::MathOverflow)?;

    vault.update_rebase_index(&new_index);
    vault.update_total_deposited_assets(&new_total);

    YieldAccrued {
        yield_amount: new_total - old_total,
        old_index,
        new_index,
        total_assets: new_total,
    }
    .publish(env);
    Ok(new_index)
}
