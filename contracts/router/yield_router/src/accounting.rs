//! Internal accounting of the reference asset held by the router.
//!
//! The tracked balance only moves through deposits from the vault, redemptions,
//! harvests and allocations. Tokens sent straight to the router never enter it, so
//! they cannot inflate `get_total_value` and can only leave through `rescue_excess`.

use soroban_sdk::{log, token, Address, Env};
use yield_router_interface::RouterError;

use crate::storage;

pub fn tracked_balance(env: &Env) -> i128 {
    storage::get_tracked_balance(env)
}

/// Raw token balance of the router, donations included.
pub fn wallet_balance(env: &Env) -> i128 {
    token::Client::new(env, &storage::get_asset(env)).balance(&env.current_contract_address())
}

pub fn credit(env: &Env, amount: i128) -> Result<(), RouterError> {
    let tracked = tracked_balance(env)
        .checked_add(amount)
        .ok_or(RouterError::MathOverflow)?;
    storage::set_tracked_balance(env, tracked);
    Ok(())
}

pub fn debit(env: &Env, amount: i128) -> Result<(), RouterError> {
    let tracked = tracked_balance(env);
    if tracked < amount {
        log!(env, "tracked balance too low", amount, tracked);
        return Err(RouterError::InsufficientTrackedBalance);
    }
    storage::set_tracked_balance(env, tracked - amount);
    Ok(())
}

/// The wallet must always cover the tracked balance.
pub fn ensure_backed(env: &Env) -> Result<(), RouterError> {
    let tracked = tracked_balance(env);
    let wallet = wallet_balance(env);
    if wallet < tracked {
        log!(env, "wallet does not cover tracked balance", tracked, wallet);
        return Err(RouterError::InsufficientTrackedBalance);
    }
    Ok(())
}

pub fn excess_donation(env: &Env) -> i128 {
    let excess = wallet_balance(env) - tracked_balance(env);
    if excess > 0 {
        excess
    } else {
        0
    }
}

/// Sends the untracked surplus to `to`. The tracked balance is left untouched.
pub fn rescue_excess(env: &Env, to: &Address) -> i128 {
    let excess = excess_donation(env);
    if excess > 0 {
        token::Client::new(env, &storage::get_asset(env)).transfer(
            &env.current_contract_address(),
            to,
            &excess,
        );
    }
    excess
}
