use soroban_sdk::{contractimpl, panic_with_error, token::TokenInterface, Address, Env, MuxedAddress, String};
use soroban_token_sdk::events::{Approve, Transfer};
use rebase_vault_interface::VaultError;

use crate::contract::{RebaseVault, RebaseVaultArgs, RebaseVaultClient};
use crate::conversion::{rebased_to_raw, Rounding};
use crate::guard::ReentrancyGuard;
use crate::ledger;
use crate::storage;

fn lock(env: &Env) -> ReentrancyGuard<'_> {
    ReentrancyGuard::acquire(env).unwrap_or_else(|err| panic_with_error!(env, err))
}

/// Moves `amount` visible shares, rounding the raw debit up.
fn move_shares(env: &Env, from: &Address, to: &Address, amount: i128) {
    if amount < 0 {
        panic_with_error!(env, VaultError::ZeroAmount);
    }
    if storage::is_paused(env) {
        panic_with_error!(env, VaultError::Paused);
    }
    let moved = rebased_to_raw(amount, storage::read_rebase_index(env), Rounding::Ceil)
        .and_then(|raw| ledger::transfer(env, from, to, raw));
    if let Err(err) = moved {
        panic_with_error!(env, err);
    }
}

#[contractimpl]
impl TokenInterface for RebaseVault {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::extend_instance_ttl(&env);
        storage::read_allowance(&env, &from, &spender)
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        let _guard = lock(&env);
        storage::extend_instance_ttl(&env);

        if amount < 0 {
            panic_with_error!(&env, VaultError::ZeroAmount);
        }
        storage::write_allowance(&env, &from, &spender, amount, expiration_ledger);

        Approve {
            from,
            spender,
            amount,
            expiration_ledger,
        }
        .publish(&env);
    }

    fn balance(env: Env, id: Address) -> i128 {
        storage::extend_instance_ttl(&env);
        ledger::balance_of(&env, &id).unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    fn transfer(env: Env, from: Address, to: MuxedAddress, amount: i128) {
        from.require_auth();
        let _guard = lock(&env);
        storage::extend_instance_ttl(&env);

        let to_addr = to.address();
        move_shares(&env, &from, &to_addr, amount);

        Transfer {
            from,
            to: to_addr,
            to_muxed_id: to.id(),
            amount,
        }
        .publish(&env);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let _guard = lock(&env);
        storage::extend_instance_ttl(&env);

        let allowance = storage::read_allowance(&env, &from, &spender);
        if allowance < amount {
            panic_with_error!(&env, VaultError::InsufficientAllowance);
        }
        storage::write_allowance(&env, &from, &spender, allowance - amount, 0);
        move_shares(&env, &from, &to, amount);

        Transfer {
            from,
            to,
            to_muxed_id: None,
            amount,
        }
        .publish(&env);
    }

    // Burning outside redeem would hand the backing to the remaining holders.
    fn burn(env: Env, _from: Address, _amount: i128) {
        panic_with_error!(&env, VaultError::Unsupported);
    }

    fn burn_from(env: Env, _spender: Address, _from: Address, _amount: i128) {
        panic_with_error!(&env, VaultError::Unsupported);
    }

    fn decimals(env: Env) -> u32 {
        storage::read_metadata(&env).decimals
    }

    fn name(env: Env) -> String {
        storage::read_metadata(&env).name
    }

    fn symbol(env: Env) -> String {
        storage::read_metadata(&env).symbol
    }
}
