#![no_std]

use soroban_sdk::{contractclient, Address, Env};

/// Lending pool whose supply positions rebase 1:1 against the supplied asset.
#[contractclient(name = "LendingPoolClient")]
pub trait LendingPoolTrait {
    fn supply(e: Env, from: Address, amount: i128);
    /// Returns the amount actually sent to `to`.
    fn withdraw(e: Env, to: Address, amount: i128) -> i128;
    /// Current supply position of `account`, denominated in the supplied asset.
    fn balance(e: Env, account: Address) -> i128;
}
