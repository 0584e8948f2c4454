#![no_std]

use soroban_sdk::{contractclient, Address, Env};

/// Trait defining the interface of a standard tokenized vault.
/// Liquid-staking wrappers expose the same surface and are valued through `exchange_rate`.
/// This trait is used to generate the TokenizedVaultClient for type-safe cross-contract calls.
#[contractclient(name = "TokenizedVaultClient")]
pub trait TokenizedVaultTrait {
    /// Pulls `assets` from `from` and returns the vault shares minted to it.
    fn deposit(e: Env, from: Address, assets: i128) -> i128;
    /// Burns `shares` held by `to` and returns the assets sent back.
    fn withdraw(e: Env, to: Address, shares: i128) -> i128;
    fn balance(e: Env, account: Address) -> i128;
    fn convert_to_assets(e: Env, shares: i128) -> i128;
    /// Shares that must be burned to receive `assets`, rounded up.
    fn preview_withdraw(e: Env, assets: i128) -> i128;
    /// Assets per share scaled by 1e6.
    fn exchange_rate(e: Env) -> i128;
}
