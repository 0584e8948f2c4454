#![no_std]

use soroban_sdk::{contractclient, contracterror, Address, Env, String};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    AlreadyInitialized = 1,
    ZeroAmount = 2,
    ZeroAddress = 3,
    BelowMinDeposit = 4,
    ZeroShares = 5,
    InsufficientBalance = 6,
    InsufficientAllowance = 7,
    ExceedsTotalAssets = 8,
    HoldPeriodActive = 9,
    InsufficientLiquidity = 10,
    FeeTooHigh = 11,
    IndexDecrease = 12,
    Paused = 13,
    ComplianceDenied = 14,
    RouterNotSet = 15,
    Unsupported = 16,
    MathOverflow = 17,
    Reentrancy = 18,
}

/// Trait defining the interface for the rebasing vault contract.
/// The share token surface (SEP-41) is served by the same contract and reached through `token::Client`.
/// This trait is used to generate the RebaseVaultClient for type-safe cross-contract calls.
#[contractclient(name = "RebaseVaultClient")]
pub trait RebaseVaultTrait {
    fn __constructor(
        env: Env,
        admin: Address,
        asset: Address,
        treasury: Address,
        decimals: u32,
        name: String,
        symbol: String,
    );

    fn set_router(env: Env, router: Address) -> Result<(), VaultError>;
    fn set_redemption_fee(env: Env, fee_bps: u32) -> Result<(), VaultError>;
    fn set_min_deposit(env: Env, amount: i128) -> Result<(), VaultError>;
    fn set_min_hold_period(env: Env, seconds: u64);
    fn set_treasury(env: Env, treasury: Address);
    fn set_bridge(env: Env, bridge: Address);
    fn set_compliance(env: Env, compliance: Address);
    fn pause(env: Env);
    fn unpause(env: Env);

    fn deposit(env: Env, caller: Address, assets: i128, receiver: Address) -> Result<i128, VaultError>;
    fn mint(env: Env, caller: Address, shares: i128, receiver: Address) -> Result<i128, VaultError>;
    fn withdraw(
        env: Env,
        caller: Address,
        assets: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, VaultError>;
    fn redeem(
        env: Env,
        caller: Address,
        shares: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, VaultError>;

    fn bridge_mint(env: Env, to: Address, amount: i128) -> Result<i128, VaultError>;
    fn bridge_burn(env: Env, from: Address, amount: i128) -> Result<i128, VaultError>;

    // Router callbacks
    fn update_rebase_index(env: Env, new_index: i128) -> Result<(), VaultError>;
    fn update_total_deposited_assets(env: Env, new_total: i128) -> Result<(), VaultError>;

    fn convert_to_shares(env: Env, assets: i128) -> Result<i128, VaultError>;
    fn convert_to_assets(env: Env, shares: i128) -> Result<i128, VaultError>;
    fn preview_deposit(env: Env, assets: i128) -> Result<i128, VaultError>;
    fn preview_mint(env: Env, shares: i128) -> Result<i128, VaultError>;
    fn preview_withdraw(env: Env, assets: i128) -> Result<i128, VaultError>;
    fn preview_redeem(env: Env, shares: i128) -> Result<i128, VaultError>;

    fn total_supply(env: Env) -> i128;
    fn raw_balance(env: Env, id: Address) -> i128;
    fn total_raw_shares(env: Env) -> i128;
    fn rebase_index(env: Env) -> i128;
    fn total_deposited_assets(env: Env) -> i128;
    fn last_deposit_time(env: Env, id: Address) -> u64;
    fn redemption_fee_bps(env: Env) -> u32;
    fn get_asset(env: Env) -> Address;
    fn get_router(env: Env) -> Option<Address>;
    fn is_paused(env: Env) -> bool;
}

/// External deny-list consulted on share transfers.
#[contractclient(name = "ComplianceClient")]
pub trait ComplianceTrait {
    fn is_blocked(env: Env, account: Address) -> bool;
}
