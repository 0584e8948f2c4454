#![no_std]

use soroban_sdk::{contractclient, contracterror, contracttype, Address, Env, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RouterError {
    ZeroAmount = 1,
    AssetAlreadyExists = 2,
    MaxAssetsReached = 3,
    AssetNotFound = 4,
    LengthMismatch = 5,
    InvalidTotalWeight = 6,
    AssetStillActive = 7,
    FundsRemaining = 8,
    InvalidDepositToken = 9,
    InsufficientTrackedBalance = 10,
    UpkeepNotNeeded = 11,
    OracleNotConfigured = 12,
    OracleStale = 13,
    OraclePriceOutOfBounds = 14,
    OracleRoundIncomplete = 15,
    InvalidPriceBounds = 16,
    InvalidInterval = 17,
    MathOverflow = 18,
    Reentrancy = 19,
    ProtocolCallFailed = 20,
}

/// Yield source behind a registered asset. Fixed at registration and used only to pick the adapter.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProtocolKind {
    TokenizedVault = 0,
    LendingPool = 1,
    TreasuryManager = 2,
    LiquidStaking = 3,
}

/// Whether deposits are deployed on arrival or batched for the upkeep cycle.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AllocationMode {
    Immediate = 0,
    Lazy = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldAssetEntry {
    /// Yield-bearing position token held by the router.
    pub token: Address,
    /// Protocol contract the router calls to deposit and redeem.
    pub manager: Address,
    /// Asset handed to the protocol on deposit.
    pub deposit_token: Address,
    pub kind: ProtocolKind,
    pub weight_bps: u32,
}

/// Result of one netting cycle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpkeepOutcome {
    pub pending: i128,
    pub yield_amount: i128,
    pub deployed: i128,
    pub withdrawn: i128,
    pub new_index: i128,
}

/// Trait defining the interface for the yield router contract.
/// This trait is used to generate the YieldRouterClient for type-safe cross-contract calls.
#[contractclient(name = "YieldRouterClient")]
pub trait YieldRouterTrait {
    fn __constructor(env: Env, admin: Address, asset: Address, vault: Address);

    // Registry administration
    fn add_asset(
        env: Env,
        token: Address,
        deposit_token: Address,
        manager: Address,
        kind: ProtocolKind,
    ) -> Result<(), RouterError>;
    fn update_weights(env: Env, weights: Vec<u32>) -> Result<(), RouterError>;
    fn remove_asset(env: Env, token: Address) -> Result<(), RouterError>;
    fn set_price_feed(
        env: Env,
        token: Address,
        feed: Address,
        min_price: i128,
        max_price: i128,
    ) -> Result<(), RouterError>;
    fn set_allocation_mode(env: Env, mode: AllocationMode);
    fn set_automation_interval(env: Env, seconds: u64) -> Result<(), RouterError>;

    // Vault passthrough
    fn deposit_to_protocols(env: Env, amount: i128) -> Result<(), RouterError>;
    fn redeem_from_protocols(env: Env, amount: i128) -> Result<i128, RouterError>;

    // Yield accrual and netting
    fn accrue(env: Env) -> Result<i128, RouterError>;
    fn check_upkeep(env: Env) -> Result<bool, RouterError>;
    fn perform_upkeep(env: Env) -> Result<UpkeepOutcome, RouterError>;

    // Recovery
    fn rescue_excess(env: Env, to: Address) -> Result<i128, RouterError>;
    fn emergency_withdraw_all(env: Env) -> Result<i128, RouterError>;

    // Views
    fn get_total_value(env: Env) -> Result<i128, RouterError>;
    fn get_deployed_value(env: Env) -> Result<i128, RouterError>;
    fn unrealized_yield(env: Env) -> Result<i128, RouterError>;
    fn tracked_balance(env: Env) -> i128;
    fn excess_donation(env: Env) -> i128;
    fn pending_deposits(env: Env) -> i128;
    fn get_assets(env: Env) -> Vec<YieldAssetEntry>;
    fn get_asset(env: Env, token: Address) -> Option<YieldAssetEntry>;
    fn allocation_mode(env: Env) -> AllocationMode;
    fn automation_interval(env: Env) -> u64;
    fn last_accrual_time(env: Env) -> u64;
    fn get_vault(env: Env) -> Address;
}
