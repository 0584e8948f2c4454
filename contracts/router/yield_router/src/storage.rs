use soroban_sdk::{contracttype, Address, Env};
use yield_router_interface::AllocationMode;

// Storage TTL constants
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const DEFAULT_AUTOMATION_INTERVAL: u64 = 86_400;

/// Price feed used to value a treasury-kind position, with the plausible price range.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceFeedConfig {
    pub feed: Address,
    pub min_price: i128,
    pub max_price: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Asset,
    Vault,
    AssetOrder,
    Entry(Address),
    PriceFeed(Address),
    TrackedBalance,
    PendingDeposits,
    LastAccrual,
    Interval,
    Mode,
    Locked,
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// Admin functions
pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Admin not set")
}

// Reference asset (immutable after initialization)
pub fn set_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&DataKey::Asset, asset);
}

pub fn get_asset(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Asset)
        .expect("Asset not set")
}

// Vault address (immutable after initialization)
pub fn set_vault(env: &Env, vault: &Address) {
    env.storage().instance().set(&DataKey::Vault, vault);
}

pub fn get_vault(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Vault)
        .expect("Vault not set")
}

// Reference asset attributable to deposits, redemptions and harvests
pub fn get_tracked_balance(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TrackedBalance)
        .unwrap_or(0)
}

pub fn set_tracked_balance(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TrackedBalance, &amount);
}

// Deposits received but not yet deployed
pub fn get_pending_deposits(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::PendingDeposits)
        .unwrap_or(0)
}

pub fn set_pending_deposits(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::PendingDeposits, &amount);
}

pub fn get_last_accrual(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LastAccrual)
        .unwrap_or(0)
}

pub fn set_last_accrual(env: &Env, timestamp: u64) {
    env.storage().instance().set(&DataKey::LastAccrual, &timestamp);
}

pub fn get_interval(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::Interval)
        .unwrap_or(DEFAULT_AUTOMATION_INTERVAL)
}

pub fn set_interval(env: &Env, seconds: u64) {
    env.storage().instance().set(&DataKey::Interval, &seconds);
}

pub fn get_allocation_mode(env: &Env) -> AllocationMode {
    env.storage()
        .instance()
        .get(&DataKey::Mode)
        .unwrap_or(AllocationMode::Lazy)
}

pub fn set_allocation_mode(env: &Env, mode: AllocationMode) {
    env.storage().instance().set(&DataKey::Mode, &mode);
}

pub fn get_price_feed(env: &Env, token: &Address) -> Option<PriceFeedConfig> {
    env.storage()
        .instance()
        .get(&DataKey::PriceFeed(token.clone()))
}

pub fn set_price_feed(env: &Env, token: &Address, config: &PriceFeedConfig) {
    env.storage()
        .instance()
        .set(&DataKey::PriceFeed(token.clone()), config);
}

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    env.storage().instance().set(&DataKey::Locked, &locked);
}
