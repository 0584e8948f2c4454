use soroban_sdk::{contracttype, Address, Env, String};

// Storage TTL constants
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const DEFAULT_MIN_DEPOSIT: i128 = 10_000_000;
pub const DEFAULT_MIN_HOLD_PERIOD: u64 = 600;

#[contracttype]
#[derive(Clone)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Allowance(Address, Address),
    RawBalance(Address),
    LastDeposit(Address),
    Admin,
    Asset,
    Router,
    Treasury,
    Bridge,
    Compliance,
    Metadata,
    FeeBps,
    MinDeposit,
    MinHold,
    Paused,
    TotalRawShares,
    RebaseIndex,
    TotalDeposited,
    Locked,
}

pub fn extend_instance_ttl(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// Admin and collaborators
pub fn read_administrator(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Admin not set")
}

pub fn write_administrator(e: &Env, id: &Address) {
    e.storage().instance().set(&DataKey::Admin, id);
}

pub fn read_asset(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Asset)
        .expect("Asset not set")
}

pub fn write_asset(e: &Env, asset: &Address) {
    e.storage().instance().set(&DataKey::Asset, asset);
}

pub fn read_router(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Router)
}

pub fn write_router(e: &Env, router: &Address) {
    e.storage().instance().set(&DataKey::Router, router);
}

pub fn read_treasury(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Treasury)
        .expect("Treasury not set")
}

pub fn write_treasury(e: &Env, treasury: &Address) {
    e.storage().instance().set(&DataKey::Treasury, treasury);
}

pub fn read_bridge(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Bridge)
}

pub fn write_bridge(e: &Env, bridge: &Address) {
    e.storage().instance().set(&DataKey::Bridge, bridge);
}

pub fn read_compliance(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Compliance)
}

pub fn write_compliance(e: &Env, compliance: &Address) {
    e.storage().instance().set(&DataKey::Compliance, compliance);
}

// Metadata functions
pub fn read_metadata(e: &Env) -> TokenMetadata {
    e.storage()
        .instance()
        .get(&DataKey::Metadata)
        .expect("Metadata not set")
}

pub fn write_metadata(e: &Env, metadata: TokenMetadata) {
    e.storage().instance().set(&DataKey::Metadata, &metadata);
}

// Vault parameters
pub fn read_fee_bps(e: &Env) -> u32 {
    e.storage().instance().get(&DataKey::FeeBps).unwrap_or(0)
}

pub fn write_fee_bps(e: &Env, fee_bps: u32) {
    e.storage().instance().set(&DataKey::FeeBps, &fee_bps);
}

pub fn read_min_deposit(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::MinDeposit)
        .unwrap_or(DEFAULT_MIN_DEPOSIT)
}

pub fn write_min_deposit(e: &Env, amount: i128) {
    e.storage().instance().set(&DataKey::MinDeposit, &amount);
}

pub fn read_min_hold(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::MinHold)
        .unwrap_or(DEFAULT_MIN_HOLD_PERIOD)
}

pub fn write_min_hold(e: &Env, seconds: u64) {
    e.storage().instance().set(&DataKey::MinHold, &seconds);
}

pub fn is_paused(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

pub fn write_paused(e: &Env, paused: bool) {
    e.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn is_locked(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Locked).unwrap_or(false)
}

pub fn write_locked(e: &Env, locked: bool) {
    e.storage().instance().set(&DataKey::Locked, &locked);
}

// Share accounting totals
pub fn read_total_raw_shares(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalRawShares)
        .unwrap_or(0)
}

pub fn write_total_raw_shares(e: &Env, amount: i128) {
    e.storage().instance().set(&DataKey::TotalRawShares, &amount);
}

pub fn read_rebase_index(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::RebaseIndex)
        .unwrap_or(crate::conversion::INDEX_PRECISION)
}

pub fn write_rebase_index(e: &Env, index: i128) {
    e.storage().instance().set(&DataKey::RebaseIndex, &index);
}

pub fn read_total_deposited(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalDeposited)
        .unwrap_or(0)
}

pub fn write_total_deposited(e: &Env, amount: i128) {
    e.storage().instance().set(&DataKey::TotalDeposited, &amount);
}

// Raw share balances
pub fn read_raw_balance(e: &Env, addr: &Address) -> i128 {
    let key = DataKey::RawBalance(addr.clone());
    if let Some(balance) = e.storage().persistent().get::<DataKey, i128>(&key) {
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        balance
    } else {
        0
    }
}

pub fn write_raw_balance(e: &Env, addr: &Address, amount: i128) {
    let key = DataKey::RawBalance(addr.clone());
    if amount == 0 {
        e.storage().persistent().remove(&key);
        return;
    }
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

// Deposit timestamps for the hold period. Only deposits and mints write these.
pub fn read_last_deposit(e: &Env, addr: &Address) -> Option<u64> {
    e.storage()
        .persistent()
        .get(&DataKey::LastDeposit(addr.clone()))
}

pub fn write_last_deposit(e: &Env, addr: &Address, timestamp: u64) {
    let key = DataKey::LastDeposit(addr.clone());
    e.storage().persistent().set(&key, &timestamp);
    e.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

// Allowance functions, in rebased units
pub fn read_allowance(e: &Env, from: &Address, spender: &Address) -> i128 {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    e.storage().temporary().get(&key).unwrap_or(0)
}

pub fn write_allowance(
    e: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    e.storage().temporary().set(&key, &amount);

    if expiration_ledger > 0 {
        let ledger = e.ledger().sequence();
        let live_for = expiration_ledger.saturating_sub(ledger);
        e.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}
