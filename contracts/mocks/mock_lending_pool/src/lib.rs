#![no_std]
use soroban_sdk::{contract, contractimpl, token, Address, Env};

/// Mock Lending Pool Contract
///
/// Supply positions are pool shares reported as their asset value, so a supplier's
/// balance rebases 1:1 with the pool. Interest is simulated by minting the underlying
/// asset to the pool. An optional liquidity cap limits how much a single withdrawal can
/// return, to exercise partial redemptions.
#[contract]
pub struct MockLendingPool;

/// Storage keys
const ASSET: &str = "asset";
const TOTAL_SHARES: &str = "total_shares";
const LIQUIDITY_CAP: &str = "liquidity_cap";
const SUPPLY_CALLS: &str = "supply_calls";
const WITHDRAW_CALLS: &str = "withdraw_calls";
const LAST_SUPPLY: &str = "last_supply";
const LAST_WITHDRAW: &str = "last_withdraw";

#[contractimpl]
impl MockLendingPool {
    pub fn __constructor(e: Env, asset: Address) {
        e.storage().instance().set(&ASSET, &asset);
    }

    pub fn supply(e: Env, from: Address, amount: i128) {
        from.require_auth();

        if amount <= 0 {
            panic!("supply amount must be positive");
        }

        let total_shares = Self::get_total_shares(&e);
        let total_assets = Self::total_assets(&e);
        let shares = if total_shares == 0 || total_assets == 0 {
            amount
        } else {
            amount * total_shares / total_assets
        };

        token::Client::new(&e, &Self::get_asset(&e)).transfer(
            &from,
            &e.current_contract_address(),
            &amount,
        );

        Self::set_shares(&e, &from, Self::get_shares(&e, &from) + shares);
        e.storage()
            .instance()
            .set(&TOTAL_SHARES, &(total_shares + shares));

        Self::bump(&e, SUPPLY_CALLS);
        e.storage().instance().set(&LAST_SUPPLY, &amount);
    }

    /// Sends up to `amount` to `to`, bounded by its position and the liquidity cap.
    pub fn withdraw(e: Env, to: Address, amount: i128) -> i128 {
        to.require_auth();

        if amount <= 0 {
            panic!("withdraw amount must be positive");
        }

        let mut sent = amount.min(Self::balance(e.clone(), to.clone()));
        if let Some(cap) = e.storage().instance().get::<_, i128>(&LIQUIDITY_CAP) {
            sent = sent.min(cap);
        }
        if sent <= 0 {
            return 0;
        }

        let total_shares = Self::get_total_shares(&e);
        let total_assets = Self::total_assets(&e);
        let product = sent * total_shares;
        let mut burned = product / total_assets;
        if product % total_assets != 0 {
            burned += 1;
        }
        let held = Self::get_shares(&e, &to);
        let burned = burned.min(held);

        Self::set_shares(&e, &to, held - burned);
        e.storage()
            .instance()
            .set(&TOTAL_SHARES, &(total_shares - burned));

        token::Client::new(&e, &Self::get_asset(&e)).transfer(
            &e.current_contract_address(),
            &to,
            &sent,
        );

        Self::bump(&e, WITHDRAW_CALLS);
        e.storage().instance().set(&LAST_WITHDRAW, &sent);

        sent
    }

    /// Supply position of `account` in the underlying asset
    pub fn balance(e: Env, account: Address) -> i128 {
        let total_shares = Self::get_total_shares(&e);
        if total_shares == 0 {
            return 0;
        }
        Self::get_shares(&e, &account) * Self::total_assets(&e) / total_shares
    }

    pub fn set_liquidity_cap(e: Env, cap: i128) {
        e.storage().instance().set(&LIQUIDITY_CAP, &cap);
    }

    pub fn clear_liquidity_cap(e: Env) {
        e.storage().instance().remove(&LIQUIDITY_CAP);
    }

    pub fn supply_calls(e: Env) -> u32 {
        e.storage().instance().get(&SUPPLY_CALLS).unwrap_or(0)
    }

    pub fn withdraw_calls(e: Env) -> u32 {
        e.storage().instance().get(&WITHDRAW_CALLS).unwrap_or(0)
    }

    pub fn last_supply(e: Env) -> i128 {
        e.storage().instance().get(&LAST_SUPPLY).unwrap_or(0)
    }

    pub fn last_withdraw(e: Env) -> i128 {
        e.storage().instance().get(&LAST_WITHDRAW).unwrap_or(0)
    }

    // ========== Internal Helper Functions ==========

    fn bump(e: &Env, key: &str) {
        let calls: u32 = e.storage().instance().get(&key).unwrap_or(0);
        e.storage().instance().set(&key, &(calls + 1));
    }

    fn get_asset(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&ASSET)
            .expect("asset not initialized")
    }

    fn total_assets(e: &Env) -> i128 {
        token::Client::new(e, &Self::get_asset(e)).balance(&e.current_contract_address())
    }

    fn get_total_shares(e: &Env) -> i128 {
        e.storage().instance().get(&TOTAL_SHARES).unwrap_or(0)
    }

    fn get_shares(e: &Env, account: &Address) -> i128 {
        let key = ("shares", account);
        e.storage().instance().get(&key).unwrap_or(0)
    }

    fn set_shares(e: &Env, account: &Address, amount: i128) {
        let key = ("shares", account);
        e.storage().instance().set(&key, &amount);
    }
}
