#![no_std]
use soroban_sdk::{contract, contractimpl, token, Address, Env};

/// Mock Vault Contract
///
/// Minimal tokenized vault backed by its real asset balance. Yield is simulated by
/// minting the underlying asset straight to the vault, which raises the exchange rate
/// for every shareholder. Call counters let tests assert how often the router touched it.
#[contract]
pub struct MockVault;

/// Storage keys
const ASSET: &str = "asset";
const TOTAL_SHARES: &str = "total_shares";
const DEPOSIT_CALLS: &str = "deposit_calls";
const WITHDRAW_CALLS: &str = "withdraw_calls";
const LAST_DEPOSIT: &str = "last_deposit";
const LAST_WITHDRAW: &str = "last_withdraw";

const RATE_SCALE: i128 = 1_000_000;

#[contractimpl]
impl MockVault {
    pub fn __constructor(e: Env, asset: Address) {
        e.storage().instance().set(&ASSET, &asset);
        e.storage().instance().set(&TOTAL_SHARES, &0i128);
    }

    /// Deposit assets and receive shares
    pub fn deposit(e: Env, from: Address, assets: i128) -> i128 {
        from.require_auth();

        if assets <= 0 {
            panic!("deposit amount must be positive");
        }

        let shares = Self::convert_to_shares(e.clone(), assets);

        let asset_client = token::Client::new(&e, &Self::get_asset(&e));
        asset_client.transfer(&from, &e.current_contract_address(), &assets);

        Self::mint_shares(&e, &from, shares);
        Self::bump(&e, DEPOSIT_CALLS);
        e.storage().instance().set(&LAST_DEPOSIT, &assets);

        shares
    }

    /// Withdraw assets by burning shares
    pub fn withdraw(e: Env, to: Address, shares: i128) -> i128 {
        to.require_auth();

        if shares <= 0 {
            panic!("withdraw amount must be positive");
        }

        if Self::get_balance(&e, &to) < shares {
            panic!("insufficient shares");
        }

        let assets = Self::convert_to_assets(e.clone(), shares);

        Self::burn_shares(&e, &to, shares);

        let asset_client = token::Client::new(&e, &Self::get_asset(&e));
        asset_client.transfer(&e.current_contract_address(), &to, &assets);

        Self::bump(&e, WITHDRAW_CALLS);
        e.storage().instance().set(&LAST_WITHDRAW, &assets);

        assets
    }

    pub fn balance(e: Env, account: Address) -> i128 {
        Self::get_balance(&e, &account)
    }

    pub fn total_shares(e: Env) -> i128 {
        Self::get_total_shares(&e)
    }

    /// Actual asset balance held by the vault
    pub fn total_assets(e: Env) -> i128 {
        token::Client::new(&e, &Self::get_asset(&e)).balance(&e.current_contract_address())
    }

    /// Assets per share scaled by 1e6
    pub fn exchange_rate(e: Env) -> i128 {
        let total_shares = Self::get_total_shares(&e);
        if total_shares == 0 {
            return RATE_SCALE;
        }
        Self::total_assets(e) * RATE_SCALE / total_shares
    }

    pub fn convert_to_shares(e: Env, assets: i128) -> i128 {
        let total_shares = Self::get_total_shares(&e);
        let total_assets = Self::total_assets(e);
        if total_shares == 0 || total_assets == 0 {
            return assets;
        }
        assets * total_shares / total_assets
    }

    pub fn convert_to_assets(e: Env, shares: i128) -> i128 {
        let total_shares = Self::get_total_shares(&e);
        if total_shares == 0 {
            return shares;
        }
        shares * Self::total_assets(e) / total_shares
    }

    /// Shares to burn for `assets`, rounded up
    pub fn preview_withdraw(e: Env, assets: i128) -> i128 {
        let total_shares = Self::get_total_shares(&e);
        let total_assets = Self::total_assets(e);
        if total_shares == 0 || total_assets == 0 {
            return assets;
        }
        let product = assets * total_shares;
        let shares = product / total_assets;
        if product % total_assets != 0 {
            shares + 1
        } else {
            shares
        }
    }

    pub fn deposit_calls(e: Env) -> u32 {
        e.storage().instance().get(&DEPOSIT_CALLS).unwrap_or(0)
    }

    pub fn withdraw_calls(e: Env) -> u32 {
        e.storage().instance().get(&WITHDRAW_CALLS).unwrap_or(0)
    }

    pub fn last_deposit(e: Env) -> i128 {
        e.storage().instance().get(&LAST_DEPOSIT).unwrap_or(0)
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

    fn get_total_shares(e: &Env) -> i128 {
        e.storage().instance().get(&TOTAL_SHARES).unwrap_or(0)
    }

    fn get_balance(e: &Env, account: &Address) -> i128 {
        let key = ("balance", account);
        e.storage().instance().get(&key).unwrap_or(0)
    }

    fn set_balance(e: &Env, account: &Address, amount: i128) {
        let key = ("balance", account);
        e.storage().instance().set(&key, &amount);
    }

    fn mint_shares(e: &Env, to: &Address, amount: i128) {
        let new_balance = Self::get_balance(e, to)
            .checked_add(amount)
            .expect("balance overflow");
        Self::set_balance(e, to, new_balance);

        let new_total = Self::get_total_shares(e)
            .checked_add(amount)
            .expect("total overflow");
        e.storage().instance().set(&TOTAL_SHARES, &new_total);
    }

    fn burn_shares(e: &Env, from: &Address, amount: i128) {
        let current_balance = Self::get_balance(e, from);
        if current_balance < amount {
            panic!("insufficient balance to burn");
        }
        Self::set_balance(e, from, current_balance - amount);

        let total_shares = Self::get_total_shares(e);
        e.storage().instance().set(&TOTAL_SHARES, &(total_shares - amount));
    }
}
