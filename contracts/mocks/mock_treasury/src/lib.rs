#![no_std]
use soroban_sdk::{contract, contractimpl, token, Address, Env};
use treasury_interface::{PriceData, PriceFeedClient, TreasuryError};

const PRICE_PRECISION: i128 = 100_000_000;

/// Mock Price Feed Contract
///
/// Returns whatever answer the test last set.
#[contract]
pub struct MockPriceFeed;

const ANSWER: &str = "answer";

#[contractimpl]
impl MockPriceFeed {
    pub fn set_price(e: Env, price: i128, updated_at: u64, round_complete: bool) {
        let answer = PriceData {
            price,
            updated_at,
            round_complete,
        };
        e.storage().instance().set(&ANSWER, &answer);
    }

    pub fn latest_price(e: Env) -> PriceData {
        e.storage()
            .instance()
            .get(&ANSWER)
            .expect("price not set")
    }
}

/// Mock Treasury Manager Contract
///
/// Subscriptions mint treasury tokens at the feed price and redemptions burn them,
/// refusing any redemption smaller than the configured minimum.
#[contract]
pub struct MockTreasuryManager;

/// Storage keys
const ASSET: &str = "asset";
const FEED: &str = "feed";
const MIN_REDEMPTION: &str = "min_redemption";
const SUBSCRIBE_CALLS: &str = "subscribe_calls";
const REDEEM_CALLS: &str = "redeem_calls";
const LAST_SUBSCRIBE: &str = "last_subscribe";
const LAST_REDEEM: &str = "last_redeem";

#[contractimpl]
impl MockTreasuryManager {
    pub fn __constructor(e: Env, asset: Address, feed: Address, min_redemption: i128) {
        e.storage().instance().set(&ASSET, &asset);
        e.storage().instance().set(&FEED, &feed);
        e.storage().instance().set(&MIN_REDEMPTION, &min_redemption);
    }

    pub fn subscribe(e: Env, from: Address, amount: i128) -> i128 {
        from.require_auth();

        if amount <= 0 {
            panic!("subscription amount must be positive");
        }

        let tokens = amount * PRICE_PRECISION / Self::price(&e);
        token::Client::new(&e, &Self::get_asset(&e)).transfer(
            &from,
            &e.current_contract_address(),
            &amount,
        );
        Self::set_tokens(&e, &from, Self::get_tokens(&e, &from) + tokens);

        Self::bump(&e, SUBSCRIBE_CALLS);
        e.storage().instance().set(&LAST_SUBSCRIBE, &amount);

        tokens
    }

    pub fn redeem(e: Env, to: Address, tokens: i128) -> Result<i128, TreasuryError> {
        to.require_auth();

        if tokens < Self::min_redemption(e.clone()) {
            return Err(TreasuryError::BelowMinimumRedemption);
        }
        let held = Self::get_tokens(&e, &to);
        if held < tokens {
            return Err(TreasuryError::InsufficientBalance);
        }

        let assets = tokens * Self::price(&e) / PRICE_PRECISION;
        Self::set_tokens(&e, &to, held - tokens);
        token::Client::new(&e, &Self::get_asset(&e)).transfer(
            &e.current_contract_address(),
            &to,
            &assets,
        );

        Self::bump(&e, REDEEM_CALLS);
        e.storage().instance().set(&LAST_REDEEM, &assets);

        Ok(assets)
    }

    pub fn min_redemption(e: Env) -> i128 {
        e.storage().instance().get(&MIN_REDEMPTION).unwrap_or(0)
    }

    pub fn set_min_redemption(e: Env, amount: i128) {
        e.storage().instance().set(&MIN_REDEMPTION, &amount);
    }

    /// Treasury tokens held by `account`
    pub fn balance(e: Env, account: Address) -> i128 {
        Self::get_tokens(&e, &account)
    }

    pub fn subscribe_calls(e: Env) -> u32 {
        e.storage().instance().get(&SUBSCRIBE_CALLS).unwrap_or(0)
    }

    pub fn redeem_calls(e: Env) -> u32 {
        e.storage().instance().get(&REDEEM_CALLS).unwrap_or(0)
    }

    pub fn last_subscribe(e: Env) -> i128 {
        e.storage().instance().get(&LAST_SUBSCRIBE).unwrap_or(0)
    }

    pub fn last_redeem(e: Env) -> i128 {
        e.storage().instance().get(&LAST_REDEEM).unwrap_or(0)
    }

    // ========== Internal Helper Functions ==========

    fn bump(e: &Env, key: &str) {
        let calls: u32 = e.storage().instance().get(&key).unwrap_or(0);
        e.storage().instance().set(&key, &(calls + 1));
    }

    fn price(e: &Env) -> i128 {
        let feed: Address = e
            .storage()
            .instance()
            .get(&FEED)
            .expect("feed not initialized");
        PriceFeedClient::new(e, &feed).latest_price().price
    }

    fn get_asset(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&ASSET)
            .expect("asset not initialized")
    }

    fn get_tokens(e: &Env, account: &Address) -> i128 {
        let key = ("tokens", account);
        e.storage().instance().get(&key).unwrap_or(0)
    }

    fn set_tokens(e: &Env, account: &Address, amount: i128) {
        let key = ("tokens", account);
        e.storage().instance().set(&key, &amount);
    }
}
