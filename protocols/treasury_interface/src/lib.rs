#![no_std]

use soroban_sdk::{contractclient, contracterror, contracttype, Address, Env};

/// Oracle answer for the treasury token price, scaled by 1e8.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub updated_at: u64,
    pub round_complete: bool,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TreasuryError {
    BelowMinimumRedemption = 1,
    InsufficientBalance = 2,
}

/// Treasury-instrument manager: subscriptions mint treasury tokens at the oracle price,
/// redemptions burn them and enforce a hard minimum size.
#[contractclient(name = "TreasuryManagerClient")]
pub trait TreasuryManagerTrait {
    fn subscribe(e: Env, from: Address, amount: i128) -> i128;
    fn redeem(e: Env, to: Address, tokens: i128) -> Result<i128, TreasuryError>;
    fn min_redemption(e: Env) -> i128;
    fn balance(e: Env, account: Address) -> i128;
}

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedTrait {
    fn latest_price(e: Env) -> PriceData;
}
