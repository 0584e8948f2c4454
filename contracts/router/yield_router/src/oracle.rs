use soroban_sdk::{Address, Env};
use treasury_interface::{PriceData, PriceFeedClient};
use yield_router_interface::RouterError;

use crate::storage::{self, PriceFeedConfig};

/// Prices are scaled by 1e8.
pub const PRICE_PRECISION: i128 = 100_000_000;
pub const MAX_PRICE_STALENESS: u64 = 3_600;

/// Reads and validates the configured feed for `token`. A bad answer rejects the whole call.
pub fn read_price(env: &Env, token: &Address) -> Result<i128, RouterError> {
    let config = storage::get_price_feed(env, token).ok_or(RouterError::OracleNotConfigured)?;
    let data = PriceFeedClient::new(env, &config.feed).latest_price();
    validate(&data, &config, env.ledger().timestamp())
}

pub fn validate(data: &PriceData, config: &PriceFeedConfig, now: u64) -> Result<i128, RouterError> {
    if !data.round_complete {
        return Err(RouterError::OracleRoundIncomplete);
    }
    if data.updated_at > now || now - data.updated_at > MAX_PRICE_STALENESS {
        return Err(RouterError::OracleStale);
    }
    if data.price <= 0 || data.price < config.min_price || data.price > config.max_price {
        return Err(RouterError::OraclePriceOutOfBounds);
    }
    Ok(data.price)
}
