//! Protocol adapters.
//!
//! Each registered asset is driven through the adapter picked by its `ProtocolKind`.
//! Adapters only move funds and report values; the allocation ledger measures what
//! actually arrived and keeps the books.

use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    log, token, vec, Address, Env, IntoVal, Symbol,
};
use lending_pool_interface::LendingPoolClient;
use tokenized_vault_interface::TokenizedVaultClient;
use treasury_interface::{TreasuryError, TreasuryManagerClient};
use yield_router_interface::{ProtocolKind, RouterError, YieldAssetEntry};

use crate::oracle::{self, PRICE_PRECISION};

/// Exchange rates reported by liquid-staking wrappers are scaled by 1e6.
pub const RATE_PRECISION: i128 = 1_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrainOutcome {
    Redeemed,
    /// The protocol refused a redemption below its minimum size; the position stays put.
    Skipped,
}

pub trait YieldSource {
    /// Position tokens held by the router.
    fn position(&self, env: &Env) -> i128;
    fn deposit(&self, env: &Env, amount: i128) -> Result<(), RouterError>;
    /// Best-effort redemption of `target` reference-asset units.
    fn redeem(&self, env: &Env, target: i128) -> Result<(), RouterError>;
    /// Redeems the whole position.
    fn drain(&self, env: &Env) -> Result<DrainOutcome, RouterError>;
    /// Current position expressed in the reference asset.
    fn value(&self, env: &Env) -> Result<i128, RouterError>;
}

pub struct TokenizedVaultAdapter {
    entry: YieldAssetEntry,
}

pub struct LendingPoolAdapter {
    entry: YieldAssetEntry,
}

pub struct TreasuryAdapter {
    entry: YieldAssetEntry,
}

pub struct LiquidStakingAdapter {
    entry: YieldAssetEntry,
}

pub enum ProtocolAdapter {
    TokenizedVault(TokenizedVaultAdapter),
    LendingPool(LendingPoolAdapter),
    TreasuryManager(TreasuryAdapter),
    LiquidStaking(LiquidStakingAdapter),
}

impl ProtocolAdapter {
    pub fn from_entry(entry: &YieldAssetEntry) -> Self {
        let entry = entry.clone();
        match entry.kind {
            ProtocolKind::TokenizedVault => {
                ProtocolAdapter::TokenizedVault(TokenizedVaultAdapter { entry })
            }
            ProtocolKind::LendingPool => ProtocolAdapter::LendingPool(LendingPoolAdapter { entry }),
            ProtocolKind::TreasuryManager => {
                ProtocolAdapter::TreasuryManager(TreasuryAdapter { entry })
            }
            ProtocolKind::LiquidStaking => {
                ProtocolAdapter::LiquidStaking(LiquidStakingAdapter { entry })
            }
        }
    }

    pub fn source(&self) -> &dyn YieldSource {
        match self {
            ProtocolAdapter::TokenizedVault(adapter) => adapter,
            ProtocolAdapter::LendingPool(adapter) => adapter,
            ProtocolAdapter::TreasuryManager(adapter) => adapter,
            ProtocolAdapter::LiquidStaking(adapter) => adapter,
        }
    }
}

fn position_of(env: &Env, entry: &YieldAssetEntry) -> i128 {
    token::Client::new(env, &entry.token).balance(&env.current_contract_address())
}

/// Pre-authorizes `manager` to pull `amount` of the deposit token from the router.
fn authorize_pull(env: &Env, entry: &YieldAssetEntry, amount: i128) {
    env.authorize_as_current_contract(vec![
        env,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: entry.deposit_token.clone(),
                fn_name: Symbol::new(env, "transfer"),
                args: (
                    env.current_contract_address(),
                    entry.manager.clone(),
                    amount,
                )
                    .into_val(env),
            },
            sub_invocations: vec![env],
        }),
    ]);
}

fn mul_div_floor(a: i128, b: i128, denominator: i128) -> Result<i128, RouterError> {
    a.checked_mul(b)
        .and_then(|v| v.checked_div(denominator))
        .ok_or(RouterError::MathOverflow)
}

fn mul_div_ceil(a: i128, b: i128, denominator: i128) -> Result<i128, RouterError> {
    let product = a.checked_mul(b).ok_or(RouterError::MathOverflow)?;
    let quotient = product
        .checked_div(denominator)
        .ok_or(RouterError::MathOverflow)?;
    if product % denominator != 0 {
        Ok(quotient + 1)
    } else {
        Ok(quotient)
    }
}

impl YieldSource for TokenizedVaultAdapter {
    fn position(&self, env: &Env) -> i128 {
        position_of(env, &self.entry)
    }

    fn deposit(&self, env: &Env, amount: i128) -> Result<(), RouterError> {
        authorize_pull(env, &self.entry, amount);
        TokenizedVaultClient::new(env, &self.entry.manager)
            .deposit(&env.current_contract_address(), &amount);
        Ok(())
    }

    fn redeem(&self, env: &Env, target: i128) -> Result<(), RouterError> {
        let client = TokenizedVaultClient::new(env, &self.entry.manager);
        let shares = client.preview_withdraw(&target).min(self.position(env));
        if shares > 0 {
            client.withdraw(&env.current_contract_address(), &shares);
        }
        Ok(())
    }

    fn drain(&self, env: &Env) -> Result<DrainOutcome, RouterError> {
        let shares = self.position(env);
        if shares > 0 {
            TokenizedVaultClient::new(env, &self.entry.manager)
                .withdraw(&env.current_contract_address(), &shares);
        }
        Ok(DrainOutcome::Redeemed)
    }

    fn value(&self, env: &Env) -> Result<i128, RouterError> {
        let shares = self.position(env);
        if shares == 0 {
            return Ok(0);
        }
        Ok(TokenizedVaultClient::new(env, &self.entry.manager).convert_to_assets(&shares))
    }
}

impl YieldSource for LiquidStakingAdapter {
    fn position(&self, env: &Env) -> i128 {
        position_of(env, &self.entry)
    }

    fn deposit(&self, env: &Env, amount: i128) -> Result<(), RouterError> {
        authorize_pull(env, &self.entry, amount);
        TokenizedVaultClient::new(env, &self.entry.manager)
            .deposit(&env.current_contract_address(), &amount);
        Ok(())
    }

    fn redeem(&self, env: &Env, target: i128) -> Result<(), RouterError> {
        let client = TokenizedVaultClient::new(env, &self.entry.manager);
        let rate = client.exchange_rate();
        if rate <= 0 {
            return Err(RouterError::ProtocolCallFailed);
        }
        let shares = mul_div_ceil(target, RATE_PRECISION, rate)?.min(self.position(env));
        if shares > 0 {
            client.withdraw(&env.current_contract_address(), &shares);
        }
        Ok(())
    }

    fn drain(&self, env: &Env) -> Result<DrainOutcome, RouterError> {
        let shares = self.position(env);
        if shares > 0 {
            TokenizedVaultClient::new(env, &self.entry.manager)
                .withdraw(&env.current_contract_address(), &shares);
        }
        Ok(DrainOutcome::Redeemed)
    }

    fn value(&self, env: &Env) -> Result<i128, RouterError> {
        let shares = self.position(env);
        if shares == 0 {
            return Ok(0);
        }
        let rate = TokenizedVaultClient::new(env, &self.entry.manager).exchange_rate();
        mul_div_floor(shares, rate, RATE_PRECISION)
    }
}

impl YieldSource for LendingPoolAdapter {
    fn position(&self, env: &Env) -> i128 {
        position_of(env, &self.entry)
    }

    fn deposit(&self, env: &Env, amount: i128) -> Result<(), RouterError> {
        authorize_pull(env, &self.entry, amount);
        LendingPoolClient::new(env, &self.entry.manager)
            .supply(&env.current_contract_address(), &amount);
        Ok(())
    }

    fn redeem(&self, env: &Env, target: i128) -> Result<(), RouterError> {
        let amount = target.min(self.position(env));
        if amount > 0 {
            LendingPoolClient::new(env, &self.entry.manager)
                .withdraw(&env.current_contract_address(), &amount);
        }
        Ok(())
    }

    fn drain(&self, env: &Env) -> Result<DrainOutcome, RouterError> {
        let amount = self.position(env);
        if amount > 0 {
            LendingPoolClient::new(env, &self.entry.manager)
                .withdraw(&env.current_contract_address(), &amount);
        }
        Ok(DrainOutcome::Redeemed)
    }

    // Supply positions rebase 1:1 against the supplied asset.
    fn value(&self, env: &Env) -> Result<i128, RouterError> {
        Ok(self.position(env))
    }
}

impl TreasuryAdapter {
    fn redeem_tokens(&self, env: &Env, tokens: i128) -> Result<DrainOutcome, RouterError> {
        let client = TreasuryManagerClient::new(env, &self.entry.manager);
        match client.try_redeem(&env.current_contract_address(), &tokens) {
            Ok(Ok(_)) => Ok(DrainOutcome::Redeemed),
            Err(Ok(TreasuryError::BelowMinimumRedemption)) => {
                log!(env, "treasury redemption below minimum", self.entry.token, tokens);
                Ok(DrainOutcome::Skipped)
            }
            _ => Err(RouterError::ProtocolCallFailed),
        }
    }
}

impl YieldSource for TreasuryAdapter {
    fn position(&self, env: &Env) -> i128 {
        position_of(env, &self.entry)
    }

    fn deposit(&self, env: &Env, amount: i128) -> Result<(), RouterError> {
        authorize_pull(env, &self.entry, amount);
        TreasuryManagerClient::new(env, &self.entry.manager)
            .subscribe(&env.current_contract_address(), &amount);
        Ok(())
    }

    fn redeem(&self, env: &Env, target: i128) -> Result<(), RouterError> {
        let price = oracle::read_price(env, &self.entry.token)?;
        let tokens = mul_div_ceil(target, PRICE_PRECISION, price)?.min(self.position(env));
        if tokens <= 0 {
            return Ok(());
        }
        let minimum = TreasuryManagerClient::new(env, &self.entry.manager).min_redemption();
        if tokens < minimum {
            log!(env, "skipping treasury redemption below minimum", tokens, minimum);
            return Ok(());
        }
        self.redeem_tokens(env, tokens)?;
        Ok(())
    }

    fn drain(&self, env: &Env) -> Result<DrainOutcome, RouterError> {
        let tokens = self.position(env);
        if tokens == 0 {
            return Ok(DrainOutcome::Redeemed);
        }
        self.redeem_tokens(env, tokens)
    }

    fn value(&self, env: &Env) -> Result<i128, RouterError> {
        let tokens = self.position(env);
        if tokens == 0 {
            return Ok(0);
        }
        let price = oracle::read_price(env, &self.entry.token)?;
        mul_div_floor(tokens, price, PRICE_PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_division_rounds_partial_units_up() {
        assert_eq!(mul_div_ceil(10, 3, 4), Ok(8));
        assert_eq!(mul_div_ceil(10, 4, 4), Ok(10));
        assert_eq!(mul_div_floor(10, 3, 4), Ok(7));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(mul_div_floor(i128::MAX, 2, 1), Err(RouterError::MathOverflow));
        assert_eq!(mul_div_ceil(1, 1, 0), Err(RouterError::MathOverflow));
    }
}
