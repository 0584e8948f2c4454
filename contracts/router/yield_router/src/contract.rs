use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};
use yield_router_interface::{
    AllocationMode, ProtocolKind, RouterError, UpkeepOutcome, YieldAssetEntry, YieldRouterTrait,
};

use crate::accounting;
use crate::accrual;
use crate::allocation;
use crate::events::{
    AllocationModeUpdated, AutomationIntervalUpdated, EmergencyWithdrawal, ExcessRescued,
    PriceFeedUpdated,
};
use crate::guard::ReentrancyGuard;
use crate::netting;
use crate::registry;
use crate::storage::{self, PriceFeedConfig};

#[contract]
pub struct YieldRouter;

impl YieldRouter {
    fn require_admin(env: &Env) {
        storage::get_admin(env).require_auth();
    }

    fn require_vault(env: &Env) {
        storage::get_vault(env).require_auth();
    }
}

#[contractimpl]
impl YieldRouterTrait for YieldRouter {
    fn __constructor(env: Env, admin: Address, asset: Address, vault: Address) {
        storage::set_admin(&env, &admin);
        storage::set_asset(&env, &asset);
        storage::set_vault(&env, &vault);
        storage::set_last_accrual(&env, env.ledger().timestamp());
    }

    fn add_asset(
        env: Env,
        token: Address,
        deposit_token: Address,
        manager: Address,
        kind: ProtocolKind,
    ) -> Result<(), RouterError> {
        YieldRouter::require_admin(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        allocation::add_asset(&env, &token, &deposit_token, &manager, kind)
    }

    fn update_weights(env: Env, weights: Vec<u32>) -> Result<(), RouterError> {
        YieldRouter::require_admin(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        allocation::update_weights(&env, &weights)
    }

    fn remove_asset(env: Env, token: Address) -> Result<(), RouterError> {
        YieldRouter::require_admin(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        allocation::remove_asset(&env, &token)
    }

    fn set_price_feed(
        env: Env,
        token: Address,
        feed: Address,
        min_price: i128,
        max_price: i128,
    ) -> Result<(), RouterError> {
        YieldRouter::require_admin(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        if !registry::contains(&env, &token) {
            return Err(RouterError::AssetNotFound);
        }
        if min_price <= 0 || max_price < min_price {
            return Err(RouterError::InvalidPriceBounds);
        }

        storage::set_price_feed(
            &env,
            &token,
            &PriceFeedConfig {
                feed: feed.clone(),
                min_price,
                max_price,
            },
        );
        PriceFeedUpdated {
            token,
            feed,
            min_price,
            max_price,
        }
        .publish(&env);
        Ok(())
    }

    fn set_allocation_mode(env: Env, mode: AllocationMode) {
        YieldRouter::require_admin(&env);
        storage::set_allocation_mode(&env, mode);
        AllocationModeUpdated { mode }.publish(&env);
    }

    fn set_automation_interval(env: Env, seconds: u64) -> Result<(), RouterError> {
        YieldRouter::require_admin(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        if seconds == 0 {
            return Err(RouterError::InvalidInterval);
        }
        storage::set_interval(&env, seconds);
        AutomationIntervalUpdated { seconds }.publish(&env);
        Ok(())
    }

    fn deposit_to_protocols(env: Env, amount: i128) -> Result<(), RouterError> {
        YieldRouter::require_vault(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);

        if amount <= 0 {
            return Err(RouterError::ZeroAmount);
        }

        accounting::credit(&env, amount)?;
        accounting::ensure_backed(&env)?;

        match storage::get_allocation_mode(&env) {
            AllocationMode::Immediate => {
                allocation::allocate(&env, amount)?;
            }
            AllocationMode::Lazy => netting::enqueue(&env, amount)?,
        }
        Ok(())
    }

    fn redeem_from_protocols(env: Env, amount: i128) -> Result<i128, RouterError> {
        YieldRouter::require_vault(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);

        if amount <= 0 {
            return Err(RouterError::ZeroAmount);
        }

        let idle = accounting::tracked_balance(&env);
        if idle < amount {
            allocation::redeem(&env, amount - idle)?;
        }

        let payout = amount.min(accounting::tracked_balance(&env));
        accounting::debit(&env, payout)?;

        // Whatever is still pending must stay covered by idle balance.
        let tracked = accounting::tracked_balance(&env);
        if storage::get_pending_deposits(&env) > tracked {
            storage::set_pending_deposits(&env, tracked);
        }

        if payout > 0 {
            token::Client::new(&env, &storage::get_asset(&env)).transfer(
                &env.current_contract_address(),
                &storage::get_vault(&env),
                &payout,
            );
        }
        Ok(payout)
    }

    fn accrue(env: Env) -> Result<i128, RouterError> {
        YieldRouter::require_admin(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        accrual::accrue(&env)
    }

    fn check_upkeep(env: Env) -> Result<bool, RouterError> {
        netting::check_upkeep(&env)
    }

    fn perform_upkeep(env: Env) -> Result<UpkeepOutcome, RouterError> {
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        netting::perform_upkeep(&env)
    }

    fn rescue_excess(env: Env, to: Address) -> Result<i128, RouterError> {
        YieldRouter::require_admin(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;

        let amount = accounting::rescue_excess(&env, &to);
        ExcessRescued { to, amount }.publish(&env);
        Ok(amount)
    }

    fn emergency_withdraw_all(env: Env) -> Result<i128, RouterError> {
        YieldRouter::require_admin(&env);
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);

        let amount = allocation::drain_all(&env)?;
        storage::set_pending_deposits(&env, 0);
        EmergencyWithdrawal { amount }.publish(&env);
        Ok(amount)
    }

    fn get_total_value(env: Env) -> Result<i128, RouterError> {
        accrual::total_value(&env)
    }

    fn get_deployed_value(env: Env) -> Result<i128, RouterError> {
        allocation::deployed_value(&env)
    }

    fn unrealized_yield(env: Env) -> Result<i128, RouterError> {
        Ok(accrual::snapshot(&env)?.yield_amount)
    }

    fn tracked_balance(env: Env) -> i128 {
        accounting::tracked_balance(&env)
    }

    fn excess_donation(env: Env) -> i128 {
        accounting::excess_donation(&env)
    }

    fn pending_deposits(env: Env) -> i128 {
        storage::get_pending_deposits(&env)
    }

    fn get_assets(env: Env) -> Vec<YieldAssetEntry> {
        registry::entries(&env)
    }

    fn get_asset(env: Env, token: Address) -> Option<YieldAssetEntry> {
        registry::get(&env, &token)
    }

    fn allocation_mode(env: Env) -> AllocationMode {
        storage::get_allocation_mode(&env)
    }

    fn automation_interval(env: Env) -> u64 {
        storage::get_interval(&env)
    }

    fn last_accrual_time(env: Env) -> u64 {
        storage::get_last_accrual(&env)
    }

    fn get_vault(env: Env) -> Address {
        storage::get_vault(&env)
    }
}
