use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String};
use soroban_token_sdk::events::{Burn, Mint};
use rebase_vault_interface::{RebaseVaultTrait, VaultError};
use yield_router_interface::YieldRouterClient;

use crate::conversion::{fee_on, raw_to_rebased, rebased_to_raw, Rounding, ShareState};
use crate::events::{
    BridgeBurnEvent, BridgeMintEvent, BridgeUpdated, ComplianceUpdated, DepositEvent,
    MinDepositUpdated, MinHoldPeriodUpdated, PauseToggled, RedemptionFeeUpdated, RouterSet,
    TotalAssetsUpdated, TreasuryUpdated, WithdrawEvent,
};
use crate::guard::ReentrancyGuard;
use crate::ledger;
use crate::storage::{self, TokenMetadata};

// Child module so the test client generated by its `#[contractimpl]` can
// reach the private fields of `RebaseVaultClient`.
#[path = "token.rs"]
mod token_impl;

pub const MAX_REDEMPTION_FEE_BPS: u32 = 500;

#[contract]
pub struct RebaseVault;

impl RebaseVault {
    fn require_admin(e: &Env) {
        storage::read_administrator(e).require_auth();
    }

    fn require_active(e: &Env) -> Result<(), VaultError> {
        if storage::is_paused(e) {
            return Err(VaultError::Paused);
        }
        Ok(())
    }

    fn router(e: &Env) -> Result<Address, VaultError> {
        storage::read_router(e).ok_or(VaultError::RouterNotSet)
    }

    fn check_hold_period(e: &Env, owner: &Address) -> Result<(), VaultError> {
        if let Some(last) = storage::read_last_deposit(e, owner) {
            let unlocks_at = last.saturating_add(storage::read_min_hold(e));
            if e.ledger().timestamp() < unlocks_at {
                log!(e, "hold period active", owner.clone(), unlocks_at);
                return Err(VaultError::HoldPeriodActive);
            }
        }
        Ok(())
    }

    fn spend_allowance(
        e: &Env,
        from: &Address,
        spender: &Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        let allowance = storage::read_allowance(e, from, spender);
        if allowance < amount {
            log!(e, "insufficient allowance", amount, allowance);
            return Err(VaultError::InsufficientAllowance);
        }
        storage::write_allowance(e, from, spender, allowance - amount, 0);
        Ok(())
    }

    fn set_total_deposited(e: &Env, new_total: i128) {
        let old_total = storage::read_total_deposited(e);
        storage::write_total_deposited(e, new_total);
        TotalAssetsUpdated {
            old_total,
            new_total,
        }
        .publish(e);
    }

    /// Books a deposit of `assets` for `raw` new shares, then moves the assets to the router.
    fn settle_deposit(
        e: &Env,
        caller: &Address,
        receiver: &Address,
        assets: i128,
        raw: i128,
    ) -> Result<i128, VaultError> {
        let router = Self::router(e)?;

        let new_total = storage::read_total_deposited(e)
            .checked_add(assets)
            .ok_or(VaultError::MathOverflow)?;
        Self::set_total_deposited(e, new_total);
        ledger::mint(e, receiver, raw)?;
        storage::write_last_deposit(e, receiver, e.ledger().timestamp());

        token::Client::new(e, &storage::read_asset(e)).transfer(caller, &router, &assets);
        YieldRouterClient::new(e, &router).deposit_to_protocols(&assets);

        let shares = raw_to_rebased(raw, storage::read_rebase_index(e), Rounding::Floor)?;
        Mint {
            to: receiver.clone(),
            to_muxed_id: None,
            amount: shares,
        }
        .publish(e);
        DepositEvent {
            caller: caller.clone(),
            receiver: receiver.clone(),
            assets,
            shares,
        }
        .publish(e);
        Ok(shares)
    }

    /// Burns `raw` shares of `owner` against `assets`, pulls liquidity from the router
    /// and pays the receiver net of the redemption fee. Returns `(realized, fee)`.
    fn settle_redemption(
        e: &Env,
        caller: &Address,
        receiver: &Address,
        owner: &Address,
        assets: i128,
        raw: i128,
    ) -> Result<(i128, i128), VaultError> {
        let router = Self::router(e)?;
        let index = storage::read_rebase_index(e);

        if caller != owner {
            let spent = raw_to_rebased(raw, index, Rounding::Ceil)?;
            Self::spend_allowance(e, owner, caller, spent)?;
        }

        ledger::burn(e, owner, raw)?;
        let remaining = storage::read_total_deposited(e) - assets;
        Self::set_total_deposited(e, remaining);

        let realized = YieldRouterClient::new(e, &router).redeem_from_protocols(&assets);
        let fee = fee_on(realized, storage::read_fee_bps(e))?;
        let net = realized - fee;

        let asset = token::Client::new(e, &storage::read_asset(e));
        if fee > 0 {
            asset.transfer(&e.current_contract_address(), &storage::read_treasury(e), &fee);
        }
        if net > 0 {
            asset.transfer(&e.current_contract_address(), receiver, &net);
        }

        let shares = raw_to_rebased(raw, index, Rounding::Ceil)?;
        Burn {
            from: owner.clone(),
            amount: shares,
        }
        .publish(e);
        WithdrawEvent {
            caller: caller.clone(),
            owner: owner.clone(),
            receiver: receiver.clone(),
            assets: realized,
            shares,
            fee,
        }
        .publish(e);
        Ok((realized, fee))
    }

    fn bridge(e: &Env) -> Result<Address, VaultError> {
        storage::read_bridge(e).ok_or(VaultError::Unsupported)
    }
}

#[contractimpl]
impl RebaseVaultTrait for RebaseVault {
    fn __constructor(
        env: Env,
        admin: Address,
        asset: Address,
        treasury: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) {
        if decimals > 18 {
            panic!("Decimal must not be greater than 18");
        }

        storage::write_administrator(&env, &admin);
        storage::write_asset(&env, &asset);
        storage::write_treasury(&env, &treasury);
        storage::write_metadata(
            &env,
            TokenMetadata {
                name,
                symbol,
                decimals,
            },
        );
    }

    fn set_router(env: Env, router: Address) -> Result<(), VaultError> {
        Self::require_admin(&env);
        if storage::read_router(&env).is_some() {
            return Err(VaultError::AlreadyInitialized);
        }
        storage::write_router(&env, &router);
        RouterSet { router }.publish(&env);
        Ok(())
    }

    fn set_redemption_fee(env: Env, fee_bps: u32) -> Result<(), VaultError> {
        Self::require_admin(&env);
        if fee_bps > MAX_REDEMPTION_FEE_BPS {
            return Err(VaultError::FeeTooHigh);
        }
        storage::write_fee_bps(&env, fee_bps);
        RedemptionFeeUpdated { fee_bps }.publish(&env);
        Ok(())
    }

    fn set_min_deposit(env: Env, amount: i128) -> Result<(), VaultError> {
        Self::require_admin(&env);
        if amount <= 0 {
            return Err(VaultError::ZeroAmount);
        }
        storage::write_min_deposit(&env, amount);
        MinDepositUpdated { amount }.publish(&env);
        Ok(())
    }

    fn set_min_hold_period(env: Env, seconds: u64) {
        Self::require_admin(&env);
        storage::write_min_hold(&env, seconds);
        MinHoldPeriodUpdated { seconds }.publish(&env);
    }

    fn set_treasury(env: Env, treasury: Address) {
        Self::require_admin(&env);
        storage::write_treasury(&env, &treasury);
        TreasuryUpdated { treasury }.publish(&env);
    }

    fn set_bridge(env: Env, bridge: Address) {
        Self::require_admin(&env);
        storage::write_bridge(&env, &bridge);
        BridgeUpdated { bridge }.publish(&env);
    }

    fn set_compliance(env: Env, compliance: Address) {
        Self::require_admin(&env);
        storage::write_compliance(&env, &compliance);
        ComplianceUpdated { compliance }.publish(&env);
    }

    fn pause(env: Env) {
        Self::require_admin(&env);
        storage::write_paused(&env, true);
        PauseToggled { paused: true }.publish(&env);
    }

    fn unpause(env: Env) {
        Self::require_admin(&env);
        storage::write_paused(&env, false);
        PauseToggled { paused: false }.publish(&env);
    }

    fn deposit(env: Env, caller: Address, assets: i128, receiver: Address) -> Result<i128, VaultError> {
        caller.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        Self::require_active(&env)?;

        if assets <= 0 {
            return Err(VaultError::ZeroAmount);
        }
        let min_deposit = storage::read_min_deposit(&env);
        if assets < min_deposit {
            log!(&env, "deposit below minimum", assets, min_deposit);
            return Err(VaultError::BelowMinDeposit);
        }

        let raw = ShareState::load(&env).assets_to_raw(assets, Rounding::Floor)?;
        if raw == 0 {
            return Err(VaultError::ZeroShares);
        }
        Self::settle_deposit(&env, &caller, &receiver, assets, raw)
    }

    fn mint(env: Env, caller: Address, shares: i128, receiver: Address) -> Result<i128, VaultError> {
        caller.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        Self::require_active(&env)?;

        if shares <= 0 {
            return Err(VaultError::ZeroAmount);
        }
        let state = ShareState::load(&env);
        let raw = rebased_to_raw(shares, state.index, Rounding::Ceil)?;
        let assets = state.raw_to_assets(raw, Rounding::Ceil)?;
        let min_deposit = storage::read_min_deposit(&env);
        if assets < min_deposit {
            log!(&env, "mint below minimum deposit", assets, min_deposit);
            return Err(VaultError::BelowMinDeposit);
        }

        Self::settle_deposit(&env, &caller, &receiver, assets, raw)?;
        Ok(assets)
    }

    fn withdraw(
        env: Env,
        caller: Address,
        assets: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        Self::require_active(&env)?;

        if assets <= 0 {
            return Err(VaultError::ZeroAmount);
        }
        let state = ShareState::load(&env);
        if assets > state.total_deposited {
            log!(&env, "withdrawal exceeds total assets", assets, state.total_deposited);
            return Err(VaultError::ExceedsTotalAssets);
        }
        Self::check_hold_period(&env, &owner)?;

        let raw = state.assets_to_raw(assets, Rounding::Ceil)?;
        let held = storage::read_raw_balance(&env, &owner);
        if held < raw {
            log!(&env, "withdrawal exceeds balance", raw, held);
            return Err(VaultError::InsufficientBalance);
        }

        let (realized, _fee) =
            Self::settle_redemption(&env, &caller, &receiver, &owner, assets, raw)?;
        if realized < assets {
            log!(&env, "router could not free enough liquidity", assets, realized);
            return Err(VaultError::InsufficientLiquidity);
        }
        let shares = raw_to_rebased(raw, state.index, Rounding::Ceil)?;
        Ok(shares)
    }

    fn redeem(
        env: Env,
        caller: Address,
        shares: i128,
        receiver: Address,
        owner: Address,
    ) -> Result<i128, VaultError> {
        caller.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        Self::require_active(&env)?;

        if shares <= 0 {
            return Err(VaultError::ZeroAmount);
        }
        Self::check_hold_period(&env, &owner)?;

        let state = ShareState::load(&env);
        let raw = rebased_to_raw(shares, state.index, Rounding::Ceil)?;
        let held = storage::read_raw_balance(&env, &owner);
        if held < raw {
            log!(&env, "redemption exceeds balance", raw, held);
            return Err(VaultError::InsufficientBalance);
        }
        let assets = state
            .raw_to_assets(raw, Rounding::Floor)?
            .min(state.total_deposited);
        if assets == 0 {
            return Err(VaultError::ZeroAmount);
        }

        let (realized, fee) =
            Self::settle_redemption(&env, &caller, &receiver, &owner, assets, raw)?;
        Ok(realized - fee)
    }

    fn bridge_mint(env: Env, to: Address, amount: i128) -> Result<i128, VaultError> {
        Self::bridge(&env)?.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        if amount <= 0 {
            return Err(VaultError::ZeroAmount);
        }

        let index = storage::read_rebase_index(&env);
        let raw = rebased_to_raw(amount, index, Rounding::Floor)?;
        if raw == 0 {
            return Err(VaultError::ZeroShares);
        }
        ledger::ghost_mint(&env, &to, raw)?;

        Mint {
            to: to.clone(),
            to_muxed_id: None,
            amount: raw_to_rebased(raw, index, Rounding::Floor)?,
        }
        .publish(&env);
        BridgeMintEvent {
            to,
            amount,
            raw_shares: raw,
        }
        .publish(&env);
        Ok(raw)
    }

    fn bridge_burn(env: Env, from: Address, amount: i128) -> Result<i128, VaultError> {
        Self::bridge(&env)?.require_auth();
        from.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        if amount <= 0 {
            return Err(VaultError::ZeroAmount);
        }

        let raw = rebased_to_raw(amount, storage::read_rebase_index(&env), Rounding::Ceil)?;
        ledger::ghost_burn(&env, &from, raw)?;

        Burn {
            from: from.clone(),
            amount,
        }
        .publish(&env);
        BridgeBurnEvent {
            from,
            amount,
            raw_shares: raw,
        }
        .publish(&env);
        Ok(raw)
    }

    fn update_rebase_index(env: Env, new_index: i128) -> Result<(), VaultError> {
        Self::router(&env)?.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        storage::extend_instance_ttl(&env);
        ledger::update_index(&env, new_index)
    }

    fn update_total_deposited_assets(env: Env, new_total: i128) -> Result<(), VaultError> {
        Self::router(&env)?.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        if new_total < 0 {
            return Err(VaultError::MathOverflow);
        }
        Self::set_total_deposited(&env, new_total);
        Ok(())
    }

    fn convert_to_shares(env: Env, assets: i128) -> Result<i128, VaultError> {
        let state = ShareState::load(&env);
        let raw = state.assets_to_raw(assets, Rounding::Floor)?;
        raw_to_rebased(raw, state.index, Rounding::Floor)
    }

    fn convert_to_assets(env: Env, shares: i128) -> Result<i128, VaultError> {
        let state = ShareState::load(&env);
        let raw = rebased_to_raw(shares, state.index, Rounding::Floor)?;
        state.raw_to_assets(raw, Rounding::Floor)
    }

    fn preview_deposit(env: Env, assets: i128) -> Result<i128, VaultError> {
        Self::convert_to_shares(env, assets)
    }

    fn preview_mint(env: Env, shares: i128) -> Result<i128, VaultError> {
        let state = ShareState::load(&env);
        let raw = rebased_to_raw(shares, state.index, Rounding::Ceil)?;
        state.raw_to_assets(raw, Rounding::Ceil)
    }

    fn preview_withdraw(env: Env, assets: i128) -> Result<i128, VaultError> {
        let state = ShareState::load(&env);
        let raw = state.assets_to_raw(assets, Rounding::Ceil)?;
        raw_to_rebased(raw, state.index, Rounding::Ceil)
    }

    fn preview_redeem(env: Env, shares: i128) -> Result<i128, VaultError> {
        let state = ShareState::load(&env);
        let raw = rebased_to_raw(shares, state.index, Rounding::Ceil)?;
        Ok(state
            .raw_to_assets(raw, Rounding::Floor)?
            .min(state.total_deposited))
    }

    fn total_supply(env: Env) -> i128 {
        ledger::total_supply(&env).unwrap_or(0)
    }

    fn raw_balance(env: Env, id: Address) -> i128 {
        storage::read_raw_balance(&env, &id)
    }

    fn total_raw_shares(env: Env) -> i128 {
        storage::read_total_raw_shares(&env)
    }

    fn rebase_index(env: Env) -> i128 {
        storage::read_rebase_index(&env)
    }

    fn total_deposited_assets(env: Env) -> i128 {
        storage::read_total_deposited(&env)
    }

    fn last_deposit_time(env: Env, id: Address) -> u64 {
        storage::read_last_deposit(&env, &id).unwrap_or(0)
    }

    fn redemption_fee_bps(env: Env) -> u32 {
        storage::read_fee_bps(&env)
    }

    fn get_asset(env: Env) -> Address {
        storage::read_asset(&env)
    }

    fn get_router(env: Env) -> Option<Address> {
        storage::read_router(&env)
    }

    fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }
}
