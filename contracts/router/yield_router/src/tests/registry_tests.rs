use super::fixture::{UNIT, PRICE_ONE};
use super::RouterTest;
use crate::storage;
use crate::{AllocationMode, ProtocolKind, RouterError};
use soroban_sdk::{testutils::Address as _, vec, Address};

#[test]
fn test_new_asset_starts_inactive() {
    let test = RouterTest::setup();
    test.add_tokenized();

    let entry = test.router.get_asset(&test.tokenized.address).unwrap();
    assert_eq!(entry.weight_bps, 0);
    assert_eq!(entry.kind, ProtocolKind::TokenizedVault);
    assert_eq!(test.router.get_assets().len(), 1);
}

#[test]
fn test_duplicate_asset_is_rejected() {
    let test = RouterTest::setup();
    test.add_tokenized();

    let result = test.router.try_add_asset(
        &test.tokenized.address,
        &test.asset.address,
        &test.tokenized.address,
        &ProtocolKind::TokenizedVault,
    );
    assert_eq!(result, Err(Ok(RouterError::AssetAlreadyExists)));
}

#[test]
fn test_registry_is_capped() {
    let test = RouterTest::setup();

    for _ in 0..10 {
        let token = Address::generate(&test.env);
        test.router.add_asset(
            &token,
            &test.asset.address,
            &token,
            &ProtocolKind::LendingPool,
        );
    }

    let token = Address::generate(&test.env);
    let result = test.router.try_add_asset(
        &token,
        &test.asset.address,
        &token,
        &ProtocolKind::LendingPool,
    );
    assert_eq!(result, Err(Ok(RouterError::MaxAssetsReached)));
}

#[test]
fn test_foreign_deposit_token_is_rejected() {
    let test = RouterTest::setup();

    let result = test.router.try_add_asset(
        &test.lending.address,
        &Address::generate(&test.env),
        &test.lending.address,
        &ProtocolKind::LendingPool,
    );
    assert_eq!(result, Err(Ok(RouterError::InvalidDepositToken)));
}

#[test]
fn test_weight_vector_must_match_registry() {
    let test = RouterTest::setup();
    test.add_tokenized();
    test.add_lending();

    let result = test.router.try_update_weights(&vec![&test.env, 10_000u32]);
    assert_eq!(result, Err(Ok(RouterError::LengthMismatch)));

    let result = test
        .router
        .try_update_weights(&vec![&test.env, 5_000u32, 4_999u32]);
    assert_eq!(result, Err(Ok(RouterError::InvalidTotalWeight)));

    let result = test
        .router
        .try_update_weights(&vec![&test.env, u32::MAX, 10_001u32]);
    assert_eq!(result, Err(Ok(RouterError::InvalidTotalWeight)));

    test.set_weights(&[6_000, 4_000]);
    let total: u32 = test.router.get_assets().iter().map(|e| e.weight_bps).sum();
    assert_eq!(total, 10_000);
}

#[test]
fn test_all_inactive_is_allowed() {
    let test = RouterTest::setup();
    test.add_tokenized();
    test.add_lending();

    test.set_weights(&[0, 0]);
    assert!(test.router.get_assets().iter().all(|e| e.weight_bps == 0));
}

#[test]
fn test_deactivating_an_asset_drains_it() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_tokenized();
    test.add_lending();
    test.set_weights(&[5_000, 5_000]);

    test.deposit(&test.user1, 1_000 * UNIT);
    assert_eq!(test.lending.balance(&test.router.address), 500 * UNIT);
    assert_eq!(test.router.tracked_balance(), 0);

    test.set_weights(&[10_000, 0]);

    assert_eq!(test.lending.balance(&test.router.address), 0);
    assert_eq!(test.router.tracked_balance(), 500 * UNIT);
    assert_eq!(test.router.get_total_value(), 1_000 * UNIT);
    // The still-active entry is left alone
    assert_eq!(test.tokenized.withdraw_calls(), 0);
}

#[test]
fn test_two_phase_removal() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_tokenized();
    test.add_lending();
    test.set_weights(&[5_000, 5_000]);
    test.deposit(&test.user1, 100 * UNIT);

    let result = test.router.try_remove_asset(&test.lending.address);
    assert_eq!(result, Err(Ok(RouterError::AssetStillActive)));

    test.set_weights(&[10_000, 0]);
    test.router.remove_asset(&test.lending.address);

    assert_eq!(test.router.get_asset(&test.lending.address), None);
    assert_eq!(test.router.get_assets().len(), 1);

    let result = test.router.try_remove_asset(&test.lending.address);
    assert_eq!(result, Err(Ok(RouterError::AssetNotFound)));
}

#[test]
fn test_drain_below_minimum_redemption_is_swallowed() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_tokenized();
    test.add_treasury();
    test.set_weights(&[5_000, 5_000]);

    test.deposit(&test.user1, 1_000 * UNIT);
    assert_eq!(test.treasury.balance(&test.router.address), 500 * UNIT);

    test.treasury.set_min_redemption(&(1_000 * UNIT));
    test.set_weights(&[10_000, 0]);

    // Weight change went through, the position stayed behind
    assert_eq!(
        test.router.get_asset(&test.treasury.address).unwrap().weight_bps,
        0
    );
    assert_eq!(test.treasury.balance(&test.router.address), 500 * UNIT);
    assert_eq!(test.treasury.redeem_calls(), 0);
    assert_eq!(test.router.tracked_balance(), 0);

    // Residual position is still valued
    test.refresh_price(PRICE_ONE);
    assert_eq!(test.router.get_total_value(), 1_000 * UNIT);

    let result = test.router.try_remove_asset(&test.treasury.address);
    assert_eq!(result, Err(Ok(RouterError::FundsRemaining)));

    test.treasury.set_min_redemption(&0);
    test.router.emergency_withdraw_all();
    test.router.remove_asset(&test.treasury.address);
    assert_eq!(test.router.tracked_balance(), 1_000 * UNIT);
}

#[test]
fn test_only_admin_manages_registry() {
    let test = RouterTest::setup();
    test.env.mock_auths(&[]);

    let result = test.router.try_add_asset(
        &test.tokenized.address,
        &test.asset.address,
        &test.tokenized.address,
        &ProtocolKind::TokenizedVault,
    );
    assert!(result.is_err());
    assert_eq!(test.router.get_assets().len(), 0);
}

#[test]
fn test_locked_router_rejects_entry() {
    let test = RouterTest::setup();
    test.add_tokenized();
    test.env
        .as_contract(&test.router.address, || storage::set_locked(&test.env, true));

    let result = test.router.try_update_weights(&vec![&test.env, 10_000u32]);
    assert_eq!(result, Err(Ok(RouterError::Reentrancy)));
    let result = test.router.try_add_asset(
        &test.lending.address,
        &test.asset.address,
        &test.lending.address,
        &ProtocolKind::LendingPool,
    );
    assert_eq!(result, Err(Ok(RouterError::Reentrancy)));
    let result = test.router.try_remove_asset(&test.tokenized.address);
    assert_eq!(result, Err(Ok(RouterError::Reentrancy)));
    assert_eq!(test.router.get_assets().len(), 1);
}

#[test]
fn test_router_lock_is_released_after_each_call() {
    let test = RouterTest::setup();
    let is_locked = || {
        test.env
            .as_contract(&test.router.address, || storage::is_locked(&test.env))
    };

    test.add_tokenized();
    assert!(!is_locked());
    test.set_weights(&[10_000]);
    assert!(!is_locked());
    test.deposit(&test.user1, 100 * UNIT);
    assert!(!is_locked());

    let result = test.router.try_remove_asset(&test.tokenized.address);
    assert_eq!(result, Err(Ok(RouterError::AssetStillActive)));
    assert!(!is_locked());
}
