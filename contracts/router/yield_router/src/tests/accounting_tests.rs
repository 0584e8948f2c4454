use super::fixture::UNIT;
use super::RouterTest;
use crate::{AllocationMode, RouterError};

#[test]
fn test_donation_is_not_counted() {
    let test = RouterTest::setup();
    test.deposit(&test.user1, 1_000 * UNIT);

    test.asset_admin.mint(&test.router.address, &(50 * UNIT));

    assert_eq!(test.router.tracked_balance(), 1_000 * UNIT);
    assert_eq!(test.router.get_total_value(), 1_000 * UNIT);
    assert_eq!(test.router.excess_donation(), 50 * UNIT);
    assert_eq!(test.router.unrealized_yield(), 0);
    assert_eq!(test.router.accrue(), 0);
    assert_eq!(test.vault.rebase_index(), rebase_vault::INDEX_PRECISION);
}

#[test]
fn test_rescue_excess_leaves_tracked_balance() {
    let test = RouterTest::setup();
    test.deposit(&test.user1, 1_000 * UNIT);
    test.asset_admin.mint(&test.router.address, &(50 * UNIT));

    let rescued = test.router.rescue_excess(&test.admin);

    assert_eq!(rescued, 50 * UNIT);
    assert_eq!(test.asset.balance(&test.admin), 50 * UNIT);
    assert_eq!(test.router.tracked_balance(), 1_000 * UNIT);
    assert_eq!(test.router.excess_donation(), 0);
    assert_eq!(test.router.rescue_excess(&test.admin), 0);
}

#[test]
fn test_unbacked_credit_is_rejected() {
    let test = RouterTest::setup();

    // Nothing was transferred alongside the call
    let result = test.router.try_deposit_to_protocols(&(100 * UNIT));
    assert_eq!(result, Err(Ok(RouterError::InsufficientTrackedBalance)));

    let result = test.router.try_deposit_to_protocols(&0);
    assert_eq!(result, Err(Ok(RouterError::ZeroAmount)));
}

#[test]
fn test_only_vault_moves_funds() {
    let test = RouterTest::setup();
    test.deposit(&test.user1, 100 * UNIT);
    test.env.mock_auths(&[]);

    assert!(test.router.try_redeem_from_protocols(&(10 * UNIT)).is_err());
    assert_eq!(test.router.tracked_balance(), 100 * UNIT);
}

#[test]
fn test_emergency_withdraw_recalls_everything() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_tokenized();
    test.add_lending();
    test.set_weights(&[5_000, 5_000]);
    test.deposit(&test.user1, 1_000 * UNIT);
    test.router.set_allocation_mode(&AllocationMode::Lazy);
    test.deposit(&test.user2, 200 * UNIT);
    assert_eq!(test.router.pending_deposits(), 200 * UNIT);

    let recovered = test.router.emergency_withdraw_all();

    assert_eq!(recovered, 1_000 * UNIT);
    assert_eq!(test.router.tracked_balance(), 1_200 * UNIT);
    assert_eq!(test.router.pending_deposits(), 0);
    assert_eq!(test.router.get_deployed_value(), 0);
    assert!(test.router.get_assets().iter().all(|e| e.weight_bps == 0));

    // Nothing left to net
    test.advance_time(super::fixture::UPKEEP_INTERVAL);
    assert!(!test.router.check_upkeep());
}
