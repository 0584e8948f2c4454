use super::fixture::{STARTING_BALANCE, UNIT};
use super::RouterTest;
use crate::AllocationMode;
use rebase_vault::DEFAULT_MIN_HOLD_PERIOD;

#[test]
fn test_last_active_entry_absorbs_rounding() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_tokenized();
    test.add_lending();
    test.add_staking();
    test.set_weights(&[3_333, 3_333, 3_334]);

    test.deposit(&test.user1, 1_000_000_001);

    assert_eq!(test.tokenized.last_deposit(), 333_300_000);
    assert_eq!(test.lending.last_supply(), 333_300_000);
    assert_eq!(test.staking.last_deposit(), 333_400_001);
    assert_eq!(test.router.tracked_balance(), 0);
    assert_eq!(test.router.get_deployed_value(), 1_000_000_001);
}

#[test]
fn test_inactive_trailing_entry_gets_nothing() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_tokenized();
    test.add_lending();
    test.add_staking();
    test.set_weights(&[5_000, 5_000, 0]);

    test.deposit(&test.user1, 1_001 * UNIT);

    assert_eq!(test.tokenized.last_deposit(), 5_005_000_000);
    assert_eq!(test.lending.last_supply(), 5_005_000_000);
    assert_eq!(test.staking.deposit_calls(), 0);
}

#[test]
fn test_no_active_asset_keeps_funds_idle() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_tokenized();

    test.deposit(&test.user1, 100 * UNIT);

    assert_eq!(test.tokenized.deposit_calls(), 0);
    assert_eq!(test.router.tracked_balance(), 100 * UNIT);
    assert_eq!(test.router.get_total_value(), 100 * UNIT);
}

#[test]
fn test_lazy_mode_defers_allocation() {
    let test = RouterTest::setup();
    test.add_tokenized();
    test.set_weights(&[10_000]);
    assert_eq!(test.router.allocation_mode(), AllocationMode::Lazy);

    test.deposit(&test.user1, 100 * UNIT);

    assert_eq!(test.tokenized.deposit_calls(), 0);
    assert_eq!(test.router.pending_deposits(), 100 * UNIT);
    assert_eq!(test.router.tracked_balance(), 100 * UNIT);
}

#[test]
fn test_redemption_falls_back_to_waterfall() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_tokenized();
    test.add_lending();
    test.set_weights(&[5_000, 5_000]);

    test.deposit(&test.user1, 1_000 * UNIT);
    test.lending.set_liquidity_cap(&(100 * UNIT));
    test.advance_time(DEFAULT_MIN_HOLD_PERIOD);

    test.vault
        .withdraw(&test.user1, &(600 * UNIT), &test.user1, &test.user1);

    // 300 + 100 from the proportional pass, the missing 200 from the first entry
    assert_eq!(test.tokenized.withdraw_calls(), 2);
    assert_eq!(test.lending.withdraw_calls(), 1);
    assert_eq!(test.lending.last_withdraw(), 100 * UNIT);
    assert_eq!(
        test.asset.balance(&test.user1),
        STARTING_BALANCE - 400 * UNIT
    );
    assert_eq!(test.router.tracked_balance(), 0);
    assert_eq!(test.router.get_total_value(), 400 * UNIT);
}

#[test]
fn test_liquid_staking_value_follows_rate() {
    let test = RouterTest::setup();
    test.router.set_allocation_mode(&AllocationMode::Immediate);
    test.add_staking();
    test.set_weights(&[10_000]);

    test.deposit(&test.user1, 1_000 * UNIT);
    test.simulate_yield(&test.staking.address, 100 * UNIT);

    assert_eq!(test.router.get_deployed_value(), 1_100 * UNIT);
    assert_eq!(test.router.unrealized_yield(), 100 * UNIT);
}
