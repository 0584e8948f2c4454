use super::fixture::{UNIT, STARTING_BALANCE};
use super::VaultTest;
use crate::{VaultError, DEFAULT_MIN_HOLD_PERIOD};

#[test]
fn test_round_trip_returns_deposit_minus_fee() {
    let test = VaultTest::setup();
    test.vault.set_redemption_fee(&10);

    let shares = test.deposit(&test.user1, 10_000 * UNIT);
    test.advance_time(DEFAULT_MIN_HOLD_PERIOD);

    let net = test
        .vault
        .redeem(&test.user1, &shares, &test.user1, &test.user1);

    let fee = 10_000 * UNIT * 10 / 10_000;
    assert_eq!(net, 10_000 * UNIT - fee);
    assert_eq!(test.asset.balance(&test.user1), STARTING_BALANCE - fee);
    assert_eq!(test.asset.balance(&test.treasury), fee);
    assert_eq!(test.vault.total_supply(), 0);
    assert_eq!(test.vault.total_deposited_assets(), 0);
}

#[test]
fn test_withdraw_pulls_from_protocol_after_upkeep() {
    let test = VaultTest::setup();

    test.deposit(&test.user1, 1_000 * UNIT);
    test.run_upkeep();
    assert_eq!(test.router.tracked_balance(), 0);

    let burned = test
        .vault
        .withdraw(&test.user1, &(400 * UNIT), &test.user1, &test.user1);

    assert_eq!(burned, 400 * UNIT);
    assert_eq!(test.pool.last_withdraw(), 400 * UNIT);
    assert_eq!(test.share_balance(&test.user1), 600 * UNIT);
    assert_eq!(test.vault.total_deposited_assets(), 600 * UNIT);
    assert_eq!(
        test.asset.balance(&test.user1),
        STARTING_BALANCE - 600 * UNIT
    );
}

#[test]
fn test_withdraw_serves_idle_balance_first() {
    let test = VaultTest::setup();

    test.deposit(&test.user1, 1_000 * UNIT);
    test.advance_time(DEFAULT_MIN_HOLD_PERIOD);

    test.vault
        .withdraw(&test.user1, &(300 * UNIT), &test.user1, &test.user1);

    assert_eq!(test.pool.withdraw_calls(), 0);
    assert_eq!(test.router.tracked_balance(), 700 * UNIT);
    assert_eq!(test.router.pending_deposits(), 700 * UNIT);
}

#[test]
fn test_hold_period_blocks_early_exit() {
    let test = VaultTest::setup();

    let shares = test.deposit(&test.user1, 100 * UNIT);
    test.advance_time(DEFAULT_MIN_HOLD_PERIOD - 1);

    let result = test
        .vault
        .try_withdraw(&test.user1, &(10 * UNIT), &test.user1, &test.user1);
    assert_eq!(result, Err(Ok(VaultError::HoldPeriodActive)));
    let result = test
        .vault
        .try_redeem(&test.user1, &shares, &test.user1, &test.user1);
    assert_eq!(result, Err(Ok(VaultError::HoldPeriodActive)));

    test.advance_time(1);
    test.vault
        .withdraw(&test.user1, &(10 * UNIT), &test.user1, &test.user1);
    assert_eq!(test.share_balance(&test.user1), 90 * UNIT);
}

#[test]
fn test_incoming_transfer_does_not_reset_hold() {
    let test = VaultTest::setup();

    test.advance_time(1_000);
    test.deposit(&test.user2, 50 * UNIT);
    assert_eq!(test.vault.last_deposit_time(&test.user2), 1_000);
    test.advance_time(DEFAULT_MIN_HOLD_PERIOD);

    // user1 deposits now and immediately sends shares to user2
    test.deposit(&test.user1, 50 * UNIT);
    test.vault.transfer(&test.user1, &test.user2, &(20 * UNIT));

    assert_eq!(test.vault.last_deposit_time(&test.user1), 1_000 + DEFAULT_MIN_HOLD_PERIOD);
    assert_eq!(test.vault.last_deposit_time(&test.user2), 1_000);
    let net = test
        .vault
        .redeem(&test.user2, &(70 * UNIT), &test.user2, &test.user2);
    assert_eq!(net, 70 * UNIT);
}

#[test]
fn test_withdraw_more_than_total_assets_fails() {
    let test = VaultTest::setup();

    test.deposit(&test.user1, 100 * UNIT);
    test.advance_time(DEFAULT_MIN_HOLD_PERIOD);

    let result = test
        .vault
        .try_withdraw(&test.user1, &(100 * UNIT + 1), &test.user1, &test.user1);
    assert_eq!(result, Err(Ok(VaultError::ExceedsTotalAssets)));
}

#[test]
fn test_withdraw_more_than_balance_fails() {
    let test = VaultTest::setup();

    test.deposit(&test.user1, 100 * UNIT);
    test.deposit(&test.user2, 100 * UNIT);
    test.advance_time(DEFAULT_MIN_HOLD_PERIOD);

    let result = test
        .vault
        .try_withdraw(&test.user1, &(150 * UNIT), &test.user1, &test.user1);
    assert_eq!(result, Err(Ok(VaultError::InsufficientBalance)));
}

#[test]
fn test_withdraw_on_behalf_spends_allowance() {
    let test = VaultTest::setup();

    test.deposit(&test.user1, 100 * UNIT);
    test.advance_time(DEFAULT_MIN_HOLD_PERIOD);

    let result = test
        .vault
        .try_withdraw(&test.user2, &(40 * UNIT), &test.user2, &test.user1);
    assert_eq!(result, Err(Ok(VaultError::InsufficientAllowance)));

    test.vault.approve(&test.user1, &test.user2, &(50 * UNIT), &1_000);
    test.vault
        .withdraw(&test.user2, &(40 * UNIT), &test.user2, &test.user1);

    assert_eq!(test.vault.allowance(&test.user1, &test.user2), 10 * UNIT);
    assert_eq!(test.share_balance(&test.user1), 60 * UNIT);
    assert_eq!(
        test.asset.balance(&test.user2),
        STARTING_BALANCE + 40 * UNIT
    );
}

#[test]
fn test_withdraw_fails_when_liquidity_is_short() {
    let test = VaultTest::setup();

    test.deposit(&test.user1, 100 * UNIT);
    test.run_upkeep();
    test.pool.set_liquidity_cap(&(10 * UNIT));

    let result = test
        .vault
        .try_withdraw(&test.user1, &(50 * UNIT), &test.user1, &test.user1);
    assert_eq!(result, Err(Ok(VaultError::InsufficientLiquidity)));
    assert_eq!(test.share_balance(&test.user1), 100 * UNIT);
}

#[test]
fn test_redeem_pays_realized_amount_on_shortfall() {
    let test = VaultTest::setup();
    test.vault.set_redemption_fee(&100);

    test.deposit(&test.user1, 100 * UNIT);
    test.run_upkeep();
    test.pool.set_liquidity_cap(&(10 * UNIT));

    let net = test
        .vault
        .redeem(&test.user1, &(50 * UNIT), &test.user1, &test.user1);

    // Proportional pass and waterfall pass each free one capped withdrawal
    let realized = 20 * UNIT;
    let fee = realized / 100;
    assert_eq!(net, realized - fee);
    assert_eq!(test.asset.balance(&test.treasury), fee);
    assert_eq!(test.share_balance(&test.user1), 50 * UNIT);
}

#[test]
fn test_fee_is_capped() {
    let test = VaultTest::setup();

    assert_eq!(
        test.vault.try_set_redemption_fee(&501),
        Err(Ok(VaultError::FeeTooHigh))
    );
    test.vault.set_redemption_fee(&500);
    assert_eq!(test.vault.redemption_fee_bps(), 500);
}
