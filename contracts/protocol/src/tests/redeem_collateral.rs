use crate::tests::sut::{fill_protocol, init_protocol, DAY, GAS_COMPENSATION, MAX_FEE, UNIT};
use crate::*;
use protocol_interface::types::trove::TroveStatus;
use soroban_sdk::testutils::{Address as _, Ledger};

#[test]
fn should_close_fully_redeemed_trove() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, risky) = fill_protocol(&env, &sut);

    sut.protocol.redeem_collateral(
        &whale,
        &(1_809 * UNIT),
        &None,
        &None,
        &None,
        &0,
        &MAX_FEE,
    );

    let trove = sut.protocol.trove(&risky);
    assert_eq!(trove.status, TroveStatus::ClosedByRedemption);
    assert_eq!(trove.debt, 0);
    assert_eq!(sut.protocol.sorted_troves_node(&risky), None);
    assert_eq!(sut.protocol.trove_owners_count(), 1);

    // 1809 at a price of 200 draws 9.045 collateral out of 12
    assert_eq!(sut.protocol.coll_surplus(&risky), 29_550_000);

    // base rate grows by half of the redeemed share of 7234 supply
    assert_eq!(sut.protocol.fee_state().base_rate, 125_034_559_026_817_804);
    assert_eq!(sut.coll_balance(&sut.treasury), 11_309_375);
    assert_eq!(sut.coll_balance(&whale), 79_140_625);
    assert_eq!(sut.stable_balance(&whale), 3_191 * UNIT);

    let ledger = sut.protocol.pool_ledger();
    assert_eq!(ledger.active_coll, 100 * UNIT);
    assert_eq!(ledger.active_debt, 5_225 * UNIT);
    assert_eq!(ledger.surplus_coll, 29_550_000);
    assert_eq!(ledger.gas_pool, GAS_COMPENSATION);
    assert_eq!(sut.stable_balance(&sut.protocol.address), GAS_COMPENSATION);

    sut.protocol.claim_collateral(&risky);
    assert_eq!(sut.coll_balance(&risky), 29_550_000);
    assert_eq!(sut.protocol.pool_ledger().surplus_coll, 0);
}

#[test]
fn should_redeem_partially() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let whale = Address::generate(&env);
    let borrower = Address::generate(&env);

    sut.open_trove(&whale, 100 * UNIT, 5_000 * UNIT);
    sut.open_trove(&borrower, 50 * UNIT, 4_000 * UNIT);

    sut.protocol.redeem_collateral(
        &whale,
        &(1_000 * UNIT),
        &None,
        &None,
        &None,
        &0,
        &MAX_FEE,
    );

    let trove = sut.protocol.trove(&borrower);
    assert_eq!(trove.status, TroveStatus::Active);
    assert_eq!(trove.debt, 3_220 * UNIT);
    assert_eq!(trove.coll, 45 * UNIT);
    assert_eq!(sut.protocol.sorted_troves().tail, Some(borrower));

    let fee = sut.coll_balance(&sut.treasury);
    assert!(fee > 0);
    assert_eq!(sut.coll_balance(&whale) + fee, 5 * UNIT);
    assert_eq!(sut.stable_balance(&whale), 4_000 * UNIT);
    assert!(sut.protocol.fee_state().base_rate > 0);
}

#[test]
fn should_skip_troves_below_mcr() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, risky) = fill_protocol(&env, &sut);
    let middle = Address::generate(&env);
    sut.open_trove(&middle, 30 * UNIT, 3_000 * UNIT);

    sut.set_price(180);

    sut.protocol.redeem_collateral(
        &whale,
        &(1_000 * UNIT),
        &Some(middle.clone()),
        &None,
        &None,
        &0,
        &MAX_FEE,
    );

    assert_eq!(sut.protocol.trove(&risky).debt, 2_009 * UNIT);

    let trove = sut.protocol.trove(&middle);
    assert_eq!(trove.debt, 2_215 * UNIT);
    assert_eq!(trove.coll, 30 * UNIT - 55_555_555);
}

#[test]
fn should_decay_base_rate_over_time() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.protocol.redeem_collateral(
        &whale,
        &(1_809 * UNIT),
        &None,
        &None,
        &None,
        &0,
        &MAX_FEE,
    );

    let max_borrowing_rate = 50_000_000_000_000_000;
    let rate_after_redemption = sut.protocol.redemption_rate();
    assert_eq!(rate_after_redemption, 125_034_559_026_817_804);
    assert_eq!(sut.protocol.borrowing_rate(), max_borrowing_rate);

    // two half-lives of twelve hours
    env.ledger().with_mut(|li| li.timestamp = DAY);

    let decayed = sut.protocol.redemption_rate();
    assert!(decayed < rate_after_redemption / 4 + 1_000_000_000_000);
    assert!(decayed > rate_after_redemption / 4 - 1_000_000_000_000_000);
    assert!(sut.protocol.borrowing_rate() < max_borrowing_rate);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #222)")]
fn should_fail_when_partial_redemption_leaves_debt_below_minimum() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.protocol.redeem_collateral(
        &whale,
        &(1_000 * UNIT),
        &None,
        &None,
        &None,
        &0,
        &MAX_FEE,
    );
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #221)")]
fn should_fail_during_bootstrap_period() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    let mut config = sut.config();
    config.redemption_bootstrap_period = 14 * DAY;
    sut.protocol.set_config(&config);

    sut.protocol.redeem_collateral(
        &whale,
        &(1_809 * UNIT),
        &None,
        &None,
        &None,
        &0,
        &MAX_FEE,
    );
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #214)")]
fn should_fail_when_tcr_below_mcr() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.set_price(60);

    sut.protocol.redeem_collateral(
        &whale,
        &(1_809 * UNIT),
        &None,
        &None,
        &None,
        &0,
        &MAX_FEE,
    );
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #220)")]
fn should_fail_when_balance_insufficient() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (_, risky) = fill_protocol(&env, &sut);

    sut.protocol.redeem_collateral(
        &risky,
        &(5_000 * UNIT),
        &None,
        &None,
        &None,
        &0,
        &MAX_FEE,
    );
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #223)")]
fn should_fail_when_fee_exceeds_maximum() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.protocol.redeem_collateral(
        &whale,
        &(1_809 * UNIT),
        &None,
        &None,
        &None,
        &0,
        &10_000_000_000_000_000,
    );
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #225)")]
fn should_fail_claiming_without_surplus() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.protocol.claim_collateral(&whale);
}
