use crate::tests::sut::{fill_protocol, init_protocol, DAY, UNIT};
use crate::*;
use common::FixedI128;
use community_issuance_interface::CommunityIssuanceClient;
use soroban_sdk::testutils::{Address as _, Ledger};

#[test]
fn should_pay_whole_issuance_to_untagged_depositor() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.provide_to_sp(&whale, 1_000 * UNIT);

    env.ledger().with_mut(|li| li.timestamp = DAY);
    sut.protocol.withdraw_from_sp(&whale, &0);

    let issued = CommunityIssuanceClient::new(&env, &sut.config().community_issuance).total_issued();
    let paid = sut.reward_token.balance(&whale);

    assert!(issued > 0);
    assert!(paid <= issued);
    assert!(issued - paid <= 1);
    assert_eq!(sut.protocol.depositor_reward_gain(&whale), 0);
    assert!(sut.protocol.epoch_to_scale_to_g(&0, &0) > 0);
}

#[test]
fn should_split_reward_with_front_end() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);
    let front_end = Address::generate(&env);

    sut.protocol
        .register_front_end(&front_end, &(FixedI128::DENOMINATOR / 2));
    sut.protocol
        .provide_to_sp(&whale, &(1_000 * UNIT), &Some(front_end.clone()));

    env.ledger().with_mut(|li| li.timestamp = DAY);

    let depositor_gain = sut.protocol.depositor_reward_gain(&whale);
    let front_end_gain = sut.protocol.front_end_reward_gain(&front_end);
    assert_eq!(depositor_gain, 0);
    assert_eq!(front_end_gain, 0);

    sut.protocol.withdraw_from_sp(&whale, &0);

    let issued = CommunityIssuanceClient::new(&env, &sut.config().community_issuance).total_issued();
    let depositor_paid = sut.reward_token.balance(&whale);
    let front_end_paid = sut.reward_token.balance(&front_end);

    assert!(depositor_paid > 0);
    assert_eq!(depositor_paid, front_end_paid);
    assert!(depositor_paid + front_end_paid <= issued);
    assert!(issued - depositor_paid - front_end_paid <= 1);
    assert_eq!(sut.protocol.compounded_front_end_stake(&front_end), 1_000 * UNIT);
}

#[test]
fn should_pay_front_end_its_share_of_kickback() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);
    let front_end = Address::generate(&env);

    sut.protocol
        .register_front_end(&front_end, &(FixedI128::DENOMINATOR / 4));
    sut.protocol
        .provide_to_sp(&whale, &(1_000 * UNIT), &Some(front_end.clone()));

    env.ledger().with_mut(|li| li.timestamp = DAY);
    sut.protocol.withdraw_from_sp(&whale, &0);

    let issued = CommunityIssuanceClient::new(&env, &sut.config().community_issuance).total_issued();
    let depositor_paid = sut.reward_token.balance(&whale);
    let front_end_paid = sut.reward_token.balance(&front_end);

    // the only stake in the pool earns the whole issuance
    assert_eq!(depositor_paid, issued / 4);
    assert_eq!(front_end_paid, issued * 3 / 4);
    assert!(issued - depositor_paid - front_end_paid <= 1);
    assert!(front_end_paid > depositor_paid);
}

#[test]
fn should_not_assign_reward_issued_to_empty_pool() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    env.ledger().with_mut(|li| li.timestamp = DAY);
    sut.provide_to_sp(&whale, 1_000 * UNIT);

    assert_eq!(sut.protocol.epoch_to_scale_to_g(&0, &0), 0);
    assert_eq!(sut.protocol.depositor_reward_gain(&whale), 0);
}

#[test]
fn should_split_losses_and_gains_between_depositors() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, risky) = fill_protocol(&env, &sut);
    let other = Address::generate(&env);

    sut.stable_token
        .transfer(&whale, &other, &(1_500 * UNIT));
    sut.provide_to_sp(&whale, 1_500 * UNIT);
    sut.provide_to_sp(&other, 1_500 * UNIT);

    sut.set_price(180);
    sut.protocol.liquidate(&Address::generate(&env), &risky);

    let whale_deposit = sut.protocol.compounded_deposit(&whale);
    let other_deposit = sut.protocol.compounded_deposit(&other);
    assert_eq!(whale_deposit, other_deposit);
    assert!((whale_deposit - 4_955_000_000).abs() <= 1);

    let whale_gain = sut.protocol.depositor_coll_gain(&whale);
    assert_eq!(whale_gain, sut.protocol.depositor_coll_gain(&other));
    assert_eq!(whale_gain, 59_700_000);

    let p = sut.protocol.stability_pool_state().p;
    assert!(p < FixedI128::DENOMINATOR);
}
