use crate::tests::sut::{fill_protocol, init_protocol, UNIT};
use crate::*;
use soroban_sdk::testutils::Address as _;

#[test]
fn should_withdraw_part_of_deposit() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.provide_to_sp(&whale, 1_000 * UNIT);
    sut.protocol.withdraw_from_sp(&whale, &(400 * UNIT));

    assert_eq!(sut.protocol.deposit(&whale).unwrap().initial_value, 600 * UNIT);
    assert_eq!(sut.protocol.stability_pool_state().total_deposits, 600 * UNIT);
    assert_eq!(sut.stable_balance(&whale), 4_400 * UNIT);
}

#[test]
fn should_clamp_withdrawal_to_compounded_deposit() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.provide_to_sp(&whale, 1_000 * UNIT);
    sut.protocol.withdraw_from_sp(&whale, &(1_000_000 * UNIT));

    assert_eq!(sut.protocol.deposit(&whale), None);
    assert_eq!(sut.protocol.deposit_snapshots(&whale), None);
    assert_eq!(sut.protocol.compounded_deposit(&whale), 0);
    assert_eq!(sut.protocol.stability_pool_state().total_deposits, 0);
    assert_eq!(sut.stable_balance(&whale), 5_000 * UNIT);
}

#[test]
fn should_clamp_withdrawal_to_deposit_reduced_by_liquidation() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, risky) = fill_protocol(&env, &sut);

    sut.provide_to_sp(&whale, 3_000 * UNIT);
    sut.set_price(180);
    sut.protocol.liquidate(&Address::generate(&env), &risky);

    let compounded = sut.protocol.compounded_deposit(&whale);
    assert_eq!(compounded, 9_909_999_999);

    sut.protocol.withdraw_from_sp(&whale, &(1_000_000 * UNIT));

    assert_eq!(sut.protocol.deposit(&whale), None);
    assert_eq!(sut.stable_balance(&whale), 2_000 * UNIT + compounded);
    assert_eq!(sut.coll_balance(&whale), 119_400_000);

    // rounding dust stays in the pool
    let sp = sut.protocol.stability_pool_state();
    assert_eq!(sp.total_deposits, 1);
    assert_eq!(sp.coll, 0);
}

#[test]
fn should_claim_gains_with_zero_amount_while_troves_undercollateralized() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.provide_to_sp(&whale, 1_000 * UNIT);
    sut.set_price(180);

    sut.protocol.withdraw_from_sp(&whale, &0);

    assert_eq!(sut.protocol.deposit(&whale).unwrap().initial_value, 1_000 * UNIT);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #202)")]
fn should_fail_without_deposit() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    fill_protocol(&env, &sut);

    sut.protocol
        .withdraw_from_sp(&Address::generate(&env), &UNIT);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #100)")]
fn should_fail_when_amount_negative() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.provide_to_sp(&whale, 1_000 * UNIT);
    sut.protocol.withdraw_from_sp(&whale, &-1);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #204)")]
fn should_fail_while_troves_undercollateralized() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.provide_to_sp(&whale, 1_000 * UNIT);
    sut.set_price(180);

    sut.protocol.withdraw_from_sp(&whale, &(100 * UNIT));
}
