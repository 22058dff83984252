use crate::tests::sut::{fill_protocol, init_protocol, GAS_COMPENSATION, UNIT};
use crate::*;
use protocol_interface::types::trove::TroveStatus;
use soroban_sdk::testutils::Address as _;

#[test]
fn should_close_trove() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, risky) = fill_protocol(&env, &sut);

    // borrowed 1800 but owes 1809 besides the gas reserve
    sut.stable_token.transfer(&whale, &risky, &(9 * UNIT));

    sut.protocol.close_trove(&risky);

    let trove = sut.protocol.trove(&risky);
    assert_eq!(trove.status, TroveStatus::ClosedByOwner);
    assert_eq!(trove.coll, 0);
    assert_eq!(trove.debt, 0);
    assert_eq!(trove.stake, 0);

    assert_eq!(sut.stable_balance(&risky), 0);
    assert_eq!(sut.coll_balance(&risky), 12 * UNIT);

    let ledger = sut.protocol.pool_ledger();
    assert_eq!(ledger.active_coll, 100 * UNIT);
    assert_eq!(ledger.active_debt, 5_225 * UNIT);
    assert_eq!(ledger.gas_pool, GAS_COMPENSATION);
    assert_eq!(sut.stable_balance(&sut.protocol.address), GAS_COMPENSATION);

    assert_eq!(sut.protocol.trove_owners_count(), 1);
    assert_eq!(sut.protocol.trove_from_owners_array(&0), Some(whale.clone()));
    assert_eq!(sut.protocol.trove(&whale).array_index, 0);
    assert_eq!(sut.protocol.sorted_troves_node(&risky), None);
    assert_eq!(sut.protocol.sorted_troves().size, 1);
    assert_eq!(sut.protocol.redistribution_state().total_stakes, 100 * UNIT);
}

#[test]
fn should_move_last_owner_into_freed_slot() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, risky) = fill_protocol(&env, &sut);
    let middle = Address::generate(&env);
    sut.open_trove(&middle, 30 * UNIT, 3_000 * UNIT);

    sut.stable_token
        .transfer(&sut.treasury, &whale, &(25 * UNIT));
    sut.protocol.close_trove(&whale);

    assert_eq!(sut.protocol.trove_owners_count(), 2);
    assert_eq!(sut.protocol.trove_from_owners_array(&0), Some(middle.clone()));
    assert_eq!(sut.protocol.trove_from_owners_array(&1), Some(risky.clone()));
    assert_eq!(sut.protocol.trove_from_owners_array(&2), None);
    assert_eq!(sut.protocol.trove(&middle).array_index, 0);
    assert_eq!(sut.protocol.sorted_troves().head, Some(middle));
}

#[test]
fn should_reopen_closed_trove() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, risky) = fill_protocol(&env, &sut);

    sut.stable_token.transfer(&whale, &risky, &(9 * UNIT));
    sut.protocol.close_trove(&risky);
    sut.open_trove(&risky, 12 * UNIT, 1_800 * UNIT);

    assert_eq!(sut.protocol.trove(&risky).status, TroveStatus::Active);
    assert_eq!(sut.protocol.trove(&risky).debt, 2_009 * UNIT);
    assert_eq!(sut.protocol.trove_owners_count(), 2);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #209)")]
fn should_fail_when_only_one_trove() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let borrower = Address::generate(&env);
    sut.open_trove(&borrower, 100 * UNIT, 5_000 * UNIT);
    sut.stable_token
        .transfer(&sut.treasury, &borrower, &(25 * UNIT));

    sut.protocol.close_trove(&borrower);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #206)")]
fn should_fail_when_trove_not_active() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    fill_protocol(&env, &sut);

    sut.protocol.close_trove(&Address::generate(&env));
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #220)")]
fn should_fail_when_balance_insufficient() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (_, risky) = fill_protocol(&env, &sut);

    sut.protocol.close_trove(&risky);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #216)")]
fn should_fail_in_recovery_mode() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, _) = fill_protocol(&env, &sut);

    sut.set_price(95);

    sut.protocol.close_trove(&whale);
}
