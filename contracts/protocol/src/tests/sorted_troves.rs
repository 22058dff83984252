use crate::tests::sut::{fill_protocol, init_protocol, Sut, UNIT};
use crate::*;
use soroban_sdk::testutils::Address as _;

fn fill_sorted_troves(env: &Env, sut: &Sut) -> (Address, Address, Address) {
    let (whale, risky) = fill_protocol(env, sut);
    let middle = Address::generate(env);
    sut.open_trove(&middle, 30 * UNIT, 3_000 * UNIT);

    (whale, middle, risky)
}

#[test]
fn should_order_troves_by_nominal_icr() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, middle, risky) = fill_sorted_troves(&env, &sut);

    let data = sut.protocol.sorted_troves();
    assert_eq!(data.size, 3);
    assert_eq!(data.head, Some(whale.clone()));
    assert_eq!(data.tail, Some(risky.clone()));

    let node = sut.protocol.sorted_troves_node(&middle).unwrap();
    assert_eq!(node.prev, Some(whale.clone()));
    assert_eq!(node.next, Some(risky.clone()));

    assert!(sut.protocol.nominal_icr(&whale) > sut.protocol.nominal_icr(&middle));
    assert!(sut.protocol.nominal_icr(&middle) > sut.protocol.nominal_icr(&risky));
}

#[test]
fn should_find_position_from_head_without_hints() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (whale, middle, risky) = fill_sorted_troves(&env, &sut);

    assert_eq!(
        sut.protocol.find_insert_position(&1, &None, &None),
        (Some(risky.clone()), None)
    );
    assert_eq!(
        sut.protocol
            .find_insert_position(&(i128::MAX / 2), &None, &None),
        (None, Some(whale.clone()))
    );
    assert_eq!(
        sut.protocol
            .find_insert_position(&700_000_000_000_000_000, &None, &None),
        (Some(middle), Some(risky))
    );
}

#[test]
fn should_ascend_from_next_hint() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (_, middle, risky) = fill_sorted_troves(&env, &sut);

    assert_eq!(
        sut.protocol.find_insert_position(
            &700_000_000_000_000_000,
            &None,
            &Some(risky.clone())
        ),
        (Some(middle), Some(risky))
    );
}

#[test]
fn should_use_prev_hint_when_traversal_is_short() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    let (_, _, risky) = fill_sorted_troves(&env, &sut);

    let mut config = sut.config();
    config.max_hint_traversal = 1;
    sut.protocol.set_config(&config);

    assert_eq!(
        sut.protocol
            .find_insert_position(&1, &Some(risky.clone()), &None),
        (Some(risky), None)
    );
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #304)")]
fn should_fail_when_hint_traversal_exhausted() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    fill_sorted_troves(&env, &sut);

    let mut config = sut.config();
    config.max_hint_traversal = 1;
    sut.protocol.set_config(&config);

    sut.protocol.find_insert_position(&1, &None, &None);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #300)")]
fn should_fail_when_list_full() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);
    fill_protocol(&env, &sut);

    let mut config = sut.config();
    config.sorted_troves_max_size = 2;
    sut.protocol.set_config(&config);

    sut.open_trove(&Address::generate(&env), 30 * UNIT, 3_000 * UNIT);
}
