use crate::tests::sut::{init_protocol, GAS_COMPENSATION};
use crate::*;
use common::FixedI128;
use protocol_interface::StablecoinProtocolClient;
use soroban_sdk::testutils::{Address as _, AuthorizedFunction};
use soroban_sdk::{IntoVal, Symbol};

#[test]
fn should_initialize_state() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);

    let config = sut.config();
    assert_eq!(config.mcr, 11_000);
    assert_eq!(config.ccr, 15_000);
    assert_eq!(config.gas_compensation, GAS_COMPENSATION);

    let sp = sut.protocol.stability_pool_state();
    assert_eq!(sp.p, FixedI128::DENOMINATOR);
    assert_eq!(sp.current_epoch, 0);
    assert_eq!(sp.current_scale, 0);
    assert_eq!(sp.total_deposits, 0);

    assert_eq!(sut.protocol.pool_ledger(), PoolLedger::default());
    assert_eq!(sut.protocol.redistribution_state(), RedistributionState::default());
    assert_eq!(sut.protocol.fee_state().base_rate, 0);
    assert_eq!(sut.protocol.sorted_troves(), SortedTrovesData::default());
    assert_eq!(sut.protocol.trove_owners_count(), 0);
}

#[test]
fn should_report_uninitialized_contract() {
    let env = Env::default();
    env.mock_all_auths();

    let id = env.register_contract(None, StablecoinProtocol);
    let protocol = StablecoinProtocolClient::new(&env, &id);

    assert_eq!(protocol.try_config(), Err(Ok(Error::Uninitialized)));
    assert_eq!(protocol.try_tcr(), Err(Ok(Error::Uninitialized)));
    assert_eq!(protocol.trove_owners_count(), 0);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #0)")]
fn should_fail_when_already_initialized() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);

    sut.protocol
        .initialize(&Address::generate(&env), &sut.config());
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #2)")]
fn should_fail_when_ccr_not_above_mcr() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);

    let mut config = sut.config();
    config.ccr = config.mcr;

    sut.protocol.set_config(&config);
}

#[test]
#[should_panic(expected = "HostError: Error(Contract, #2)")]
fn should_fail_when_borrowing_fee_floor_above_max() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);

    let mut config = sut.config();
    config.borrowing_fee_floor = config.max_borrowing_fee + 1;

    sut.protocol.set_config(&config);
}

#[test]
fn should_require_admin_to_set_config() {
    let env = Env::default();
    env.mock_all_auths();

    let sut = init_protocol(&env);

    let mut config = sut.config();
    config.max_hint_traversal = 10;

    sut.protocol.set_config(&config);

    assert_eq!(
        env.auths().pop().map(|f| (f.0, f.1.function)).unwrap(),
        (
            sut.admin.clone(),
            AuthorizedFunction::Contract((
                sut.protocol.address.clone(),
                Symbol::new(&env, "set_config"),
                (config.clone(),).into_val(&env)
            ))
        ),
    );
    assert_eq!(sut.config().max_hint_traversal, 10);
}
