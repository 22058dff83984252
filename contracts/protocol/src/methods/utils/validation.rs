use common::{FixedI128, PERCENTAGE_FACTOR};
use protocol_interface::types::deposit::Deposit;
use protocol_interface::types::error::Error;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::trove::Trove;
use soroban_sdk::{assert_with_error, panic_with_error, Address, Env};

use crate::storage::{has_admin, read_admin, read_deployment_time, read_front_end};
use crate::types::base_rate::bps_to_rate;

pub fn require_admin_not_exist(env: &Env) {
    if has_admin(env) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
}

pub fn require_admin(env: &Env) -> Result<(), Error> {
    let admin: Address = read_admin(env)?;
    admin.require_auth();
    Ok(())
}

pub fn require_valid_config(env: &Env, config: &ProtocolConfig) {
    assert_with_error!(
        env,
        config.mcr > PERCENTAGE_FACTOR
            && config.ccr > config.mcr
            && config.gas_compensation >= 0
            && config.min_net_debt > 0
            && config.borrowing_fee_floor <= config.max_borrowing_fee
            && config.max_borrowing_fee <= PERCENTAGE_FACTOR
            && config.redemption_fee_floor <= PERCENTAGE_FACTOR
            && config.sorted_troves_max_size > 0
            && config.max_hint_traversal > 0,
        Error::InvalidConfig
    );
}

pub fn require_nonzero_amount(env: &Env, amount: i128) {
    assert_with_error!(env, amount > 0, Error::AmountMustBeNonZero);
}

pub fn require_valid_kickback_rate(env: &Env, kickback_rate: i128) {
    assert_with_error!(
        env,
        (0..=FixedI128::DENOMINATOR).contains(&kickback_rate),
        Error::InvalidKickbackRate
    );
}

pub fn require_front_end_not_registered(env: &Env, account: &Address) {
    let registered = read_front_end(env, account)
        .map(|fe| fe.registered)
        .unwrap_or(false);
    assert_with_error!(env, !registered, Error::AlreadyRegisteredFrontEnd);
}

pub fn require_front_end_registered_or_none(env: &Env, front_end_tag: &Option<Address>) {
    if let Some(tag) = front_end_tag {
        let registered = read_front_end(env, tag)
            .map(|fe| fe.registered)
            .unwrap_or(false);
        assert_with_error!(env, registered, Error::FrontEndTagNotRegistered);
    }
}

pub fn require_user_has_deposit(env: &Env, deposit: &Option<Deposit>) {
    assert_with_error!(
        env,
        deposit.as_ref().map(|d| d.initial_value > 0).unwrap_or(false),
        Error::NoDeposit
    );
}

pub fn require_user_has_no_deposit(env: &Env, deposit: &Option<Deposit>) {
    assert_with_error!(
        env,
        deposit.as_ref().map(|d| d.initial_value == 0).unwrap_or(true),
        Error::UserHasDeposit
    );
}

pub fn require_sufficient_balance(env: &Env, balance: i128, amount: i128) {
    assert_with_error!(env, balance >= amount, Error::InsufficientBalance);
}

pub fn require_trove_active(env: &Env, trove: &Trove) {
    assert_with_error!(env, trove.is_active(), Error::TroveNotActive);
}

pub fn require_trove_not_active(env: &Env, trove: &Trove) {
    assert_with_error!(env, !trove.is_active(), Error::TroveIsActive);
}

/// Max fee must lie in `[floor, 1]`. In recovery mode no borrowing fee is charged
/// and only the upper bound applies.
pub fn require_valid_max_fee_percentage(
    env: &Env,
    max_fee_percentage: i128,
    floor_bps: u32,
    is_recovery_mode: bool,
) -> Result<(), Error> {
    let floor = if is_recovery_mode {
        0
    } else {
        bps_to_rate(floor_bps)?
    };

    assert_with_error!(
        env,
        max_fee_percentage >= floor && max_fee_percentage <= FixedI128::DENOMINATOR,
        Error::InvalidMaxFeePercentage
    );

    Ok(())
}

pub fn require_at_least_min_net_debt(env: &Env, net_debt: i128, min_net_debt: i128) {
    assert_with_error!(env, net_debt >= min_net_debt, Error::NetDebtBelowMinimum);
}

pub fn require_icr_above_mcr(env: &Env, icr: i128, mcr: i128) {
    assert_with_error!(env, icr >= mcr, Error::IcrBelowMcr);
}

pub fn require_icr_above_ccr(env: &Env, icr: i128, ccr: i128) {
    assert_with_error!(env, icr >= ccr, Error::IcrBelowCcr);
}

pub fn require_new_icr_above_old_icr(env: &Env, new_icr: i128, old_icr: i128) {
    assert_with_error!(env, new_icr >= old_icr, Error::IcrDecreasedInRecoveryMode);
}

pub fn require_new_tcr_above_ccr(env: &Env, new_tcr: i128, ccr: i128) {
    assert_with_error!(env, new_tcr >= ccr, Error::TcrBelowCcr);
}

pub fn require_tcr_above_mcr(env: &Env, tcr: i128, mcr: i128) {
    assert_with_error!(env, tcr >= mcr, Error::TcrBelowMcr);
}

pub fn require_not_in_recovery_mode(env: &Env, is_recovery_mode: bool) {
    assert_with_error!(env, !is_recovery_mode, Error::NotPermittedInRecoveryMode);
}

pub fn require_after_bootstrap_period(env: &Env, bootstrap_period: u64) -> Result<(), Error> {
    let deployment_time = read_deployment_time(env)?;
    assert_with_error!(
        env,
        env.ledger().timestamp() >= deployment_time.saturating_add(bootstrap_period),
        Error::BootstrapPeriod
    );
    Ok(())
}
