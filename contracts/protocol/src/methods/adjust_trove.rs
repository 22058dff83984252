use common::{compute_cr, compute_nominal_cr};
use protocol_interface::types::error::Error;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::trove::TroveOperation;
use soroban_sdk::{assert_with_error, Address, Env};

use crate::event;
use crate::storage::{read_config, write_trove};
use crate::types::base_rate::BaseRate;
use crate::types::price_provider::PriceProvider;
use crate::types::sorted_troves::SortedTroves;
use crate::types::trove_manager::{apply_change, TroveManager};
use crate::types::vault::Vault;

use super::utils::validation::{
    require_at_least_min_net_debt, require_icr_above_ccr, require_icr_above_mcr,
    require_new_icr_above_old_icr, require_new_tcr_above_ccr, require_sufficient_balance,
    require_trove_active, require_valid_max_fee_percentage,
};

#[derive(Debug, Clone)]
pub struct TroveAdjustment {
    pub max_fee_percentage: i128,
    pub coll_deposit: i128,
    pub coll_withdrawal: i128,
    pub debt_change: i128,
    pub is_debt_increase: bool,
}

/// Where a collateral top-up comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollSource {
    Borrower,
    /// Collateral gain already held by the contract on behalf of a depositor
    StabilityPool,
}

pub fn adjust_trove(
    env: &Env,
    borrower: &Address,
    adjustment: &TroveAdjustment,
    upper_hint: Option<Address>,
    lower_hint: Option<Address>,
) -> Result<(), Error> {
    borrower.require_auth();

    let config = read_config(env)?;

    do_adjust_trove(
        env,
        &config,
        borrower,
        adjustment,
        upper_hint,
        lower_hint,
        CollSource::Borrower,
    )
}

pub fn do_adjust_trove(
    env: &Env,
    config: &ProtocolConfig,
    borrower: &Address,
    adjustment: &TroveAdjustment,
    upper_hint: Option<Address>,
    lower_hint: Option<Address>,
    coll_source: CollSource,
) -> Result<(), Error> {
    assert_with_error!(
        env,
        adjustment.coll_deposit >= 0 && adjustment.coll_withdrawal >= 0 && adjustment.debt_change >= 0,
        Error::AmountMustBeNonZero
    );
    assert_with_error!(
        env,
        adjustment.coll_deposit == 0 || adjustment.coll_withdrawal == 0,
        Error::SingularCollChange
    );
    assert_with_error!(
        env,
        adjustment.coll_deposit != 0 || adjustment.coll_withdrawal != 0 || adjustment.debt_change != 0,
        Error::ZeroAdjustment
    );

    let price = PriceProvider::new(env, config).price()?;
    let mut trove_manager = TroveManager::new(env, config)?;
    let mut base_rate = BaseRate::new(env, config)?;
    let mut sorted_troves = SortedTroves::new(env, config);
    let vault = Vault::new(env, config);

    let is_recovery_mode = trove_manager.check_recovery_mode(price)?;

    if adjustment.is_debt_increase {
        require_valid_max_fee_percentage(
            env,
            adjustment.max_fee_percentage,
            config.borrowing_fee_floor,
            is_recovery_mode,
        )?;
        assert_with_error!(env, adjustment.debt_change > 0, Error::ZeroDebtChange);
    }

    require_trove_active(env, &trove_manager.trove(borrower));

    trove_manager.apply_pending_rewards(borrower)?;
    let mut trove = trove_manager.trove(borrower);

    let (coll_change, is_coll_increase) = if adjustment.coll_deposit > 0 {
        (adjustment.coll_deposit, true)
    } else {
        (adjustment.coll_withdrawal, false)
    };

    let borrowing_fee = if adjustment.is_debt_increase && !is_recovery_mode {
        base_rate.trigger_borrowing_fee(adjustment.debt_change, adjustment.max_fee_percentage)?
    } else {
        0
    };
    let net_debt_change = adjustment
        .debt_change
        .checked_add(borrowing_fee)
        .ok_or(Error::MathOverflowError)?;

    assert_with_error!(
        env,
        adjustment.coll_withdrawal <= trove.coll,
        Error::InsufficientCollateral
    );

    let new_coll = apply_change(trove.coll, coll_change, is_coll_increase)?;
    let new_debt = apply_change(trove.debt, net_debt_change, adjustment.is_debt_increase)?;

    let old_icr = compute_cr(trove.coll, trove.debt, price).ok_or(Error::MathOverflowError)?;
    let new_icr = compute_cr(new_coll, new_debt, price).ok_or(Error::MathOverflowError)?;

    if is_recovery_mode {
        assert_with_error!(
            env,
            adjustment.coll_withdrawal == 0,
            Error::CollWithdrawalInRecoveryMode
        );
        if adjustment.is_debt_increase {
            require_icr_above_ccr(env, new_icr, trove_manager.ccr()?);
            require_new_icr_above_old_icr(env, new_icr, old_icr);
        }
    } else {
        require_icr_above_mcr(env, new_icr, trove_manager.mcr()?);
        let new_tcr = trove_manager.new_tcr_from_trove_change(
            coll_change,
            is_coll_increase,
            net_debt_change,
            adjustment.is_debt_increase,
            price,
        )?;
        require_new_tcr_above_ccr(env, new_tcr, trove_manager.ccr()?);
    }

    if !adjustment.is_debt_increase && adjustment.debt_change > 0 {
        let repayable = trove
            .debt
            .checked_sub(config.gas_compensation)
            .ok_or(Error::MathOverflowError)?;
        assert_with_error!(
            env,
            adjustment.debt_change <= repayable,
            Error::RepaymentExceedsDebt
        );
        require_at_least_min_net_debt(
            env,
            repayable - adjustment.debt_change,
            config.min_net_debt,
        );
        require_sufficient_balance(
            env,
            vault.stable_balance(borrower),
            adjustment.debt_change,
        );
    }

    trove.coll = new_coll;
    trove.debt = new_debt;
    trove_manager.update_stake_and_total_stakes(&mut trove)?;
    write_trove(env, borrower, &trove);

    let new_nicr = compute_nominal_cr(new_coll, new_debt).ok_or(Error::MathOverflowError)?;
    sorted_troves.re_insert(borrower, new_nicr, upper_hint, lower_hint, &|id: &Address| {
        trove_manager.nominal_icr(id)
    })?;

    event::trove_updated(
        env,
        borrower,
        trove.debt,
        trove.coll,
        trove.stake,
        TroveOperation::AdjustTrove,
    );

    if adjustment.is_debt_increase {
        trove_manager.ledger.increase_active(0, net_debt_change)?;
        vault.mint_stable(borrower, adjustment.debt_change);
        vault.mint_stable(&config.treasury, borrowing_fee);
        if borrowing_fee > 0 {
            event::borrowing_fee_paid(env, borrower, borrowing_fee);
        }
    } else {
        trove_manager
            .ledger
            .decrease_active(0, adjustment.debt_change)?;
        vault.burn_stable(borrower, adjustment.debt_change);
    }

    if is_coll_increase {
        if coll_source == CollSource::Borrower {
            vault.receive_coll(borrower, coll_change);
        }
        trove_manager.ledger.increase_active(coll_change, 0)?;
    } else {
        trove_manager.ledger.decrease_active(coll_change, 0)?;
        vault.send_coll(borrower, coll_change);
    }

    trove_manager.write();
    base_rate.write();

    Ok(())
}
