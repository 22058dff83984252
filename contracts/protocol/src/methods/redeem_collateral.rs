use common::{coll_for_value, compute_nominal_cr};
use protocol_interface::types::error::Error;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::trove::{TroveOperation, TroveStatus};
use soroban_sdk::{assert_with_error, Address, Env};

use crate::event;
use crate::storage::{read_config, write_trove};
use crate::types::base_rate::{require_user_accepts_fee, BaseRate};
use crate::types::price_provider::PriceProvider;
use crate::types::sorted_troves::SortedTroves;
use crate::types::trove_manager::TroveManager;
use crate::types::vault::Vault;

use super::utils::validation::{
    require_after_bootstrap_period, require_nonzero_amount, require_sufficient_balance,
    require_tcr_above_mcr, require_valid_max_fee_percentage,
};

/// Amounts drawn from a single trove
struct SingleRedemption {
    stable_lot: i128,
    coll_lot: i128,
    /// Collateral left in a fully redeemed trove, claimable by its owner
    coll_surplus: i128,
    /// Gas reserve burned when the trove is closed
    gas_compensation: i128,
}

#[allow(clippy::too_many_arguments)]
pub fn redeem_collateral(
    env: &Env,
    redeemer: &Address,
    amount: i128,
    first_hint: Option<Address>,
    upper_hint: Option<Address>,
    lower_hint: Option<Address>,
    max_iterations: u32,
    max_fee_percentage: i128,
) -> Result<(), Error> {
    redeemer.require_auth();

    let config = read_config(env)?;

    require_valid_max_fee_percentage(env, max_fee_percentage, config.redemption_fee_floor, false)?;
    require_after_bootstrap_period(env, config.redemption_bootstrap_period)?;

    let price = PriceProvider::new(env, &config).price()?;
    let mut trove_manager = TroveManager::new(env, &config)?;
    let mut sorted_troves = SortedTroves::new(env, &config);
    let mut base_rate = BaseRate::new(env, &config)?;
    let vault = Vault::new(env, &config);

    let mcr = trove_manager.mcr()?;

    require_tcr_above_mcr(env, trove_manager.tcr(price)?, mcr);
    require_nonzero_amount(env, amount);
    require_sufficient_balance(env, vault.stable_balance(redeemer), amount);

    let total_stable_supply_at_start = trove_manager.ledger.entire_system_debt()?;

    let mut current = if is_valid_first_redemption_hint(
        &trove_manager,
        &sorted_troves,
        &first_hint,
        price,
        mcr,
    )? {
        first_hint
    } else {
        let mut candidate = sorted_troves.last();
        while let Some(id) = candidate.clone() {
            if trove_manager.current_icr(&id, price)? >= mcr {
                break;
            }
            candidate = sorted_troves.prev(&id);
        }
        candidate
    };

    let mut iterations_left = if max_iterations == 0 {
        u32::MAX
    } else {
        max_iterations
    };

    let mut remaining = amount;
    let mut total_stable_redeemed = 0i128;
    let mut total_coll_drawn = 0i128;
    let mut total_coll_surplus = 0i128;
    let mut total_gas_compensation = 0i128;

    while let Some(borrower) = current.clone() {
        if remaining == 0 || iterations_left == 0 {
            break;
        }
        iterations_left -= 1;

        let next = sorted_troves.prev(&borrower);

        trove_manager.apply_pending_rewards(&borrower)?;

        let single = match redeem_from_trove(
            &config,
            &mut trove_manager,
            &mut sorted_troves,
            &borrower,
            remaining,
            price,
            upper_hint.clone(),
            lower_hint.clone(),
        )? {
            Some(single) => single,
            None => break,
        };

        total_stable_redeemed += single.stable_lot;
        total_coll_drawn += single.coll_lot;
        total_coll_surplus += single.coll_surplus;
        total_gas_compensation += single.gas_compensation;
        remaining -= single.stable_lot;

        current = next;
    }

    assert_with_error!(env, total_coll_drawn > 0, Error::UnableToRedeem);

    base_rate.update_base_rate_from_redemption(
        total_coll_drawn,
        price,
        total_stable_supply_at_start,
    )?;

    let coll_fee = base_rate.redemption_fee(total_coll_drawn)?;
    require_user_accepts_fee(coll_fee, total_coll_drawn, max_fee_percentage)?;

    event::redemption(
        env,
        redeemer,
        amount,
        total_stable_redeemed,
        total_coll_drawn,
        coll_fee,
    );

    trove_manager.ledger.decrease_active(
        total_coll_drawn,
        total_stable_redeemed + total_gas_compensation,
    )?;
    trove_manager.ledger.decrease_gas_pool(total_gas_compensation)?;
    trove_manager.ledger.move_to_surplus(total_coll_surplus)?;

    let redeemer_trove = trove_manager.trove(redeemer);
    if redeemer_trove.is_active() {
        assert_with_error!(
            env,
            trove_manager.current_icr(redeemer, price)? >= mcr,
            Error::RedeemerTroveBelowMcr
        );
    }

    trove_manager.write();
    base_rate.write();

    vault.burn_stable(redeemer, total_stable_redeemed);
    vault.burn_own_stable(total_gas_compensation);
    vault.send_coll(&config.treasury, coll_fee);
    vault.send_coll(redeemer, total_coll_drawn - coll_fee);

    Ok(())
}

/// A hint is usable when it is the riskiest trove still at or above MCR
fn is_valid_first_redemption_hint(
    trove_manager: &TroveManager,
    sorted_troves: &SortedTroves,
    hint: &Option<Address>,
    price: i128,
    mcr: i128,
) -> Result<bool, Error> {
    let hint = match hint {
        Some(hint) if sorted_troves.contains(hint) => hint,
        _ => return Ok(false),
    };

    if trove_manager.current_icr(hint, price)? < mcr {
        return Ok(false);
    }

    match sorted_troves.next(hint) {
        Some(next) => Ok(trove_manager.current_icr(&next, price)? < mcr),
        None => Ok(true),
    }
}

/// Returns `None` when a partial redemption would leave the trove below the minimum net debt
#[allow(clippy::too_many_arguments)]
fn redeem_from_trove(
    config: &ProtocolConfig,
    trove_manager: &mut TroveManager,
    sorted_troves: &mut SortedTroves,
    borrower: &Address,
    max_stable_amount: i128,
    price: i128,
    upper_hint: Option<Address>,
    lower_hint: Option<Address>,
) -> Result<Option<SingleRedemption>, Error> {
    let mut trove = trove_manager.trove(borrower);

    let redeemable = trove
        .debt
        .checked_sub(config.gas_compensation)
        .ok_or(Error::MathOverflowError)?;
    let stable_lot = max_stable_amount.min(redeemable);
    let coll_lot = coll_for_value(stable_lot, price)
        .ok_or(Error::MathOverflowError)?
        .min(trove.coll);

    let new_debt = trove.debt - stable_lot;
    let new_coll = trove.coll - coll_lot;

    if new_debt == config.gas_compensation {
        trove_manager.remove_stake(&mut trove)?;
        trove_manager.close_trove(
            sorted_troves,
            borrower,
            &mut trove,
            TroveStatus::ClosedByRedemption,
        )?;
        trove_manager.account_surplus(borrower, new_coll)?;

        event::trove_updated(
            trove_manager.env(),
            borrower,
            0,
            0,
            0,
            TroveOperation::RedeemCollateral,
        );

        return Ok(Some(SingleRedemption {
            stable_lot,
            coll_lot,
            coll_surplus: new_coll,
            gas_compensation: config.gas_compensation,
        }));
    }

    if new_debt - config.gas_compensation < config.min_net_debt {
        return Ok(None);
    }

    trove.debt = new_debt;
    trove.coll = new_coll;
    trove_manager.update_stake_and_total_stakes(&mut trove)?;
    write_trove(trove_manager.env(), borrower, &trove);

    let new_nicr = compute_nominal_cr(new_coll, new_debt).ok_or(Error::MathOverflowError)?;
    sorted_troves.re_insert(borrower, new_nicr, upper_hint, lower_hint, &|id: &Address| {
        trove_manager.nominal_icr(id)
    })?;

    event::trove_updated(
        trove_manager.env(),
        borrower,
        trove.debt,
        trove.coll,
        trove.stake,
        TroveOperation::RedeemCollateral,
    );

    Ok(Some(SingleRedemption {
        stable_lot,
        coll_lot,
        coll_surplus: 0,
        gas_compensation: 0,
    }))
}
