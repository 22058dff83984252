use common::{compute_cr, compute_nominal_cr};
use protocol_interface::types::error::Error;
use protocol_interface::types::trove::{Trove, TroveOperation, TroveStatus};
use soroban_sdk::{Address, Env};

use crate::event;
use crate::storage::{read_config, write_trove};
use crate::types::base_rate::BaseRate;
use crate::types::price_provider::PriceProvider;
use crate::types::sorted_troves::SortedTroves;
use crate::types::trove_manager::TroveManager;
use crate::types::vault::Vault;

use super::utils::validation::{
    require_at_least_min_net_debt, require_icr_above_ccr, require_icr_above_mcr,
    require_new_tcr_above_ccr, require_nonzero_amount, require_trove_not_active,
    require_valid_max_fee_percentage,
};

pub fn open_trove(
    env: &Env,
    borrower: &Address,
    max_fee_percentage: i128,
    coll: i128,
    stable_amount: i128,
    upper_hint: Option<Address>,
    lower_hint: Option<Address>,
) -> Result<(), Error> {
    borrower.require_auth();

    let config = read_config(env)?;

    require_nonzero_amount(env, coll);
    require_nonzero_amount(env, stable_amount);

    let price = PriceProvider::new(env, &config).price()?;
    let mut trove_manager = TroveManager::new(env, &config)?;
    let mut base_rate = BaseRate::new(env, &config)?;
    let mut sorted_troves = SortedTroves::new(env, &config);
    let vault = Vault::new(env, &config);

    let is_recovery_mode = trove_manager.check_recovery_mode(price)?;

    require_valid_max_fee_percentage(
        env,
        max_fee_percentage,
        config.borrowing_fee_floor,
        is_recovery_mode,
    )?;
    require_trove_not_active(env, &trove_manager.trove(borrower));

    let borrowing_fee = if is_recovery_mode {
        0
    } else {
        base_rate.trigger_borrowing_fee(stable_amount, max_fee_percentage)?
    };

    let net_debt = stable_amount
        .checked_add(borrowing_fee)
        .ok_or(Error::MathOverflowError)?;
    require_at_least_min_net_debt(env, net_debt, config.min_net_debt);

    let composite_debt = net_debt
        .checked_add(config.gas_compensation)
        .ok_or(Error::MathOverflowError)?;

    let icr = compute_cr(coll, composite_debt, price).ok_or(Error::MathOverflowError)?;
    let nicr = compute_nominal_cr(coll, composite_debt).ok_or(Error::MathOverflowError)?;

    if is_recovery_mode {
        require_icr_above_ccr(env, icr, trove_manager.ccr()?);
    } else {
        require_icr_above_mcr(env, icr, trove_manager.mcr()?);
        let new_tcr =
            trove_manager.new_tcr_from_trove_change(coll, true, composite_debt, true, price)?;
        require_new_tcr_above_ccr(env, new_tcr, trove_manager.ccr()?);
    }

    let mut trove = Trove {
        debt: composite_debt,
        coll,
        stake: 0,
        status: TroveStatus::Active,
        array_index: 0,
    };

    trove_manager.update_reward_snapshots(borrower);
    trove_manager.update_stake_and_total_stakes(&mut trove)?;

    sorted_troves.insert(borrower, nicr, upper_hint, lower_hint, &|id: &Address| {
        trove_manager.nominal_icr(id)
    })?;
    trove_manager.add_trove_owner(borrower, &mut trove)?;

    write_trove(env, borrower, &trove);

    event::trove_updated(
        env,
        borrower,
        trove.debt,
        trove.coll,
        trove.stake,
        TroveOperation::OpenTrove,
    );

    vault.receive_coll(borrower, coll);
    trove_manager.ledger.increase_active(coll, composite_debt)?;

    vault.mint_stable(borrower, stable_amount);
    vault.mint_stable(&config.treasury, borrowing_fee);
    vault.mint_stable(&env.current_contract_address(), config.gas_compensation);
    trove_manager
        .ledger
        .increase_gas_pool(config.gas_compensation)?;

    if borrowing_fee > 0 {
        event::borrowing_fee_paid(env, borrower, borrowing_fee);
    }

    trove_manager.write();
    base_rate.write();

    Ok(())
}
