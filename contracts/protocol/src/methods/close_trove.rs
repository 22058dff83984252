use protocol_interface::types::error::Error;
use protocol_interface::types::trove::{TroveOperation, TroveStatus};
use soroban_sdk::{Address, Env};

use crate::event;
use crate::storage::read_config;
use crate::types::price_provider::PriceProvider;
use crate::types::sorted_troves::SortedTroves;
use crate::types::trove_manager::TroveManager;
use crate::types::vault::Vault;

use super::utils::validation::{
    require_new_tcr_above_ccr, require_not_in_recovery_mode, require_sufficient_balance,
    require_trove_active,
};

pub fn close_trove(env: &Env, borrower: &Address) -> Result<(), Error> {
    borrower.require_auth();

    let config = read_config(env)?;

    let mut trove_manager = TroveManager::new(env, &config)?;
    let mut sorted_troves = SortedTroves::new(env, &config);
    let vault = Vault::new(env, &config);

    require_trove_active(env, &trove_manager.trove(borrower));

    let price = PriceProvider::new(env, &config).price()?;
    require_not_in_recovery_mode(env, trove_manager.check_recovery_mode(price)?);

    trove_manager.apply_pending_rewards(borrower)?;
    let mut trove = trove_manager.trove(borrower);

    let (coll, debt) = (trove.coll, trove.debt);
    let repayment = debt
        .checked_sub(config.gas_compensation)
        .ok_or(Error::MathOverflowError)?;

    require_sufficient_balance(env, vault.stable_balance(borrower), repayment);

    let new_tcr = trove_manager.new_tcr_from_trove_change(coll, false, debt, false, price)?;
    require_new_tcr_above_ccr(env, new_tcr, trove_manager.ccr()?);

    trove_manager.remove_stake(&mut trove)?;
    trove_manager.close_trove(
        &mut sorted_troves,
        borrower,
        &mut trove,
        TroveStatus::ClosedByOwner,
    )?;

    event::trove_updated(env, borrower, 0, 0, 0, TroveOperation::CloseTrove);

    vault.burn_stable(borrower, repayment);
    vault.burn_own_stable(config.gas_compensation);
    trove_manager.ledger.decrease_active(coll, debt)?;
    trove_manager
        .ledger
        .decrease_gas_pool(config.gas_compensation)?;

    vault.send_coll(borrower, coll);

    trove_manager.write();

    Ok(())
}
