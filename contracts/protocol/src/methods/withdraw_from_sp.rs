use protocol_interface::types::error::Error;
use protocol_interface::types::protocol_config::ProtocolConfig;
use soroban_sdk::{assert_with_error, Address, Env};

use crate::event;
use crate::storage::read_config;
use crate::types::price_provider::PriceProvider;
use crate::types::sorted_troves::SortedTroves;
use crate::types::stability_pool::StabilityPool;
use crate::types::trove_manager::TroveManager;
use crate::types::vault::Vault;

use super::utils::validation::require_user_has_deposit;

/// Withdraws up to `amount` of the compounded deposit, a larger amount is clamped.
/// Zero only claims the accumulated gains.
pub fn withdraw_from_sp(env: &Env, depositor: &Address, amount: i128) -> Result<(), Error> {
    depositor.require_auth();

    let config = read_config(env)?;

    assert_with_error!(env, amount >= 0, Error::AmountMustBeNonZero);

    let mut stability_pool = StabilityPool::new(env, &config)?;

    let existing = stability_pool.deposit(depositor);
    require_user_has_deposit(env, &existing);

    if amount > 0 {
        require_no_undercollateralized_troves(env, &config)?;
    }

    let initial_deposit = existing.as_ref().map(|d| d.initial_value).unwrap_or(0);
    let front_end = existing.and_then(|d| d.front_end_tag);

    stability_pool.trigger_issuance()?;

    let coll_gain = stability_pool.depositor_coll_gain(depositor)?;
    let compounded_deposit = stability_pool.compounded_deposit(depositor)?;
    let to_withdraw = amount.min(compounded_deposit);
    let stable_loss = initial_deposit - compounded_deposit;

    stability_pool.pay_out_reward_gains(depositor, &front_end)?;

    if let Some(front_end) = &front_end {
        let new_front_end_stake = stability_pool
            .compounded_front_end_stake(front_end)?
            .checked_sub(to_withdraw)
            .ok_or(Error::MathOverflowError)?
            .max(0);
        stability_pool.update_front_end_stake_and_snapshots(front_end, new_front_end_stake);
    }

    let vault = Vault::new(env, &config);

    stability_pool.decrease_deposits(to_withdraw)?;
    vault.send_stable(depositor, to_withdraw);

    stability_pool.update_deposit_and_snapshots(
        depositor,
        compounded_deposit - to_withdraw,
        front_end,
    );

    event::coll_gain_withdrawn(env, depositor, coll_gain, stable_loss);

    stability_pool.take_coll(coll_gain)?;
    stability_pool.write();

    vault.send_coll(depositor, coll_gain);

    Ok(())
}

/// Withdrawals are blocked while the riskiest trove is liquidatable
fn require_no_undercollateralized_troves(env: &Env, config: &ProtocolConfig) -> Result<(), Error> {
    let sorted_troves = SortedTroves::new(env, config);

    if let Some(lowest) = sorted_troves.last() {
        let price = PriceProvider::new(env, config).price()?;
        let trove_manager = TroveManager::new(env, config)?;

        assert_with_error!(
            env,
            trove_manager.current_icr(&lowest, price)? >= trove_manager.mcr()?,
            Error::UndercollateralizedTroves
        );
    }

    Ok(())
}
