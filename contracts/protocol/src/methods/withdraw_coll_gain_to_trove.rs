use protocol_interface::types::error::Error;
use soroban_sdk::{assert_with_error, Address, Env};

use crate::event;
use crate::storage::{read_config, read_trove};
use crate::types::stability_pool::StabilityPool;

use super::adjust_trove::{do_adjust_trove, CollSource, TroveAdjustment};
use super::utils::validation::{require_trove_active, require_user_has_deposit};

/// Moves the depositor's collateral gain into their trove instead of paying it out
pub fn withdraw_coll_gain_to_trove(
    env: &Env,
    depositor: &Address,
    upper_hint: Option<Address>,
    lower_hint: Option<Address>,
) -> Result<(), Error> {
    depositor.require_auth();

    let config = read_config(env)?;

    let mut stability_pool = StabilityPool::new(env, &config)?;

    let existing = stability_pool.deposit(depositor);
    require_user_has_deposit(env, &existing);
    require_trove_active(env, &read_trove(env, depositor));

    let coll_gain = stability_pool.depositor_coll_gain(depositor)?;
    assert_with_error!(env, coll_gain > 0, Error::NoCollGain);

    let initial_deposit = existing.as_ref().map(|d| d.initial_value).unwrap_or(0);
    let front_end = existing.and_then(|d| d.front_end_tag);

    stability_pool.trigger_issuance()?;

    let compounded_deposit = stability_pool.compounded_deposit(depositor)?;
    let stable_loss = initial_deposit - compounded_deposit;

    stability_pool.pay_out_reward_gains(depositor, &front_end)?;

    if let Some(front_end) = &front_end {
        let compounded_front_end_stake = stability_pool.compounded_front_end_stake(front_end)?;
        stability_pool.update_front_end_stake_and_snapshots(front_end, compounded_front_end_stake);
    }

    stability_pool.update_deposit_and_snapshots(depositor, compounded_deposit, front_end);

    event::coll_gain_withdrawn(env, depositor, coll_gain, stable_loss);

    stability_pool.take_coll(coll_gain)?;
    stability_pool.write();

    do_adjust_trove(
        env,
        &config,
        depositor,
        &TroveAdjustment {
            max_fee_percentage: 0,
            coll_deposit: coll_gain,
            coll_withdrawal: 0,
            debt_change: 0,
            is_debt_increase: false,
        },
        upper_hint,
        lower_hint,
        CollSource::StabilityPool,
    )
}
