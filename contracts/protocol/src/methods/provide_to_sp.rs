use protocol_interface::types::error::Error;
use soroban_sdk::{Address, Env};

use crate::event;
use crate::storage::read_config;
use crate::types::stability_pool::StabilityPool;
use crate::types::vault::Vault;

use super::utils::validation::{
    require_front_end_not_registered, require_front_end_registered_or_none,
    require_nonzero_amount, require_sufficient_balance,
};

pub fn provide_to_sp(
    env: &Env,
    depositor: &Address,
    amount: i128,
    front_end_tag: Option<Address>,
) -> Result<(), Error> {
    depositor.require_auth();

    let config = read_config(env)?;

    require_front_end_registered_or_none(env, &front_end_tag);
    require_front_end_not_registered(env, depositor);
    require_nonzero_amount(env, amount);

    let vault = Vault::new(env, &config);
    require_sufficient_balance(env, vault.stable_balance(depositor), amount);

    let mut stability_pool = StabilityPool::new(env, &config)?;

    let existing = stability_pool.deposit(depositor);
    let initial_deposit = existing.as_ref().map(|d| d.initial_value).unwrap_or(0);

    stability_pool.trigger_issuance()?;

    // the tag is fixed for the lifetime of a deposit
    let front_end = match existing {
        Some(deposit) => deposit.front_end_tag,
        None => {
            if let Some(tag) = &front_end_tag {
                event::front_end_tag_set(env, depositor, tag);
            }
            front_end_tag
        }
    };

    let coll_gain = stability_pool.depositor_coll_gain(depositor)?;
    let compounded_deposit = stability_pool.compounded_deposit(depositor)?;
    let stable_loss = initial_deposit - compounded_deposit;

    stability_pool.pay_out_reward_gains(depositor, &front_end)?;

    if let Some(front_end) = &front_end {
        let new_front_end_stake = stability_pool
            .compounded_front_end_stake(front_end)?
            .checked_add(amount)
            .ok_or(Error::MathOverflowError)?;
        stability_pool.update_front_end_stake_and_snapshots(front_end, new_front_end_stake);
    }

    vault.receive_stable(depositor, amount);
    stability_pool.increase_deposits(amount)?;

    let new_deposit = compounded_deposit
        .checked_add(amount)
        .ok_or(Error::MathOverflowError)?;
    stability_pool.update_deposit_and_snapshots(depositor, new_deposit, front_end);

    event::coll_gain_withdrawn(env, depositor, coll_gain, stable_loss);

    stability_pool.take_coll(coll_gain)?;
    stability_pool.write();

    vault.send_coll(depositor, coll_gain);

    Ok(())
}
