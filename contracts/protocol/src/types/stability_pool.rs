use common::{FixedI128, SCALE_FACTOR};
use community_issuance_interface::CommunityIssuanceClient;
use protocol_interface::types::deposit::{Deposit, Snapshots};
use protocol_interface::types::error::Error;
use protocol_interface::types::pool_ledger::PoolLedger;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::stability_pool_state::StabilityPoolState;
use soroban_sdk::{Address, Env};

use crate::event;
use crate::storage::{
    read_deposit, read_deposit_snapshots, read_epoch_scale_g, read_epoch_scale_sum,
    read_front_end, read_front_end_snapshots, read_front_end_stake, read_stability_pool_state,
    remove_deposit, remove_deposit_snapshots, remove_front_end_snapshots, write_deposit,
    write_deposit_snapshots, write_epoch_scale_g, write_epoch_scale_sum,
    write_front_end_snapshots, write_front_end_stake, write_stability_pool_state,
};
use crate::types::vault::Vault;

/// Compounded value of a stake given its snapshot and the current accumulators.
///
/// A stake is wiped out once the epoch advanced past its snapshot or two scale
/// changes happened since, and it is treated as zero once it drops below a
/// billionth of its initial value.
pub fn compounded_stake(
    initial_stake: i128,
    snapshots: &Snapshots,
    p: i128,
    current_scale: u64,
    current_epoch: u64,
) -> Result<i128, Error> {
    if initial_stake == 0 || snapshots.epoch < current_epoch || snapshots.p == 0 {
        return Ok(0);
    }

    let scale_diff = current_scale.saturating_sub(snapshots.scale);

    let compounded = match scale_diff {
        0 => initial_stake
            .checked_mul(p)
            .and_then(|v| v.checked_div(snapshots.p)),
        1 => initial_stake
            .checked_mul(p)
            .and_then(|v| v.checked_div(snapshots.p))
            .and_then(|v| v.checked_div(SCALE_FACTOR)),
        _ => Some(0),
    }
    .ok_or(Error::MathOverflowError)?;

    if compounded < initial_stake / SCALE_FACTOR {
        return Ok(0);
    }

    Ok(compounded)
}

/// Gain accrued by `initial_stake` from a snapshot of an accumulator table.
///
/// `first_portion_sum` is the table value at the snapshot epoch and scale,
/// `second_portion_sum` the value one scale later, which is scaled down once.
pub fn gain_from_snapshots(
    initial_stake: i128,
    snapshot_value: i128,
    snapshot_p: i128,
    first_portion_sum: i128,
    second_portion_sum: i128,
) -> Result<i128, Error> {
    if initial_stake == 0 || snapshot_p == 0 {
        return Ok(0);
    }

    let first_portion = first_portion_sum
        .checked_sub(snapshot_value)
        .ok_or(Error::MathOverflowError)?;
    let second_portion = second_portion_sum / SCALE_FACTOR;

    first_portion
        .checked_add(second_portion)
        .and_then(|v| v.checked_mul(initial_stake))
        .and_then(|v| v.checked_div(snapshot_p))
        .ok_or(Error::MathOverflowError)
}

/// Splits `amount` over `total` units with the previous rounding error fed back in.
/// Returns the per-unit value and the new error.
pub fn per_unit_staked(amount: i128, total: i128, last_error: i128) -> Result<(i128, i128), Error> {
    let numerator = amount
        .checked_mul(FixedI128::DENOMINATOR)
        .and_then(|v| v.checked_add(last_error))
        .ok_or(Error::MathOverflowError)?;
    let per_unit = numerator
        .checked_div(total)
        .ok_or(Error::MathOverflowError)?;
    let error = numerator
        .checked_sub(per_unit * total)
        .ok_or(Error::MathOverflowError)?;

    Ok((per_unit, error))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPerUnit {
    pub coll_gain_per_unit: i128,
    pub debt_loss_per_unit: i128,
    pub coll_error: i128,
    pub debt_loss_error: i128,
}

/// Per-unit collateral gain and deposit loss of an offset.
///
/// The loss is rounded up by one unit so depositors can never claim more
/// collateral than the pool received. Offsetting the whole pool yields a loss
/// of exactly one.
pub fn offset_per_unit(
    coll_to_add: i128,
    debt_to_offset: i128,
    total_deposits: i128,
    last_coll_error: i128,
    last_debt_loss_error: i128,
) -> Result<OffsetPerUnit, Error> {
    if debt_to_offset > total_deposits {
        return Err(Error::MathOverflowError);
    }

    let (coll_gain_per_unit, coll_error) =
        per_unit_staked(coll_to_add, total_deposits, last_coll_error)?;

    let (debt_loss_per_unit, debt_loss_error) = if debt_to_offset == total_deposits {
        (FixedI128::DENOMINATOR, 0)
    } else {
        let loss_numerator = debt_to_offset
            .checked_mul(FixedI128::DENOMINATOR)
            .and_then(|v| v.checked_sub(last_debt_loss_error))
            .ok_or(Error::MathOverflowError)?;
        let loss_per_unit = loss_numerator
            .checked_div(total_deposits)
            .and_then(|v| v.checked_add(1))
            .ok_or(Error::MathOverflowError)?;
        let error = loss_per_unit
            .checked_mul(total_deposits)
            .and_then(|v| v.checked_sub(loss_numerator))
            .ok_or(Error::MathOverflowError)?;
        (loss_per_unit, error)
    };

    Ok(OffsetPerUnit {
        coll_gain_per_unit,
        debt_loss_per_unit,
        coll_error,
        debt_loss_error,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub new_p: i128,
    pub epoch: u64,
    pub scale: u64,
}

/// Next value of the running product after a loss of `debt_loss_per_unit`.
/// A full loss starts a new epoch, a product that would fall below
/// `SCALE_FACTOR` is scaled up and starts a new scale.
pub fn next_product(
    p: i128,
    epoch: u64,
    scale: u64,
    debt_loss_per_unit: i128,
) -> Result<ProductUpdate, Error> {
    if debt_loss_per_unit > FixedI128::DENOMINATOR || debt_loss_per_unit < 0 {
        return Err(Error::MathOverflowError);
    }

    let new_product_factor = FixedI128::DENOMINATOR - debt_loss_per_unit;

    if new_product_factor == 0 {
        return Ok(ProductUpdate {
            new_p: FixedI128::DENOMINATOR,
            epoch: epoch + 1,
            scale: 0,
        });
    }

    let product = p
        .checked_mul(new_product_factor)
        .ok_or(Error::MathOverflowError)?;
    let unscaled = product / FixedI128::DENOMINATOR;

    let update = if unscaled < SCALE_FACTOR {
        ProductUpdate {
            new_p: product
                .checked_mul(SCALE_FACTOR)
                .ok_or(Error::MathOverflowError)?
                / FixedI128::DENOMINATOR,
            epoch,
            scale: scale + 1,
        }
    } else {
        ProductUpdate {
            new_p: unscaled,
            epoch,
            scale,
        }
    };

    if update.new_p <= 0 {
        return Err(Error::MathOverflowError);
    }

    Ok(update)
}

/// Stability pool accumulators loaded once per invocation.
///
/// `S` and `G` tables hold cumulative gains per unit staked already multiplied by
/// the product `P` of their epoch and scale, divided by one unit.
pub struct StabilityPool<'a> {
    env: &'a Env,
    config: &'a ProtocolConfig,
    pub state: StabilityPoolState,
}

impl<'a> StabilityPool<'a> {
    pub fn new(env: &'a Env, config: &'a ProtocolConfig) -> Result<Self, Error> {
        Ok(Self {
            env,
            config,
            state: read_stability_pool_state(env)?,
        })
    }

    pub fn write(&self) {
        write_stability_pool_state(self.env, &self.state);
    }

    pub fn total_deposits(&self) -> i128 {
        self.state.total_deposits
    }

    /// Pulls newly issued reward and spreads it over current deposits
    pub fn trigger_issuance(&mut self) -> Result<(), Error> {
        let issuance =
            CommunityIssuanceClient::new(self.env, &self.config.community_issuance).issue_tokens();
        self.update_g(issuance)
    }

    fn update_g(&mut self, issuance: i128) -> Result<(), Error> {
        // reward issued while the pool is empty is not assigned to anyone
        if self.state.total_deposits == 0 || issuance == 0 {
            return Ok(());
        }

        let (reward_per_unit, error) = per_unit_staked(
            issuance,
            self.state.total_deposits,
            self.state.last_reward_error,
        )?;
        self.state.last_reward_error = error;

        let marginal_g = FixedI128::from_inner(self.state.p)
            .mul_int(reward_per_unit)
            .ok_or(Error::MathOverflowError)?;

        let (epoch, scale) = (self.state.current_epoch, self.state.current_scale);
        let g = read_epoch_scale_g(self.env, epoch, scale)
            .checked_add(marginal_g)
            .ok_or(Error::MathOverflowError)?;
        write_epoch_scale_g(self.env, epoch, scale, g);

        event::g_updated(self.env, g, epoch, scale);

        Ok(())
    }

    /// Cancels `debt_to_offset` against deposits and hands `coll_to_add` to depositors.
    /// No-op when the pool is empty or there is nothing to offset.
    pub fn offset(
        &mut self,
        ledger: &mut PoolLedger,
        debt_to_offset: i128,
        coll_to_add: i128,
    ) -> Result<(), Error> {
        if self.state.total_deposits == 0 || debt_to_offset == 0 {
            return Ok(());
        }

        self.trigger_issuance()?;

        let per_unit = offset_per_unit(
            coll_to_add,
            debt_to_offset,
            self.state.total_deposits,
            self.state.last_coll_error_offset,
            self.state.last_debt_loss_error_offset,
        )?;
        self.state.last_coll_error_offset = per_unit.coll_error;
        self.state.last_debt_loss_error_offset = per_unit.debt_loss_error;

        self.update_reward_sum_and_product(
            per_unit.coll_gain_per_unit,
            per_unit.debt_loss_per_unit,
        )?;

        ledger.decrease_active(coll_to_add, debt_to_offset)?;
        Vault::new(self.env, self.config).burn_own_stable(debt_to_offset);

        self.state.total_deposits = self
            .state
            .total_deposits
            .checked_sub(debt_to_offset)
            .ok_or(Error::MathOverflowError)?;
        self.state.coll = self
            .state
            .coll
            .checked_add(coll_to_add)
            .ok_or(Error::MathOverflowError)?;

        event::sp_deposits_updated(self.env, self.state.total_deposits, self.state.coll);

        Ok(())
    }

    fn update_reward_sum_and_product(
        &mut self,
        coll_gain_per_unit: i128,
        debt_loss_per_unit: i128,
    ) -> Result<(), Error> {
        let (epoch, scale) = (self.state.current_epoch, self.state.current_scale);

        // rounded down, the truncated remainder stays with the pool
        let marginal_coll_gain = FixedI128::from_inner(self.state.p)
            .mul_int(coll_gain_per_unit)
            .ok_or(Error::MathOverflowError)?;
        let s = read_epoch_scale_sum(self.env, epoch, scale)
            .checked_add(marginal_coll_gain)
            .ok_or(Error::MathOverflowError)?;
        write_epoch_scale_sum(self.env, epoch, scale, s);
        event::s_updated(self.env, s, epoch, scale);

        let update = next_product(self.state.p, epoch, scale, debt_loss_per_unit)?;

        if update.epoch != epoch {
            event::epoch_updated(self.env, update.epoch);
        }
        if update.scale != scale {
            event::scale_updated(self.env, update.scale);
        }

        self.state.p = update.new_p;
        self.state.current_epoch = update.epoch;
        self.state.current_scale = update.scale;

        event::p_updated(self.env, update.new_p);

        Ok(())
    }

    /// Accumulators as they stand now. Front end snapshots take `with_sum == false`.
    pub fn current_snapshots(&self, with_sum: bool) -> Snapshots {
        let (epoch, scale) = (self.state.current_epoch, self.state.current_scale);

        Snapshots {
            s: if with_sum {
                read_epoch_scale_sum(self.env, epoch, scale)
            } else {
                0
            },
            p: self.state.p,
            g: read_epoch_scale_g(self.env, epoch, scale),
            scale,
            epoch,
        }
    }

    pub fn deposit(&self, depositor: &Address) -> Option<Deposit> {
        read_deposit(self.env, depositor).filter(|d| d.initial_value > 0)
    }

    pub fn kickback_rate(&self, front_end: &Option<Address>) -> i128 {
        front_end
            .as_ref()
            .and_then(|fe| read_front_end(self.env, fe))
            .map(|fe| fe.kickback_rate)
            .unwrap_or(FixedI128::DENOMINATOR)
    }

    pub fn compounded_deposit(&self, depositor: &Address) -> Result<i128, Error> {
        let (deposit, snapshots) = match self.deposit_with_snapshots(depositor) {
            Some(v) => v,
            None => return Ok(0),
        };

        compounded_stake(
            deposit.initial_value,
            &snapshots,
            self.state.p,
            self.state.current_scale,
            self.state.current_epoch,
        )
    }

    pub fn compounded_front_end_stake(&self, front_end: &Address) -> Result<i128, Error> {
        let stake = read_front_end_stake(self.env, front_end);
        let snapshots = match read_front_end_snapshots(self.env, front_end) {
            Some(s) => s,
            None => return Ok(0),
        };

        compounded_stake(
            stake,
            &snapshots,
            self.state.p,
            self.state.current_scale,
            self.state.current_epoch,
        )
    }

    pub fn depositor_coll_gain(&self, depositor: &Address) -> Result<i128, Error> {
        let (deposit, snapshots) = match self.deposit_with_snapshots(depositor) {
            Some(v) => v,
            None => return Ok(0),
        };

        gain_from_snapshots(
            deposit.initial_value,
            snapshots.s,
            snapshots.p,
            read_epoch_scale_sum(self.env, snapshots.epoch, snapshots.scale),
            read_epoch_scale_sum(self.env, snapshots.epoch, snapshots.scale + 1),
        )
    }

    /// Depositor share of the reward, `kickback_rate * gain`
    pub fn depositor_reward_gain(&self, depositor: &Address) -> Result<i128, Error> {
        let (deposit, snapshots) = match self.deposit_with_snapshots(depositor) {
            Some(v) => v,
            None => return Ok(0),
        };

        let gain = self.reward_gain_from_snapshots(deposit.initial_value, &snapshots)?;

        FixedI128::from_inner(self.kickback_rate(&deposit.front_end_tag))
            .mul_int(gain)
            .ok_or(Error::MathOverflowError)
    }

    /// Front end share of the reward earned by its tagged deposits, `(1 - kickback_rate) * gain`
    pub fn front_end_reward_gain(&self, front_end: &Address) -> Result<i128, Error> {
        let front_end_data = match read_front_end(self.env, front_end) {
            Some(fe) if fe.registered => fe,
            _ => return Ok(0),
        };
        let snapshots = match read_front_end_snapshots(self.env, front_end) {
            Some(s) => s,
            None => return Ok(0),
        };

        let stake = read_front_end_stake(self.env, front_end);
        let gain = self.reward_gain_from_snapshots(stake, &snapshots)?;

        FixedI128::ONE
            .checked_sub(FixedI128::from_inner(front_end_data.kickback_rate))
            .and_then(|share| share.mul_int(gain))
            .ok_or(Error::MathOverflowError)
    }

    fn reward_gain_from_snapshots(
        &self,
        initial_stake: i128,
        snapshots: &Snapshots,
    ) -> Result<i128, Error> {
        gain_from_snapshots(
            initial_stake,
            snapshots.g,
            snapshots.p,
            read_epoch_scale_g(self.env, snapshots.epoch, snapshots.scale),
            read_epoch_scale_g(self.env, snapshots.epoch, snapshots.scale + 1),
        )
    }

    fn deposit_with_snapshots(&self, depositor: &Address) -> Option<(Deposit, Snapshots)> {
        let deposit = self.deposit(depositor)?;
        let snapshots = read_deposit_snapshots(self.env, depositor)?;
        Some((deposit, snapshots))
    }

    /// Pays reward accrued by the depositor and by the front end it is tagged with
    pub fn pay_out_reward_gains(
        &self,
        depositor: &Address,
        front_end: &Option<Address>,
    ) -> Result<(), Error> {
        let issuance = CommunityIssuanceClient::new(self.env, &self.config.community_issuance);

        if let Some(front_end) = front_end {
            let front_end_gain = self.front_end_reward_gain(front_end)?;
            if front_end_gain > 0 {
                issuance.send_tokens(front_end, &front_end_gain);
                event::reward_paid_to_front_end(self.env, front_end, front_end_gain);
            }
        }

        let depositor_gain = self.depositor_reward_gain(depositor)?;
        if depositor_gain > 0 {
            issuance.send_tokens(depositor, &depositor_gain);
            event::reward_paid_to_depositor(self.env, depositor, depositor_gain);
        }

        Ok(())
    }

    /// Records a new deposit value and snapshots the accumulators.
    /// A zero value removes the deposit together with its front end tag.
    pub fn update_deposit_and_snapshots(
        &self,
        depositor: &Address,
        new_value: i128,
        front_end_tag: Option<Address>,
    ) {
        if new_value == 0 {
            remove_deposit(self.env, depositor);
            remove_deposit_snapshots(self.env, depositor);
            event::deposit_snapshot_updated(self.env, depositor, 0, 0, 0);
            event::user_deposit_changed(self.env, depositor, 0);
            return;
        }

        write_deposit(
            self.env,
            depositor,
            &Deposit {
                initial_value: new_value,
                front_end_tag,
            },
        );

        let snapshots = self.current_snapshots(true);
        write_deposit_snapshots(self.env, depositor, &snapshots);

        event::deposit_snapshot_updated(self.env, depositor, snapshots.p, snapshots.s, snapshots.g);
        event::user_deposit_changed(self.env, depositor, new_value);
    }

    pub fn update_front_end_stake_and_snapshots(&self, front_end: &Address, new_value: i128) {
        write_front_end_stake(self.env, front_end, new_value);

        if new_value == 0 {
            remove_front_end_snapshots(self.env, front_end);
            event::front_end_snapshot_updated(self.env, front_end, 0, 0);
        } else {
            let snapshots = self.current_snapshots(false);
            write_front_end_snapshots(self.env, front_end, &snapshots);
            event::front_end_snapshot_updated(self.env, front_end, snapshots.p, snapshots.g);
        }

        event::front_end_stake_changed(self.env, front_end, new_value);
    }

    pub fn increase_deposits(&mut self, amount: i128) -> Result<(), Error> {
        self.state.total_deposits = self
            .state
            .total_deposits
            .checked_add(amount)
            .ok_or(Error::MathOverflowError)?;
        event::sp_deposits_updated(self.env, self.state.total_deposits, self.state.coll);
        Ok(())
    }

    pub fn decrease_deposits(&mut self, amount: i128) -> Result<(), Error> {
        self.state.total_deposits = self
            .state
            .total_deposits
            .checked_sub(amount)
            .filter(|v| *v >= 0)
            .ok_or(Error::MathOverflowError)?;
        event::sp_deposits_updated(self.env, self.state.total_deposits, self.state.coll);
        Ok(())
    }

    /// Removes collateral gain from the pool balance, the caller decides where it goes
    pub fn take_coll(&mut self, amount: i128) -> Result<(), Error> {
        self.state.coll = self
            .state
            .coll
            .checked_sub(amount)
            .filter(|v| *v >= 0)
            .ok_or(Error::MathOverflowError)?;
        event::sp_deposits_updated(self.env, self.state.total_deposits, self.state.coll);
        Ok(())
    }
}
