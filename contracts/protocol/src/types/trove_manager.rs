use common::{compute_cr, compute_nominal_cr, FixedI128};
use protocol_interface::types::entire_debt_and_coll::EntireDebtAndColl;
use protocol_interface::types::error::Error;
use protocol_interface::types::pool_ledger::PoolLedger;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::redistribution_state::RedistributionState;
use protocol_interface::types::trove::{RewardSnapshot, Trove, TroveOperation, TroveStatus};
use soroban_sdk::{Address, Env};

use crate::event;
use crate::storage::{
    read_coll_surplus, read_pool_ledger, read_redistribution_state, read_reward_snapshot,
    read_trove, read_trove_owner, read_trove_owners_count, remove_reward_snapshot,
    remove_trove_owner, write_coll_surplus, write_pool_ledger, write_redistribution_state,
    write_reward_snapshot, write_trove, write_trove_owner, write_trove_owners_count,
};
use crate::types::base_rate::bps_to_rate;
use crate::types::sorted_troves::SortedTroves;

/// Share of a redistribution accumulator not yet applied to a stake
pub fn pending_reward(stake: i128, snapshot: i128, accumulated: i128) -> Result<i128, Error> {
    let reward_per_unit_staked = accumulated
        .checked_sub(snapshot)
        .ok_or(Error::MathOverflowError)?;

    if reward_per_unit_staked <= 0 || stake == 0 {
        return Ok(0);
    }

    FixedI128::from_inner(reward_per_unit_staked)
        .mul_int(stake)
        .ok_or(Error::MathOverflowError)
}

/// Trove records together with the redistribution accumulators and pool balances.
/// Both global structs are loaded on creation and persisted by `write`.
pub struct TroveManager<'a> {
    env: &'a Env,
    config: &'a ProtocolConfig,
    pub redistribution: RedistributionState,
    pub ledger: PoolLedger,
}

impl<'a> TroveManager<'a> {
    pub fn new(env: &'a Env, config: &'a ProtocolConfig) -> Result<Self, Error> {
        Ok(Self {
            env,
            config,
            redistribution: read_redistribution_state(env)?,
            ledger: read_pool_ledger(env)?,
        })
    }

    pub fn write(&self) {
        write_redistribution_state(self.env, &self.redistribution);
        write_pool_ledger(self.env, &self.ledger);
    }

    pub fn env(&self) -> &'a Env {
        self.env
    }

    pub fn mcr(&self) -> Result<i128, Error> {
        bps_to_rate(self.config.mcr)
    }

    pub fn ccr(&self) -> Result<i128, Error> {
        bps_to_rate(self.config.ccr)
    }

    pub fn trove(&self, borrower: &Address) -> Trove {
        read_trove(self.env, borrower)
    }

    pub fn pending_rewards(&self, borrower: &Address, trove: &Trove) -> Result<(i128, i128), Error> {
        if !trove.is_active() {
            return Ok((0, 0));
        }

        let snapshot = read_reward_snapshot(self.env, borrower);

        Ok((
            pending_reward(trove.stake, snapshot.coll, self.redistribution.l_coll)?,
            pending_reward(trove.stake, snapshot.debt, self.redistribution.l_debt)?,
        ))
    }

    fn has_pending_rewards(&self, borrower: &Address, trove: &Trove) -> bool {
        if !trove.is_active() {
            return false;
        }

        let snapshot = read_reward_snapshot(self.env, borrower);
        snapshot.coll < self.redistribution.l_coll || snapshot.debt < self.redistribution.l_debt
    }

    pub fn entire_debt_and_coll(&self, borrower: &Address) -> Result<EntireDebtAndColl, Error> {
        let trove = self.trove(borrower);
        let (pending_coll, pending_debt) = self.pending_rewards(borrower, &trove)?;

        Ok(EntireDebtAndColl {
            debt: trove
                .debt
                .checked_add(pending_debt)
                .ok_or(Error::MathOverflowError)?,
            coll: trove
                .coll
                .checked_add(pending_coll)
                .ok_or(Error::MathOverflowError)?,
            pending_debt,
            pending_coll,
        })
    }

    pub fn current_icr(&self, borrower: &Address, price: i128) -> Result<i128, Error> {
        let entire = self.entire_debt_and_coll(borrower)?;
        compute_cr(entire.coll, entire.debt, price).ok_or(Error::MathOverflowError)
    }

    pub fn nominal_icr(&self, borrower: &Address) -> Result<i128, Error> {
        let entire = self.entire_debt_and_coll(borrower)?;
        compute_nominal_cr(entire.coll, entire.debt).ok_or(Error::MathOverflowError)
    }

    /// Folds the pending redistribution share into the trove record
    pub fn apply_pending_rewards(&mut self, borrower: &Address) -> Result<(), Error> {
        let mut trove = self.trove(borrower);
        if !self.has_pending_rewards(borrower, &trove) {
            return Ok(());
        }

        let (pending_coll, pending_debt) = self.pending_rewards(borrower, &trove)?;

        trove.coll = trove
            .coll
            .checked_add(pending_coll)
            .ok_or(Error::MathOverflowError)?;
        trove.debt = trove
            .debt
            .checked_add(pending_debt)
            .ok_or(Error::MathOverflowError)?;
        write_trove(self.env, borrower, &trove);

        self.update_reward_snapshots(borrower);
        self.ledger.move_from_default(pending_coll, pending_debt)?;

        event::trove_updated(
            self.env,
            borrower,
            trove.debt,
            trove.coll,
            trove.stake,
            TroveOperation::ApplyPendingRewards,
        );

        Ok(())
    }

    /// Moves the pending share of a trove about to be liquidated back to the active pool
    /// without touching the trove record
    pub fn move_pending_rewards_to_active(
        &mut self,
        pending_coll: i128,
        pending_debt: i128,
    ) -> Result<(), Error> {
        if pending_coll > 0 || pending_debt > 0 {
            self.ledger.move_from_default(pending_coll, pending_debt)?;
        }
        Ok(())
    }

    pub fn update_reward_snapshots(&self, borrower: &Address) {
        write_reward_snapshot(
            self.env,
            borrower,
            &RewardSnapshot {
                coll: self.redistribution.l_coll,
                debt: self.redistribution.l_debt,
            },
        );
    }

    /// Recomputes the stake of `trove` from its collateral, returns the new stake
    pub fn update_stake_and_total_stakes(&mut self, trove: &mut Trove) -> Result<i128, Error> {
        let new_stake = self.compute_new_stake(trove.coll)?;

        self.redistribution.total_stakes = self
            .redistribution
            .total_stakes
            .checked_sub(trove.stake)
            .and_then(|v| v.checked_add(new_stake))
            .ok_or(Error::MathOverflowError)?;
        trove.stake = new_stake;

        event::total_stakes_updated(self.env, self.redistribution.total_stakes);

        Ok(new_stake)
    }

    /// Stake is collateral scaled by the stakes to collateral ratio at the last liquidation,
    /// so troves opened after a redistribution don't earn rewards from earlier ones.
    pub fn compute_new_stake(&self, coll: i128) -> Result<i128, Error> {
        if self.redistribution.total_collateral_snapshot == 0 {
            return Ok(coll);
        }

        // stakes snapshot is positive whenever a collateral snapshot exists
        if self.redistribution.total_stakes_snapshot <= 0 {
            return Err(Error::MathOverflowError);
        }

        coll.checked_mul(self.redistribution.total_stakes_snapshot)
            .and_then(|v| v.checked_div(self.redistribution.total_collateral_snapshot))
            .ok_or(Error::MathOverflowError)
    }

    pub fn remove_stake(&mut self, trove: &mut Trove) -> Result<(), Error> {
        self.redistribution.total_stakes = self
            .redistribution
            .total_stakes
            .checked_sub(trove.stake)
            .ok_or(Error::MathOverflowError)?;
        trove.stake = 0;

        event::total_stakes_updated(self.env, self.redistribution.total_stakes);

        Ok(())
    }

    /// Spreads debt and collateral the stability pool couldn't absorb over all stakes
    pub fn redistribute_debt_and_coll(&mut self, debt: i128, coll: i128) -> Result<(), Error> {
        if debt == 0 {
            return Ok(());
        }

        let total_stakes = self.redistribution.total_stakes;
        if total_stakes <= 0 {
            return Err(Error::MathOverflowError);
        }

        let coll_numerator = coll
            .checked_mul(FixedI128::DENOMINATOR)
            .and_then(|v| v.checked_add(self.redistribution.last_coll_error_redistribution))
            .ok_or(Error::MathOverflowError)?;
        let debt_numerator = debt
            .checked_mul(FixedI128::DENOMINATOR)
            .and_then(|v| v.checked_add(self.redistribution.last_debt_error_redistribution))
            .ok_or(Error::MathOverflowError)?;

        let coll_reward_per_unit_staked = coll_numerator / total_stakes;
        let debt_reward_per_unit_staked = debt_numerator / total_stakes;

        self.redistribution.last_coll_error_redistribution =
            coll_numerator - coll_reward_per_unit_staked * total_stakes;
        self.redistribution.last_debt_error_redistribution =
            debt_numerator - debt_reward_per_unit_staked * total_stakes;

        self.redistribution.l_coll = self
            .redistribution
            .l_coll
            .checked_add(coll_reward_per_unit_staked)
            .ok_or(Error::MathOverflowError)?;
        self.redistribution.l_debt = self
            .redistribution
            .l_debt
            .checked_add(debt_reward_per_unit_staked)
            .ok_or(Error::MathOverflowError)?;

        event::l_terms_updated(
            self.env,
            self.redistribution.l_coll,
            self.redistribution.l_debt,
        );

        self.ledger.move_to_default(coll, debt)
    }

    /// Snapshots stakes and system collateral after a liquidation.
    /// `coll_remainder` is the gas compensation still held in the active pool.
    pub fn update_system_snapshots_exclude_coll_remainder(
        &mut self,
        coll_remainder: i128,
    ) -> Result<(), Error> {
        self.redistribution.total_stakes_snapshot = self.redistribution.total_stakes;
        self.redistribution.total_collateral_snapshot = self
            .ledger
            .entire_system_coll()?
            .checked_sub(coll_remainder)
            .ok_or(Error::MathOverflowError)?;

        event::system_snapshots_updated(
            self.env,
            self.redistribution.total_stakes_snapshot,
            self.redistribution.total_collateral_snapshot,
        );

        Ok(())
    }

    /// Registers a new active trove in the owners array
    pub fn add_trove_owner(&self, borrower: &Address, trove: &mut Trove) -> Result<u32, Error> {
        let count = read_trove_owners_count(self.env);
        write_trove_owner(self.env, count, borrower);
        write_trove_owners_count(
            self.env,
            count.checked_add(1).ok_or(Error::MathOverflowError)?,
        );
        trove.array_index = count;
        Ok(count)
    }

    /// Zeroes the trove, drops it from the owners array and the sorted list.
    /// Stake must be removed beforehand.
    pub fn close_trove(
        &self,
        sorted_troves: &mut SortedTroves,
        borrower: &Address,
        trove: &mut Trove,
        status: TroveStatus,
    ) -> Result<(), Error> {
        let count = read_trove_owners_count(self.env);
        if count <= 1 || sorted_troves.size() <= 1 {
            return Err(Error::OnlyOneTroveInSystem);
        }

        let index = trove.array_index;

        trove.status = status;
        trove.coll = 0;
        trove.debt = 0;
        trove.array_index = 0;
        write_trove(self.env, borrower, trove);

        remove_reward_snapshot(self.env, borrower);
        self.remove_trove_owner(index, count)?;
        sorted_troves.remove(borrower)
    }

    fn remove_trove_owner(&self, index: u32, count: u32) -> Result<(), Error> {
        let last_index = count - 1;
        if index > last_index {
            return Err(Error::TroveNotActive);
        }

        if index != last_index {
            let moved = read_trove_owner(self.env, last_index).ok_or(Error::TroveNotActive)?;
            let mut moved_trove = read_trove(self.env, &moved);
            moved_trove.array_index = index;
            write_trove(self.env, &moved, &moved_trove);
            write_trove_owner(self.env, index, &moved);
        }

        remove_trove_owner(self.env, last_index);
        write_trove_owners_count(self.env, last_index);

        Ok(())
    }

    pub fn trove_owners_count(&self) -> u32 {
        read_trove_owners_count(self.env)
    }

    pub fn tcr(&self, price: i128) -> Result<i128, Error> {
        compute_cr(
            self.ledger.entire_system_coll()?,
            self.ledger.entire_system_debt()?,
            price,
        )
        .ok_or(Error::MathOverflowError)
    }

    pub fn check_recovery_mode(&self, price: i128) -> Result<bool, Error> {
        Ok(self.tcr(price)? < self.ccr()?)
    }

    pub fn check_potential_recovery_mode(
        &self,
        entire_system_coll: i128,
        entire_system_debt: i128,
        price: i128,
    ) -> Result<bool, Error> {
        let tcr = compute_cr(entire_system_coll, entire_system_debt, price)
            .ok_or(Error::MathOverflowError)?;
        Ok(tcr < self.ccr()?)
    }

    /// Total collateral ratio after applying a trove change to the system totals
    pub fn new_tcr_from_trove_change(
        &self,
        coll_change: i128,
        is_coll_increase: bool,
        debt_change: i128,
        is_debt_increase: bool,
        price: i128,
    ) -> Result<i128, Error> {
        let coll = apply_change(
            self.ledger.entire_system_coll()?,
            coll_change,
            is_coll_increase,
        )?;
        let debt = apply_change(
            self.ledger.entire_system_debt()?,
            debt_change,
            is_debt_increase,
        )?;

        compute_cr(coll, debt, price).ok_or(Error::MathOverflowError)
    }

    /// Makes collateral left after a capped liquidation or a redemption claimable by its owner.
    /// Pool balances are moved by the caller once per operation.
    pub fn account_surplus(&self, account: &Address, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Ok(());
        }

        let surplus = read_coll_surplus(self.env, account)
            .checked_add(amount)
            .ok_or(Error::MathOverflowError)?;
        write_coll_surplus(self.env, account, surplus);

        event::coll_surplus_updated(self.env, account, surplus);

        Ok(())
    }
}

pub fn apply_change(value: i128, change: i128, is_increase: bool) -> Result<i128, Error> {
    if is_increase {
        value.checked_add(change)
    } else {
        value.checked_sub(change)
    }
    .ok_or(Error::MathOverflowError)
}
