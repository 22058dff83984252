use common::{compute_cr, FixedI128};
use protocol_interface::types::error::Error;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::trove::{TroveOperation, TroveStatus};
use soroban_sdk::{assert_with_error, vec, Address, Env, Vec};

use crate::event;
use crate::storage::{read_config, read_trove};
use crate::types::liquidation::{
    capped_offset_vals, coll_gas_compensation, offset_and_redistribution_vals, LiquidationValues,
};
use crate::types::price_provider::PriceProvider;
use crate::types::sorted_troves::SortedTroves;
use crate::types::stability_pool::StabilityPool;
use crate::types::trove_manager::TroveManager;
use crate::types::vault::Vault;

use super::utils::validation::require_trove_active;

pub fn liquidate(env: &Env, liquidator: &Address, borrower: &Address) -> Result<(), Error> {
    liquidator.require_auth();

    let config = read_config(env)?;
    require_trove_active(env, &read_trove(env, borrower));

    batch_liquidate(env, &config, liquidator, &vec![env, borrower.clone()])
}

pub fn batch_liquidate_troves(
    env: &Env,
    liquidator: &Address,
    borrowers: &Vec<Address>,
) -> Result<(), Error> {
    liquidator.require_auth();

    assert_with_error!(env, !borrowers.is_empty(), Error::EmptyTroveArray);

    let config = read_config(env)?;

    batch_liquidate(env, &config, liquidator, borrowers)
}

/// Liquidates up to `n` troves starting from the lowest collateral ratio
pub fn liquidate_troves(env: &Env, liquidator: &Address, n: u32) -> Result<(), Error> {
    liquidator.require_auth();

    let config = read_config(env)?;
    let mut liquidation = Liquidation::new(env, &config)?;

    let totals = if liquidation.is_recovery_mode()? {
        liquidation.sequence_in_recovery_mode(n)?
    } else {
        liquidation.sequence_in_normal_mode(n)?
    };

    liquidation.finalize(liquidator, &totals)
}

fn batch_liquidate(
    env: &Env,
    config: &ProtocolConfig,
    liquidator: &Address,
    borrowers: &Vec<Address>,
) -> Result<(), Error> {
    let mut liquidation = Liquidation::new(env, config)?;

    let totals = if liquidation.is_recovery_mode()? {
        liquidation.batch_in_recovery_mode(borrowers)?
    } else {
        liquidation.batch_in_normal_mode(borrowers)?
    };

    liquidation.finalize(liquidator, &totals)
}

struct Liquidation<'a> {
    env: &'a Env,
    config: &'a ProtocolConfig,
    price: i128,
    mcr: i128,
    trove_manager: TroveManager<'a>,
    sorted_troves: SortedTroves<'a>,
    stability_pool: StabilityPool<'a>,
}

impl<'a> Liquidation<'a> {
    fn new(env: &'a Env, config: &'a ProtocolConfig) -> Result<Self, Error> {
        let price = PriceProvider::new(env, config).price()?;
        let trove_manager = TroveManager::new(env, config)?;

        Ok(Self {
            env,
            config,
            price,
            mcr: trove_manager.mcr()?,
            trove_manager,
            sorted_troves: SortedTroves::new(env, config),
            stability_pool: StabilityPool::new(env, config)?,
        })
    }

    fn is_recovery_mode(&self) -> Result<bool, Error> {
        self.trove_manager.check_recovery_mode(self.price)
    }

    fn sequence_in_normal_mode(&mut self, n: u32) -> Result<LiquidationValues, Error> {
        let mut totals = LiquidationValues::default();
        let mut remaining_stable_in_sp = self.stability_pool.total_deposits();

        for _ in 0..n {
            let borrower = match self.sorted_troves.last() {
                Some(borrower) => borrower,
                None => break,
            };

            let icr = self.trove_manager.current_icr(&borrower, self.price)?;
            if icr >= self.mcr {
                break;
            }

            let single = self.liquidate_in_normal_mode(&borrower, remaining_stable_in_sp)?;
            remaining_stable_in_sp -= single.debt_to_offset;
            totals.add(&single)?;
        }

        Ok(totals)
    }

    /// Walks up from the riskiest trove. While the system is in recovery mode troves are
    /// liquidated by the recovery rules, once the running totals bring it back the walk
    /// continues under the normal rules. The highest trove is never reached.
    fn sequence_in_recovery_mode(&mut self, n: u32) -> Result<LiquidationValues, Error> {
        let mut totals = LiquidationValues::default();
        let mut remaining_stable_in_sp = self.stability_pool.total_deposits();
        let mut back_to_normal_mode = false;
        let mut system_debt = self.trove_manager.ledger.entire_system_debt()?;
        let mut system_coll = self.trove_manager.ledger.entire_system_coll()?;

        let first = self.sorted_troves.first();
        let mut current = self.sorted_troves.last();

        for _ in 0..n {
            let borrower = match current {
                Some(borrower) if Some(&borrower) != first.as_ref() => borrower,
                _ => break,
            };
            let next = self.sorted_troves.prev(&borrower);

            let icr = self.trove_manager.current_icr(&borrower, self.price)?;

            if !back_to_normal_mode {
                if icr >= self.mcr && remaining_stable_in_sp == 0 {
                    break;
                }

                let tcr = compute_cr(system_coll, system_debt, self.price)
                    .ok_or(Error::MathOverflowError)?;
                let single = self.liquidate_in_recovery_mode(
                    &borrower,
                    icr,
                    remaining_stable_in_sp,
                    tcr,
                )?;
                if single.is_empty() {
                    break;
                }

                remaining_stable_in_sp -= single.debt_to_offset;
                system_debt -= single.debt_to_offset;
                system_coll -= single.coll_to_send_to_sp
                    + single.coll_gas_compensation
                    + single.coll_surplus;
                totals.add(&single)?;

                back_to_normal_mode = !self.trove_manager.check_potential_recovery_mode(
                    system_coll,
                    system_debt,
                    self.price,
                )?;
            } else if icr < self.mcr {
                let single = self.liquidate_in_normal_mode(&borrower, remaining_stable_in_sp)?;
                remaining_stable_in_sp -= single.debt_to_offset;
                totals.add(&single)?;
            } else {
                break;
            }

            current = next;
        }

        Ok(totals)
    }

    fn batch_in_normal_mode(&mut self, borrowers: &Vec<Address>) -> Result<LiquidationValues, Error> {
        let mut totals = LiquidationValues::default();
        let mut remaining_stable_in_sp = self.stability_pool.total_deposits();

        for borrower in borrowers.iter() {
            if !self.trove_manager.trove(&borrower).is_active() {
                continue;
            }

            let icr = self.trove_manager.current_icr(&borrower, self.price)?;
            if icr < self.mcr {
                let single = self.liquidate_in_normal_mode(&borrower, remaining_stable_in_sp)?;
                remaining_stable_in_sp -= single.debt_to_offset;
                totals.add(&single)?;
            }
        }

        Ok(totals)
    }

    fn batch_in_recovery_mode(
        &mut self,
        borrowers: &Vec<Address>,
    ) -> Result<LiquidationValues, Error> {
        let mut totals = LiquidationValues::default();
        let mut remaining_stable_in_sp = self.stability_pool.total_deposits();
        let mut back_to_normal_mode = false;
        let mut system_debt = self.trove_manager.ledger.entire_system_debt()?;
        let mut system_coll = self.trove_manager.ledger.entire_system_coll()?;

        for borrower in borrowers.iter() {
            if !self.trove_manager.trove(&borrower).is_active() {
                continue;
            }

            let icr = self.trove_manager.current_icr(&borrower, self.price)?;

            if !back_to_normal_mode {
                if icr >= self.mcr && remaining_stable_in_sp == 0 {
                    continue;
                }

                let tcr = compute_cr(system_coll, system_debt, self.price)
                    .ok_or(Error::MathOverflowError)?;
                let single = self.liquidate_in_recovery_mode(
                    &borrower,
                    icr,
                    remaining_stable_in_sp,
                    tcr,
                )?;

                remaining_stable_in_sp -= single.debt_to_offset;
                system_debt -= single.debt_to_offset;
                system_coll -= single.coll_to_send_to_sp
                    + single.coll_gas_compensation
                    + single.coll_surplus;
                totals.add(&single)?;

                back_to_normal_mode = !self.trove_manager.check_potential_recovery_mode(
                    system_coll,
                    system_debt,
                    self.price,
                )?;
            } else if icr < self.mcr {
                let single = self.liquidate_in_normal_mode(&borrower, remaining_stable_in_sp)?;
                remaining_stable_in_sp -= single.debt_to_offset;
                totals.add(&single)?;
            }
        }

        Ok(totals)
    }

    fn liquidate_in_normal_mode(
        &mut self,
        borrower: &Address,
        stable_in_sp: i128,
    ) -> Result<LiquidationValues, Error> {
        let entire = self.trove_manager.entire_debt_and_coll(borrower)?;

        let coll_gas_compensation = coll_gas_compensation(entire.coll);
        let coll_to_liquidate = entire.coll - coll_gas_compensation;

        let (debt_to_offset, coll_to_send_to_sp, debt_to_redistribute, coll_to_redistribute) =
            offset_and_redistribution_vals(entire.debt, coll_to_liquidate, stable_in_sp)?;

        let values = LiquidationValues {
            entire_debt: entire.debt,
            entire_coll: entire.coll,
            coll_gas_compensation,
            stable_gas_compensation: self.config.gas_compensation,
            debt_to_offset,
            coll_to_send_to_sp,
            debt_to_redistribute,
            coll_to_redistribute,
            coll_surplus: 0,
        };

        self.close_liquidated(
            borrower,
            entire.pending_coll,
            entire.pending_debt,
            &values,
            TroveOperation::LiquidateInNormalMode,
        )?;

        Ok(values)
    }

    /// Empty values mean the trove is exempt from liquidation at this point
    fn liquidate_in_recovery_mode(
        &mut self,
        borrower: &Address,
        icr: i128,
        stable_in_sp: i128,
        tcr: i128,
    ) -> Result<LiquidationValues, Error> {
        if self.trove_manager.trove_owners_count() <= 1 {
            return Ok(LiquidationValues::default());
        }

        let entire = self.trove_manager.entire_debt_and_coll(borrower)?;

        let coll_gas_compensation = coll_gas_compensation(entire.coll);
        let coll_to_liquidate = entire.coll - coll_gas_compensation;

        let values = if icr <= FixedI128::DENOMINATOR {
            LiquidationValues {
                entire_debt: entire.debt,
                entire_coll: entire.coll,
                coll_gas_compensation,
                stable_gas_compensation: self.config.gas_compensation,
                debt_to_redistribute: entire.debt,
                coll_to_redistribute: coll_to_liquidate,
                ..Default::default()
            }
        } else if icr < self.mcr {
            let (debt_to_offset, coll_to_send_to_sp, debt_to_redistribute, coll_to_redistribute) =
                offset_and_redistribution_vals(entire.debt, coll_to_liquidate, stable_in_sp)?;

            LiquidationValues {
                entire_debt: entire.debt,
                entire_coll: entire.coll,
                coll_gas_compensation,
                stable_gas_compensation: self.config.gas_compensation,
                debt_to_offset,
                coll_to_send_to_sp,
                debt_to_redistribute,
                coll_to_redistribute,
                coll_surplus: 0,
            }
        } else if icr < tcr && entire.debt <= stable_in_sp {
            capped_offset_vals(
                entire.debt,
                entire.coll,
                self.price,
                self.mcr,
                self.config.gas_compensation,
            )?
        } else {
            return Ok(LiquidationValues::default());
        };

        self.close_liquidated(
            borrower,
            entire.pending_coll,
            entire.pending_debt,
            &values,
            TroveOperation::LiquidateInRecoveryMode,
        )?;

        self.trove_manager
            .account_surplus(borrower, values.coll_surplus)?;

        Ok(values)
    }

    fn close_liquidated(
        &mut self,
        borrower: &Address,
        pending_coll: i128,
        pending_debt: i128,
        values: &LiquidationValues,
        operation: TroveOperation,
    ) -> Result<(), Error> {
        self.trove_manager
            .move_pending_rewards_to_active(pending_coll, pending_debt)?;

        let mut trove = self.trove_manager.trove(borrower);
        self.trove_manager.remove_stake(&mut trove)?;
        self.trove_manager.close_trove(
            &mut self.sorted_troves,
            borrower,
            &mut trove,
            TroveStatus::ClosedByLiquidation,
        )?;

        event::trove_liquidated(
            self.env,
            borrower,
            values.entire_debt,
            values.entire_coll,
            operation,
        );
        event::trove_updated(self.env, borrower, 0, 0, 0, operation);

        Ok(())
    }

    /// Applies the aggregated outcome once and pays the liquidator
    fn finalize(mut self, liquidator: &Address, totals: &LiquidationValues) -> Result<(), Error> {
        assert_with_error!(self.env, totals.entire_debt > 0, Error::NothingToLiquidate);

        self.stability_pool.offset(
            &mut self.trove_manager.ledger,
            totals.debt_to_offset,
            totals.coll_to_send_to_sp,
        )?;
        self.trove_manager
            .redistribute_debt_and_coll(totals.debt_to_redistribute, totals.coll_to_redistribute)?;
        if totals.coll_surplus > 0 {
            self.trove_manager.ledger.move_to_surplus(totals.coll_surplus)?;
        }
        self.trove_manager
            .update_system_snapshots_exclude_coll_remainder(totals.coll_gas_compensation)?;

        event::liquidation(
            self.env,
            liquidator,
            totals.entire_debt,
            totals.liquidated_coll()?,
            totals.coll_gas_compensation,
            totals.stable_gas_compensation,
        );

        self.trove_manager
            .ledger
            .decrease_gas_pool(totals.stable_gas_compensation)?;
        self.trove_manager
            .ledger
            .decrease_active(totals.coll_gas_compensation, 0)?;

        self.trove_manager.write();
        self.stability_pool.write();

        let vault = Vault::new(self.env, self.config);
        vault.send_stable(liquidator, totals.stable_gas_compensation);
        vault.send_coll(liquidator, totals.coll_gas_compensation);

        Ok(())
    }
}
