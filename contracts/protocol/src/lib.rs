#![no_std]

use methods::{
    adjust_trove::{adjust_trove, TroveAdjustment},
    claim_collateral::claim_collateral,
    close_trove::close_trove,
    initialize::{initialize, set_config},
    liquidate::{batch_liquidate_troves, liquidate, liquidate_troves},
    open_trove::open_trove,
    provide_to_sp::provide_to_sp,
    redeem_collateral::redeem_collateral,
    register_front_end::register_front_end,
    withdraw_coll_gain_to_trove::withdraw_coll_gain_to_trove,
    withdraw_from_sp::withdraw_from_sp,
};
use protocol_interface::types::{
    deposit::{Deposit, Snapshots},
    entire_debt_and_coll::EntireDebtAndColl,
    error::Error,
    fee_state::FeeState,
    front_end::FrontEnd,
    pool_ledger::PoolLedger,
    protocol_config::ProtocolConfig,
    redistribution_state::RedistributionState,
    sorted_troves::{Node, SortedTrovesData},
    stability_pool_state::StabilityPoolState,
    trove::Trove,
};
use protocol_interface::StablecoinProtocolTrait;
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

use crate::storage::*;
use crate::types::base_rate::BaseRate;
use crate::types::price_provider::PriceProvider;
use crate::types::sorted_troves::SortedTroves;
use crate::types::stability_pool::StabilityPool;
use crate::types::trove_manager::TroveManager;

mod event;
mod methods;
mod storage;
#[cfg(test)]
mod tests;
mod types;

#[contract]
pub struct StablecoinProtocol;

#[contractimpl]
impl StablecoinProtocolTrait for StablecoinProtocol {
    fn initialize(env: Env, admin: Address, config: ProtocolConfig) -> Result<(), Error> {
        initialize(&env, &admin, &config)
    }

    fn set_config(env: Env, config: ProtocolConfig) -> Result<(), Error> {
        set_config(&env, &config)
    }

    fn config(env: Env) -> Result<ProtocolConfig, Error> {
        read_config(&env)
    }

    fn open_trove(
        env: Env,
        borrower: Address,
        max_fee_percentage: i128,
        coll: i128,
        stable_amount: i128,
        upper_hint: Option<Address>,
        lower_hint: Option<Address>,
    ) -> Result<(), Error> {
        open_trove(
            &env,
            &borrower,
            max_fee_percentage,
            coll,
            stable_amount,
            upper_hint,
            lower_hint,
        )
    }

    fn adjust_trove(
        env: Env,
        borrower: Address,
        max_fee_percentage: i128,
        coll_deposit: i128,
        coll_withdrawal: i128,
        debt_change: i128,
        is_debt_increase: bool,
        upper_hint: Option<Address>,
        lower_hint: Option<Address>,
    ) -> Result<(), Error> {
        adjust_trove(
            &env,
            &borrower,
            &TroveAdjustment {
                max_fee_percentage,
                coll_deposit,
                coll_withdrawal,
                debt_change,
                is_debt_increase,
            },
            upper_hint,
            lower_hint,
        )
    }

    fn close_trove(env: Env, borrower: Address) -> Result<(), Error> {
        close_trove(&env, &borrower)
    }

    fn claim_collateral(env: Env, who: Address) -> Result<(), Error> {
        claim_collateral(&env, &who)
    }

    fn provide_to_sp(
        env: Env,
        depositor: Address,
        amount: i128,
        front_end_tag: Option<Address>,
    ) -> Result<(), Error> {
        provide_to_sp(&env, &depositor, amount, front_end_tag)
    }

    fn withdraw_from_sp(env: Env, depositor: Address, amount: i128) -> Result<(), Error> {
        withdraw_from_sp(&env, &depositor, amount)
    }

    fn withdraw_coll_gain_to_trove(
        env: Env,
        depositor: Address,
        upper_hint: Option<Address>,
        lower_hint: Option<Address>,
    ) -> Result<(), Error> {
        withdraw_coll_gain_to_trove(&env, &depositor, upper_hint, lower_hint)
    }

    fn register_front_end(
        env: Env,
        front_end: Address,
        kickback_rate: i128,
    ) -> Result<(), Error> {
        register_front_end(&env, &front_end, kickback_rate)
    }

    fn liquidate(env: Env, liquidator: Address, borrower: Address) -> Result<(), Error> {
        liquidate(&env, &liquidator, &borrower)
    }

    fn liquidate_troves(env: Env, liquidator: Address, n: u32) -> Result<(), Error> {
        liquidate_troves(&env, &liquidator, n)
    }

    fn batch_liquidate_troves(
        env: Env,
        liquidator: Address,
        borrowers: Vec<Address>,
    ) -> Result<(), Error> {
        batch_liquidate_troves(&env, &liquidator, &borrowers)
    }

    fn redeem_collateral(
        env: Env,
        redeemer: Address,
        amount: i128,
        first_hint: Option<Address>,
        upper_hint: Option<Address>,
        lower_hint: Option<Address>,
        max_iterations: u32,
        max_fee_percentage: i128,
    ) -> Result<(), Error> {
        redeem_collateral(
            &env,
            &redeemer,
            amount,
            first_hint,
            upper_hint,
            lower_hint,
            max_iterations,
            max_fee_percentage,
        )
    }

    fn trove(env: Env, borrower: Address) -> Trove {
        read_trove(&env, &borrower)
    }

    fn entire_debt_and_coll(env: Env, borrower: Address) -> Result<EntireDebtAndColl, Error> {
        let config = read_config(&env)?;
        TroveManager::new(&env, &config)?.entire_debt_and_coll(&borrower)
    }

    fn current_icr(env: Env, borrower: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        let price = PriceProvider::new(&env, &config).price()?;
        TroveManager::new(&env, &config)?.current_icr(&borrower, price)
    }

    fn nominal_icr(env: Env, borrower: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        TroveManager::new(&env, &config)?.nominal_icr(&borrower)
    }

    fn tcr(env: Env) -> Result<i128, Error> {
        let config = read_config(&env)?;
        let price = PriceProvider::new(&env, &config).price()?;
        TroveManager::new(&env, &config)?.tcr(price)
    }

    fn check_recovery_mode(env: Env) -> Result<bool, Error> {
        let config = read_config(&env)?;
        let price = PriceProvider::new(&env, &config).price()?;
        TroveManager::new(&env, &config)?.check_recovery_mode(price)
    }

    fn trove_owners_count(env: Env) -> u32 {
        read_trove_owners_count(&env)
    }

    fn trove_from_owners_array(env: Env, index: u32) -> Option<Address> {
        read_trove_owner(&env, index)
    }

    fn redistribution_state(env: Env) -> Result<RedistributionState, Error> {
        read_redistribution_state(&env)
    }

    fn pool_ledger(env: Env) -> Result<PoolLedger, Error> {
        read_pool_ledger(&env)
    }

    fn fee_state(env: Env) -> Result<FeeState, Error> {
        read_fee_state(&env)
    }

    fn borrowing_rate(env: Env) -> Result<i128, Error> {
        let config = read_config(&env)?;
        BaseRate::new(&env, &config)?.borrowing_rate_with_decay()
    }

    fn redemption_rate(env: Env) -> Result<i128, Error> {
        let config = read_config(&env)?;
        BaseRate::new(&env, &config)?.redemption_rate_with_decay()
    }

    fn stability_pool_state(env: Env) -> Result<StabilityPoolState, Error> {
        read_stability_pool_state(&env)
    }

    fn epoch_to_scale_to_sum(env: Env, epoch: u64, scale: u64) -> i128 {
        read_epoch_scale_sum(&env, epoch, scale)
    }

    fn epoch_to_scale_to_g(env: Env, epoch: u64, scale: u64) -> i128 {
        read_epoch_scale_g(&env, epoch, scale)
    }

    fn deposit(env: Env, depositor: Address) -> Option<Deposit> {
        read_deposit(&env, &depositor)
    }

    fn deposit_snapshots(env: Env, depositor: Address) -> Option<Snapshots> {
        read_deposit_snapshots(&env, &depositor)
    }

    fn compounded_deposit(env: Env, depositor: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        StabilityPool::new(&env, &config)?.compounded_deposit(&depositor)
    }

    fn depositor_coll_gain(env: Env, depositor: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        StabilityPool::new(&env, &config)?.depositor_coll_gain(&depositor)
    }

    fn depositor_reward_gain(env: Env, depositor: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        StabilityPool::new(&env, &config)?.depositor_reward_gain(&depositor)
    }

    fn front_end(env: Env, front_end: Address) -> Option<FrontEnd> {
        read_front_end(&env, &front_end)
    }

    fn compounded_front_end_stake(env: Env, front_end: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        StabilityPool::new(&env, &config)?.compounded_front_end_stake(&front_end)
    }

    fn front_end_reward_gain(env: Env, front_end: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        StabilityPool::new(&env, &config)?.front_end_reward_gain(&front_end)
    }

    fn sorted_troves(env: Env) -> SortedTrovesData {
        read_sorted_troves_data(&env)
    }

    fn sorted_troves_node(env: Env, id: Address) -> Option<Node> {
        read_node(&env, &id)
    }

    fn find_insert_position(
        env: Env,
        nicr: i128,
        prev_id: Option<Address>,
        next_id: Option<Address>,
    ) -> Result<(Option<Address>, Option<Address>), Error> {
        let config = read_config(&env)?;
        let trove_manager = TroveManager::new(&env, &config)?;

        SortedTroves::new(&env, &config).find_insert_position(
            nicr,
            prev_id,
            next_id,
            &|id: &Address| trove_manager.nominal_icr(id),
        )
    }

    fn coll_surplus(env: Env, account: Address) -> i128 {
        read_coll_surplus(&env, &account)
    }
}
