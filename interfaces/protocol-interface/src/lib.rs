#![no_std]

use soroban_sdk::{contractclient, contractspecfn, Address, Env, Vec};
use types::deposit::{Deposit, Snapshots};
use types::entire_debt_and_coll::EntireDebtAndColl;
use types::error::Error;
use types::fee_state::FeeState;
use types::front_end::FrontEnd;
use types::pool_ledger::PoolLedger;
use types::protocol_config::ProtocolConfig;
use types::redistribution_state::RedistributionState;
use types::sorted_troves::{Node, SortedTrovesData};
use types::stability_pool_state::StabilityPoolState;
use types::trove::Trove;

pub mod types;

pub struct Spec;

/// Interface for the stablecoin protocol
#[contractspecfn(name = "Spec", export = false)]
#[contractclient(name = "StablecoinProtocolClient")]
pub trait StablecoinProtocolTrait {
    fn initialize(env: Env, admin: Address, config: ProtocolConfig) -> Result<(), Error>;

    fn set_config(env: Env, config: ProtocolConfig) -> Result<(), Error>;

    fn config(env: Env) -> Result<ProtocolConfig, Error>;

    fn open_trove(
        env: Env,
        borrower: Address,
        max_fee_percentage: i128,
        coll: i128,
        stable_amount: i128,
        upper_hint: Option<Address>,
        lower_hint: Option<Address>,
    ) -> Result<(), Error>;

    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<(), Error>;

    fn close_trove(env: Env, borrower: Address) -> Result<(), Error>;

    fn claim_collateral(env: Env, who: Address) -> Result<(), Error>;

    fn provide_to_sp(
        env: Env,
        depositor: Address,
        amount: i128,
        front_end_tag: Option<Address>,
    ) -> Result<(), Error>;

    fn withdraw_from_sp(env: Env, depositor: Address, amount: i128) -> Result<(), Error>;

    fn withdraw_coll_gain_to_trove(
        env: Env,
        depositor: Address,
        upper_hint: Option<Address>,
        lower_hint: Option<Address>,
    ) -> Result<(), Error>;

    fn register_front_end(env: Env, front_end: Address, kickback_rate: i128)
        -> Result<(), Error>;

    fn liquidate(env: Env, liquidator: Address, borrower: Address) -> Result<(), Error>;

    fn liquidate_troves(env: Env, liquidator: Address, n: u32) -> Result<(), Error>;

    fn batch_liquidate_troves(
        env: Env,
        liquidator: Address,
        borrowers: Vec<Address>,
    ) -> Result<(), Error>;

    #[allow(clippy::too_many_arguments)]
    fn redeem_collateral(
        env: Env,
        redeemer: Address,
        amount: i128,
        first_hint: Option<Address>,
        upper_hint: Option<Address>,
        lower_hint: Option<Address>,
        max_iterations: u32,
        max_fee_percentage: i128,
    ) -> Result<(), Error>;

    fn trove(env: Env, borrower: Address) -> Trove;

    fn entire_debt_and_coll(env: Env, borrower: Address) -> Result<EntireDebtAndColl, Error>;

    fn current_icr(env: Env, borrower: Address) -> Result<i128, Error>;

    fn nominal_icr(env: Env, borrower: Address) -> Result<i128, Error>;

    fn tcr(env: Env) -> Result<i128, Error>;

    fn check_recovery_mode(env: Env) -> Result<bool, Error>;

    fn trove_owners_count(env: Env) -> u32;

    fn trove_from_owners_array(env: Env, index: u32) -> Option<Address>;

    fn redistribution_state(env: Env) -> Result<RedistributionState, Error>;

    fn pool_ledger(env: Env) -> Result<PoolLedger, Error>;

    fn fee_state(env: Env) -> Result<FeeState, Error>;

    fn borrowing_rate(env: Env) -> Result<i128, Error>;

    fn redemption_rate(env: Env) -> Result<i128, Error>;

    fn stability_pool_state(env: Env) -> Result<StabilityPoolState, Error>;

    fn epoch_to_scale_to_sum(env: Env, epoch: u64, scale: u64) -> i128;

    fn epoch_to_scale_to_g(env: Env, epoch: u64, scale: u64) -> i128;

    fn deposit(env: Env, depositor: Address) -> Option<Deposit>;

    fn deposit_snapshots(env: Env, depositor: Address) -> Option<Snapshots>;

    fn compounded_deposit(env: Env, depositor: Address) -> Result<i128, Error>;

    fn depositor_coll_gain(env: Env, depositor: Address) -> Result<i128, Error>;

    fn depositor_reward_gain(env: Env, depositor: Address) -> Result<i128, Error>;

    fn front_end(env: Env, front_end: Address) -> Option<FrontEnd>;

    fn compounded_front_end_stake(env: Env, front_end: Address) -> Result<i128, Error>;

    fn front_end_reward_gain(env: Env, front_end: Address) -> Result<i128, Error>;

    fn sorted_troves(env: Env) -> SortedTrovesData;

    fn sorted_troves_node(env: Env, id: Address) -> Option<Node>;

    fn find_insert_position(
        env: Env,
        nicr: i128,
        prev_id: Option<Address>,
        next_id: Option<Address>,
    ) -> Result<(Option<Address>, Option<Address>), Error>;

    fn coll_surplus(env: Env, account: Address) -> i128;
}
