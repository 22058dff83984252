use protocol_interface::types::deposit::{Deposit, Snapshots};
use protocol_interface::types::error::Error;
use protocol_interface::types::fee_state::FeeState;
use protocol_interface::types::front_end::FrontEnd;
use protocol_interface::types::pool_ledger::PoolLedger;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::redistribution_state::RedistributionState;
use protocol_interface::types::sorted_troves::{Node, SortedTrovesData};
use protocol_interface::types::stability_pool_state::StabilityPoolState;
use protocol_interface::types::trove::{RewardSnapshot, Trove};
use soroban_sdk::{contracttype, Address, Env, IntoVal, TryFromVal, Val};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;

pub(crate) const LOW_USER_DATA_BUMP_LEDGERS: u32 = 10 * DAY_IN_LEDGERS; // 10 days
pub(crate) const HIGH_USER_DATA_BUMP_LEDGERS: u32 = 20 * DAY_IN_LEDGERS; // 20 days

pub(crate) const LOW_INSTANCE_BUMP_LEDGERS: u32 = DAY_IN_LEDGERS; // 1 day
pub(crate) const HIGH_INSTANCE_BUMP_LEDGERS: u32 = 7 * DAY_IN_LEDGERS; // 7 days

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Config,
    DeploymentTime,
    StabilityPool,
    Redistribution,
    FeeState,
    PoolLedger,
    SortedTroves,
    TroveOwnersCount,
    TroveOwner(u32),
    Trove(Address),
    RewardSnapshot(Address),
    Node(Address),
    Deposit(Address),
    DepositSnapshots(Address),
    FrontEnd(Address),
    FrontEndStake(Address),
    FrontEndSnapshots(Address),
    EpochScaleSum(u64, u64),
    EpochScaleG(u64, u64),
    CollSurplus(Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LOW_INSTANCE_BUMP_LEDGERS, HIGH_INSTANCE_BUMP_LEDGERS);
}

fn read_instance<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    bump_instance(env);
    env.storage().instance().get(key)
}

fn write_instance<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    bump_instance(env);
    env.storage().instance().set(key, value);
}

fn read_persistent<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);

    if value.is_some() {
        env.storage().persistent().extend_ttl(
            key,
            LOW_USER_DATA_BUMP_LEDGERS,
            HIGH_USER_DATA_BUMP_LEDGERS,
        );
    }

    value
}

fn write_persistent<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    env.storage().persistent().extend_ttl(
        key,
        LOW_USER_DATA_BUMP_LEDGERS,
        HIGH_USER_DATA_BUMP_LEDGERS,
    );
}

fn remove_persistent(env: &Env, key: &DataKey) {
    env.storage().persistent().remove(key);
}

pub fn has_admin(env: &Env) -> bool {
    bump_instance(env);
    env.storage().instance().has(&DataKey::Admin)
}

pub fn write_admin(env: &Env, admin: &Address) {
    write_instance(env, &DataKey::Admin, admin);
}

pub fn read_admin(env: &Env) -> Result<Address, Error> {
    read_instance(env, &DataKey::Admin).ok_or(Error::Uninitialized)
}

pub fn write_config(env: &Env, config: &ProtocolConfig) {
    write_instance(env, &DataKey::Config, config);
}

pub fn read_config(env: &Env) -> Result<ProtocolConfig, Error> {
    read_instance(env, &DataKey::Config).ok_or(Error::Uninitialized)
}

pub fn write_deployment_time(env: &Env, timestamp: u64) {
    write_instance(env, &DataKey::DeploymentTime, &timestamp);
}

pub fn read_deployment_time(env: &Env) -> Result<u64, Error> {
    read_instance(env, &DataKey::DeploymentTime).ok_or(Error::Uninitialized)
}

pub fn write_stability_pool_state(env: &Env, state: &StabilityPoolState) {
    write_instance(env, &DataKey::StabilityPool, state);
}

pub fn read_stability_pool_state(env: &Env) -> Result<StabilityPoolState, Error> {
    read_instance(env, &DataKey::StabilityPool).ok_or(Error::Uninitialized)
}

pub fn write_redistribution_state(env: &Env, state: &RedistributionState) {
    write_instance(env, &DataKey::Redistribution, state);
}

pub fn read_redistribution_state(env: &Env) -> Result<RedistributionState, Error> {
    read_instance(env, &DataKey::Redistribution).ok_or(Error::Uninitialized)
}

pub fn write_fee_state(env: &Env, state: &FeeState) {
    write_instance(env, &DataKey::FeeState, state);
}

pub fn read_fee_state(env: &Env) -> Result<FeeState, Error> {
    read_instance(env, &DataKey::FeeState).ok_or(Error::Uninitialized)
}

pub fn write_pool_ledger(env: &Env, ledger: &PoolLedger) {
    write_instance(env, &DataKey::PoolLedger, ledger);
}

pub fn read_pool_ledger(env: &Env) -> Result<PoolLedger, Error> {
    read_instance(env, &DataKey::PoolLedger).ok_or(Error::Uninitialized)
}

pub fn write_sorted_troves_data(env: &Env, data: &SortedTrovesData) {
    write_instance(env, &DataKey::SortedTroves, data);
}

pub fn read_sorted_troves_data(env: &Env) -> SortedTrovesData {
    read_instance(env, &DataKey::SortedTroves).unwrap_or_default()
}

pub fn read_trove_owners_count(env: &Env) -> u32 {
    read_instance(env, &DataKey::TroveOwnersCount).unwrap_or(0)
}

pub fn write_trove_owners_count(env: &Env, count: u32) {
    write_instance(env, &DataKey::TroveOwnersCount, &count);
}

pub fn read_trove_owner(env: &Env, index: u32) -> Option<Address> {
    read_persistent(env, &DataKey::TroveOwner(index))
}

pub fn write_trove_owner(env: &Env, index: u32, owner: &Address) {
    write_persistent(env, &DataKey::TroveOwner(index), owner);
}

pub fn remove_trove_owner(env: &Env, index: u32) {
    remove_persistent(env, &DataKey::TroveOwner(index));
}

/// Troves never opened read as a `NonExistent` record
pub fn read_trove(env: &Env, borrower: &Address) -> Trove {
    read_persistent(env, &DataKey::Trove(borrower.clone())).unwrap_or_else(Trove::nonexistent)
}

pub fn write_trove(env: &Env, borrower: &Address, trove: &Trove) {
    write_persistent(env, &DataKey::Trove(borrower.clone()), trove);
}

pub fn read_reward_snapshot(env: &Env, borrower: &Address) -> RewardSnapshot {
    read_persistent(env, &DataKey::RewardSnapshot(borrower.clone())).unwrap_or_default()
}

pub fn write_reward_snapshot(env: &Env, borrower: &Address, snapshot: &RewardSnapshot) {
    write_persistent(env, &DataKey::RewardSnapshot(borrower.clone()), snapshot);
}

pub fn remove_reward_snapshot(env: &Env, borrower: &Address) {
    remove_persistent(env, &DataKey::RewardSnapshot(borrower.clone()));
}

pub fn has_node(env: &Env, id: &Address) -> bool {
    env.storage().persistent().has(&DataKey::Node(id.clone()))
}

pub fn read_node(env: &Env, id: &Address) -> Option<Node> {
    read_persistent(env, &DataKey::Node(id.clone()))
}

pub fn write_node(env: &Env, id: &Address, node: &Node) {
    write_persistent(env, &DataKey::Node(id.clone()), node);
}

pub fn remove_node(env: &Env, id: &Address) {
    remove_persistent(env, &DataKey::Node(id.clone()));
}

pub fn read_deposit(env: &Env, depositor: &Address) -> Option<Deposit> {
    read_persistent(env, &DataKey::Deposit(depositor.clone()))
}

pub fn write_deposit(env: &Env, depositor: &Address, deposit: &Deposit) {
    write_persistent(env, &DataKey::Deposit(depositor.clone()), deposit);
}

pub fn remove_deposit(env: &Env, depositor: &Address) {
    remove_persistent(env, &DataKey::Deposit(depositor.clone()));
}

pub fn read_deposit_snapshots(env: &Env, depositor: &Address) -> Option<Snapshots> {
    read_persistent(env, &DataKey::DepositSnapshots(depositor.clone()))
}

pub fn write_deposit_snapshots(env: &Env, depositor: &Address, snapshots: &Snapshots) {
    write_persistent(env, &DataKey::DepositSnapshots(depositor.clone()), snapshots);
}

pub fn remove_deposit_snapshots(env: &Env, depositor: &Address) {
    remove_persistent(env, &DataKey::DepositSnapshots(depositor.clone()));
}

pub fn read_front_end(env: &Env, front_end: &Address) -> Option<FrontEnd> {
    read_persistent(env, &DataKey::FrontEnd(front_end.clone()))
}

pub fn write_front_end(env: &Env, front_end: &Address, data: &FrontEnd) {
    write_persistent(env, &DataKey::FrontEnd(front_end.clone()), data);
}

pub fn read_front_end_stake(env: &Env, front_end: &Address) -> i128 {
    read_persistent(env, &DataKey::FrontEndStake(front_end.clone())).unwrap_or(0)
}

pub fn write_front_end_stake(env: &Env, front_end: &Address, stake: i128) {
    write_persistent(env, &DataKey::FrontEndStake(front_end.clone()), &stake);
}

pub fn read_front_end_snapshots(env: &Env, front_end: &Address) -> Option<Snapshots> {
    read_persistent(env, &DataKey::FrontEndSnapshots(front_end.clone()))
}

pub fn write_front_end_snapshots(env: &Env, front_end: &Address, snapshots: &Snapshots) {
    write_persistent(env, &DataKey::FrontEndSnapshots(front_end.clone()), snapshots);
}

pub fn remove_front_end_snapshots(env: &Env, front_end: &Address) {
    remove_persistent(env, &DataKey::FrontEndSnapshots(front_end.clone()));
}

pub fn read_epoch_scale_sum(env: &Env, epoch: u64, scale: u64) -> i128 {
    read_persistent(env, &DataKey::EpochScaleSum(epoch, scale)).unwrap_or(0)
}

pub fn write_epoch_scale_sum(env: &Env, epoch: u64, scale: u64, sum: i128) {
    write_persistent(env, &DataKey::EpochScaleSum(epoch, scale), &sum);
}

pub fn read_epoch_scale_g(env: &Env, epoch: u64, scale: u64) -> i128 {
    read_persistent(env, &DataKey::EpochScaleG(epoch, scale)).unwrap_or(0)
}

pub fn write_epoch_scale_g(env: &Env, epoch: u64, scale: u64, g: i128) {
    write_persistent(env, &DataKey::EpochScaleG(epoch, scale), &g);
}

pub fn read_coll_surplus(env: &Env, account: &Address) -> i128 {
    read_persistent(env, &DataKey::CollSurplus(account.clone())).unwrap_or(0)
}

pub fn write_coll_surplus(env: &Env, account: &Address, amount: i128) {
    if amount == 0 {
        remove_persistent(env, &DataKey::CollSurplus(account.clone()));
    } else {
        write_persistent(env, &DataKey::CollSurplus(account.clone()), &amount);
    }
}
