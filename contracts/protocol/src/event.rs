use protocol_interface::types::trove::TroveOperation;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub(crate) fn initialized(e: &Env, admin: &Address) {
    let topics = (Symbol::new(e, "initialize"), admin.clone());
    e.events().publish(topics, ());
}

pub(crate) fn config_updated(e: &Env, mcr: u32, ccr: u32) {
    let topics = (Symbol::new(e, "config_updated"),);
    e.events().publish(topics, (mcr, ccr));
}

pub(crate) fn trove_updated(
    e: &Env,
    borrower: &Address,
    debt: i128,
    coll: i128,
    stake: i128,
    operation: TroveOperation,
) {
    let topics = (Symbol::new(e, "trove_updated"), borrower.clone());
    e.events().publish(topics, (debt, coll, stake, operation));
}

pub(crate) fn trove_liquidated(
    e: &Env,
    borrower: &Address,
    debt: i128,
    coll: i128,
    operation: TroveOperation,
) {
    let topics = (Symbol::new(e, "trove_liquidated"), borrower.clone());
    e.events().publish(topics, (debt, coll, operation));
}

pub(crate) fn liquidation(
    e: &Env,
    liquidator: &Address,
    liquidated_debt: i128,
    liquidated_coll: i128,
    coll_gas_compensation: i128,
    stable_gas_compensation: i128,
) {
    let topics = (Symbol::new(e, "liquidation"), liquidator.clone());
    e.events().publish(
        topics,
        (
            liquidated_debt,
            liquidated_coll,
            coll_gas_compensation,
            stable_gas_compensation,
        ),
    );
}

pub(crate) fn redemption(
    e: &Env,
    redeemer: &Address,
    attempted_amount: i128,
    actual_amount: i128,
    coll_sent: i128,
    coll_fee: i128,
) {
    let topics = (symbol_short!("redeem"), redeemer.clone());
    e.events().publish(
        topics,
        (attempted_amount, actual_amount, coll_sent, coll_fee),
    );
}

pub(crate) fn borrowing_fee_paid(e: &Env, borrower: &Address, fee: i128) {
    let topics = (Symbol::new(e, "borrowing_fee_paid"), borrower.clone());
    e.events().publish(topics, fee);
}

pub(crate) fn base_rate_updated(e: &Env, base_rate: i128) {
    let topics = (Symbol::new(e, "base_rate_updated"),);
    e.events().publish(topics, base_rate);
}

pub(crate) fn last_fee_op_time_updated(e: &Env, timestamp: u64) {
    let topics = (Symbol::new(e, "last_fee_op_time"),);
    e.events().publish(topics, timestamp);
}

pub(crate) fn l_terms_updated(e: &Env, l_coll: i128, l_debt: i128) {
    let topics = (Symbol::new(e, "l_terms_updated"),);
    e.events().publish(topics, (l_coll, l_debt));
}

pub(crate) fn total_stakes_updated(e: &Env, total_stakes: i128) {
    let topics = (Symbol::new(e, "total_stakes_updated"),);
    e.events().publish(topics, total_stakes);
}

pub(crate) fn system_snapshots_updated(
    e: &Env,
    total_stakes_snapshot: i128,
    total_collateral_snapshot: i128,
) {
    let topics = (Symbol::new(e, "system_snapshots"),);
    e.events()
        .publish(topics, (total_stakes_snapshot, total_collateral_snapshot));
}

pub(crate) fn p_updated(e: &Env, p: i128) {
    let topics = (symbol_short!("p_updated"),);
    e.events().publish(topics, p);
}

pub(crate) fn s_updated(e: &Env, s: i128, epoch: u64, scale: u64) {
    let topics = (symbol_short!("s_updated"),);
    e.events().publish(topics, (s, epoch, scale));
}

pub(crate) fn g_updated(e: &Env, g: i128, epoch: u64, scale: u64) {
    let topics = (symbol_short!("g_updated"),);
    e.events().publish(topics, (g, epoch, scale));
}

pub(crate) fn epoch_updated(e: &Env, epoch: u64) {
    let topics = (symbol_short!("epoch"),);
    e.events().publish(topics, epoch);
}

pub(crate) fn scale_updated(e: &Env, scale: u64) {
    let topics = (symbol_short!("scale"),);
    e.events().publish(topics, scale);
}

pub(crate) fn sp_deposits_updated(e: &Env, total_deposits: i128, coll: i128) {
    let topics = (Symbol::new(e, "sp_balances"),);
    e.events().publish(topics, (total_deposits, coll));
}

pub(crate) fn deposit_snapshot_updated(e: &Env, depositor: &Address, p: i128, s: i128, g: i128) {
    let topics = (Symbol::new(e, "deposit_snapshot"), depositor.clone());
    e.events().publish(topics, (p, s, g));
}

pub(crate) fn front_end_snapshot_updated(e: &Env, front_end: &Address, p: i128, g: i128) {
    let topics = (Symbol::new(e, "front_end_snapshot"), front_end.clone());
    e.events().publish(topics, (p, g));
}

pub(crate) fn user_deposit_changed(e: &Env, depositor: &Address, new_deposit: i128) {
    let topics = (Symbol::new(e, "deposit_changed"), depositor.clone());
    e.events().publish(topics, new_deposit);
}

pub(crate) fn front_end_stake_changed(e: &Env, front_end: &Address, new_stake: i128) {
    let topics = (Symbol::new(e, "front_end_stake"), front_end.clone());
    e.events().publish(topics, new_stake);
}

pub(crate) fn coll_gain_withdrawn(e: &Env, depositor: &Address, coll: i128, stable_loss: i128) {
    let topics = (Symbol::new(e, "coll_gain_withdrawn"), depositor.clone());
    e.events().publish(topics, (coll, stable_loss));
}

pub(crate) fn reward_paid_to_depositor(e: &Env, depositor: &Address, amount: i128) {
    let topics = (Symbol::new(e, "reward_to_depositor"), depositor.clone());
    e.events().publish(topics, amount);
}

pub(crate) fn reward_paid_to_front_end(e: &Env, front_end: &Address, amount: i128) {
    let topics = (Symbol::new(e, "reward_to_front_end"), front_end.clone());
    e.events().publish(topics, amount);
}

pub(crate) fn front_end_registered(e: &Env, front_end: &Address, kickback_rate: i128) {
    let topics = (Symbol::new(e, "front_end_registered"), front_end.clone());
    e.events().publish(topics, kickback_rate);
}

pub(crate) fn front_end_tag_set(e: &Env, depositor: &Address, front_end: &Address) {
    let topics = (Symbol::new(e, "front_end_tag_set"), depositor.clone());
    e.events().publish(topics, front_end.clone());
}

pub(crate) fn coll_surplus_updated(e: &Env, account: &Address, amount: i128) {
    let topics = (Symbol::new(e, "coll_surplus"), account.clone());
    e.events().publish(topics, amount);
}

pub(crate) fn collateral_claimed(e: &Env, account: &Address, amount: i128) {
    let topics = (Symbol::new(e, "collateral_claimed"), account.clone());
    e.events().publish(topics, amount);
}
