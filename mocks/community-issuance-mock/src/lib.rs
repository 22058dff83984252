#![no_std]

mod storage;
#[cfg(test)]
mod test;

use common::{FixedI128, ISSUANCE_FACTOR, SECONDS_IN_ONE_MINUTE};
use community_issuance_interface::CommunityIssuanceTrait;
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env};

use crate::storage::*;

#[contract]
pub struct CommunityIssuanceMock;

#[contractimpl]
impl CommunityIssuanceMock {
    /// Starts the issuance schedule at the current ledger time.
    ///
    /// # Arguments
    ///
    /// - stability_pool - The only address allowed to issue and send rewards.
    /// - reward_token - Token held by this contract and paid out as reward.
    /// - supply_cap - Total amount issued as time goes to infinity.
    ///
    /// # Panics
    ///
    /// Panics if the contract has already been initialized.
    ///
    pub fn initialize(env: Env, stability_pool: Address, reward_token: Address, supply_cap: i128) {
        if read_state(&env).is_some() {
            panic!("community-issuance: already initialized");
        }

        write_state(
            &env,
            &IssuanceState {
                stability_pool,
                reward_token,
                supply_cap,
                deployment_time: env.ledger().timestamp(),
                total_issued: 0,
            },
        );
    }
}

#[contractimpl]
impl CommunityIssuanceTrait for CommunityIssuanceMock {
    fn issue_tokens(env: Env) -> i128 {
        let mut state = read_state(&env).expect("community-issuance: not initialized");
        state.stability_pool.require_auth();

        let minutes = (env.ledger().timestamp() - state.deployment_time) / SECONDS_IN_ONE_MINUTE;
        let remaining_fraction = FixedI128::from_inner(ISSUANCE_FACTOR)
            .decay_pow(minutes)
            .expect("community-issuance: no overflow");
        let issued_fraction = FixedI128::ONE
            .checked_sub(remaining_fraction)
            .expect("community-issuance: no overflow");
        let latest_total_issued = issued_fraction
            .mul_int(state.supply_cap)
            .expect("community-issuance: no overflow");

        let issuance = latest_total_issued - state.total_issued;
        state.total_issued = latest_total_issued;
        write_state(&env, &state);

        env.events()
            .publish((symbol_short!("issued"),), (issuance, latest_total_issued));

        issuance
    }

    fn send_tokens(env: Env, account: Address, amount: i128) {
        let state = read_state(&env).expect("community-issuance: not initialized");
        state.stability_pool.require_auth();

        if amount == 0 {
            return;
        }

        token::Client::new(&env, &state.reward_token).transfer(
            &env.current_contract_address(),
            &account,
            &amount,
        );
    }

    fn total_issued(env: Env) -> i128 {
        read_state(&env).map(|s| s.total_issued).unwrap_or(0)
    }
}
