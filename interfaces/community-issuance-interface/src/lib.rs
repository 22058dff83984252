#![no_std]

use soroban_sdk::{contractclient, contractspecfn, Address, Env};

pub struct Spec;

/// Time-decayed reward issuance consumed by the stability pool
#[contractspecfn(name = "Spec", export = false)]
#[contractclient(name = "CommunityIssuanceClient")]
pub trait CommunityIssuanceTrait {
    /// Issues the reward accrued since the previous call and returns its amount.
    /// Cumulative issuance is non-decreasing and bounded by the supply cap.
    ///
    /// # Panics
    ///
    /// Panics if the caller is not the stability pool
    fn issue_tokens(env: Env) -> i128;

    /// Transfers previously issued reward to `account`
    ///
    /// # Panics
    ///
    /// Panics if the caller is not the stability pool
    fn send_tokens(env: Env, account: Address, amount: i128);

    /// Returns total reward issued so far
    fn total_issued(env: Env) -> i128;
}
