#![no_std]

use soroban_sdk::{contractclient, contractspecfn, Address, Env, String};
pub struct Spec;

/// Interface for the protocol stablecoin. SEP-41 compatible with a minter-restricted `mint`.
#[contractspecfn(name = "Spec", export = false)]
#[contractclient(name = "StableTokenClient")]
pub trait StableTokenTrait {
    fn initialize(e: Env, minter: Address, decimal: u32, name: String, symbol: String);

    fn allowance(e: Env, from: Address, spender: Address) -> i128;

    fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32);

    fn balance(e: Env, id: Address) -> i128;

    fn transfer(e: Env, from: Address, to: Address, amount: i128);

    fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128);

    fn burn(e: Env, from: Address, amount: i128);

    fn burn_from(e: Env, spender: Address, from: Address, amount: i128);

    fn mint(e: Env, to: Address, amount: i128);

    fn decimals(e: Env) -> u32;

    fn name(e: Env) -> String;

    fn symbol(e: Env) -> String;

    fn total_supply(e: Env) -> i128;

    fn minter(e: Env) -> Address;
}
