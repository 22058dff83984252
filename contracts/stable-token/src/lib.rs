#![no_std]

use crate::balance::*;
use crate::storage::*;
use soroban_sdk::{contract, contractimpl, Address, Env, String};
use soroban_token_sdk::metadata::TokenMetadata;
use stable_token_interface::StableTokenTrait;

mod balance;
mod event;
mod storage;
#[cfg(test)]
mod test;

#[contract]
pub struct StableToken;

#[contractimpl]
impl StableTokenTrait for StableToken {
    /// Initializes the stablecoin contract.
    ///
    /// # Arguments
    ///
    /// - minter - The address allowed to mint, the protocol contract.
    /// - decimal - The number of decimals of the token.
    /// - name - The name of the token.
    /// - symbol - The symbol of the token.
    ///
    /// # Panics
    ///
    /// Panics if the specified decimal value exceeds the maximum value of u8.
    /// Panics if the contract has already been initialized.
    /// Panics if name or symbol is empty
    ///
    fn initialize(e: Env, minter: Address, decimal: u32, name: String, symbol: String) {
        if decimal > u8::MAX.into() {
            panic!("stable-token: decimal must fit in a u8");
        }

        if name.len() == 0 {
            panic!("stable-token: no name");
        }

        if symbol.len() == 0 {
            panic!("stable-token: no symbol");
        }

        if has_minter(&e) {
            panic!("stable-token: already initialized");
        }

        write_minter(&e, &minter);
        write_metadata(
            &e,
            TokenMetadata {
                decimal,
                name: name.clone(),
                symbol: symbol.clone(),
            },
        );

        event::initialized(&e, &minter, decimal, name, symbol);
    }

    /// Returns the amount of tokens that the `spender` is allowed to withdraw from the `from` address.
    fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        read_allowance(&e, &from, &spender).amount
    }

    /// Set the allowance for a spender to withdraw from the `from` address by a specified amount of tokens.
    ///
    /// # Arguments
    ///
    /// - from - The address of the token owner.
    /// - spender - The address of the spender.
    /// - amount - The amount of tokens the spender may transfer.
    /// - expiration_ledger - The ledger when allowance will be expired.
    ///
    /// # Panics
    ///
    /// Panics if the caller is not authorized.
    /// Panics if the amount is negative.
    ///
    fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        require_nonnegative_amount(amount);

        write_allowance(&e, &from, &spender, amount, expiration_ledger);
        event::approve(&e, from, spender, amount, expiration_ledger);
    }

    fn balance(e: Env, id: Address) -> i128 {
        read_balance(&e, &id)
    }

    /// Transfers a specified amount of tokens from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if the caller (`from`) is not authorized.
    /// Panics if the amount is not positive or exceeds the balance.
    ///
    fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        require_positive_amount(amount);

        do_transfer(&e, from, to, amount);
    }

    /// Transfers tokens from `from` to `to` using the allowance granted to `spender`.
    ///
    /// # Panics
    ///
    /// Panics if the spender is not authorized.
    /// Panics if the spender is not allowed to spend `amount`.
    /// Panics if the amount is not positive.
    ///
    fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        require_positive_amount(amount);
        spend_allowance(&e, &from, &spender, amount);

        do_transfer(&e, from, to, amount);
    }

    /// Burns `amount` tokens of `from`.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not authorized.
    /// Panics if the amount is not positive or exceeds the balance.
    ///
    fn burn(e: Env, from: Address, amount: i128) {
        from.require_auth();
        require_positive_amount(amount);

        do_burn(&e, from, amount);
    }

    fn burn_from(e: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        require_positive_amount(amount);
        spend_allowance(&e, &from, &spender, amount);

        do_burn(&e, from, amount);
    }

    /// Mints `amount` tokens to `to`.
    ///
    /// # Panics
    ///
    /// Panics if the caller is not the minter.
    /// Panics if the amount is not positive.
    ///
    fn mint(e: Env, to: Address, amount: i128) {
        let minter = read_minter(&e);
        minter.require_auth();
        require_positive_amount(amount);

        receive_balance(&e, &to, amount);
        add_total_supply(&e, amount);

        event::mint(&e, minter, to, amount);
    }

    fn decimals(e: Env) -> u32 {
        read_decimal(&e)
    }

    fn name(e: Env) -> String {
        read_name(&e)
    }

    fn symbol(e: Env) -> String {
        read_symbol(&e)
    }

    fn total_supply(e: Env) -> i128 {
        read_total_supply(&e)
    }

    fn minter(e: Env) -> Address {
        read_minter(&e)
    }
}

fn do_transfer(e: &Env, from: Address, to: Address, amount: i128) {
    spend_balance(e, &from, amount);
    receive_balance(e, &to, amount);

    event::transfer(e, from, to, amount)
}

fn do_burn(e: &Env, from: Address, amount: i128) {
    spend_balance(e, &from, amount);
    add_total_supply(e, amount.checked_neg().expect("stable-token: no overflow"));

    event::burn(e, from, amount);
}

fn spend_allowance(e: &Env, from: &Address, spender: &Address, amount: i128) {
    let allowance = read_allowance(e, from, spender);
    if allowance.amount < amount {
        panic!("stable-token: insufficient allowance");
    }
    write_allowance(
        e,
        from,
        spender,
        allowance.amount - amount,
        allowance.expiration_ledger,
    );
}
