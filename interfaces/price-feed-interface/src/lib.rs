//! Note, the PriceFeedTrait, and the PriceData are a SEP-40 compatible subset.
//! More details can be found at the following link:
//! https://github.com/stellar/stellar-protocol/blob/master/ecosystem/sep-0040.md

#![no_std]

use soroban_sdk::{contractclient, contractspecfn, Env};
use types::asset::Asset;
use types::price_data::PriceData;

pub mod types;

pub struct Spec;

/// Oracle feed interface description
#[contractspecfn(name = "Spec", export = false)]
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedTrait {
    /// Return the number of decimals for all assets quoted by the oracle
    fn decimals(env: Env) -> u32;

    /// Get the most recent price for an asset
    fn lastprice(env: Env, asset: Asset) -> Option<PriceData>;

    /// Sets the most recent price for a given asset. Note: not a SEP-40 method.
    fn set_price(env: Env, asset: Asset, price: i128);
}
