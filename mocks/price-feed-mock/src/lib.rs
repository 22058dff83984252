#![no_std]

mod storage;
#[cfg(test)]
mod test;

use crate::storage::*;
use price_feed_interface::types::{asset::Asset, price_data::PriceData};
use price_feed_interface::PriceFeedTrait;
use soroban_sdk::{contract, contractimpl, Env};

pub const DECIMALS: u32 = 14;

#[contract]
pub struct PriceFeedMock;

#[contractimpl]
impl PriceFeedTrait for PriceFeedMock {
    fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    fn lastprice(env: Env, asset: Asset) -> Option<PriceData> {
        read_price(&env, &asset).map(|price| PriceData {
            price,
            timestamp: env.ledger().timestamp(),
        })
    }

    fn set_price(env: Env, asset: Asset, price: i128) {
        write_price(&env, &asset, price);
    }
}
