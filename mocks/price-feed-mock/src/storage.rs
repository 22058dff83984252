use price_feed_interface::types::asset::Asset;
use soroban_sdk::{contracttype, Env};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Price(Asset),
}

pub fn write_price(env: &Env, asset: &Asset, price: i128) {
    env.storage()
        .instance()
        .set(&DataKey::Price(asset.clone()), &price);
}

pub fn read_price(env: &Env, asset: &Asset) -> Option<i128> {
    env.storage().instance().get(&DataKey::Price(asset.clone()))
}
