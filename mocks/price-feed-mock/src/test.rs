use crate::*;
use price_feed_interface::PriceFeedClient;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env, Symbol};

#[test]
fn should_return_last_set_price() {
    let e = Env::default();
    let client = PriceFeedClient::new(&e, &e.register_contract(None, PriceFeedMock));
    let asset = Asset::Stellar(Address::generate(&e));

    e.ledger().with_mut(|li| li.timestamp = 900);

    assert_eq!(client.decimals(), DECIMALS);
    assert!(client.lastprice(&asset).is_none());

    client.set_price(&asset, &200_00000000000000);
    client.set_price(&asset, &150_00000000000000);

    let price = client.lastprice(&asset).unwrap();
    assert_eq!(price.price, 150_00000000000000);
    assert_eq!(price.timestamp, 900);
}

#[test]
fn should_keep_assets_apart() {
    let e = Env::default();
    let client = PriceFeedClient::new(&e, &e.register_contract(None, PriceFeedMock));
    let stellar = Asset::Stellar(Address::generate(&e));
    let other = Asset::Other(Symbol::new(&e, "BTC"));

    client.set_price(&stellar, &1);
    client.set_price(&other, &2);

    assert_eq!(client.lastprice(&stellar).unwrap().price, 1);
    assert_eq!(client.lastprice(&other).unwrap().price, 2);
}
