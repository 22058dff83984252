#![cfg(test)]
extern crate std;

use crate::*;
use common::FixedI128;
use price_feed_interface::types::asset::Asset;
use price_feed_interface::PriceFeedClient;
use protocol_interface::StablecoinProtocolClient;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::Client as TokenClient;
use soroban_sdk::token::StellarAssetClient as TokenAdminClient;
use soroban_sdk::IntoVal;
use stable_token_interface::StableTokenClient;

pub const DAY: u64 = 24 * 60 * 60;

/// One whole token with 7 decimals
pub const UNIT: i128 = 10_000_000;
pub const PRICE_DECIMALS: u32 = 14;
pub const MAX_FEE: i128 = FixedI128::DENOMINATOR;
pub const GAS_COMPENSATION: i128 = 200 * UNIT;
pub const MIN_NET_DEBT: i128 = 1_800 * UNIT;
pub const REWARD_SUPPLY_CAP: i128 = 32_000_000 * UNIT;

pub(crate) struct Sut<'a> {
    pub protocol: StablecoinProtocolClient<'a>,
    pub stable_token: TokenClient<'a>,
    pub collateral: TokenClient<'a>,
    pub collateral_admin: TokenAdminClient<'a>,
    pub reward_token: TokenClient<'a>,
    pub price_feed: PriceFeedClient<'a>,
    pub admin: Address,
    pub treasury: Address,
}

impl<'a> Sut<'a> {
    /// Sets the collateral price in whole stablecoins
    pub fn set_price(&self, price: i128) {
        self.price_feed.set_price(
            &Asset::Stellar(self.collateral.address.clone()),
            &(price * 10i128.pow(PRICE_DECIMALS)),
        );
    }

    /// Sets the collateral price in feed units of `PRICE_DECIMALS`
    pub fn set_feed_price(&self, price: i128) {
        self.price_feed
            .set_price(&Asset::Stellar(self.collateral.address.clone()), &price);
    }

    pub fn config(&self) -> ProtocolConfig {
        self.protocol.config()
    }

    /// Mints collateral to `borrower` and opens a trove borrowing `stable_amount`
    pub fn open_trove(&self, borrower: &Address, coll: i128, stable_amount: i128) {
        self.collateral_admin.mint(borrower, &coll);
        self.protocol
            .open_trove(borrower, &MAX_FEE, &coll, &stable_amount, &None, &None);
    }

    pub fn provide_to_sp(&self, depositor: &Address, amount: i128) {
        self.protocol.provide_to_sp(depositor, &amount, &None);
    }

    pub fn stable_balance(&self, who: &Address) -> i128 {
        self.stable_token.balance(who)
    }

    pub fn coll_balance(&self, who: &Address) -> i128 {
        self.collateral.balance(who)
    }
}

pub(crate) fn create_token_contract<'a>(
    e: &Env,
    admin: &Address,
) -> (TokenClient<'a>, TokenAdminClient<'a>) {
    let stellar_asset_contract = e.register_stellar_asset_contract(admin.clone());

    (
        TokenClient::new(e, &stellar_asset_contract),
        TokenAdminClient::new(e, &stellar_asset_contract),
    )
}

pub(crate) fn create_stable_token_contract<'a>(e: &Env, minter: &Address) -> TokenClient<'a> {
    let address = e.register_contract(None, stable_token::StableToken);

    StableTokenClient::new(e, &address).initialize(
        minter,
        &7,
        &"Stablecoin".into_val(e),
        &"STBL".into_val(e),
    );

    TokenClient::new(e, &address)
}

pub(crate) fn create_community_issuance_contract<'a>(
    e: &Env,
    stability_pool: &Address,
    token_admin: &Address,
) -> (Address, TokenClient<'a>) {
    let (reward_token, reward_token_admin) = create_token_contract(e, token_admin);

    let issuance = e.register_contract(None, community_issuance_mock::CommunityIssuanceMock);
    community_issuance_mock::CommunityIssuanceMockClient::new(e, &issuance).initialize(
        stability_pool,
        &reward_token.address,
        &REWARD_SUPPLY_CAP,
    );
    reward_token_admin.mint(&issuance, &REWARD_SUPPLY_CAP);

    (issuance, reward_token)
}

pub(crate) fn default_config(
    stable_token: &Address,
    collateral_token: &Address,
    price_feed: &Address,
    community_issuance: &Address,
    treasury: &Address,
) -> ProtocolConfig {
    ProtocolConfig {
        stable_token: stable_token.clone(),
        collateral_token: collateral_token.clone(),
        price_feed: price_feed.clone(),
        community_issuance: community_issuance.clone(),
        treasury: treasury.clone(),
        mcr: 11_000,
        ccr: 15_000,
        gas_compensation: GAS_COMPENSATION,
        min_net_debt: MIN_NET_DEBT,
        borrowing_fee_floor: 50,
        max_borrowing_fee: 500,
        redemption_fee_floor: 50,
        sorted_troves_max_size: 1_000,
        max_hint_traversal: 100,
        redemption_bootstrap_period: 0,
    }
}

pub(crate) fn init_protocol<'a>(env: &Env) -> Sut<'a> {
    env.budget().reset_unlimited();
    env.ledger().with_mut(|li| li.timestamp = 0);

    let admin = Address::generate(env);
    let token_admin = Address::generate(env);
    let treasury = Address::generate(env);

    let protocol = StablecoinProtocolClient::new(env, &env.register_contract(None, StablecoinProtocol));

    let stable_token = create_stable_token_contract(env, &protocol.address);
    let (collateral, collateral_admin) = create_token_contract(env, &token_admin);
    let (community_issuance, reward_token) =
        create_community_issuance_contract(env, &protocol.address, &token_admin);
    let price_feed = PriceFeedClient::new(
        env,
        &env.register_contract(None, price_feed_mock::PriceFeedMock),
    );

    protocol.initialize(
        &admin,
        &default_config(
            &stable_token.address,
            &collateral.address,
            &price_feed.address,
            &community_issuance,
            &treasury,
        ),
    );

    let sut = Sut {
        protocol,
        stable_token,
        collateral,
        collateral_admin,
        reward_token,
        price_feed,
        admin,
        treasury,
    };

    sut.set_price(200);

    sut
}

/// Two troves at a price of 200: a healthy `whale` with 100 collateral and 5225 debt,
/// and a `risky` one with 12 collateral and 2009 debt that drops below MCR at 180.
pub(crate) fn fill_protocol(env: &Env, sut: &Sut) -> (Address, Address) {
    let whale = Address::generate(env);
    let risky = Address::generate(env);

    sut.open_trove(&whale, 100 * UNIT, 5_000 * UNIT);
    sut.open_trove(&risky, 12 * UNIT, 1_800 * UNIT);

    (whale, risky)
}
