extern crate std;

use soroban_sdk::testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation};
use soroban_sdk::token::Client as TokenClient;
use soroban_sdk::{symbol_short, Address, Env, IntoVal, String};
use stable_token_interface::StableTokenClient;

use crate::StableToken;

fn create_token<'a>(e: &Env) -> (StableTokenClient<'a>, Address) {
    let minter = Address::generate(e);
    let token = StableTokenClient::new(e, &e.register_contract(None, StableToken {}));

    token.initialize(
        &minter,
        &7,
        &"Stable".into_val(e),
        &"STBL".into_val(e),
    );

    (token, minter)
}

#[test]
fn initialize() {
    let e = Env::default();
    let (token, minter) = create_token(&e);

    assert_eq!(token.decimals(), 7);
    assert_eq!(token.name(), String::from_str(&e, "Stable"));
    assert_eq!(token.symbol(), String::from_str(&e, "STBL"));
    assert_eq!(token.minter(), minter);
    assert_eq!(token.total_supply(), 0);
}

#[test]
#[should_panic(expected = "stable-token: already initialized")]
fn initialize_twice() {
    let e = Env::default();
    let (token, minter) = create_token(&e);

    token.initialize(&minter, &7, &"Stable".into_val(&e), &"STBL".into_val(&e));
}

#[test]
fn mint_requires_minter_auth() {
    let e = Env::default();
    e.mock_all_auths();

    let (token, minter) = create_token(&e);
    let user = Address::generate(&e);

    token.mint(&user, &1000);

    assert_eq!(
        e.auths(),
        [(
            minter.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    token.address.clone(),
                    symbol_short!("mint"),
                    (&user, 1000_i128).into_val(&e)
                )),
                sub_invocations: std::vec![]
            }
        )]
    );
    assert_eq!(token.balance(&user), 1000);
    assert_eq!(token.total_supply(), 1000);
}

#[test]
fn transfer_and_burn() {
    let e = Env::default();
    e.mock_all_auths();

    let (token, _) = create_token(&e);
    let user1 = Address::generate(&e);
    let user2 = Address::generate(&e);

    token.mint(&user1, &1000);
    token.transfer(&user1, &user2, &600);
    assert_eq!(token.balance(&user1), 400);
    assert_eq!(token.balance(&user2), 600);

    token.burn(&user2, &100);
    assert_eq!(token.balance(&user2), 500);
    assert_eq!(token.total_supply(), 900);
}

#[test]
fn works_through_sep41_client() {
    let e = Env::default();
    e.mock_all_auths();

    let (token, _) = create_token(&e);
    let user1 = Address::generate(&e);
    let user2 = Address::generate(&e);
    let spender = Address::generate(&e);
    token.mint(&user1, &1000);

    let sep41 = TokenClient::new(&e, &token.address);
    sep41.approve(&user1, &spender, &300, &200);
    assert_eq!(sep41.allowance(&user1, &spender), 300);

    sep41.transfer_from(&spender, &user1, &user2, &200);
    assert_eq!(sep41.balance(&user2), 200);
    assert_eq!(sep41.allowance(&user1, &spender), 100);

    sep41.burn_from(&spender, &user1, &100);
    assert_eq!(sep41.allowance(&user1, &spender), 0);
    assert_eq!(token.total_supply(), 900);
}

#[test]
#[should_panic(expected = "stable-token: insufficient balance")]
fn transfer_more_than_balance() {
    let e = Env::default();
    e.mock_all_auths();

    let (token, _) = create_token(&e);
    let user1 = Address::generate(&e);
    let user2 = Address::generate(&e);

    token.mint(&user1, &100);
    token.transfer(&user1, &user2, &101);
}

#[test]
#[should_panic(expected = "stable-token: insufficient allowance")]
fn transfer_from_without_allowance() {
    let e = Env::default();
    e.mock_all_auths();

    let (token, _) = create_token(&e);
    let user1 = Address::generate(&e);
    let user2 = Address::generate(&e);

    token.mint(&user1, &100);
    token.transfer_from(&user2, &user1, &user2, &1);
}
