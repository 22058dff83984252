use crate::*;
use community_issuance_interface::CommunityIssuanceClient;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient as TokenAdminClient};
use soroban_sdk::Env;

const YEAR: u64 = 365 * 24 * 60 * 60;
const SUPPLY_CAP: i128 = 32_000_000_0000000;

fn setup<'a>(env: &Env) -> (CommunityIssuanceClient<'a>, TokenClient<'a>, Address) {
    env.mock_all_auths();

    let stability_pool = Address::generate(env);
    let token_admin = Address::generate(env);
    let reward_token = env.register_stellar_asset_contract(token_admin);

    let id = env.register_contract(None, CommunityIssuanceMock);
    CommunityIssuanceMockClient::new(env, &id).initialize(&stability_pool, &reward_token, &SUPPLY_CAP);
    TokenAdminClient::new(env, &reward_token).mint(&id, &SUPPLY_CAP);

    (
        CommunityIssuanceClient::new(env, &id),
        TokenClient::new(env, &reward_token),
        stability_pool,
    )
}

#[test]
fn should_issue_nothing_at_deployment() {
    let env = Env::default();
    let (issuance, _, _) = setup(&env);

    assert_eq!(issuance.issue_tokens(), 0);
    assert_eq!(issuance.total_issued(), 0);
}

#[test]
fn should_issue_half_of_cap_after_a_year() {
    let env = Env::default();
    let (issuance, _, _) = setup(&env);

    env.ledger().with_mut(|li| li.timestamp = YEAR);
    let issued = issuance.issue_tokens();

    let half = SUPPLY_CAP / 2;
    assert!((issued - half).abs() < SUPPLY_CAP / 10_000);
}

#[test]
fn should_be_monotonic_and_incremental() {
    let env = Env::default();
    let (issuance, _, _) = setup(&env);

    env.ledger().with_mut(|li| li.timestamp = 60 * 60);
    let first = issuance.issue_tokens();
    assert!(first > 0);

    let same_time = issuance.issue_tokens();
    assert_eq!(same_time, 0);

    env.ledger().with_mut(|li| li.timestamp = 2 * 60 * 60);
    let second = issuance.issue_tokens();
    assert!(second > 0);
    assert!(second <= first);
    assert_eq!(issuance.total_issued(), first + second);
}

#[test]
fn should_send_tokens() {
    let env = Env::default();
    let (issuance, token, _) = setup(&env);
    let depositor = Address::generate(&env);

    issuance.send_tokens(&depositor, &1_000);

    assert_eq!(token.balance(&depositor), 1_000);
}
