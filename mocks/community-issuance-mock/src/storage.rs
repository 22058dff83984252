use soroban_sdk::{contracttype, Address, Env};

#[derive(Clone)]
#[contracttype]
pub struct IssuanceState {
    pub stability_pool: Address,
    pub reward_token: Address,
    pub supply_cap: i128,
    pub deployment_time: u64,
    pub total_issued: i128,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    State,
}

pub fn read_state(env: &Env) -> Option<IssuanceState> {
    env.storage().instance().get(&DataKey::State)
}

pub fn write_state(env: &Env, state: &IssuanceState) {
    env.storage().instance().set(&DataKey::State, state);
}
