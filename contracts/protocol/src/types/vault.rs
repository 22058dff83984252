use protocol_interface::types::protocol_config::ProtocolConfig;
use soroban_sdk::{token, Address, Env};
use stable_token_interface::StableTokenClient;

/// Token movements between accounts and the protocol contract, which custodies
/// all collateral, stability pool deposits and the gas compensation reserve.
/// Zero amounts are skipped.
pub struct Vault<'a> {
    env: &'a Env,
    config: &'a ProtocolConfig,
}

impl<'a> Vault<'a> {
    pub fn new(env: &'a Env, config: &'a ProtocolConfig) -> Self {
        Self { env, config }
    }

    pub fn receive_coll(&self, from: &Address, amount: i128) {
        if amount > 0 {
            token::Client::new(self.env, &self.config.collateral_token).transfer(
                from,
                &self.env.current_contract_address(),
                &amount,
            );
        }
    }

    pub fn send_coll(&self, to: &Address, amount: i128) {
        if amount > 0 {
            token::Client::new(self.env, &self.config.collateral_token).transfer(
                &self.env.current_contract_address(),
                to,
                &amount,
            );
        }
    }

    pub fn stable_balance(&self, who: &Address) -> i128 {
        token::Client::new(self.env, &self.config.stable_token).balance(who)
    }

    pub fn receive_stable(&self, from: &Address, amount: i128) {
        if amount > 0 {
            token::Client::new(self.env, &self.config.stable_token).transfer(
                from,
                &self.env.current_contract_address(),
                &amount,
            );
        }
    }

    pub fn send_stable(&self, to: &Address, amount: i128) {
        if amount > 0 {
            token::Client::new(self.env, &self.config.stable_token).transfer(
                &self.env.current_contract_address(),
                to,
                &amount,
            );
        }
    }

    pub fn mint_stable(&self, to: &Address, amount: i128) {
        if amount > 0 {
            StableTokenClient::new(self.env, &self.config.stable_token).mint(to, &amount);
        }
    }

    pub fn burn_stable(&self, from: &Address, amount: i128) {
        if amount > 0 {
            token::Client::new(self.env, &self.config.stable_token).burn(from, &amount);
        }
    }

    /// Burns stablecoin held by the protocol itself
    pub fn burn_own_stable(&self, amount: i128) {
        self.burn_stable(&self.env.current_contract_address(), amount);
    }
}
