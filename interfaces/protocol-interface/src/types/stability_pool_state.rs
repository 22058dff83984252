use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StabilityPoolState {
    /// Running product of deposit depletion factors, 18 decimals
    pub p: i128,
    pub current_scale: u64,
    pub current_epoch: u64,
    pub total_deposits: i128,
    /// Collateral gained from offsets and not yet withdrawn
    pub coll: i128,
    pub last_reward_error: i128,
    pub last_coll_error_offset: i128,
    pub last_debt_loss_error_offset: i128,
}
