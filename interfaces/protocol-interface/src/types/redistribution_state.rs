use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RedistributionState {
    pub total_stakes: i128,
    pub total_stakes_snapshot: i128,
    pub total_collateral_snapshot: i128,
    /// Cumulative redistributed collateral per unit staked, 18 decimals
    pub l_coll: i128,
    /// Cumulative redistributed debt per unit staked, 18 decimals
    pub l_debt: i128,
    pub last_coll_error_redistribution: i128,
    pub last_debt_error_redistribution: i128,
}
