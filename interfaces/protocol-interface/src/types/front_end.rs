use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrontEnd {
    /// Share of reward passed to tagged depositors, 18 decimals in [0, 1]
    pub kickback_rate: i128,
    pub registered: bool,
}
