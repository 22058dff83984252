use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub initial_value: i128,
    pub front_end_tag: Option<Address>,
}

/// Global stability pool accumulators captured at the last direct modification
/// of a deposit or a front end stake. Front end snapshots always carry `s == 0`.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snapshots {
    pub s: i128,
    pub p: i128,
    pub g: i128,
    pub scale: u64,
    pub epoch: u64,
}
