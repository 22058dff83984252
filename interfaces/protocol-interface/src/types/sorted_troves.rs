use soroban_sdk::{contracttype, Address};

/// List of troves in descending nominal collateral ratio order.
/// `head` holds the highest ratio, `tail` the lowest.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SortedTrovesData {
    pub head: Option<Address>,
    pub tail: Option<Address>,
    pub size: u32,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Node {
    /// Neighbour with a lower or equal ratio
    pub next: Option<Address>,
    /// Neighbour with a higher or equal ratio
    pub prev: Option<Address>,
}
