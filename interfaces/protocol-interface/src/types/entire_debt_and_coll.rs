use soroban_sdk::contracttype;

/// Trove balances including the redistribution share not yet applied
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntireDebtAndColl {
    pub debt: i128,
    pub coll: i128,
    pub pending_debt: i128,
    pub pending_coll: i128,
}
