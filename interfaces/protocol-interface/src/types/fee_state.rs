use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeeState {
    pub base_rate: i128,
    pub last_fee_operation_time: u64,
}
