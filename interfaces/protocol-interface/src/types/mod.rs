pub mod deposit;
pub mod entire_debt_and_coll;
pub mod error;
pub mod fee_state;
pub mod front_end;
pub mod pool_ledger;
pub mod protocol_config;
pub mod redistribution_state;
pub mod sorted_troves;
pub mod stability_pool_state;
pub mod trove;
