pub mod adjust_trove;
pub mod claim_collateral;
pub mod close_trove;
pub mod initialize;
pub mod liquidate;
pub mod open_trove;
pub mod provide_to_sp;
pub mod redeem_collateral;
pub mod register_front_end;
pub mod utils;
pub mod withdraw_coll_gain_to_trove;
pub mod withdraw_from_sp;
