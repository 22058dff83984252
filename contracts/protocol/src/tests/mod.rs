pub mod sut;

mod close_trove;
mod initialize;
mod redeem_collateral;
mod rewards;
mod sorted_troves;
mod withdraw_from_sp;
