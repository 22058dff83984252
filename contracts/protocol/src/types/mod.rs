pub mod base_rate;
pub mod liquidation;
pub mod price_provider;
pub mod sorted_troves;
pub mod stability_pool;
pub mod trove_manager;
pub mod vault;
