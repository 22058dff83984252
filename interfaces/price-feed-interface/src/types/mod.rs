pub mod asset;
pub mod price_data;
