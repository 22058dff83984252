use common::FixedI128;
use price_feed_interface::types::asset::Asset;
use price_feed_interface::PriceFeedClient;
use protocol_interface::types::error::Error;
use protocol_interface::types::protocol_config::ProtocolConfig;
use soroban_sdk::Env;

/// Reads the collateral price once per invocation and keeps it for the rest of the call
pub struct PriceProvider<'a> {
    env: &'a Env,
    config: &'a ProtocolConfig,
    price: Option<i128>,
}

impl<'a> PriceProvider<'a> {
    pub fn new(env: &'a Env, config: &'a ProtocolConfig) -> Self {
        Self {
            env,
            config,
            price: None,
        }
    }

    /// Collateral price in stablecoin with 18 decimals
    pub fn price(&mut self) -> Result<i128, Error> {
        if let Some(price) = self.price {
            return Ok(price);
        }

        let client = PriceFeedClient::new(self.env, &self.config.price_feed);
        let price_data = client
            .lastprice(&Asset::Stellar(self.config.collateral_token.clone()))
            .ok_or(Error::NoPriceForAsset)?;

        if price_data.price <= 0 {
            return Err(Error::InvalidAssetPrice);
        }

        let denominator = 10i128
            .checked_pow(client.decimals())
            .ok_or(Error::InvalidAssetPrice)?;
        let price = FixedI128::from_rational(price_data.price, denominator)
            .ok_or(Error::InvalidAssetPrice)?
            .into_inner();

        if price <= 0 {
            return Err(Error::InvalidAssetPrice);
        }

        self.price = Some(price);

        Ok(price)
    }
}
