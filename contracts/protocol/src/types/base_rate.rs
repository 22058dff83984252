use common::{coll_value, FixedI128, BETA, MINUTE_DECAY_FACTOR, SECONDS_IN_ONE_MINUTE};
use protocol_interface::types::error::Error;
use protocol_interface::types::fee_state::FeeState;
use protocol_interface::types::protocol_config::ProtocolConfig;
use soroban_sdk::Env;

use crate::event;
use crate::storage::{read_fee_state, write_fee_state};

/// `base_rate * MINUTE_DECAY_FACTOR ^ minutes_passed`
pub fn decay_base_rate(base_rate: i128, minutes_passed: u64) -> Result<i128, Error> {
    FixedI128::from_inner(MINUTE_DECAY_FACTOR)
        .decay_pow(minutes_passed)
        .and_then(|factor| FixedI128::from_inner(base_rate).checked_mul(factor))
        .map(FixedI128::into_inner)
        .ok_or(Error::MathOverflowError)
}

/// Fee schedule shared by borrowing and redemption. Rates are 18-decimal fractions.
pub struct BaseRate<'a> {
    env: &'a Env,
    config: &'a ProtocolConfig,
    pub state: FeeState,
}

impl<'a> BaseRate<'a> {
    pub fn new(env: &'a Env, config: &'a ProtocolConfig) -> Result<Self, Error> {
        Ok(Self {
            env,
            config,
            state: read_fee_state(env)?,
        })
    }

    pub fn write(&self) {
        write_fee_state(self.env, &self.state);
    }

    fn minutes_passed_since_last_fee_op(&self) -> u64 {
        self.env
            .ledger()
            .timestamp()
            .saturating_sub(self.state.last_fee_operation_time)
            / SECONDS_IN_ONE_MINUTE
    }

    pub fn decayed_base_rate(&self) -> Result<i128, Error> {
        decay_base_rate(
            self.state.base_rate,
            self.minutes_passed_since_last_fee_op(),
        )
    }

    /// Moves the fee clock only by whole minutes so that frequent operations still decay the rate
    fn update_last_fee_op_time(&mut self) {
        let now = self.env.ledger().timestamp();
        let elapsed = now.saturating_sub(self.state.last_fee_operation_time);

        if elapsed >= SECONDS_IN_ONE_MINUTE {
            self.state.last_fee_operation_time = now;
            event::last_fee_op_time_updated(self.env, now);
        }
    }

    pub fn decay_base_rate_from_borrowing(&mut self) -> Result<(), Error> {
        let decayed = self.decayed_base_rate()?;
        if decayed > FixedI128::DENOMINATOR {
            return Err(Error::MathOverflowError);
        }

        self.state.base_rate = decayed;
        event::base_rate_updated(self.env, decayed);

        self.update_last_fee_op_time();

        Ok(())
    }

    /// Decays the base rate and raises it by half of the redeemed share of the supply
    pub fn update_base_rate_from_redemption(
        &mut self,
        coll_drawn: i128,
        price: i128,
        total_stable_supply: i128,
    ) -> Result<i128, Error> {
        let decayed = self.decayed_base_rate()?;

        let redeemed_value = coll_value(coll_drawn, price).ok_or(Error::MathOverflowError)?;
        let redeemed_fraction = FixedI128::from_rational(redeemed_value, total_stable_supply)
            .ok_or(Error::MathOverflowError)?
            .into_inner();

        let new_base_rate = decayed
            .checked_add(redeemed_fraction / BETA)
            .ok_or(Error::MathOverflowError)?
            .min(FixedI128::DENOMINATOR);

        if new_base_rate <= 0 {
            return Err(Error::MathOverflowError);
        }

        self.state.base_rate = new_base_rate;
        event::base_rate_updated(self.env, new_base_rate);

        self.update_last_fee_op_time();

        Ok(new_base_rate)
    }

    fn borrowing_rate_from(&self, base_rate: i128) -> Result<i128, Error> {
        let floor = bps_to_rate(self.config.borrowing_fee_floor)?;
        let max_fee = bps_to_rate(self.config.max_borrowing_fee)?;

        Ok(floor
            .checked_add(base_rate)
            .ok_or(Error::MathOverflowError)?
            .min(max_fee))
    }

    fn redemption_rate_from(&self, base_rate: i128) -> Result<i128, Error> {
        let floor = bps_to_rate(self.config.redemption_fee_floor)?;

        Ok(floor.max(base_rate).min(FixedI128::DENOMINATOR))
    }

    pub fn borrowing_rate(&self) -> Result<i128, Error> {
        self.borrowing_rate_from(self.state.base_rate)
    }

    pub fn borrowing_rate_with_decay(&self) -> Result<i128, Error> {
        self.borrowing_rate_from(self.decayed_base_rate()?)
    }

    pub fn borrowing_fee(&self, debt: i128) -> Result<i128, Error> {
        FixedI128::from_inner(self.borrowing_rate()?)
            .mul_int(debt)
            .ok_or(Error::MathOverflowError)
    }

    /// Decays the base rate and charges the borrowing fee on `debt_increase`
    pub fn trigger_borrowing_fee(
        &mut self,
        debt_increase: i128,
        max_fee_percentage: i128,
    ) -> Result<i128, Error> {
        self.decay_base_rate_from_borrowing()?;

        let fee = self.borrowing_fee(debt_increase)?;
        require_user_accepts_fee(fee, debt_increase, max_fee_percentage)?;

        Ok(fee)
    }

    pub fn redemption_rate(&self) -> Result<i128, Error> {
        self.redemption_rate_from(self.state.base_rate)
    }

    pub fn redemption_rate_with_decay(&self) -> Result<i128, Error> {
        self.redemption_rate_from(self.decayed_base_rate()?)
    }

    pub fn redemption_fee(&self, coll_drawn: i128) -> Result<i128, Error> {
        FixedI128::from_inner(self.redemption_rate()?)
            .mul_int(coll_drawn)
            .ok_or(Error::MathOverflowError)
    }
}

pub fn bps_to_rate(bps: u32) -> Result<i128, Error> {
    FixedI128::from_percentage(bps)
        .map(FixedI128::into_inner)
        .ok_or(Error::MathOverflowError)
}

/// Fails when `fee / amount` exceeds the caller's `max_fee_percentage`
pub fn require_user_accepts_fee(
    fee: i128,
    amount: i128,
    max_fee_percentage: i128,
) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }

    let fee_percentage = FixedI128::from_rational(fee, amount)
        .ok_or(Error::MathOverflowError)?
        .into_inner();

    if fee_percentage > max_fee_percentage {
        return Err(Error::FeeExceedsMaximum);
    }

    Ok(())
}
