use soroban_sdk::contracttype;

use super::error::Error;

/// Balance sheet of the collateral and debt held by the protocol.
/// Active pool backs open troves, default pool holds redistributed
/// amounts not yet applied to troves, surplus is claimable by former owners.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolLedger {
    pub active_coll: i128,
    pub active_debt: i128,
    pub default_coll: i128,
    pub default_debt: i128,
    pub surplus_coll: i128,
    /// Stablecoin reserved for gas compensation
    pub gas_pool: i128,
}

impl PoolLedger {
    pub fn entire_system_coll(&self) -> Result<i128, Error> {
        self.active_coll
            .checked_add(self.default_coll)
            .ok_or(Error::MathOverflowError)
    }

    pub fn entire_system_debt(&self) -> Result<i128, Error> {
        self.active_debt
            .checked_add(self.default_debt)
            .ok_or(Error::MathOverflowError)
    }

    pub fn increase_active(&mut self, coll: i128, debt: i128) -> Result<(), Error> {
        self.active_coll = add(self.active_coll, coll)?;
        self.active_debt = add(self.active_debt, debt)?;
        Ok(())
    }

    pub fn decrease_active(&mut self, coll: i128, debt: i128) -> Result<(), Error> {
        self.active_coll = sub(self.active_coll, coll)?;
        self.active_debt = sub(self.active_debt, debt)?;
        Ok(())
    }

    /// Redistribution moves unabsorbed liquidation amounts out of the active pool
    pub fn move_to_default(&mut self, coll: i128, debt: i128) -> Result<(), Error> {
        self.decrease_active(coll, debt)?;
        self.default_coll = add(self.default_coll, coll)?;
        self.default_debt = add(self.default_debt, debt)?;
        Ok(())
    }

    /// Pending rewards applied to a trove come back into the active pool
    pub fn move_from_default(&mut self, coll: i128, debt: i128) -> Result<(), Error> {
        self.default_coll = sub(self.default_coll, coll)?;
        self.default_debt = sub(self.default_debt, debt)?;
        self.increase_active(coll, debt)
    }

    pub fn move_to_surplus(&mut self, coll: i128) -> Result<(), Error> {
        self.active_coll = sub(self.active_coll, coll)?;
        self.surplus_coll = add(self.surplus_coll, coll)?;
        Ok(())
    }

    pub fn decrease_surplus(&mut self, coll: i128) -> Result<(), Error> {
        self.surplus_coll = sub(self.surplus_coll, coll)?;
        Ok(())
    }

    pub fn increase_gas_pool(&mut self, amount: i128) -> Result<(), Error> {
        self.gas_pool = add(self.gas_pool, amount)?;
        Ok(())
    }

    pub fn decrease_gas_pool(&mut self, amount: i128) -> Result<(), Error> {
        self.gas_pool = sub(self.gas_pool, amount)?;
        Ok(())
    }
}

fn add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::MathOverflowError)
}

fn sub(a: i128, b: i128) -> Result<i128, Error> {
    let result = a.checked_sub(b).ok_or(Error::MathOverflowError)?;
    if result < 0 {
        return Err(Error::MathOverflowError);
    }
    Ok(result)
}
