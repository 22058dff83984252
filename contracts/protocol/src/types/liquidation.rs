use common::{coll_for_value, FixedI128, COLL_GAS_COMPENSATION_DIVISOR};
use protocol_interface::types::error::Error;

/// Outcome of liquidating a single trove, or the sum over a sequence of troves
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidationValues {
    pub entire_debt: i128,
    pub entire_coll: i128,
    pub coll_gas_compensation: i128,
    pub stable_gas_compensation: i128,
    pub debt_to_offset: i128,
    pub coll_to_send_to_sp: i128,
    pub debt_to_redistribute: i128,
    pub coll_to_redistribute: i128,
    pub coll_surplus: i128,
}

impl LiquidationValues {
    pub fn add(&mut self, other: &LiquidationValues) -> Result<(), Error> {
        self.entire_debt = add(self.entire_debt, other.entire_debt)?;
        self.entire_coll = add(self.entire_coll, other.entire_coll)?;
        self.coll_gas_compensation = add(self.coll_gas_compensation, other.coll_gas_compensation)?;
        self.stable_gas_compensation =
            add(self.stable_gas_compensation, other.stable_gas_compensation)?;
        self.debt_to_offset = add(self.debt_to_offset, other.debt_to_offset)?;
        self.coll_to_send_to_sp = add(self.coll_to_send_to_sp, other.coll_to_send_to_sp)?;
        self.debt_to_redistribute = add(self.debt_to_redistribute, other.debt_to_redistribute)?;
        self.coll_to_redistribute = add(self.coll_to_redistribute, other.coll_to_redistribute)?;
        self.coll_surplus = add(self.coll_surplus, other.coll_surplus)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entire_debt == 0 && self.entire_coll == 0
    }

    /// Collateral that left the active pool towards the stability pool or other troves
    pub fn liquidated_coll(&self) -> Result<i128, Error> {
        self.entire_coll
            .checked_sub(self.coll_gas_compensation)
            .and_then(|v| v.checked_sub(self.coll_surplus))
            .ok_or(Error::MathOverflowError)
    }
}

fn add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::MathOverflowError)
}

/// Liquidator share of the trove collateral
pub fn coll_gas_compensation(entire_coll: i128) -> i128 {
    entire_coll / COLL_GAS_COMPENSATION_DIVISOR
}

/// Splits a liquidated trove between the stability pool and redistribution.
/// Returns `(debt_to_offset, coll_to_send_to_sp, debt_to_redistribute, coll_to_redistribute)`.
pub fn offset_and_redistribution_vals(
    debt: i128,
    coll: i128,
    stable_in_sp: i128,
) -> Result<(i128, i128, i128, i128), Error> {
    if stable_in_sp <= 0 || debt == 0 {
        return Ok((0, 0, debt, coll));
    }

    let debt_to_offset = debt.min(stable_in_sp);
    let coll_to_send_to_sp = coll
        .checked_mul(debt_to_offset)
        .and_then(|v| v.checked_div(debt))
        .ok_or(Error::MathOverflowError)?;

    Ok((
        debt_to_offset,
        coll_to_send_to_sp,
        debt - debt_to_offset,
        coll - coll_to_send_to_sp,
    ))
}

/// Recovery mode liquidation of a trove with `MCR <= ICR < TCR`: the whole debt is offset,
/// collateral worth `debt * MCR` leaves the trove and the rest is kept for the owner.
pub fn capped_offset_vals(
    entire_debt: i128,
    entire_coll: i128,
    price: i128,
    mcr: i128,
    stable_gas_compensation: i128,
) -> Result<LiquidationValues, Error> {
    let capped_value = FixedI128::from_inner(mcr)
        .mul_int(entire_debt)
        .ok_or(Error::MathOverflowError)?;
    let capped_coll_portion = coll_for_value(capped_value, price)
        .ok_or(Error::MathOverflowError)?
        .min(entire_coll);

    let coll_gas_compensation = coll_gas_compensation(capped_coll_portion);

    Ok(LiquidationValues {
        entire_debt,
        entire_coll,
        coll_gas_compensation,
        stable_gas_compensation,
        debt_to_offset: entire_debt,
        coll_to_send_to_sp: capped_coll_portion - coll_gas_compensation,
        debt_to_redistribute: 0,
        coll_to_redistribute: 0,
        coll_surplus: entire_coll - capped_coll_portion,
    })
}
