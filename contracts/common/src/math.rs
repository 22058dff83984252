use crate::{FixedI128, NICR_PRECISION};

/// Collateral ratio of `coll` valued at `price` against `debt`.
/// A position without debt has an unbounded ratio and reports `i128::MAX`.
pub fn compute_cr(coll: i128, debt: i128, price: i128) -> Option<i128> {
    if debt > 0 {
        coll.checked_mul(price)?.checked_div(debt)
    } else {
        Some(i128::MAX)
    }
}

/// Price independent collateral ratio used to order positions
pub fn compute_nominal_cr(coll: i128, debt: i128) -> Option<i128> {
    if debt > 0 {
        coll.checked_mul(NICR_PRECISION)?.checked_div(debt)
    } else {
        Some(i128::MAX)
    }
}

/// Value of `coll` collateral units in stable units at an 18-decimal `price`
pub fn coll_value(coll: i128, price: i128) -> Option<i128> {
    FixedI128::from_inner(price).mul_int(coll)
}

/// Collateral units bought by `amount` stable units at an 18-decimal `price`
pub fn coll_for_value(amount: i128, price: i128) -> Option<i128> {
    FixedI128::from_inner(price).recip_mul_int(amount)
}
