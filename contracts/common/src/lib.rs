#![no_std]

mod fixedi128;
mod math;

pub use fixedi128::*;
pub use math::*;

/// Percent representation
pub const PERCENTAGE_FACTOR: u32 = 10_000;

/// Precision of nominal collateral ratios, keeps NICR meaningful for small debts
pub const NICR_PRECISION: i128 = 100_000_000_000_000_000_000;

/// Precision step applied to the stability pool product when it would lose significant digits
pub const SCALE_FACTOR: i128 = 1_000_000_000;

pub const SECONDS_IN_ONE_MINUTE: u64 = 60;

/// Per-minute base rate decay, gives a 12 hour half-life
pub const MINUTE_DECAY_FACTOR: i128 = 999_037_758_833_783_000;

/// Per-minute issuance factor, halves the remaining supply every year
pub const ISSUANCE_FACTOR: i128 = 999_998_681_227_695_000;

/// Upper bound on exponentiation input, 1000 years in minutes
pub const MAX_DECAY_MINUTES: u64 = 525_600_000;

/// Liquidator receives `coll / COLL_GAS_COMPENSATION_DIVISOR` of the liquidated collateral (0.5%)
pub const COLL_GAS_COMPENSATION_DIVISOR: i128 = 200;

/// Divisor of the redeemed fraction added to the base rate
pub const BETA: i128 = 2;
