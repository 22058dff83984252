use soroban_sdk::{contracttype, Address};

/// Protocol wide parameters. Ratios and fee rates are expressed in basis points,
/// 100% - 10_000. Amounts are in stablecoin base units.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ProtocolConfig {
    pub stable_token: Address,
    pub collateral_token: Address,
    pub price_feed: Address,
    pub community_issuance: Address,
    pub treasury: Address,
    /// Minimum collateral ratio of a single trove
    pub mcr: u32,
    /// Total collateral ratio below which the system is in recovery mode
    pub ccr: u32,
    /// Stablecoin reserved on every trove to pay liquidators
    pub gas_compensation: i128,
    pub min_net_debt: i128,
    pub borrowing_fee_floor: u32,
    pub max_borrowing_fee: u32,
    pub redemption_fee_floor: u32,
    pub sorted_troves_max_size: u32,
    /// Upper bound on nodes visited while searching an insert position
    pub max_hint_traversal: u32,
    /// Seconds after initialization during which redemptions are disabled
    pub redemption_bootstrap_period: u64,
}
