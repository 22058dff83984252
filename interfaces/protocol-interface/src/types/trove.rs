use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TroveStatus {
    NonExistent = 0,
    Active = 1,
    ClosedByOwner = 2,
    ClosedByLiquidation = 3,
    ClosedByRedemption = 4,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trove {
    pub debt: i128,
    pub coll: i128,
    pub stake: i128,
    pub status: TroveStatus,
    pub array_index: u32,
}

impl Trove {
    pub fn nonexistent() -> Self {
        Self {
            debt: 0,
            coll: 0,
            stake: 0,
            status: TroveStatus::NonExistent,
            array_index: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TroveStatus::Active
    }
}

/// Values of the redistribution accumulators at the last touch of a trove
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardSnapshot {
    pub coll: i128,
    pub debt: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TroveOperation {
    OpenTrove = 0,
    CloseTrove = 1,
    AdjustTrove = 2,
    ApplyPendingRewards = 3,
    LiquidateInNormalMode = 4,
    LiquidateInRecoveryMode = 5,
    RedeemCollateral = 6,
}
