use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 0,
    Uninitialized = 1,
    InvalidConfig = 2,

    AmountMustBeNonZero = 100,
    InvalidKickbackRate = 101,
    InvalidMaxFeePercentage = 102,
    EmptyTroveArray = 103,
    SingularCollChange = 104,
    ZeroAdjustment = 105,
    ZeroDebtChange = 106,

    AlreadyRegisteredFrontEnd = 200,
    FrontEndTagNotRegistered = 201,
    NoDeposit = 202,
    UserHasDeposit = 203,
    UndercollateralizedTroves = 204,
    NoCollGain = 205,
    TroveNotActive = 206,
    TroveIsActive = 207,
    NothingToLiquidate = 208,
    OnlyOneTroveInSystem = 209,
    IcrBelowMcr = 210,
    IcrBelowCcr = 211,
    IcrDecreasedInRecoveryMode = 212,
    TcrBelowCcr = 213,
    TcrBelowMcr = 214,
    NetDebtBelowMinimum = 215,
    NotPermittedInRecoveryMode = 216,
    CollWithdrawalInRecoveryMode = 217,
    RepaymentExceedsDebt = 218,
    InsufficientCollateral = 219,
    InsufficientBalance = 220,
    BootstrapPeriod = 221,
    UnableToRedeem = 222,
    FeeExceedsMaximum = 223,
    RedeemerTroveBelowMcr = 224,
    NoCollateralToClaim = 225,

    ListFull = 300,
    NodeExists = 301,
    NodeNotFound = 302,
    InvalidNicr = 303,
    HintExhausted = 304,

    NoPriceForAsset = 400,
    InvalidAssetPrice = 401,

    MathOverflowError = 500,
}
