use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Authorization
    Unauthorized = 1,

    // Lifecycle
    TranchesAlreadyDefined = 10,
    TranchesNotDefined = 11,
    NotMatured = 12,
    NoCollateral = 13,
    NotInitialized = 14,

    // Validation
    EmptyTranches = 20,
    LengthMismatch = 21,
    TooManyTranches = 22,
    WeightOutOfRange = 23,
    WeightSumInvalid = 24,
    EmptyBatch = 25,
    BatchTooLarge = 26,
    DuplicateLoan = 27,
    UnknownLoan = 28,
    TrancheOutOfRange = 29,
    InvalidAmount = 30,

    // Resources
    InsufficientShares = 40,
    SettlementTransferFailed = 41,
    CustodyTransferFailed = 42,

    MathOverflow = 50,
}
