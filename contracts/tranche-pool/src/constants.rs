pub const INDEX_SCALE_1E18: u128 = 1_000_000_000_000_000_000u128; // 1e18, MAG
pub const BPS_DENOMINATOR: u32 = 10_000;
pub const MAX_TRANCHES: u32 = 16;
pub const MAX_POOL_BATCH: u32 = 32; // loans per pool_loans call
pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;
