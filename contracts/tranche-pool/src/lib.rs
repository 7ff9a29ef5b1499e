#![no_std]

//! Tranche pool: pools loan collateral, splits the pooled principal into
//! weighted tranches of fungible shares, and distributes later interest and
//! principal inflows to share holders through per-tranche magnified indices.

mod constants;
mod contract;
mod distribution;
mod errors;
mod events;
mod helpers;
mod shares;
mod storage;
mod waterfall;

pub use crate::constants::{BPS_DENOMINATOR, INDEX_SCALE_1E18};
pub use crate::contract::{TranchePool, TranchePoolClient};
pub use crate::errors::Error;
pub use crate::storage::{Flow, LoanRecord, Phase, PooledLoan, Tranche};
