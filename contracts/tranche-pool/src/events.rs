use soroban_sdk::{contractevent, Address, String, Vec};

use crate::storage::Flow;

/// Emitted once per successful `pool_loans` batch.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralPooled {
    #[topic]
    pub originator: Address,
    pub loan_ids: Vec<u64>,
    pub total_value: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TranchesDefined {
    pub total_principal: u128,
    pub tranche_count: u32,
}

/// One per tranche at definition; `minted` shares are held by the pool.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrancheMinted {
    #[topic]
    pub tranche: u32,
    pub name: String,
    pub symbol: String,
    pub principal_weight_bps: u32,
    pub interest_weight_bps: u32,
    pub minted: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SharesPurchased {
    #[topic]
    pub buyer: Address,
    #[topic]
    pub tranche: u32,
    pub amount: u128,
}

/// `attributed` is the part that moved a distribution index.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterestDeposited {
    #[topic]
    pub depositor: Address,
    pub amount: u128,
    pub attributed: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrincipalDeposited {
    #[topic]
    pub depositor: Address,
    pub amount: u128,
    pub attributed: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claimed {
    #[topic]
    pub holder: Address,
    #[topic]
    pub tranche: u32,
    pub flow: Flow,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SharesTransferred {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub tranche: u32,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnsoldRetired {
    #[topic]
    pub tranche: u32,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnsoldCollected {
    #[topic]
    pub tranche: u32,
    pub amount: u128,
}
