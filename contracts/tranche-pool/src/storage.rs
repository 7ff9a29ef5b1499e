use soroban_sdk::{contracttype, Address, Env, IntoVal, String, TryFromVal, Val};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::Error;

#[soroban_sdk::contractclient(name = "LoanRegistryClient")]
pub trait LoanRegistryInterface {
    fn lookup(env: Env, loan_id: u64) -> LoanRecord;
}

#[soroban_sdk::contractclient(name = "CollateralLedgerClient")]
pub trait CollateralLedgerInterface {
    fn transfer(env: Env, from: Address, to: Address, loan_id: u64);
}

// Storage key types for the contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // Instance: fixed at construction
    Originator,
    Maturity,
    LoanRegistry,
    CollateralLedger,
    SettlementAsset,
    // Instance: pool aggregates
    PooledPrincipal,     // u128, running sum of recorded values
    LoanCount,           // u32
    TotalPrincipal,      // u128, frozen when tranches are defined
    TrancheCount,        // u32, present once tranches are defined
    Tranche(u32),        // Tranche
    ShareSupply(u32),    // u128
    Index(u32, Flow),    // u128, scaled 1e18
    TotalDeposited(Flow),
    Unattributed(Flow),
    // Persistent: per loan / per holder
    Loan(u32),                      // PooledLoan by pooling order
    Pooled(u64),                    // bool, keyed by loan id
    ShareBalance(u32, Address),     // u128
    Withdrawn(u32, Address, Flow),  // u128
    Correction(u32, Address, Flow), // i128, scaled 1e18
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Principal,
    Interest,
}

pub const FLOWS: [Flow; 2] = [Flow::Principal, Flow::Interest];

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    CollateralOpen,
    PreMaturity,
    PostMaturity,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRecord {
    pub value: u128,
    pub originator: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PooledLoan {
    pub loan_id: u64,
    pub value: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tranche {
    pub index: u32,
    pub name: String,
    pub symbol: String,
    pub principal_weight_bps: u32,
    pub interest_weight_bps: u32,
    pub minted: u128,
}

impl Tranche {
    pub fn weight(&self, flow: Flow) -> u32 {
        match flow {
            Flow::Principal => self.principal_weight_bps,
            Flow::Interest => self.interest_weight_bps,
        }
    }
}

pub fn bump_core_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn read_persistent<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let persistent = env.storage().persistent();
    let value = persistent.get::<DataKey, V>(key);
    if value.is_some() {
        persistent.extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    value
}

fn write_persistent<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    let persistent = env.storage().persistent();
    persistent.set(key, value);
    persistent.extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn read_config<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Result<V, Error> {
    env.storage()
        .instance()
        .get::<DataKey, V>(key)
        .ok_or(Error::NotInitialized)
}

// Configuration

pub fn write_config(
    env: &Env,
    originator: &Address,
    loan_registry: &Address,
    collateral_ledger: &Address,
    settlement_asset: &Address,
    maturity: u64,
) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Originator, originator);
    instance.set(&DataKey::LoanRegistry, loan_registry);
    instance.set(&DataKey::CollateralLedger, collateral_ledger);
    instance.set(&DataKey::SettlementAsset, settlement_asset);
    instance.set(&DataKey::Maturity, &maturity);
}

pub fn read_originator(env: &Env) -> Result<Address, Error> {
    read_config(env, &DataKey::Originator)
}

pub fn read_maturity(env: &Env) -> Result<u64, Error> {
    read_config(env, &DataKey::Maturity)
}

pub fn read_loan_registry(env: &Env) -> Result<Address, Error> {
    read_config(env, &DataKey::LoanRegistry)
}

pub fn read_collateral_ledger(env: &Env) -> Result<Address, Error> {
    read_config(env, &DataKey::CollateralLedger)
}

pub fn read_settlement_asset(env: &Env) -> Result<Address, Error> {
    read_config(env, &DataKey::SettlementAsset)
}

// Collateral

pub fn read_pooled_principal(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::PooledPrincipal)
        .unwrap_or(0u128)
}

pub fn write_pooled_principal(env: &Env, value: u128) {
    env.storage()
        .instance()
        .set(&DataKey::PooledPrincipal, &value);
}

pub fn read_loan_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::LoanCount)
        .unwrap_or(0u32)
}

pub fn write_loan_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::LoanCount, &count);
}

pub fn read_loan(env: &Env, position: u32) -> Result<PooledLoan, Error> {
    read_persistent(env, &DataKey::Loan(position)).ok_or(Error::UnknownLoan)
}

pub fn write_loan(env: &Env, position: u32, loan: &PooledLoan) {
    write_persistent(env, &DataKey::Loan(position), loan);
}

pub fn is_pooled(env: &Env, loan_id: u64) -> bool {
    read_persistent::<bool>(env, &DataKey::Pooled(loan_id)).unwrap_or(false)
}

pub fn mark_pooled(env: &Env, loan_id: u64) {
    write_persistent(env, &DataKey::Pooled(loan_id), &true);
}

// Tranches

pub fn is_defined(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::TrancheCount)
}

pub fn read_tranche_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::TrancheCount)
        .unwrap_or(0u32)
}

pub fn write_tranche_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::TrancheCount, &count);
}

pub fn read_total_principal(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalPrincipal)
        .unwrap_or(0u128)
}

pub fn write_total_principal(env: &Env, value: u128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalPrincipal, &value);
}

pub fn read_tranche(env: &Env, tranche: u32) -> Result<Tranche, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Tranche(tranche))
        .ok_or(Error::TrancheOutOfRange)
}

pub fn write_tranche(env: &Env, tranche: &Tranche) {
    env.storage()
        .instance()
        .set(&DataKey::Tranche(tranche.index), tranche);
}

// Share ledger

pub fn read_share_supply(env: &Env, tranche: u32) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::ShareSupply(tranche))
        .unwrap_or(0u128)
}

pub fn write_share_supply(env: &Env, tranche: u32, supply: u128) {
    env.storage()
        .instance()
        .set(&DataKey::ShareSupply(tranche), &supply);
}

pub fn read_share_balance(env: &Env, tranche: u32, holder: &Address) -> u128 {
    read_persistent(env, &DataKey::ShareBalance(tranche, holder.clone())).unwrap_or(0u128)
}

pub fn write_share_balance(env: &Env, tranche: u32, holder: &Address, balance: u128) {
    write_persistent(env, &DataKey::ShareBalance(tranche, holder.clone()), &balance);
}

// Distribution

pub fn read_index(env: &Env, tranche: u32, flow: Flow) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::Index(tranche, flow))
        .unwrap_or(0u128)
}

pub fn write_index(env: &Env, tranche: u32, flow: Flow, index: u128) {
    env.storage()
        .instance()
        .set(&DataKey::Index(tranche, flow), &index);
}

pub fn read_total_deposited(env: &Env, flow: Flow) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalDeposited(flow))
        .unwrap_or(0u128)
}

pub fn write_total_deposited(env: &Env, flow: Flow, value: u128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalDeposited(flow), &value);
}

pub fn read_unattributed(env: &Env, flow: Flow) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::Unattributed(flow))
        .unwrap_or(0u128)
}

pub fn write_unattributed(env: &Env, flow: Flow, value: u128) {
    env.storage()
        .instance()
        .set(&DataKey::Unattributed(flow), &value);
}

pub fn read_withdrawn(env: &Env, tranche: u32, holder: &Address, flow: Flow) -> u128 {
    read_persistent(env, &DataKey::Withdrawn(tranche, holder.clone(), flow)).unwrap_or(0u128)
}

pub fn write_withdrawn(env: &Env, tranche: u32, holder: &Address, flow: Flow, value: u128) {
    write_persistent(env, &DataKey::Withdrawn(tranche, holder.clone(), flow), &value);
}

pub fn read_correction(env: &Env, tranche: u32, holder: &Address, flow: Flow) -> i128 {
    read_persistent(env, &DataKey::Correction(tranche, holder.clone(), flow)).unwrap_or(0i128)
}

pub fn write_correction(env: &Env, tranche: u32, holder: &Address, flow: Flow, value: i128) {
    write_persistent(env, &DataKey::Correction(tranche, holder.clone(), flow), &value);
}
