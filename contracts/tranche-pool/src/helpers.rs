use soroban_sdk::{token, Address, Env};

use crate::errors::Error;
use crate::storage::*;

pub fn require_originator(env: &Env, caller: &Address) -> Result<(), Error> {
    let originator = read_originator(env)?;
    if originator != *caller {
        return Err(Error::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

pub fn ensure_defined(env: &Env) -> Result<(), Error> {
    if !is_defined(env) {
        return Err(Error::TranchesNotDefined);
    }
    Ok(())
}

pub fn ensure_matured(env: &Env) -> Result<(), Error> {
    if env.ledger().timestamp() < read_maturity(env)? {
        return Err(Error::NotMatured);
    }
    Ok(())
}

pub fn ensure_positive(amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}

pub fn to_i128(amount: u128) -> Result<i128, Error> {
    i128::try_from(amount).map_err(|_| Error::MathOverflow)
}

pub fn lookup_loan(env: &Env, loan_id: u64) -> Result<LoanRecord, Error> {
    let registry = read_loan_registry(env)?;
    match LoanRegistryClient::new(env, &registry).try_lookup(&loan_id) {
        Ok(Ok(record)) => Ok(record),
        _ => Err(Error::UnknownLoan),
    }
}

pub fn take_custody(env: &Env, from: &Address, loan_id: u64) -> Result<(), Error> {
    let ledger = read_collateral_ledger(env)?;
    let pool = env.current_contract_address();
    match CollateralLedgerClient::new(env, &ledger).try_transfer(from, &pool, &loan_id) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::CustodyTransferFailed),
    }
}

/// Pulls `amount` of the settlement asset from `from` into the pool.
pub fn pull_settlement(env: &Env, from: &Address, amount: u128) -> Result<(), Error> {
    let asset = read_settlement_asset(env)?;
    let amount = to_i128(amount)?;
    let pool = env.current_contract_address();
    match token::Client::new(env, &asset).try_transfer(from, &pool, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::SettlementTransferFailed),
    }
}

/// Pushes `amount` of the settlement asset from the pool to `to`. Zero is a no-op.
pub fn push_settlement(env: &Env, to: &Address, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let asset = read_settlement_asset(env)?;
    let amount = to_i128(amount)?;
    let pool = env.current_contract_address();
    match token::Client::new(env, &asset).try_transfer(&pool, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::SettlementTransferFailed),
    }
}
