//! Per-tranche share ledger. Only the pool mints and burns. Every balance
//! change shifts a magnified correction so that no holder's accrued
//! entitlement moves with the shares.

use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::storage::*;
use crate::waterfall::correction_for;

pub fn balance(env: &Env, tranche: u32, holder: &Address) -> u128 {
    read_share_balance(env, tranche, holder)
}

pub fn supply(env: &Env, tranche: u32) -> u128 {
    read_share_supply(env, tranche)
}

fn adjust_correction(
    env: &Env,
    tranche: u32,
    holder: &Address,
    flow: Flow,
    delta: i128,
) -> Result<(), Error> {
    let current = read_correction(env, tranche, holder, flow);
    let next = current.checked_add(delta).ok_or(Error::MathOverflow)?;
    write_correction(env, tranche, holder, flow, next);
    Ok(())
}

pub fn mint(env: &Env, tranche: u32, to: &Address, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    for flow in FLOWS {
        let shift = correction_for(read_index(env, tranche, flow), amount)?;
        adjust_correction(env, tranche, to, flow, -shift)?;
    }
    let bal = balance(env, tranche, to)
        .checked_add(amount)
        .ok_or(Error::MathOverflow)?;
    let total = supply(env, tranche)
        .checked_add(amount)
        .ok_or(Error::MathOverflow)?;
    write_share_balance(env, tranche, to, bal);
    write_share_supply(env, tranche, total);
    Ok(())
}

pub fn burn(env: &Env, tranche: u32, from: &Address, amount: u128) -> Result<(), Error> {
    let bal = balance(env, tranche, from);
    if bal < amount {
        return Err(Error::InsufficientShares);
    }
    for flow in FLOWS {
        let shift = correction_for(read_index(env, tranche, flow), amount)?;
        adjust_correction(env, tranche, from, flow, shift)?;
    }
    let total = supply(env, tranche)
        .checked_sub(amount)
        .ok_or(Error::MathOverflow)?;
    write_share_balance(env, tranche, from, bal - amount);
    write_share_supply(env, tranche, total);
    Ok(())
}

/// Moves shares between holders; supply is unchanged.
pub fn transfer(
    env: &Env,
    tranche: u32,
    from: &Address,
    to: &Address,
    amount: u128,
) -> Result<(), Error> {
    let from_bal = balance(env, tranche, from);
    if from_bal < amount {
        return Err(Error::InsufficientShares);
    }
    if from == to {
        return Ok(());
    }
    for flow in FLOWS {
        let shift = correction_for(read_index(env, tranche, flow), amount)?;
        adjust_correction(env, tranche, from, flow, shift)?;
        adjust_correction(env, tranche, to, flow, -shift)?;
    }
    let to_bal = balance(env, tranche, to)
        .checked_add(amount)
        .ok_or(Error::MathOverflow)?;
    write_share_balance(env, tranche, from, from_bal - amount);
    write_share_balance(env, tranche, to, to_bal);
    Ok(())
}
