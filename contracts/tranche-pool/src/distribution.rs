use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events::Claimed;
use crate::shares;
use crate::storage::*;
use crate::waterfall;

/// Spreads a deposit of `flow` over all tranches by weight and returns the
/// part that reached a tranche with holders. The rest stays unattributed.
pub fn accrue(env: &Env, flow: Flow, amount: u128) -> Result<u128, Error> {
    let mut attributed: u128 = 0;
    for i in 0..read_tranche_count(env) {
        let tranche = read_tranche(env, i)?;
        let part = waterfall::slice(amount, tranche.weight(flow))?;
        let delta = waterfall::index_delta(part, shares::supply(env, i))?;
        if delta == 0 {
            continue;
        }
        let index = read_index(env, i, flow)
            .checked_add(delta)
            .ok_or(Error::MathOverflow)?;
        write_index(env, i, flow, index);
        attributed = attributed.checked_add(part).ok_or(Error::MathOverflow)?;
    }

    let deposited = read_total_deposited(env, flow)
        .checked_add(amount)
        .ok_or(Error::MathOverflow)?;
    write_total_deposited(env, flow, deposited);
    let unattributed = read_unattributed(env, flow)
        .checked_add(amount - attributed)
        .ok_or(Error::MathOverflow)?;
    write_unattributed(env, flow, unattributed);
    Ok(attributed)
}

pub fn entitlement(env: &Env, tranche: u32, holder: &Address, flow: Flow) -> Result<u128, Error> {
    waterfall::entitlement(
        read_index(env, tranche, flow),
        shares::balance(env, tranche, holder),
        read_correction(env, tranche, holder, flow),
    )
}

pub fn claimable(env: &Env, tranche: u32, holder: &Address, flow: Flow) -> Result<u128, Error> {
    let earned = entitlement(env, tranche, holder, flow)?;
    earned
        .checked_sub(read_withdrawn(env, tranche, holder, flow))
        .ok_or(Error::MathOverflow)
}

/// Books everything `holder` is owed on `tranche` as withdrawn and returns
/// the total. The caller pays it out.
pub fn settle(env: &Env, tranche: u32, holder: &Address) -> Result<u128, Error> {
    let mut total: u128 = 0;
    for flow in FLOWS {
        let owed = claimable(env, tranche, holder, flow)?;
        if owed == 0 {
            continue;
        }
        let withdrawn = read_withdrawn(env, tranche, holder, flow)
            .checked_add(owed)
            .ok_or(Error::MathOverflow)?;
        write_withdrawn(env, tranche, holder, flow, withdrawn);
        Claimed {
            holder: holder.clone(),
            tranche,
            flow,
            amount: owed,
        }
        .publish(env);
        total = total.checked_add(owed).ok_or(Error::MathOverflow)?;
    }
    Ok(total)
}
