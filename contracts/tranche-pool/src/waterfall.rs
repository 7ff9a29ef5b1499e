//! Waterfall split and the fixed-point arithmetic behind the distribution
//! index. Everything here is pure and uses floor division only.

use crate::constants::{BPS_DENOMINATOR, INDEX_SCALE_1E18};
use crate::errors::Error;

/// Slice of `amount` owed to a tranche weighted `weight_bps`.
pub fn slice(amount: u128, weight_bps: u32) -> Result<u128, Error> {
    amount
        .checked_mul(weight_bps as u128)
        .map(|v| v / BPS_DENOMINATOR as u128)
        .ok_or(Error::MathOverflow)
}

/// Each weight must lie in `[0, 10000]` and the set must sum to exactly 10000.
pub fn check_weights<I>(weights: I) -> Result<(), Error>
where
    I: IntoIterator<Item = u32>,
{
    let mut sum: u32 = 0;
    for weight in weights {
        if weight > BPS_DENOMINATOR {
            return Err(Error::WeightOutOfRange);
        }
        sum = sum.checked_add(weight).ok_or(Error::WeightSumInvalid)?;
    }
    if sum != BPS_DENOMINATOR {
        return Err(Error::WeightSumInvalid);
    }
    Ok(())
}

/// Index increase for spreading `part` over `supply` shares. Zero supply
/// leaves the index untouched.
pub fn index_delta(part: u128, supply: u128) -> Result<u128, Error> {
    if supply == 0 {
        return Ok(0);
    }
    part.checked_mul(INDEX_SCALE_1E18)
        .map(|v| v / supply)
        .ok_or(Error::MathOverflow)
}

/// Magnified amount a balance movement shifts between two holders.
pub fn correction_for(index: u128, moved: u128) -> Result<i128, Error> {
    let magnified = index.checked_mul(moved).ok_or(Error::MathOverflow)?;
    i128::try_from(magnified).map_err(|_| Error::MathOverflow)
}

/// Cumulative entitlement: `floor((index * balance + correction) / MAG)`.
pub fn entitlement(index: u128, balance: u128, correction: i128) -> Result<u128, Error> {
    let base = index.checked_mul(balance).ok_or(Error::MathOverflow)?;
    let magnified = if correction >= 0 {
        base.checked_add(correction as u128)
    } else {
        base.checked_sub(correction.unsigned_abs())
    }
    .ok_or(Error::MathOverflow)?;
    Ok(magnified / INDEX_SCALE_1E18)
}

#[cfg(test)]
mod test {
    extern crate std;

    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec;

    #[test]
    fn slice_floors() {
        assert_eq!(slice(900, 7_000), Ok(630));
        assert_eq!(slice(900, 3_000), Ok(270));
        assert_eq!(slice(100, 3_333), Ok(33));
        assert_eq!(slice(1, 9_999), Ok(0));
        assert_eq!(slice(u128::MAX, 2), Err(Error::MathOverflow));
    }

    #[test]
    fn weights_must_sum_to_full() {
        assert_eq!(check_weights([6_000, 4_000]), Ok(()));
        assert_eq!(check_weights([10_000]), Ok(()));
        assert_eq!(check_weights([10_000, 0, 0]), Ok(()));
        assert_eq!(check_weights([6_000, 3_000]), Err(Error::WeightSumInvalid));
        assert_eq!(check_weights([10_001]), Err(Error::WeightOutOfRange));
        assert_eq!(check_weights([0u32; 0]), Err(Error::WeightSumInvalid));
    }

    #[test]
    fn index_delta_ignores_empty_supply() {
        assert_eq!(index_delta(70, 0), Ok(0));
        assert_eq!(index_delta(70, 630), Ok(70 * INDEX_SCALE_1E18 / 630));
    }

    #[test]
    fn entitlement_applies_signed_correction() {
        let index = 3 * INDEX_SCALE_1E18;
        assert_eq!(entitlement(index, 10, 0), Ok(30));
        let moved = correction_for(index, 4).unwrap();
        // Sender keeps what 10 shares earned after giving 4 away.
        assert_eq!(entitlement(index, 6, moved), Ok(30));
        // Receiver earned nothing before the move.
        assert_eq!(entitlement(index, 4, -moved), Ok(0));
    }

    fn weight_set() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(1u32..=10_000, 1..8).prop_map(|raw| {
            let total: u64 = raw.iter().map(|w| *w as u64).sum();
            let mut weights: Vec<u32> = raw
                .iter()
                .map(|w| (*w as u64 * 10_000 / total) as u32)
                .collect();
            let assigned: u32 = weights.iter().sum();
            weights[0] += 10_000 - assigned;
            weights
        })
    }

    proptest! {
        #[test]
        fn split_never_exceeds_deposit(amount in 0u128..1_000_000_000_000u128, weights in weight_set()) {
            prop_assert_eq!(check_weights(weights.iter().copied()), Ok(()));
            let mut total = 0u128;
            for w in &weights {
                total += slice(amount, *w).unwrap();
            }
            prop_assert!(total <= amount);
            prop_assert!(amount - total < weights.len() as u128);
        }

        #[test]
        fn holders_never_receive_more_than_the_slice(
            part in 1u128..1_000_000_000u128,
            balances in prop::collection::vec(1u128..1_000_000u128, 1..10),
        ) {
            let supply: u128 = balances.iter().sum();
            let delta = index_delta(part, supply).unwrap();
            let paid: u128 = balances
                .iter()
                .map(|b| entitlement(delta, *b, 0).unwrap())
                .sum();
            prop_assert!(paid <= part);
            // One unit of truncation per holder at most.
            prop_assert!(part - paid <= balances.len() as u128);
        }
    }
}
