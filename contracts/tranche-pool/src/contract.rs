use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

use crate::constants::*;
use crate::distribution;
use crate::errors::Error;
use crate::events::*;
use crate::helpers::*;
use crate::shares;
use crate::storage::*;
use crate::waterfall;

#[contract]
pub struct TranchePool;

#[contractimpl]
impl TranchePool {
    /// Configures the pool. Everything set here is immutable.
    pub fn __constructor(
        env: Env,
        originator: Address,
        loan_registry: Address,
        collateral_ledger: Address,
        settlement_asset: Address,
        maturity: u64,
    ) {
        write_config(
            &env,
            &originator,
            &loan_registry,
            &collateral_ledger,
            &settlement_asset,
            maturity,
        );
        bump_core_ttl(&env);
    }

    /// Originator: take custody of a batch of loans. The whole batch is
    /// rejected if any loan is unknown, already pooled, repeated, or fails
    /// to transfer. Returns the recorded value added to the pool.
    pub fn pool_loans(env: Env, originator: Address, loan_ids: Vec<u64>) -> Result<u128, Error> {
        bump_core_ttl(&env);
        require_originator(&env, &originator)?;
        if is_defined(&env) {
            return Err(Error::TranchesAlreadyDefined);
        }
        if loan_ids.is_empty() {
            return Err(Error::EmptyBatch);
        }
        if loan_ids.len() > MAX_POOL_BATCH {
            return Err(Error::BatchTooLarge);
        }

        let mut seen: Vec<u64> = Vec::new(&env);
        let mut batch: Vec<PooledLoan> = Vec::new(&env);
        let mut batch_value: u128 = 0;
        for loan_id in loan_ids.iter() {
            if is_pooled(&env, loan_id) || seen.contains(loan_id) {
                return Err(Error::DuplicateLoan);
            }
            let record = lookup_loan(&env, loan_id)?;
            batch_value = batch_value
                .checked_add(record.value)
                .ok_or(Error::MathOverflow)?;
            seen.push_back(loan_id);
            batch.push_back(PooledLoan {
                loan_id,
                value: record.value,
            });
        }

        let mut position = read_loan_count(&env);
        for loan in batch.iter() {
            write_loan(&env, position, &loan);
            mark_pooled(&env, loan.loan_id);
            position = position.checked_add(1).ok_or(Error::MathOverflow)?;
        }
        write_loan_count(&env, position);
        let pooled = read_pooled_principal(&env)
            .checked_add(batch_value)
            .ok_or(Error::MathOverflow)?;
        write_pooled_principal(&env, pooled);

        CollateralPooled {
            originator: originator.clone(),
            loan_ids: loan_ids.clone(),
            total_value: batch_value,
        }
        .publish(&env);

        for loan_id in loan_ids.iter() {
            take_custody(&env, &originator, loan_id)?;
        }
        Ok(batch_value)
    }

    /// Originator, once: freeze the pooled principal and split it into
    /// tranches. Each tranche's shares are minted to the pool pending sale.
    pub fn define_tranches(
        env: Env,
        originator: Address,
        names: Vec<String>,
        symbols: Vec<String>,
        principal_weights: Vec<u32>,
        interest_weights: Vec<u32>,
    ) -> Result<u32, Error> {
        bump_core_ttl(&env);
        require_originator(&env, &originator)?;
        if is_defined(&env) {
            return Err(Error::TranchesAlreadyDefined);
        }
        let count = names.len();
        if count == 0 {
            return Err(Error::EmptyTranches);
        }
        if symbols.len() != count
            || principal_weights.len() != count
            || interest_weights.len() != count
        {
            return Err(Error::LengthMismatch);
        }
        if count > MAX_TRANCHES {
            return Err(Error::TooManyTranches);
        }
        waterfall::check_weights(principal_weights.iter())?;
        waterfall::check_weights(interest_weights.iter())?;
        if read_loan_count(&env) == 0 {
            return Err(Error::NoCollateral);
        }

        let total_principal = read_pooled_principal(&env);
        let pool = env.current_contract_address();
        for i in 0..count {
            let principal_weight_bps = principal_weights.get(i).ok_or(Error::LengthMismatch)?;
            let minted = waterfall::slice(total_principal, principal_weight_bps)?;
            let tranche = Tranche {
                index: i,
                name: names.get(i).ok_or(Error::LengthMismatch)?,
                symbol: symbols.get(i).ok_or(Error::LengthMismatch)?,
                principal_weight_bps,
                interest_weight_bps: interest_weights.get(i).ok_or(Error::LengthMismatch)?,
                minted,
            };
            write_tranche(&env, &tranche);
            shares::mint(&env, i, &pool, minted)?;
            TrancheMinted {
                tranche: i,
                name: tranche.name,
                symbol: tranche.symbol,
                principal_weight_bps: tranche.principal_weight_bps,
                interest_weight_bps: tranche.interest_weight_bps,
                minted,
            }
            .publish(&env);
        }
        write_total_principal(&env, total_principal);
        write_tranche_count(&env, count);

        TranchesDefined {
            total_principal,
            tranche_count: count,
        }
        .publish(&env);
        log!(&env, "tranches defined", count, total_principal);
        Ok(count)
    }

    /// Buy unsold shares of `tranche` at par in the settlement asset.
    pub fn buy(env: Env, buyer: Address, tranche: u32, amount: u128) -> Result<(), Error> {
        bump_core_ttl(&env);
        buyer.require_auth();
        ensure_defined(&env)?;
        read_tranche(&env, tranche)?;
        ensure_positive(amount)?;

        let pool = env.current_contract_address();
        if shares::balance(&env, tranche, &pool) < amount {
            return Err(Error::InsufficientShares);
        }
        shares::transfer(&env, tranche, &pool, &buyer, amount)?;
        SharesPurchased {
            buyer: buyer.clone(),
            tranche,
            amount,
        }
        .publish(&env);

        pull_settlement(&env, &buyer, amount)
    }

    /// Distribute interest to every tranche by interest weight. Returns the
    /// amount that reached tranches with holders.
    pub fn deposit_interest(env: Env, depositor: Address, amount: u128) -> Result<u128, Error> {
        bump_core_ttl(&env);
        depositor.require_auth();
        ensure_defined(&env)?;
        ensure_positive(amount)?;

        let attributed = distribution::accrue(&env, Flow::Interest, amount)?;
        InterestDeposited {
            depositor: depositor.clone(),
            amount,
            attributed,
        }
        .publish(&env);
        log!(&env, "interest deposited", amount, attributed);

        pull_settlement(&env, &depositor, amount)?;
        Ok(attributed)
    }

    /// Distribute principal repayments by principal weight. Only at or
    /// after maturity.
    pub fn deposit_principal(env: Env, depositor: Address, amount: u128) -> Result<u128, Error> {
        bump_core_ttl(&env);
        depositor.require_auth();
        ensure_defined(&env)?;
        ensure_matured(&env)?;
        ensure_positive(amount)?;

        let attributed = distribution::accrue(&env, Flow::Principal, amount)?;
        PrincipalDeposited {
            depositor: depositor.clone(),
            amount,
            attributed,
        }
        .publish(&env);
        log!(&env, "principal deposited", amount, attributed);

        pull_settlement(&env, &depositor, amount)?;
        Ok(attributed)
    }

    /// Pay out principal and interest owed to `holder` on one tranche.
    pub fn claim(env: Env, holder: Address, tranche: u32) -> Result<u128, Error> {
        bump_core_ttl(&env);
        holder.require_auth();
        read_tranche(&env, tranche)?;

        let paid = distribution::settle(&env, tranche, &holder)?;
        push_settlement(&env, &holder, paid)?;
        Ok(paid)
    }

    /// Pay out everything owed to `holder` across all tranches.
    pub fn claim_all(env: Env, holder: Address) -> Result<u128, Error> {
        bump_core_ttl(&env);
        holder.require_auth();

        let mut paid: u128 = 0;
        for tranche in 0..read_tranche_count(&env) {
            let owed = distribution::settle(&env, tranche, &holder)?;
            paid = paid.checked_add(owed).ok_or(Error::MathOverflow)?;
        }
        push_settlement(&env, &holder, paid)?;
        Ok(paid)
    }

    /// Move shares between holders. Entitlement accrued so far stays with
    /// the sender.
    pub fn transfer_shares(
        env: Env,
        from: Address,
        to: Address,
        tranche: u32,
        amount: u128,
    ) -> Result<(), Error> {
        bump_core_ttl(&env);
        from.require_auth();
        read_tranche(&env, tranche)?;
        ensure_positive(amount)?;

        shares::transfer(&env, tranche, &from, &to, amount)?;
        SharesTransferred {
            from,
            to,
            tranche,
            amount,
        }
        .publish(&env);
        Ok(())
    }

    /// Originator: burn shares the pool still holds so later deposits are
    /// spread over sold shares only.
    pub fn retire_unsold(
        env: Env,
        originator: Address,
        tranche: u32,
        amount: u128,
    ) -> Result<(), Error> {
        bump_core_ttl(&env);
        require_originator(&env, &originator)?;
        read_tranche(&env, tranche)?;
        ensure_positive(amount)?;

        let pool = env.current_contract_address();
        shares::burn(&env, tranche, &pool, amount)?;
        UnsoldRetired { tranche, amount }.publish(&env);
        log!(&env, "unsold shares retired", tranche, amount);
        Ok(())
    }

    /// Originator: claim what the pool's own unsold shares earned.
    pub fn collect_unsold(env: Env, originator: Address, tranche: u32) -> Result<u128, Error> {
        bump_core_ttl(&env);
        require_originator(&env, &originator)?;
        read_tranche(&env, tranche)?;

        let pool = env.current_contract_address();
        let paid = distribution::settle(&env, tranche, &pool)?;
        if paid > 0 {
            UnsoldCollected {
                tranche,
                amount: paid,
            }
            .publish(&env);
            log!(&env, "unsold distributions collected", tranche, paid);
        }
        push_settlement(&env, &originator, paid)?;
        Ok(paid)
    }

    pub fn originator(env: Env) -> Result<Address, Error> {
        read_originator(&env)
    }

    pub fn maturity(env: Env) -> Result<u64, Error> {
        read_maturity(&env)
    }

    pub fn loan_registry(env: Env) -> Result<Address, Error> {
        read_loan_registry(&env)
    }

    pub fn collateral_ledger(env: Env) -> Result<Address, Error> {
        read_collateral_ledger(&env)
    }

    pub fn settlement_asset(env: Env) -> Result<Address, Error> {
        read_settlement_asset(&env)
    }

    pub fn phase(env: Env) -> Result<Phase, Error> {
        if !is_defined(&env) {
            return Ok(Phase::CollateralOpen);
        }
        if env.ledger().timestamp() < read_maturity(&env)? {
            Ok(Phase::PreMaturity)
        } else {
            Ok(Phase::PostMaturity)
        }
    }

    pub fn loan_count(env: Env) -> u32 {
        read_loan_count(&env)
    }

    /// Pooled loan by pooling order.
    pub fn loan(env: Env, position: u32) -> Result<PooledLoan, Error> {
        read_loan(&env, position)
    }

    pub fn is_pooled(env: Env, loan_id: u64) -> bool {
        is_pooled(&env, loan_id)
    }

    /// Running sum of recorded values of pooled loans.
    pub fn pooled_principal(env: Env) -> u128 {
        read_pooled_principal(&env)
    }

    /// Principal frozen at tranche definition; zero before.
    pub fn total_principal(env: Env) -> u128 {
        read_total_principal(&env)
    }

    pub fn tranche_count(env: Env) -> u32 {
        read_tranche_count(&env)
    }

    pub fn tranche(env: Env, tranche: u32) -> Result<Tranche, Error> {
        read_tranche(&env, tranche)
    }

    pub fn share_balance(env: Env, tranche: u32, holder: Address) -> u128 {
        shares::balance(&env, tranche, &holder)
    }

    pub fn share_supply(env: Env, tranche: u32) -> u128 {
        shares::supply(&env, tranche)
    }

    /// Shares of `tranche` still held by the pool.
    pub fn unsold(env: Env, tranche: u32) -> u128 {
        shares::balance(&env, tranche, &env.current_contract_address())
    }

    pub fn distribution_index(env: Env, tranche: u32, flow: Flow) -> u128 {
        read_index(&env, tranche, flow)
    }

    pub fn withdrawn(env: Env, tranche: u32, holder: Address, flow: Flow) -> u128 {
        read_withdrawn(&env, tranche, &holder, flow)
    }

    pub fn claimable(env: Env, tranche: u32, holder: Address, flow: Flow) -> Result<u128, Error> {
        read_tranche(&env, tranche)?;
        distribution::claimable(&env, tranche, &holder, flow)
    }

    pub fn total_deposited(env: Env, flow: Flow) -> u128 {
        read_total_deposited(&env, flow)
    }

    /// Truncation residue plus slices that found no holders.
    pub fn unattributed(env: Env, flow: Flow) -> u128 {
        read_unattributed(&env, flow)
    }
}
