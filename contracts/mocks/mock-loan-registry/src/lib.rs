#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

/// Same shape as the record the pool decodes from `lookup`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRecord {
    pub value: u128,
    pub originator: Address,
}

#[contracttype]
enum DataKey {
    Loan(u64),
    Owner(u64),
}

/// Loan registry and collateral NFT ledger in one contract.
#[contract]
pub struct MockLoanRegistry;

#[contractimpl]
impl MockLoanRegistry {
    pub fn register_loan(env: Env, originator: Address, loan_id: u64, value: u128) {
        if env.storage().persistent().has(&DataKey::Loan(loan_id)) {
            panic!("loan exists");
        }
        let record = LoanRecord {
            value,
            originator: originator.clone(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::Loan(loan_id), &record);
        env.storage()
            .persistent()
            .set(&DataKey::Owner(loan_id), &originator);
    }

    /// Rewrites the recorded value, e.g. after a servicing update.
    pub fn set_value(env: Env, loan_id: u64, value: u128) {
        let mut record = get_record(&env, loan_id);
        record.value = value;
        env.storage()
            .persistent()
            .set(&DataKey::Loan(loan_id), &record);
    }

    pub fn lookup(env: Env, loan_id: u64) -> LoanRecord {
        get_record(&env, loan_id)
    }

    pub fn owner_of(env: Env, loan_id: u64) -> Address {
        env.storage()
            .persistent()
            .get(&DataKey::Owner(loan_id))
            .expect("unknown loan")
    }

    pub fn transfer(env: Env, from: Address, to: Address, loan_id: u64) {
        from.require_auth();
        let owner = Self::owner_of(env.clone(), loan_id);
        if owner != from {
            panic!("not owner");
        }
        env.storage()
            .persistent()
            .set(&DataKey::Owner(loan_id), &to);
    }
}

fn get_record(env: &Env, loan_id: u64) -> LoanRecord {
    env.storage()
        .persistent()
        .get(&DataKey::Loan(loan_id))
        .expect("unknown loan")
}
