//! Spent-set ledger for vote blinders (per proposal) and rotation key
//! nullifiers (global). Entries are never cleared.

use soroban_sdk::{Env, Vec, U256};

use crate::errors::MultisigError;
use crate::types::DataKey;

pub fn is_nullifier_used(env: &Env, nullifier: &U256) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::NullifierUsed(nullifier.clone()))
}

pub fn is_blinder_used(env: &Env, proposal_id: &U256, blinder: &U256) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::BlinderUsed(proposal_id.clone(), blinder.clone()))
}

pub fn blinders(env: &Env, proposal_id: &U256) -> Vec<U256> {
    env.storage()
        .persistent()
        .get(&DataKey::Blinders(proposal_id.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn require_unspent(env: &Env, proposal_id: &U256, blinder: &U256, nullifier: &U256) {
    if is_blinder_used(env, proposal_id, blinder) {
        fail!(env, MultisigError::UsedBlinder, "blinder already used", blinder.clone());
    }
    if is_nullifier_used(env, nullifier) {
        fail!(env, MultisigError::UsedNullifier, "nullifier already used", nullifier.clone());
    }
}

pub fn spend(env: &Env, proposal_id: &U256, blinder: &U256, nullifier: &U256) {
    let storage = env.storage().persistent();
    storage.set(&DataKey::BlinderUsed(proposal_id.clone(), blinder.clone()), &true);
    storage.set(&DataKey::NullifierUsed(nullifier.clone()), &true);

    let mut spent = blinders(env, proposal_id);
    spent.push_back(blinder.clone());
    storage.set(&DataKey::Blinders(proposal_id.clone()), &spent);
}
