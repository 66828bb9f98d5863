//! Homomorphic ElGamal tally over BabyJubJub.
//!
//! Each proposal encrypts to `EncKey = h1·CumPerm + h2·CumRot` where
//! `h1 = Poseidon(challenge)` and `h2 = Poseidon(h1)`. Ballots add up
//! component-wise and the decryption key is the sum of the voters' shares
//! `h1·sk1 + h2·sk2 mod l`, so `C2 - D·C1 = approvals·G` on reveal.

use soroban_sdk::{Env, U256};
use zkmultisig_crypto::{poseidon, scalar_from_u256, scalar_to_u256, Point};

use crate::types::{Ciphertext, ProposalRecord};

pub fn key_coefficients(env: &Env, challenge: &U256) -> (U256, U256) {
    let h1 = poseidon::hash1(env, challenge);
    let h2 = poseidon::hash1(env, &h1);
    (h1, h2)
}

pub fn encryption_key(
    env: &Env,
    challenge: &U256,
    cumulative_permanent: &Point,
    cumulative_rotation: &Point,
) -> Point {
    let (h1, h2) = key_coefficients(env, challenge);
    cumulative_permanent
        .mul(env, &h1)
        .add(env, &cumulative_rotation.mul(env, &h2))
}

pub fn empty(env: &Env) -> Ciphertext {
    Ciphertext {
        c1: Point::identity(env),
        c2: Point::identity(env),
    }
}

/// Folds one ballot and its key share into the proposal's aggregate.
pub fn accumulate(env: &Env, record: &mut ProposalRecord, ballot: &Ciphertext, share: &U256) {
    record.aggregated_votes = Ciphertext {
        c1: record.aggregated_votes.c1.add(env, &ballot.c1),
        c2: record.aggregated_votes.c2.add(env, &ballot.c2),
    };
    let decryption_key = scalar_from_u256(&record.decryption_key) + scalar_from_u256(share);
    record.decryption_key = scalar_to_u256(env, &decryption_key);
}

/// Checks `C2 - D·C1 == approvals·G`.
pub fn tally_matches(env: &Env, record: &ProposalRecord, approvals: u32) -> bool {
    let aggregate = &record.aggregated_votes;
    let decryption_key = scalar_from_u256(&record.decryption_key);
    let decrypted = aggregate
        .c2
        .sub(env, &aggregate.c1.mul_scalar(env, &decryption_key));
    decrypted == Point::generator(env).mul(env, &U256::from_u32(env, approvals))
}
