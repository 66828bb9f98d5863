//! Client interfaces for the contracts the multisig delegates to.

use soroban_sdk::{contractclient, contracttype, Address, Env, Vec, U256};

use crate::errors::MultisigError;
use crate::types::Proof;

/// Proof-of-verification oracle. Any Groth16 verifier contract exposing
/// `verify(proof, pub_signals) -> bool` can be plugged in.
#[contractclient(name = "ProofVerifierClient")]
pub trait ProofVerifier {
    fn verify(env: Env, proof: Proof, pub_signals: Vec<U256>) -> bool;
}

/// Sparse Merkle membership oracle owned by the multisig.
#[contractclient(name = "MembershipOracleClient")]
pub trait MembershipOracle {
    fn insert(env: Env, leaf: U256) -> bool;
    fn remove(env: Env, leaf: U256) -> bool;
    fn root(env: Env) -> U256;
    fn contains(env: Env, leaf: U256) -> bool;
    fn prove(env: Env, leaf: U256, max_depth: u32) -> MembershipProof;
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipProof {
    pub root: U256,
    pub siblings: Vec<U256>,
    pub siblings_length: u32,
    pub direction_bits: u64,
    pub existence: bool,
}

/// Aborts with `InvalidProof` unless the verifier returns `true`.
/// A verifier that traps or returns garbage counts as a rejection.
pub fn require_valid_proof(env: &Env, verifier: &Address, proof: &Proof, signals: &Vec<U256>) {
    let accepted = matches!(
        ProofVerifierClient::new(env, verifier).try_verify(proof, signals),
        Ok(Ok(true))
    );
    if !accepted {
        fail!(env, MultisigError::InvalidProof, "proof rejected", verifier.clone());
    }
}
