#![no_std]
//! Threshold multisig with private ballots.
//!
//! Participants hold a permanent and a rotation BabyJubJub key pair. Proposals
//! are opened with a membership proof, voted on with ElGamal-encrypted ballots
//! and per-vote Groth16 proofs, revealed homomorphically and, once the quorum
//! approves, executed by the contract itself.

#[macro_use]
mod errors;

mod ballot;
mod events;
mod executor;
mod ledger;
mod oracle;
mod proposals;
mod registry;
mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec, U256};

pub use errors::MultisigError;
pub use events::*;
pub use oracle::{
    MembershipOracle, MembershipOracleClient, MembershipProof, ProofVerifier, ProofVerifierClient,
};
pub use proposals::{PERCENTAGE_100, PRECISION};
pub use types::{
    Ciphertext, KeyType, MultisigConfig, Payload, Point, Proof, ProposalContent, ProposalInfo,
    ProposalStatus, VoteParams,
};

use executor::{SelfCall, VerifierKind};
use types::DataKey;

#[contract]
pub struct ZkMultisig;

#[contractimpl]
impl ZkMultisig {
    /// Wires the collaborators and registers the initial participants.
    pub fn __constructor(
        env: Env,
        config: MultisigConfig,
        permanent_keys: Vec<Point>,
        rotation_keys: Vec<Point>,
    ) {
        executor::validate_quorum(&env, config.quorum_percentage, None);
        executor::init_verifier(&env, VerifierKind::Creation, &config.creation_verifier);
        executor::init_verifier(&env, VerifierKind::Voting, &config.voting_verifier);

        let storage = env.storage().instance();
        storage.set(&DataKey::ParticipantsTree, &config.participants_tree);
        storage.set(&DataKey::NativeToken, &config.native_token);
        storage.set(&DataKey::QuorumPercentage, &config.quorum_percentage);

        registry::add_participants(&env, &SelfCall::trusted(), permanent_keys, rotation_keys);
    }

    // Proposal lifecycle

    /// Opens a proposal. `proof` shows membership under the current root for
    /// the proposal's challenge. Returns the proposal id.
    pub fn create(env: Env, content: ProposalContent, salt: U256, proof: Proof) -> U256 {
        proposals::create(&env, content, salt, proof)
    }

    /// Casts an encrypted ballot on the current proposal.
    pub fn vote(env: Env, params: VoteParams) {
        proposals::vote(&env, params)
    }

    pub fn reveal(env: Env, approvals: u32) -> bool {
        proposals::reveal(&env, approvals)
    }

    /// Runs an accepted proposal. `value` must equal the proposal's value and
    /// is pulled from `caller`.
    pub fn execute(env: Env, proposal_id: U256, caller: Address, value: i128) {
        proposals::execute(&env, proposal_id, caller, value)
    }

    /// Reveals the current proposal and executes it when accepted.
    pub fn reveal_and_execute(env: Env, approvals: u32, caller: Address, value: i128) -> bool {
        let Some(proposal_id) = proposals::current_id(&env) else {
            fail!(&env, MultisigError::NotVoting);
        };
        let accepted = proposals::reveal(&env, approvals);
        if accepted {
            proposals::execute(&env, proposal_id, caller, value);
        }
        accepted
    }

    // Governance operations, reachable only through an executed proposal

    pub fn add_participants(env: Env, permanent_keys: Vec<Point>, rotation_keys: Vec<Point>) {
        let auth = executor::require_self_call(&env);
        registry::add_participants(&env, &auth, permanent_keys, rotation_keys);
    }

    pub fn remove_participants(env: Env, permanent_keys: Vec<Point>) {
        let auth = executor::require_self_call(&env);
        registry::remove_participants(&env, &auth, permanent_keys);
    }

    pub fn update_quorum_percentage(env: Env, quorum_percentage: u128) {
        let auth = executor::require_self_call(&env);
        executor::update_quorum(&env, &auth, quorum_percentage);
    }

    pub fn update_creation_verifier(env: Env, verifier: Address) {
        let auth = executor::require_self_call(&env);
        executor::update_verifier(&env, &auth, VerifierKind::Creation, verifier);
    }

    pub fn update_voting_verifier(env: Env, verifier: Address) {
        let auth = executor::require_self_call(&env);
        executor::update_verifier(&env, &auth, VerifierKind::Voting, verifier);
    }

    pub fn deactivate_proposal(env: Env, proposal_id: U256) {
        let auth = executor::require_self_call(&env);
        proposals::deactivate(&env, &auth, proposal_id);
    }

    // Participants

    /// Returns `(permanent_keys, rotation_keys)`.
    pub fn get_participants(env: Env) -> (Vec<Point>, Vec<Point>) {
        (registry::permanent_keys(&env), registry::rotation_keys(&env))
    }

    pub fn get_participants_count(env: Env) -> u32 {
        registry::participants_count(&env)
    }

    pub fn get_cumulative_permanent_key(env: Env) -> Point {
        registry::cumulative_permanent_key(&env)
    }

    pub fn get_cumulative_rotation_key(env: Env) -> Point {
        registry::cumulative_rotation_key(&env)
    }

    pub fn get_participants_cmt_root(env: Env) -> U256 {
        registry::cmt_root(&env)
    }

    pub fn get_participants_proof(env: Env, leaf: U256, max_depth: u32) -> MembershipProof {
        registry::cmt_proof(&env, &leaf, max_depth)
    }

    pub fn get_key_leaf(env: Env, key: Point, key_type: KeyType) -> U256 {
        registry::leaf(&env, &key, key_type)
    }

    // Proposals

    pub fn compute_proposal_id(env: Env, content: ProposalContent, salt: U256) -> U256 {
        proposals::compute_id(&env, &content, &salt)
    }

    pub fn get_current_proposal_id(env: Env) -> Option<U256> {
        proposals::current_id(&env)
    }

    pub fn get_proposals_count(env: Env) -> u32 {
        proposals::proposals_count(&env)
    }

    /// Ids in creation order, `limit` entries starting at `offset`.
    pub fn get_proposals_ids(env: Env, offset: u32, limit: u32) -> Vec<U256> {
        proposals::proposal_ids(&env, offset, limit)
    }

    pub fn get_proposal_status(env: Env, proposal_id: U256) -> ProposalStatus {
        proposals::status(&env, &proposal_id)
    }

    pub fn get_proposal_info(env: Env, proposal_id: U256) -> ProposalInfo {
        let record = proposals::load(&env, &proposal_id);
        ProposalInfo {
            content: record.content,
            status: record.status,
            votes_count: record.votes_count,
            required_quorum: record.required_quorum,
        }
    }

    pub fn get_proposal_challenge(env: Env, proposal_id: U256) -> U256 {
        proposals::challenge(&env, &proposal_id)
    }

    pub fn get_rotation_kdf_msg(env: Env, proposal_id: U256) -> U256 {
        proposals::rotation_kdf_msg(&env, &proposal_id)
    }

    pub fn get_encryption_key(env: Env, proposal_id: U256) -> Point {
        proposals::load(&env, &proposal_id).encryption_key
    }

    pub fn get_aggregated_votes(env: Env, proposal_id: U256) -> Ciphertext {
        proposals::load(&env, &proposal_id).aggregated_votes
    }

    pub fn get_decryption_key(env: Env, proposal_id: U256) -> U256 {
        proposals::load(&env, &proposal_id).decryption_key
    }

    /// Quorum a proposal created now would need.
    pub fn get_required_quorum(env: Env) -> u32 {
        proposals::required_quorum(&env, registry::participants_count(&env))
    }

    // Ledger

    pub fn is_rotation_key_nullifier_used(env: Env, nullifier: U256) -> bool {
        ledger::is_nullifier_used(&env, &nullifier)
    }

    pub fn is_blinder_used(env: Env, proposal_id: U256, blinder: U256) -> bool {
        ledger::is_blinder_used(&env, &proposal_id, &blinder)
    }

    pub fn get_proposal_blinders(env: Env, proposal_id: U256) -> Vec<U256> {
        ledger::blinders(&env, &proposal_id)
    }

    // Configuration

    pub fn get_quorum_percentage(env: Env) -> u128 {
        proposals::quorum_percentage(&env)
    }

    pub fn get_creation_verifier(env: Env) -> Address {
        executor::creation_verifier(&env)
    }

    pub fn get_voting_verifier(env: Env) -> Address {
        executor::voting_verifier(&env)
    }

    pub fn get_participants_tree(env: Env) -> Address {
        registry::oracle(&env).address
    }

    pub fn get_native_token(env: Env) -> Address {
        executor::native_token(&env)
    }
}

// Governance entrypoints without the proposal round trip. Test builds only.
#[cfg(any(test, feature = "testutils"))]
#[contractimpl]
impl ZkMultisig {
    pub fn test_add_participants(env: Env, permanent_keys: Vec<Point>, rotation_keys: Vec<Point>) {
        registry::add_participants(&env, &SelfCall::trusted(), permanent_keys, rotation_keys);
    }

    pub fn test_remove_participants(env: Env, permanent_keys: Vec<Point>) {
        registry::remove_participants(&env, &SelfCall::trusted(), permanent_keys);
    }

    pub fn test_update_quorum(env: Env, quorum_percentage: u128) {
        executor::update_quorum(&env, &SelfCall::trusted(), quorum_percentage);
    }
}
