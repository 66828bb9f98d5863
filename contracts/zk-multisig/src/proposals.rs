//! Proposal lifecycle: NONE -> VOTING -> ACCEPTED | REJECTED, ACCEPTED -> EXECUTED.
//! At most one proposal is in VOTING at a time.

use soroban_sdk::{vec, xdr::ToXdr, Address, Bytes, BytesN, Env, Vec, U256};
use zkmultisig_crypto::reduce_to_field;

use crate::ballot;
use crate::errors::MultisigError;
use crate::events::{
    ProposalCreatedEvent, ProposalDeactivatedEvent, ProposalExecutedEvent, ProposalRevealedEvent,
    ProposalVotedEvent,
};
use crate::executor::{self, SelfCall};
use crate::ledger;
use crate::oracle::require_valid_proof;
use crate::registry;
use crate::types::{DataKey, ProposalContent, ProposalRecord, ProposalStatus, Proof, VoteParams};

/// Fixed-point scale of the quorum percentage.
pub const PRECISION: u128 = 10_000_000_000_000_000_000_000_000;
pub const PERCENTAGE_100: u128 = 100 * PRECISION;

const ROTATION_DOMAIN: &[u8] = b"ZKMultisig.rotation";

fn keccak_to_field(env: &Env, data: &Bytes) -> U256 {
    let digest: BytesN<32> = env.crypto().keccak256(data).into();
    reduce_to_field(env, &U256::from_be_bytes(env, &Bytes::from(digest)))
}

fn contract_context(env: &Env) -> Bytes {
    let mut data = Bytes::from_array(env, &env.ledger().network_id().to_array());
    data.append(&env.current_contract_address().to_xdr(env));
    data
}

/// `keccak(xdr(content) || salt) mod p`
pub fn compute_id(env: &Env, content: &ProposalContent, salt: &U256) -> U256 {
    let mut data = content.clone().to_xdr(env);
    data.append(&salt.to_be_bytes());
    keccak_to_field(env, &data)
}

/// Binds creation proofs to this network, this contract and the proposal.
pub fn challenge(env: &Env, proposal_id: &U256) -> U256 {
    let mut data = contract_context(env);
    data.append(&proposal_id.to_be_bytes());
    keccak_to_field(env, &data)
}

/// Message the voting circuit mixes into the next rotation secret.
pub fn rotation_kdf_msg(env: &Env, proposal_id: &U256) -> U256 {
    let mut data = Bytes::from_slice(env, ROTATION_DOMAIN);
    data.append(&contract_context(env));
    data.append(&proposal_id.to_be_bytes());
    keccak_to_field(env, &data)
}

pub fn quorum_percentage(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::QuorumPercentage)
        .unwrap_or(0)
}

/// `floor(participants * quorum / 100%)`
pub fn required_quorum(env: &Env, participants: u32) -> u32 {
    (participants as u128 * quorum_percentage(env) / PERCENTAGE_100) as u32
}

pub fn current_id(env: &Env) -> Option<U256> {
    env.storage().instance().get(&DataKey::CurrentProposal)
}

pub fn proposals_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ProposalsCount)
        .unwrap_or(0)
}

pub fn proposal_ids(env: &Env, offset: u32, limit: u32) -> Vec<U256> {
    let count = proposals_count(env);
    let end = offset.saturating_add(limit).min(count);
    let mut ids = Vec::new(env);
    for index in offset..end {
        if let Some(id) = env.storage().persistent().get(&DataKey::ProposalAt(index)) {
            ids.push_back(id);
        }
    }
    ids
}

pub fn find(env: &Env, proposal_id: &U256) -> Option<ProposalRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(proposal_id.clone()))
}

pub fn load(env: &Env, proposal_id: &U256) -> ProposalRecord {
    find(env, proposal_id).unwrap_or_else(|| {
        fail!(
            env,
            MultisigError::ProposalNotFound,
            "unknown proposal",
            proposal_id.clone()
        )
    })
}

pub fn status(env: &Env, proposal_id: &U256) -> ProposalStatus {
    find(env, proposal_id)
        .map(|record| record.status)
        .unwrap_or(ProposalStatus::None)
}

fn save(env: &Env, proposal_id: &U256, record: &ProposalRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::Proposal(proposal_id.clone()), record);
}

/// Record of the proposal currently open for votes.
fn voting_record(env: &Env) -> (U256, ProposalRecord) {
    let Some(proposal_id) = current_id(env) else {
        fail!(
            env,
            MultisigError::NotVoting,
            "no current proposal",
            ProposalStatus::None as u32
        )
    };
    let record = load(env, &proposal_id);
    if record.status != ProposalStatus::Voting {
        fail!(
            env,
            MultisigError::NotVoting,
            "proposal is not voting",
            record.status as u32
        );
    }
    (proposal_id, record)
}

pub fn create(env: &Env, content: ProposalContent, salt: U256, proof: Proof) -> U256 {
    if content.target == executor::zero_address(env) {
        fail!(env, MultisigError::ZeroTarget);
    }
    if content.value < 0 {
        fail!(env, MultisigError::InvalidValue, "negative value", content.value);
    }

    let proposal_id = compute_id(env, &content, &salt);
    if find(env, &proposal_id).is_some() {
        fail!(
            env,
            MultisigError::ProposalExists,
            "proposal exists",
            proposal_id.clone()
        );
    }
    if let Some(current) = current_id(env) {
        if status(env, &current) == ProposalStatus::Voting {
            fail!(
                env,
                MultisigError::ActiveProposal,
                "another proposal is voting",
                current
            );
        }
    }

    let challenge = challenge(env, &proposal_id);
    require_valid_proof(
        env,
        &executor::creation_verifier(env),
        &proof,
        &vec![env, registry::cmt_root(env), challenge.clone()],
    );

    let cumulative_rotation = registry::start_rotation_epoch(env);
    let encryption_key = ballot::encryption_key(
        env,
        &challenge,
        &registry::cumulative_permanent_key(env),
        &cumulative_rotation,
    );
    let participants_count = registry::participants_count(env);

    let record = ProposalRecord {
        content: content.clone(),
        status: ProposalStatus::Voting,
        votes_count: 0,
        participants_count,
        required_quorum: required_quorum(env, participants_count),
        challenge,
        encryption_key,
        aggregated_votes: ballot::empty(env),
        decryption_key: U256::from_u32(env, 0),
    };
    save(env, &proposal_id, &record);

    let index = proposals_count(env);
    env.storage()
        .persistent()
        .set(&DataKey::ProposalAt(index), &proposal_id);
    env.storage()
        .instance()
        .set(&DataKey::ProposalsCount, &(index + 1));
    env.storage()
        .instance()
        .set(&DataKey::CurrentProposal, &proposal_id);

    ProposalCreatedEvent {
        proposal_id: proposal_id.clone(),
        content,
    }
    .publish(env);

    proposal_id
}

pub fn vote(env: &Env, params: VoteParams) {
    let (proposal_id, mut record) = voting_record(env);

    ledger::require_unspent(env, &proposal_id, &params.blinder, &params.key_nullifier);

    if params.cmt_root != registry::cmt_root(env) {
        fail!(
            env,
            MultisigError::InvalidCMTRoot,
            "stale membership root",
            params.cmt_root.clone()
        );
    }

    let ballot = &params.encrypted_vote;
    registry::require_on_curve(env, &ballot.c1);
    registry::require_on_curve(env, &ballot.c2);
    registry::require_on_curve(env, &params.rotation_key);

    let signals = vec![
        env,
        record.encryption_key.x.clone(),
        record.encryption_key.y.clone(),
        record.challenge.clone(),
        proposal_id.clone(),
        params.cmt_root.clone(),
        ballot.c1.x.clone(),
        ballot.c1.y.clone(),
        ballot.c2.x.clone(),
        ballot.c2.y.clone(),
        params.decryption_key_share.clone(),
        rotation_kdf_msg(env, &proposal_id),
        params.blinder.clone(),
        params.key_nullifier.clone(),
        params.rotation_key.x.clone(),
        params.rotation_key.y.clone(),
    ];
    require_valid_proof(env, &executor::voting_verifier(env), &params.proof, &signals);

    ledger::spend(env, &proposal_id, &params.blinder, &params.key_nullifier);
    registry::push_rotation_key(env, &params.rotation_key);
    ballot::accumulate(env, &mut record, ballot, &params.decryption_key_share);
    record.votes_count += 1;
    save(env, &proposal_id, &record);

    ProposalVotedEvent {
        proposal_id,
        blinder: params.blinder,
    }
    .publish(env);
}

/// Closes voting on the current proposal. Everyone must have voted and
/// `approvals` must be the plaintext of the aggregate.
pub fn reveal(env: &Env, approvals: u32) -> bool {
    let (proposal_id, mut record) = voting_record(env);

    if record.votes_count != record.participants_count {
        fail!(
            env,
            MultisigError::VoteCountMismatch,
            "not every participant voted",
            record.votes_count,
            record.participants_count
        );
    }
    if !ballot::tally_matches(env, &record, approvals) {
        fail!(
            env,
            MultisigError::VoteCountMismatch,
            "claimed approvals do not decrypt",
            approvals
        );
    }

    let accepted = approvals >= record.required_quorum;
    record.status = if accepted {
        ProposalStatus::Accepted
    } else {
        ProposalStatus::Rejected
    };
    save(env, &proposal_id, &record);

    ProposalRevealedEvent {
        proposal_id,
        accepted,
    }
    .publish(env);

    accepted
}

pub fn execute(env: &Env, proposal_id: U256, caller: Address, value: i128) {
    let mut record = find(env, &proposal_id)
        .filter(|record| record.status == ProposalStatus::Accepted)
        .unwrap_or_else(|| {
            fail!(
                env,
                MultisigError::ProposalNotAccepted,
                "proposal not accepted",
                proposal_id.clone()
            )
        });
    if value != record.content.value {
        fail!(
            env,
            MultisigError::InvalidValue,
            "value mismatch",
            value,
            record.content.value
        );
    }

    record.status = ProposalStatus::Executed;
    save(env, &proposal_id, &record);

    executor::dispatch(env, &record.content, &caller);

    ProposalExecutedEvent {
        proposal_id,
        target: record.content.target,
    }
    .publish(env);
}

/// Returns a proposal to NONE. Executed proposals are history and stay put.
pub fn deactivate(env: &Env, _auth: &SelfCall, proposal_id: U256) {
    let mut record = load(env, &proposal_id);
    let previous_status = record.status;
    if previous_status == ProposalStatus::Executed {
        fail!(
            env,
            MultisigError::ProposalNotFound,
            "executed proposals cannot be deactivated",
            proposal_id.clone()
        );
    }

    record.status = ProposalStatus::None;
    save(env, &proposal_id, &record);
    if current_id(env).as_ref() == Some(&proposal_id) {
        env.storage().instance().remove(&DataKey::CurrentProposal);
    }

    ProposalDeactivatedEvent {
        proposal_id,
        previous_status,
    }
    .publish(env);
}
