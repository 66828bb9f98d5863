use soroban_sdk::{Address, Symbol, U256};

use crate::types::{Point, ProposalContent, ProposalStatus};

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantAddedEvent {
    pub permanent_key: Point,
    pub rotation_key: Point,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantRemovedEvent {
    pub permanent_key: Point,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalCreatedEvent {
    #[topic]
    pub proposal_id: U256,
    pub content: ProposalContent,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalVotedEvent {
    #[topic]
    pub proposal_id: U256,
    pub blinder: U256,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalRevealedEvent {
    #[topic]
    pub proposal_id: U256,
    pub accepted: bool,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalExecutedEvent {
    #[topic]
    pub proposal_id: U256,
    pub target: Address,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalDeactivatedEvent {
    #[topic]
    pub proposal_id: U256,
    pub previous_status: ProposalStatus,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct QuorumUpdatedEvent {
    pub old_quorum: u128,
    pub new_quorum: u128,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct VerifierUpdatedEvent {
    #[topic]
    pub kind: Symbol,
    pub verifier: Address,
}
