use soroban_sdk::{contracttype, Address, Symbol, Val, Vec, U256};

pub use zkmultisig_crypto::Point;
pub use zkmultisig_groth16::Proof;

/// Call forwarded to the proposal target once the proposal is accepted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payload {
    pub function: Symbol,
    pub args: Vec<Val>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalContent {
    pub target: Address,
    /// Native token amount moved from the executor's caller to `target`.
    pub value: i128,
    pub payload: Option<Payload>,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProposalStatus {
    None = 0,
    Voting = 1,
    Accepted = 2,
    Rejected = 3,
    Executed = 4,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum KeyType {
    Permanent = 1,
    Rotation = 2,
}

/// ElGamal ciphertext `(k·G, M + k·EncKey)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ciphertext {
    pub c1: Point,
    pub c2: Point,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteParams {
    pub encrypted_vote: Ciphertext,
    pub decryption_key_share: U256,
    pub key_nullifier: U256,
    pub blinder: U256,
    pub cmt_root: U256,
    /// Replacement rotation key derived by the voter
    pub rotation_key: Point,
    pub proof: Proof,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalInfo {
    pub content: ProposalContent,
    pub status: ProposalStatus,
    pub votes_count: u32,
    pub required_quorum: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalRecord {
    pub content: ProposalContent,
    pub status: ProposalStatus,
    pub votes_count: u32,
    pub participants_count: u32,
    pub required_quorum: u32,
    pub challenge: U256,
    pub encryption_key: Point,
    pub aggregated_votes: Ciphertext,
    /// Sum of decryption key shares modulo the subgroup order
    pub decryption_key: U256,
}

/// Deployment parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultisigConfig {
    pub participants_tree: Address,
    pub creation_verifier: Address,
    pub voting_verifier: Address,
    pub native_token: Address,
    pub quorum_percentage: u128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    ParticipantsTree,
    CreationVerifier,
    VotingVerifier,
    NativeToken,
    QuorumPercentage,
    PermanentKeys,
    RotationKeys,
    CumulativePermanentKey,
    CumulativeRotationKey,
    CurrentProposal,
    ProposalsCount,
    ProposalAt(u32),
    Proposal(U256),
    Blinders(U256),
    BlinderUsed(U256, U256),
    NullifierUsed(U256),
    Dispatching,
}
