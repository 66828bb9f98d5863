//! Executes accepted proposals and guards the governance-only entrypoints.
//!
//! Privileged operations take a `&SelfCall`, which only exists while the
//! contract is dispatching one of its own accepted proposals (or during
//! construction). Anything else reaching them fails with `NotAuthorizedCall`.

use soroban_sdk::{token, Address, Env, String, Symbol, TryFromVal, Val, Vec};

use crate::errors::MultisigError;
use crate::events::{QuorumUpdatedEvent, VerifierUpdatedEvent};
use crate::proposals::{self, PERCENTAGE_100};
use crate::types::{DataKey, Payload, Point, ProposalContent};
use crate::ZkMultisig;

const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";
const STRKEY_LEN: usize = 56;

/// Proof that the current invocation is a governance call.
pub struct SelfCall {
    _private: (),
}

impl SelfCall {
    /// Issued to the constructor and test entrypoints.
    pub(crate) fn trusted() -> Self {
        SelfCall { _private: () }
    }
}

pub fn require_self_call(env: &Env) -> SelfCall {
    let dispatching = env
        .storage()
        .instance()
        .get(&DataKey::Dispatching)
        .unwrap_or(false);
    if !dispatching {
        fail!(env, MultisigError::NotAuthorizedCall);
    }
    SelfCall::trusted()
}

pub fn zero_address(env: &Env) -> Address {
    Address::from_str(env, ZERO_CONTRACT)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifierKind {
    Creation,
    Voting,
}

impl VerifierKind {
    fn key(self) -> DataKey {
        match self {
            VerifierKind::Creation => DataKey::CreationVerifier,
            VerifierKind::Voting => DataKey::VotingVerifier,
        }
    }

    fn name(self, env: &Env) -> Symbol {
        match self {
            VerifierKind::Creation => Symbol::new(env, "creation"),
            VerifierKind::Voting => Symbol::new(env, "voting"),
        }
    }
}

fn verifier(env: &Env, kind: VerifierKind) -> Address {
    env.storage()
        .instance()
        .get(&kind.key())
        .unwrap_or_else(|| fail!(env, MultisigError::ZeroVerifier))
}

pub fn creation_verifier(env: &Env) -> Address {
    verifier(env, VerifierKind::Creation)
}

pub fn voting_verifier(env: &Env) -> Address {
    verifier(env, VerifierKind::Voting)
}

pub fn native_token(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::NativeToken)
        .unwrap_or_else(|| fail!(env, MultisigError::InvalidValue))
}

fn is_contract(address: &Address) -> bool {
    let strkey: String = address.to_string();
    if strkey.len() as usize != STRKEY_LEN {
        return false;
    }
    let mut buf = [0u8; STRKEY_LEN];
    strkey.copy_into_slice(&mut buf);
    buf[0] == b'C' && address.executable().is_some()
}

pub fn validate_quorum(env: &Env, quorum: u128, current: Option<u128>) {
    if quorum == 0 || quorum >= PERCENTAGE_100 || current == Some(quorum) {
        fail!(env, MultisigError::InvalidQuorum, "invalid quorum", quorum);
    }
}

pub fn update_quorum(env: &Env, _auth: &SelfCall, quorum: u128) {
    let old_quorum = proposals::quorum_percentage(env);
    validate_quorum(env, quorum, Some(old_quorum));
    env.storage()
        .instance()
        .set(&DataKey::QuorumPercentage, &quorum);

    QuorumUpdatedEvent {
        old_quorum,
        new_quorum: quorum,
    }
    .publish(env);
}

pub fn update_verifier(env: &Env, _auth: &SelfCall, kind: VerifierKind, new_verifier: Address) {
    if new_verifier == zero_address(env) {
        fail!(env, MultisigError::ZeroVerifier);
    }
    if !is_contract(&new_verifier) {
        fail!(
            env,
            MultisigError::NotAContract,
            "verifier is not a contract",
            new_verifier.clone()
        );
    }
    if verifier(env, kind) == new_verifier {
        fail!(
            env,
            MultisigError::DuplicateVerifier,
            "verifier unchanged",
            new_verifier.clone()
        );
    }
    env.storage().instance().set(&kind.key(), &new_verifier);

    VerifierUpdatedEvent {
        kind: kind.name(env),
        verifier: new_verifier,
    }
    .publish(env);
}

/// Stores a verifier at deployment, when only the zero address is rejected.
pub fn init_verifier(env: &Env, kind: VerifierKind, address: &Address) {
    if *address == zero_address(env) {
        fail!(env, MultisigError::ZeroVerifier);
    }
    env.storage().instance().set(&kind.key(), address);
}

/// Moves `content.value` from `caller` to the target, then forwards the payload.
pub fn dispatch(env: &Env, content: &ProposalContent, caller: &Address) {
    if content.value > 0 {
        caller.require_auth();
        token::TokenClient::new(env, &native_token(env)).transfer(
            caller,
            &content.target,
            &content.value,
        );
    }

    let Some(payload) = &content.payload else {
        return;
    };
    if content.target == env.current_contract_address() {
        dispatch_self(env, payload);
    } else {
        env.invoke_contract::<Val>(&content.target, &payload.function, payload.args.clone());
    }
}

fn dispatch_self(env: &Env, payload: &Payload) {
    env.storage().instance().set(&DataKey::Dispatching, &true);

    let function = &payload.function;
    let args = &payload.args;
    let this = env.clone();
    if *function == Symbol::new(env, "add_participants") {
        expect_arity(env, args, 2);
        ZkMultisig::add_participants(
            this,
            arg::<Vec<Point>>(env, args, 0),
            arg::<Vec<Point>>(env, args, 1),
        );
    } else if *function == Symbol::new(env, "remove_participants") {
        expect_arity(env, args, 1);
        ZkMultisig::remove_participants(this, arg::<Vec<Point>>(env, args, 0));
    } else if *function == Symbol::new(env, "update_quorum_percentage") {
        expect_arity(env, args, 1);
        ZkMultisig::update_quorum_percentage(this, arg::<u128>(env, args, 0));
    } else if *function == Symbol::new(env, "update_creation_verifier") {
        expect_arity(env, args, 1);
        ZkMultisig::update_creation_verifier(this, arg::<Address>(env, args, 0));
    } else if *function == Symbol::new(env, "update_voting_verifier") {
        expect_arity(env, args, 1);
        ZkMultisig::update_voting_verifier(this, arg::<Address>(env, args, 0));
    } else if *function == Symbol::new(env, "deactivate_proposal") {
        expect_arity(env, args, 1);
        ZkMultisig::deactivate_proposal(this, arg(env, args, 0));
    } else {
        fail!(
            env,
            MultisigError::InvalidPayload,
            "unknown governance call",
            function.clone()
        );
    }

    env.storage().instance().remove(&DataKey::Dispatching);
}

fn expect_arity(env: &Env, args: &Vec<Val>, expected: u32) {
    if args.len() != expected {
        fail!(
            env,
            MultisigError::InvalidPayload,
            "wrong argument count",
            args.len(),
            expected
        );
    }
}

fn arg<T: TryFromVal<Env, Val>>(env: &Env, args: &Vec<Val>, index: u32) -> T {
    args.get(index)
        .and_then(|value| T::try_from_val(env, &value).ok())
        .unwrap_or_else(|| fail!(env, MultisigError::InvalidPayload, "malformed argument", index))
}
