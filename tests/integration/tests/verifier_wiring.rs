// Multisig driven by deployed Groth16 verifier contracts.

mod common;

use common::{garbage_proof, percent, AcceptAll, System};
use groth16_verifier::{Groth16Verifier, Groth16VerifierClient, VerificationKey};
use soroban_sdk::{vec, BytesN, Env, IntoVal, Symbol, Val, Vec, U256};
use zk_multisig::MultisigError;

const CREATION_SIGNALS: u32 = 2;
const VOTING_SIGNALS: u32 = 15;

fn dummy_vk(env: &Env, signals: u32) -> VerificationKey {
    let mut ic = Vec::new(env);
    for _ in 0..=signals {
        ic.push_back(BytesN::from_array(env, &[0u8; 64]));
    }
    VerificationKey {
        alpha: BytesN::from_array(env, &[0u8; 64]),
        beta: BytesN::from_array(env, &[0u8; 128]),
        gamma: BytesN::from_array(env, &[0u8; 128]),
        delta: BytesN::from_array(env, &[0u8; 128]),
        ic,
    }
}

fn deploy_verifier(env: &Env, circuit: &str, signals: u32) -> soroban_sdk::Address {
    env.register(
        Groth16Verifier,
        (Symbol::new(env, circuit), dummy_vk(env, signals)),
    )
}

#[test]
fn test_undecodable_creation_proof_rejected() {
    let env = Env::default();
    let creation = deploy_verifier(&env, "creation", CREATION_SIGNALS);
    let voting = env.register(AcceptAll, ());
    let system = System::with_verifiers(env, 2, percent(50), creation.clone(), voting);
    let env = &system.env;

    assert_eq!(
        Groth16VerifierClient::new(env, &creation).signals_count(),
        CREATION_SIGNALS
    );
    let content = system.bump(1);
    assert_eq!(
        system
            .client
            .try_create(&content, &U256::from_u32(env, 1), &garbage_proof(env)),
        Err(Ok(MultisigError::InvalidProof.into()))
    );
    assert_eq!(system.client.get_proposals_count(), 0);
}

#[test]
fn test_signal_count_mismatch_rejected() {
    let env = Env::default();
    // a voting-circuit key cannot check the two creation signals
    let creation = deploy_verifier(&env, "voting", VOTING_SIGNALS);
    let voting = env.register(AcceptAll, ());
    let system = System::with_verifiers(env, 2, percent(50), creation, voting);
    let env = &system.env;

    let content = system.bump(1);
    assert_eq!(
        system
            .client
            .try_create(&content, &U256::from_u32(env, 1), &garbage_proof(env)),
        Err(Ok(MultisigError::InvalidProof.into()))
    );
}

#[test]
fn test_governance_installs_voting_verifier() {
    let mut system = System::new(2, percent(50));
    let env = system.env.clone();
    let verifier = deploy_verifier(&env, "voting", VOTING_SIGNALS);

    let arg: Val = verifier.clone().into_val(&env);
    let content = system.governance("update_voting_verifier", vec![&env, arg]);
    system.pass(&content, 1);
    assert_eq!(system.client.get_voting_verifier(), verifier);

    let content = system.bump(1);
    system.open(&content, 2);
    let mut ballot = system.voters[0].ballot(&env, &system.client, true, 3);
    ballot.params.proof = garbage_proof(&env);
    assert_eq!(
        system.client.try_vote(&ballot.params),
        Err(Ok(MultisigError::InvalidProof.into()))
    );
}
