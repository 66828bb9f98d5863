//! Groth16 verifier contract, deployed once per circuit.
//!
//! Holds a single immutable verification key. `verify` never traps on bad
//! input: shape or range problems simply return `false`.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, Env, Symbol, Vec, U256,
};

pub use zkmultisig_groth16::{Proof, VerificationKey};

const VK_KEY: Symbol = symbol_short!("vk");
const CIRCUIT: Symbol = symbol_short!("circuit");

#[contracterror]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum VerifierError {
    /// Verification key has fewer than two IC points
    MalformedKey = 1,
    NotInitialized = 2,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct VerifierInitEvent {
    #[topic]
    pub circuit: Symbol,
    pub signals: u32,
}

#[contract]
pub struct Groth16Verifier;

#[contractimpl]
impl Groth16Verifier {
    pub fn __constructor(env: Env, circuit: Symbol, vk: VerificationKey) {
        if zkmultisig_groth16::validate_key(&vk).is_err() {
            panic_with_error!(&env, VerifierError::MalformedKey);
        }

        let signals = vk.ic.len() - 1;
        env.storage().instance().set(&VK_KEY, &vk);
        env.storage().instance().set(&CIRCUIT, &circuit);

        VerifierInitEvent { circuit, signals }.publish(&env);
    }

    pub fn verify(env: Env, proof: Proof, pub_signals: Vec<U256>) -> bool {
        let vk = Self::load_vk(&env);
        zkmultisig_groth16::verify_groth16(&env, &vk, &proof, &pub_signals)
    }

    pub fn verification_key(env: Env) -> VerificationKey {
        Self::load_vk(&env)
    }

    pub fn circuit(env: Env) -> Symbol {
        env.storage()
            .instance()
            .get(&CIRCUIT)
            .unwrap_or_else(|| panic_with_error!(&env, VerifierError::NotInitialized))
    }

    /// Number of public signals the key expects.
    pub fn signals_count(env: Env) -> u32 {
        Self::load_vk(&env).ic.len() - 1
    }

    fn load_vk(env: &Env) -> VerificationKey {
        env.storage()
            .instance()
            .get(&VK_KEY)
            .unwrap_or_else(|| panic_with_error!(env, VerifierError::NotInitialized))
    }
}
