//! Poseidon over the BN254 scalar field with circom parameters.

use soroban_sdk::{vec, Env, Symbol, Vec, U256};

pub fn hash(env: &Env, inputs: &Vec<U256>) -> U256 {
    let field = Symbol::new(env, "BN254");
    env.crypto().poseidon_hash(inputs, field)
}

pub fn hash1(env: &Env, a: &U256) -> U256 {
    hash(env, &vec![env, a.clone()])
}

pub fn hash2(env: &Env, a: &U256, b: &U256) -> U256 {
    hash(env, &vec![env, a.clone(), b.clone()])
}

pub fn hash3(env: &Env, a: &U256, b: &U256, c: &U256) -> U256 {
    hash(env, &vec![env, a.clone(), b.clone(), c.clone()])
}
