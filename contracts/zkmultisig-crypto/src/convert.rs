//! Conversions between host `U256` values and field elements.

use ark_ff::{BigInt, PrimeField};
use soroban_sdk::{Bytes, Env, U256};

use crate::curve::{Fq, Fr};

fn be_bytes(value: &U256) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_be_bytes().copy_into_slice(&mut bytes);
    bytes
}

/// Little-endian `u64` limbs of `value`.
pub fn limbs_from_u256(value: &U256) -> [u64; 4] {
    let bytes = be_bytes(value);
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let start = 32 - (i + 1) * 8;
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[start..start + 8]);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

fn limbs_to_u256(env: &Env, limbs: &[u64; 4]) -> U256 {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        let start = 32 - (i + 1) * 8;
        bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
    }
    U256::from_be_bytes(env, &Bytes::from_array(env, &bytes))
}

/// Field element for a canonical `value`; `None` when `value >= p`.
pub fn fq_from_u256(value: &U256) -> Option<Fq> {
    Fq::from_bigint(BigInt::new(limbs_from_u256(value)))
}

/// `value mod p`
pub fn fq_reduced(value: &U256) -> Fq {
    Fq::from_be_bytes_mod_order(&be_bytes(value))
}

pub fn fq_to_u256(env: &Env, value: &Fq) -> U256 {
    limbs_to_u256(env, &value.into_bigint().0)
}

/// `value mod l`
pub fn scalar_from_u256(value: &U256) -> Fr {
    Fr::from_be_bytes_mod_order(&be_bytes(value))
}

pub fn scalar_to_u256(env: &Env, value: &Fr) -> U256 {
    limbs_to_u256(env, &value.into_bigint().0)
}

/// Reduces an arbitrary 256-bit value into the BN254 scalar field.
pub fn reduce_to_field(env: &Env, value: &U256) -> U256 {
    fq_to_u256(env, &fq_reduced(value))
}
