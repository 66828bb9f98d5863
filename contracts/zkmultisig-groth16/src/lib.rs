//! # Groth16 verification over BN254
//!
//! Pairing-based verification for the two multisig circuits (proposal creation
//! and voting). The verifier contract wraps this library; the multisig itself
//! only ever sees a `verify(proof, signals) -> bool` oracle.
//!
//! ## Cryptographic Primitives
//!
//! ### BN254 Curve (alt_bn128)
//! - **Definition**: y² = x³ + 3 over 𝔽_p where p = 21888242871839275222246405745257275088696311157297823662689037894645226208583
//! - **Scalar field order**: r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
//!
//! ### Groth16 SNARK
//! - **Paper**: "On the Size of Pairing-based Non-interactive Arguments" by Jens Groth (2016)
//! - **Check**: e(-A, B) · e(alpha, beta) · e(vk_x, gamma) · e(C, delta) = 1

#![no_std]

use soroban_sdk::{
    contracterror, contracttype,
    crypto::bn254::{Fr, G1Affine, G2Affine},
    Bytes, BytesN, Env, Vec, U256,
};

/// BN254 scalar field modulus (Fr) in big-endian bytes.
///
/// Public signals must be strictly below r; otherwise two distinct `U256`
/// values would verify as the same field element.
pub const BN254_FR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// r - 1, which negates a G1 point under scalar multiplication.
const BN254_R_MINUS_ONE: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x00,
];

/// Smallest IC list a key may carry: the constant term plus one signal.
pub const MIN_IC_LENGTH: u32 = 2;

#[contracterror]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Groth16Error {
    /// IC vector length doesn't match public signals + 1
    IcLengthMismatch = 30,
    /// Public signal value >= BN254 scalar field modulus
    SignalNotInField = 31,
    /// Verification key carries fewer than two IC points
    MalformedKey = 32,
}

/// Groth16 verification key for BN254
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationKey {
    pub alpha: BytesN<64>,   // G1 point
    pub beta: BytesN<128>,   // G2 point
    pub gamma: BytesN<128>,  // G2 point
    pub delta: BytesN<128>,  // G2 point
    pub ic: Vec<BytesN<64>>, // IC points (G1)
}

/// Groth16 proof
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proof {
    pub a: BytesN<64>,  // G1 point
    pub b: BytesN<128>, // G2 point
    pub c: BytesN<64>,  // G1 point
}

fn modulus(env: &Env) -> U256 {
    U256::from_be_bytes(env, &Bytes::from_array(env, &BN254_FR_MODULUS))
}

/// Fails with `SignalNotInField` if `value >= r`.
pub fn assert_in_field(env: &Env, value: &U256) -> Result<(), Groth16Error> {
    if value >= &modulus(env) {
        return Err(Groth16Error::SignalNotInField);
    }
    Ok(())
}

pub fn validate_key(vk: &VerificationKey) -> Result<(), Groth16Error> {
    if vk.ic.len() < MIN_IC_LENGTH {
        return Err(Groth16Error::MalformedKey);
    }
    Ok(())
}

/// Checks the signal vector shape and range against `vk` before any pairing work.
pub fn check_public_signals(
    env: &Env,
    vk: &VerificationKey,
    pub_signals: &Vec<U256>,
) -> Result<(), Groth16Error> {
    if pub_signals.len() + 1 != vk.ic.len() {
        return Err(Groth16Error::IcLengthMismatch);
    }
    for signal in pub_signals.iter() {
        assert_in_field(env, &signal)?;
    }
    Ok(())
}

/// Verify a Groth16 proof using the BN254 pairing check.
///
/// vk_x = IC[0] + Σ pub_signals[i] · IC[i+1]
///
/// Returns `false` for a malformed signal vector instead of trapping.
pub fn verify_groth16(
    env: &Env,
    vk: &VerificationKey,
    proof: &Proof,
    pub_signals: &Vec<U256>,
) -> bool {
    if check_public_signals(env, vk, pub_signals).is_err() {
        return false;
    }

    let vk_x = match compute_vk_x(vk, pub_signals) {
        Some(point) => point,
        None => return false,
    };

    let neg_a = G1Affine::from_bytes(proof.a.clone()) * neg_one_scalar(env);

    let mut g1_vec = Vec::new(env);
    g1_vec.push_back(neg_a);
    g1_vec.push_back(G1Affine::from_bytes(vk.alpha.clone()));
    g1_vec.push_back(vk_x);
    g1_vec.push_back(G1Affine::from_bytes(proof.c.clone()));

    let mut g2_vec = Vec::new(env);
    g2_vec.push_back(G2Affine::from_bytes(proof.b.clone()));
    g2_vec.push_back(G2Affine::from_bytes(vk.beta.clone()));
    g2_vec.push_back(G2Affine::from_bytes(vk.gamma.clone()));
    g2_vec.push_back(G2Affine::from_bytes(vk.delta.clone()));

    env.crypto().bn254().pairing_check(g1_vec, g2_vec)
}

fn neg_one_scalar(env: &Env) -> Fr {
    let bytes = Bytes::from_array(env, &BN254_R_MINUS_ONE);
    Fr::from(U256::from_be_bytes(env, &bytes))
}

fn compute_vk_x(vk: &VerificationKey, pub_signals: &Vec<U256>) -> Option<G1Affine> {
    let mut vk_x = G1Affine::from_bytes(vk.ic.get(0)?);
    for (i, signal) in pub_signals.iter().enumerate() {
        let ic_point = G1Affine::from_bytes(vk.ic.get(i as u32 + 1)?);
        vk_x = vk_x + ic_point * Fr::from(signal);
    }
    Some(vk_x)
}
