//! # BabyJubJub and Poseidon primitives
//!
//! Curve and hash building blocks shared by the multisig contracts:
//!
//! - [`curve::BabyJubJub`]: the curve as an arkworks twisted Edwards config,
//!   over [`Fq`] (the BN254 scalar field) with scalars in [`Scalar`] (mod `l`)
//! - [`Point`]: the affine `(x, y)` contract type used on the wire
//! - [`poseidon`]: Poseidon hashing through the host
//!
//! Arithmetic runs inside the contract; only hashing and `U256` conversions
//! touch the host.

#![no_std]

mod convert;
pub mod curve;
mod point;
pub mod poseidon;

pub use convert::{
    fq_from_u256, fq_reduced, fq_to_u256, limbs_from_u256, reduce_to_field, scalar_from_u256,
    scalar_to_u256,
};
pub use curve::{AffinePoint, BabyJubJub, Fq, ProjectivePoint};
pub use point::{sum, Point};

/// Integers modulo the prime subgroup order `l`.
pub type Scalar = curve::Fr;
