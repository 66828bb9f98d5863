use ark_ec::{twisted_edwards::TECurveConfig, AffineRepr, CurveGroup, Group};
use ark_ff::Zero;
use soroban_sdk::{contracttype, Env, U256};

use crate::convert::{fq_from_u256, fq_reduced, fq_to_u256, limbs_from_u256};
use crate::curve::{AffinePoint, BabyJubJub, Fr, ProjectivePoint};

/// Affine BabyJubJub point as it crosses the contract boundary.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Point {
    pub x: U256,
    pub y: U256,
}

impl Point {
    pub fn new(env: &Env, x: u32, y: u32) -> Self {
        Point {
            x: U256::from_u32(env, x),
            y: U256::from_u32(env, y),
        }
    }

    pub fn identity(env: &Env) -> Self {
        Self::new(env, 0, 1)
    }

    pub fn generator(env: &Env) -> Self {
        Self::from_affine(env, &BabyJubJub::GENERATOR)
    }

    pub fn from_affine(env: &Env, point: &AffinePoint) -> Self {
        Point {
            x: fq_to_u256(env, &point.x),
            y: fq_to_u256(env, &point.y),
        }
    }

    pub fn from_projective(env: &Env, point: &ProjectivePoint) -> Self {
        Self::from_affine(env, &point.into_affine())
    }

    /// Coordinates taken modulo p, without a curve check.
    pub fn to_affine(&self) -> AffinePoint {
        AffinePoint::new_unchecked(fq_reduced(&self.x), fq_reduced(&self.y))
    }

    pub fn to_projective(&self) -> ProjectivePoint {
        self.to_affine().into_group()
    }

    pub fn add(&self, env: &Env, other: &Point) -> Point {
        Self::from_projective(env, &(self.to_projective() + other.to_projective()))
    }

    pub fn sub(&self, env: &Env, other: &Point) -> Point {
        Self::from_projective(env, &(self.to_projective() - other.to_projective()))
    }

    pub fn neg(&self, env: &Env) -> Point {
        Self::from_projective(env, &-self.to_projective())
    }

    /// `scalar · self`, treating `scalar` as a plain 256-bit integer.
    pub fn mul(&self, env: &Env, scalar: &U256) -> Point {
        Self::from_projective(env, &self.to_projective().mul_bigint(limbs_from_u256(scalar)))
    }

    pub fn mul_scalar(&self, env: &Env, scalar: &Fr) -> Point {
        Self::from_projective(env, &(self.to_projective() * scalar))
    }

    /// Both coordinates are canonical and satisfy the curve equation.
    pub fn is_on_curve(&self) -> bool {
        match (fq_from_u256(&self.x), fq_from_u256(&self.y)) {
            (Some(x), Some(y)) => AffinePoint::new_unchecked(x, y).is_on_curve(),
            _ => false,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.to_projective().is_zero()
    }
}

/// Sums a sequence of points with a single final normalization.
pub fn sum<I>(env: &Env, points: I) -> Point
where
    I: IntoIterator<Item = Point>,
{
    let acc = points
        .into_iter()
        .fold(ProjectivePoint::zero(), |acc, p| acc + p.to_projective());
    Point::from_projective(env, &acc)
}
