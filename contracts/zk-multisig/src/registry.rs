//! Participant registry: permanent and rotation key lists, their running
//! sums, and the mirrored leaves in the membership oracle.

use soroban_sdk::{Env, Vec, U256};
use zkmultisig_crypto::{poseidon, reduce_to_field, Point, ProjectivePoint};

use crate::errors::MultisigError;
use crate::events::{ParticipantAddedEvent, ParticipantRemovedEvent};
use crate::executor::SelfCall;
use crate::oracle::{MembershipOracleClient, MembershipProof};
use crate::types::{DataKey, KeyType};

pub fn oracle(env: &Env) -> MembershipOracleClient<'_> {
    let address = env
        .storage()
        .instance()
        .get(&DataKey::ParticipantsTree)
        .unwrap_or_else(|| fail!(env, MultisigError::NotAContract, "participants tree unset"));
    MembershipOracleClient::new(env, &address)
}

/// Leaf committed to the membership tree for `key`: `Poseidon(x, y, type)`.
pub fn leaf(env: &Env, key: &Point, key_type: KeyType) -> U256 {
    poseidon::hash3(
        env,
        &reduce_to_field(env, &key.x),
        &reduce_to_field(env, &key.y),
        &U256::from_u32(env, key_type as u32),
    )
}

pub fn permanent_keys(env: &Env) -> Vec<Point> {
    env.storage()
        .persistent()
        .get(&DataKey::PermanentKeys)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn rotation_keys(env: &Env) -> Vec<Point> {
    env.storage()
        .persistent()
        .get(&DataKey::RotationKeys)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn participants_count(env: &Env) -> u32 {
    permanent_keys(env).len()
}

pub fn cumulative_permanent_key(env: &Env) -> Point {
    env.storage()
        .instance()
        .get(&DataKey::CumulativePermanentKey)
        .unwrap_or_else(|| Point::identity(env))
}

pub fn cumulative_rotation_key(env: &Env) -> Point {
    env.storage()
        .instance()
        .get(&DataKey::CumulativeRotationKey)
        .unwrap_or_else(|| Point::identity(env))
}

pub fn require_on_curve(env: &Env, point: &Point) {
    if !point.is_on_curve() {
        fail!(
            env,
            MultisigError::InvalidPoint,
            "point not on curve",
            point.x.clone(),
            point.y.clone()
        );
    }
}

pub fn cmt_root(env: &Env) -> U256 {
    oracle(env).root()
}

pub fn cmt_proof(env: &Env, leaf: &U256, max_depth: u32) -> MembershipProof {
    oracle(env).prove(leaf, &max_depth)
}

/// Registers `(permanent, rotation)` pairs. Pairs whose permanent key is
/// already registered are skipped.
pub fn add_participants(
    env: &Env,
    _auth: &SelfCall,
    permanent: Vec<Point>,
    rotation: Vec<Point>,
) {
    if permanent.len() != rotation.len() {
        fail!(
            env,
            MultisigError::KeyLenMismatch,
            "key length mismatch",
            permanent.len(),
            rotation.len()
        );
    }
    if permanent.is_empty() {
        fail!(env, MultisigError::NoParticipantsToProcess);
    }
    for key in permanent.iter().chain(rotation.iter()) {
        require_on_curve(env, &key);
    }

    let oracle = oracle(env);
    let mut permanent_list = permanent_keys(env);
    let mut rotation_list = rotation_keys(env);
    let mut cumulative_permanent = cumulative_permanent_key(env).to_projective();
    let mut cumulative_rotation = cumulative_rotation_key(env).to_projective();

    for (permanent_key, rotation_key) in permanent.iter().zip(rotation.iter()) {
        if permanent_list.contains(&permanent_key) {
            continue;
        }

        oracle.insert(&leaf(env, &permanent_key, KeyType::Permanent));
        permanent_list.push_back(permanent_key.clone());
        cumulative_permanent += permanent_key.to_projective();

        oracle.insert(&leaf(env, &rotation_key, KeyType::Rotation));
        if !rotation_list.contains(&rotation_key) {
            rotation_list.push_back(rotation_key.clone());
            cumulative_rotation += rotation_key.to_projective();
        }

        ParticipantAddedEvent {
            permanent_key,
            rotation_key,
        }
        .publish(env);
    }

    store_permanent(env, &permanent_list, &cumulative_permanent);
    store_rotation(env, &rotation_list, &cumulative_rotation);
}

/// Unregisters permanent keys. Keys that are not registered are ignored,
/// but the batch may not empty the registry.
pub fn remove_participants(env: &Env, _auth: &SelfCall, permanent: Vec<Point>) {
    if permanent.is_empty() {
        fail!(env, MultisigError::NoParticipantsToProcess);
    }

    let mut permanent_list = permanent_keys(env);
    let mut matched: Vec<Point> = Vec::new(env);
    for key in permanent.iter() {
        if permanent_list.contains(&key) && !matched.contains(&key) {
            matched.push_back(key);
        }
    }
    if matched.len() == permanent_list.len() {
        fail!(
            env,
            MultisigError::RemovingAllParticipants,
            "removal would empty the registry",
            matched.len()
        );
    }

    let oracle = oracle(env);
    let mut cumulative_permanent = cumulative_permanent_key(env).to_projective();
    for key in matched.iter() {
        if let Some(index) = permanent_list.first_index_of(&key) {
            permanent_list.remove(index);
        }
        oracle.remove(&leaf(env, &key, KeyType::Permanent));
        cumulative_permanent -= key.to_projective();

        ParticipantRemovedEvent { permanent_key: key }.publish(env);
    }

    store_permanent(env, &permanent_list, &cumulative_permanent);
}

/// Consumes the rotation keys of the closing epoch and returns their sum.
/// Rotation leaves stay in the tree.
pub fn start_rotation_epoch(env: &Env) -> Point {
    let consumed = cumulative_rotation_key(env);
    store_rotation(env, &Vec::new(env), &Point::identity(env).to_projective());
    consumed
}

/// Appends a rotation key published by a vote.
pub fn push_rotation_key(env: &Env, key: &Point) {
    oracle(env).insert(&leaf(env, key, KeyType::Rotation));

    let mut rotation_list = rotation_keys(env);
    rotation_list.push_back(key.clone());
    let cumulative = cumulative_rotation_key(env).to_projective() + key.to_projective();
    store_rotation(env, &rotation_list, &cumulative);
}

fn store_permanent(env: &Env, keys: &Vec<Point>, cumulative: &ProjectivePoint) {
    env.storage().persistent().set(&DataKey::PermanentKeys, keys);
    env.storage()
        .instance()
        .set(&DataKey::CumulativePermanentKey, &Point::from_projective(env, cumulative));
}

fn store_rotation(env: &Env, keys: &Vec<Point>, cumulative: &ProjectivePoint) {
    env.storage().persistent().set(&DataKey::RotationKeys, keys);
    env.storage()
        .instance()
        .set(&DataKey::CumulativeRotationKey, &Point::from_projective(env, cumulative));
}
