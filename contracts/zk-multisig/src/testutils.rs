//! Off-chain participant model for tests.
//!
//! Builds the ballots and key material the voting circuit would attest to,
//! so tests can drive the tally end to end behind a permissive verifier.

use soroban_sdk::{BytesN, Env, U256};
use zkmultisig_crypto::{poseidon, scalar_from_u256, scalar_to_u256, Point, Scalar};

use crate::types::{Ciphertext, Proof, VoteParams};
use crate::ZkMultisigClient;

pub fn dummy_proof(env: &Env) -> Proof {
    Proof {
        a: BytesN::from_array(env, &[0u8; 64]),
        b: BytesN::from_array(env, &[0u8; 128]),
        c: BytesN::from_array(env, &[0u8; 64]),
    }
}

/// Participant holding a permanent secret `sk1` and a rotation secret `sk2`.
#[derive(Clone, Debug)]
pub struct Voter {
    pub permanent_secret: Scalar,
    pub rotation_secret: Scalar,
}

/// Ballot ready to submit, plus the rotation secret it commits to.
pub struct Ballot {
    pub params: VoteParams,
    pub next_rotation_secret: Scalar,
}

impl Voter {
    pub fn new(permanent_secret: u32, rotation_secret: u32) -> Self {
        Voter {
            permanent_secret: Scalar::from(permanent_secret),
            rotation_secret: Scalar::from(rotation_secret),
        }
    }

    pub fn permanent_key(&self, env: &Env) -> Point {
        Point::generator(env).mul_scalar(env, &self.permanent_secret)
    }

    pub fn rotation_key(&self, env: &Env) -> Point {
        Point::generator(env).mul_scalar(env, &self.rotation_secret)
    }

    pub fn nullifier(&self, env: &Env) -> U256 {
        poseidon::hash1(env, &scalar_to_u256(env, &self.rotation_secret))
    }

    pub fn blinder(&self, env: &Env, proposal_id: &U256) -> U256 {
        poseidon::hash2(env, &scalar_to_u256(env, &self.permanent_secret), proposal_id)
    }

    /// Encrypts `approve` for the current proposal with ElGamal nonce `nonce`.
    pub fn ballot(
        &self,
        env: &Env,
        client: &ZkMultisigClient,
        approve: bool,
        nonce: u32,
    ) -> Ballot {
        let proposal_id = client
            .get_current_proposal_id()
            .expect("no proposal is open");
        let encryption_key = client.get_encryption_key(&proposal_id);
        let challenge = client.get_proposal_challenge(&proposal_id);

        let h1 = poseidon::hash1(env, &challenge);
        let h2 = poseidon::hash1(env, &h1);
        let share = scalar_from_u256(&h1) * self.permanent_secret
            + scalar_from_u256(&h2) * self.rotation_secret;

        let generator = Point::generator(env);
        let k = Scalar::from(nonce);
        let message = if approve {
            generator.clone()
        } else {
            Point::identity(env)
        };
        let encrypted_vote = Ciphertext {
            c1: generator.mul_scalar(env, &k),
            c2: message.add(env, &encryption_key.mul_scalar(env, &k)),
        };

        let kdf_msg = client.get_rotation_kdf_msg(&proposal_id);
        let next_rotation_secret = scalar_from_u256(&kdf_msg) + self.rotation_secret;

        Ballot {
            params: VoteParams {
                encrypted_vote,
                decryption_key_share: scalar_to_u256(env, &share),
                key_nullifier: self.nullifier(env),
                blinder: self.blinder(env, &proposal_id),
                cmt_root: client.get_participants_cmt_root(),
                rotation_key: generator.mul_scalar(env, &next_rotation_secret),
                proof: dummy_proof(env),
            },
            next_rotation_secret,
        }
    }

    /// Votes on the current proposal and adopts the rotated secret.
    pub fn cast(&mut self, env: &Env, client: &ZkMultisigClient, approve: bool, nonce: u32) {
        let ballot = self.ballot(env, client, approve, nonce);
        client.vote(&ballot.params);
        self.rotation_secret = ballot.next_rotation_secret;
    }
}
