#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, symbol_short, Address,
    Env, Symbol, Vec, U256,
};

const OWNER: Symbol = symbol_short!("owner");
const DEPTH: Symbol = symbol_short!("depth");
const NEXT_INDEX: Symbol = symbol_short!("next");
const LIVE_LEAVES: Symbol = symbol_short!("live");
const ROOT: Symbol = symbol_short!("root");
const ZEROS_CACHE: Symbol = symbol_short!("zeros");
const MAX_TREE_DEPTH: u32 = 20; // 2^20 leaves

#[contracterror]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TreeError {
    InvalidDepth = 1,
    TreeFull = 2,
    /// Zero marks an empty slot and cannot be a leaf
    ZeroLeaf = 3,
    /// Requested proof depth is below the tree depth
    ProofTooShort = 4,
    NotInitialized = 5,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Node(u32, u32),   // (level, index) -> hash; level 0 holds leaves
    LeafIndex(U256),  // leaf -> index
}

/// Inclusion proof for a leaf.
///
/// `siblings` is padded with zeros up to the requested depth. Bit `i` of
/// `direction_bits` is set when the path node at level `i` is a right child.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipProof {
    pub root: U256,
    pub siblings: Vec<U256>,
    pub siblings_length: u32,
    pub direction_bits: u64,
    pub existence: bool,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct LeafInsertedEvent {
    #[topic]
    pub leaf: U256,
    pub index: u32,
    pub new_root: U256,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct LeafRemovedEvent {
    #[topic]
    pub leaf: U256,
    pub index: u32,
    pub new_root: U256,
}

#[contract]
pub struct ParticipantsTree;

#[contractimpl]
impl ParticipantsTree {
    /// Creates an empty tree of `depth` levels writable only by `owner`.
    pub fn __constructor(env: Env, owner: Address, depth: u32) {
        if depth == 0 || depth > MAX_TREE_DEPTH {
            panic_with_error!(&env, TreeError::InvalidDepth);
        }

        Self::ensure_zeros_cache(&env);

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&DEPTH, &depth);
        env.storage().instance().set(&NEXT_INDEX, &0u32);
        env.storage().instance().set(&LIVE_LEAVES, &0u32);
        env.storage()
            .instance()
            .set(&ROOT, &Self::zero_at_level(&env, depth));
    }

    /// Appends `leaf`. Returns `false` without touching state if it is already present.
    pub fn insert(env: Env, leaf: U256) -> bool {
        Self::owner(env.clone()).require_auth();

        if leaf == Self::zero_value(&env) {
            panic_with_error!(&env, TreeError::ZeroLeaf);
        }

        let leaf_key = DataKey::LeafIndex(leaf.clone());
        if env.storage().persistent().has(&leaf_key) {
            return false;
        }

        let depth = Self::depth(env.clone());
        let index: u32 = env.storage().instance().get(&NEXT_INDEX).unwrap_or(0);
        if index >= (1u32 << depth) {
            panic_with_error!(&env, TreeError::TreeFull);
        }

        let new_root = Self::update_path(&env, index, leaf.clone(), depth);

        env.storage().persistent().set(&leaf_key, &index);
        env.storage().instance().set(&NEXT_INDEX, &(index + 1));
        let live: u32 = env.storage().instance().get(&LIVE_LEAVES).unwrap_or(0);
        env.storage().instance().set(&LIVE_LEAVES, &(live + 1));

        LeafInsertedEvent {
            leaf,
            index,
            new_root,
        }
        .publish(&env);
        true
    }

    /// Zeroes `leaf`'s slot. Returns `false` if the leaf is not present.
    ///
    /// The slot is not reused; later inserts keep appending.
    pub fn remove(env: Env, leaf: U256) -> bool {
        Self::owner(env.clone()).require_auth();

        let leaf_key = DataKey::LeafIndex(leaf.clone());
        let index: u32 = match env.storage().persistent().get(&leaf_key) {
            Some(index) => index,
            None => return false,
        };

        let depth = Self::depth(env.clone());
        let new_root = Self::update_path(&env, index, Self::zero_value(&env), depth);

        env.storage().persistent().remove(&leaf_key);
        let live: u32 = env.storage().instance().get(&LIVE_LEAVES).unwrap_or(0);
        env.storage()
            .instance()
            .set(&LIVE_LEAVES, &live.saturating_sub(1));

        LeafRemovedEvent {
            leaf,
            index,
            new_root,
        }
        .publish(&env);
        true
    }

    pub fn root(env: Env) -> U256 {
        env.storage()
            .instance()
            .get(&ROOT)
            .unwrap_or_else(|| Self::zero_value(&env))
    }

    pub fn contains(env: Env, leaf: U256) -> bool {
        env.storage().persistent().has(&DataKey::LeafIndex(leaf))
    }

    /// Number of leaves currently present.
    pub fn size(env: Env) -> u32 {
        env.storage().instance().get(&LIVE_LEAVES).unwrap_or(0)
    }

    pub fn depth(env: Env) -> u32 {
        env.storage().instance().get(&DEPTH).unwrap_or(MAX_TREE_DEPTH)
    }

    pub fn owner(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&OWNER)
            .unwrap_or_else(|| panic_with_error!(&env, TreeError::NotInitialized))
    }

    /// Builds an inclusion proof for `leaf`, padding siblings to `max_depth`.
    ///
    /// A missing leaf yields `existence = false` with all-zero siblings.
    pub fn prove(env: Env, leaf: U256, max_depth: u32) -> MembershipProof {
        let depth = Self::depth(env.clone());
        if max_depth < depth {
            panic_with_error!(&env, TreeError::ProofTooShort);
        }

        let zero = Self::zero_value(&env);
        let mut siblings = Vec::new(&env);
        let mut direction_bits = 0u64;

        let index: Option<u32> = env
            .storage()
            .persistent()
            .get(&DataKey::LeafIndex(leaf));
        let existence = index.is_some();

        if let Some(index) = index {
            let mut current_index = index;
            for level in 0..depth {
                if current_index % 2 == 1 {
                    direction_bits |= 1u64 << level;
                }
                siblings.push_back(Self::node(&env, level, current_index ^ 1));
                current_index /= 2;
            }
        }

        let siblings_length = siblings.len();
        while siblings.len() < max_depth {
            siblings.push_back(zero.clone());
        }

        MembershipProof {
            root: Self::root(env),
            siblings,
            siblings_length,
            direction_bits,
            existence,
        }
    }

    // Writes `value` at leaf `index` and rehashes the path up to the root.
    fn update_path(env: &Env, index: u32, value: U256, depth: u32) -> U256 {
        env.storage()
            .persistent()
            .set(&DataKey::Node(0, index), &value);

        let mut current_hash = value;
        let mut current_index = index;
        for level in 0..depth {
            let sibling = Self::node(env, level, current_index ^ 1);
            current_hash = if current_index % 2 == 0 {
                Self::hash_pair(env, &current_hash, &sibling)
            } else {
                Self::hash_pair(env, &sibling, &current_hash)
            };
            current_index /= 2;
            env.storage()
                .persistent()
                .set(&DataKey::Node(level + 1, current_index), &current_hash);
        }

        env.storage().instance().set(&ROOT, &current_hash);
        current_hash
    }

    // Stored node, or the empty-subtree hash for untouched positions.
    fn node(env: &Env, level: u32, index: u32) -> U256 {
        env.storage()
            .persistent()
            .get(&DataKey::Node(level, index))
            .unwrap_or_else(|| Self::zero_at_level(env, level))
    }

    fn hash_pair(env: &Env, left: &U256, right: &U256) -> U256 {
        let field = Symbol::new(env, "BN254");
        let inputs = soroban_sdk::vec![env, left.clone(), right.clone()];
        env.crypto().poseidon_hash(&inputs, field)
    }

    fn zero_value(env: &Env) -> U256 {
        U256::from_u32(env, 0)
    }

    fn ensure_zeros_cache(env: &Env) {
        if env.storage().instance().has(&ZEROS_CACHE) {
            return;
        }

        // zeros[i + 1] = Poseidon(zeros[i], zeros[i])
        let mut zeros = Vec::new(env);
        let mut current = Self::zero_value(env);
        zeros.push_back(current.clone());
        for _ in 0..MAX_TREE_DEPTH {
            current = Self::hash_pair(env, &current, &current);
            zeros.push_back(current.clone());
        }

        env.storage().instance().set(&ZEROS_CACHE, &zeros);
    }

    fn zero_at_level(env: &Env, level: u32) -> U256 {
        let zeros: Vec<U256> = env
            .storage()
            .instance()
            .get(&ZEROS_CACHE)
            .unwrap_or_else(|| Vec::new(env));
        zeros
            .get(level)
            .unwrap_or_else(|| Self::zero_value(env))
    }
}

#[cfg(any(test, feature = "testutils"))]
#[contractimpl]
impl ParticipantsTree {
    /// Test helper: empty-subtree hash at `level`.
    pub fn test_zero_at_level(env: Env, level: u32) -> U256 {
        Self::zero_at_level(&env, level)
    }
}
