#![allow(dead_code)]

extern crate std;

use participants_tree::{ParticipantsTree, ParticipantsTreeClient};
use soroban_sdk::{
    contract, contractimpl, symbol_short, testutils::Address as _, testutils::Events as _, vec,
    Address, BytesN, Env, IntoVal, Map, Symbol, TryFromVal, Val, Vec, U256,
};
use zk_multisig::testutils::{dummy_proof, Voter};
use zk_multisig::{
    MultisigConfig, Payload, Proof, ProposalContent, ZkMultisig, ZkMultisigClient, PRECISION,
};

pub const TREE_DEPTH: u32 = 20;

/// Verifier that accepts every proof.
#[contract]
pub struct AcceptAll;

#[contractimpl]
impl AcceptAll {
    pub fn verify(_env: Env, _proof: Proof, _pub_signals: Vec<U256>) -> bool {
        true
    }
}

/// Proposal target that counts calls.
#[contract]
pub struct Counter;

#[contractimpl]
impl Counter {
    pub fn bump(env: Env, by: u32) -> u32 {
        let key = symbol_short!("count");
        let count: u32 = env.storage().instance().get(&key).unwrap_or(0) + by;
        env.storage().instance().set(&key, &count);
        count
    }

    pub fn count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&symbol_short!("count"))
            .unwrap_or(0)
    }
}

pub fn percent(value: u128) -> u128 {
    value * PRECISION
}

/// Proof whose points do not decode on BN254.
pub fn garbage_proof(env: &Env) -> Proof {
    Proof {
        a: BytesN::from_array(env, &[1u8; 64]),
        b: BytesN::from_array(env, &[1u8; 128]),
        c: BytesN::from_array(env, &[1u8; 64]),
    }
}

/// Topic `index` of an emitted event.
pub fn topic<T: TryFromVal<Env, Val>>(env: &Env, topics: &Vec<Val>, index: u32) -> T {
    let raw = topics.get(index).unwrap();
    T::try_from_val(env, &raw).unwrap_or_else(|_| panic!("topic {index} has the wrong type"))
}

/// Named field of an event's data map.
pub fn field<T: TryFromVal<Env, Val>>(env: &Env, data: &Map<Symbol, Val>, name: &str) -> T {
    let raw = data.get(Symbol::new(env, name)).unwrap();
    T::try_from_val(env, &raw).unwrap_or_else(|_| panic!("field {name} has the wrong type"))
}

/// Multisig wired to a real participants tree it owns.
pub struct System {
    pub env: Env,
    pub multisig: Address,
    pub tree: Address,
    pub counter: Address,
    pub client: ZkMultisigClient<'static>,
    pub voters: std::vec::Vec<Voter>,
}

impl System {
    pub fn new(participants: u32, quorum: u128) -> Self {
        let env = Env::default();
        let creation_verifier = env.register(AcceptAll, ());
        let voting_verifier = env.register(AcceptAll, ());
        Self::with_verifiers(env, participants, quorum, creation_verifier, voting_verifier)
    }

    pub fn with_verifiers(
        env: Env,
        participants: u32,
        quorum: u128,
        creation_verifier: Address,
        voting_verifier: Address,
    ) -> Self {
        env.mock_all_auths();
        env.cost_estimate().budget().reset_unlimited();

        // the tree is owned by the multisig, so its address is fixed up front
        let multisig = Address::generate(&env);
        let tree = env.register(ParticipantsTree, (multisig.clone(), TREE_DEPTH));
        let counter = env.register(Counter, ());
        let native_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();

        let voters: std::vec::Vec<Voter> = (0..participants)
            .map(|i| Voter::new(2 * i + 1, 2 * i + 2))
            .collect();
        let mut permanent = Vec::new(&env);
        let mut rotation = Vec::new(&env);
        for voter in voters.iter() {
            permanent.push_back(voter.permanent_key(&env));
            rotation.push_back(voter.rotation_key(&env));
        }

        let config = MultisigConfig {
            participants_tree: tree.clone(),
            creation_verifier,
            voting_verifier,
            native_token,
            quorum_percentage: quorum,
        };
        env.register_at(&multisig, ZkMultisig, (config, permanent, rotation));
        let client = ZkMultisigClient::new(&env, &multisig);

        System {
            env,
            multisig,
            tree,
            counter,
            client,
            voters,
        }
    }

    /// Events named `name` the multisig emitted during the last call, oldest first.
    pub fn emitted(&self, name: &str) -> std::vec::Vec<(Vec<Val>, Map<Symbol, Val>)> {
        let wanted = Symbol::new(&self.env, name);
        let mut found = std::vec::Vec::new();
        for (contract, topics, data) in self.env.events().all().iter() {
            if contract != self.multisig {
                continue;
            }
            let matches = topics
                .get(0)
                .and_then(|first| Symbol::try_from_val(&self.env, &first).ok())
                .map_or(false, |symbol| symbol == wanted);
            if matches {
                found.push((topics, Map::try_from_val(&self.env, &data).unwrap()));
            }
        }
        found
    }

    pub fn tree_client(&self) -> ParticipantsTreeClient<'static> {
        ParticipantsTreeClient::new(&self.env, &self.tree)
    }

    pub fn bump(&self, by: u32) -> ProposalContent {
        let arg: Val = by.into_val(&self.env);
        ProposalContent {
            target: self.counter.clone(),
            value: 0,
            payload: Some(Payload {
                function: Symbol::new(&self.env, "bump"),
                args: vec![&self.env, arg],
            }),
        }
    }

    pub fn governance(&self, function: &str, args: Vec<Val>) -> ProposalContent {
        ProposalContent {
            target: self.multisig.clone(),
            value: 0,
            payload: Some(Payload {
                function: Symbol::new(&self.env, function),
                args,
            }),
        }
    }

    pub fn open(&self, content: &ProposalContent, salt: u32) -> U256 {
        self.client
            .create(content, &U256::from_u32(&self.env, salt), &dummy_proof(&self.env))
    }

    /// Every participant votes, the first `approvals` in favour.
    pub fn vote_all(&mut self, approvals: u32) {
        for (i, voter) in self.voters.iter_mut().enumerate() {
            voter.cast(&self.env, &self.client, (i as u32) < approvals, 11 + i as u32);
        }
    }

    /// Unanimous vote, reveal and execution.
    pub fn pass(&mut self, content: &ProposalContent, salt: u32) -> U256 {
        let proposal_id = self.open(content, salt);
        let everyone = self.voters.len() as u32;
        self.vote_all(everyone);
        assert!(self.client.reveal(&everyone));
        self.client
            .execute(&proposal_id, &Address::generate(&self.env), &content.value);
        proposal_id
    }
}
