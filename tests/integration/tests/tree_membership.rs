// Registry and membership tree stay in step.

mod common;

use common::{percent, System, TREE_DEPTH};
use soroban_sdk::vec;
use zk_multisig::testutils::Voter;
use zk_multisig::{KeyType, MultisigError};

#[test]
fn test_constructor_commits_both_keys() {
    let system = System::new(3, percent(50));
    let env = &system.env;
    let tree = system.tree_client();

    assert_eq!(tree.size(), 6);
    assert_eq!(tree.owner(), system.multisig);
    assert_eq!(system.client.get_participants_cmt_root(), tree.root());

    for voter in system.voters.iter() {
        for (key, key_type) in [
            (voter.permanent_key(env), KeyType::Permanent),
            (voter.rotation_key(env), KeyType::Rotation),
        ] {
            let leaf = system.client.get_key_leaf(&key, &key_type);
            let proof = system.client.get_participants_proof(&leaf, &TREE_DEPTH);
            assert!(proof.existence);
            assert_eq!(proof.root, tree.root());
            assert_eq!(proof.siblings.len(), TREE_DEPTH);
        }
    }
}

#[test]
fn test_vote_commits_new_rotation_key() {
    let system = System::new(2, percent(50));
    let env = system.env.clone();
    let tree = system.tree_client();
    let old_rotation = system.voters[0].rotation_key(&env);

    let content = system.bump(1);
    system.open(&content, 1);
    let root_before = tree.root();
    let ballot = system.voters[0].ballot(&env, &system.client, true, 5);
    system.client.vote(&ballot.params);

    assert_ne!(tree.root(), root_before);
    assert_eq!(tree.size(), 5);
    let new_leaf = system
        .client
        .get_key_leaf(&ballot.params.rotation_key, &KeyType::Rotation);
    assert!(tree.contains(&new_leaf));

    // rotated-out keys keep their leaves
    let old_leaf = system
        .client
        .get_key_leaf(&old_rotation, &KeyType::Rotation);
    assert!(tree.contains(&old_leaf));
}

#[test]
fn test_ballot_built_before_rotation_is_stale() {
    let system = System::new(3, percent(50));
    let env = system.env.clone();

    let content = system.bump(1);
    let proposal_id = system.open(&content, 1);
    let creation_root = system.client.get_participants_cmt_root();

    // both ballots are built against the root seen at creation
    let first = system.voters[0].ballot(&env, &system.client, true, 3);
    let second = system.voters[1].ballot(&env, &system.client, true, 4);
    assert_eq!(first.params.cmt_root, creation_root);
    assert_eq!(second.params.cmt_root, creation_root);

    system.client.vote(&first.params);
    assert_eq!(
        system.client.try_vote(&second.params),
        Err(Ok(MultisigError::InvalidCMTRoot.into()))
    );

    // rebuilt against the live root, the same voter gets through
    let rebuilt = system.voters[1].ballot(&env, &system.client, true, 4);
    assert_ne!(rebuilt.params.cmt_root, creation_root);
    system.client.vote(&rebuilt.params);
    assert_eq!(system.client.get_proposal_info(&proposal_id).votes_count, 2);
}

#[test]
fn test_reregistering_is_idempotent() {
    let system = System::new(2, percent(50));
    let env = &system.env;
    let tree = system.tree_client();
    let root = tree.root();

    system.client.test_add_participants(
        &vec![env, system.voters[0].permanent_key(env)],
        &vec![env, system.voters[0].rotation_key(env)],
    );

    assert_eq!(tree.root(), root);
    assert_eq!(tree.size(), 4);
    assert_eq!(system.client.get_participants_count(), 2);
}

#[test]
fn test_removal_ignores_strangers() {
    let system = System::new(2, percent(50));
    let env = &system.env;
    let tree = system.tree_client();
    let root = tree.root();
    let stranger = Voter::new(77, 78);

    system
        .client
        .test_remove_participants(&vec![env, stranger.permanent_key(env)]);

    assert_eq!(tree.root(), root);
    assert_eq!(system.client.get_participants_count(), 2);
}
