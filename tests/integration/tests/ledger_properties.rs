// Spent blinders and nullifiers across proposals.

mod common;

use common::{percent, System};
use zk_multisig::MultisigError;

#[test]
fn test_nullifier_spent_across_proposals() {
    let mut system = System::new(2, percent(50));
    let env = system.env.clone();
    let stale = system.voters[0].clone();

    let content = system.bump(1);
    system.pass(&content, 1);
    assert!(system
        .client
        .is_rotation_key_nullifier_used(&stale.nullifier(&env)));

    // a fresh blinder cannot hide a spent rotation key
    let content = system.bump(2);
    system.open(&content, 2);
    let ballot = stale.ballot(&env, &system.client, true, 9);
    assert_eq!(
        system.client.try_vote(&ballot.params),
        Err(Ok(MultisigError::UsedNullifier.into()))
    );

    // the rotated voter is still welcome
    system.vote_all(2);
    assert!(system.client.reveal(&2));
}

#[test]
fn test_blinders_scoped_to_proposal() {
    let mut system = System::new(2, percent(50));
    let env = system.env.clone();

    let first = system.bump(1);
    let first_id = system.pass(&first, 1);
    let second = system.bump(2);
    let second_id = system.pass(&second, 2);

    let first_blinders = system.client.get_proposal_blinders(&first_id);
    let second_blinders = system.client.get_proposal_blinders(&second_id);
    assert_eq!(first_blinders.len(), 2);
    assert_eq!(second_blinders.len(), 2);

    for blinder in first_blinders.iter() {
        assert!(system.client.is_blinder_used(&first_id, &blinder));
        assert!(!system.client.is_blinder_used(&second_id, &blinder));
        assert!(!second_blinders.contains(&blinder));
    }
    for voter in system.voters.iter() {
        assert!(first_blinders.contains(&voter.blinder(&env, &first_id)));
    }
}

#[test]
fn test_replayed_ballot_rejected() {
    let mut system = System::new(2, percent(50));
    let env = system.env.clone();

    let content = system.bump(1);
    system.open(&content, 1);
    let ballot = system.voters[1].ballot(&env, &system.client, false, 4);
    system.client.vote(&ballot.params);

    assert_eq!(
        system.client.try_vote(&ballot.params),
        Err(Ok(MultisigError::UsedBlinder.into()))
    );
}
