// Required approvals round down: floor(participants * quorum / 100%).

mod common;

use common::{percent, System};
use zk_multisig::{MultisigError, PERCENTAGE_100};

fn outcome(participants: u32, quorum: u128, approvals: u32) -> bool {
    let mut system = System::new(participants, quorum);
    let content = system.bump(1);
    system.open(&content, 1);
    system.vote_all(approvals);
    system.client.reveal(&approvals)
}

#[test]
fn test_exact_threshold_accepts() {
    assert!(outcome(4, percent(50), 2));
    assert!(outcome(5, percent(80), 4));
}

#[test]
fn test_one_short_rejects() {
    assert!(!outcome(4, percent(50), 1));
    assert!(!outcome(5, percent(80), 3));
}

#[test]
fn test_fractional_threshold_rounds_down() {
    // 3 * 0.9 = 2.7 -> 2
    assert!(outcome(3, percent(90), 2));
    assert!(!outcome(3, percent(90), 1));
}

#[test]
fn test_tiny_quorum_needs_no_approvals() {
    assert!(outcome(3, 1, 0));
}

#[test]
fn test_near_unanimous_quorum() {
    let system = System::new(4, PERCENTAGE_100 - 1);
    assert_eq!(system.client.get_required_quorum(), 3);
}

#[test]
fn test_wrong_tally_claim_rejected() {
    let mut system = System::new(3, percent(50));
    let content = system.bump(1);
    system.open(&content, 1);
    system.vote_all(2);

    for claim in [0u32, 1, 3] {
        assert_eq!(
            system.client.try_reveal(&claim),
            Err(Ok(MultisigError::VoteCountMismatch.into()))
        );
    }
    assert!(system.client.reveal(&2));
}
