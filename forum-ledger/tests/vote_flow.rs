//! End-to-end behavior of the vote ledger over in-memory collaborators:
//! the transition table, the unique-pair invariant, and the notification
//! side-channel.
mod support;

use forum_ledger::{LedgerError, NotificationStatus, SkipReason, VoteLedger};
use forum_shared::types::{VoteDirection, VoteOutcome};
use std::sync::Arc;
use support::{identity, MemoryVoteRepository, RecordingPublisher};
use uuid::Uuid;

fn setup() -> (Arc<MemoryVoteRepository>, Arc<RecordingPublisher>, VoteLedger) {
    let votes = Arc::new(MemoryVoteRepository::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let ledger = VoteLedger::new(votes.clone(), publisher.clone());
    (votes, publisher, ledger)
}

#[tokio::test]
async fn test_first_vote_creates_and_notifies_owner() {
    let (votes, publisher, ledger) = setup();
    let owner = identity("owner@example.com");
    let voter = identity("voter@example.com");
    let question_id = Uuid::new_v4();
    let answer_id = Uuid::new_v4();
    votes.register_answer(answer_id, &owner, question_id);

    let receipt = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Up)
        .await
        .unwrap();

    assert_eq!(receipt.outcome, VoteOutcome::Created);
    assert_eq!(receipt.notification, NotificationStatus::Published);
    assert_eq!(votes.score(answer_id), 1);

    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].channel, "user-owner@example.com");
    assert_eq!(published[0].event, "new-vote");
    assert_eq!(published[0].payload["voteType"], "up");
    assert_eq!(
        published[0].payload["questionId"],
        serde_json::json!(question_id)
    );
}

#[tokio::test]
async fn test_toggle_off_idempotence() {
    let (votes, publisher, ledger) = setup();
    let owner = identity("owner@example.com");
    let voter = identity("voter@example.com");
    let answer_id = Uuid::new_v4();
    votes.register_answer(answer_id, &owner, Uuid::new_v4());

    let first = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Up)
        .await
        .unwrap();
    let second = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Up)
        .await
        .unwrap();

    assert_eq!(first.outcome, VoteOutcome::Created);
    assert_eq!(second.outcome, VoteOutcome::Removed);
    assert_eq!(
        second.notification,
        NotificationStatus::Skipped(SkipReason::RemovedVote)
    );
    assert!(votes.votes_for_answer(answer_id).is_empty());

    // Removal never notifies: only the create published.
    assert_eq!(publisher.published().len(), 1);
}

#[tokio::test]
async fn test_switch_updates_in_place() {
    let (votes, publisher, ledger) = setup();
    let owner = identity("owner@example.com");
    let voter = identity("voter@example.com");
    let answer_id = Uuid::new_v4();
    votes.register_answer(answer_id, &owner, Uuid::new_v4());

    ledger
        .cast_vote(&voter, answer_id, VoteDirection::Up)
        .await
        .unwrap();
    let receipt = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Down)
        .await
        .unwrap();

    assert_eq!(receipt.outcome, VoteOutcome::Updated);
    let stored = votes.votes_for_answer(answer_id);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].direction, VoteDirection::Down);

    // Every switch publishes, including flapping.
    let third = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Up)
        .await
        .unwrap();
    assert_eq!(third.outcome, VoteOutcome::Updated);
    assert_eq!(publisher.published().len(), 3);
}

#[tokio::test]
async fn test_scenario_create_switch_remove() {
    let (votes, _, ledger) = setup();
    let owner = identity("owner@example.com");
    let voter = identity("voter@example.com");
    let answer_id = Uuid::new_v4();
    votes.register_answer(answer_id, &owner, Uuid::new_v4());

    let created = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Up)
        .await
        .unwrap();
    assert_eq!(created.outcome, VoteOutcome::Created);
    assert_eq!(votes.score(answer_id), 1);

    let updated = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Down)
        .await
        .unwrap();
    assert_eq!(updated.outcome, VoteOutcome::Updated);
    assert_eq!(votes.score(answer_id), -1);

    let removed = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Down)
        .await
        .unwrap();
    assert_eq!(removed.outcome, VoteOutcome::Removed);
    assert_eq!(votes.score(answer_id), 0);
}

#[tokio::test]
async fn test_at_most_one_vote_per_pair() {
    let (votes, _, ledger) = setup();
    let owner = identity("owner@example.com");
    let voter = identity("voter@example.com");
    let answer_id = Uuid::new_v4();
    votes.register_answer(answer_id, &owner, Uuid::new_v4());

    for direction in [
        VoteDirection::Up,
        VoteDirection::Down,
        VoteDirection::Down,
        VoteDirection::Up,
        VoteDirection::Up,
        VoteDirection::Down,
    ] {
        ledger.cast_vote(&voter, answer_id, direction).await.unwrap();
        assert!(votes.votes_for_answer(answer_id).len() <= 1);
    }
}

#[tokio::test]
async fn test_self_vote_skips_notification() {
    let (votes, publisher, ledger) = setup();
    let owner = identity("owner@example.com");
    let answer_id = Uuid::new_v4();
    votes.register_answer(answer_id, &owner, Uuid::new_v4());

    let receipt = ledger
        .cast_vote(&owner, answer_id, VoteDirection::Up)
        .await
        .unwrap();

    assert_eq!(receipt.outcome, VoteOutcome::Created);
    assert_eq!(
        receipt.notification,
        NotificationStatus::Skipped(SkipReason::SelfDirected)
    );
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn test_publish_failure_does_not_change_outcome() {
    let (votes, publisher, ledger) = setup();
    let owner = identity("owner@example.com");
    let voter = identity("voter@example.com");
    let answer_id = Uuid::new_v4();
    votes.register_answer(answer_id, &owner, Uuid::new_v4());
    publisher.fail_next_publishes(true);

    let receipt = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Down)
        .await
        .unwrap();

    assert_eq!(receipt.outcome, VoteOutcome::Created);
    assert_eq!(receipt.notification, NotificationStatus::Failed);
    assert_eq!(votes.score(answer_id), -1);
}

#[tokio::test]
async fn test_unknown_answer_is_not_found() {
    let (votes, _, ledger) = setup();
    let voter = identity("voter@example.com");
    let missing = Uuid::new_v4();

    let err = ledger
        .cast_vote(&voter, missing, VoteDirection::Up)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::AnswerNotFound(id) if id == missing));
    assert!(votes.votes_for_answer(missing).is_empty());
}

#[tokio::test]
async fn test_create_race_surfaces_as_conflict() {
    let (votes, publisher, ledger) = setup();
    let owner = identity("owner@example.com");
    let voter = identity("voter@example.com");
    let answer_id = Uuid::new_v4();
    votes.register_answer(answer_id, &owner, Uuid::new_v4());

    // A concurrent request wins the race between our read and our create.
    votes.race_next_create();

    let err = ledger
        .cast_vote(&voter, answer_id, VoteDirection::Up)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(id) if id == answer_id));
    assert!(publisher.published().is_empty());
}
