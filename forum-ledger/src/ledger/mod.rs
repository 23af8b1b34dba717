//! The vote ledger: at most one directional vote per (voter, answer) pair.
//!
//! The transition over (existing vote, requested direction) is a pure
//! function; persistence and notification are applied around it. The store's
//! composite unique key is the sole concurrency-correctness mechanism — a
//! create racing another create for the same pair surfaces as
//! [`LedgerError::Conflict`], with no in-service retry.
use crate::errors::LedgerError;
use crate::notifier::{publish_best_effort, NotificationPublisher, NotificationStatus, SkipReason};
use forum_repository::{VoteRepository, VoteRepositoryError};
use forum_shared::types::{AnswerId, Identity, NotificationEvent, VoteDirection, VoteOutcome};
use std::sync::Arc;
use tracing::instrument;

/// The persistence action selected by the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Create(VoteDirection),
    Update(VoteDirection),
    Remove,
}

/// Complete transition table of the ledger: two persistent states (up, down)
/// plus the implicit absent state, against two input directions.
fn transition(existing: Option<VoteDirection>, requested: VoteDirection) -> Transition {
    match existing {
        None => Transition::Create(requested),
        Some(current) if current == requested => Transition::Remove,
        Some(_) => Transition::Update(requested),
    }
}

/// The result of a successful `cast_vote` call.
///
/// The primary outcome and the notification side-channel are reported
/// separately: the vote mutation is the operation of record, notification is
/// best-effort and its failure never changes the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteReceipt {
    pub outcome: VoteOutcome,
    pub notification: NotificationStatus,
}

/// Records votes and emits change notifications to answer owners.
pub struct VoteLedger {
    votes: Arc<dyn VoteRepository>,
    publisher: Arc<dyn NotificationPublisher>,
}

impl VoteLedger {
    /// Creates a new ledger over a vote store and a notification transport.
    pub fn new(votes: Arc<dyn VoteRepository>, publisher: Arc<dyn NotificationPublisher>) -> Self {
        Self { votes, publisher }
    }

    /// Casts a vote for `voter` on `answer_id`.
    ///
    /// Applies the transition table: first vote creates, same-direction
    /// re-vote removes (toggle-off), opposite-direction re-vote flips the
    /// stored direction. On `Created` or `Updated` — never on `Removed` —
    /// and only when the answer owner is a distinct identity from the voter,
    /// a `new-vote` event is published to the owner's channel. Every switch
    /// publishes, including rapid flapping by the same voter.
    ///
    /// # Errors
    ///
    /// * `AnswerNotFound` - `answer_id` does not resolve to an answer.
    /// * `Conflict` - a concurrent request created the vote first.
    /// * `Repository` - the store failed.
    #[instrument(skip(self, voter), fields(voter_id = %voter.id, answer_id = %answer_id))]
    pub async fn cast_vote(
        &self,
        voter: &Identity,
        answer_id: AnswerId,
        requested: VoteDirection,
    ) -> Result<VoteReceipt, LedgerError> {
        let owner = self
            .votes
            .find_answer_owner(answer_id)
            .await?
            .ok_or(LedgerError::AnswerNotFound(answer_id))?;

        let existing = self
            .votes
            .find_vote(voter.id, answer_id)
            .await?
            .map(|vote| vote.direction);

        let outcome = match transition(existing, requested) {
            Transition::Create(direction) => {
                match self.votes.create_vote(voter.id, answer_id, direction).await {
                    Ok(()) => VoteOutcome::Created,
                    Err(VoteRepositoryError::DuplicateVote { .. }) => {
                        return Err(LedgerError::Conflict(answer_id));
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Transition::Update(direction) => {
                self.votes
                    .update_vote_direction(voter.id, answer_id, direction)
                    .await?;
                VoteOutcome::Updated
            }
            Transition::Remove => {
                self.votes.delete_vote(voter.id, answer_id).await?;
                VoteOutcome::Removed
            }
        };

        let notification = match outcome {
            VoteOutcome::Removed => NotificationStatus::Skipped(SkipReason::RemovedVote),
            VoteOutcome::Created | VoteOutcome::Updated if owner.id == voter.id => {
                NotificationStatus::Skipped(SkipReason::SelfDirected)
            }
            VoteOutcome::Created | VoteOutcome::Updated => {
                let event = NotificationEvent::NewVote {
                    direction: requested,
                    answer_id,
                    question_id: owner.question_id,
                };
                publish_best_effort(self.publisher.as_ref(), &owner.email, &event).await
            }
        };

        Ok(VoteReceipt {
            outcome,
            notification,
        })
    }
}
