//! In-memory collaborators for exercising the ledger and content services
//! without a database or transport.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forum_ledger::errors::PublishError;
use forum_ledger::notifier::NotificationPublisher;
use forum_repository::{
    ContentRepository, ContentRepositoryError, VoteRepository, VoteRepositoryError,
};
use forum_shared::types::{
    AnswerId, AnswerOwner, AnswerRecord, Author, Identity, NewAnswer, NewQuestion, Question,
    QuestionId, QuestionOwner, QuestionSummary, UserId, Vote, VoteDirection,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub fn identity(email: &str) -> Identity {
    Identity {
        id: Uuid::new_v4(),
        email: email.to_string(),
    }
}

pub fn author_of(identity: &Identity, name: &str) -> Author {
    Author {
        id: identity.id,
        name: name.to_string(),
        email: identity.email.clone(),
    }
}

/// Vote store backed by a `HashMap` keyed by the composite pair, mirroring
/// the database's unique-key behavior: a second create for the same pair
/// fails with `DuplicateVote`.
#[derive(Default)]
pub struct MemoryVoteRepository {
    votes: Mutex<HashMap<(UserId, AnswerId), Vote>>,
    owners: Mutex<HashMap<AnswerId, AnswerOwner>>,
    race_next_create: AtomicBool,
}

impl MemoryVoteRepository {
    /// Makes the next create fail with `DuplicateVote`, simulating a
    /// concurrent request that won the race between our read and our write.
    pub fn race_next_create(&self) {
        self.race_next_create.store(true, Ordering::SeqCst);
    }
    pub fn register_answer(&self, answer_id: AnswerId, owner: &Identity, question_id: QuestionId) {
        self.owners.lock().unwrap().insert(
            answer_id,
            AnswerOwner {
                id: owner.id,
                email: owner.email.clone(),
                question_id,
            },
        );
    }

    /// Votes currently stored for one answer, for asserting on final state.
    pub fn votes_for_answer(&self, answer_id: AnswerId) -> Vec<Vote> {
        self.votes
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.answer_id == answer_id)
            .cloned()
            .collect()
    }

    pub fn score(&self, answer_id: AnswerId) -> i64 {
        self.votes_for_answer(answer_id)
            .iter()
            .map(|v| match v.direction {
                VoteDirection::Up => 1,
                VoteDirection::Down => -1,
            })
            .sum()
    }
}

#[async_trait]
impl VoteRepository for MemoryVoteRepository {
    async fn find_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
    ) -> Result<Option<Vote>, VoteRepositoryError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(&(voter_id, answer_id))
            .cloned())
    }

    async fn create_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
        direction: VoteDirection,
    ) -> Result<(), VoteRepositoryError> {
        let mut votes = self.votes.lock().unwrap();
        if self.race_next_create.swap(false, Ordering::SeqCst)
            || votes.contains_key(&(voter_id, answer_id))
        {
            return Err(VoteRepositoryError::DuplicateVote {
                voter_id,
                answer_id,
            });
        }
        votes.insert(
            (voter_id, answer_id),
            Vote {
                voter_id,
                answer_id,
                direction,
                voted_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn update_vote_direction(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
        direction: VoteDirection,
    ) -> Result<(), VoteRepositoryError> {
        if let Some(vote) = self.votes.lock().unwrap().get_mut(&(voter_id, answer_id)) {
            vote.direction = direction;
        }
        Ok(())
    }

    async fn delete_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
    ) -> Result<(), VoteRepositoryError> {
        self.votes.lock().unwrap().remove(&(voter_id, answer_id));
        Ok(())
    }

    async fn find_answer_owner(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AnswerOwner>, VoteRepositoryError> {
        Ok(self.owners.lock().unwrap().get(&answer_id).cloned())
    }

    async fn list_votes_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Vote>, VoteRepositoryError> {
        let owners = self.owners.lock().unwrap();
        Ok(self
            .votes
            .lock()
            .unwrap()
            .values()
            .filter(|v| {
                owners
                    .get(&v.answer_id)
                    .is_some_and(|o| o.question_id == question_id)
            })
            .cloned()
            .collect())
    }
}

/// A published event as recorded by [`RecordingPublisher`].
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub channel: String,
    pub event: String,
    pub payload: serde_json::Value,
}

/// Publisher that records every event, optionally failing on demand.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<PublishedEvent>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    pub fn fail_next_publishes(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<PublishedEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPublisher for RecordingPublisher {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), PublishError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PublishError::Transport("transport down".to_string()));
        }
        self.events.lock().unwrap().push(PublishedEvent {
            channel: channel.to_string(),
            event: event.to_string(),
            payload,
        });
        Ok(())
    }
}

#[derive(Default)]
struct ContentState {
    questions: HashMap<QuestionId, (Question, Identity)>,
    answers: HashMap<AnswerId, AnswerRecord>,
    sessions: HashMap<String, Identity>,
    users: HashMap<UserId, Author>,
}

/// Content store backed by in-memory maps.
#[derive(Default)]
pub struct MemoryContentRepository {
    state: Mutex<ContentState>,
}

impl MemoryContentRepository {
    pub fn register_user(&self, identity: &Identity, name: &str) {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(identity.id, author_of(identity, name));
    }

    pub fn register_session(&self, token: &str, identity: &Identity) {
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(token.to_string(), identity.clone());
    }

    pub fn register_question(&self, owner: &Identity, title: &str) -> QuestionId {
        let id = Uuid::new_v4();
        let question = Question {
            id,
            title: title.to_string(),
            description: "body".to_string(),
            author: self
                .state
                .lock()
                .unwrap()
                .users
                .get(&owner.id)
                .cloned()
                .unwrap_or_else(|| author_of(owner, "owner")),
            tags: Vec::new(),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .questions
            .insert(id, (question, owner.clone()));
        id
    }

    pub fn register_answer(
        &self,
        author: &Identity,
        question_id: QuestionId,
        parent_id: Option<AnswerId>,
        created_at: DateTime<Utc>,
    ) -> AnswerId {
        let id = Uuid::new_v4();
        let record = AnswerRecord {
            id,
            question_id,
            parent_id,
            content: "content".to_string(),
            author: self
                .state
                .lock()
                .unwrap()
                .users
                .get(&author.id)
                .cloned()
                .unwrap_or_else(|| author_of(author, "author")),
            created_at,
        };
        self.state.lock().unwrap().answers.insert(id, record);
        id
    }
}

#[async_trait]
impl ContentRepository for MemoryContentRepository {
    async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<Identity>, ContentRepositoryError> {
        Ok(self.state.lock().unwrap().sessions.get(token).cloned())
    }

    async fn create_question(
        &self,
        author_id: UserId,
        new: &NewQuestion,
    ) -> Result<Question, ContentRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let author = state.users.get(&author_id).cloned().expect("unknown user");
        let question = Question {
            id: Uuid::new_v4(),
            title: new.title.clone(),
            description: new.description.clone(),
            author: author.clone(),
            tags: new.tags.clone(),
            created_at: Utc::now(),
        };
        let owner = Identity {
            id: author.id,
            email: author.email.clone(),
        };
        state
            .questions
            .insert(question.id, (question.clone(), owner));
        Ok(question)
    }

    async fn list_questions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<QuestionSummary>, ContentRepositoryError> {
        let state = self.state.lock().unwrap();
        let mut questions: Vec<Question> =
            state.questions.values().map(|(q, _)| q.clone()).collect();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_questions(&self) -> Result<u64, ContentRepositoryError> {
        Ok(self.state.lock().unwrap().questions.len() as u64)
    }

    async fn find_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<QuestionSummary>, ContentRepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .questions
            .get(&question_id)
            .map(|(q, _)| q.clone()))
    }

    async fn find_question_owner(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<QuestionOwner>, ContentRepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .questions
            .get(&question_id)
            .map(|(q, owner)| QuestionOwner {
                id: owner.id,
                email: owner.email.clone(),
                title: q.title.clone(),
            }))
    }

    async fn create_answer(
        &self,
        author_id: UserId,
        new: &NewAnswer,
    ) -> Result<AnswerRecord, ContentRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let author = state.users.get(&author_id).cloned().expect("unknown user");
        let record = AnswerRecord {
            id: Uuid::new_v4(),
            question_id: new.question_id,
            parent_id: new.parent_id,
            content: new.content.clone(),
            author,
            created_at: Utc::now(),
        };
        state.answers.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_answer(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AnswerRecord>, ContentRepositoryError> {
        Ok(self.state.lock().unwrap().answers.get(&answer_id).cloned())
    }

    async fn list_answers_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerRecord>, ContentRepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect())
    }
}
