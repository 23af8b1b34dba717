//! Read-time projection of the answer reply tree.
//!
//! Answers are stored flat with parent references; the tree is rebuilt here
//! with a single grouping pass over the rows (no recursive queries, so depth
//! never multiplies round-trips). Vote tallies and the viewer's own direction
//! are computed per node by linear scan of that answer's votes.
use forum_shared::types::{AnswerId, AnswerRecord, AnswerView, UserId, Vote, VoteDirection};
use std::collections::HashMap;

/// Projects a question's flat answer and vote rows into the reply tree.
///
/// Top-level answers are ordered newest-first, replies oldest-first. Cycles
/// are impossible: the create path only accepts a parent that already exists
/// on the same question, so parent references form a strict tree.
pub fn project_answer_tree(
    answers: Vec<AnswerRecord>,
    votes: &[Vote],
    viewer: Option<UserId>,
) -> Vec<AnswerView> {
    let mut votes_by_answer: HashMap<AnswerId, Vec<&Vote>> = HashMap::new();
    for vote in votes {
        votes_by_answer.entry(vote.answer_id).or_default().push(vote);
    }

    let mut children: HashMap<Option<AnswerId>, Vec<AnswerRecord>> = HashMap::new();
    for answer in answers {
        children.entry(answer.parent_id).or_default().push(answer);
    }

    let mut roots = children.remove(&None).unwrap_or_default();
    roots.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    roots
        .into_iter()
        .map(|root| build_node(root, &mut children, &votes_by_answer, viewer))
        .collect()
}

fn build_node(
    record: AnswerRecord,
    children: &mut HashMap<Option<AnswerId>, Vec<AnswerRecord>>,
    votes_by_answer: &HashMap<AnswerId, Vec<&Vote>>,
    viewer: Option<UserId>,
) -> AnswerView {
    let empty = Vec::new();
    let votes = votes_by_answer.get(&record.id).unwrap_or(&empty);

    let upvotes = votes
        .iter()
        .filter(|v| v.direction == VoteDirection::Up)
        .count() as u64;
    let downvotes = votes
        .iter()
        .filter(|v| v.direction == VoteDirection::Down)
        .count() as u64;
    let viewer_vote = viewer.and_then(|viewer_id| {
        votes
            .iter()
            .find(|v| v.voter_id == viewer_id)
            .map(|v| v.direction)
    });

    let mut replies = children.remove(&Some(record.id)).unwrap_or_default();
    replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    let replies = replies
        .into_iter()
        .map(|reply| build_node(reply, children, votes_by_answer, viewer))
        .collect();

    AnswerView {
        id: record.id,
        content: record.content,
        author: record.author,
        created_at: record.created_at,
        upvotes,
        downvotes,
        score: upvotes as i64 - downvotes as i64,
        viewer_vote,
        replies,
    }
}
