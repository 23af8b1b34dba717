//! # Forum Ledger
//!
//! This crate defines the core services of the forum: the vote ledger state
//! machine, the answer tree projection, and the content service for questions
//! and answers, along with the notification publisher seam and error handling.
pub mod content;
pub mod errors;
pub mod ledger;
pub mod notifier;
pub mod projection;

pub use content::{ContentService, QuestionDetail, QuestionPage};
pub use errors::{ContentError, LedgerError, PublishError};
pub use ledger::{VoteLedger, VoteReceipt};
pub use notifier::{NotificationPublisher, NotificationStatus, SkipReason};
