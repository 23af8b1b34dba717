//! Error types for the forum ledger crate.
//! Consolidates and re-exports error types from the ledger, content, and
//! notifier modules.
mod content;
mod ledger;
mod publish;

pub use content::ContentError;
pub use ledger::LedgerError;
pub use publish::PublishError;
