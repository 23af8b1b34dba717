//! This module defines and re-exports the interfaces for the forum repository.
//! It serves as a central point for accessing traits related to data interaction.
mod content;
mod votes;

pub use content::ContentRepository;
pub use votes::VoteRepository;
