pub mod adapter;
pub mod client;
pub mod types;

pub use adapter::ApiFlavor;
pub use client::GitHubClient;
pub use types::{CommitAuthor, CommitSummary, TagRef};
