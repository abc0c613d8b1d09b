//! Core trait abstractions for the pipeline.
//!
//! These traits are the seams between the orchestrator and the
//! external collaborators: page fetching, the LLM service, and the
//! document store.

pub mod ai;
pub mod fetcher;
pub mod store;

pub use ai::Ai;
pub use fetcher::Fetcher;
pub use store::{cosine_similarity, DocumentStore};
