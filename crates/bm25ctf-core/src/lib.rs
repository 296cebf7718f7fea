//! # bm25ctf-core
//!
//! **BM25-CTF similarity** – document scoring for a text-retrieval engine.
//!
//! Given statistics collected from an inverted index, this crate produces a
//! relevance score for every document matching a query term or phrase, and
//! on request a tree explaining how that score was derived.
//!
//! ## Main Types
//!
//! - [`Bm25CtfSimilarity`] – validated parameters; builds one scorer per query
//! - [`Bm25CtfScorer`] – precomputed per-query state; scores documents
//! - [`Explanation`] – score breakdown tree
//! - [`SimilarityError`] – construction and config errors
//!
//! ## Modules
//!
//! - [`bm25`] – similarity, scorer and term weighting estimators
//! - [`norms`] – one-byte field length codec and indexing-time norm policy
//! - [`stats`] – collection and term statistics
//! - [`explanation`] – explanation tree
//! - [`config`] – parameter configuration and file loading
//! - [`errors`] – error types
//!
//! ## Example
//!
//! ```
//! use bm25ctf_core::{Bm25CtfSimilarity, CollectionStatistics, TermStatistics};
//! use bm25ctf_core::norms::int_to_byte4;
//!
//! let similarity = Bm25CtfSimilarity::default();
//! let scorer = similarity.scorer(
//!     1.0,
//!     &CollectionStatistics::new(1000, 500_000)?,
//!     &[TermStatistics::new(10, 50)?],
//! );
//!
//! let short_doc = scorer.score(3.0, int_to_byte4(80));
//! let long_doc = scorer.score(3.0, int_to_byte4(2000));
//! assert!(short_doc > long_doc);
//! # Ok::<(), bm25ctf_core::SimilarityError>(())
//! ```

// Modules
pub mod bm25;
pub mod config;
pub mod errors;
pub mod explanation;
pub mod norms;
pub mod stats;

// Re-exports for convenience
pub use bm25::{Bm25CtfScorer, Bm25CtfSimilarity, Estimators};
pub use config::{SimilarityConfig, DEFAULT_B, DEFAULT_D, DEFAULT_K1};
pub use errors::{Result, SimilarityError};
pub use explanation::Explanation;
pub use norms::{FieldInvertState, IndexOptions, NormPolicy};
pub use stats::{CollectionStatistics, TermStatistics};
