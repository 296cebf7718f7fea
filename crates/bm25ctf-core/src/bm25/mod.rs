//! BM25-CTF scoring.
//!
//! Classic BM25 term-frequency saturation and length normalization, with the
//! idf factor multiplied by two further term weights: the inverse collection
//! term frequency (ictf) and a probabilistic idf (pidf).
//!
//! ```text
//! score = (k1 + 1) * boost * ictf * pidf * idf
//!         * (freq / (freq + k1 * (1 - b + b * dl / avgdl)) + d)
//! ```
//!
//! ## Key Components
//!
//! - [`estimators`]: the idf / ictf / pidf / avgdl functions and their explanations
//! - [`Bm25CtfSimilarity`]: validated parameters, builds scorers
//! - [`Bm25CtfScorer`]: per-query precomputed state, scores and explains documents
//!
//! ## Usage
//!
//! ```
//! use bm25ctf_core::bm25::Bm25CtfSimilarity;
//! use bm25ctf_core::{CollectionStatistics, Explanation, TermStatistics};
//!
//! let similarity = Bm25CtfSimilarity::new(1.2, 0.75, 0.5)?;
//! let collection = CollectionStatistics::new(1000, 500_000)?;
//! let term = TermStatistics::new(10, 50)?;
//!
//! // once per query
//! let scorer = similarity.scorer(1.0, &collection, &[term]);
//!
//! // once per matching document
//! let score = scorer.score(3.0, 54);
//! let explanation = scorer.explain(Explanation::freq(3.0), 54);
//! assert_eq!(score, explanation.value());
//! # Ok::<(), bm25ctf_core::SimilarityError>(())
//! ```

pub mod estimators;
mod scorer;
mod similarity;

pub use estimators::Estimators;
pub use scorer::Bm25CtfScorer;
pub use similarity::Bm25CtfSimilarity;
