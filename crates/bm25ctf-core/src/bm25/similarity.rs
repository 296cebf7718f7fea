//! The similarity: validated parameters plus the strategies used to build scorers.

use std::fmt;

use crate::config::{validate_parameters, SimilarityConfig, DEFAULT_B, DEFAULT_D, DEFAULT_K1};
use crate::errors::Result;
use crate::norms::{FieldInvertState, NormPolicy};
use crate::stats::{CollectionStatistics, TermStatistics};

use super::estimators::Estimators;
use super::scorer::Bm25CtfScorer;

/// BM25 with collection-frequency (ictf) and probabilistic idf (pidf) factors.
///
/// Built once with fixed parameters. Each query term set gets its own
/// [`Bm25CtfScorer`] via [`scorer`](Self::scorer).
#[derive(Debug, Clone, Copy)]
pub struct Bm25CtfSimilarity {
    k1: f32,
    b: f32,
    d: f32,
    norm_policy: NormPolicy,
    estimators: Estimators,
}

impl Bm25CtfSimilarity {
    /// Similarity with the given parameters, default norm policy and estimators.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError::InvalidParameter`](crate::SimilarityError::InvalidParameter)
    /// if `k1` is negative or not finite, or if `b` or `d` is outside `[0, 1]`.
    pub fn new(k1: f32, b: f32, d: f32) -> Result<Self> {
        validate_parameters(k1, b, d)?;
        Ok(Self {
            k1,
            b,
            d,
            norm_policy: NormPolicy::default(),
            estimators: Estimators::default(),
        })
    }

    pub fn from_config(config: &SimilarityConfig) -> Result<Self> {
        Ok(Self::new(config.k1, config.b, config.d)?.with_norm_policy(config.norm_policy()))
    }

    pub fn with_norm_policy(mut self, norm_policy: NormPolicy) -> Self {
        self.norm_policy = norm_policy;
        self
    }

    pub fn with_estimators(mut self, estimators: Estimators) -> Self {
        self.estimators = estimators;
        self
    }

    pub fn k1(&self) -> f32 {
        self.k1
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    pub fn d(&self) -> f32 {
        self.d
    }

    pub fn norm_policy(&self) -> NormPolicy {
        self.norm_policy
    }

    pub fn estimators(&self) -> &Estimators {
        &self.estimators
    }

    /// Norm byte to store for a field at indexing time.
    pub fn compute_norm(&self, state: &FieldInvertState) -> u8 {
        self.norm_policy.compute_norm(state)
    }

    /// Builds the scorer for one query term (one `TermStatistics`) or a
    /// phrase (several).
    ///
    /// Statistics are not re-validated here. Degenerate values propagate as
    /// `NaN` or infinite weights; see [`estimators`](super::estimators).
    pub fn scorer(
        &self,
        boost: f32,
        collection: &CollectionStatistics,
        terms: &[TermStatistics],
    ) -> Bm25CtfScorer {
        let est = &self.estimators;
        let (ictf, pidf, idf) = match terms {
            [term] => (
                est.ictf_explain(collection, term),
                est.pidf_explain(collection, term),
                est.idf_explain(collection, term),
            ),
            _ => (
                est.ictf_explain_phrase(collection, terms),
                est.pidf_explain_phrase(collection, terms),
                est.idf_explain_phrase(collection, terms),
            ),
        };
        let avgdl = (est.avg_field_length)(collection);

        if pidf.value() == 0.0 && !terms.is_empty() {
            tracing::debug!(
                doc_count = collection.doc_count,
                "pidf is zero: every document contains the term, scores will be zero"
            );
        }

        let scorer = Bm25CtfScorer::new(boost, self.k1, self.b, self.d, ictf, pidf, idf, avgdl);

        if !scorer.weight().is_finite() || !avgdl.is_finite() {
            tracing::warn!(
                weight = scorer.weight(),
                avgdl,
                ictf = scorer.ictf().value(),
                pidf = scorer.pidf().value(),
                idf = scorer.idf().value(),
                "Scorer built from degenerate statistics, scores will not be finite"
            );
        }
        tracing::trace!(
            weight = scorer.weight(),
            avgdl,
            terms = terms.len(),
            "Built BM25-CTF scorer"
        );
        scorer
    }
}

impl Default for Bm25CtfSimilarity {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
            d: DEFAULT_D,
            norm_policy: NormPolicy::default(),
            estimators: Estimators::default(),
        }
    }
}

impl fmt::Display for Bm25CtfSimilarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BM25Ctf(k1={},b={},d={})", self.k1, self.b, self.d)
    }
}
