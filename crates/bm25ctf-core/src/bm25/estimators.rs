//! Term weighting factors.
//!
//! Three independent estimates of how informative a term is, all derived from
//! index statistics:
//!
//! ```text
//! idf  = ln((N + 1) / (n + 1)) + 1
//! ictf = ln(M / ctf)
//! pidf = ln(1 + p_df / p_ctf)
//!        p_df  = N * (1 - e^(-ctf / N))      expected docs containing the term (Poisson)
//!        p_ctf = -N * ln(1 - n / N)          same quantity inverted from n (Bernoulli)
//! ```
//!
//! Where N = docCount, n = docFreq, M = sumTotalTermFreq, ctf = totalTermFreq.
//!
//! The factors are single precision. Intermediate steps mirror the
//! precision of the reference formulas exactly, so scores are reproducible
//! bit for bit across implementations.
//!
//! # Degenerate statistics
//!
//! Nothing here validates its input. Inconsistent statistics produce IEEE
//! special values that flow into the score:
//!
//! - `ctf == 0`: ictf is `+inf`
//! - `n == N`: `ln(0) = -inf`, so `p_ctf = +inf` and pidf is exactly `0`
//! - `n > N`: pidf is `NaN`
//! - `N == 0`: avgdl is `+inf` or `NaN`

use crate::explanation::Explanation;
use crate::stats::{CollectionStatistics, TermStatistics};

/// `ln((doc_count + 1) / (doc_freq + 1)) + 1`.
pub fn idf(doc_freq: u64, doc_count: u64) -> f32 {
    // added in f64: u64::MAX counts must not overflow
    (((doc_count as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0) as f32
}

/// `ln(sum_total_term_freq / total_term_freq)`.
pub fn ictf(total_term_freq: u64, sum_total_term_freq: u64) -> f32 {
    ((sum_total_term_freq as f32 / total_term_freq as f32) as f64).ln() as f32
}

/// `ln(1 + p_df / p_ctf)`, see the module docs.
pub fn pidf(doc_freq: u64, doc_count: u64, total_term_freq: u64) -> f32 {
    let n = doc_count as f32;
    let pdf = n * (1.0 - 1.0 / ((total_term_freq as f32 / n) as f64).exp() as f32);
    let pctf = -n * ((1.0 - doc_freq as f32 / n) as f64).ln() as f32;
    ((1.0 + pdf / pctf) as f64).ln() as f32
}

/// `sum_total_term_freq / doc_count`, divided as reals.
pub fn avg_field_length(collection: &CollectionStatistics) -> f32 {
    (collection.sum_total_term_freq as f64 / collection.doc_count as f64) as f32
}

/// The estimator functions a similarity scores with.
///
/// Every field defaults to the function of the same name in this module.
/// Swap one out to experiment with a different weighting without touching
/// the scorer:
///
/// ```
/// use bm25ctf_core::bm25::Estimators;
///
/// fn flat_idf(_doc_freq: u64, _doc_count: u64) -> f32 {
///     1.0
/// }
///
/// let estimators = Estimators::default().with_idf(flat_idf);
/// assert_eq!((estimators.idf)(5, 10), 1.0);
/// ```
#[derive(Clone, Copy)]
pub struct Estimators {
    /// `(doc_freq, doc_count) -> idf`
    pub idf: fn(u64, u64) -> f32,
    /// `(total_term_freq, sum_total_term_freq) -> ictf`
    pub ictf: fn(u64, u64) -> f32,
    /// `(doc_freq, doc_count, total_term_freq) -> pidf`
    pub pidf: fn(u64, u64, u64) -> f32,
    /// Average field length used for length normalization.
    pub avg_field_length: fn(&CollectionStatistics) -> f32,
}

impl Default for Estimators {
    fn default() -> Self {
        Self {
            idf,
            ictf,
            pidf,
            avg_field_length,
        }
    }
}

impl std::fmt::Debug for Estimators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let defaults = Self::default();
        f.debug_struct("Estimators")
            .field("idf", &label(self.idf as usize == defaults.idf as usize))
            .field("ictf", &label(self.ictf as usize == defaults.ictf as usize))
            .field("pidf", &label(self.pidf as usize == defaults.pidf as usize))
            .field(
                "avg_field_length",
                &label(self.avg_field_length as usize == defaults.avg_field_length as usize),
            )
            .finish()
    }
}

fn label(is_default: bool) -> &'static str {
    if is_default {
        "default"
    } else {
        "custom"
    }
}

impl Estimators {
    pub fn with_idf(mut self, f: fn(u64, u64) -> f32) -> Self {
        self.idf = f;
        self
    }

    pub fn with_ictf(mut self, f: fn(u64, u64) -> f32) -> Self {
        self.ictf = f;
        self
    }

    pub fn with_pidf(mut self, f: fn(u64, u64, u64) -> f32) -> Self {
        self.pidf = f;
        self
    }

    pub fn with_avg_field_length(mut self, f: fn(&CollectionStatistics) -> f32) -> Self {
        self.avg_field_length = f;
        self
    }

    // ------------------------------------------------------------------------
    // Single-term explanations
    // ------------------------------------------------------------------------

    /// idf of one term, citing docFreq and docCount.
    pub fn idf_explain(
        &self,
        collection: &CollectionStatistics,
        term: &TermStatistics,
    ) -> Explanation {
        let df = term.doc_freq;
        let doc_count = collection.doc_count;
        Explanation::matched(
            (self.idf)(df, doc_count),
            "idf, computed as log((docCount+1)/(docFreq+1)) + 1 from:",
            vec![
                Explanation::leaf(df as f32, "n, number of documents containing term"),
                Explanation::leaf(doc_count as f32, "N, total number of documents with field"),
            ],
        )
    }

    /// ictf of one term, citing the field and term token counts.
    pub fn ictf_explain(
        &self,
        collection: &CollectionStatistics,
        term: &TermStatistics,
    ) -> Explanation {
        let ctf = term.total_term_freq;
        let sum_total_term_freq = collection.sum_total_term_freq;
        Explanation::matched(
            (self.ictf)(ctf, sum_total_term_freq),
            "ictf, computed as log(M / ctf) from:",
            vec![
                Explanation::leaf(
                    sum_total_term_freq as f32,
                    "M, total number of tokens in the field",
                ),
                Explanation::leaf(ctf as f32, "ctf, total number of occurrences of this term"),
            ],
        )
    }

    /// pidf of one term, citing docFreq, totalTermFreq and docCount.
    pub fn pidf_explain(
        &self,
        collection: &CollectionStatistics,
        term: &TermStatistics,
    ) -> Explanation {
        let df = term.doc_freq;
        let doc_count = collection.doc_count;
        let ctf = term.total_term_freq;
        Explanation::matched(
            (self.pidf)(df, doc_count, ctf),
            "pidf, computed as log(1 + p_df/p_ctf) from:",
            vec![
                Explanation::leaf(df as f32, "n, number of documents containing term"),
                Explanation::leaf(ctf as f32, "ctf, total number of occurrences of this term"),
                Explanation::leaf(doc_count as f32, "N, total number of documents with field"),
            ],
        )
    }

    // ------------------------------------------------------------------------
    // Phrase explanations
    // ------------------------------------------------------------------------

    /// Sum of the per-term idf values of a phrase.
    pub fn idf_explain_phrase(
        &self,
        collection: &CollectionStatistics,
        terms: &[TermStatistics],
    ) -> Explanation {
        sum_explain("idf, sum of:", terms, |t| self.idf_explain(collection, t))
    }

    /// Sum of the per-term ictf values of a phrase.
    pub fn ictf_explain_phrase(
        &self,
        collection: &CollectionStatistics,
        terms: &[TermStatistics],
    ) -> Explanation {
        sum_explain("ictf, sum of:", terms, |t| self.ictf_explain(collection, t))
    }

    /// Sum of the per-term pidf values of a phrase.
    pub fn pidf_explain_phrase(
        &self,
        collection: &CollectionStatistics,
        terms: &[TermStatistics],
    ) -> Explanation {
        sum_explain("pidf, sum of:", terms, |t| self.pidf_explain(collection, t))
    }
}

/// Accumulates in f64 and rounds once, so long phrases do not drift.
fn sum_explain<F>(description: &str, terms: &[TermStatistics], explain: F) -> Explanation
where
    F: Fn(&TermStatistics) -> Explanation,
{
    let mut total = 0f64;
    let details: Vec<Explanation> = terms
        .iter()
        .map(|term| {
            let expl = explain(term);
            total += expl.value() as f64;
            expl
        })
        .collect();
    Explanation::matched(total as f32, description, details)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> CollectionStatistics {
        CollectionStatistics::new(1000, 500_000).unwrap()
    }

    fn term() -> TermStatistics {
        TermStatistics::new(10, 50).unwrap()
    }

    #[test]
    fn test_idf_values() {
        let expected = ((1001.0f64 / 11.0).ln() + 1.0) as f32;
        assert_eq!(idf(10, 1000), expected);
        // n == N still positive
        assert!((idf(1000, 1000) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_idf_extreme_counts_do_not_overflow() {
        let value = idf(u64::MAX, u64::MAX);
        assert!(value.is_finite());
        assert!((value - 1.0).abs() < 1e-6);
        assert!(idf(0, u64::MAX) > 40.0);
    }

    #[test]
    fn test_idf_decreasing() {
        let mut last = f32::INFINITY;
        for df in 1..=100 {
            let value = idf(df, 100);
            assert!(value < last);
            assert!(value > 0.0);
            last = value;
        }
    }

    #[test]
    fn test_ictf_value() {
        assert!((ictf(50, 500_000) - (10_000f64).ln() as f32).abs() < 1e-5);
        assert_eq!(ictf(0, 500_000), f32::INFINITY);
    }

    #[test]
    fn test_pidf_positive_for_rare_term() {
        let value = pidf(10, 1000, 50);
        assert!(value.is_finite());
        assert!(value > 0.0);
    }

    #[test]
    fn test_pidf_term_in_every_document_is_zero() {
        assert_eq!(pidf(1000, 1000, 5000), 0.0);
    }

    #[test]
    fn test_pidf_inconsistent_statistics_is_nan() {
        assert!(pidf(1001, 1000, 5000).is_nan());
    }

    #[test]
    fn test_avg_field_length_is_real_division() {
        let stats = CollectionStatistics::new(3, 10).unwrap();
        assert!((avg_field_length(&stats) - 10.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_term_explanations() {
        let est = Estimators::default();
        let idf_expl = est.idf_explain(&collection(), &term());
        assert_eq!(idf_expl.value(), idf(10, 1000));
        assert_eq!(idf_expl.details().len(), 2);
        assert_eq!(idf_expl.details()[1].value(), 1000.0);

        let ictf_expl = est.ictf_explain(&collection(), &term());
        assert_eq!(ictf_expl.value(), ictf(50, 500_000));
        assert_eq!(ictf_expl.details()[0].value(), 500_000.0);

        let pidf_expl = est.pidf_explain(&collection(), &term());
        assert_eq!(pidf_expl.value(), pidf(10, 1000, 50));
        assert_eq!(pidf_expl.details().len(), 3);
    }

    #[test]
    fn test_phrase_sums_terms() {
        let est = Estimators::default();
        let terms = [
            TermStatistics::new(10, 50).unwrap(),
            TermStatistics::new(200, 900).unwrap(),
            TermStatistics::new(3, 3).unwrap(),
        ];
        let phrase = est.idf_explain_phrase(&collection(), &terms);
        assert_eq!(phrase.description(), "idf, sum of:");
        assert_eq!(phrase.details().len(), 3);
        let expected: f32 = terms.iter().map(|t| idf(t.doc_freq, 1000)).sum();
        assert!((phrase.value() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_empty_phrase_is_zero() {
        let est = Estimators::default();
        assert_eq!(est.pidf_explain_phrase(&collection(), &[]).value(), 0.0);
    }

    #[test]
    fn test_custom_estimator_is_used_by_explain() {
        fn two(_: u64, _: u64) -> f32 {
            2.0
        }
        let est = Estimators::default().with_ictf(two);
        assert_eq!(est.ictf_explain(&collection(), &term()).value(), 2.0);
        assert!(format!("{:?}", est).contains("custom"));
    }
}
