//! Per-query scorer.
//!
//! A [`Bm25CtfScorer`] is built once for a field and a set of query terms and
//! then invoked for every matching document:
//!
//! ```text
//! score(freq, norm) = weight * (freq / (freq + cache[norm]) + d)
//!
//! weight     = (k1 + 1) * boost * ictf * pidf * idf
//! cache[i]   = k1 * (1 - b + b * dl(i) / avgdl)
//! ```
//!
//! Everything that does not depend on the document is folded into `weight`
//! and the 256-entry `cache` up front, so scoring a document is one table
//! lookup and a handful of float operations.

use crate::explanation::Explanation;
use crate::norms::smallfloat::{decode_length, is_approximate};

/// Scores documents for one query term (or phrase) in one field.
///
/// Immutable once built; share it by reference across threads scoring
/// different documents of the same query. Do not reuse it for a query with
/// different statistics.
#[derive(Debug, Clone)]
pub struct Bm25CtfScorer {
    /// query boost
    boost: f32,
    /// term saturation
    k1: f32,
    /// length normalization
    b: f32,
    /// tf lower bound
    d: f32,
    ictf: Explanation,
    pidf: Explanation,
    idf: Explanation,
    avgdl: f32,
    /// `k1 * ((1 - b) + b * dl / avgdl)` for every norm byte
    cache: [f32; 256],
    /// `(k1 + 1) * boost * ictf * pidf * idf`
    weight: f32,
}

impl Bm25CtfScorer {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        boost: f32,
        k1: f32,
        b: f32,
        d: f32,
        ictf: Explanation,
        pidf: Explanation,
        idf: Explanation,
        avgdl: f32,
    ) -> Self {
        let mut cache = [0f32; 256];
        for (i, slot) in cache.iter_mut().enumerate() {
            *slot = k1 * ((1.0 - b) + b * decode_length(i as u8) / avgdl);
        }
        let weight = (k1 + 1.0) * boost * ictf.value() * pidf.value() * idf.value();

        Self {
            boost,
            k1,
            b,
            d,
            ictf,
            pidf,
            idf,
            avgdl,
            cache,
            weight,
        }
    }

    /// Score of a document with term frequency `freq` and norm byte `encoded_norm`.
    #[inline]
    pub fn score(&self, freq: f32, encoded_norm: u8) -> f32 {
        self.weight * self.tf(freq, encoded_norm)
    }

    /// `freq / (freq + norm) + d`, computed in double precision.
    ///
    /// A zero frequency contributes only `d`, even when the cached norm is
    /// zero (`k1 == 0`, or `b == 1` on an empty field).
    #[inline]
    fn tf(&self, freq: f32, encoded_norm: u8) -> f32 {
        let norm = self.cache[encoded_norm as usize] as f64;
        let freq = freq as f64;
        let saturation = if freq == 0.0 { 0.0 } else { freq / (freq + norm) };
        (saturation + self.d as f64) as f32
    }

    /// Explanation whose value is bit-identical to
    /// `score(freq.value(), encoded_norm)`.
    pub fn explain(&self, freq: Explanation, encoded_norm: u8) -> Explanation {
        let freq_value = freq.value();
        let mut subs = self.explain_constant_factors();
        let tf = self.explain_tf(freq, encoded_norm);
        let score = self.weight * tf.value();
        subs.push(tf);
        Explanation::matched(
            score,
            format!("score(freq={}), product of:", freq_value),
            subs,
        )
    }

    fn explain_tf(&self, freq: Explanation, encoded_norm: u8) -> Explanation {
        let value = self.tf(freq.value(), encoded_norm);
        let doc_len = decode_length(encoded_norm);
        let dl_description = if is_approximate(encoded_norm) {
            "dl, length of field (approximate)"
        } else {
            "dl, length of field"
        };

        Explanation::matched(
            value,
            "tf, computed as freq / (freq + k1 * (1 - b + b * dl / avgdl)) + d from:",
            vec![
                freq,
                Explanation::leaf(self.k1, "k1, term saturation parameter"),
                Explanation::leaf(self.b, "b, length normalization parameter"),
                Explanation::leaf(doc_len, dl_description),
                Explanation::leaf(self.avgdl, "avgdl, average length of field"),
                Explanation::leaf(self.d, "d, lower bound of term frequency normalization"),
            ],
        )
    }

    fn explain_constant_factors(&self) -> Vec<Explanation> {
        let mut subs = Vec::with_capacity(6);
        subs.push(Explanation::leaf(self.k1 + 1.0, "scaling factor, k1 + 1"));
        if self.boost != 1.0 {
            subs.push(Explanation::leaf(self.boost, "boost"));
        }
        subs.push(self.ictf.clone());
        subs.push(self.pidf.clone());
        subs.push(self.idf.clone());
        subs
    }

    /// The folded query-level factor.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn avgdl(&self) -> f32 {
        self.avgdl
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Cached length-normalization term for a norm byte.
    pub fn norm(&self, encoded_norm: u8) -> f32 {
        self.cache[encoded_norm as usize]
    }

    pub fn idf(&self) -> &Explanation {
        &self.idf
    }

    pub fn ictf(&self) -> &Explanation {
        &self.ictf
    }

    pub fn pidf(&self) -> &Explanation {
        &self.pidf
    }
}
