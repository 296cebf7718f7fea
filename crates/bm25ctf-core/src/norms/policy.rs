//! Indexing-time length computation.
//!
//! The indexer calls [`NormPolicy::compute_norm`] once per document and field
//! and stores the resulting byte next to the postings. Scoring only ever
//! decodes that byte.

use serde::{Deserialize, Serialize};

use super::smallfloat::int_to_byte4;

/// First index format that stores unique-term counts for docs-only fields.
pub const UNIQUE_TERM_COUNT_MIN_VERSION: u32 = 8;

/// What the inverted index records for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexOptions {
    /// Document ids only, no frequencies.
    Docs,
    /// Document ids and term frequencies.
    DocsAndFreqs,
    /// Adds token positions.
    DocsAndFreqsAndPositions,
    /// Adds character offsets.
    DocsAndFreqsAndPositionsAndOffsets,
}

/// Per-document, per-field facts collected while inverting a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInvertState {
    /// Postings layout of the field.
    pub index_options: IndexOptions,
    /// Major version of the index format the segment was created with.
    pub index_created_version_major: u32,
    /// Total number of tokens.
    pub length: u32,
    /// Tokens sharing a position with the preceding token (synonyms, stacked tokens).
    pub num_overlap: u32,
    /// Number of distinct terms.
    pub unique_term_count: u32,
}

/// How a field's length is turned into a norm byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormPolicy {
    /// Do not count overlapping tokens towards the field length.
    pub discount_overlaps: bool,
}

impl Default for NormPolicy {
    fn default() -> Self {
        Self {
            discount_overlaps: true,
        }
    }
}

impl NormPolicy {
    pub fn new(discount_overlaps: bool) -> Self {
        Self { discount_overlaps }
    }

    /// The length that gets encoded for this field.
    pub fn field_length(&self, state: &FieldInvertState) -> u32 {
        if state.index_options == IndexOptions::Docs
            && state.index_created_version_major >= UNIQUE_TERM_COUNT_MIN_VERSION
        {
            state.unique_term_count
        } else if self.discount_overlaps {
            state.length.saturating_sub(state.num_overlap)
        } else {
            state.length
        }
    }

    /// Encoded norm byte for this field.
    pub fn compute_norm(&self, state: &FieldInvertState) -> u8 {
        int_to_byte4(self.field_length(state))
    }
}
