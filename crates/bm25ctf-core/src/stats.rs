//! Collection-wide and term-wide statistics.
//!
//! These are gathered by a statistics pass over the index before any
//! document is scored. Both types are plain values; the scorer reads them
//! once while it is being built and never touches them again.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimilarityError};

/// Aggregate facts about one field across the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStatistics {
    /// Number of documents that have at least one token in the field.
    pub doc_count: u64,
    /// Total number of tokens in the field across all documents.
    pub sum_total_term_freq: u64,
}

impl CollectionStatistics {
    /// Checked constructor.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError::InvalidStatistics`] if `doc_count` is zero or
    /// the field holds fewer tokens than documents.
    pub fn new(doc_count: u64, sum_total_term_freq: u64) -> Result<Self> {
        let stats = Self {
            doc_count,
            sum_total_term_freq,
        };
        stats.validate()?;
        Ok(stats)
    }

    /// Checks the invariants a consistent index always satisfies.
    pub fn validate(&self) -> Result<()> {
        if self.doc_count == 0 {
            return Err(SimilarityError::invalid_statistics(
                "docCount must be positive",
            ));
        }
        if self.sum_total_term_freq < self.doc_count {
            return Err(SimilarityError::invalid_statistics(format!(
                "sumTotalTermFreq ({}) must be at least docCount ({})",
                self.sum_total_term_freq, self.doc_count
            )));
        }
        Ok(())
    }
}

/// Aggregate facts about one term within a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermStatistics {
    /// Number of documents containing the term.
    pub doc_freq: u64,
    /// Total number of occurrences of the term.
    pub total_term_freq: u64,
}

impl TermStatistics {
    /// Checked constructor.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError::InvalidStatistics`] if the term never occurs
    /// or occurs fewer times than the number of documents containing it.
    pub fn new(doc_freq: u64, total_term_freq: u64) -> Result<Self> {
        let stats = Self {
            doc_freq,
            total_term_freq,
        };
        stats.validate()?;
        Ok(stats)
    }

    pub fn validate(&self) -> Result<()> {
        if self.doc_freq == 0 {
            return Err(SimilarityError::invalid_statistics("docFreq must be positive"));
        }
        if self.total_term_freq < self.doc_freq {
            return Err(SimilarityError::invalid_statistics(format!(
                "totalTermFreq ({}) must be at least docFreq ({})",
                self.total_term_freq, self.doc_freq
            )));
        }
        Ok(())
    }

    /// Checks this term against the collection it was collected from.
    pub fn validate_against(&self, collection: &CollectionStatistics) -> Result<()> {
        self.validate()?;
        if self.doc_freq > collection.doc_count {
            return Err(SimilarityError::invalid_statistics(format!(
                "docFreq ({}) exceeds docCount ({})",
                self.doc_freq, collection.doc_count
            )));
        }
        if self.total_term_freq > collection.sum_total_term_freq {
            return Err(SimilarityError::invalid_statistics(format!(
                "totalTermFreq ({}) exceeds sumTotalTermFreq ({})",
                self.total_term_freq, collection.sum_total_term_freq
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_statistics_valid() {
        let stats = CollectionStatistics::new(1000, 500_000).unwrap();
        assert_eq!(stats.doc_count, 1000);
        assert_eq!(stats.sum_total_term_freq, 500_000);
    }

    #[test]
    fn test_collection_statistics_rejects_empty_field() {
        assert!(CollectionStatistics::new(0, 10).is_err());
        assert!(CollectionStatistics::new(10, 9).is_err());
    }

    #[test]
    fn test_term_statistics_rejects_unseen_term() {
        assert!(TermStatistics::new(0, 0).is_err());
        assert!(TermStatistics::new(5, 4).is_err());
        assert!(TermStatistics::new(5, 5).is_ok());
    }

    #[test]
    fn test_term_against_collection() {
        let collection = CollectionStatistics::new(10, 100).unwrap();
        assert!(TermStatistics::new(10, 20)
            .unwrap()
            .validate_against(&collection)
            .is_ok());
        let err = TermStatistics::new(11, 20)
            .unwrap()
            .validate_against(&collection)
            .unwrap_err();
        assert!(err.to_string().contains("docFreq"));
    }

    #[test]
    fn test_serde_camel_case() {
        let stats: CollectionStatistics =
            serde_json::from_str(r#"{"docCount": 3, "sumTotalTermFreq": 12}"#).unwrap();
        assert_eq!(stats, CollectionStatistics::new(3, 12).unwrap());

        let json = serde_json::to_string(&TermStatistics::new(2, 7).unwrap()).unwrap();
        assert!(json.contains("\"docFreq\":2"));
        assert!(json.contains("\"totalTermFreq\":7"));
    }
}
