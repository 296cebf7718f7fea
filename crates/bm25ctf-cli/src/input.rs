//! Query statistics files read by `score` and `explain`.
//!
//! ```yaml
//! collection: { docCount: 1000, sumTotalTermFreq: 500000 }
//! terms:
//!   - { docFreq: 10, totalTermFreq: 50 }
//! boost: 1.0
//! documents:
//!   - { id: a, freq: 3, length: 80 }
//!   - { id: b, freq: 1, norm: 54 }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use bm25ctf_core::norms::int_to_byte4;
use bm25ctf_core::{CollectionStatistics, TermStatistics};

/// One query against one field, plus the documents to score.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStats {
    pub collection: CollectionStatistics,
    pub terms: Vec<TermStatistics>,
    #[serde(default = "default_boost")]
    pub boost: f32,
    #[serde(default)]
    pub documents: Vec<DocumentInput>,
}

fn default_boost() -> f32 {
    1.0
}

/// A matching document: its term frequency and either the stored norm byte
/// or the raw field length to encode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInput {
    #[serde(default)]
    pub id: Option<String>,
    pub freq: f32,
    #[serde(default)]
    pub norm: Option<u8>,
    #[serde(default)]
    pub length: Option<u32>,
}

impl DocumentInput {
    pub fn encoded_norm(&self) -> Result<u8> {
        resolve_norm(self.norm, self.length)
    }
}

/// Picks the norm byte from an explicit byte or a length to encode.
pub fn resolve_norm(norm: Option<u8>, length: Option<u32>) -> Result<u8> {
    match (norm, length) {
        (Some(norm), None) => Ok(norm),
        (None, Some(length)) => Ok(int_to_byte4(length)),
        (Some(_), Some(_)) => bail!("Give either a norm byte or a field length, not both"),
        (None, None) => bail!("A norm byte or a field length is required"),
    }
}

impl QueryStats {
    /// Reads a statistics file, choosing the parser from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read statistics file {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let stats: Self = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
            _ => bail!(
                "Unsupported statistics format: {}. Use a .yaml, .yml, .toml or .json file.",
                path.display()
            ),
        };

        stats
            .validate()
            .with_context(|| format!("Invalid statistics in {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            terms = stats.terms.len(),
            documents = stats.documents.len(),
            "Loaded query statistics"
        );
        Ok(stats)
    }

    /// The scorer trusts its inputs, so inconsistencies are caught here.
    fn validate(&self) -> Result<()> {
        self.collection.validate()?;
        if self.terms.is_empty() {
            bail!("At least one term is required");
        }
        for term in &self.terms {
            term.validate_against(&self.collection)?;
        }
        if !self.boost.is_finite() || self.boost < 0.0 {
            bail!("boost must be a non-negative finite value, got {}", self.boost);
        }
        Ok(())
    }
}
