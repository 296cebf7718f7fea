//! Similarity configuration.
//!
//! [`SimilarityConfig`] holds the tuning parameters of a
//! [`Bm25CtfSimilarity`](crate::bm25::Bm25CtfSimilarity) and the norm policy
//! used at indexing time. It can be loaded from YAML, TOML or JSON:
//!
//! ```yaml
//! k1: 1.2
//! b: 0.75
//! d: 0.5
//! discountOverlaps: true
//! ```
//!
//! Missing keys take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimilarityError};
use crate::norms::NormPolicy;

/// Default term-frequency saturation.
pub const DEFAULT_K1: f32 = 1.2;

/// Default length normalization strength.
pub const DEFAULT_B: f32 = 0.75;

/// Default lower bound added to the normalized term frequency.
pub const DEFAULT_D: f32 = 0.5;

/// Tuning parameters for the BM25-CTF similarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityConfig {
    /// Term frequency saturation. Must be finite and non-negative.
    /// Default: 1.2
    #[serde(default = "default_k1")]
    pub k1: f32,

    /// How much the document length normalizes term frequency, in `[0, 1]`.
    /// Default: 0.75
    #[serde(default = "default_b")]
    pub b: f32,

    /// Lower bound of the term frequency normalization, in `[0, 1]`.
    /// Default: 0.5
    #[serde(default = "default_d")]
    pub d: f32,

    /// Ignore overlapping tokens when computing a field's length.
    /// Default: true
    #[serde(default = "default_discount_overlaps")]
    pub discount_overlaps: bool,
}

fn default_k1() -> f32 {
    DEFAULT_K1
}

fn default_b() -> f32 {
    DEFAULT_B
}

fn default_d() -> f32 {
    DEFAULT_D
}

fn default_discount_overlaps() -> bool {
    true
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            d: default_d(),
            discount_overlaps: default_discount_overlaps(),
        }
    }
}

impl SimilarityConfig {
    /// Load a configuration file, picking the parser from the extension.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, has an unknown extension, does not
    /// parse, or holds out-of-range parameters.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SimilarityError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let parse_error = |message: String| SimilarityError::ConfigParse {
            path: path.to_path_buf(),
            message,
        };

        let config: Self = match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            _ => return Err(SimilarityError::UnsupportedConfigFormat(path.to_path_buf())),
        };

        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            k1 = config.k1,
            b = config.b,
            d = config.d,
            "Loaded similarity config"
        );
        Ok(config)
    }

    /// Checks every parameter against its allowed range.
    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.k1, self.b, self.d)
    }

    pub fn norm_policy(&self) -> NormPolicy {
        NormPolicy::new(self.discount_overlaps)
    }
}

/// Range checks shared by the config and the similarity constructor.
///
/// `k1` must be finite and non-negative; `b` and `d` must lie in `[0, 1]`.
/// `NaN` fails every check.
pub fn validate_parameters(k1: f32, b: f32, d: f32) -> Result<()> {
    if !k1.is_finite() || k1 < 0.0 {
        return Err(SimilarityError::InvalidParameter {
            name: "k1",
            value: k1,
            constraint: "a non-negative finite value",
        });
    }
    if !(0.0..=1.0).contains(&b) {
        return Err(SimilarityError::InvalidParameter {
            name: "b",
            value: b,
            constraint: "between 0 and 1",
        });
    }
    if !(0.0..=1.0).contains(&d) {
        return Err(SimilarityError::InvalidParameter {
            name: "d",
            value: d,
            constraint: "between 0 and 1",
        });
    }
    Ok(())
}
