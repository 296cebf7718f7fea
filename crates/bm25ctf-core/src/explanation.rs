//! Score explanations.
//!
//! An [`Explanation`] is an immutable tree: every node carries the value it
//! contributes, a description of how it was obtained, and the ordered
//! sub-explanations it was computed from.
//!
//! ```text
//! 5.93 = score(freq=3), product of:
//!   2.2 = scaling factor, k1 + 1
//!   6.9 = ictf, computed as log(M / ctf) from:
//!     500000 = M, total number of tokens in the field
//!     50 = ctf, total number of occurrences of this term
//!   ...
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One node of a score explanation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    is_match: bool,
    value: f32,
    description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    details: Vec<Explanation>,
}

impl Explanation {
    /// A node that contributed to the score.
    pub fn matched(value: f32, description: impl Into<String>, details: Vec<Explanation>) -> Self {
        Self {
            is_match: true,
            value,
            description: description.into(),
            details,
        }
    }

    /// A matching node without children.
    pub fn leaf(value: f32, description: impl Into<String>) -> Self {
        Self::matched(value, description, Vec::new())
    }

    /// The conventional term-frequency leaf handed to a scorer's `explain`.
    pub fn freq(freq: f32) -> Self {
        Self::leaf(freq, "freq, occurrences of term within document")
    }

    pub fn is_match(&self) -> bool {
        self.is_match
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &[Explanation] {
        &self.details
    }

    /// Depth-first search for the first node whose description starts with `prefix`.
    pub fn find(&self, prefix: &str) -> Option<&Explanation> {
        if self.description.starts_with(prefix) {
            return Some(self);
        }
        self.details.iter().find_map(|d| d.find(prefix))
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        writeln!(f, "{} = {}", self.value, self.description)?;
        for detail in &self.details {
            detail.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Explanation {
        Explanation::matched(
            6.0,
            "product of:",
            vec![
                Explanation::leaf(2.0, "a"),
                Explanation::matched(3.0, "b, sum of:", vec![Explanation::leaf(3.0, "c")]),
            ],
        )
    }

    #[test]
    fn test_display_indents_children() {
        let text = sample().to_string();
        assert_eq!(text, "6 = product of:\n  2 = a\n  3 = b, sum of:\n    3 = c\n");
    }

    #[test]
    fn test_find_descends() {
        let expl = sample();
        assert_eq!(expl.find("c").map(Explanation::value), Some(3.0));
        assert!(expl.find("missing").is_none());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["isMatch"], true);
        assert_eq!(json["details"][1]["description"], "b, sum of:");
        // leaves omit the empty details array
        assert!(json["details"][0].get("details").is_none());

        let back: Explanation = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_freq_leaf() {
        let freq = Explanation::freq(3.0);
        assert_eq!(freq.value(), 3.0);
        assert!(freq.details().is_empty());
    }
}
