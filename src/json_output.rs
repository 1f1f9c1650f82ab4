//! JSON output format for mined patterns.

use crate::pattern::SequentialPattern;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// A complete mining result, ready for machine parsing.
#[derive(Debug, Clone, Serialize)]
pub struct JsonMiningResult {
    /// Which algorithm produced the patterns (e.g. "closed", "grasp").
    pub algorithm: String,
    /// The absolute minimum support used.
    pub min_sup: u32,
    /// Number of patterns found.
    pub pattern_count: usize,
    /// The patterns themselves.
    pub patterns: Vec<SequentialPattern>,
}

impl JsonMiningResult {
    pub fn new(algorithm: impl Into<String>, min_sup: u32, patterns: Vec<SequentialPattern>) -> Self {
        Self {
            algorithm: algorithm.into(),
            min_sup,
            pattern_count: patterns.len(),
            patterns,
        }
    }

    /// Pretty-print the result as JSON to any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("failed to serialize mining result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_patterns_with_optional_cover() {
        let result = JsonMiningResult::new(
            "closed",
            2,
            vec![
                SequentialPattern::new(vec![1, 2], 4),
                SequentialPattern::with_cover(vec![1, 2, 3], 3, 9),
            ],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["algorithm"], "closed");
        assert_eq!(json["pattern_count"], 2);
        assert!(json["patterns"][0].get("cover").is_none());
        assert_eq!(json["patterns"][1]["cover"], 9);
    }
}
