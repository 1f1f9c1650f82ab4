//! Output pattern types and their canonical text rendering.

use crate::visitations::Visitations;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable mined pattern: an ordered symbol sequence, its support, and
/// optionally its cover. Never mutated after construction.
///
/// The text rendering is `"<symbols space-separated> #SUP:<n>"`, extended
/// with `" #COVER:<n>"` when cover is known, for compatibility with
/// existing sequential-pattern tooling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequentialPattern {
    pub sequence: Vec<u32>,
    pub support: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<u32>,
}

impl SequentialPattern {
    pub fn new(sequence: Vec<u32>, support: u32) -> Self {
        Self {
            sequence,
            support,
            cover: None,
        }
    }

    pub fn with_cover(sequence: Vec<u32>, support: u32, cover: u32) -> Self {
        Self {
            sequence,
            support,
            cover: Some(cover),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl fmt::Display for SequentialPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.sequence {
            write!(f, "{symbol} ")?;
        }
        write!(f, "#SUP:{}", self.support)?;
        if let Some(cover) = self.cover {
            write!(f, " #COVER:{cover}")?;
        }
        Ok(())
    }
}

/// A representative path extracted from the transition graph, together with
/// the visitations that cover it. Support and cover derive from the
/// visitation record rather than being stored twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepSequence {
    pub sequence: Vec<u32>,
    pub visitations: Visitations,
}

impl RepSequence {
    pub fn new(sequence: Vec<u32>, visitations: Visitations) -> Self {
        Self {
            sequence,
            visitations,
        }
    }

    pub fn support(&self) -> u32 {
        self.visitations.support()
    }

    pub fn cover(&self) -> u32 {
        self.visitations.cover()
    }

    pub fn to_pattern(&self) -> SequentialPattern {
        SequentialPattern::with_cover(self.sequence.clone(), self.support(), self.cover())
    }
}

impl fmt::Display for RepSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_pattern().fmt(f)
    }
}
