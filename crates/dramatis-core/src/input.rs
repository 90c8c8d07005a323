//! Upstream extraction input.
//!
//! The text extractor that finds character markers and dialogue spans is
//! not part of this crate. It hands over a [`CastInput`]: the cast list plus
//! one or more edge sources. [`WeightBy`] selects which edge source feeds
//! the graph.
//!
//! ```json
//! {
//!   "characters": {
//!     "dorothea": { "name": "Dorothea Brooke", "dialogue_count": 41 },
//!     "celia":    { "name": "Celia Brooke" }
//!   },
//!   "co_occurrences": { "celia": { "dorothea": 12 }, "dorothea": { "celia": 12 } },
//!   "interactions":   { "dorothea": ["celia", "celia"] },
//!   "edges":          [ { "source": "celia", "target": "dorothea", "weight": 3 } ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalysisError;

/// One character as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Display name.
    pub name: String,
    /// Number of dialogue spans attributed to the character.
    #[serde(default)]
    pub dialogue_count: u64,
    /// Number of passages the character is mentioned in.
    #[serde(default)]
    pub context_count: u64,
    /// Short free-text description.
    #[serde(default)]
    pub description: String,
    /// Any further attributes, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CharacterRecord {
    /// A record with only a display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dialogue_count: 0,
            context_count: 0,
            description: String::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// A pre-weighted edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: u64,
}

const fn default_weight() -> u64 {
    1
}

/// Everything the extractor produced for one document (or book).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastInput {
    /// Character id → record.
    pub characters: BTreeMap<String, CharacterRecord>,
    /// Symmetric co-occurrence counts: id → (id → count).
    #[serde(default)]
    pub co_occurrences: BTreeMap<String, BTreeMap<String, u64>>,
    /// Raw interaction lists: id → ids it interacted with, duplicates allowed.
    #[serde(default)]
    pub interactions: BTreeMap<String, Vec<String>>,
    /// Explicit weighted edges.
    #[serde(default)]
    pub edges: Vec<WeightedEdge>,
}

impl CastInput {
    /// Read a JSON document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Io`] if the file cannot be read and
    /// [`AnalysisError::InvalidInput`] if it is not a valid cast document.
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AnalysisError::InvalidInput {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Weighting methods for which this input carries edge data.
    #[must_use]
    pub fn available_weightings(&self) -> Vec<WeightBy> {
        WeightBy::ALL
            .into_iter()
            .filter(|w| match w {
                WeightBy::CoOccurrence => !self.co_occurrences.is_empty(),
                WeightBy::InteractionFrequency => !self.interactions.is_empty(),
                WeightBy::EdgeList => !self.edges.is_empty(),
            })
            .collect()
    }

    /// Sum of a character's co-occurrence row (0 if absent).
    #[must_use]
    pub fn interaction_strength(&self, id: &str) -> u64 {
        self.co_occurrences
            .get(id)
            .map_or(0, |row| row.values().fold(0_u64, |acc, w| acc.saturating_add(*w)))
    }

    /// Tally interaction lists into canonical `(smaller, larger)` pair counts.
    ///
    /// Every occurrence in every list adds one, so an interaction recorded
    /// on both sides counts twice. Self-pairs are dropped.
    #[must_use]
    pub fn interaction_tally(&self) -> BTreeMap<(&str, &str), u64> {
        let mut tally: BTreeMap<(&str, &str), u64> = BTreeMap::new();
        for (who, others) in &self.interactions {
            for other in others {
                let (a, b) = if who.as_str() <= other.as_str() {
                    (who.as_str(), other.as_str())
                } else {
                    (other.as_str(), who.as_str())
                };
                if a == b {
                    continue;
                }
                *tally.entry((a, b)).or_insert(0) += 1;
            }
        }
        tally
    }
}

// ---------------------------------------------------------------------------
// WeightBy
// ---------------------------------------------------------------------------

/// Which edge source populates the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightBy {
    /// Use `co_occurrences`, reading each unordered pair once.
    #[default]
    CoOccurrence,
    /// Tally `interactions` lists into pair counts.
    InteractionFrequency,
    /// Use the explicit `edges` list.
    EdgeList,
}

impl WeightBy {
    /// Every weighting method, in reporting order.
    pub const ALL: [Self; 3] = [Self::CoOccurrence, Self::InteractionFrequency, Self::EdgeList];

    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoOccurrence => "co_occurrence",
            Self::InteractionFrequency => "interaction_frequency",
            Self::EdgeList => "edge_list",
        }
    }
}

impl fmt::Display for WeightBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "co_occurrence" | "cooccurrence" => Ok(Self::CoOccurrence),
            "interaction_frequency" | "interactions" => Ok(Self::InteractionFrequency),
            "edge_list" | "edges" => Ok(Self::EdgeList),
            other => Err(format!(
                "unknown weighting '{other}' (expected co_occurrence, interaction_frequency or edge_list)"
            )),
        }
    }
}
