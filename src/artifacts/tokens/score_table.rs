use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: String,
    pub score: i64,
}

/// Scores of the tracked nodes of one diff call, keyed by their ephemeral id
///
/// Serializes as `{ "<id>": { "id": "<id>", "score": <score> } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(BTreeMap<String, ScoreEntry>);

impl ScoreTable {
    pub fn insert(&mut self, id: &str, score: i64) {
        self.0.insert(
            id.to_string(),
            ScoreEntry {
                id: id.to_string(),
                score,
            },
        );
    }

    pub fn score(&self, id: &str) -> Option<i64> {
        self.0.get(id).map(|entry| entry.score)
    }

    pub fn merge(&mut self, other: ScoreTable) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.0.values()
    }
}
