//! Snapshot-backed API implementation
//!
//! Serves every [`VocabApi`] operation from a JSON snapshot of backend
//! responses. This is what the CLI runs against and what tests use to
//! drive the session machine end to end.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use super::{ApiError, Introduction, Result, VocabApi};
use crate::analytics::{AnalyticsOverview, DeepAnalytics};
use crate::vocabulary::{LearnCandidate, RootFamilyWord, VocabularyRecord, WordId};

/// On-disk shape of a backend snapshot
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub words: Vec<VocabularyRecord>,
    #[serde(default)]
    pub candidates: Vec<LearnCandidate>,
    /// Root-family context keyed by candidate id (stringly keyed, JSON
    /// object keys are always strings)
    #[serde(default)]
    pub root_families: HashMap<String, Vec<RootFamilyWord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsOverview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_analytics: Option<DeepAnalytics>,
}

/// A [`VocabApi`] serving a loaded snapshot. Candidates are consumed in
/// snapshot order across successive batch fetches, the way the real
/// backend pages through its queue.
pub struct SnapshotApi {
    snapshot: Snapshot,
    cursor: std::sync::Mutex<usize>,
}

impl SnapshotApi {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            cursor: std::sync::Mutex::new(0),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl VocabApi for SnapshotApi {
    async fn fetch_next_candidates(&self, count: usize) -> Result<Vec<LearnCandidate>> {
        let mut cursor = self.cursor.lock().unwrap();
        let start = (*cursor).min(self.snapshot.candidates.len());
        let end = (start + count).min(self.snapshot.candidates.len());
        *cursor = end;
        Ok(self.snapshot.candidates[start..end].to_vec())
    }

    async fn introduce(&self, candidate_id: WordId) -> Result<Introduction> {
        if !self.snapshot.candidates.iter().any(|c| c.id == candidate_id) {
            return Err(ApiError::WordNotFound(candidate_id));
        }
        Ok(Introduction {
            root_family: self
                .snapshot
                .root_families
                .get(&candidate_id.to_string())
                .cloned(),
        })
    }

    async fn fetch_word_records(&self) -> Result<Vec<VocabularyRecord>> {
        Ok(self.snapshot.words.clone())
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsOverview> {
        self.snapshot
            .analytics
            .clone()
            .ok_or_else(|| ApiError::Remote("snapshot has no analytics section".to_string()))
    }

    async fn fetch_deep_analytics(&self) -> Result<Option<DeepAnalytics>> {
        Ok(self.snapshot.deep_analytics.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{AcquisitionState, RootWordStatus};

    fn candidate(id: WordId) -> LearnCandidate {
        LearnCandidate {
            id,
            text: format!("word{}", id),
            gloss: format!("gloss{}", id),
            transliteration: None,
            pos: "verb".to_string(),
            root: Some("r-o-t".to_string()),
            frequency_rank: Some(id as u32),
            score: 1.0,
            known_siblings: 0,
        }
    }

    fn sample_snapshot() -> Snapshot {
        let mut root_families = HashMap::new();
        root_families.insert(
            "1".to_string(),
            vec![RootFamilyWord {
                id: 10,
                text: "sibling".to_string(),
                gloss: "sibling gloss".to_string(),
                status: RootWordStatus::Known,
            }],
        );
        Snapshot {
            words: vec![VocabularyRecord {
                id: 10,
                text: "sibling".to_string(),
                gloss: "sibling gloss".to_string(),
                transliteration: None,
                pos: "noun".to_string(),
                root: Some("r-o-t".to_string()),
                frequency_rank: None,
                state: AcquisitionState::Known,
                times_seen: 12,
                times_correct: 11,
                recent_ratings: vec![4, 5, 4],
                knowledge_score: 88,
            }],
            candidates: (1..=4).map(candidate).collect(),
            root_families,
            analytics: None,
            deep_analytics: None,
        }
    }

    #[tokio::test]
    async fn test_batches_page_through_candidates() {
        let api = SnapshotApi::new(sample_snapshot());
        let first = api.fetch_next_candidates(3).await.unwrap();
        assert_eq!(first.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        let second = api.fetch_next_candidates(3).await.unwrap();
        assert_eq!(second.iter().map(|c| c.id).collect::<Vec<_>>(), vec![4]);
        let third = api.fetch_next_candidates(3).await.unwrap();
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn test_introduce_returns_family_when_present() {
        let api = SnapshotApi::new(sample_snapshot());
        let intro = api.introduce(1).await.unwrap();
        assert_eq!(intro.root_family.unwrap().len(), 1);
        let intro = api.introduce(2).await.unwrap();
        assert!(intro.root_family.is_none());
        assert!(api.introduce(99).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_analytics_is_a_remote_error() {
        let api = SnapshotApi::new(sample_snapshot());
        assert!(api.fetch_analytics().await.is_err());
        assert!(api.fetch_deep_analytics().await.unwrap().is_none());
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, serde_json::to_string_pretty(&sample_snapshot()).unwrap()).unwrap();
        let api = SnapshotApi::load(&path).unwrap();
        assert_eq!(api.snapshot().candidates.len(), 4);
        assert_eq!(api.snapshot().words.len(), 1);
    }
}
