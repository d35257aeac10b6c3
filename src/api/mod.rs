//! External API collaborator
//!
//! The core never talks to the network itself; everything remote comes
//! through the [`VocabApi`] trait. Transport, retries and caching belong
//! to the implementation behind it.

pub mod snapshot;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::{AnalyticsOverview, DeepAnalytics};
use crate::vocabulary::{LearnCandidate, RootFamilyWord, VocabularyRecord, WordId};

pub use snapshot::{Snapshot, SnapshotApi};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("remote error: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("word not found: {0}")]
    WordNotFound(WordId),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Introduction payload for one candidate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Introduction {
    /// Words sharing the candidate's root, with acquisition labels;
    /// absent when the candidate has no known family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_family: Option<Vec<RootFamilyWord>>,
}

/// The remote vocabulary backend, as seen by this core
#[async_trait]
pub trait VocabApi: Send + Sync {
    /// Next batch of words eligible for first introduction, best first
    async fn fetch_next_candidates(&self, count: usize) -> Result<Vec<LearnCandidate>>;

    /// Introduction payload for a candidate (root family context)
    async fn introduce(&self, candidate_id: WordId) -> Result<Introduction>;

    /// Every word the learner has been exposed to
    async fn fetch_word_records(&self) -> Result<Vec<VocabularyRecord>>;

    /// Precomputed counters, pace metrics, CEFR data and daily history
    async fn fetch_analytics(&self) -> Result<AnalyticsOverview>;

    /// Extended aggregates; `None` when the backend does not provide
    /// them, in which case the dependent sections are omitted
    async fn fetch_deep_analytics(&self) -> Result<Option<DeepAnalytics>>;
}
