//! Data models for tracked vocabulary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable word identifier assigned by the backend
pub type WordId = u64;

/// Acquisition lifecycle of a word, as decided by the server-side
/// scheduler. Read-only to this crate; transitions are never reversed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AcquisitionState {
    /// Never shown to the learner
    New,
    /// Introduced, first exposures underway
    Acquiring,
    /// In active review
    Learning,
    /// Considered mastered
    Known,
    /// Was known, has since decayed
    Lapsed,
    /// Manually excluded from review
    Suspended,
}

impl Default for AcquisitionState {
    fn default() -> Self {
        Self::New
    }
}

impl AcquisitionState {
    /// All states, in lifecycle order. Used to build filter chips.
    pub const ALL: [AcquisitionState; 6] = [
        AcquisitionState::New,
        AcquisitionState::Acquiring,
        AcquisitionState::Learning,
        AcquisitionState::Known,
        AcquisitionState::Lapsed,
        AcquisitionState::Suspended,
    ];
}

/// One word known to the learner, with its review history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRecord {
    pub id: WordId,
    /// Target-language surface form
    pub text: String,
    /// Translation gloss
    pub gloss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    /// Part-of-speech tag
    pub pos: String,
    /// Root/lemma grouping key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_rank: Option<u32>,
    #[serde(default)]
    pub state: AcquisitionState,
    /// Total review exposures
    #[serde(default)]
    pub times_seen: u32,
    /// Correct responses; never exceeds times_seen
    #[serde(default)]
    pub times_correct: u32,
    /// Last few per-attempt ratings (0-5 scale), most-recent-last
    #[serde(default)]
    pub recent_ratings: Vec<u8>,
    /// 0-100 mastery scalar, computed by the backend
    #[serde(default)]
    pub knowledge_score: u8,
}

impl VocabularyRecord {
    /// Lifetime accuracy ratio. A never-seen word counts as 0 so leech
    /// sorting has no divide-by-zero case.
    pub fn accuracy(&self) -> f64 {
        if self.times_seen == 0 {
            0.0
        } else {
            self.times_correct as f64 / self.times_seen as f64
        }
    }
}

/// A word eligible for first introduction. Not yet in the review
/// lifecycle, so it is a distinct entity from VocabularyRecord.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnCandidate {
    pub id: WordId,
    pub text: String,
    pub gloss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    pub pos: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_rank: Option<u32>,
    /// Backend ranking score; higher means introduce sooner
    pub score: f64,
    /// How many words sharing this root the learner already knows
    #[serde(default)]
    pub known_siblings: u32,
}

/// Tri-state acquisition label for root-family context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootWordStatus {
    Unknown,
    Learning,
    Known,
}

/// Lightweight projection of a record, shown as sibling-root context
/// while a candidate is being introduced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFamilyWord {
    pub id: WordId,
    pub text: String,
    pub gloss: String,
    pub status: RootWordStatus,
}

/// One calendar day's review aggregate, date-ascending in API payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHistoryPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub reviews: u32,
    /// Percent correct for the day; absent when nothing was reviewed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Words newly learned that day
    #[serde(default)]
    pub words_learned: u32,
    /// Cumulative known-word count as of that day
    #[serde(default)]
    pub cumulative_known: u32,
}
