//! Word classification: predicates, filtering, ordering and chip counts
//!
//! Everything here is a pure function of the records passed in; no network
//! call is ever needed to drive the word-list screens.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::models::{AcquisitionState, VocabularyRecord};

/// Minimum exposures before a word can be flagged as a leech
const LEECH_MIN_SEEN: u32 = 6;

/// A leech is correct on fewer than half of its exposures
const LEECH_MAX_ACCURACY: f64 = 0.5;

/// Ratings below this are failed attempts
const PASS_RATING: u8 = 3;

/// How many trailing ratings the struggling check inspects
const STRUGGLE_WINDOW: usize = 4;

/// Minimum recorded ratings before the struggling check applies
const STRUGGLE_MIN_RATINGS: usize = 3;

/// Failed attempts within the window needed to count as struggling
const STRUGGLE_MIN_FAILS: usize = 2;

/// A word with persistently poor recall despite many exposures.
/// The exposure floor avoids flagging words seen only once or twice.
pub fn is_leech(word: &VocabularyRecord) -> bool {
    word.times_seen >= LEECH_MIN_SEEN && word.accuracy() < LEECH_MAX_ACCURACY
}

/// Recent difficulty: at least 2 of the last 4 ratings were fails.
/// Requires 3 recorded ratings so a single bad first attempt does not
/// qualify. A word that struggled long ago but has recovered stays out,
/// which is why this looks at a trailing window and not a lifetime ratio.
pub fn is_struggling(word: &VocabularyRecord) -> bool {
    if word.recent_ratings.len() < STRUGGLE_MIN_RATINGS {
        return false;
    }
    let start = word.recent_ratings.len().saturating_sub(STRUGGLE_WINDOW);
    let fails = word.recent_ratings[start..]
        .iter()
        .filter(|&&r| r < PASS_RATING)
        .count();
    fails >= STRUGGLE_MIN_FAILS
}

/// New and still shaky: in active review with few exposures
pub fn is_recent(word: &VocabularyRecord) -> bool {
    word.state == AcquisitionState::Learning && word.times_seen <= 4
}

/// Comfortably mastered according to the backend score
pub fn is_solid(word: &VocabularyRecord) -> bool {
    word.knowledge_score >= 70
}

/// Three-way review outcome used only for list ordering, never for counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReviewCategory {
    /// Missed at least once
    Failed,
    /// Seen and never missed
    Passed,
    /// Never reviewed
    Unseen,
}

pub fn review_category(word: &VocabularyRecord) -> ReviewCategory {
    if word.times_seen == 0 {
        ReviewCategory::Unseen
    } else if word.times_correct < word.times_seen {
        ReviewCategory::Failed
    } else {
        ReviewCategory::Passed
    }
}

/// Filter chip selector for the word-list screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WordFilter {
    All,
    State(AcquisitionState),
    Leech,
    Struggling,
    Recent,
    Solid,
}

impl WordFilter {
    /// Every chip shown in the filter bar, in display order
    pub fn chips() -> Vec<WordFilter> {
        let mut chips = vec![WordFilter::All];
        chips.extend(AcquisitionState::ALL.iter().map(|s| WordFilter::State(*s)));
        chips.extend([
            WordFilter::Leech,
            WordFilter::Struggling,
            WordFilter::Recent,
            WordFilter::Solid,
        ]);
        chips
    }

    pub fn matches(&self, word: &VocabularyRecord) -> bool {
        match self {
            WordFilter::All => true,
            WordFilter::State(s) => word.state == *s,
            WordFilter::Leech => is_leech(word),
            WordFilter::Struggling => is_struggling(word),
            WordFilter::Recent => is_recent(word),
            WordFilter::Solid => is_solid(word),
        }
    }
}

/// Case-insensitive substring match over surface form, gloss and
/// transliteration. An empty query matches everything, so searching with
/// "" composes with any filter as the identity.
pub fn matches_query(word: &VocabularyRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    word.text.to_lowercase().contains(&needle)
        || word.gloss.to_lowercase().contains(&needle)
        || word
            .transliteration
            .as_deref()
            .map_or(false, |t| t.to_lowercase().contains(&needle))
}

/// Apply a filter chip and a free-text query, preserving input order.
/// Both are per-record predicates, so chip-then-search and
/// search-then-chip produce the same subsequence.
pub fn filter_words<'a>(
    words: &'a [VocabularyRecord],
    filter: WordFilter,
    query: &str,
) -> Vec<&'a VocabularyRecord> {
    words
        .iter()
        .filter(|w| filter.matches(w) && matches_query(w, query))
        .collect()
}

/// Sort orders for the word-list views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOrder {
    /// Worst accuracy first (leech view)
    AccuracyAscending,
    /// Highest mastery first (solid view)
    KnowledgeDescending,
    /// Failed, then passed, then unseen (general review list)
    ReviewCategory,
}

/// Stable sort, so ties keep their original (insertion) order
pub fn sort_words(words: &mut [&VocabularyRecord], order: WordOrder) {
    match order {
        WordOrder::AccuracyAscending => {
            words.sort_by(|a, b| a.accuracy().total_cmp(&b.accuracy()));
        }
        WordOrder::KnowledgeDescending => {
            words.sort_by(|a, b| b.knowledge_score.cmp(&a.knowledge_score));
        }
        WordOrder::ReviewCategory => {
            words.sort_by(|a, b| review_category(a).cmp(&review_category(b)));
        }
    }
}

/// Per-chip match counts, produced in a single pass so the filter bar
/// never needs to re-filter the collection once per chip
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCounts {
    pub total: usize,
    pub by_state: HashMap<AcquisitionState, usize>,
    pub leech: usize,
    pub struggling: usize,
    pub recent: usize,
    pub solid: usize,
}

impl FilterCounts {
    /// Count of records the given chip would keep
    pub fn get(&self, filter: WordFilter) -> usize {
        match filter {
            WordFilter::All => self.total,
            WordFilter::State(s) => self.by_state.get(&s).copied().unwrap_or(0),
            WordFilter::Leech => self.leech,
            WordFilter::Struggling => self.struggling,
            WordFilter::Recent => self.recent,
            WordFilter::Solid => self.solid,
        }
    }
}

/// Tally every chip over the collection in one pass
pub fn count_words(words: &[VocabularyRecord]) -> FilterCounts {
    let mut counts = FilterCounts::default();
    counts.total = words.len();
    for word in words {
        *counts.by_state.entry(word.state).or_insert(0) += 1;
        if is_leech(word) {
            counts.leech += 1;
        }
        if is_struggling(word) {
            counts.struggling += 1;
        }
        if is_recent(word) {
            counts.recent += 1;
        }
        if is_solid(word) {
            counts.solid += 1;
        }
    }
    counts
}
