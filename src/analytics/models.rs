//! Payload and result models for dashboard analytics
//!
//! The raw payloads mirror what the backend precomputes; the derived
//! shapes are what the dashboard screens actually render.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::vocabulary::{AcquisitionState, DailyHistoryPoint, WordId};

/// Progress toward the next CEFR proficiency tier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CefrProgress {
    /// Current tier, e.g. "A2" or "B1"
    pub level: String,
    /// Words still needed to reach the next tier; absent at the top tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_to_next: Option<u32>,
    /// Estimated days to the next tier at the trailing-week pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_next_week_pace: Option<f64>,
    /// Estimated days to the next tier at today's pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_next_today_pace: Option<f64>,
}

/// Aggregate counters and pace metrics, precomputed upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub total_words: u32,
    #[serde(default)]
    pub known_words: u32,
    #[serde(default)]
    pub acquiring_words: u32,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<CefrProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_at: Option<DateTime<Utc>>,
    /// Date-ascending daily aggregates
    #[serde(default)]
    pub daily_history: Vec<DailyHistoryPoint>,
}

/// Per-word memory stability as estimated by the scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStability {
    pub word_id: WordId,
    /// Estimated memory half-life in seconds
    pub stability_seconds: f64,
}

/// Count of scheduler transitions between two lifecycle states
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTransitionCount {
    pub from: AcquisitionState,
    pub to: AcquisitionState,
    pub count: u32,
}

/// Self-reported comprehension counts from reading sessions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionCounts {
    #[serde(default)]
    pub understood: u32,
    #[serde(default)]
    pub partial: u32,
    #[serde(default)]
    pub no_idea: u32,
}

/// Server-computed struggling word (3+ attempts, no success). Distinct
/// from the local trailing-ratings heuristic; the two are not reconciled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrugglingWord {
    pub id: WordId,
    pub text: String,
    pub attempts: u32,
}

/// Known/total split for one root family
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCoverage {
    pub root: String,
    pub known: u32,
    pub total: u32,
}

/// One day of words entering and leaving the acquisition pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub entered: u32,
    #[serde(default)]
    pub graduated: u32,
}

/// Extended aggregates; optional end to end. Absent sections are simply
/// omitted from the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepAnalytics {
    #[serde(default)]
    pub stabilities: Vec<WordStability>,
    #[serde(default)]
    pub transitions: Vec<StateTransitionCount>,
    /// Percent of reviews answered correctly, lifetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comprehension: Option<ComprehensionCounts>,
    #[serde(default)]
    pub struggling_words: Vec<StrugglingWord>,
    #[serde(default)]
    pub root_coverage: Vec<RootCoverage>,
    #[serde(default)]
    pub flow: Vec<FlowDay>,
}

// ---- Derived shapes ----

/// Two-segment progress bar toward the next reading level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageBar {
    pub known_pct: f64,
    pub acquiring_pct: f64,
}

/// Which pace measurement an estimate is based on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PaceBasis {
    TrailingWeek,
    Today,
}

/// One human-readable time-to-next-level estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaceEstimate {
    pub basis: PaceBasis,
    pub label: String,
}

/// Trailing-window sums of newly learned words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthDeltas {
    pub last_week: u32,
    pub last_month: u32,
}

/// Rounded percentage shares of comprehension self-reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionSplit {
    pub understood_pct: u32,
    pub partial_pct: u32,
    pub no_idea_pct: u32,
}

/// One flow-chart day with bar heights resolved to pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledFlowDay {
    pub date: NaiveDate,
    pub entered_px: f64,
    pub graduated_px: f64,
}
