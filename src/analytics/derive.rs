//! Pure derivations behind the dashboard numbers
//!
//! Every function here is a total, side-effect-free transform of its
//! arguments. Denominators are checked before any division; a section
//! that cannot be computed comes back as `None` and is simply not
//! rendered, never as NaN or a placeholder value.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::models::{
    ComprehensionCounts, ComprehensionSplit, CoverageBar, FlowDay, GrowthDeltas, PaceBasis,
    PaceEstimate, ScaledFlowDay, WordStability,
};
use crate::vocabulary::DailyHistoryPoint;

const SECS_PER_HOUR: f64 = 3600.0;
const SECS_PER_DAY: f64 = 86400.0;

/// Tallest a flow-chart bar can render
const FLOW_BAR_CEILING_PX: f64 = 48.0;

/// Zero-valued days still render as a sliver this tall
const FLOW_BAR_FLOOR_PX: f64 = 2.0;

/// Reading-level coverage bar. `words_to_next` is the backend's count of
/// words still missing for the next level; at the top level it is absent
/// and no bar is produced. The two segments never sum past 100%.
pub fn coverage_bar(known: u32, acquiring: u32, words_to_next: Option<u32>) -> Option<CoverageBar> {
    let to_next = words_to_next?;
    let threshold = known + to_next;
    if threshold == 0 {
        return None;
    }
    let known_pct = (known as f64 / threshold as f64 * 100.0).min(100.0);
    let acquiring_pct = (acquiring as f64 / threshold as f64 * 100.0).min(100.0 - known_pct);
    Some(CoverageBar {
        known_pct,
        acquiring_pct,
    })
}

/// Bucket a days-to-next-level figure into a human unit
pub fn pace_label(days: f64) -> String {
    if days <= 60.0 {
        let n = days.round().max(1.0) as i64;
        if n == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", n)
        }
    } else if days <= 365.0 {
        let n = (days / 7.0).round() as i64;
        format!("{} weeks", n)
    } else {
        let n = (days / 30.0).round() as i64;
        format!("{} months", n)
    }
}

/// Time-to-next-level estimates for the trailing-week pace and today's
/// pace. When both resolve to the same label only the trailing-week one
/// is surfaced.
pub fn pace_estimates(week_pace_days: Option<f64>, today_pace_days: Option<f64>) -> Vec<PaceEstimate> {
    let mut estimates = Vec::new();
    if let Some(days) = week_pace_days {
        estimates.push(PaceEstimate {
            basis: PaceBasis::TrailingWeek,
            label: pace_label(days),
        });
    }
    if let Some(days) = today_pace_days {
        let label = pace_label(days);
        if !estimates.iter().any(|e| e.label == label) {
            estimates.push(PaceEstimate {
                basis: PaceBasis::Today,
                label,
            });
        }
    }
    estimates
}

/// Trailing 7- and 30-day sums of newly learned words, boundary day
/// inclusive. The history is date-sorted but no contiguity is assumed;
/// missing days simply contribute nothing.
pub fn growth_deltas(history: &[DailyHistoryPoint], today: NaiveDate) -> GrowthDeltas {
    let week_cutoff = today - Duration::days(7);
    let month_cutoff = today - Duration::days(30);
    let mut deltas = GrowthDeltas {
        last_week: 0,
        last_month: 0,
    };
    for point in history {
        if point.date > today {
            continue;
        }
        if point.date >= month_cutoff {
            deltas.last_month += point.words_learned;
            if point.date >= week_cutoff {
                deltas.last_week += point.words_learned;
            }
        }
    }
    deltas
}

/// The seven memory-stability bands. Half-open on the upper bound, so
/// every duration lands in exactly one band; the last is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StabilityBand {
    UnderHour,
    HourToHalfDay,
    HalfDayToDay,
    OneToThreeDays,
    ThreeToSevenDays,
    WeekToMonth,
    MonthPlus,
}

/// Coarse health rollup of the stability bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    /// Half-life under a day
    Fragile,
    /// At least a day, under a week
    Growing,
    /// A week or more
    Solid,
}

impl StabilityBand {
    pub const ALL: [StabilityBand; 7] = [
        StabilityBand::UnderHour,
        StabilityBand::HourToHalfDay,
        StabilityBand::HalfDayToDay,
        StabilityBand::OneToThreeDays,
        StabilityBand::ThreeToSevenDays,
        StabilityBand::WeekToMonth,
        StabilityBand::MonthPlus,
    ];

    pub fn of_seconds(seconds: f64) -> StabilityBand {
        if seconds < SECS_PER_HOUR {
            StabilityBand::UnderHour
        } else if seconds < 12.0 * SECS_PER_HOUR {
            StabilityBand::HourToHalfDay
        } else if seconds < SECS_PER_DAY {
            StabilityBand::HalfDayToDay
        } else if seconds < 3.0 * SECS_PER_DAY {
            StabilityBand::OneToThreeDays
        } else if seconds < 7.0 * SECS_PER_DAY {
            StabilityBand::ThreeToSevenDays
        } else if seconds < 30.0 * SECS_PER_DAY {
            StabilityBand::WeekToMonth
        } else {
            StabilityBand::MonthPlus
        }
    }

    pub fn tier(&self) -> HealthTier {
        match self {
            StabilityBand::UnderHour
            | StabilityBand::HourToHalfDay
            | StabilityBand::HalfDayToDay => HealthTier::Fragile,
            StabilityBand::OneToThreeDays | StabilityBand::ThreeToSevenDays => HealthTier::Growing,
            StabilityBand::WeekToMonth | StabilityBand::MonthPlus => HealthTier::Solid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StabilityBand::UnderHour => "<1h",
            StabilityBand::HourToHalfDay => "1h-12h",
            StabilityBand::HalfDayToDay => "12h-1d",
            StabilityBand::OneToThreeDays => "1-3d",
            StabilityBand::ThreeToSevenDays => "3-7d",
            StabilityBand::WeekToMonth => "7-30d",
            StabilityBand::MonthPlus => "30d+",
        }
    }
}

/// Per-band counts plus the three-tier health rollup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StabilityDistribution {
    pub bands: [u32; 7],
    pub fragile: u32,
    pub growing: u32,
    pub solid: u32,
}

pub fn stability_distribution(stabilities: &[WordStability]) -> StabilityDistribution {
    let mut dist = StabilityDistribution::default();
    for s in stabilities {
        let band = StabilityBand::of_seconds(s.stability_seconds);
        dist.bands[band as usize] += 1;
        match band.tier() {
            HealthTier::Fragile => dist.fragile += 1,
            HealthTier::Growing => dist.growing += 1,
            HealthTier::Solid => dist.solid += 1,
        }
    }
    dist
}

/// Rounded percentage shares of the comprehension self-reports. A zero
/// total omits the section entirely.
pub fn comprehension_split(counts: &ComprehensionCounts) -> Option<ComprehensionSplit> {
    let total = counts.understood + counts.partial + counts.no_idea;
    if total == 0 {
        return None;
    }
    let pct = |n: u32| (n as f64 / total as f64 * 100.0).round() as u32;
    Some(ComprehensionSplit {
        understood_pct: pct(counts.understood),
        partial_pct: pct(counts.partial),
        no_idea_pct: pct(counts.no_idea),
    })
}

/// Resolve flow-chart bar heights against a maximum shared by both
/// series (never below 1, so an all-zero window still scales cleanly).
/// Zero days keep a sliver-height bar instead of vanishing.
pub fn scale_flow(days: &[FlowDay]) -> Vec<ScaledFlowDay> {
    let max = days
        .iter()
        .flat_map(|d| [d.entered, d.graduated])
        .max()
        .unwrap_or(0)
        .max(1);
    let px = |count: u32| (count as f64 / max as f64 * FLOW_BAR_CEILING_PX).max(FLOW_BAR_FLOOR_PX);
    days.iter()
        .map(|d| ScaledFlowDay {
            date: d.date,
            entered_px: px(d.entered),
            graduated_px: px(d.graduated),
        })
        .collect()
}

/// Relative label for an absolute timestamp. Pure in (timestamp, now),
/// so re-rendering at a later instant never flips an earlier label
/// backwards. Timestamps in the future clamp to "just now".
pub fn relative_label(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    if elapsed < Duration::minutes(1) {
        return "just now".to_string();
    }
    if elapsed < Duration::hours(1) {
        return format!("{}m ago", elapsed.num_minutes());
    }
    if elapsed < Duration::hours(24) {
        return format!("{}h ago", elapsed.num_hours());
    }
    let days = elapsed.num_days();
    if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

/// Seven-day flow window ending today, zero-filling days the backend
/// did not report
pub fn trailing_flow_window(flow: &[FlowDay], today: NaiveDate) -> Vec<FlowDay> {
    (0..7)
        .map(|offset| {
            let date = today - Duration::days(6 - offset);
            flow.iter()
                .find(|d| d.date == date)
                .cloned()
                .unwrap_or(FlowDay {
                    date,
                    entered: 0,
                    graduated: 0,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(date: NaiveDate, words_learned: u32) -> DailyHistoryPoint {
        DailyHistoryPoint {
            date,
            reviews: 0,
            accuracy: None,
            words_learned,
            cumulative_known: 0,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_coverage_bar_segments_capped_at_100() {
        for known in [0u32, 1, 50, 400] {
            for acquiring in [0u32, 10, 500] {
                for to_next in [0u32, 1, 100] {
                    if let Some(bar) = coverage_bar(known, acquiring, Some(to_next)) {
                        assert!(bar.known_pct + bar.acquiring_pct <= 100.0 + 1e-9);
                        assert!(bar.known_pct >= 0.0 && bar.acquiring_pct >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_coverage_bar_absent_cases() {
        // Top level: no words_to_next, no bar
        assert!(coverage_bar(500, 20, None).is_none());
        // Degenerate zero threshold
        assert!(coverage_bar(0, 5, Some(0)).is_none());
    }

    #[test]
    fn test_coverage_bar_basic_split() {
        let bar = coverage_bar(60, 20, Some(40)).unwrap();
        assert!((bar.known_pct - 60.0).abs() < 1e-9);
        assert!((bar.acquiring_pct - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_pace_label_units() {
        assert_eq!(pace_label(1.0), "1 day");
        assert_eq!(pace_label(45.0), "45 days");
        assert_eq!(pace_label(60.0), "60 days");
        assert_eq!(pace_label(61.0), "9 weeks");
        assert_eq!(pace_label(365.0), "52 weeks");
        assert_eq!(pace_label(400.0), "13 months");
    }

    #[test]
    fn test_pace_estimates_suppresses_duplicate() {
        let estimates = pace_estimates(Some(70.0), Some(72.0));
        // Both land on "10 weeks"; only the trailing-week one survives
        assert_eq!(estimates.len(), 1);
        assert_eq!(estimates[0].basis, PaceBasis::TrailingWeek);

        let estimates = pace_estimates(Some(70.0), Some(120.0));
        assert_eq!(estimates.len(), 2);

        let estimates = pace_estimates(None, Some(5.0));
        assert_eq!(estimates.len(), 1);
        assert_eq!(estimates[0].basis, PaceBasis::Today);
    }

    #[test]
    fn test_growth_deltas_week_scenario() {
        let today = d(2026, 3, 10);
        let learned = [2, 0, 3, 1, 0, 0, 4];
        let history: Vec<DailyHistoryPoint> = learned
            .iter()
            .enumerate()
            .map(|(i, &n)| day(today - Duration::days(6 - i as i64), n))
            .collect();
        let deltas = growth_deltas(&history, today);
        assert_eq!(deltas.last_week, 10);
        assert_eq!(deltas.last_month, 10);
    }

    #[test]
    fn test_growth_deltas_boundary_inclusive() {
        let today = d(2026, 3, 31);
        let history = vec![
            day(today - Duration::days(31), 100),
            day(today - Duration::days(30), 5),
            day(today - Duration::days(8), 3),
            day(today - Duration::days(7), 2),
            day(today, 1),
        ];
        let deltas = growth_deltas(&history, today);
        assert_eq!(deltas.last_week, 3);
        assert_eq!(deltas.last_month, 11);
    }

    #[test]
    fn test_stability_bands_partition() {
        let samples = [
            0.0,
            SECS_PER_HOUR - 1.0,
            SECS_PER_HOUR,
            12.0 * SECS_PER_HOUR - 1.0,
            12.0 * SECS_PER_HOUR,
            SECS_PER_DAY - 1.0,
            SECS_PER_DAY,
            3.0 * SECS_PER_DAY,
            7.0 * SECS_PER_DAY - 1.0,
            7.0 * SECS_PER_DAY,
            30.0 * SECS_PER_DAY - 1.0,
            30.0 * SECS_PER_DAY,
            365.0 * SECS_PER_DAY,
        ];
        for &s in &samples {
            let band = StabilityBand::of_seconds(s);
            // exactly one band claims the value
            let matching = StabilityBand::ALL
                .iter()
                .filter(|b| **b == band)
                .count();
            assert_eq!(matching, 1);
        }
        assert_eq!(StabilityBand::of_seconds(0.0), StabilityBand::UnderHour);
        assert_eq!(
            StabilityBand::of_seconds(SECS_PER_DAY),
            StabilityBand::OneToThreeDays
        );
        assert_eq!(
            StabilityBand::of_seconds(45.0 * SECS_PER_DAY),
            StabilityBand::MonthPlus
        );
    }

    #[test]
    fn test_stability_tiers() {
        assert_eq!(StabilityBand::HalfDayToDay.tier(), HealthTier::Fragile);
        assert_eq!(StabilityBand::OneToThreeDays.tier(), HealthTier::Growing);
        assert_eq!(StabilityBand::WeekToMonth.tier(), HealthTier::Solid);
    }

    #[test]
    fn test_stability_distribution_totals() {
        let stabilities: Vec<WordStability> = [
            600.0,
            2.0 * SECS_PER_HOUR,
            13.0 * SECS_PER_HOUR,
            2.0 * SECS_PER_DAY,
            5.0 * SECS_PER_DAY,
            10.0 * SECS_PER_DAY,
            90.0 * SECS_PER_DAY,
        ]
        .iter()
        .enumerate()
        .map(|(i, &s)| WordStability {
            word_id: i as u64,
            stability_seconds: s,
        })
        .collect();
        let dist = stability_distribution(&stabilities);
        assert_eq!(dist.bands, [1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(dist.fragile, 3);
        assert_eq!(dist.growing, 2);
        assert_eq!(dist.solid, 2);
        assert_eq!(
            dist.fragile + dist.growing + dist.solid,
            stabilities.len() as u32
        );
    }

    #[test]
    fn test_comprehension_split_rounds_near_100() {
        let split = comprehension_split(&ComprehensionCounts {
            understood: 1,
            partial: 1,
            no_idea: 1,
        })
        .unwrap();
        let sum = split.understood_pct + split.partial_pct + split.no_idea_pct;
        assert!((99..=101).contains(&sum));
    }

    #[test]
    fn test_comprehension_split_zero_total_omitted() {
        assert!(comprehension_split(&ComprehensionCounts {
            understood: 0,
            partial: 0,
            no_idea: 0,
        })
        .is_none());
    }

    #[test]
    fn test_scale_flow_zero_window() {
        let days = vec![
            FlowDay {
                date: d(2026, 3, 1),
                entered: 0,
                graduated: 0,
            },
            FlowDay {
                date: d(2026, 3, 2),
                entered: 0,
                graduated: 0,
            },
        ];
        // all-zero window: every bar sits at the sliver floor
        for bar in scale_flow(&days) {
            assert_eq!(bar.entered_px, FLOW_BAR_FLOOR_PX);
            assert_eq!(bar.graduated_px, FLOW_BAR_FLOOR_PX);
        }
    }

    #[test]
    fn test_scale_flow_shared_max() {
        let days = vec![
            FlowDay {
                date: d(2026, 3, 1),
                entered: 12,
                graduated: 3,
            },
            FlowDay {
                date: d(2026, 3, 2),
                entered: 6,
                graduated: 0,
            },
        ];
        let bars = scale_flow(&days);
        assert_eq!(bars[0].entered_px, FLOW_BAR_CEILING_PX);
        assert_eq!(bars[0].graduated_px, FLOW_BAR_CEILING_PX * 3.0 / 12.0);
        assert_eq!(bars[1].entered_px, FLOW_BAR_CEILING_PX / 2.0);
        assert_eq!(bars[1].graduated_px, FLOW_BAR_FLOOR_PX);
    }

    #[test]
    fn test_relative_label_ladder() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let at = |secs: i64| now - Duration::seconds(secs);
        assert_eq!(relative_label(at(30), now), "just now");
        assert_eq!(relative_label(at(90), now), "1m ago");
        assert_eq!(relative_label(at(59 * 60), now), "59m ago");
        assert_eq!(relative_label(at(3 * 3600), now), "3h ago");
        assert_eq!(relative_label(at(30 * 3600), now), "yesterday");
        assert_eq!(relative_label(at(3 * 86400), now), "3d ago");
        assert_eq!(relative_label(at(10 * 86400), now), "Feb 28, 2026");
        // future timestamps clamp
        assert_eq!(relative_label(now + Duration::seconds(5), now), "just now");
    }

    #[test]
    fn test_trailing_flow_window_zero_fills() {
        let today = d(2026, 3, 10);
        let flow = vec![FlowDay {
            date: today,
            entered: 4,
            graduated: 1,
        }];
        let window = trailing_flow_window(&flow, today);
        assert_eq!(window.len(), 7);
        assert_eq!(window[0].date, today - Duration::days(6));
        assert_eq!(window[6].entered, 4);
        assert!(window[..6].iter().all(|d| d.entered == 0 && d.graduated == 0));
    }
}
