use anyhow::Result;
use chrono::Utc;

use lexis::analytics::{
    comprehension_split, coverage_bar, growth_deltas, pace_estimates, relative_label, scale_flow,
    stability_distribution, trailing_flow_window, StabilityBand,
};
use lexis::api::{SnapshotApi, VocabApi};

use crate::OutputFormat;

pub async fn run(api: &SnapshotApi, format: &OutputFormat) -> Result<()> {
    let overview = api.fetch_analytics().await?;
    let deep = api.fetch_deep_analytics().await?;
    let today = Utc::now().date_naive();
    let now = Utc::now();

    let deltas = growth_deltas(&overview.daily_history, today);
    let bar = overview.level.as_ref().and_then(|level| {
        coverage_bar(
            overview.known_words,
            overview.acquiring_words,
            level.words_to_next,
        )
    });
    let pace = overview
        .level
        .as_ref()
        .map(|level| pace_estimates(level.days_to_next_week_pace, level.days_to_next_today_pace))
        .unwrap_or_default();

    if let OutputFormat::Json = format {
        let output = serde_json::json!({
            "knownWords": overview.known_words,
            "growth": deltas,
            "coverageBar": bar,
            "pace": pace,
            "stability": deep.as_ref().map(|d| stability_distribution(&d.stabilities).bands),
            "comprehension": deep
                .as_ref()
                .and_then(|d| d.comprehension.as_ref().and_then(comprehension_split)),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} known words (+{} this week, +{} this month)",
        overview.known_words, deltas.last_week, deltas.last_month
    );
    if let Some(at) = overview.last_review_at {
        println!("last review: {}", relative_label(at, now));
    }

    if let Some(level) = &overview.level {
        println!("level: {}", level.level);
        if let Some(bar) = bar {
            println!(
                "  coverage: {:.0}% known, {:.0}% acquiring",
                bar.known_pct, bar.acquiring_pct
            );
        }
        for estimate in &pace {
            println!("  next level in ~{} ({:?})", estimate.label, estimate.basis);
        }
    }

    // Deep analytics sections are all optional; absent ones are skipped
    let Some(deep) = deep else {
        return Ok(());
    };

    if !deep.stabilities.is_empty() {
        let dist = stability_distribution(&deep.stabilities);
        println!("memory stability:");
        for (band, count) in StabilityBand::ALL.iter().zip(dist.bands) {
            println!("  {:<7} {}", band.label(), count);
        }
        println!(
            "  solid {} / growing {} / fragile {}",
            dist.solid, dist.growing, dist.fragile
        );
    }

    if let Some(split) = deep.comprehension.as_ref().and_then(comprehension_split) {
        println!(
            "comprehension: {}% understood, {}% partial, {}% no idea",
            split.understood_pct, split.partial_pct, split.no_idea_pct
        );
    }

    if let Some(retention) = deep.retention {
        println!("retention: {:.1}%", retention);
    }

    if !deep.flow.is_empty() {
        println!("last 7 days (bar px, in/out):");
        for bar in scale_flow(&trailing_flow_window(&deep.flow, today)) {
            println!(
                "  {}  {:>5.1} / {:>5.1}",
                bar.date, bar.entered_px, bar.graduated_px
            );
        }
    }

    if !deep.struggling_words.is_empty() {
        println!("struggling words (server):");
        for word in &deep.struggling_words {
            println!("  {} ({} attempts)", word.text, word.attempts);
        }
    }

    Ok(())
}
