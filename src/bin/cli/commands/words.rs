use anyhow::Result;

use lexis::api::{SnapshotApi, VocabApi};
use lexis::vocabulary::{
    count_words, filter_words, review_category, sort_words, AcquisitionState, VocabularyRecord,
    WordFilter, WordOrder,
};

use crate::{FilterArg, OrderArg, OutputFormat};

fn to_filter(arg: FilterArg) -> WordFilter {
    match arg {
        FilterArg::All => WordFilter::All,
        FilterArg::New => WordFilter::State(AcquisitionState::New),
        FilterArg::Acquiring => WordFilter::State(AcquisitionState::Acquiring),
        FilterArg::Learning => WordFilter::State(AcquisitionState::Learning),
        FilterArg::Known => WordFilter::State(AcquisitionState::Known),
        FilterArg::Lapsed => WordFilter::State(AcquisitionState::Lapsed),
        FilterArg::Suspended => WordFilter::State(AcquisitionState::Suspended),
        FilterArg::Leech => WordFilter::Leech,
        FilterArg::Struggling => WordFilter::Struggling,
        FilterArg::Recent => WordFilter::Recent,
        FilterArg::Solid => WordFilter::Solid,
    }
}

fn to_order(arg: OrderArg) -> WordOrder {
    match arg {
        OrderArg::Accuracy => WordOrder::AccuracyAscending,
        OrderArg::Knowledge => WordOrder::KnowledgeDescending,
        OrderArg::Category => WordOrder::ReviewCategory,
    }
}

pub async fn run(
    api: &SnapshotApi,
    filter: FilterArg,
    search: &str,
    order: Option<OrderArg>,
    format: &OutputFormat,
) -> Result<()> {
    let words = api.fetch_word_records().await?;
    let counts = count_words(&words);

    let mut rows: Vec<&VocabularyRecord> = filter_words(&words, to_filter(filter), search);
    if let Some(order) = order {
        sort_words(&mut rows, to_order(order));
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "counts": counts,
                "words": rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} words | leech {} | struggling {} | recent {} | solid {}",
                counts.total, counts.leech, counts.struggling, counts.recent, counts.solid
            );
            for word in &rows {
                println!(
                    "{:<20} {:<24} {:?} seen {} correct {} score {} [{:?}]",
                    word.text,
                    word.gloss,
                    word.state,
                    word.times_seen,
                    word.times_correct,
                    word.knowledge_score,
                    review_category(word),
                );
            }
            if rows.is_empty() {
                println!("(no matching words)");
            }
        }
    }

    Ok(())
}
