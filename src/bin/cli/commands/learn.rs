use anyhow::Result;

use lexis::api::SnapshotApi;
use lexis::learn::LearnSession;
use lexis::vocabulary::RootWordStatus;

/// Run one scripted session: introduce the top `introduce` candidates,
/// then quiz with the given answer letters (missing letters count as
/// correct).
pub async fn run(api: SnapshotApi, introduce: usize, answers: &str, batch: usize) -> Result<()> {
    let mut session = LearnSession::with_batch_size(api, batch);
    session.load().await;

    let picks: Vec<_> = session
        .candidates()
        .iter()
        .take(introduce)
        .map(|c| (c.id, c.text.clone()))
        .collect();
    if picks.is_empty() {
        println!("no candidates available");
        return Ok(());
    }

    for (id, text) in &picks {
        session.introduce(*id).await?;
        let card = session.current_intro().expect("intro card after introduce");
        println!("introducing {}: {}", text, card.candidate.gloss);
        if let Some(family) = &card.introduction.root_family {
            for sibling in family {
                let mark = match sibling.status {
                    RootWordStatus::Known => "✓",
                    RootWordStatus::Learning => "~",
                    RootWordStatus::Unknown => " ",
                };
                println!("    {} {}: {}", mark, sibling.text, sibling.gloss);
            }
        }
        session.next_intro()?;
    }

    session.start_quiz()?;
    let mut answer_chars = answers.chars();
    while session.summary().is_none() {
        let word = session
            .current_quiz_word()
            .expect("quiz card while unfinished")
            .candidate
            .text
            .clone();
        session.reveal()?;
        let correct = !matches!(answer_chars.next(), Some('i') | Some('I'));
        println!("quiz {} → {}", word, if correct { "correct" } else { "incorrect" });
        session.record_outcome(correct)?;
    }

    let summary = session.summary().expect("summary at done");
    println!("{}", summary.score_line());
    Ok(())
}
