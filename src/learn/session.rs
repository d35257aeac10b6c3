//! Learn session state machine
//!
//! Owns the introduce → quiz → summarize flow for one sitting. The
//! machine is synchronous except for the two backend calls (candidate
//! batch, introduction payload); both are awaited through [`VocabApi`]
//! and applied under a generation check so a response that lands after
//! a reset is discarded instead of mutating the fresh session.

use serde::Serialize;
use thiserror::Error;

use crate::api::{ApiError, Introduction, VocabApi};
use crate::vocabulary::{LearnCandidate, WordId};

/// How many candidates one session requests up front
pub const DEFAULT_BATCH_SIZE: usize = 6;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("not available in the current phase")]
    WrongPhase,

    #[error("candidate not in the current batch: {0}")]
    UnknownCandidate(WordId),

    #[error("no words introduced yet")]
    NothingIntroduced,

    #[error("answer not revealed yet")]
    NotRevealed,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Session phase. Cursor and reveal flag live inside the variants that
/// use them, so a revealed answer outside the quiz is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the candidate batch
    Loading,
    /// Choosing the next word to introduce
    Pick,
    /// Walking the introduced list
    Intro { cursor: usize },
    /// Quizzing over the introduced list, in introduction order
    Quiz { cursor: usize, revealed: bool },
    /// Summary screen; re-enterable indefinitely via reset
    Done,
}

/// A candidate together with its fetched introduction payload
#[derive(Debug, Clone)]
pub struct IntroducedWord {
    pub candidate: LearnCandidate,
    pub introduction: Introduction,
}

/// End-of-session tally, derived from the outcome list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub introduced: usize,
    pub got_it: usize,
    pub missed: usize,
    pub outcomes: Vec<bool>,
}

impl SessionSummary {
    pub fn score_line(&self) -> String {
        format!("Got it: {}, Missed: {}", self.got_it, self.missed)
    }
}

/// One learn session. Created entering `Loading`, destroyed when the
/// learner navigates away; nothing here is ever persisted.
pub struct LearnSession<A: VocabApi> {
    api: A,
    batch_size: usize,
    /// Bumped on reset; fetch results are applied only if the session
    /// generation still matches the one captured when the fetch began
    generation: u64,
    phase: SessionPhase,
    candidates: Vec<LearnCandidate>,
    introduced: Vec<IntroducedWord>,
    outcomes: Vec<bool>,
}

impl<A: VocabApi> LearnSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            batch_size: DEFAULT_BATCH_SIZE,
            generation: 0,
            phase: SessionPhase::Loading,
            candidates: Vec::new(),
            introduced: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn with_batch_size(api: A, batch_size: usize) -> Self {
        let mut session = Self::new(api);
        session.batch_size = batch_size;
        session
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn candidates(&self) -> &[LearnCandidate] {
        &self.candidates
    }

    pub fn introduced(&self) -> &[IntroducedWord] {
        &self.introduced
    }

    pub fn outcomes(&self) -> &[bool] {
        &self.outcomes
    }

    pub fn is_introduced(&self, candidate_id: WordId) -> bool {
        self.introduced.iter().any(|w| w.candidate.id == candidate_id)
    }

    /// The introduction card currently on screen
    pub fn current_intro(&self) -> Option<&IntroducedWord> {
        match self.phase {
            SessionPhase::Intro { cursor } => self.introduced.get(cursor),
            _ => None,
        }
    }

    /// The word currently being quizzed
    pub fn current_quiz_word(&self) -> Option<&IntroducedWord> {
        match self.phase {
            SessionPhase::Quiz { cursor, .. } => self.introduced.get(cursor),
            _ => None,
        }
    }

    /// Summary tally, available once the quiz has finished
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Done {
            return None;
        }
        Some(SessionSummary {
            introduced: self.introduced.len(),
            got_it: self.outcomes.iter().filter(|&&o| o).count(),
            missed: self.outcomes.iter().filter(|&&o| !o).count(),
            outcomes: self.outcomes.clone(),
        })
    }

    /// Enter `Loading` and hand back the generation token the eventual
    /// batch must be applied under
    pub fn begin_loading(&mut self) -> u64 {
        self.phase = SessionPhase::Loading;
        self.generation
    }

    /// Apply a fetched candidate batch. Fail-open: a fetch error leaves
    /// an empty batch but still advances to `Pick`, so the learner is
    /// never stuck on a spinner. A stale generation discards the result.
    pub fn apply_candidates(
        &mut self,
        generation: u64,
        batch: std::result::Result<Vec<LearnCandidate>, ApiError>,
    ) {
        if generation != self.generation {
            log::debug!("discarding candidate batch from a reset session");
            return;
        }
        match batch {
            Ok(candidates) => self.candidates = candidates,
            Err(err) => {
                log::warn!("candidate fetch failed, continuing with empty batch: {}", err);
                self.candidates = Vec::new();
            }
        }
        self.phase = SessionPhase::Pick;
    }

    /// Fetch the candidate batch and advance to `Pick`
    pub async fn load(&mut self) {
        let generation = self.begin_loading();
        let batch = self.api.fetch_next_candidates(self.batch_size).await;
        self.apply_candidates(generation, batch);
    }

    /// Apply a fetched introduction payload. A stale generation discards
    /// the result; otherwise the pair is appended and the intro walk
    /// jumps to it.
    pub fn apply_introduction(
        &mut self,
        generation: u64,
        candidate: LearnCandidate,
        introduction: Introduction,
    ) {
        if generation != self.generation {
            log::debug!(
                "discarding introduction for {} from a reset session",
                candidate.id
            );
            return;
        }
        self.introduced.push(IntroducedWord {
            candidate,
            introduction,
        });
        self.phase = SessionPhase::Intro {
            cursor: self.introduced.len() - 1,
        };
    }

    /// Introduce a candidate from `Pick`. Re-selecting an already
    /// introduced word is a no-op; a failed payload fetch keeps the
    /// session on `Pick` and surfaces the error to the caller.
    pub async fn introduce(&mut self, candidate_id: WordId) -> Result<()> {
        if self.phase != SessionPhase::Pick {
            return Err(SessionError::WrongPhase);
        }
        if self.is_introduced(candidate_id) {
            return Ok(());
        }
        let candidate = self
            .candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .cloned()
            .ok_or(SessionError::UnknownCandidate(candidate_id))?;

        let generation = self.generation;
        match self.api.introduce(candidate_id).await {
            Ok(introduction) => {
                self.apply_introduction(generation, candidate, introduction);
                Ok(())
            }
            Err(err) => {
                log::warn!("introduction fetch for {} failed: {}", candidate_id, err);
                Err(err.into())
            }
        }
    }

    /// Advance the intro walk; past the last card this returns to `Pick`
    pub fn next_intro(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Intro { cursor } => {
                if cursor + 1 < self.introduced.len() {
                    self.phase = SessionPhase::Intro { cursor: cursor + 1 };
                } else {
                    self.phase = SessionPhase::Pick;
                }
                Ok(())
            }
            _ => Err(SessionError::WrongPhase),
        }
    }

    /// Start the quiz over everything introduced so far, in
    /// introduction order
    pub fn start_quiz(&mut self) -> Result<()> {
        if self.phase != SessionPhase::Pick {
            return Err(SessionError::WrongPhase);
        }
        if self.introduced.is_empty() {
            return Err(SessionError::NothingIntroduced);
        }
        self.outcomes.clear();
        self.phase = SessionPhase::Quiz {
            cursor: 0,
            revealed: false,
        };
        Ok(())
    }

    /// Show the answer for the current quiz card
    pub fn reveal(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Quiz { cursor, .. } => {
                self.phase = SessionPhase::Quiz {
                    cursor,
                    revealed: true,
                };
                Ok(())
            }
            _ => Err(SessionError::WrongPhase),
        }
    }

    /// Record the outcome for the current card and advance; the last
    /// card lands the session on `Done`
    pub fn record_outcome(&mut self, correct: bool) -> Result<()> {
        match self.phase {
            SessionPhase::Quiz { revealed: false, .. } => Err(SessionError::NotRevealed),
            SessionPhase::Quiz {
                cursor,
                revealed: true,
            } => {
                self.outcomes.push(correct);
                debug_assert_eq!(self.outcomes.len(), cursor + 1);
                if cursor + 1 < self.introduced.len() {
                    self.phase = SessionPhase::Quiz {
                        cursor: cursor + 1,
                        revealed: false,
                    };
                } else {
                    self.phase = SessionPhase::Done;
                }
                Ok(())
            }
            _ => Err(SessionError::WrongPhase),
        }
    }

    /// Throw the session away and start over with a fresh batch.
    /// Bumping the generation first means any fetch still in flight for
    /// the old session gets discarded when it arrives.
    pub async fn reset(&mut self) {
        self.generation += 1;
        self.candidates.clear();
        self.introduced.clear();
        self.outcomes.clear();
        self.load().await;
    }
}
