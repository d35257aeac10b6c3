//! Learn session flow
//!
//! Finite state machine for one learning sitting:
//! loading → pick → intro → quiz → done, with done re-entering pick
//! through a full reset.

pub mod session;

pub use session::{
    IntroducedWord, LearnSession, SessionError, SessionPhase, SessionSummary, DEFAULT_BATCH_SIZE,
};
