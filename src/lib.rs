//! lexis: client-side core of a vocabulary acquisition companion
//!
//! This crate holds the decision logic the app's screens lean on:
//! - `vocabulary`: word records and the classifier behind filter chips,
//!   search and list ordering
//! - `analytics`: pure derivations turning backend counters and daily
//!   history into dashboard numbers
//! - `learn`: the state machine driving an introduce → quiz → summary
//!   session
//! - `api`: the trait boundary to the remote backend, plus a
//!   snapshot-file implementation for the CLI and tests
//!
//! Scheduling (review due-dates, knowledge scores, stability) is
//! computed server-side and only consumed here.

pub mod analytics;
pub mod api;
pub mod learn;
pub mod vocabulary;
