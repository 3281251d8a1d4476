//! Captain-pick scoring for fantasy football.
//!
//! Turns partial per-player signals (form, fixture difficulty, xGI per 90, minutes
//! risk) into a bounded 0–100 captain score, and ranks candidate pools by it.

pub mod batch;
pub mod benchmark;
pub mod candidate;
pub mod config;
pub mod logging;
pub mod score;
pub mod signal;
pub mod synthetic;

pub use batch::{ScoreOptions, ScoredBatch, score_all, score_candidates, top_n};
pub use benchmark::{BenchmarkReport, benchmark};
pub use candidate::{CandidateInput, CaptainCandidate, parse_candidates_json};
pub use score::{CaptainComparison, ScoreBreakdown, ScoringConfig, compare, score_signal};
pub use signal::{PlayerSignal, RawSignal, SignalDefaults};
