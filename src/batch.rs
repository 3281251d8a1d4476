use serde::{Deserialize, Serialize};

use crate::candidate::{CandidateInput, CaptainCandidate};
use crate::score::{ScoringConfig, score_signal};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOptions {
    /// Caller vouches for its inputs; skip per-field bookkeeping. Scores are unchanged.
    #[serde(default)]
    pub optimize: bool,
}

impl ScoreOptions {
    pub fn optimized() -> Self {
        Self { optimize: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBatch {
    pub candidates: Vec<CaptainCandidate>,
    pub malformed_records: usize,
    /// Signal fields that fell back to a default. Not tracked on the optimized path.
    pub defaulted_fields: Option<usize>,
}

/// Score every element with the standard configuration. Output has one record per
/// input element, in input order.
pub fn score_all(inputs: &[CandidateInput], options: ScoreOptions) -> Vec<CaptainCandidate> {
    score_batch(&ScoringConfig::STANDARD, inputs, options).candidates
}

pub fn score_all_with(
    config: &ScoringConfig,
    inputs: &[CandidateInput],
    options: ScoreOptions,
) -> Vec<CaptainCandidate> {
    score_batch(config, inputs, options).candidates
}

pub fn score_batch(
    config: &ScoringConfig,
    inputs: &[CandidateInput],
    options: ScoreOptions,
) -> ScoredBatch {
    run(config, inputs.iter().map(CandidateInput::as_candidate), inputs.len(), options)
}

/// Typed variant for callers that already hold well-formed records.
pub fn score_candidates(
    candidates: &[CaptainCandidate],
    options: ScoreOptions,
) -> Vec<CaptainCandidate> {
    run(
        &ScoringConfig::STANDARD,
        candidates.iter().map(Some),
        candidates.len(),
        options,
    )
    .candidates
}

/// Overwrite `captain_score` on records the caller owns. Every other field is left alone.
pub fn score_in_place(config: &ScoringConfig, candidates: &mut [CaptainCandidate]) {
    for candidate in candidates.iter_mut() {
        let signal = candidate.raw_signal().sanitize(&config.defaults);
        candidate.captain_score = score_signal(config, &signal);
    }
}

fn run<'a, I>(config: &ScoringConfig, items: I, len: usize, options: ScoreOptions) -> ScoredBatch
where
    I: Iterator<Item = Option<&'a CaptainCandidate>>,
{
    if options.optimize {
        run_fast(config, items, len)
    } else {
        run_guarded(config, items, len)
    }
}

fn run_guarded<'a, I>(config: &ScoringConfig, items: I, len: usize) -> ScoredBatch
where
    I: Iterator<Item = Option<&'a CaptainCandidate>>,
{
    let mut out = Vec::with_capacity(len);
    let mut malformed = 0usize;
    let mut defaulted = 0usize;

    for item in items {
        let Some(candidate) = item else {
            malformed += 1;
            out.push(CaptainCandidate::placeholder());
            continue;
        };
        let (signal, fallbacks) = candidate.raw_signal().sanitize_tracked(&config.defaults);
        defaulted += fallbacks.count();
        let mut scored = candidate.clone();
        scored.captain_score = score_signal(config, &signal);
        out.push(scored);
    }

    if malformed > 0 || defaulted > 0 {
        tracing::debug!(
            "Scored {} captain candidates ({} malformed records, {} defaulted fields)",
            out.len(),
            malformed,
            defaulted
        );
    }

    ScoredBatch {
        candidates: out,
        malformed_records: malformed,
        defaulted_fields: Some(defaulted),
    }
}

fn run_fast<'a, I>(config: &ScoringConfig, items: I, len: usize) -> ScoredBatch
where
    I: Iterator<Item = Option<&'a CaptainCandidate>>,
{
    let mut out = Vec::with_capacity(len);
    let mut malformed = 0usize;
    for item in items {
        match item {
            Some(candidate) => {
                let mut scored = candidate.clone();
                scored.captain_score =
                    score_signal(config, &candidate.raw_signal().sanitize(&config.defaults));
                out.push(scored);
            }
            None => {
                malformed += 1;
                out.push(CaptainCandidate::placeholder());
            }
        }
    }
    ScoredBatch {
        candidates: out,
        malformed_records: malformed,
        defaulted_fields: None,
    }
}

/// The `n` best-scored records, highest first. Ties keep their input order.
pub fn top_n(records: &[CaptainCandidate], n: i64) -> Vec<CaptainCandidate> {
    if n <= 0 || records.is_empty() {
        return Vec::new();
    }
    let n = usize::try_from(n).unwrap_or(usize::MAX).min(records.len());

    let mut ranked: Vec<&CaptainCandidate> = records.iter().collect();
    // `sort_by` is stable, which is what keeps ties in input order.
    ranked.sort_by(|a, b| rank_key(b.captain_score).total_cmp(&rank_key(a.captain_score)));
    ranked.into_iter().take(n).cloned().collect()
}

// `total_cmp` orders -0.0 below 0.0; adding 0.0 folds the two into one key.
fn rank_key(score: f64) -> f64 {
    if score.is_nan() { f64::NEG_INFINITY } else { score + 0.0 }
}
