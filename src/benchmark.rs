use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::batch::{ScoreOptions, score_batch};
use crate::candidate::CandidateInput;
use crate::score::ScoringConfig;

/// Wall-clock budget for one full batch pass over a league-sized pool (600+ players).
pub const PERFORMANCE_BUDGET_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    pub candidates_processed: usize,
    pub processing_time_ms: f64,
    pub meets_performance_target: bool,
}

pub fn benchmark(inputs: &[CandidateInput]) -> BenchmarkReport {
    benchmark_with(&ScoringConfig::STANDARD, inputs, ScoreOptions::default())
}

pub fn benchmark_with(
    config: &ScoringConfig,
    inputs: &[CandidateInput],
    options: ScoreOptions,
) -> BenchmarkReport {
    let started = Instant::now();
    let batch = score_batch(config, inputs, options);
    let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    let report = BenchmarkReport {
        candidates_processed: batch.candidates.len(),
        processing_time_ms,
        meets_performance_target: processing_time_ms < PERFORMANCE_BUDGET_MS,
    };
    if !report.meets_performance_target {
        tracing::warn!(
            "Captain scoring took {:.2} ms for {} candidates (budget {} ms)",
            report.processing_time_ms,
            report.candidates_processed,
            PERFORMANCE_BUDGET_MS
        );
    }
    report
}
