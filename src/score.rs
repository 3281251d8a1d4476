use serde::{Deserialize, Serialize};

use crate::candidate::CandidateInput;
use crate::signal::{PlayerSignal, SignalDefaults};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Fixed scoring constants. Built once and shared by reference; nothing mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weight_form: f64,
    pub weight_xgi: f64,
    pub weight_fixture: f64,
    pub form_ceiling: f64,
    pub xgi_ceiling: f64,
    // Curve midpoint at an average (difficulty 3) fixture, moved by `pivot_step`
    // per difficulty point.
    pub fixture_pivot: f64,
    pub fixture_pivot_step: f64,
    pub fixture_spread: f64,
    pub risk_multiplier: f64,
    pub defaults: SignalDefaults,
}

impl ScoringConfig {
    pub const STANDARD: ScoringConfig = ScoringConfig {
        weight_form: 0.45,
        weight_xgi: 0.35,
        weight_fixture: 0.20,
        form_ceiling: 10.0,
        xgi_ceiling: 2.5,
        fixture_pivot: 50.0,
        fixture_pivot_step: 5.0,
        fixture_spread: 10.0,
        risk_multiplier: 0.8,
        defaults: SignalDefaults::STANDARD,
    };
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// How a single captain score was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted contributions on the 0–100 scale; they sum to `raw`.
    pub form_points: f64,
    pub xgi_points: f64,
    pub fixture_points: f64,
    pub raw: f64,
    pub fixture_adjusted: f64,
    pub risk_multiplier: f64,
    /// Points removed by the rotation-risk penalty.
    pub risk_penalty: f64,
    pub score: f64,
}

impl ScoreBreakdown {
    pub fn zero() -> Self {
        Self {
            form_points: 0.0,
            xgi_points: 0.0,
            fixture_points: 0.0,
            raw: 0.0,
            fixture_adjusted: 0.0,
            risk_multiplier: 1.0,
            risk_penalty: 0.0,
            score: 0.0,
        }
    }

    fn component(&self, which: ScoreComponent) -> f64 {
        match which {
            ScoreComponent::Form => self.form_points,
            ScoreComponent::Xgi => self.xgi_points,
            ScoreComponent::Fixture => self.fixture_points,
            ScoreComponent::Risk => self.risk_penalty,
        }
    }
}

/// Captain score for an already sanitized signal.
pub fn score_signal(config: &ScoringConfig, signal: &PlayerSignal) -> f64 {
    score_breakdown(config, signal).score
}

pub fn score_breakdown(config: &ScoringConfig, signal: &PlayerSignal) -> ScoreBreakdown {
    let difficulty = f64::from(signal.fixture_difficulty);

    let form_norm = signal.form / config.form_ceiling;
    let xgi_norm = (signal.xgi_per90 / config.xgi_ceiling).min(1.0);
    let fixture_norm = (6.0 - difficulty) / 5.0;

    let form_points = config.weight_form * form_norm * 100.0;
    let xgi_points = config.weight_xgi * xgi_norm * 100.0;
    let fixture_points = config.weight_fixture * fixture_norm * 100.0;
    let raw = form_points + xgi_points + fixture_points;

    let fixture_adjusted = fixture_curve(config, raw, difficulty);

    let risk_multiplier = 1.0 - signal.minutes_risk / 100.0 * config.risk_multiplier;
    let penalized = fixture_adjusted * risk_multiplier;

    ScoreBreakdown {
        form_points,
        xgi_points,
        fixture_points,
        raw,
        fixture_adjusted,
        risk_multiplier,
        risk_penalty: fixture_adjusted - penalized,
        score: finish(penalized),
    }
}

// Logistic curve over the composite; an easier fixture moves the midpoint down.
fn fixture_curve(config: &ScoringConfig, raw: f64, difficulty: f64) -> f64 {
    let pivot = config.fixture_pivot + config.fixture_pivot_step * (difficulty - 3.0);
    SCORE_MAX / (1.0 + (-(raw - pivot) / config.fixture_spread).exp())
}

fn finish(v: f64) -> f64 {
    if !v.is_finite() {
        return SCORE_MIN;
    }
    round_one_decimal(v.clamp(SCORE_MIN, SCORE_MAX))
}

pub fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreComponent {
    Form,
    Xgi,
    Fixture,
    Risk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    First,
    Second,
    Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptainComparison {
    pub first: ScoreBreakdown,
    pub second: ScoreBreakdown,
    pub preferred: Preference,
    pub margin: f64,
    /// Component with the widest gap between the two players.
    pub decisive: ScoreComponent,
}

/// Head-to-head comparison of two candidates. Malformed inputs compare as zero.
pub fn compare(
    config: &ScoringConfig,
    first: &CandidateInput,
    second: &CandidateInput,
) -> CaptainComparison {
    let a = breakdown_for(config, first);
    let b = breakdown_for(config, second);

    let preferred = if a.score > b.score {
        Preference::First
    } else if b.score > a.score {
        Preference::Second
    } else {
        Preference::Level
    };

    let decisive = [
        ScoreComponent::Form,
        ScoreComponent::Xgi,
        ScoreComponent::Fixture,
        ScoreComponent::Risk,
    ]
    .into_iter()
    .map(|c| (c, (a.component(c) - b.component(c)).abs()))
    .fold((ScoreComponent::Form, f64::NEG_INFINITY), |best, cur| {
        if cur.1 > best.1 { cur } else { best }
    })
    .0;

    CaptainComparison {
        first: a,
        second: b,
        preferred,
        margin: round_one_decimal((a.score - b.score).abs()),
        decisive,
    }
}

fn breakdown_for(config: &ScoringConfig, input: &CandidateInput) -> ScoreBreakdown {
    match input {
        CandidateInput::Valid(candidate) => {
            let signal = candidate.raw_signal().sanitize(&config.defaults);
            score_breakdown(config, &signal)
        }
        CandidateInput::Invalid => ScoreBreakdown::zero(),
    }
}
