use serde::{Deserialize, Serialize};

/// Fallback values used when a signal field is missing or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalDefaults {
    pub form: f64,
    pub fixture_difficulty: u8,
    pub xgi_per90: f64,
    pub minutes_risk: f64,
}

impl SignalDefaults {
    pub const STANDARD: SignalDefaults = SignalDefaults {
        form: 5.0,
        fixture_difficulty: 3,
        xgi_per90: 0.5,
        minutes_risk: 0.0,
    };
}

impl Default for SignalDefaults {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Sanitized per-player inputs. Every field is guaranteed in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSignal {
    pub form: f64,
    pub fixture_difficulty: u8,
    pub xgi_per90: f64,
    pub minutes_risk: f64,
}

/// Signal fields as they arrive from a data feed: any of them may be absent,
/// non-finite or outside its valid range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawSignal {
    pub form: Option<f64>,
    pub fixture_difficulty: Option<f64>,
    pub xgi_per90: Option<f64>,
    pub minutes_risk: Option<f64>,
}

/// Which fields of a [`RawSignal`] fell back to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFallbacks {
    pub form: bool,
    pub fixture_difficulty: bool,
    pub xgi_per90: bool,
    pub minutes_risk: bool,
}

impl FieldFallbacks {
    pub fn count(&self) -> usize {
        [
            self.form,
            self.fixture_difficulty,
            self.xgi_per90,
            self.minutes_risk,
        ]
        .iter()
        .filter(|hit| **hit)
        .count()
    }
}

impl RawSignal {
    /// Replace every missing or invalid field with its default.
    pub fn sanitize(&self, defaults: &SignalDefaults) -> PlayerSignal {
        PlayerSignal {
            form: valid_form(self.form).unwrap_or(defaults.form),
            fixture_difficulty: valid_fixture(self.fixture_difficulty)
                .unwrap_or(defaults.fixture_difficulty),
            xgi_per90: valid_xgi(self.xgi_per90).unwrap_or(defaults.xgi_per90),
            minutes_risk: valid_risk(self.minutes_risk).unwrap_or(defaults.minutes_risk),
        }
    }

    /// Same result as [`RawSignal::sanitize`], also reporting which fields were defaulted.
    pub fn sanitize_tracked(&self, defaults: &SignalDefaults) -> (PlayerSignal, FieldFallbacks) {
        let form = valid_form(self.form);
        let fixture = valid_fixture(self.fixture_difficulty);
        let xgi = valid_xgi(self.xgi_per90);
        let risk = valid_risk(self.minutes_risk);
        let fallbacks = FieldFallbacks {
            form: form.is_none(),
            fixture_difficulty: fixture.is_none(),
            xgi_per90: xgi.is_none(),
            minutes_risk: risk.is_none(),
        };
        let signal = PlayerSignal {
            form: form.unwrap_or(defaults.form),
            fixture_difficulty: fixture.unwrap_or(defaults.fixture_difficulty),
            xgi_per90: xgi.unwrap_or(defaults.xgi_per90),
            minutes_risk: risk.unwrap_or(defaults.minutes_risk),
        };
        (signal, fallbacks)
    }
}

impl From<PlayerSignal> for RawSignal {
    fn from(signal: PlayerSignal) -> Self {
        Self {
            form: Some(signal.form),
            fixture_difficulty: Some(f64::from(signal.fixture_difficulty)),
            xgi_per90: Some(signal.xgi_per90),
            minutes_risk: Some(signal.minutes_risk),
        }
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

fn valid_form(v: Option<f64>) -> Option<f64> {
    finite(v).filter(|v| (0.0..=10.0).contains(v))
}

// Difficulty is an integer rating; 2.5 is as invalid as 7.
fn valid_fixture(v: Option<f64>) -> Option<u8> {
    finite(v)
        .filter(|v| v.fract() == 0.0 && (1.0..=5.0).contains(v))
        .map(|v| v as u8)
}

fn valid_xgi(v: Option<f64>) -> Option<f64> {
    finite(v).filter(|v| *v >= 0.0)
}

fn valid_risk(v: Option<f64>) -> Option<f64> {
    finite(v).filter(|v| (0.0..=100.0).contains(v))
}
