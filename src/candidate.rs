use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::signal::RawSignal;

pub const PLAYER_ID: &str = "playerId";
pub const NAME: &str = "name";
pub const TEAM: &str = "team";
pub const POSITION: &str = "position";
pub const FORM: &str = "form";
pub const FIXTURE_DIFFICULTY: &str = "fixtureDifficulty";
pub const XGI_PER90: &str = "xgiPer90";
pub const MINUTES_RISK: &str = "minutesRisk";

/// Keys that mark a JSON object as a player record at all.
pub const PLAYER_FIELDS: [&str; 10] = [
    PLAYER_ID,
    NAME,
    TEAM,
    POSITION,
    "price",
    "ownership",
    FORM,
    FIXTURE_DIFFICULTY,
    XGI_PER90,
    MINUTES_RISK,
];

/// One player as handed over by the data layer.
///
/// Every field other than `captainScore` is kept exactly as it arrived (strings,
/// nulls and out-of-range numbers included); the engine only reads the four signal
/// keys and writes `captain_score`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptainCandidate {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "captainScore", default, deserialize_with = "lenient_score")]
    pub captain_score: f64,
}

impl CaptainCandidate {
    /// Stand-in for an element that was not a player record.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn name(&self) -> &str {
        self.text(NAME)
    }

    pub fn team(&self) -> &str {
        self.text(TEAM)
    }

    pub fn position(&self) -> &str {
        self.text(POSITION)
    }

    fn text(&self, key: &str) -> &str {
        self.field(key).and_then(Value::as_str).unwrap_or("")
    }

    // Anything that is not a JSON number ("7.5", null, "-") reads as missing and is
    // defaulted during sanitization.
    fn number(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(Value::as_f64)
    }

    pub fn raw_signal(&self) -> RawSignal {
        RawSignal {
            form: self.number(FORM),
            fixture_difficulty: self.number(FIXTURE_DIFFICULTY),
            xgi_per90: self.number(XGI_PER90),
            minutes_risk: self.number(MINUTES_RISK),
        }
    }
}

/// An element of an incoming candidate list, classified before scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateInput {
    Valid(CaptainCandidate),
    Invalid,
}

impl CandidateInput {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) if map.keys().any(|k| PLAYER_FIELDS.contains(&k.as_str())) => {
                serde_json::from_value::<CaptainCandidate>(Value::Object(map))
                    .map(CandidateInput::Valid)
                    .unwrap_or(CandidateInput::Invalid)
            }
            _ => CandidateInput::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CandidateInput::Valid(_))
    }

    pub fn as_candidate(&self) -> Option<&CaptainCandidate> {
        match self {
            CandidateInput::Valid(candidate) => Some(candidate),
            CandidateInput::Invalid => None,
        }
    }
}

impl From<CaptainCandidate> for CandidateInput {
    fn from(candidate: CaptainCandidate) -> Self {
        CandidateInput::Valid(candidate)
    }
}

impl From<Option<CaptainCandidate>> for CandidateInput {
    fn from(candidate: Option<CaptainCandidate>) -> Self {
        candidate.map_or(CandidateInput::Invalid, CandidateInput::Valid)
    }
}

impl<'de> Deserialize<'de> for CandidateInput {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(CandidateInput::from_value(value))
    }
}

/// Parse a JSON array of candidate records. Only the outer array is required to be
/// well formed; each element is classified on its own.
pub fn parse_candidates_json(raw: &str) -> Result<Vec<CandidateInput>> {
    let values: Vec<Value> =
        serde_json::from_str(raw).context("candidate list must be a JSON array")?;
    Ok(values.into_iter().map(CandidateInput::from_value).collect())
}

// An incoming score is overwritten anyway; don't reject the record over its type.
fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_objects_are_invalid() {
        assert_eq!(CandidateInput::from_value(Value::Null), CandidateInput::Invalid);
        assert_eq!(CandidateInput::from_value(json!({})), CandidateInput::Invalid);
        assert_eq!(CandidateInput::from_value(json!(42)), CandidateInput::Invalid);
        assert_eq!(
            CandidateInput::from_value(json!({"colour": "red"})),
            CandidateInput::Invalid
        );
    }

    #[test]
    fn non_numeric_signals_read_as_missing() {
        let input = CandidateInput::from_value(json!({
            "name": "Saka",
            "form": "7.5",
            "fixtureDifficulty": null,
            "xgiPer90": 0.9,
        }));
        let CandidateInput::Valid(c) = input else {
            panic!("partial record should be valid");
        };
        let signal = c.raw_signal();
        assert_eq!(signal.form, None);
        assert_eq!(signal.fixture_difficulty, None);
        assert_eq!(signal.xgi_per90, Some(0.9));
        assert_eq!(signal.minutes_risk, None);

        // The unusable values are still there, untouched.
        assert_eq!(c.field(FORM), Some(&json!("7.5")));
        assert_eq!(c.field(FIXTURE_DIFFICULTY), Some(&Value::Null));
    }

    #[test]
    fn unknown_fields_are_kept() {
        let input = CandidateInput::from_value(json!({
            "playerId": 7,
            "name": "Palmer",
            "photo": "p7.png",
        }));
        let CandidateInput::Valid(c) = input else {
            panic!("record should be valid");
        };
        assert_eq!(c.field("playerId"), Some(&json!(7)));
        assert_eq!(c.name(), "Palmer");
        assert_eq!(c.team(), "");

        let out = serde_json::to_value(&c).unwrap();
        assert_eq!(
            out,
            json!({"playerId": 7, "name": "Palmer", "photo": "p7.png", "captainScore": 0.0})
        );
    }

    #[test]
    fn incoming_score_of_any_type_is_accepted() {
        let input = CandidateInput::from_value(json!({"name": "Gordon", "captainScore": "high"}));
        let CandidateInput::Valid(c) = input else {
            panic!("record should be valid");
        };
        assert_eq!(c.captain_score, 0.0);
        assert!(c.field("captainScore").is_none());
    }

    #[test]
    fn option_maps_none_to_invalid() {
        assert_eq!(CandidateInput::from(None::<CaptainCandidate>), CandidateInput::Invalid);
        assert!(CandidateInput::from(Some(CaptainCandidate::placeholder())).is_valid());
    }

    #[test]
    fn parse_rejects_non_array() {
        assert!(parse_candidates_json(r#"{"name":"x"}"#).is_err());
        let parsed = parse_candidates_json(r#"[null, {}, {"name":"x"}]"#).unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(parsed[2].is_valid());
    }
}
