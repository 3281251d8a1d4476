use std::env;

const DEFAULT_TOP_N: i64 = 10;
const DEFAULT_SEED: u64 = 42;

/// Settings for the command-line front end, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub top_n: i64,
    pub optimize: bool,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            optimize: false,
            seed: DEFAULT_SEED,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let top_n = lookup("CAPTAIN_TOP_N")
            .and_then(|val| val.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOP_N)
            .max(1);
        let optimize = lookup("CAPTAIN_OPTIMIZE")
            .map(|val| parse_flag(&val))
            .unwrap_or(false);
        let seed = lookup("CAPTAIN_SEED")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_SEED);
        Self {
            top_n,
            optimize,
            seed,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_env_gives_defaults() {
        assert_eq!(RunConfig::from_lookup(|_| None), RunConfig::default());
    }

    #[test]
    fn env_values_are_parsed_with_floors() {
        let cfg = RunConfig::from_lookup(lookup_from(&[
            ("CAPTAIN_TOP_N", "0"),
            ("CAPTAIN_OPTIMIZE", "TRUE"),
            ("CAPTAIN_SEED", "9"),
        ]));
        assert_eq!(cfg.top_n, 1);
        assert!(cfg.optimize);
        assert_eq!(cfg.seed, 9);
    }

    #[test]
    fn garbage_falls_back() {
        let cfg = RunConfig::from_lookup(lookup_from(&[
            ("CAPTAIN_TOP_N", "lots"),
            ("CAPTAIN_OPTIMIZE", "maybe"),
        ]));
        assert_eq!(cfg.top_n, DEFAULT_TOP_N);
        assert!(!cfg.optimize);
    }
}
