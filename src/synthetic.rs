use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::candidate::{
    CandidateInput, CaptainCandidate, FIXTURE_DIFFICULTY, FORM, MINUTES_RISK, NAME, PLAYER_ID,
    POSITION, TEAM, XGI_PER90,
};

const TEAMS: [&str; 20] = [
    "ARS", "AVL", "BOU", "BRE", "BHA", "CHE", "CRY", "EVE", "FUL", "IPS", "LEI", "LIV", "MCI",
    "MUN", "NEW", "NFO", "SOU", "TOT", "WHU", "WOL",
];

const POSITIONS: [&str; 4] = ["GKP", "DEF", "MID", "FWD"];

/// Deterministic pool of plausible candidates. The same seed always yields the same pool.
pub fn generate_pool(count: usize, seed: u64) -> Vec<CaptainCandidate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|idx| {
            let position = POSITIONS[rng.gen_range(0..POSITIONS.len())];
            let attacking = matches!(position, "MID" | "FWD");
            let xgi_cap: f64 = if attacking { 1.6 } else { 0.5 };
            let price = f64::from(rng.gen_range(40..=150u32)) / 10.0;
            let ownership = (rng.gen_range(0.0..60.0_f64) * 10.0).round() / 10.0;
            let form = (rng.gen_range(0.0..10.0_f64) * 10.0).round() / 10.0;
            let fixture = rng.gen_range(1..=5u8);
            let xgi = (rng.gen_range(0.0..xgi_cap) * 100.0).round() / 100.0;
            let risk = rng.gen_range(0..=100u32);
            CaptainCandidate::default()
                .with(PLAYER_ID, idx + 1)
                .with(NAME, format!("Player {}", idx + 1))
                .with(TEAM, TEAMS[rng.gen_range(0..TEAMS.len())])
                .with(POSITION, position)
                .with("price", price)
                .with("ownership", ownership)
                .with(FORM, form)
                .with(FIXTURE_DIFFICULTY, fixture)
                .with(XGI_PER90, xgi)
                .with(MINUTES_RISK, risk)
        })
        .collect()
}

pub fn generate_inputs(count: usize, seed: u64) -> Vec<CandidateInput> {
    generate_pool(count, seed)
        .into_iter()
        .map(CandidateInput::Valid)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_pool() {
        assert_eq!(generate_pool(50, 7), generate_pool(50, 7));
        assert_ne!(generate_pool(50, 7), generate_pool(50, 8));
    }

    #[test]
    fn generated_signals_are_in_range() {
        for c in generate_pool(300, 1) {
            let raw = c.raw_signal();
            let form = raw.form.unwrap();
            let fixture = raw.fixture_difficulty.unwrap();
            let risk = raw.minutes_risk.unwrap();
            assert!((0.0..=10.0).contains(&form));
            assert!((1.0..=5.0).contains(&fixture));
            assert!(raw.xgi_per90.unwrap() >= 0.0);
            assert!((0.0..=100.0).contains(&risk));
            assert!(!c.name().is_empty());
        }
    }
}
