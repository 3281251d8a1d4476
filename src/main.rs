use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use fpl_captain::batch::{ScoreOptions, score_batch, top_n};
use fpl_captain::benchmark::benchmark_with;
use fpl_captain::candidate::{CandidateInput, parse_candidates_json};
use fpl_captain::config::RunConfig;
use fpl_captain::logging;
use fpl_captain::score::ScoringConfig;
use fpl_captain::synthetic;

const DEFAULT_SYNTHETIC_POOL: usize = 650;

struct CliArgs {
    input: Option<PathBuf>,
    synthetic: Option<usize>,
    top: Option<i64>,
    optimize: bool,
    bench: bool,
    json: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_logging()?;

    let run = RunConfig::from_env();
    let args = parse_args(std::env::args().skip(1).collect())?;

    let inputs = load_inputs(&args, &run)?;
    let options = ScoreOptions {
        optimize: args.optimize || run.optimize,
    };
    let config = ScoringConfig::STANDARD;

    let batch = score_batch(&config, &inputs, options);
    tracing::info!(
        "Scored {} candidates ({} malformed)",
        batch.candidates.len(),
        batch.malformed_records
    );

    let n = args.top.unwrap_or(run.top_n);
    let leaders = top_n(&batch.candidates, n);

    if args.json {
        let out = serde_json::to_string_pretty(&leaders).context("serialize leaderboard")?;
        println!("{out}");
    } else {
        println!("Captain picks (top {})", leaders.len());
        for (rank, c) in leaders.iter().enumerate() {
            println!(
                "{:>3}. {:<24} {:<4} {:<4} {:>5.1}",
                rank + 1,
                c.name(),
                c.team(),
                c.position(),
                c.captain_score
            );
        }
        if batch.malformed_records > 0 {
            println!("Malformed records: {}", batch.malformed_records);
        }
    }

    if args.bench {
        let report = benchmark_with(&config, &inputs, options);
        println!(
            "Benchmark: {} candidates in {:.3} ms (target met: {})",
            report.candidates_processed, report.processing_time_ms, report.meets_performance_target
        );
    }

    Ok(())
}

fn load_inputs(args: &CliArgs, run: &RunConfig) -> Result<Vec<CandidateInput>> {
    if let Some(path) = &args.input {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read candidates from {}", path.display()))?;
        return parse_candidates_json(&raw)
            .with_context(|| format!("parse candidates in {}", path.display()));
    }
    let count = args.synthetic.unwrap_or(DEFAULT_SYNTHETIC_POOL);
    Ok(synthetic::generate_inputs(count, run.seed))
}

fn parse_args(args: Vec<String>) -> Result<CliArgs> {
    let mut out = CliArgs {
        input: None,
        synthetic: None,
        top: None,
        optimize: false,
        bench: false,
        json: false,
    };

    let mut idx = 0;
    while idx < args.len() {
        let arg = args[idx].as_str();
        let (name, inline) = match arg.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (arg, None),
        };
        let mut value = || -> Result<String> {
            if let Some(v) = inline.clone() {
                return Ok(v);
            }
            idx += 1;
            args.get(idx)
                .cloned()
                .with_context(|| format!("{name} needs a value"))
        };
        match name {
            "--input" => out.input = Some(PathBuf::from(value()?.trim())),
            "--synthetic" => {
                let raw = value()?;
                out.synthetic = Some(
                    raw.trim()
                        .parse()
                        .with_context(|| format!("invalid --synthetic count: {raw}"))?,
                );
            }
            "--top" => {
                let raw = value()?;
                out.top = Some(
                    raw.trim()
                        .parse()
                        .with_context(|| format!("invalid --top value: {raw}"))?,
                );
            }
            "--optimize" => out.optimize = true,
            "--bench" => out.bench = true,
            "--json" => out.json = true,
            other => bail!("unknown argument: {other}"),
        }
        idx += 1;
    }

    if out.input.is_some() && out.synthetic.is_some() {
        bail!("--input and --synthetic are mutually exclusive");
    }
    Ok(out)
}
