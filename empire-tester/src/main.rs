mod reports;
mod scenarios;
mod storage;

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use log::debug;

use reports::{Report, ScenarioReport};
use scenarios::{ScenarioCtx, get_scenario, list_scenarios};

#[derive(Debug, Parser)]
#[command(name = "empire-tester", version)]
#[command(about = "Headless QA harness for the Delivery Empire engine")]
struct Args {
    /// Scenarios to run (comma-separated)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations for the open-ended scenarios
    #[arg(long, default_value_t = 25)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn split_csv(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_seeds(input: &str) -> Result<Vec<u64>> {
    split_csv(input)
        .into_iter()
        .map(|raw| {
            raw.parse::<u64>()
                .with_context(|| format!("invalid seed `{raw}`"))
        })
        .collect()
}

fn run_all(args: &Args) -> Result<Report> {
    let seeds = parse_seeds(&args.seeds)?;
    let scenario_names = split_csv(&args.scenarios);
    if scenario_names.is_empty() {
        bail!("no scenarios requested");
    }

    let mut runs = Vec::new();
    for name in &scenario_names {
        let Some(scenario) = get_scenario(name) else {
            bail!("unknown scenario `{name}`; try --list-scenarios");
        };
        for &seed in &seeds {
            debug!("running scenario {name} with seed {seed}");
            let ctx = ScenarioCtx {
                seed,
                iterations: args.iterations,
                verbose: args.verbose,
            };
            let run = match scenario(&ctx) {
                Ok(outcome) => ScenarioReport {
                    scenario: (*name).to_string(),
                    seed,
                    passed: true,
                    deliveries: outcome.deliveries,
                    final_money: outcome.final_money,
                    details: outcome.details,
                },
                Err(err) => ScenarioReport {
                    scenario: (*name).to_string(),
                    seed,
                    passed: false,
                    deliveries: 0,
                    final_money: 0,
                    details: vec![format!("{err:#}")],
                },
            };
            runs.push(run);
        }
    }
    Ok(Report::new(runs))
}

fn emit(report: &Report, args: &Args) -> Result<()> {
    let mut sink: BufWriter<Box<dyn Write>> = match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            BufWriter::new(Box::new(file))
        }
        None => BufWriter::new(Box::new(stdout())),
    };

    match args.report.as_str() {
        "json" => {
            let json = report.to_json().context("serializing report")?;
            writeln!(sink, "{json}")?;
        }
        _ => report.write_console(&mut sink, args.verbose)?,
    }
    sink.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        for (name, desc) in list_scenarios() {
            println!("{}  {desc}", name.bold());
        }
        return Ok(());
    }

    let report = run_all(&args)?;
    emit(&report, &args)?;

    if !report.all_passed() {
        bail!("{} scenario run(s) failed", report.failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_splitting_trims_and_drops_empties() {
        assert_eq!(split_csv("smoke, grind,,timeout "), vec![
            "smoke", "grind", "timeout"
        ]);
    }

    #[test]
    fn seeds_parse_or_explain() {
        assert_eq!(parse_seeds("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert!(parse_seeds("1,banana").is_err());
    }

    #[test]
    fn every_listed_scenario_resolves() {
        for (name, _) in list_scenarios() {
            assert!(get_scenario(name).is_some(), "scenario {name} missing");
        }
        assert!(get_scenario("nonexistent").is_none());
    }

    #[test]
    fn smoke_scenario_passes_under_default_args() {
        let ctx = ScenarioCtx {
            seed: 1337,
            iterations: 5,
            verbose: false,
        };
        let scenario = get_scenario("smoke").unwrap();
        let outcome = scenario(&ctx).unwrap();
        assert_eq!(outcome.deliveries, 1);
        assert!(outcome.final_money > 1_000);
    }
}
