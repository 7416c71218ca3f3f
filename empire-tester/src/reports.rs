//! Report emission for scenario runs.
use std::io::{self, Write};

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

/// One scenario × seed run.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub seed: u64,
    pub passed: bool,
    pub deliveries: u32,
    pub final_money: i64,
    pub details: Vec<String>,
}

/// The full report across every requested run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub passed: usize,
    pub failed: usize,
    pub runs: Vec<ScenarioReport>,
}

impl Report {
    #[must_use]
    pub fn new(runs: Vec<ScenarioReport>) -> Self {
        let passed = runs.iter().filter(|run| run.passed).count();
        let failed = runs.len() - passed;
        Self {
            generated_at: Utc::now().to_rfc3339(),
            passed,
            failed,
            runs,
        }
    }

    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_console(&self, out: &mut dyn Write, verbose: bool) -> io::Result<()> {
        writeln!(out, "{}", "Delivery Empire QA report".bold())?;
        writeln!(out, "generated at {}", self.generated_at)?;
        writeln!(out)?;

        for run in &self.runs {
            let status = if run.passed {
                "PASS".green().bold()
            } else {
                "FAIL".red().bold()
            };
            writeln!(
                out,
                "{status}  {} (seed {}) - {} deliveries, final balance ${}",
                run.scenario, run.seed, run.deliveries, run.final_money
            )?;
            if verbose || !run.passed {
                for line in &run.details {
                    writeln!(out, "      {line}")?;
                }
            }
        }

        writeln!(out)?;
        let summary = format!("{} passed, {} failed", self.passed, self.failed);
        if self.all_passed() {
            writeln!(out, "{}", summary.green())?;
        } else {
            writeln!(out, "{}", summary.red())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_run(passed: bool) -> ScenarioReport {
        ScenarioReport {
            scenario: "smoke".to_string(),
            seed: 1337,
            passed,
            deliveries: 1,
            final_money: 1_425,
            details: vec!["one delivery".to_string()],
        }
    }

    #[test]
    fn report_counts_pass_and_fail() {
        let report = Report::new(vec![sample_run(true), sample_run(false)]);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn json_report_serializes() {
        let report = Report::new(vec![sample_run(true)]);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"scenario\": \"smoke\""));
        assert!(json.contains("\"passed\": 1"));
    }

    #[test]
    fn console_report_writes_without_error() {
        let report = Report::new(vec![sample_run(true), sample_run(false)]);
        let mut buf = Vec::new();
        report.write_console(&mut buf, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("smoke"));
        assert!(text.contains("1 passed, 1 failed"));
    }
}
