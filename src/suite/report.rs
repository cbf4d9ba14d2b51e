use std::fmt::Write as _;
use std::time::Duration;

use colored::Colorize;

use crate::errors::{FailureKind, HarnessError};
use crate::suite::Scenario;

const BODY_PREVIEW: usize = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
}

impl From<&HarnessError> for Failure {
    fn from(err: &HarnessError) -> Self {
        let status = match err {
            HarnessError::Assertion { status, .. } => Some(*status),
            _ => None,
        };
        Failure {
            kind: err.kind(),
            message: err.to_string(),
            status,
            body: err.body().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    /// Failed at least once, then passed on a retry.
    Flaky,
    Failed(Failure),
}

#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub group: &'static str,
    pub name: &'static str,
    pub attempts: u32,
    pub duration: Duration,
    pub verdict: Verdict,
}

impl ScenarioOutcome {
    pub fn new(scenario: &Scenario, attempts: u32, duration: Duration, verdict: Verdict) -> Self {
        Self {
            group: scenario.group,
            name: scenario.name,
            attempts,
            duration,
            verdict,
        }
    }

    pub fn title(&self) -> String {
        format!("{} > {}", self.group, self.name)
    }

    pub fn passed(&self) -> bool {
        matches!(self.verdict, Verdict::Passed | Verdict::Flaky)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.verdict {
            Verdict::Failed(f) => Some(f),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<ScenarioOutcome>,
    pub duration: Duration,
}

impl RunReport {
    /// Outcomes are sorted by title so the report does not depend on
    /// completion order.
    pub fn new(mut outcomes: Vec<ScenarioOutcome>, duration: Duration) -> Self {
        outcomes.sort_by_key(|o| o.title());
        Self { outcomes, duration }
    }

    pub fn passed(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Passed))
    }

    pub fn flaky(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Flaky))
    }

    pub fn failed(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Failed(_)))
    }

    pub fn success(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    fn count(&self, f: impl Fn(&Verdict) -> bool) -> usize {
        self.outcomes.iter().filter(|o| f(&o.verdict)).count()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for o in &self.outcomes {
            let ms = o.duration.as_millis();
            match &o.verdict {
                Verdict::Passed => {
                    let _ = writeln!(out, "  {} {} ({ms}ms)", "✓".green(), o.title());
                }
                Verdict::Flaky => {
                    let _ = writeln!(
                        out,
                        "  {} {} ({ms}ms, passed on attempt {})",
                        "~".yellow(),
                        o.title(),
                        o.attempts
                    );
                }
                Verdict::Failed(f) => {
                    let _ = writeln!(out, "  {} {} ({ms}ms)", "✘".red(), o.title().bold());
                    let _ = writeln!(out, "      [{}] {}", f.kind, f.message);
                    if let Some(status) = f.status {
                        let _ = writeln!(out, "      status: {status}");
                    }
                    if let Some(body) = &f.body {
                        let _ = writeln!(out, "      body: {}", preview(body).dimmed());
                    }
                }
            }
        }

        let summary = format!(
            "{} passed, {} flaky, {} failed ({:.2}s)",
            self.passed(),
            self.flaky(),
            self.failed(),
            self.duration.as_secs_f64()
        );
        let _ = writeln!(
            out,
            "\n  {}",
            if self.success() {
                summary.green()
            } else {
                summary.red()
            }
        );
        out
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() <= BODY_PREVIEW {
        body.to_string()
    } else {
        let head: String = body.chars().take(BODY_PREVIEW).collect();
        format!("{head}…")
    }
}
