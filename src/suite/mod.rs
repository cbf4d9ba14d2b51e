//! Declarative scenario suite.
//!
//! A [`Scenario`] is one independent arrange/act/assert case. Scenarios share
//! nothing: each run gets its own [`DogApi`] built from the suite
//! configuration, and one failing never affects another.

pub mod report;
pub mod runner;
pub mod scenarios;

use futures::future::BoxFuture;

use crate::api::DogApi;
use crate::errors::{HarnessError, Result};

pub use report::{Failure, RunReport, ScenarioOutcome, Verdict};
pub use runner::{run_scenario, SuiteRunner};

pub type ScenarioFuture = BoxFuture<'static, Result<()>>;

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub group: &'static str,
    pub name: &'static str,
    run: fn(DogApi) -> ScenarioFuture,
}

impl Scenario {
    pub const fn new(
        group: &'static str,
        name: &'static str,
        run: fn(DogApi) -> ScenarioFuture,
    ) -> Self {
        Self { group, name, run }
    }

    /// `group > name`, the form used in reports and by `--grep`.
    pub fn title(&self) -> String {
        format!("{} > {}", self.group, self.name)
    }

    pub fn run(&self, api: DogApi) -> ScenarioFuture {
        (self.run)(api)
    }
}

/// Every scenario the suite knows about, in declaration order.
pub fn all() -> Vec<Scenario> {
    scenarios::registry()
}

/// Which scenarios to run.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Substring matched against the title.
    pub grep: Option<String>,
    /// Focused scenarios, by name or title. Empty means no focus.
    pub only: Vec<String>,
}

impl Selection {
    pub fn apply(&self, scenarios: Vec<Scenario>, forbid_only: bool) -> Result<Vec<Scenario>> {
        if !self.only.is_empty() && forbid_only {
            return Err(HarnessError::ConfigError(
                "focused scenarios (--only) are not allowed when forbid_only is set".to_string(),
            ));
        }

        let selected: Vec<Scenario> = scenarios
            .into_iter()
            .filter(|s| {
                self.only.is_empty()
                    || self
                        .only
                        .iter()
                        .any(|o| o == s.name || *o == s.title())
            })
            .filter(|s| match &self.grep {
                Some(pat) => s.title().contains(pat.as_str()),
                None => true,
            })
            .collect();

        if selected.is_empty() {
            return Err(HarnessError::ConfigError(
                "no scenarios match the selection".to_string(),
            ));
        }
        Ok(selected)
    }
}
