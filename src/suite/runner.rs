use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{info, info_span, warn, Instrument};

use crate::api::DogApi;
use crate::config::SuiteConfig;
use crate::errors::{HarnessError, Result};
use crate::suite::report::{Failure, RunReport, ScenarioOutcome, Verdict};
use crate::suite::Scenario;

/// Runs scenarios concurrently, at most `config.workers()` at a time. Every
/// attempt runs on its own tokio task with its own request context.
#[derive(Debug, Clone)]
pub struct SuiteRunner {
    config: Arc<SuiteConfig>,
}

impl SuiteRunner {
    pub fn new(config: SuiteConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub async fn run(&self, scenarios: Vec<Scenario>) -> RunReport {
        let t0 = Instant::now();
        let workers = self.config.workers();
        info!(
            scenarios = scenarios.len(),
            workers,
            retries = self.config.retries(),
            base_url = %self.config.base_url,
            "starting suite"
        );

        let outcomes: Vec<ScenarioOutcome> = stream::iter(scenarios)
            .map(|scenario| run_scenario(Arc::clone(&self.config), scenario))
            .buffer_unordered(workers)
            .collect()
            .await;

        let report = RunReport::new(outcomes, t0.elapsed());
        info!(
            passed = report.passed(),
            flaky = report.flaky(),
            failed = report.failed(),
            total_ms = report.duration.as_millis() as u64,
            "suite finished"
        );
        report
    }
}

/// Run one scenario, re-running it from scratch up to `config.retries()`
/// times while it keeps failing. A panic fails the attempt, not the suite.
pub async fn run_scenario(config: Arc<SuiteConfig>, scenario: Scenario) -> ScenarioOutcome {
    let retries = config.retries();
    let started = Instant::now();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let span = info_span!("scenario", title = %scenario.title(), attempt);

        let attempt_config = Arc::clone(&config);
        let task = tokio::spawn(
            async move {
                let api = DogApi::from_config(&attempt_config)?;
                scenario.run(api).await
            }
            .instrument(span),
        );
        let result: Result<()> = match task.await {
            Ok(result) => result,
            Err(join_err) => Err(HarnessError::Panicked(join_err.to_string())),
        };

        match result {
            Ok(()) => {
                let verdict = if attempt > 1 {
                    Verdict::Flaky
                } else {
                    Verdict::Passed
                };
                return ScenarioOutcome::new(&scenario, attempt, started.elapsed(), verdict);
            }
            Err(err) if attempt <= retries => {
                warn!(
                    scenario = %scenario.title(),
                    attempt,
                    kind = %err.kind(),
                    "scenario failed, retrying: {err}"
                );
            }
            Err(err) => {
                warn!(
                    scenario = %scenario.title(),
                    attempt,
                    kind = %err.kind(),
                    "scenario failed: {err}"
                );
                return ScenarioOutcome::new(
                    &scenario,
                    attempt,
                    started.elapsed(),
                    Verdict::Failed(Failure::from(&err)),
                );
            }
        }
    }
}
