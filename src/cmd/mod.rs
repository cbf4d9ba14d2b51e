use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::config::SuiteConfig;
use crate::errors::Result;
use crate::suite::{self, RunReport, Selection, SuiteRunner};

/// CLI
#[derive(Parser, Debug, Default)]
#[command(
    name = "dogapi-suite",
    version,
    about = "Run the Dog API end-to-end scenarios.",
    long_about = "Run the Dog API end-to-end scenarios.\n\n\
Every scenario issues real HTTP requests against BASE_URL (default https://dogapi.dog)\n\
and checks status codes, body shape and pagination metadata.\n\n\
Configuration: defaults < --config YAML < environment (.env, BASE_URL, CI, PROXY_*) < flags"
)]
pub struct Cli {
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Only run scenarios whose "group > name" title contains PATTERN
    #[arg(long = "grep", short = 'g', value_name = "PATTERN")]
    pub grep: Option<String>,

    /// Focus on a scenario by name or title (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    #[arg(long = "workers", short = 'j', value_name = "N")]
    pub workers: Option<usize>,

    #[arg(long = "retries", value_name = "N")]
    pub retries: Option<u32>,

    /// Print the selected scenarios and exit
    #[arg(long = "list")]
    pub list: bool,
}

impl Cli {
    /// Flags win over every other configuration layer.
    pub fn apply(&self, cfg: &mut SuiteConfig) {
        if let Some(url) = &self.base_url {
            cfg.base_url = url.clone();
        }
        if let Some(n) = self.workers {
            cfg.workers = Some(n);
        }
        if let Some(n) = self.retries {
            cfg.retries = Some(n);
        }
    }

    pub fn selection(&self) -> Selection {
        Selection {
            grep: self.grep.clone(),
            only: self.only.clone(),
        }
    }
}

/// Resolve configuration, select scenarios and run them.
/// Returns `None` when only listing.
#[instrument(skip_all)]
pub async fn run_suite(cli: &Cli) -> Result<Option<RunReport>> {
    let mut cfg = SuiteConfig::resolve(cli.config.as_deref())?;
    cli.apply(&mut cfg);
    cfg.validate()?;
    debug!(?cfg, "resolved configuration");

    let scenarios = cli.selection().apply(suite::all(), cfg.forbid_only())?;

    if cli.list {
        for s in &scenarios {
            println!("{}", s.title());
        }
        return Ok(None);
    }

    info!(count = scenarios.len(), "selected scenarios");
    let report = SuiteRunner::new(cfg).run(scenarios).await;
    Ok(Some(report))
}
