use clap::Parser;
use dogapi_suite::cmd::{run_suite, Cli};
use dogapi_suite::log::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let Some(report) = run_suite(&cli).await? else {
        return Ok(());
    };

    println!("{}", report.render());
    if !report.success() {
        std::process::exit(1);
    }
    Ok(())
}
