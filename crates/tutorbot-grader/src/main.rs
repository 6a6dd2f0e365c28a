//! Command-line grader for student handlers.
//!
//! ```text
//! tutorbot-grade                       # every *.json fixture in levels/
//! tutorbot-grade level1.json level3.json
//! tutorbot-grade --handler "python3 student.py" --levels-dir course/levels
//! ```
//!
//! Results go to stdout; logs go to stderr. The exit status reports only
//! whether the grader itself could run (for example, an unreadable levels
//! directory), not whether the levels passed.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tutorbot_grader::{Grader, Summary};
use tutorbot_handler::{HandlerLoader, HandlerSource};

/// Grade a handler against level fixtures.
#[derive(Debug, Parser)]
#[command(name = "tutorbot-grade", version, about)]
struct Cli {
    /// Fixture files to run, relative to the levels directory. Runs every
    /// fixture in the directory when none are given.
    fixtures: Vec<String>,

    /// Directory containing level fixtures.
    #[arg(long, env = "LEVELS_DIR", default_value = "levels")]
    levels_dir: PathBuf,

    /// Handler source: `builtin:<name>` or a command line.
    #[arg(long, env = "HANDLER", default_value = "builtin:starter")]
    handler: HandlerSource,

    /// Per-invocation time limit in milliseconds.
    #[arg(long, env = "HANDLER_TIMEOUT_MS", default_value_t = 10_000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(
        handler = %cli.handler,
        levels_dir = %cli.levels_dir.display(),
        "grader starting"
    );

    let loader = HandlerLoader::new(cli.handler, Duration::from_millis(cli.timeout_ms));
    let grader = Grader::new(loader, cli.levels_dir);

    let names = if cli.fixtures.is_empty() {
        grader.discover()?
    } else {
        cli.fixtures
    };

    let mut summary = Summary::default();
    for name in &names {
        match grader.run_level(name).await {
            Ok(report) => {
                println!("\n{report}");
                summary.record(report.passed());
            }
            Err(e) => {
                error!(fixture = name, error = %e, "could not load level");
                eprintln!("\n== {name} ==\n{e}\nLEVEL FAILED");
                summary.record(false);
            }
        }
    }

    println!("\n{summary}");
    Ok(())
}
