// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use kg_dispatch::config::{load_and_validate_config, BatchConfig, RuntimeBuilder, Strategy};
use kg_dispatch::engine::{run_single, BatchAggregator};
use kg_dispatch::report::ResultDigest;

#[derive(Parser)]
#[command(
    name = "kg-dispatch",
    version,
    about = "Run symbolic reasoning over knowledge graphs through an external engine"
)]
struct Cli {
    /// Batch config (YAML, or TOML with a .toml extension).
    config: PathBuf,

    /// Directory for result files.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Override the configured scheduling strategy.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Maximum engine processes at once (worker pool only).
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Per-invocation timeout; 0 disables it.
    #[arg(long)]
    timeout_seconds: Option<u64>,

    /// Do not write result files.
    #[arg(long)]
    no_persist: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Sequential,
    WorkerPool,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => Strategy::Sequential,
            StrategyArg::WorkerPool => Strategy::WorkerPool,
        }
    }
}

impl Cli {
    fn apply_overrides(&self, config: &mut BatchConfig) {
        if let Some(dir) = &self.output_dir {
            config.output.directory = Some(dir.clone());
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.executor_options.max_concurrency = Some(max_concurrency);
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            config.engine.timeout_seconds = Some(timeout_seconds);
        }
        if self.no_persist {
            config.output.persist = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Reports go to stdout, diagnostics to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_and_validate_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);

    println!("🚀 Full Data Symbolic Predictions Processor");
    println!("{}", "=".repeat(50));

    let (engine, executor, persister) = RuntimeBuilder::from_config(&config);

    if let [descriptor] = config.graphs.as_slice() {
        println!("Processing {} with full data capture...", descriptor.graph_name());

        return match run_single(engine.as_ref(), descriptor, persister.as_ref()).await {
            Ok(run) => {
                println!("\n{}", ResultDigest::from(&run.result));
                if let Some(path) = run.persisted_to {
                    println!("\n💾 Complete results saved to: {}", path.display());
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                println!("❌ Processing failed: {}", error);
                if let Some(stderr) = error.stderr() {
                    eprintln!("Engine stderr:\n{}", stderr);
                }
                Ok(ExitCode::FAILURE)
            }
        };
    }

    println!("\n🔄 Processing {} Knowledge Graphs", config.graphs.len());
    println!("{}", "-".repeat(50));

    let report = executor
        .execute(engine, config.graphs, BatchAggregator::new(persister))
        .await;

    println!("\n{}", report);
    Ok(ExitCode::SUCCESS)
}
