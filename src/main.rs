use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use driftdune::alert::{AlertDispatcher, WebhookSink};
use driftdune::config::{Config, ConfigOverrides};
use driftdune::output::csv::plan_to_csv;
use driftdune::output::table::render_plan_table;
use driftdune::output::{render_json, render_report, OutputFormat};
use driftdune::pipeline::{
    finish_stage, run_apply, run_detect, start_stage, AlertOutcome, Stage, EXIT_FATAL,
};
use driftdune::vectors::FileVectorStore;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "driftdune",
    about = "Detect semantic drift between baseline and current prompt embeddings"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(long)]
    suite: Option<String>,
    #[arg(short, long)]
    threshold: Option<f64>,
    #[arg(long, env = "DRIFTDUNE_WEBHOOK")]
    webhook: Option<String>,
    #[arg(long)]
    report: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a starter policy file
    Init,
    /// Show the resolved policy without evaluating anything
    Plan,
    /// Compare a single pair of embedding files
    Detect {
        #[arg(short, long, default_value = "baseline.json")]
        baseline: String,
        #[arg(short, long, default_value = "current.json")]
        current: String,
    },
    /// Run drift analysis over the suite, alert on failures and write the report
    Apply,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    if matches!(cli.command, Commands::Init) {
        Config::write_template(&config_path)?;
        println!("Wrote policy template to {}", config_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if matches!(cli.command, Commands::Apply) {
        start_stage(Stage::LOAD_CONFIG);
        finish_stage(Stage::LOAD_CONFIG, load_config(&cli, &config_path))?
    } else {
        load_config(&cli, &config_path)?
    };

    match &cli.command {
        Commands::Init => unreachable!("init handled before config load"),
        Commands::Plan => {
            if !config_path.exists() {
                warn!(
                    "no policy file at {}, showing defaults",
                    config_path.display()
                );
            }
            match cli.output {
                OutputFormat::Table => println!("{}", render_plan_table(&config)),
                OutputFormat::Json => println!("{}", render_json(&config)?),
                OutputFormat::Csv => print!("{}", plan_to_csv(&config)?),
            }
            println!("No changes made; this is only the resolved policy.");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Detect { baseline, current } => {
            let store = FileVectorStore::new();
            let report = run_detect(&store, baseline, current, &config.resolved_detect_path())?;
            println!("drift_score: {:.4}", report.drift_score);
            info!("all done: 4/4 stages succeeded");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Apply => run_apply_command(&config, cli.output).await,
    }
}

fn load_config(cli: &Cli, config_path: &Path) -> Result<Config> {
    let mut config = Config::load(Some(config_path))?;
    config.apply_overrides(ConfigOverrides {
        prompt_suite: cli.suite.clone(),
        alert_threshold: cli.threshold,
        webhook: cli.webhook.clone(),
        apply_path: cli.report.clone(),
    });
    config.validate()?;
    Ok(config)
}

async fn run_apply_command(config: &Config, format: OutputFormat) -> Result<ExitCode> {
    let store = FileVectorStore::new();
    let dispatcher = config
        .webhook()
        .map(|url| WebhookSink::new(url, config.webhook_timeout()))
        .transpose()?
        .map(|sink| AlertDispatcher::new(Box::new(sink)));

    let outcome = run_apply(config, &store, dispatcher.as_ref()).await?;
    println!("{}", render_report(&outcome.report, format)?);
    info!("report written to {}", outcome.report_path.display());

    match &outcome.alert {
        AlertOutcome::Failed(err) => error!("alert was not delivered: {err}"),
        AlertOutcome::Delivered { attempts } => {
            info!(attempts, "all done: 5/5 stages succeeded")
        }
        AlertOutcome::NoFailures | AlertOutcome::Disabled => {
            info!("all done: stages succeeded, no alert sent")
        }
    }
    Ok(ExitCode::from(outcome.exit_code()))
}
