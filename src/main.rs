use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cucumber_reportr::{
    AssetProvider, BundledAssets, DirectoryAssets, GeneratorConfig, ReportGenerator,
    ReportOutcome, TracingSink, DEFAULT_OUTPUT_DIR, DEFAULT_TEMPLATE,
};

#[derive(Parser)]
#[command(name = "cucumber-reportr")]
#[command(author, version, about = "Self-contained HTML reports from Cucumber JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a Cucumber JSON record into the HTML report template
    Generate {
        /// Cucumber JSON file written by the test run
        #[arg(short, long)]
        record: PathBuf,

        /// Directory for cucumber-pretty-report.html
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Load the template from this directory instead of the bundled one
        #[arg(long)]
        template_dir: Option<PathBuf>,

        /// Template identifier within the asset source
        #[arg(long, default_value = DEFAULT_TEMPLATE)]
        template: String,

        /// Print a JSON summary of the run to stdout
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            record,
            output_dir,
            template_dir,
            template,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            let config = GeneratorConfig {
                template_id: template,
            };
            let outcome = match template_dir {
                Some(dir) => {
                    let assets = DirectoryAssets::new(dir);
                    info!("Using templates from {:?}", assets.root());
                    run(assets, config, &record, &output_dir)
                }
                None => run(BundledAssets, config, &record, &output_dir),
            };
            finish(outcome, json)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn run<A: AssetProvider>(
    assets: A,
    config: GeneratorConfig,
    record: &std::path::Path,
    output_dir: &std::path::Path,
) -> ReportOutcome {
    ReportGenerator::new(assets, TracingSink)
        .with_config(config)
        .generate(record, output_dir)
}

fn finish(outcome: ReportOutcome, json: bool) -> Result<()> {
    if json {
        let summary =
            serde_json::to_string_pretty(&outcome.summary()).context("Failed to encode summary")?;
        println!("{}", summary);
    }

    match outcome {
        ReportOutcome::Written(path) => {
            info!("Report available at {:?}", path);
            Ok(())
        }
        ReportOutcome::Aborted(error) => {
            anyhow::bail!("Report was not generated ({} stage failed)", error.stage())
        }
    }
}
