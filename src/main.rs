use anyhow::{Context, Result};
use clap::Parser;
use perfcmp::cli::{AnalyzeArgs, Cli, Command, CompareArgs, OutputFormat};
use perfcmp::config::AnalysisConfig;
use perfcmp::csv_output::{CsvPairedOutput, CsvSummaryOutput};
use perfcmp::filter::NameFilter;
use perfcmp::json_output::JsonOutput;
use perfcmp::report;
use perfcmp::session::{AnalysisSession, ComparisonSession};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code when `--fail-on-critical` is set and the alert fires
const EXIT_SIGNIFICANT_DEVIATION: u8 = 2;

/// Initialize tracing subscriber for debug output
///
/// `--debug` turns on TRACE; otherwise `RUST_LOG` decides, if set.
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_toml(path)?,
        None => AnalysisConfig::default(),
    };

    let config = cli.apply_overrides(config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Invalid command-line settings")?;
    Ok(config)
}

fn run_analyze(args: &AnalyzeArgs, config: &AnalysisConfig) -> Result<()> {
    args.validate().map_err(|e| anyhow::anyhow!(e))?;

    let session = AnalysisSession::from_file(&args.file, config)?;
    let metrics = session.metrics(config);
    let matches = args
        .search
        .as_deref()
        .map(|term| session.search(&NameFilter::new(term)));

    match args.format {
        OutputFormat::Text => {
            println!(
                "📊 {} (version {}, {} records)\n",
                session.source(),
                session.dataset().label(),
                session.dataset().len()
            );
            print!("{}", metrics.to_report_string());
            println!("\n{}", report::summaries_to_string(session.summaries()));
            if let (Some(term), Some(matches)) = (&args.search, &matches) {
                println!("🔍 Matches for \"{}\" ({}):", term, matches.len());
                print!("{}", report::records_to_string(matches));
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                JsonOutput::analysis(&session, metrics, matches).to_json()?
            );
        }
        OutputFormat::Csv => {
            let output: CsvSummaryOutput = session.summaries().iter().cloned().collect();
            print!("{}", output.to_csv()?);
        }
    }

    Ok(())
}

/// Returns whether the significant-deviation alert was raised
fn run_compare(args: &CompareArgs, config: &AnalysisConfig) -> Result<bool> {
    let session = ComparisonSession::from_files(&args.baseline, &args.candidate, config)?;
    let filter = NameFilter::from_option(args.search.as_deref());

    let Some(report) = session.compare(config, &filter) else {
        anyhow::bail!(
            "Nothing to compare: {} has {} records, {} has {} records",
            args.baseline.display(),
            session.baseline().dataset().len(),
            args.candidate.display(),
            session.candidate().dataset().len()
        );
    };
    let alert = report.significant_deviation;

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", JsonOutput::comparison(report).to_json()?),
        OutputFormat::Csv => {
            let output: CsvPairedOutput = report.metrics.paired_tests.into_iter().collect();
            print!("{}", output.to_csv()?);
        }
    }

    Ok(alert)
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;

    match &cli.command {
        Command::Analyze(args) => {
            run_analyze(args, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare(args) => {
            let alert = run_compare(args, &config)?;
            if alert && args.fail_on_critical {
                tracing::info!("significant deviation, failing as requested");
                Ok(ExitCode::from(EXIT_SIGNIFICANT_DEVIATION))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
