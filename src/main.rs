use anyhow::Result;
use clap::Parser;
use lapsewatch::cli::{Cli, OutputFormat};
use lapsewatch::config::LapseConfig;
use lapsewatch::detector::{Detector, Granularity};
use lapsewatch::{csv_output, json_output, source};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when --fail-on-flagged is set and someone lapsed
const EXIT_FLAGGED: u8 = 2;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let file_config = match &args.config {
        Some(path) => LapseConfig::from_toml(path)?,
        None => LapseConfig::default(),
    };

    // Command-line flags override the config file
    let mut config = file_config.detector_config();
    if let Some(days) = args.threshold_days {
        config.threshold_days = days;
    }
    if args.whole_days {
        config.granularity = Granularity::WholeDays;
    }
    if args.parallel {
        config.parallel = true;
    }

    let detector = Detector::new(config)?;

    let (roster, events) = if args.demo {
        source::demo_dataset(chrono::Utc::now())
    } else {
        let Some(events_path) = &args.events else {
            anyhow::bail!("Must specify --events FILE or --demo. Usage: lapsewatch --events FILE [--roster FILE]");
        };

        let mut roster: std::collections::HashSet<String> =
            file_config.roster.iter().cloned().collect();
        if let Some(path) = &args.roster {
            roster.extend(source::load_roster(path)?);
        }

        (roster, source::load_events(events_path)?)
    };

    let report = detector.analyze(&roster, &events);

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => {
            println!("{}", json_output::JsonReport::from_report(&report).to_json()?)
        }
        OutputFormat::Csv => print!("{}", csv_output::to_csv(&report)),
    }

    if args.fail_on_flagged && !report.is_clean() {
        return Ok(ExitCode::from(EXIT_FLAGGED));
    }

    Ok(ExitCode::SUCCESS)
}
