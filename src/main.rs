use std::process::ExitCode;

use clap::Parser;

use series_organizer::cli::Cli;
use series_organizer::console;
use series_organizer::link_engine::{LinkEngine, RunOutcome};
use series_organizer::materialize::LinkReport;
use series_organizer::{logging, prompt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if !cli.source_dir.is_dir() {
        console::error(format!("Not a directory: {}", cli.source_dir.display()));
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let engine = LinkEngine::new(cli.into_config()?)?;

    console::header("Scanning for files...");
    let outcome = engine
        .run(|plan| {
            console::header("These links will be created:");
            console::list(plan.destinations().map(|path| path.display()));
            Ok(prompt::confirm("Continue?")?)
        })
        .await?;

    match outcome {
        RunOutcome::NothingMatched => console::warning("No matching files found"),
        RunOutcome::Aborted => println!("Aborting..."),
        RunOutcome::Completed(report) => print_summary(&report),
    }
    Ok(())
}

fn print_summary(report: &LinkReport) {
    let total = report.created + report.failures.len();
    println!("Summary: {} of {} links created", report.created, total);

    if !report.is_success() {
        console::header("Failed links:");
        for failure in &report.failures {
            console::warning(format!(
                "{} -> {}: {}",
                failure.source.display(),
                failure.destination.display(),
                failure.error
            ));
        }
    }
}
