//! gb - guarded git branching workflows
//!
//! CLI entry point. Wires logging, configuration, and the workflow
//! orchestrator, then prints one styled status line per invocation.

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use brancher::cli::{Cli, Command};
use brancher::config::Config;
use brancher::git::GitClient;
use brancher::workflow::{FlowError, Workflow};

fn setup_logging(verbose: bool) -> Result<()> {
    // Logs go to stderr so stdout stays clean for status lines
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let git = GitClient::new(&cli.repo, &config.remote);
    let mut workflow = Workflow::new(git);
    workflow.notifier_mut().subscribe(|event| match event.error() {
        Some(err) => info!(command = event.name(), %err, "command finished with error"),
        None => info!(command = event.name(), "command finished"),
    });

    let command = cli.command.name();
    let outcome = match &cli.command {
        Command::Task { name } => workflow.start_task(name.as_deref()).await.map(|task| {
            format!(
                "okidoki, on {} now. please start the task! call `gb task-done` when ready.",
                task.name().cyan()
            )
        }),
        Command::TaskDone => workflow
            .finish_task()
            .await
            .map(|task| format!("nice. thanks for the task! {} is merged into dev.", task.name().cyan())),
        Command::Fix { name } => workflow.start_fix(name.as_deref()).await.map(|fix| {
            format!(
                "okidoki, on {} now. please start the fix! call `gb fix-done` when ready.",
                fix.name().cyan()
            )
        }),
        Command::FixDone => workflow.finish_fix().await.map(|release| {
            format!(
                "nice. thanks for the fix! merged into {} and dev.",
                release.name().cyan()
            )
        }),
        Command::FixPush => workflow
            .push_fix()
            .await
            .map(|release| format!("pushed {} and dev to the remote.", release.name().cyan())),
        Command::NewRelease => workflow
            .start_release()
            .await
            .map(|release| format!("created {}, you are on it now.", release.name().cyan())),
    };

    match outcome {
        Ok(message) => {
            println!("{} {}", "✓".green(), message);
            Ok(())
        }
        Err(err) => {
            eprintln!("{} gb {}: {}", "✗".red(), command, err);
            if let FlowError::MergeConflict { paths, .. } = &err {
                for path in paths {
                    eprintln!("    {}", path.yellow());
                }
            }
            std::process::exit(1);
        }
    }
}
