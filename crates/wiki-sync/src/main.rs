//! wiki-sync
//!
//! Publishes a markdown documentation tree to a GitHub wiki: stages the tree
//! into a wiki clone, then rewrites image references into wiki image
//! directives and markdown links into flat page names.

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use tracing_subscriber::EnvFilter;
use wiki_sync::cli::{Cli, Commands};
use wiki_sync::config::{Overrides, Settings, WikiConfig, REPOSITORY_ENV};
use wiki_sync::errors::{self, WikiError};
use wiki_sync::output::{ExitCode, JsonError, JsonOutput, OutputContext};
use wiki_sync::publish::{self, Publisher, RunReport};

/// Default log filter when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "wiki_sync=info";

/// Helper to determine exit code from an error
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    if let Some(wiki_error) = error.downcast_ref::<WikiError>() {
        return JsonError::from_wiki_error(wiki_error, "").exit_code();
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return match io_error.kind() {
            std::io::ErrorKind::NotFound => ExitCode::NotFound,
            _ => ExitCode::ExternalError,
        };
    }

    ExitCode::GenericError
}

fn init_tracing(quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if quiet { "wiki_sync=warn" } else { DEFAULT_LOG_FILTER })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let output = OutputContext::new(cli.quiet, cli.json);
    let command_name = cli.command.name();

    let exit_code = match run(cli, &output) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e, command_name, &output);
            error_to_exit_code(&e)
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn report_error(error: &anyhow::Error, command: &str, output: &OutputContext) {
    let wiki_error = error.downcast_ref::<WikiError>();

    if output.is_json() {
        let json_error = match wiki_error {
            Some(wiki_error) => JsonError::from_wiki_error(wiki_error, command),
            None => JsonError::new("GENERIC_ERROR", format!("{:#}", error), command),
        };
        match json_error.to_json_string() {
            Ok(json) => println!("{}", json),
            Err(_) => {
                let _ = output.print_error(format!("{:#}", error));
            }
        }
        return;
    }

    match wiki_error {
        Some(wiki_error) => eprint!("{}", errors::explain(wiki_error)),
        None => {
            let _ = output.print_error(format!("{:#}", error));
        }
    }
}

fn run(cli: Cli, output: &OutputContext) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => WikiConfig::load(path)?,
        None => {
            let current_dir = env::current_dir().context("Failed to read current directory")?;
            WikiConfig::load_from_dir(&current_dir)?
        }
    };
    let env_repository = env::var(REPOSITORY_ENV).ok();
    let command_name = cli.command.name();

    match cli.command {
        Commands::Publish {
            source,
            wiki,
            repository,
            base_url,
        } => {
            let overrides = Overrides {
                source_dir: source,
                wiki_dir: wiki,
                repository,
                base_url,
            };
            let settings = Settings::resolve(&config, &overrides, env_repository);
            tracing::debug!(?settings, "resolved settings");

            let report = publish::publish(&settings)?;
            finish(&report, &settings, command_name, output)
        }
        Commands::Rewrite {
            root,
            repository,
            base_url,
        } => {
            let overrides = Overrides {
                wiki_dir: Some(root),
                repository,
                base_url,
                ..Default::default()
            };
            let settings = Settings::resolve(&config, &overrides, env_repository);

            let report = Publisher::new(&settings.wiki_dir, &settings.base_url).rewrite_tree()?;
            finish(&report, &settings, command_name, output)
        }
        Commands::Preview {
            file,
            root,
            repository,
            base_url,
        } => {
            let overrides = Overrides {
                wiki_dir: root,
                repository,
                base_url,
                ..Default::default()
            };
            let settings = Settings::resolve(&config, &overrides, env_repository);

            let content =
                Publisher::new(&settings.wiki_dir, &settings.base_url).preview_file(&file)?;
            if output.is_json() {
                let data = serde_json::json!({
                    "file": file,
                    "base_url": settings.base_url,
                    "content": content,
                });
                println!("{}", JsonOutput::success(data, command_name).to_json_string()?);
            } else {
                // Content is printed as-is, it already ends with the file's own newline
                print!("{}", content);
            }
            Ok(ExitCode::Success)
        }
    }
}

/// Print the run summary (or JSON report) and pick the exit code.
fn finish(
    report: &RunReport,
    settings: &Settings,
    command: &str,
    output: &OutputContext,
) -> Result<ExitCode> {
    if output.is_json() {
        let data = serde_json::json!({
            "root": settings.wiki_dir,
            "base_url": settings.base_url,
            "report": report,
        });
        let json = if report.is_clean() {
            JsonOutput::success(data, command).to_json_string()?
        } else {
            JsonOutput::partial(data, command).to_json_string()?
        };
        println!("{}", json);
    } else {
        if let Some(copied) = report.files_copied {
            output.print_info(format!(
                "Staged {} file(s) into {}",
                copied,
                settings.wiki_dir.display()
            ))?;
        }
        output.print_data(format!(
            "Rewrote {} of {} markdown file(s) in {}",
            report.files_rewritten,
            report.files_scanned,
            settings.wiki_dir.display()
        ))?;
        for failure in &report.failures {
            output.print_warning(format!(
                "skipped {}: {}",
                failure.path.display(),
                failure.error
            ))?;
        }
    }

    if report.is_clean() {
        Ok(ExitCode::Success)
    } else {
        if !output.is_json() {
            eprint!("{}", errors::files_failed(report.failures.len()));
        }
        Ok(ExitCode::FilesFailed)
    }
}
