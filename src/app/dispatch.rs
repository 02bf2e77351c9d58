use crate::cli::{Cli, Commands, CronCommands};
use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::Config;
use crate::compiler::{CompiledJob, CreateJobRequest, JobCompiler, schedule};
use crate::config::RepositoryBackend;
use crate::repository::SqliteJobRepository;

fn read_job_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("read job definition from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(file)
        .with_context(|| format!("read job definition from {}", file.display()))
}

/// Compile a JSON job definition with the configured thresholds.
pub fn compile_job_json(raw: &str, config: &Config) -> Result<CompiledJob> {
    let request: CreateJobRequest =
        serde_json::from_str(raw).context("parse job definition JSON")?;
    let definition = request.into_definition()?;
    let compiled = JobCompiler::new(config.retention).compile(&definition)?;
    Ok(compiled)
}

/// Canonical form of `expression`; `force_seconds` always emits six fields.
pub fn normalize_cron(expression: &str, force_seconds: bool) -> Result<String> {
    let parsed = schedule::parse(expression)?;
    let include_seconds = force_seconds || parsed.second.is_some();
    Ok(schedule::format(&parsed, include_seconds)?)
}

async fn list_statements(config: &Config) -> Result<()> {
    if config.repository.backend != RepositoryBackend::Sqlite {
        bail!("statement outbox requires [repository] backend = \"sqlite\"");
    }

    let repository = SqliteJobRepository::open(&config.outbox_path()).await?;
    let statements = repository.list_statements().await?;
    if statements.is_empty() {
        println!("No submitted statements yet.");
        return Ok(());
    }

    println!("Submitted statements ({}):", statements.len());
    for statement in statements {
        println!(
            "- {} | {}\n    {}",
            statement.id,
            statement.submitted_at.to_rfc3339(),
            statement.statement
        );
    }
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Arc<Config>) -> Result<()> {
    match cli.command {
        Commands::Gateway { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting purgecron gateway on {host} (random port)");
            } else {
                info!("Starting purgecron gateway on {host}:{port}");
            }
            crate::gateway::run_gateway(&host, port, Arc::clone(&config)).await
        }

        Commands::Compile { file } => {
            let raw = read_job_source(&file)?;
            let compiled = compile_job_json(&raw, &config)?;
            for adjustment in &compiled.adjustments {
                let requested = adjustment
                    .requested
                    .map_or_else(|| "unset".to_string(), |value| value.to_string());
                eprintln!(
                    "note: {} raised from {requested} to {}",
                    adjustment.field, adjustment.applied
                );
            }
            println!("{}", compiled.query);
            Ok(())
        }

        Commands::Cron {
            cron_command: CronCommands::Normalize {
                expression,
                seconds,
            },
        } => {
            println!("{}", normalize_cron(&expression, seconds)?);
            Ok(())
        }

        Commands::Statements => list_statements(&config).await,
    }
}
