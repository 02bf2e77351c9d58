use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `purgecron` - compiles retention cleanup jobs into scheduler registrations.
#[derive(Parser, Debug)]
#[command(name = "purgecron")]
#[command(version = "0.1.0")]
#[command(about = "Compile retention cleanup jobs into pg_cron registrations.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway
    Gateway {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Compile a job definition (JSON) and print the registration statement
    Compile {
        /// Path to the job JSON, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        file: PathBuf,
    },

    /// Cron expression utilities
    Cron {
        #[command(subcommand)]
        cron_command: CronCommands,
    },

    /// List statements recorded in the SQLite outbox
    Statements,
}

/// Cron subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CronCommands {
    /// Validate an expression and print it in canonical form
    Normalize {
        /// 5-field or 6-field cron expression
        expression: String,

        /// Always emit a leading seconds field
        #[arg(long)]
        seconds: bool,
    },
}
