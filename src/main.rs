//! CLI entry point and command dispatch for orfs.

mod cmd;
mod render;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use orfs::config::OutputFormat;

use cmd::marketing::MarketingArgs;

#[derive(Parser)]
#[command(name = "orfs")]
#[command(version)]
#[command(about = "Validate Open Restaurant Feed Specification feeds", long_about = None)]
#[command(
    after_help = "EXIT CODES:\n    0  feed passed\n    1  validation found problems\n    2  feed or configuration could not be loaded"
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Config file (default: orfs.yaml merged over ~/.config/orfs/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a static JSON feed against a JSON schema
    Static {
        /// Static feed file
        file: PathBuf,
        /// JSON schema file (overrides config)
        #[arg(long, value_name = "PATH")]
        schema: Option<PathBuf>,
    },
    /// Check the structure of a realtime feed (JSON or protocol buffer)
    Realtime {
        /// Realtime feed file
        file: PathBuf,
    },
    /// Validate marketing and narrative fields of a static feed
    Marketing {
        /// Static feed file
        file: PathBuf,
        /// Enable content quality checks on narrative and marketing copy
        #[arg(long)]
        content_quality: bool,
        /// Enable keyword coverage (SEO) checks
        #[arg(long)]
        seo_check: bool,
        /// Enable every optional check
        #[arg(long)]
        all_checks: bool,
        /// Check the feed against this JSON schema first (overrides config)
        #[arg(long, value_name = "PATH")]
        schema: Option<PathBuf>,
        /// Output format (overrides config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Worker threads for per-entity checks (overrides config)
        #[arg(long, short)]
        jobs: Option<usize>,
    },
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli) {
        Ok(passed) => cmd::exit_code(passed),
        Err(err) => {
            eprintln!("{} {:#}", "✗".red(), err);
            cmd::EXIT_ERROR
        }
    };
    let _ = io::Write::flush(&mut io::stdout());
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<bool> {
    if let Commands::Completion { shell } = cli.command {
        cmd_completion(shell);
        return Ok(true);
    }

    let config = cmd::load_config(cli.config.as_deref())?;
    if !config.output.color || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Static { file, schema } => cmd::static_feed::cmd_static(&config, &file, schema),
        Commands::Realtime { file } => cmd::realtime::cmd_realtime(&file),
        Commands::Marketing {
            file,
            content_quality,
            seo_check,
            all_checks,
            schema,
            format,
            jobs,
        } => cmd::marketing::cmd_marketing(
            &config,
            MarketingArgs {
                file,
                content_quality,
                seo_check,
                all_checks,
                schema,
                format,
                jobs,
            },
        ),
        Commands::Completion { .. } => Ok(true),
    }
}

/// Diagnostics go to stderr so stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "orfs=debug" } else { "orfs=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// Generate shell completion script
fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "orfs", &mut io::stdout());
}
