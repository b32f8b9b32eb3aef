//! `UniKhoj` CLI: terminal front-end for the lead intake form.
//!
//! Talks to the lead API over HTTP through `unikhoj-client`; the form logic
//! itself comes from `unikhoj-core`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod intake;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use unikhoj_client::{ClientConfig, DEFAULT_BASE_URL, LeadClient};

use crate::intake::{Intake, Outcome};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

// ── CLI structure ────────────────────────────────────────────────────

/// UniKhoj: find your university abroad.
#[derive(Parser)]
#[command(
    name = "unikhoj",
    version,
    about = "UniKhoj CLI: fill in the study-abroad intake form from your terminal",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         UNIKHOJ_API_URL   Lead API address (default: {DEFAULT_BASE_URL})\n\n\
         {DIM}Examples:{RESET}\n  \
         unikhoj intake\n  \
         unikhoj --api-url https://api.unikhoj.com health"
    ),
)]
struct Cli {
    /// Lead API address.
    #[arg(long, env = "UNIKHOJ_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value = "10")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the intake form step by step and submit it.
    Intake,
    /// Check that the lead API is up.
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = LeadClient::with_config(ClientConfig {
        base_url: cli.api_url,
        timeout: Duration::from_secs(cli.timeout),
    })
    .context("invalid client configuration")?;

    match cli.command {
        Commands::Intake => cmd_intake(&client).await,
        Commands::Health => cmd_health(&client).await,
    }
}

async fn cmd_intake(client: &LeadClient) -> Result<()> {
    println!();
    println!("{BOLD}{CYAN}UniKhoj{RESET} {DIM}Get matched with universities abroad{RESET}");
    println!("  {DIM}Type 'back' to return to the previous step. Press Enter to keep a value.{RESET}");

    let stdin = io::stdin();
    let mut intake = Intake::new(stdin.lock(), io::stdout());
    match intake.run(client).await? {
        Outcome::Submitted(_) => {
            println!();
            Ok(())
        }
        Outcome::Abandoned => bail!("intake abandoned before submission"),
    }
}

async fn cmd_health(client: &LeadClient) -> Result<()> {
    let health = client
        .health()
        .await
        .with_context(|| format!("lead API at {} is unreachable", client.base_url()))?;

    if !health.is_ok() {
        bail!("lead API reported status '{}'", health.status);
    }

    println!(
        "{GREEN}{BOLD}✓{RESET} lead API is up {DIM}({}, {} ms){RESET}",
        client.base_url(),
        health.latency_ms
    );
    Ok(())
}
