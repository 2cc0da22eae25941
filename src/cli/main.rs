mod commands;

use std::time::Duration;

use anyhow::{Context, Result};
use bank_ledger::telemetry::{LogObserver, Observer};
use bank_ledger::{scenario, Ledger, Session};
use clap::Parser;
use commands::{Args, Command};

fn main() -> Result<()> {
    // Parse the CLI arguments
    let args = Args::parse();

    // Initialize logger with default level of info (can be overridden with RUST_LOG)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = args.ledger_config();
    log::debug!("Using {config:?}");

    // 1. Create the span exporter once for the whole process
    let observer = LogObserver::new(&args.service_name);

    let result = match &args.command {
        Some(Command::Analyze) => {
            let account = scenario::effect_analysis(config, &observer);
            println!("Final balance: {}", account.balance());
            Ok(())
        }
        Some(Command::Race {
            balance,
            amount,
            latency_ms,
        }) => {
            match scenario::race(*balance, *amount, Duration::from_millis(*latency_ms)) {
                Ok(outcome) => {
                    println!("Expected balance:        {}", outcome.expected);
                    println!("Unsynchronized account:  {}", outcome.unsynchronized);
                    println!("Synchronized account:    {}", outcome.synchronized);
                    if outcome.lost_update() {
                        println!("The unsynchronized account lost an update.");
                    }
                    Ok(())
                }
                Err(e) => Err(anyhow::Error::new(e).context("Race scenario could not run")),
            }
        }
        None => interactive(&args, config, &observer),
    };

    // 2. Flush spans before exiting, also when the session failed
    observer.shutdown();
    result
}

fn interactive(
    args: &Args,
    config: bank_ledger::LedgerConfig,
    observer: &LogObserver,
) -> Result<()> {
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();

    let account = Session::new(stdin, stdout, config)
        .run(observer)
        .context("Interactive session failed")?;

    if let (Some(path), Some(account)) = (&args.export_history, account) {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create history file: {}", path.display()))?;
        account
            .export_history(file)
            .context("Failed to export transaction history")?;
        log::info!("Transaction history written to {}", path.display());
    }

    Ok(())
}
