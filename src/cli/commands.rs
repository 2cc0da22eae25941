use bank_ledger::{LedgerConfig, ValidationPolicy};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bank-ledger",
    author,
    version,
    about = "A toy bank account with deposit, withdraw and balance operations",
    long_about = None,
    after_help = "TELEMETRY:\n    Span records are written to the log at info level.\n    Use RUST_LOG=warn to hide them:\n\n    RUST_LOG=warn bank-ledger --variant original"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Account behaviour preset
    #[arg(long, value_enum, default_value_t = Variant::Patched)]
    pub variant: Variant,

    /// Override the preset's validation policy
    #[arg(long, value_enum)]
    pub policy: Option<Policy>,

    /// Warn when a withdrawal leaves the balance below this amount ("none" turns the warning off)
    #[arg(long, value_name = "AMOUNT|none", value_parser = parse_threshold)]
    pub low_balance_threshold: Option<Threshold>,

    /// Write the transaction history as CSV to this file on exit
    #[arg(long, value_name = "FILE")]
    pub export_history: Option<PathBuf>,

    /// Service name attached to exported spans
    #[arg(long, default_value = "bank-ledger")]
    pub service_name: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the scripted effect analysis and export its spans
    Analyze,
    /// Race two concurrent deposits against an unsynchronized and a synchronized account
    Race {
        #[arg(long, default_value_t = Decimal::from(1000))]
        balance: Decimal,
        #[arg(long, default_value_t = Decimal::from(100))]
        amount: Decimal,
        #[arg(long, default_value_t = 50)]
        latency_ms: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Lenient checks, no history, negative opening balance kept
    Original,
    /// Strict checks, copied history, opening balance clamped, low balance warning
    Patched,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    Lenient,
    Strict,
}

/// Value of `--low-balance-threshold`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    Disabled,
    Below(Decimal),
}

fn parse_threshold(value: &str) -> Result<Threshold, String> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(Threshold::Disabled);
    }
    value
        .parse::<Decimal>()
        .map(Threshold::Below)
        .map_err(|e| format!("expected an amount or \"none\": {e}"))
}

impl Args {
    pub fn ledger_config(&self) -> LedgerConfig {
        let mut config = match self.variant {
            Variant::Original => LedgerConfig::original(),
            Variant::Patched => LedgerConfig::patched(),
        };
        if let Some(policy) = self.policy {
            config = config.with_validation(match policy {
                Policy::Lenient => ValidationPolicy::Lenient,
                Policy::Strict => ValidationPolicy::Strict,
            });
        }
        match self.low_balance_threshold {
            Some(Threshold::Disabled) => config = config.with_low_balance_threshold(None),
            Some(Threshold::Below(amount)) => {
                config = config.with_low_balance_threshold(Some(amount));
            }
            None => {}
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config_from(args: &[&str]) -> LedgerConfig {
        let argv = std::iter::once("bank-ledger").chain(args.iter().copied());
        Args::try_parse_from(argv).unwrap().ledger_config()
    }

    #[test]
    fn test_patched_keeps_preset_threshold() {
        assert_eq!(
            config_from(&[]).low_balance_threshold,
            Some(Decimal::ONE_HUNDRED)
        );
    }

    #[test]
    fn test_threshold_can_be_replaced() {
        let config = config_from(&["--low-balance-threshold", "250"]);
        assert_eq!(config.low_balance_threshold, Some(dec!(250)));
    }

    #[test]
    fn test_threshold_none_turns_warning_off() {
        let config = config_from(&["--variant", "patched", "--low-balance-threshold", "none"]);
        assert_eq!(config.low_balance_threshold, None);
        assert!(config.is_strict());
    }

    #[test]
    fn test_threshold_rejects_garbage() {
        let argv = ["bank-ledger", "--low-balance-threshold", "lots"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
