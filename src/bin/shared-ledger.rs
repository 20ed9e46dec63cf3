use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shared_ledger::{
    bin_utils::{Service, ServiceError},
    config::{LedgerConfig, LockingStrategy},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Replays credit, transfer and balance operations from a CSV file and prints the
/// resulting balances.
#[derive(Parser)]
#[command(name = "shared-ledger", version, about)]
struct Cli {
    /// CSV file with `type, account, to, amount` columns
    input: PathBuf,

    /// How transfers are serialized
    #[arg(long, env = "LEDGER_LOCKING", value_enum, default_value_t = LockingArg::Global)]
    locking: LockingArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum LockingArg {
    Global,
    Ordered,
}

impl From<LockingArg> for LockingStrategy {
    fn from(arg: LockingArg) -> Self {
        match arg {
            LockingArg::Global => LockingStrategy::Global,
            LockingArg::Ordered => LockingStrategy::Ordered,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open `{}`", cli.input.display()))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        config: LedgerConfig {
            locking: cli.locking.into(),
        },
        error_printer: Box::new(|line, err| {
            match err {
                ServiceError::CommandErr(err) => {
                    eprintln!("Error at line {line}: {err}")
                }
                ServiceError::LedgerErr(err) => {
                    // rejected operations are business outcomes, not technical errors
                    debug!(line, %err, "operation rejected");
                }
            }
        }),
    };
    service.run()
}
