//! This module could be a separate crate on its own, it drives the ledger the way a
//! transport adapter would: decode a request, call the ledger, report the outcome.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

use crate::{
    command::{LedgerCommand, LedgerCommandError},
    config::LedgerConfig,
    ledger::{Ledger, LedgerError, orchestrator::TransferOrchestrator},
    store::AccountStore,
};
use csv_parser::{CsvOperationParser, Operation};
use csv_printer::print_balances;
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    CommandErr(#[from] LedgerCommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: LedgerConfig,
    pub error_printer: Box<dyn FnMut(u64, ServiceError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input).context("Failed to read CSV header")?;

        let ledger = TransferOrchestrator::in_memory(self.config);

        for (line, row) in parser {
            let row = row.with_context(|| format!("Malformed record at line {line}"))?;
            if let Err(err) = execute(&ledger, row) {
                (self.error_printer)(line, err);
            }
        }

        print_balances(self.output, ledger.store().accounts())
    }
}

fn execute(ledger: &impl Ledger, row: Operation) -> Result<(), ServiceError> {
    match LedgerCommand::parse(row.kind, row.account, row.to, row.amount)? {
        LedgerCommand::Credit { account, amount } => ledger.credit(&account, amount)?,
        LedgerCommand::Transfer { from, to, amount } => ledger.transfer(&from, &to, amount)?,
        LedgerCommand::Balance { account } => {
            let balance = ledger.balance(&account);
            info!(account = %account, %balance, "balance");
        }
    }
    Ok(())
}
