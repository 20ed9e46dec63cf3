use std::{io::Write, sync::Arc};

use crate::account::Account;
use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct AccountBalance<'a> {
    account: &'a str,
    balance: Decimal,
}

/// Writes one `account,balance` row per account, ordered by account id.
pub fn print_balances<W>(output: &mut W, mut accounts: Vec<Arc<Account>>) -> anyhow::Result<()>
where
    W: Write,
{
    accounts.sort_by(|a, b| a.id().cmp(b.id()));

    let mut writer = Writer::from_writer(output);
    for acc in &accounts {
        let row = AccountBalance {
            account: acc.id(),
            balance: acc.balance().normalize(),
        };
        writer
            .serialize(&row)
            .with_context(|| format!("Failed to write balance of `{}`", acc.id()))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
