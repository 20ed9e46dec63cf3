use std::io::Read;

use crate::{account::AccountId, command::OperationKind};
use csv::{StringRecord, StringRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub account: Option<AccountId>,
    pub to: Option<AccountId>,
    pub amount: Option<Decimal>,
}

/// Parses an operation list in CSV format, yielding each row with the line it
/// starts on.
pub struct CsvOperationParser<R> {
    headers: StringRecord,
    iter: StringRecordsIntoIter<R>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> csv::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        let headers = reader.headers()?.clone();

        Ok(Self {
            headers,
            iter: reader.into_records(),
        })
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.iter.next()?;
        let line = match &record {
            Ok(record) => record.position().map(|pos| pos.line()),
            Err(err) => err.position().map(|pos| pos.line()),
        }
        .unwrap_or_default();
        Some((line, record.and_then(|r| r.deserialize(Some(&self.headers)))))
    }
}
