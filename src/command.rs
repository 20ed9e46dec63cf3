use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::AccountId;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Credit,
    Transfer,
    Balance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Credit {
        account: AccountId,
        amount: Decimal,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
    Balance {
        account: AccountId,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerCommandError {
    #[error("Account is required for {kind:?}")]
    AccountRequired { kind: OperationKind },
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Destination account is required for Transfer")]
    CounterpartyRequired,
    #[error("Destination account is not allowed for {kind:?}")]
    UnexpectedCounterparty { kind: OperationKind },
}

impl LedgerCommand {
    /// Only checks that the record is complete. Amount sign and self transfers are
    /// left to the ledger.
    pub fn parse(
        kind: OperationKind,
        account: Option<AccountId>,
        counterparty: Option<AccountId>,
        amount: Option<Decimal>,
    ) -> Result<Self, LedgerCommandError> {
        let account = non_empty(account).ok_or(LedgerCommandError::AccountRequired { kind })?;
        let counterparty = non_empty(counterparty);

        match kind {
            OperationKind::Transfer => {
                let to = counterparty.ok_or(LedgerCommandError::CounterpartyRequired)?;
                let amount = amount.ok_or(LedgerCommandError::AmountRequired { kind })?;
                Ok(Self::Transfer {
                    from: account,
                    to,
                    amount,
                })
            }
            _ if counterparty.is_some() => {
                Err(LedgerCommandError::UnexpectedCounterparty { kind })
            }
            OperationKind::Credit => {
                let amount = amount.ok_or(LedgerCommandError::AmountRequired { kind })?;
                Ok(Self::Credit { account, amount })
            }
            OperationKind::Balance => Ok(Self::Balance { account }),
        }
    }
}

fn non_empty(value: Option<AccountId>) -> Option<AccountId> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn some(s: &str) -> Option<AccountId> {
        Some(s.to_string())
    }

    #[test]
    fn parse_complete_records() {
        assert_eq!(
            LedgerCommand::parse(OperationKind::Credit, some("a"), None, Some(dec!(1.5))).unwrap(),
            LedgerCommand::Credit {
                account: "a".to_string(),
                amount: dec!(1.5)
            }
        );
        assert_eq!(
            LedgerCommand::parse(OperationKind::Transfer, some("a"), some("b"), Some(dec!(2)))
                .unwrap(),
            LedgerCommand::Transfer {
                from: "a".to_string(),
                to: "b".to_string(),
                amount: dec!(2)
            }
        );
        // balance ignores the amount column
        assert_eq!(
            LedgerCommand::parse(OperationKind::Balance, some("a"), None, Some(dec!(2))).unwrap(),
            LedgerCommand::Balance {
                account: "a".to_string()
            }
        );
        // sign is the ledger's business
        assert!(LedgerCommand::parse(OperationKind::Credit, some("a"), None, Some(dec!(-1))).is_ok());
    }

    #[test]
    fn parse_incomplete_records() {
        let err = LedgerCommand::parse(OperationKind::Credit, some(""), None, Some(dec!(1)))
            .unwrap_err();
        assert_eq!(
            err,
            LedgerCommandError::AccountRequired {
                kind: OperationKind::Credit
            }
        );
        assert_eq!(err.to_string(), "Account is required for Credit");

        let err = LedgerCommand::parse(OperationKind::Credit, some("a"), None, None).unwrap_err();
        assert_eq!(err.to_string(), "Amount is required for Credit");

        let err = LedgerCommand::parse(OperationKind::Transfer, some("a"), some(""), Some(dec!(1)))
            .unwrap_err();
        assert_eq!(err, LedgerCommandError::CounterpartyRequired);

        let err =
            LedgerCommand::parse(OperationKind::Transfer, some("a"), some("b"), None).unwrap_err();
        assert_eq!(
            err,
            LedgerCommandError::AmountRequired {
                kind: OperationKind::Transfer
            }
        );

        let err = LedgerCommand::parse(OperationKind::Balance, some("a"), some("b"), None)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerCommandError::UnexpectedCounterparty {
                kind: OperationKind::Balance
            }
        );
    }
}
