/// Balance of a single account behind its own reader/writer lock.
/// Changes are validated into events first, then applied.
pub mod account;

/// Identifier to account directory, plus "in memory" implementation.
pub mod store;

/// Credit, transfer and balance operations on top of a [`store::AccountStore`].
/// Owns the rule that a transfer changes both accounts or neither.
pub mod ledger;

/// Ledger settings, currently the transfer locking strategy.
pub mod config;

/// Validates decoded operation records into ledger commands.
pub mod command;

/// CSV batch driver around the ledger. I want to use it for integration tests
/// too, so it lives in the library.
pub mod bin_utils;
