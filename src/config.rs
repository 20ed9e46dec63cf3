/// How `transfer` keeps two accounts consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockingStrategy {
    /// One ledger-wide mutex around every transfer, so all transfers are totally
    /// ordered.
    #[default]
    Global,
    /// Only the two account locks, taken in ascending id order. Transfers between
    /// unrelated accounts run in parallel.
    Ordered,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerConfig {
    pub locking: LockingStrategy,
}
