use std::{sync::Barrier, thread};

use rust_decimal::{Decimal, prelude::Zero};
use rust_decimal_macros::dec;
use shared_ledger::{
    account::AccountError,
    config::{LedgerConfig, LockingStrategy},
    ledger::{Ledger, LedgerError, orchestrator::TransferOrchestrator},
};

const STRATEGIES: [LockingStrategy; 2] = [LockingStrategy::Global, LockingStrategy::Ordered];
const ACCOUNTS: [&str; 4] = ["a", "b", "c", "d"];

fn total(ledger: &impl Ledger) -> Decimal {
    ACCOUNTS.iter().map(|id| ledger.balance(id)).sum()
}

#[test]
fn concurrent_transfers_conserve_total() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 500;

    for locking in STRATEGIES {
        let ledger = TransferOrchestrator::in_memory(LedgerConfig { locking });
        for id in ACCOUNTS {
            ledger.credit(id, dec!(50)).unwrap();
        }
        let before = total(&ledger);
        let barrier = Barrier::new(THREADS + 1);

        thread::scope(|s| {
            for t in 0..THREADS {
                let ledger = &ledger;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    for r in 0..ROUNDS {
                        let from = ACCOUNTS[(t + r) % ACCOUNTS.len()];
                        let to = ACCOUNTS[(t + r + 1 + t % 3) % ACCOUNTS.len()];
                        match ledger.transfer(from, to, dec!(7)) {
                            Ok(()) => {}
                            Err(LedgerError::AccountErr(AccountError::InsufficientBalance)) => {}
                            Err(err) => panic!("unexpected error: {err}"),
                        }
                    }
                });
            }
            // readers run alongside the transfers and must never see a negative balance
            s.spawn(|| {
                barrier.wait();
                for _ in 0..ROUNDS {
                    for id in ACCOUNTS {
                        assert!(ledger.balance(id) >= Decimal::zero());
                    }
                }
            });
        });

        assert_eq!(total(&ledger), before);
        for id in ACCOUNTS {
            assert!(ledger.balance(id) >= Decimal::zero());
        }
    }
}

#[test]
fn symmetric_transfers_do_not_deadlock() {
    const ROUNDS: usize = 2_000;

    for locking in STRATEGIES {
        let ledger = TransferOrchestrator::in_memory(LedgerConfig { locking });
        ledger.credit("a", dec!(2000)).unwrap();
        ledger.credit("b", dec!(2000)).unwrap();

        thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    ledger.transfer("a", "b", dec!(1)).unwrap();
                }
            });
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    ledger.transfer("b", "a", dec!(1)).unwrap();
                }
            });
        });

        assert_eq!(ledger.balance("a") + ledger.balance("b"), dec!(4000));
    }
}

#[test]
fn credits_race_with_transfers() {
    const ROUNDS: usize = 1_000;

    for locking in STRATEGIES {
        let ledger = TransferOrchestrator::in_memory(LedgerConfig { locking });
        ledger.credit("a", dec!(10)).unwrap();

        thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    ledger.credit("a", dec!(1)).unwrap();
                }
            });
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    let _ = ledger.transfer("a", "b", dec!(1));
                }
            });
        });

        // every credit landed, and transfers only moved money between a and b
        assert_eq!(
            ledger.balance("a") + ledger.balance("b"),
            dec!(10) + Decimal::from(ROUNDS)
        );
    }
}
