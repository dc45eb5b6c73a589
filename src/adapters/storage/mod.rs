//! Storage Adapters
//!
//! Implementations of the `LedgerRepository` port.
//!
//! - **InMemoryLedgerRepository** - Keeps ledgers in process memory

mod in_memory_ledger_repository;

pub use in_memory_ledger_repository::InMemoryLedgerRepository;
