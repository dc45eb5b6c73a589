//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LedgerRepository` - Storage of in-progress and sealed response ledgers
//! - `EventPublisher` - Publishing of domain events such as `ProfileComputed`

mod event_publisher;
mod ledger_repository;

pub use event_publisher::EventPublisher;
pub use ledger_repository::LedgerRepository;
