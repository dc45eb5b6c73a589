//! Adapters - Implementations of port interfaces.
//!
//! - `events` - Event publishers (in-memory capture, tracing log sink)
//! - `storage` - Ledger repositories (in-memory)

pub mod events;
pub mod storage;

pub use events::{InMemoryEventBus, TracingEventPublisher};
pub use storage::InMemoryLedgerRepository;
