//! Ledger repository port.
//!
//! Holds the response ledger of each session between requests. A ledger is
//! owned by exactly one session; implementations never share one ledger
//! between session ids.

use async_trait::async_trait;

use crate::domain::assessment::ResponseLedger;
use crate::domain::foundation::{DomainError, SessionId};

/// Repository port for response ledgers.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Insert or replace the ledger of its session.
    ///
    /// # Errors
    ///
    /// - `InternalError` on persistence failure
    async fn save(&self, ledger: &ResponseLedger) -> Result<(), DomainError>;

    /// Find the ledger of a session.
    ///
    /// Returns `None` if the session is unknown.
    async fn find_by_id(&self, session_id: &SessionId) -> Result<Option<ResponseLedger>, DomainError>;

    /// Remove a session's ledger, abandoning the session.
    ///
    /// Deleting an unknown session is not an error.
    async fn delete(&self, session_id: &SessionId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn LedgerRepository) {}
}
