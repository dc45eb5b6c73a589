//! In-memory ledger repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::ResponseLedger;
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::LedgerRepository;

/// Ledgers keyed by session, held in memory.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerRepository {
    ledgers: Arc<RwLock<HashMap<SessionId, ResponseLedger>>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.ledgers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ledgers.read().await.is_empty()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn save(&self, ledger: &ResponseLedger) -> Result<(), DomainError> {
        self.ledgers
            .write()
            .await
            .insert(*ledger.session_id(), ledger.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> Result<Option<ResponseLedger>, DomainError> {
        Ok(self.ledgers.read().await.get(session_id).cloned())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), DomainError> {
        self.ledgers.write().await.remove(session_id);
        Ok(())
    }
}
