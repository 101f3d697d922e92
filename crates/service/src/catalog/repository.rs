use async_trait::async_trait;

use super::domain::Franchise;
use super::errors::CatalogError;

/// Persistence abstraction for franchise documents.
///
/// `save` writes the whole aggregate and is the only atomic unit; there is
/// no cross-document transaction and no version check.
#[async_trait]
pub trait FranchiseStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, CatalogError>;
    /// Upsert. Assigns an id when the franchise has none.
    async fn save(&self, franchise: Franchise) -> Result<Franchise, CatalogError>;
    async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, CatalogError>;
    async fn find_all(&self) -> Result<Vec<Franchise>, CatalogError>;
}

/// In-process store keeping documents in insertion order.
pub mod memory {
    use super::*;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use crate::catalog::domain::same_name;

    #[derive(Default)]
    pub struct InMemoryFranchiseStore {
        docs: RwLock<Vec<Franchise>>,
    }

    impl InMemoryFranchiseStore {
        pub fn new() -> Self { Self::default() }

        #[cfg(test)]
        pub async fn len(&self) -> usize { self.docs.read().await.len() }

        #[cfg(test)]
        pub async fn is_empty(&self) -> bool { self.docs.read().await.is_empty() }
    }

    #[async_trait]
    impl FranchiseStore for InMemoryFranchiseStore {
        async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, CatalogError> {
            let docs = self.docs.read().await;
            Ok(docs.iter().find(|f| f.id.as_deref() == Some(id)).cloned())
        }

        async fn save(&self, mut franchise: Franchise) -> Result<Franchise, CatalogError> {
            let id = franchise.id.get_or_insert_with(|| Uuid::new_v4().to_string()).clone();
            let mut docs = self.docs.write().await;
            match docs.iter_mut().find(|f| f.id.as_deref() == Some(id.as_str())) {
                Some(slot) => *slot = franchise.clone(),
                None => docs.push(franchise.clone()),
            }
            Ok(franchise)
        }

        async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, CatalogError> {
            let docs = self.docs.read().await;
            Ok(docs.iter().any(|f| same_name(&f.name, name)))
        }

        async fn find_all(&self) -> Result<Vec<Franchise>, CatalogError> {
            Ok(self.docs.read().await.clone())
        }
    }

}
