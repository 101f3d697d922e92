use sea_orm::DatabaseConnection;

use crate::catalog::domain::{Branch, Franchise};
use crate::catalog::errors::CatalogError;
use crate::catalog::repository::FranchiseStore;

/// PostgreSQL-backed store; one `franchise` row per document.
pub struct SeaOrmFranchiseStore {
    pub db: DatabaseConnection,
}

fn to_domain(row: models::franchise::Model) -> Result<Franchise, CatalogError> {
    let id = row.id;
    let branches: Vec<Branch> = serde_json::from_value(row.branches)
        .map_err(|e| CatalogError::Store(format!("corrupt branches for franchise {id}: {e}")))?;
    Ok(Franchise { id: Some(id), name: row.name, branches })
}

#[async_trait::async_trait]
impl FranchiseStore for SeaOrmFranchiseStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, CatalogError> {
        models::franchise::find_by_id(&self.db, id)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn save(&self, franchise: Franchise) -> Result<Franchise, CatalogError> {
        let branches = serde_json::to_value(&franchise.branches)?;
        let row = models::franchise::upsert(&self.db, franchise.id.as_deref(), &franchise.name, branches).await?;
        to_domain(row)
    }

    async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, CatalogError> {
        Ok(models::franchise::exists_by_name_ignore_case(&self.db, name).await?)
    }

    async fn find_all(&self) -> Result<Vec<Franchise>, CatalogError> {
        models::franchise::list_all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }
}
