use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::domain::{same_name, Franchise};
use crate::catalog::errors::CatalogError;
use crate::catalog::repository::FranchiseStore;

/// JSON file-backed franchise store.
///
/// Holds every document in memory, in insertion order, and rewrites the
/// whole file after each save. The rewrite goes through a sibling temp file
/// and a rename so readers never observe a half-written file.
#[derive(Clone)]
pub struct JsonFileFranchiseStore {
    inner: Arc<RwLock<Vec<Franchise>>>,
    file_path: PathBuf,
}

impl JsonFileFranchiseStore {
    /// Initialize the store from a path. Creates the file with an empty list if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, CatalogError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let docs: Vec<Franchise> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&file_path, b"[]").await?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        info!(path = %file_path.display(), count = docs.len(), "franchise file store loaded");

        Ok(Self { inner: Arc::new(RwLock::new(docs)), file_path })
    }

    async fn persist(&self, docs: &[Franchise]) -> Result<(), CatalogError> {
        let data = serde_json::to_vec_pretty(docs)?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data).await?;
        fs::rename(&tmp, &self.file_path).await?;
        debug!(path = %self.file_path.display(), count = docs.len(), "franchise file rewritten");
        Ok(())
    }
}

#[async_trait]
impl FranchiseStore for JsonFileFranchiseStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, CatalogError> {
        let docs = self.inner.read().await;
        Ok(docs.iter().find(|f| f.id.as_deref() == Some(id)).cloned())
    }

    async fn save(&self, mut franchise: Franchise) -> Result<Franchise, CatalogError> {
        let id = franchise.id.get_or_insert_with(|| Uuid::new_v4().to_string()).clone();
        // Hold the write lock across the rewrite so the file follows save order.
        let mut docs = self.inner.write().await;
        let previous = match docs.iter().position(|f| f.id.as_deref() == Some(id.as_str())) {
            Some(idx) => Some(std::mem::replace(&mut docs[idx], franchise.clone())),
            None => {
                docs.push(franchise.clone());
                None
            }
        };
        if let Err(e) = self.persist(&docs).await {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => {
                    if let Some(slot) = docs.iter_mut().find(|f| f.id.as_deref() == Some(id.as_str())) {
                        *slot = old;
                    }
                }
                None => {
                    docs.pop();
                }
            }
            return Err(e);
        }
        Ok(franchise)
    }

    async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, CatalogError> {
        let docs = self.inner.read().await;
        Ok(docs.iter().any(|f| same_name(&f.name, name)))
    }

    async fn find_all(&self) -> Result<Vec<Franchise>, CatalogError> {
        Ok(self.inner.read().await.clone())
    }
}
