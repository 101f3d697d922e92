use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Branch, Franchise, HighestStockProducts, Product};
use super::errors::CatalogError;
use super::repository::FranchiseStore;

/// Catalog business service independent of web framework.
///
/// Stateless apart from the store handle. Every mutation loads the whole
/// franchise, edits it and saves it back; there is no version check, so
/// concurrent writes to one franchise are last-save-wins.
pub struct CatalogService<R: FranchiseStore + ?Sized> {
    repo: Arc<R>,
}

impl<R: FranchiseStore + ?Sized> Clone for CatalogService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

fn find_branch<'a>(franchise: &'a mut Franchise, name: &str) -> Result<&'a mut Branch, CatalogError> {
    franchise.branch_mut(name).ok_or_else(CatalogError::branch_not_found)
}

fn find_product<'a>(branch: &'a mut Branch, name: &str) -> Result<&'a mut Product, CatalogError> {
    branch.product_mut(name).ok_or_else(CatalogError::product_not_found)
}

impl<R: FranchiseStore + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    async fn load(&self, franchise_id: &str) -> Result<Franchise, CatalogError> {
        self.repo
            .find_by_id(franchise_id)
            .await?
            .ok_or_else(CatalogError::franchise_not_found)
    }

    /// Create a franchise whose name is not yet taken (ignoring case).
    ///
    /// Any id on the input is dropped; the store assigns a fresh one.
    ///
    /// # Examples
    /// ```
    /// use service::catalog::{domain::Franchise, repository::memory::InMemoryFranchiseStore, CatalogService};
    /// use std::sync::Arc;
    /// let svc = CatalogService::new(Arc::new(InMemoryFranchiseStore::new()));
    /// let created = tokio_test::block_on(svc.create_franchise(Franchise::new("Arepas Co"))).unwrap();
    /// assert!(created.id.is_some());
    /// let dup = tokio_test::block_on(svc.create_franchise(Franchise::new("AREPAS CO")));
    /// assert!(dup.is_err());
    /// ```
    #[instrument(skip(self, franchise), fields(name = %franchise.name))]
    pub async fn create_franchise(&self, mut franchise: Franchise) -> Result<Franchise, CatalogError> {
        if self.repo.exists_by_name_ignore_case(&franchise.name).await? {
            debug!("franchise name taken");
            return Err(CatalogError::franchise_exists());
        }
        franchise.id = None;
        let saved = self.repo.save(franchise).await?;
        info!(franchise_id = ?saved.id, "franchise_created");
        Ok(saved)
    }

    #[instrument(skip(self, branch), fields(branch = %branch.name))]
    pub async fn add_branch(&self, franchise_id: &str, branch: Branch) -> Result<Franchise, CatalogError> {
        let mut franchise = self.load(franchise_id).await?;
        if franchise.has_branch(&branch.name) {
            debug!("branch name taken");
            return Err(CatalogError::branch_exists());
        }
        franchise.branches.push(branch);
        let saved = self.repo.save(franchise).await?;
        info!("branch_added");
        Ok(saved)
    }

    #[instrument(skip(self, product), fields(product = %product.name))]
    pub async fn add_product(&self, franchise_id: &str, branch_name: &str, product: Product) -> Result<Franchise, CatalogError> {
        let mut franchise = self.load(franchise_id).await?;
        let branch = find_branch(&mut franchise, branch_name)?;
        if branch.has_product(&product.name) {
            debug!("product name taken");
            return Err(CatalogError::product_exists());
        }
        branch.products.push(product);
        let saved = self.repo.save(franchise).await?;
        info!("product_added");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, franchise_id: &str, branch_name: &str, product_name: &str) -> Result<Franchise, CatalogError> {
        let mut franchise = self.load(franchise_id).await?;
        find_branch(&mut franchise, branch_name)?
            .remove_product(product_name)
            .ok_or_else(CatalogError::product_not_found)?;
        let saved = self.repo.save(franchise).await?;
        info!("product_removed");
        Ok(saved)
    }

    /// Overwrite a product's stock. Any value is accepted, including
    /// zero and negatives.
    #[instrument(skip(self))]
    pub async fn update_product_stock(
        &self,
        franchise_id: &str,
        branch_name: &str,
        product_name: &str,
        new_stock: i32,
    ) -> Result<Franchise, CatalogError> {
        let mut franchise = self.load(franchise_id).await?;
        let branch = find_branch(&mut franchise, branch_name)?;
        find_product(branch, product_name)?.stock = new_stock;
        let saved = self.repo.save(franchise).await?;
        info!("product_stock_updated");
        Ok(saved)
    }

    /// Rename a franchise. Uniqueness is only checked at creation.
    #[instrument(skip(self))]
    pub async fn update_franchise_name(&self, franchise_id: &str, new_name: &str) -> Result<Franchise, CatalogError> {
        let mut franchise = self.load(franchise_id).await?;
        franchise.name = new_name.to_string();
        let saved = self.repo.save(franchise).await?;
        info!("franchise_renamed");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn update_branch_name(&self, franchise_id: &str, old_name: &str, new_name: &str) -> Result<Franchise, CatalogError> {
        let mut franchise = self.load(franchise_id).await?;
        find_branch(&mut franchise, old_name)?.name = new_name.to_string();
        let saved = self.repo.save(franchise).await?;
        info!("branch_renamed");
        Ok(saved)
    }

    /// Rename a product. A sibling with the same name is not rejected.
    #[instrument(skip(self))]
    pub async fn update_product_name(
        &self,
        franchise_id: &str,
        branch_name: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<Franchise, CatalogError> {
        let mut franchise = self.load(franchise_id).await?;
        let branch = find_branch(&mut franchise, branch_name)?;
        find_product(branch, old_name)?.name = new_name.to_string();
        let saved = self.repo.save(franchise).await?;
        info!("product_renamed");
        Ok(saved)
    }

    /// Highest-stock product of every non-empty branch, in branch order.
    ///
    /// # Examples
    /// ```
    /// use service::catalog::{domain::{Branch, Franchise, Product}, repository::memory::InMemoryFranchiseStore, CatalogService};
    /// use std::sync::Arc;
    /// let svc = CatalogService::new(Arc::new(InMemoryFranchiseStore::new()));
    /// let f = tokio_test::block_on(svc.create_franchise(Franchise::new("F"))).unwrap();
    /// let id = f.id.unwrap();
    /// tokio_test::block_on(svc.add_branch(&id, Branch::new("A"))).unwrap();
    /// tokio_test::block_on(svc.add_product(&id, "A", Product::new("p1", 10))).unwrap();
    /// tokio_test::block_on(svc.add_product(&id, "A", Product::new("p2", 30))).unwrap();
    /// let top = tokio_test::block_on(svc.get_highest_stock_products(&id)).unwrap();
    /// let names: Vec<_> = top.iter().map(|row| row.product_name).collect();
    /// assert_eq!(names, vec!["p2"]);
    /// ```
    #[instrument(skip(self))]
    pub async fn get_highest_stock_products(&self, franchise_id: &str) -> Result<HighestStockProducts, CatalogError> {
        let franchise = self.load(franchise_id).await?;
        Ok(HighestStockProducts::from(franchise))
    }

    pub async fn get_all_franchises(&self) -> Result<Vec<Franchise>, CatalogError> {
        self.repo.find_all().await
    }
}
