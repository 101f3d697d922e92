use serde::{Deserialize, Serialize, Serializer};

/// Case-insensitive name equality (per-char lowercase, no locale rules).
pub fn same_name(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Franchise aggregate: the unit of persistence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Franchise {
    /// Assigned by the store on first save.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Franchise {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: None, name: name.into(), branches: Vec::new() }
    }

    pub fn with_branches(mut self, branches: Vec<Branch>) -> Self {
        self.branches = branches;
        self
    }

    /// First branch whose name matches ignoring case.
    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| same_name(&b.name, name))
    }

    pub fn branch_mut(&mut self, name: &str) -> Option<&mut Branch> {
        self.branches.iter_mut().find(|b| same_name(&b.name, name))
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branch(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), products: Vec::new() }
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| same_name(&p.name, name))
    }

    pub fn product_mut(&mut self, name: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| same_name(&p.name, name))
    }

    pub fn has_product(&self, name: &str) -> bool {
        self.product(name).is_some()
    }

    /// Removes the first product matching `name`, if any.
    pub fn remove_product(&mut self, name: &str) -> Option<Product> {
        let idx = self.products.iter().position(|p| same_name(&p.name, name))?;
        Some(self.products.remove(idx))
    }

    /// Product with the greatest stock; on ties the earliest one wins.
    pub fn highest_stock(&self) -> Option<&Product> {
        self.products
            .iter()
            .reduce(|best, p| if p.stock > best.stock { p } else { best })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Unbounded: zero and negative values are stored as given.
    #[serde(default)]
    pub stock: i32,
}

impl Product {
    pub fn new(name: impl Into<String>, stock: i32) -> Self {
        Self { name: name.into(), stock }
    }
}

/// One row of the per-branch maximum-stock projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighestStockProduct {
    pub branch_name: String,
    pub product_name: String,
    pub stock: i32,
}

impl HighestStockProduct {
    pub fn new(branch_name: impl Into<String>, product_name: impl Into<String>, stock: i32) -> Self {
        Self { branch_name: branch_name.into(), product_name: product_name.into(), stock }
    }
}

/// Per-branch maximum-stock projection over a loaded franchise.
///
/// Rows are computed while iterating, in branch order, skipping branches
/// without products. Iterating again starts over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighestStockProducts {
    branches: Vec<Branch>,
}

impl HighestStockProducts {
    pub fn new(branches: Vec<Branch>) -> Self { Self { branches } }

    pub fn iter(&self) -> HighestStockIter<'_> {
        HighestStockIter { branches: self.branches.iter() }
    }
}

impl From<Franchise> for HighestStockProducts {
    fn from(f: Franchise) -> Self { Self::new(f.branches) }
}

impl<'a> IntoIterator for &'a HighestStockProducts {
    type Item = HighestStockProduct;
    type IntoIter = HighestStockIter<'a>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl Serialize for HighestStockProducts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

pub struct HighestStockIter<'a> {
    branches: std::slice::Iter<'a, Branch>,
}

impl Iterator for HighestStockIter<'_> {
    type Item = HighestStockProduct;

    fn next(&mut self) -> Option<Self::Item> {
        self.branches.by_ref().find_map(|branch| {
            branch
                .highest_stock()
                .map(|p| HighestStockProduct::new(branch.name.clone(), p.name.clone(), p.stock))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.branches.size_hint().1)
    }
}
