use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub name: String,
    /// Any 32-bit integer, including zero and negatives.
    pub stock: i32,
}

#[derive(ToSchema)]
pub struct BranchDoc {
    pub name: String,
    pub products: Vec<ProductDoc>,
}

#[derive(ToSchema)]
pub struct FranchiseDoc {
    /// Assigned by the server; ignored on creation.
    pub id: Option<String>,
    pub name: String,
    pub branches: Vec<BranchDoc>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct HighestStockProductDoc {
    pub branch_name: String,
    pub product_name: String,
    pub stock: i32,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    /// RFC 3339 instant
    pub timestamp: String,
    pub status: u16,
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::franchise::create_franchise,
        crate::routes::franchise::list_franchises,
        crate::routes::franchise::add_branch,
        crate::routes::franchise::add_product,
        crate::routes::franchise::remove_product,
        crate::routes::franchise::update_product_stock,
        crate::routes::franchise::highest_stock_products,
        crate::routes::franchise::update_franchise_name,
        crate::routes::franchise::update_branch_name,
        crate::routes::franchise::update_product_name,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            BranchDoc,
            FranchiseDoc,
            HighestStockProductDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "franchise")
    )
)]
pub struct ApiDoc;
