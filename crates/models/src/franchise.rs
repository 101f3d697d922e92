use sea_orm::{
    entity::prelude::*,
    sea_query::{Expr, Func},
    DatabaseConnection, QueryOrder, Set,
};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

/// Longest id the `franchise.id` column accepts.
pub const MAX_ID_LEN: usize = 64;

/// One franchise document. `branches` carries the nested branch/product tree.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "franchise")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub branches: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_id(id: &str) -> Result<(), errors::ModelError> {
    if id.trim().is_empty() {
        return Err(errors::ModelError::Validation("franchise id must not be blank".into()));
    }
    if id.len() > MAX_ID_LEN {
        return Err(errors::ModelError::Validation(format!("franchise id longer than {MAX_ID_LEN} bytes")));
    }
    Ok(())
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?)
}

/// Lowercase one char at a time, the way `LOWER()` does. `str::to_lowercase`
/// would turn a final `Σ` into `ς` and miss rows stored with `σ`.
pub fn fold_name(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Compares `LOWER(name)` against the folded input.
pub async fn exists_by_name_ignore_case(db: &DatabaseConnection, name: &str) -> Result<bool, errors::ModelError> {
    let count = Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Name))).eq(fold_name(name)))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// All documents, oldest first.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Insert or replace a whole document.
///
/// Without an id a fresh UUID is assigned. With an id the existing row is
/// overwritten, or inserted under that id when none exists.
pub async fn upsert(
    db: &DatabaseConnection,
    id: Option<&str>,
    name: &str,
    branches: Json,
) -> Result<Model, errors::ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();

    if let Some(id) = id {
        validate_id(id)?;
        if let Some(existing) = find_by_id(db, id).await? {
            let mut am: ActiveModel = existing.into();
            am.name = Set(name.to_string());
            am.branches = Set(branches);
            am.updated_at = Set(now);
            return Ok(am.update(db).await?);
        }
    }

    let am = ActiveModel {
        id: Set(id.map(str::to_string).unwrap_or_else(|| Uuid::new_v4().to_string())),
        name: Set(name.to_string()),
        branches: Set(branches),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(res.rows_affected > 0)
}
