use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Reject empty or whitespace-only names before they reach the NOT NULL columns.
pub fn validate_name(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field}: must not be blank")));
    }
    Ok(())
}

/// Insert a row and return it with the database-assigned id.
pub async fn create(db: &DatabaseConnection, first_name: &str, last_name: &str) -> Result<Model, ModelError> {
    validate_name("firstName", first_name)?;
    validate_name("lastName", last_name)?;
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn find_by_first_name(db: &DatabaseConnection, first_name: &str) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::FirstName.eq(first_name))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn find_by_last_name_order_by_first_name(db: &DatabaseConnection, last_name: &str) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::LastName.eq(last_name))
        .order_by_asc(Column::FirstName)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Literal, case-sensitive prefix match: `substr(first_name, 1, n) = prefix`.
///
/// `LIKE` would treat `%` and `_` as wildcards and ignores case on SQLite.
pub async fn find_by_first_name_starting_with(db: &DatabaseConnection, prefix: &str) -> Result<Vec<Model>, ModelError> {
    let len = i32::try_from(prefix.chars().count())
        .map_err(|_| ModelError::Validation("prefix: too long".into()))?;
    let head = Func::cust(Alias::new("substr"))
        .arg(Expr::col(Column::FirstName))
        .arg(1)
        .arg(len);
    Ok(Entity::find()
        .filter(Expr::expr(head).eq(prefix))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Overwrite both names of an existing row; `None` when the id is unknown.
pub async fn update_names(db: &DatabaseConnection, id: i64, first_name: &str, last_name: &str) -> Result<Option<Model>, ModelError> {
    validate_name("firstName", first_name)?;
    validate_name("lastName", last_name)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.first_name = Set(first_name.to_string());
    am.last_name = Set(last_name.to_string());
    Ok(Some(am.update(db).await?))
}

/// Remove a row; returns whether it existed.
pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
