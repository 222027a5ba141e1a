use crate::AppResult;
use fixdesk_core::entities::users;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashMap;
use uuid::Uuid;

/// Batch-fetches users referenced by a page of complaints so list
/// endpoints can attach submitter/technician/finalizer names without a
/// query per row.
pub(crate) async fn users_by_id(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Uuid>,
) -> AppResult<HashMap<Uuid, users::Model>> {
    let ids: Vec<Uuid> = {
        let mut v: Vec<Uuid> = ids.into_iter().collect();
        v.sort();
        v.dedup();
        v
    };
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = users::Entity::find()
        .filter(users::Column::UserId.is_in(ids))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|u| (u.user_id, u)).collect())
}
