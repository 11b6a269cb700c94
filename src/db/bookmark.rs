use diesel::prelude::*;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};
use rocket::serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schema::bookmark;
use crate::store::Repository;
use crate::utils::DatabaseError;

#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    Debug,
    Clone,
)]
#[serde(crate = "rocket::serde")]
#[diesel(table_name = bookmark)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bookmark {
    pub id: Uuid,
    pub url: String,
    pub owner: String,
    pub note: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

impl Bookmark {
    pub async fn get(conn: &mut Connection, id: Uuid) -> Result<Option<Bookmark>, DatabaseError> {
        bookmark::table
            .find(id)
            .select(Bookmark::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(|e| DatabaseError::from_query("bookmark", e))
    }
}

#[rocket::async_trait]
impl Repository for Connection {
    async fn insert(&mut self, new: &Bookmark) -> Result<(), DatabaseError> {
        diesel::insert_into(bookmark::table)
            .values(new)
            .execute(self)
            .await
            .map(|_| ())
            .map_err(|e| DatabaseError::from_query("bookmark", e))
    }

    async fn list_by_owner(&mut self, owner: &str) -> Result<Vec<Bookmark>, DatabaseError> {
        bookmark::table
            .filter(bookmark::owner.eq(owner))
            .order_by(bookmark::created_at.asc())
            .select(Bookmark::as_select())
            .load(self)
            .await
            .map_err(|e| DatabaseError::from_query("bookmark", e))
    }

    async fn delete(&mut self, id: Uuid, owner: &str) -> Result<usize, DatabaseError> {
        diesel::delete(
            bookmark::table.filter(bookmark::id.eq(id).and(bookmark::owner.eq(owner))),
        )
        .execute(self)
        .await
        .map_err(|e| DatabaseError::from_query("bookmark", e))
    }
}
