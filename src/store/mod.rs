//! Owner-scoped bookmark operations.
//!
//! [`BookmarkStore`] never reads identity from the request itself: the caller
//! resolves it (see [`crate::api::guards`]) and hands it in explicitly. A
//! `None` or empty identity is rejected by the operations that need one.

use std::fmt;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::db::bookmark::Bookmark;
use crate::utils::DatabaseError;

#[cfg(test)]
pub(crate) mod memory;

/// Identifier handed out by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of a bookmark, stored as `github-<user id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    const GITHUB_PREFIX: &'static str = "github-";

    pub fn github(user: &UserId) -> Self {
        Self(format!("{}{}", Self::GITHUB_PREFIX, user.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Owner strings coming from the outside (e.g. a path segment) are taken as is.
impl From<String> for OwnerId {
    fn from(owner: String) -> Self {
        Self(owner)
    }
}

impl From<&str> for OwnerId {
    fn from(owner: &str) -> Self {
        Self(owner.to_string())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no authenticated user")]
    Unauthenticated,
    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

/// The statements the store needs from a relational backend.
#[rocket::async_trait]
pub trait Repository: Send {
    async fn insert(&mut self, bookmark: &Bookmark) -> Result<(), DatabaseError>;

    async fn list_by_owner(&mut self, owner: &str) -> Result<Vec<Bookmark>, DatabaseError>;

    /// Returns the number of deleted rows.
    async fn delete(&mut self, id: Uuid, owner: &str) -> Result<usize, DatabaseError>;
}

pub struct BookmarkStore<'a, R: Repository + ?Sized> {
    repo: &'a mut R,
}

impl<'a, R: Repository + ?Sized> BookmarkStore<'a, R> {
    pub fn new(repo: &'a mut R) -> Self {
        Self { repo }
    }

    /// Bookmark a URL for the authenticated user.
    ///
    /// Neither `url` nor `note` is validated.
    pub async fn create(
        &mut self,
        user: Option<&UserId>,
        url: String,
        note: String,
    ) -> Result<Bookmark, StoreError> {
        let owner = OwnerId::github(authenticated(user)?);

        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            url,
            owner: owner.into_inner(),
            note,
            created_at: now_utc(),
        };
        info!(id = %bookmark.id, owner = %bookmark.owner, "creating bookmark");

        self.repo.insert(&bookmark).await.inspect_err(|e| {
            error!(id = %bookmark.id, error = %e, "failed to insert bookmark");
        })?;

        Ok(bookmark)
    }

    /// All bookmarks of `owner`. Unknown owners yield an empty list.
    pub async fn list_by_owner(&mut self, owner: &OwnerId) -> Result<Vec<Bookmark>, StoreError> {
        let rv = self
            .repo
            .list_by_owner(owner.as_str())
            .await
            .inspect_err(|e| error!(%owner, error = %e, "failed to list bookmarks"))?;
        debug!(%owner, count = rv.len(), "listed bookmarks");
        Ok(rv)
    }

    /// Delete a bookmark of the authenticated user.
    ///
    /// Deleting nothing is not an error: unknown ids, malformed ids and
    /// bookmarks of other owners all end up here.
    pub async fn delete(
        &mut self,
        user: Option<&UserId>,
        bookmark_id: &str,
    ) -> Result<(), StoreError> {
        let owner = OwnerId::github(authenticated(user)?);

        let Ok(id) = Uuid::parse_str(bookmark_id) else {
            debug!(%owner, bookmark_id, "not a bookmark id, nothing to delete");
            return Ok(());
        };

        let deleted = self
            .repo
            .delete(id, owner.as_str())
            .await
            .inspect_err(|e| error!(%id, %owner, error = %e, "failed to delete bookmark"))?;
        debug!(%id, %owner, deleted, "deleted bookmark");
        Ok(())
    }
}

/// An empty user id is no identity at all.
fn authenticated(user: Option<&UserId>) -> Result<&UserId, StoreError> {
    user.filter(|user| !user.is_empty()).ok_or(StoreError::Unauthenticated)
}

/// Current UTC time at the precision Postgres stores.
fn now_utc() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.microsecond() * 1_000).unwrap_or(now)
}
