use uuid::Uuid;

use super::Repository;
use crate::db::bookmark::Bookmark;
use crate::utils::DatabaseError;

/// In-process stand-in for the `bookmark` table.
#[derive(Default)]
pub(crate) struct MemoryRepository {
    rows: Vec<Bookmark>,
    broken: bool,
}

impl MemoryRepository {
    /// A repository whose every statement fails like a lost connection.
    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            broken: true,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.broken {
            return Err(DatabaseError::QueryError(
                diesel::result::Error::BrokenTransactionManager,
            ));
        }
        Ok(())
    }
}

#[rocket::async_trait]
impl Repository for MemoryRepository {
    async fn insert(&mut self, bookmark: &Bookmark) -> Result<(), DatabaseError> {
        self.check()?;
        if self.rows.iter().any(|m| m.id == bookmark.id) {
            return Err(DatabaseError::DuplicationError {
                table: "bookmark".to_string(),
            });
        }
        self.rows.push(bookmark.clone());
        Ok(())
    }

    async fn list_by_owner(&mut self, owner: &str) -> Result<Vec<Bookmark>, DatabaseError> {
        self.check()?;
        Ok(self
            .rows
            .iter()
            .filter(|m| m.owner == owner)
            .cloned()
            .collect())
    }

    async fn delete(&mut self, id: Uuid, owner: &str) -> Result<usize, DatabaseError> {
        self.check()?;
        let before = self.rows.len();
        self.rows.retain(|m| !(m.id == id && m.owner == owner));
        Ok(before - self.rows.len())
    }
}
