use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("duplicate key value violates unique constraint of {table:?}")]
    DuplicationError { table: String },
    #[error(transparent)]
    QueryError(diesel::result::Error),
}

impl DatabaseError {
    pub fn from_query(table: &str, e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match e {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DatabaseError::DuplicationError {
                    table: table.to_string(),
                }
            }
            e => DatabaseError::QueryError(e),
        }
    }
}
