pub mod database;
#[cfg(test)]
pub mod memory;
pub mod schema;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::todo::{LegacyTodo, PostLegacyTodo, PostTodo, Todo};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("could not acquire a database connection: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),

    #[error("query failed: {0}")]
    Query(#[source] diesel::result::Error),

    #[error("insert failed: {0}")]
    Insert(#[source] diesel::result::Error),

    #[error("delete failed: {0}")]
    Delete(#[source] diesel::result::Error),

    #[error("row could not be decoded: {0}")]
    Decode(#[source] diesel::result::Error),

    #[error("todo {0} not found")]
    NotFound(i32),

    #[error("invalid input syntax for type integer: `{0}`")]
    InvalidId(String),
}

/// Storage for todo items.
///
/// Calls block the current thread; handlers move them onto actix's
/// blocking pool.
pub trait TodoStore: Send + Sync {
    /// All rows, in whatever order storage yields them.
    fn list_todos(&self) -> Result<Vec<Todo>, RepositoryError>;

    fn get_todo_by_id(&self, todo_id: i32) -> Result<Todo, RepositoryError>;

    fn create_todo(&self, todo: &PostTodo) -> Result<(), RepositoryError>;

    /// Fails with `NotFound` when no row was removed.
    fn delete_todo_by_id(&self, todo_id: i32) -> Result<(), RepositoryError>;

    fn list_legacy_todos(&self) -> Result<Vec<LegacyTodo>, RepositoryError>;

    fn create_legacy_todo(&self, todo: &PostLegacyTodo) -> Result<(), RepositoryError>;
}

/// What a listing does with a row that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    #[default]
    SkipAndLog,
    FailFast,
}

impl FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "skip-and-log" => Ok(DecodePolicy::SkipAndLog),
            "fail-fast" | "fail" => Ok(DecodePolicy::FailFast),
            other => Err(format!("unknown row decode policy `{other}`")),
        }
    }
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodePolicy::SkipAndLog => write!(f, "skip"),
            DecodePolicy::FailFast => write!(f, "fail-fast"),
        }
    }
}

/// Collects decoded rows in iteration order, applying `policy` to the
/// rows that failed.
pub fn collect_rows<T, I>(rows: I, policy: DecodePolicy) -> Result<Vec<T>, RepositoryError>
where
    I: IntoIterator<Item = diesel::QueryResult<T>>,
{
    let mut decoded = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        match row {
            Ok(item) => decoded.push(item),
            Err(err) if policy == DecodePolicy::SkipAndLog => {
                tracing::warn!(row = index, error = %err, "skipping row that failed to decode");
            }
            Err(err) => return Err(RepositoryError::Decode(err)),
        }
    }
    Ok(decoded)
}
