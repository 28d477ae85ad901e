use std::time::Duration;

use diesel::connection::DefaultLoadingMode;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};

use crate::config::DatabaseConfig;
use crate::models::todo::{LegacyTodo, PostLegacyTodo, PostTodo, Todo};
use crate::repository::schema::todos;
use crate::repository::{collect_rows, DecodePolicy, RepositoryError, TodoStore};

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;
type DBConnection = PooledConnection<ConnectionManager<PgConnection>>;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Postgres-backed store. Connections come from a pool that lives as long
/// as the process and go back to it when dropped.
#[derive(Clone)]
pub struct Database {
    pool: DBPool,
    decode_policy: DecodePolicy,
}

impl Database {
    /// The pool is filled lazily, so the service starts even when the
    /// database is unreachable; requests fail until it comes back.
    pub fn new(config: &DatabaseConfig, decode_policy: DecodePolicy) -> Self {
        let manager = ConnectionManager::<PgConnection>::new(config.connection_string());
        let pool = r2d2::Pool::builder()
            .max_size(config.pool_size)
            .min_idle(Some(0))
            .connection_timeout(CONNECTION_TIMEOUT)
            .build_unchecked(manager);
        Database {
            pool,
            decode_policy,
        }
    }

    fn connection(&self) -> Result<DBConnection, RepositoryError> {
        self.pool.get().map_err(|err| {
            tracing::error!(error = %err, "failed to acquire database connection");
            RepositoryError::Connection(err)
        })
    }
}

impl TodoStore for Database {
    fn list_todos(&self) -> Result<Vec<Todo>, RepositoryError> {
        let mut conn = self.connection()?;
        let rows = todos::table
            .load_iter::<Todo, DefaultLoadingMode>(&mut *conn)
            .map_err(RepositoryError::Query)?;
        collect_rows(rows, self.decode_policy)
    }

    fn get_todo_by_id(&self, todo_id: i32) -> Result<Todo, RepositoryError> {
        let mut conn = self.connection()?;
        todos::table
            .find(todo_id)
            .first::<Todo>(&mut *conn)
            .optional()
            .map_err(RepositoryError::Query)?
            .ok_or(RepositoryError::NotFound(todo_id))
    }

    fn create_todo(&self, todo: &PostTodo) -> Result<(), RepositoryError> {
        let mut conn = self.connection()?;
        diesel::insert_into(todos::table)
            .values(todo)
            .execute(&mut *conn)
            .map_err(RepositoryError::Insert)?;
        Ok(())
    }

    fn delete_todo_by_id(&self, todo_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.connection()?;
        let count = diesel::delete(todos::table.find(todo_id))
            .execute(&mut *conn)
            .map_err(RepositoryError::Delete)?;
        if count == 0 {
            return Err(RepositoryError::NotFound(todo_id));
        }
        Ok(())
    }

    fn list_legacy_todos(&self) -> Result<Vec<LegacyTodo>, RepositoryError> {
        let mut conn = self.connection()?;
        let rows = todos::table
            .select((todos::id, todos::title))
            .load_iter::<LegacyTodo, DefaultLoadingMode>(&mut *conn)
            .map_err(RepositoryError::Query)?;
        collect_rows(rows, self.decode_policy)
    }

    fn create_legacy_todo(&self, todo: &PostLegacyTodo) -> Result<(), RepositoryError> {
        let mut conn = self.connection()?;
        diesel::insert_into(todos::table)
            .values(todo)
            .execute(&mut *conn)
            .map_err(RepositoryError::Insert)?;
        Ok(())
    }
}
