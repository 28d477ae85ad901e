use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::prelude::*;

use crate::models::todo::{LegacyTodo, PostLegacyTodo, PostTodo, Todo};
use crate::repository::{RepositoryError, TodoStore};

const DEFAULT_STATUS: i32 = 0;

#[derive(Default)]
struct Table {
    todos: Vec<Todo>,
    last_id: i32,
}

impl Table {
    fn insert(&mut self, title: &str, status: Option<i32>) {
        self.last_id += 1;
        self.todos.push(Todo {
            id: self.last_id,
            title: title.to_string(),
            status: status.unwrap_or(DEFAULT_STATUS),
            created_on: Utc::now().naive_utc(),
            due_date: None,
        });
    }
}

/// In-process store with the same column defaults as the `todos` table.
/// Rows keep insertion order and ids are never reused.
#[derive(Default)]
pub struct InMemoryStore {
    table: Mutex<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TodoStore for InMemoryStore {
    fn list_todos(&self) -> Result<Vec<Todo>, RepositoryError> {
        Ok(self.table().todos.clone())
    }

    fn get_todo_by_id(&self, todo_id: i32) -> Result<Todo, RepositoryError> {
        self.table()
            .todos
            .iter()
            .find(|todo| todo.id == todo_id)
            .cloned()
            .ok_or(RepositoryError::NotFound(todo_id))
    }

    fn create_todo(&self, todo: &PostTodo) -> Result<(), RepositoryError> {
        self.table().insert(&todo.title, todo.status);
        Ok(())
    }

    fn delete_todo_by_id(&self, todo_id: i32) -> Result<(), RepositoryError> {
        let mut table = self.table();
        let index = table
            .todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(RepositoryError::NotFound(todo_id))?;
        table.todos.remove(index);
        Ok(())
    }

    fn list_legacy_todos(&self) -> Result<Vec<LegacyTodo>, RepositoryError> {
        Ok(self
            .table()
            .todos
            .iter()
            .map(|todo| LegacyTodo {
                id: todo.id,
                title: todo.title.clone(),
            })
            .collect())
    }

    fn create_legacy_todo(&self, todo: &PostLegacyTodo) -> Result<(), RepositoryError> {
        self.table().insert(&todo.title, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, status: Option<i32>) -> PostTodo {
        PostTodo {
            title: title.to_string(),
            status,
        }
    }

    #[test]
    fn ids_are_assigned_in_sequence() {
        let store = InMemoryStore::new();
        store.create_todo(&post("a", Some(1))).unwrap();
        store.create_todo(&post("b", None)).unwrap();

        let todos = store.list_todos().unwrap();
        assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(todos[0].status, 1);
        assert_eq!(todos[1].status, DEFAULT_STATUS);
        assert!(todos[1].due_date.is_none());
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let store = InMemoryStore::new();
        store.create_todo(&post("a", None)).unwrap();
        store.delete_todo_by_id(1).unwrap();
        store.create_todo(&post("b", None)).unwrap();

        assert_eq!(store.get_todo_by_id(2).unwrap().title, "b");
        assert!(matches!(
            store.get_todo_by_id(1),
            Err(RepositoryError::NotFound(1))
        ));
    }

    #[test]
    fn deleting_twice_reports_not_found() {
        let store = InMemoryStore::new();
        store.create_todo(&post("a", None)).unwrap();
        assert!(store.delete_todo_by_id(1).is_ok());
        assert!(matches!(
            store.delete_todo_by_id(1),
            Err(RepositoryError::NotFound(1))
        ));
    }

    #[test]
    fn legacy_view_projects_id_and_title() {
        let store = InMemoryStore::new();
        store
            .create_legacy_todo(&PostLegacyTodo {
                title: "old style".to_string(),
            })
            .unwrap();

        let legacy = store.list_legacy_todos().unwrap();
        assert_eq!(
            legacy,
            vec![LegacyTodo {
                id: 1,
                title: "old style".to_string()
            }]
        );
        assert_eq!(store.get_todo_by_id(1).unwrap().status, DEFAULT_STATUS);
    }
}
