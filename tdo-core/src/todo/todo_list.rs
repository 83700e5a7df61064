use thiserror::Error;
use tracing::debug;

use super::todo_item::TodoItem;
use crate::store::{Store, StoreError};

/// An operation named an id (or id prefix) that no item matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no todo found matching id `{0}`")]
pub struct NotFound(pub String);

/// The in-memory todo collection, bound to one store for its lifetime.
///
/// Insertion order is display order. Mutations only flip a transient dirty
/// flag; nothing reaches the store until [`flush`](Self::flush).
#[derive(Debug)]
pub struct TodoList<S> {
    todos: Vec<TodoItem>,
    dirty: bool,
    store: S,
}

impl<S: Store> TodoList<S> {
    /// Builds a list from everything the store currently holds. The list
    /// starts clean.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let todos = store.load()?;
        debug!(count = todos.len(), "loaded todo list");
        Ok(Self {
            todos,
            dirty: false,
            store,
        })
    }

    /// All items, in insertion order.
    pub fn list(&self) -> &[TodoItem] {
        &self.todos
    }

    /// First item whose id starts with `prefix`, in list order.
    ///
    /// An empty prefix matches nothing. When several ids share the prefix
    /// the first one wins; ambiguity is not detected.
    pub fn get(&self, prefix: &str) -> Option<&TodoItem> {
        if prefix.is_empty() {
            return None;
        }
        self.todos.iter().find(|todo| todo.id.starts_with(prefix))
    }

    /// Appends an item and marks the list dirty. Ids are not checked for
    /// collisions.
    pub fn add(&mut self, todo: TodoItem) {
        self.todos.push(todo);
        self.dirty = true;
    }

    /// Replaces the first item whose id equals `todo.id` exactly (full id,
    /// not prefix). Silently a no-op when no id matches.
    pub fn update(&mut self, todo: TodoItem) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
            self.dirty = true;
        }
    }

    /// Removes the first item matching `prefix`, under the same rule as
    /// [`get`](Self::get). Returns whether an item was removed; the dirty
    /// flag only moves on removal.
    pub fn delete(&mut self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return false;
        }
        match self.todos.iter().position(|t| t.id.starts_with(prefix)) {
            Some(index) => {
                self.todos.remove(index);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Writes the full collection to the store, if there is anything
    /// unsaved.
    ///
    /// A clean list performs no I/O. A failed save leaves the list dirty
    /// and returns the store's error.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            debug!("flush skipped, list is clean");
            return Ok(());
        }
        self.store.save(&self.todos)?;
        self.dirty = false;
        debug!(count = self.todos.len(), "flushed todo list");
        Ok(())
    }

    /// Whether the list has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
