//! The todo domain: the item entity and the list that owns a collection of
//! them.

mod todo_item;
mod todo_list;

pub use todo_item::{FormatError, ID_LEN, TodoItem};
pub use todo_list::{NotFound, TodoList};
