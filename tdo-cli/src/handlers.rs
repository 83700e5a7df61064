//! One handler per parsed action. Mutating handlers flush once at the end;
//! batches abort on the first unmatched id, before anything is flushed, so
//! an aborted batch leaves the stored file untouched.

use anyhow::Result;
use tdo_core::{CsvStore, NotFound, TodoItem, TodoList};

use crate::render::Renderer;
use crate::usage;

type List = TodoList<CsvStore>;

pub fn help(renderer: &Renderer) {
    renderer.print_md(&usage::usage_table());
}

pub fn list(renderer: &Renderer, list: &List) {
    renderer.print_todos(list.list());
}

pub fn add(list: &mut List, title: String, description: Option<String>) -> Result<()> {
    list.add(TodoItem::new(title, description.unwrap_or_default()));
    list.flush()?;
    Ok(())
}

/// Resolves the id by prefix, then applies only the fields that were given.
pub fn update(
    list: &mut List,
    id: &str,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let mut todo = list
        .get(id)
        .ok_or_else(|| NotFound(id.to_string()))?
        .clone();
    if let Some(title) = title {
        todo.set_title(title);
    }
    if let Some(description) = description {
        todo.set_description(description);
    }
    list.update(todo);
    list.flush()?;
    Ok(())
}

pub fn delete(list: &mut List, ids: &[String]) -> Result<()> {
    for id in ids {
        if !list.delete(id) {
            return Err(NotFound(id.clone()).into());
        }
    }
    list.flush()?;
    Ok(())
}

pub fn mark_complete(list: &mut List, ids: &[String]) -> Result<()> {
    for id in ids {
        let mut todo = list.get(id).ok_or_else(|| NotFound(id.clone()))?.clone();
        todo.mark_done();
        list.update(todo);
    }
    list.flush()?;
    Ok(())
}

pub fn mark_incomplete(list: &mut List, ids: &[String]) -> Result<()> {
    for id in ids {
        let mut todo = list.get(id).ok_or_else(|| NotFound(id.clone()))?.clone();
        todo.mark_undone();
        list.update(todo);
    }
    list.flush()?;
    Ok(())
}
