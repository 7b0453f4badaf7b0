//! Todo list storage, kept in `todos/todos.json`.

use std::fs;
use std::path::PathBuf;

use crate::models::{new_id, now, Todo, TodoPatch};
use crate::store::{JsonIndex, StoreResult};

pub const INDEX_FILE: &str = "todos.json";

/// Example entries written into an empty list on first start.
const DEFAULT_TODOS: [(&str, bool); 5] = [
    ("Finish the project documentation", false),
    ("Learn a new technology", false),
    ("Tidy up the codebase", true),
    ("Prepare meeting materials", false),
    ("Reply to important emails", true),
];

pub struct TodoStore {
    index: JsonIndex<Todo>,
}

impl TodoStore {
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            index: JsonIndex::open(dir.join(INDEX_FILE))?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Fill an empty list with the example todos. Returns how many were added.
    pub fn seed_defaults(&mut self) -> StoreResult<usize> {
        if !self.index.is_empty() {
            return Ok(0);
        }
        for (title, completed) in DEFAULT_TODOS {
            self.create(title, completed)?;
        }
        log::info!("[TODOS] Seeded {} example todos", DEFAULT_TODOS.len());
        Ok(DEFAULT_TODOS.len())
    }

    pub fn create(&mut self, title: &str, completed: bool) -> StoreResult<Todo> {
        let timestamp = now();
        self.index.insert(Todo {
            id: new_id(),
            title: title.to_string(),
            completed,
            created_at: timestamp,
            completed_at: completed.then_some(timestamp),
            updated_at: None,
        })
    }

    /// All todos, newest first.
    pub fn list(&self) -> Vec<Todo> {
        self.index.list()
    }

    pub fn get(&self, id: &str) -> Option<Todo> {
        self.index.get(id).cloned()
    }

    /// Apply the present fields of `patch`. Setting `completed` stamps or
    /// clears `completed_at`.
    pub fn update(&mut self, id: &str, patch: TodoPatch) -> StoreResult<Option<Todo>> {
        self.index.update(id, move |todo| {
            let timestamp = now();
            if let Some(title) = patch.title {
                todo.title = title;
            }
            if let Some(completed) = patch.completed {
                todo.completed = completed;
                todo.completed_at = completed.then_some(timestamp);
            }
            todo.updated_at = Some(timestamp);
        })
    }

    pub fn delete(&mut self, id: &str) -> StoreResult<Option<Todo>> {
        self.index.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, TodoStore) {
        let dir = TempDir::new().unwrap();
        let store = TodoStore::open(dir.path().join("todos")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_completed_stamps_completed_at() {
        let (_dir, mut todos) = store();
        let open = todos.create("Buy milk", false).unwrap();
        let done = todos.create("Pay rent", true).unwrap();

        assert!(open.completed_at.is_none());
        assert_eq!(done.completed_at, Some(done.created_at));
        assert!(done.updated_at.is_none());
    }

    #[test]
    fn test_toggle_completed() {
        let (_dir, mut todos) = store();
        let todo = todos.create("Walk dog", false).unwrap();

        let done = todos
            .update(
                &todo.id,
                TodoPatch {
                    title: None,
                    completed: Some(true),
                },
            )
            .unwrap()
            .unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());
        assert!(done.updated_at.is_some());
        assert_eq!(done.title, "Walk dog");

        let reopened = todos
            .update(
                &todo.id,
                TodoPatch {
                    title: Some("Walk the dog".to_string()),
                    completed: Some(false),
                },
            )
            .unwrap()
            .unwrap();
        assert!(!reopened.completed);
        assert!(reopened.completed_at.is_none());
        assert_eq!(reopened.title, "Walk the dog");
    }

    #[test]
    fn test_title_only_update_keeps_completion() {
        let (_dir, mut todos) = store();
        let todo = todos.create("Stretch", true).unwrap();
        let updated = todos
            .update(
                &todo.id,
                TodoPatch {
                    title: Some("Stretch more".to_string()),
                    completed: None,
                },
            )
            .unwrap()
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.completed_at, todo.completed_at);
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let (_dir, mut todos) = store();
        assert!(todos.update("ghost", TodoPatch::default()).unwrap().is_none());
        assert!(todos.delete("ghost").unwrap().is_none());
    }

    #[test]
    fn test_delete_removes_from_listing() {
        let (_dir, mut todos) = store();
        let keep = todos.create("Keep", false).unwrap();
        let drop = todos.create("Drop", false).unwrap();

        todos.delete(&drop.id).unwrap().unwrap();
        let ids: Vec<String> = todos.list().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![keep.id]);
    }

    #[test]
    fn test_seed_defaults_only_when_empty() {
        let (_dir, mut todos) = store();
        assert_eq!(todos.seed_defaults().unwrap(), 5);
        assert_eq!(todos.list().len(), 5);
        assert_eq!(todos.list().iter().filter(|t| t.completed).count(), 2);
        assert_eq!(todos.seed_defaults().unwrap(), 0);
        assert_eq!(todos.list().len(), 5);
    }
}
