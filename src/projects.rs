//! Projects and their tasks.
//!
//! Projects are indexed in `projects/projects.json`. Each project owns
//! `projects/tasks/<project_id>.json`; every write to that file recomputes the
//! project's `progress`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::{new_id, now, NewTask, Project, ProjectPatch, Task, TaskPatch, COMPLETED};
use crate::store::{newest_first, read_array, write_array, JsonIndex, StoreResult};

pub const INDEX_FILE: &str = "projects.json";
pub const TASKS_DIR: &str = "tasks";

/// Percentage of completed tasks, rounded to the nearest integer.
pub fn progress_of(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    (completed as f64 * 100.0 / tasks.len() as f64).round() as u8
}

pub struct ProjectStore {
    tasks_dir: PathBuf,
    index: JsonIndex<Project>,
}

impl ProjectStore {
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        let tasks_dir = dir.join(TASKS_DIR);
        fs::create_dir_all(&tasks_dir)?;
        Ok(Self {
            tasks_dir,
            index: JsonIndex::open(dir.join(INDEX_FILE))?,
        })
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Writes the empty task file before the index entry, so a failed create
    /// leaves no listed project behind.
    pub fn create(&mut self, name: &str, description: &str, status: &str) -> StoreResult<Project> {
        let timestamp = now();
        let project = Project {
            id: new_id(),
            name: name.to_string(),
            description: description.to_string(),
            status: status.to_string(),
            progress: 0,
            created_at: timestamp,
            updated_at: timestamp,
        };

        let path = self.tasks_path(&project.id);
        write_array::<Task>(&path, &[])?;

        match self.index.insert(project) {
            Ok(project) => Ok(project),
            Err(e) => {
                fs::remove_file(&path).ok();
                Err(e)
            }
        }
    }

    /// All projects, newest first.
    pub fn list(&self) -> Vec<Project> {
        self.index.list()
    }

    pub fn get(&self, id: &str) -> Option<Project> {
        self.index.get(id).cloned()
    }

    pub fn update(&mut self, id: &str, patch: ProjectPatch) -> StoreResult<Option<Project>> {
        self.index.update(id, move |project| {
            if let Some(name) = patch.name {
                project.name = name;
            }
            if let Some(description) = patch.description {
                project.description = description;
            }
            if let Some(status) = patch.status {
                project.status = status;
            }
            project.updated_at = now();
        })
    }

    /// Remove the project and its task file.
    pub fn delete(&mut self, id: &str) -> StoreResult<Option<Project>> {
        let Some(project) = self.index.remove(id)? else {
            return Ok(None);
        };

        let path = self.tasks_path(id);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("[PROJECTS] Could not delete {}: {}", path.display(), e);
            }
        }
        Ok(Some(project))
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// Tasks of `project_id`, newest first. `None` if the project is unknown.
    pub fn tasks(&self, project_id: &str) -> StoreResult<Option<Vec<Task>>> {
        if self.index.get(project_id).is_none() {
            return Ok(None);
        }
        let tasks = self.load_tasks(project_id)?;
        Ok(Some(newest_first(&tasks)))
    }

    pub fn get_task(&self, project_id: &str, task_id: &str) -> StoreResult<Option<Task>> {
        if self.index.get(project_id).is_none() {
            return Ok(None);
        }
        let tasks = self.load_tasks(project_id)?;
        Ok(tasks.into_iter().find(|t| t.id == task_id))
    }

    pub fn create_task(&mut self, project_id: &str, new: NewTask) -> StoreResult<Option<Task>> {
        if self.index.get(project_id).is_none() {
            return Ok(None);
        }

        let timestamp = now();
        let task = Task {
            id: new_id(),
            project_id: project_id.to_string(),
            completed_at: (new.status == COMPLETED).then_some(timestamp),
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            due_date: new.due_date,
            created_at: timestamp,
            updated_at: timestamp,
        };

        let mut tasks = self.load_tasks(project_id)?;
        tasks.push(task.clone());
        self.save_tasks(project_id, &tasks)?;
        Ok(Some(task))
    }

    /// Apply the present fields of `patch`. Moving into `completed` stamps
    /// `completed_at`; moving to any other status clears it.
    pub fn update_task(
        &mut self,
        project_id: &str,
        task_id: &str,
        patch: TaskPatch,
    ) -> StoreResult<Option<Task>> {
        if self.index.get(project_id).is_none() {
            return Ok(None);
        }

        let mut tasks = self.load_tasks(project_id)?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };

        let timestamp = now();
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            if status == COMPLETED {
                if !task.is_completed() {
                    task.completed_at = Some(timestamp);
                }
            } else {
                task.completed_at = None;
            }
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = timestamp;

        let updated = task.clone();
        self.save_tasks(project_id, &tasks)?;
        Ok(Some(updated))
    }

    pub fn delete_task(&mut self, project_id: &str, task_id: &str) -> StoreResult<Option<Task>> {
        if self.index.get(project_id).is_none() {
            return Ok(None);
        }

        let mut tasks = self.load_tasks(project_id)?;
        let Some(pos) = tasks.iter().position(|t| t.id == task_id) else {
            return Ok(None);
        };
        let removed = tasks.remove(pos);
        self.save_tasks(project_id, &tasks)?;
        Ok(Some(removed))
    }

    // ========================================================================
    // Task files
    // ========================================================================

    fn tasks_path(&self, project_id: &str) -> PathBuf {
        self.tasks_dir.join(format!("{}.json", project_id))
    }

    pub fn tasks_dir(&self) -> &Path {
        &self.tasks_dir
    }

    fn load_tasks(&self, project_id: &str) -> StoreResult<Vec<Task>> {
        read_array(&self.tasks_path(project_id))
    }

    fn save_tasks(&mut self, project_id: &str, tasks: &[Task]) -> StoreResult<()> {
        write_array(&self.tasks_path(project_id), tasks)?;

        let progress = progress_of(tasks);
        self.index.update(project_id, |p| p.progress = progress)?;
        Ok(())
    }
}
