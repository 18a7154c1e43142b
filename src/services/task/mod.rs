// Task service module
// Ordered task collection with write-through persistence

use crate::models::settings::DEFAULT_STORAGE_KEY;
use crate::models::task::{Task, TaskId, TaskUpdate};
use crate::services::storage::{BlobStore, StorageError};

/// Owns every task and mirrors each mutation into a blob.
///
/// The blob is a JSON array of task records rewritten in full after every
/// create, update, or delete.
pub struct TaskStore {
    tasks: Vec<Task>,
    blob: Box<dyn BlobStore>,
    key: String,
}

impl TaskStore {
    /// Load tasks stored under the default key
    pub fn load(blob: Box<dyn BlobStore>) -> Self {
        Self::load_with_key(blob, DEFAULT_STORAGE_KEY)
    }

    /// Load tasks stored under `key`.
    ///
    /// A missing blob yields an empty store. An unreadable or corrupt blob is
    /// logged and also yields an empty store.
    pub fn load_with_key(blob: Box<dyn BlobStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = match blob.read(&key) {
            Ok(Some(data)) => match decode_tasks(&data) {
                Ok(tasks) => {
                    log::info!("Loaded {} tasks from '{}'", tasks.len(), key);
                    tasks
                }
                Err(err) => {
                    log::error!("Failed to load tasks: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                log::error!("Failed to read tasks from '{}': {}", key, err);
                Vec::new()
            }
        };

        Self { tasks, blob, key }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append a task
    pub fn create(&mut self, task: Task) -> Result<(), StorageError> {
        log::info!("Creating task '{}' ({})", task.name, task.id);
        self.tasks.push(task.normalized());
        self.save()
    }

    /// Append several tasks with a single write
    pub fn extend(&mut self, tasks: impl IntoIterator<Item = Task>) -> Result<(), StorageError> {
        let before = self.tasks.len();
        self.tasks.extend(tasks.into_iter().map(Task::normalized));
        log::info!("Added {} tasks", self.tasks.len() - before);
        self.save()
    }

    /// Merge `update` into the task with `id`.
    ///
    /// Returns `Ok(false)` when no task has that id; the store is still
    /// written back.
    pub fn update(&mut self, id: &TaskId, update: &TaskUpdate) -> Result<bool, StorageError> {
        let mut found = false;
        for task in &mut self.tasks {
            if &task.id == id {
                *task = task.merged(update);
                found = true;
            }
        }

        if !found {
            log::debug!("Ignoring update for unknown task {}", id);
        }
        self.save()?;
        Ok(found)
    }

    /// Remove the task with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &TaskId) -> Result<bool, StorageError> {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            log::info!("Deleted task {}", id);
        }
        self.save()?;
        Ok(removed)
    }

    /// Write the full task list to the blob
    pub fn save(&mut self) -> Result<(), StorageError> {
        let data = encode_tasks(&self.tasks)?;
        self.blob.write(&self.key, &data)
    }
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, StorageError> {
    serde_json::to_string_pretty(tasks).map_err(StorageError::Serialize)
}

pub fn decode_tasks(data: &str) -> Result<Vec<Task>, StorageError> {
    let tasks: Vec<Task> = serde_json::from_str(data).map_err(StorageError::Deserialize)?;
    Ok(tasks.into_iter().map(Task::normalized).collect())
}
