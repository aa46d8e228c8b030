use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::store::{StoreError, TaskStore};
use crate::task::{Task, TaskId, clean_title};

/// The in-memory task collection, written through to a [`TaskStore`].
///
/// Every mutation builds the next collection, saves it, and only then swaps
/// it in, so a failed write never leaves memory ahead of the file.
#[derive(Debug)]
pub struct TaskRepository {
    store: TaskStore,
    tasks: Vec<Task>,
}

impl TaskRepository {
    #[tracing::instrument(skip(store), fields(file = %store.path().display()))]
    pub fn open(store: TaskStore) -> Result<Self, StoreError> {
        let tasks = store.load()?;
        info!(count = tasks.len(), "task repository ready");
        Ok(Self { store, tasks })
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends a task for `date`. Returns `None` when the title is blank.
    #[tracing::instrument(skip(self, title), fields(date = %date))]
    pub fn add(&mut self, title: &str, date: NaiveDate) -> Result<Option<Task>, StoreError> {
        let Some(title) = clean_title(title) else {
            debug!("ignoring add with empty title");
            return Ok(None);
        };

        let task = Task::new(title, date);
        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;

        info!(id = %task.id, "task added");
        Ok(Some(task))
    }

    /// Renames a task in place. Returns `false` for a blank title or an
    /// unknown id.
    #[tracing::instrument(skip(self, new_title), fields(id = %id))]
    pub fn edit(&mut self, id: TaskId, new_title: &str) -> Result<bool, StoreError> {
        let Some(new_title) = clean_title(new_title) else {
            debug!("ignoring edit with empty title");
            return Ok(false);
        };

        self.update(id, |task| task.title = new_title)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete(&mut self, id: TaskId) -> Result<bool, StoreError> {
        let Some(idx) = self.position(id) else {
            warn!("task to delete not found");
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        let removed = next.remove(idx);
        self.commit(next)?;

        info!(date = %removed.date, "task deleted");
        Ok(true)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> Result<bool, StoreError> {
        self.update(id, |task| task.completed = completed)
    }

    /// Tasks due on `date`, in collection order.
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.is_on(date)).collect()
    }

    /// Every date that has at least one task.
    pub fn dates_with_tasks(&self) -> BTreeSet<NaiveDate> {
        self.tasks.iter().map(|task| task.date).collect()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn update<F>(&mut self, id: TaskId, apply: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Task),
    {
        let Some(idx) = self.position(id) else {
            warn!(id = %id, "task to update not found");
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        apply(&mut next[idx]);
        self.commit(next)?;

        debug!(id = %id, "task updated");
        Ok(true)
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<(), StoreError> {
        self.store.save(&next)?;
        self.tasks = next;
        Ok(())
    }
}
