use chrono::Utc;

use super::required;
use crate::error::{StoreError, StoreResult};
use crate::models::Task;
use crate::store::DataStore;

impl DataStore {
    pub fn add_task(&mut self, text: &str) -> StoreResult<Task> {
        let task = Task {
            id: self.new_task_id(),
            text: required("task", text)?,
            done: false,
            created_at: Utc::now(),
            completed_at: None,
        };
        self.data_mut().tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    pub fn set_task_done(&mut self, id: &str, done: bool) -> StoreResult<Task> {
        let task = self
            .task_mut(id)
            .ok_or_else(|| StoreError::not_found("task", id))?;
        if task.done == done {
            return Ok(task.clone());
        }
        task.done = done;
        task.completed_at = done.then(Utc::now);
        let updated = task.clone();
        self.persist();
        Ok(updated)
    }

    pub fn delete_task(&mut self, id: &str) -> StoreResult<Task> {
        let tasks = &mut self.data_mut().tasks;
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("task", id))?;
        let removed = tasks.remove(index);
        self.persist();
        Ok(removed)
    }

    /// Drop every completed task, returning how many were removed.
    pub fn clear_completed_tasks(&mut self) -> usize {
        let tasks = &mut self.data_mut().tasks;
        let before = tasks.len();
        tasks.retain(|t| !t.done);
        let removed = before - tasks.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::{reload, temp_store};

    #[test]
    fn test_task_lifecycle() {
        let (_dir, mut store) = temp_store();
        let a = store.add_task(" Read chapter 2 ").unwrap();
        let b = store.add_task("Email TA").unwrap();
        assert_eq!(a.text, "Read chapter 2");
        assert!(store.add_task("  ").unwrap_err().is_validation());

        let done = store.set_task_done(&a.id, true).unwrap();
        assert!(done.completed_at.is_some());
        let undone = store.set_task_done(&a.id, false).unwrap();
        assert!(undone.completed_at.is_none());

        store.set_task_done(&b.id, true).unwrap();
        assert_eq!(store.clear_completed_tasks(), 1);
        assert_eq!(store.clear_completed_tasks(), 0);

        let reloaded = reload(&store);
        assert_eq!(reloaded.tasks().len(), 1);
        assert_eq!(reloaded.tasks()[0].id, a.id);
    }

    #[test]
    fn test_unknown_task_is_not_found() {
        let (_dir, mut store) = temp_store();
        assert!(store.set_task_done("x", true).unwrap_err().is_not_found());
        assert!(store.delete_task("x").unwrap_err().is_not_found());
    }
}
