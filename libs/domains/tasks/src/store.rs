use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::TaskResult;
use crate::models::Task;

/// Store trait for Task persistence
///
/// The durable record table behind the repository. Lookups signal "not
/// found" with `Ok(None)` / `Ok(false)`; every other failure is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Read every task
    async fn get_all(&self) -> TaskResult<Vec<Task>>;

    /// Get a task by ID
    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>>;

    /// Insert a task, replacing any existing task with the same ID
    async fn insert(&self, task: Task) -> TaskResult<()>;

    /// Set the completion flag, returning false when no such task exists
    async fn set_completed(&self, id: &str, completed: bool) -> TaskResult<bool>;

    /// Delete a task by ID
    async fn delete_by_id(&self, id: &str) -> TaskResult<bool>;

    /// Delete every task, returning how many were removed
    async fn delete_all(&self) -> TaskResult<u64>;

    /// Delete completed tasks, returning how many were removed
    async fn delete_completed(&self) -> TaskResult<u64>;
}

/// In-memory implementation of TaskStore (for development/testing)
///
/// Keeps tasks in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds the given tasks
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(tasks.into_iter().collect())),
        }
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn get_all(&self) -> TaskResult<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, task: Task) -> TaskResult<()> {
        let mut tasks = self.tasks.write().await;

        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => {
                tracing::info!(task_id = %task.id, "Inserted task");
                tasks.push(task);
            }
        }
        Ok(())
    }

    async fn set_completed(&self, id: &str, completed: bool) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;

        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &str) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        if tasks.len() < before {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_all(&self) -> TaskResult<u64> {
        let mut tasks = self.tasks.write().await;
        let removed = tasks.len() as u64;
        tasks.clear();
        Ok(removed)
    }

    async fn delete_completed(&self) -> TaskResult<u64> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(Task::is_active);
        Ok((before - tasks.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, completed: bool) -> Task {
        Task::with_id(id, Some(format!("Title {id}")), None, completed)
    }

    #[tokio::test]
    async fn test_insert_and_get_task() {
        let store = InMemoryTaskStore::new();
        store.insert(task("1", false)).await.unwrap();

        let fetched = store.get_by_id("1").await.unwrap();
        assert_eq!(fetched, Some(task("1", false)));
        assert_eq!(store.get_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_replaces_existing_id() {
        let store = InMemoryTaskStore::with_tasks([task("1", false), task("2", false)]);

        let mut updated = task("1", true);
        updated.title = Some("Renamed".into());
        store.insert(updated.clone()).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], updated);
    }

    #[tokio::test]
    async fn test_set_completed_reports_missing_task() {
        let store = InMemoryTaskStore::with_tasks([task("1", false)]);

        assert!(store.set_completed("1", true).await.unwrap());
        assert!(!store.set_completed("2", true).await.unwrap());
        assert!(store.get_by_id("1").await.unwrap().unwrap().completed);
    }

    #[tokio::test]
    async fn test_delete_completed_keeps_active() {
        let store =
            InMemoryTaskStore::with_tasks([task("1", false), task("2", true), task("3", true)]);

        assert_eq!(store.delete_completed().await.unwrap(), 2);
        let remaining: Vec<_> = store.get_all().await.unwrap();
        assert_eq!(remaining, vec![task("1", false)]);

        assert!(store.delete_by_id("1").await.unwrap());
        assert!(!store.delete_by_id("1").await.unwrap());
        assert_eq!(store.delete_all().await.unwrap(), 0);
    }
}
