use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{Instrument, debug, instrument};

use crate::error::{TaskError, TaskResult};
use crate::models::Task;
use crate::store::TaskStore;

/// Latency the repository adds to every store round trip by default
pub const SERVICE_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Debug, Default)]
struct TaskCache {
    tasks: Option<Vec<Task>>,
    dirty: bool,
}

impl TaskCache {
    /// Cached tasks, unless the cache is missing or flagged stale
    fn fresh(&self) -> Option<&Vec<Task>> {
        if self.dirty { None } else { self.tasks.as_ref() }
    }

    fn refresh(&mut self, tasks: Vec<Task>) {
        self.tasks = Some(tasks);
        self.dirty = false;
    }

    fn upsert(&mut self, task: Task) {
        let Some(tasks) = self.tasks.as_mut() else {
            return;
        };
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => tasks.push(task),
        }
    }

    fn set_completed(&mut self, id: &str, completed: bool) {
        if let Some(task) = self.tasks.as_mut().and_then(|tasks| tasks.iter_mut().find(|t| t.id == id)) {
            task.completed = completed;
        }
    }

    fn retain(&mut self, keep: impl FnMut(&Task) -> bool) {
        if let Some(tasks) = self.tasks.as_mut() {
            tasks.retain(keep);
        }
    }
}

type SharedCache = Arc<RwLock<TaskCache>>;

/// Single source of truth for task data shown on screen
///
/// Fronts a [`TaskStore`] with an in-memory cache and a fixed artificial
/// latency. Each store call runs on a background tokio task together with the
/// matching cache update; the latency elapses after both. A caller that stops
/// waiting (timeout, aborted screen) therefore never leaves the cache behind
/// the store: a clean cache always matches the store.
///
/// Construct one per application and share it behind an `Arc`.
pub struct TasksRepository {
    store: Arc<dyn TaskStore>,
    cache: SharedCache,
    latency: Duration,
}

impl TasksRepository {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self::with_latency(store, SERVICE_LATENCY)
    }

    pub fn with_latency(store: Arc<dyn TaskStore>, latency: Duration) -> Self {
        Self {
            store,
            cache: Arc::new(RwLock::new(TaskCache::default())),
            latency,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Force the next read to bypass the cache
    pub async fn set_cache_is_dirty(&self, dirty: bool) {
        self.cache.write().await.dirty = dirty;
    }

    /// Run a store operation and its cache update on a background task, then
    /// wait out the service latency
    async fn run_on_io<T, F, Fut>(&self, operation: F) -> TaskResult<T>
    where
        F: FnOnce(Arc<dyn TaskStore>, SharedCache) -> Fut,
        Fut: Future<Output = TaskResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let pending = operation(Arc::clone(&self.store), Arc::clone(&self.cache));
        let latency = self.latency;

        tokio::spawn(
            async move {
                let result = pending.await;
                if !latency.is_zero() {
                    tokio::time::sleep(latency).await;
                }
                result
            }
            .in_current_span(),
        )
        .await?
    }

    #[instrument(skip(self))]
    pub async fn get_tasks(&self) -> TaskResult<Vec<Task>> {
        if let Some(tasks) = self.cache.read().await.fresh() {
            debug!(count = tasks.len(), "Serving tasks from cache");
            return Ok(tasks.clone());
        }

        self.run_on_io(|store, cache| async move {
            let tasks = store.get_all().await?;
            cache.write().await.refresh(tasks.clone());
            debug!(count = tasks.len(), "Refreshed task cache");
            Ok(tasks)
        })
        .await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: &str) -> TaskResult<Task> {
        let cached = self
            .cache
            .read()
            .await
            .fresh()
            .and_then(|tasks| tasks.iter().find(|t| t.id == id).cloned());
        if let Some(task) = cached {
            debug!("Serving task from cache");
            return Ok(task);
        }

        let owned_id = id.to_string();
        self.run_on_io(|store, _| async move { store.get_by_id(&owned_id).await })
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Insert or replace a task
    #[instrument(skip(self, task), fields(task_id = %task.id))]
    pub async fn save_task(&self, task: Task) -> TaskResult<()> {
        if task.is_empty() {
            return Err(TaskError::Validation(format!(
                "task {} has neither title nor description",
                task.id
            )));
        }

        self.run_on_io(|store, cache| async move {
            store.insert(task.clone()).await?;
            cache.write().await.upsert(task);
            Ok(())
        })
        .await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn complete_task(&self, id: &str) -> TaskResult<()> {
        self.set_completed(id, true).await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn activate_task(&self, id: &str) -> TaskResult<()> {
        self.set_completed(id, false).await
    }

    async fn set_completed(&self, id: &str, completed: bool) -> TaskResult<()> {
        let owned_id = id.to_string();
        self.run_on_io(|store, cache| async move {
            if !store.set_completed(&owned_id, completed).await? {
                debug!("No stored task to update");
            }
            cache.write().await.set_completed(&owned_id, completed);
            Ok(())
        })
        .await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: &str) -> TaskResult<()> {
        let owned_id = id.to_string();
        self.run_on_io(|store, cache| async move {
            store.delete_by_id(&owned_id).await?;
            cache.write().await.retain(|t| t.id != owned_id);
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_all_tasks(&self) -> TaskResult<()> {
        self.run_on_io(|store, cache| async move {
            store.delete_all().await?;
            cache.write().await.refresh(Vec::new());
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn clear_completed_tasks(&self) -> TaskResult<()> {
        self.run_on_io(|store, cache| async move {
            let removed = store.delete_completed().await?;
            debug!(removed, "Cleared completed tasks");
            cache.write().await.retain(Task::is_active);
            Ok(())
        })
        .await
    }
}
