use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{instrument, warn};
use validator::Validate;

use crate::error::TaskError;
use crate::live_data::{LiveData, SingleLiveEvent};
use crate::messages::Message;
use crate::models::{Task, TaskDraft};
use crate::repository::TasksRepository;
use crate::view_models::{BaseViewModel, TaskScope};

/// Whether the screen creates a task or rewrites a loaded one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    New,
    Existing { id: String, completed: bool },
}

#[derive(Debug, Default)]
struct EditState {
    mode: Option<EditMode>,
    is_data_loaded: bool,
}

/// State behind the screen that creates or edits a task
pub struct AddEditTaskViewModel {
    state: Arc<FormState>,
    scope: TaskScope,
}

struct FormState {
    repository: Arc<TasksRepository>,
    base: BaseViewModel,
    title: LiveData<String>,
    description: LiveData<String>,
    edit: Mutex<EditState>,
    task_updated_event: SingleLiveEvent<bool>,
}

impl AddEditTaskViewModel {
    pub fn new(repository: Arc<TasksRepository>) -> Self {
        let state = FormState {
            repository,
            base: BaseViewModel::new(),
            title: LiveData::default(),
            description: LiveData::default(),
            edit: Mutex::new(EditState::default()),
            task_updated_event: SingleLiveEvent::new(),
        };
        Self {
            state: Arc::new(state),
            scope: TaskScope::new(),
        }
    }

    fn launch<F, Fut>(&self, work: F) -> JoinHandle<()>
    where
        F: FnOnce(Arc<FormState>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.scope.spawn(work(Arc::clone(&self.state)))
    }

    /// Enter new-task mode without an id, otherwise load the task to edit
    pub fn start(&self, task_id: Option<&str>) -> JoinHandle<()> {
        let task_id = task_id.map(str::to_owned);
        self.launch(|state| async move { state.start(task_id).await })
    }

    pub fn on_cleared(&self) {
        self.scope.dispose();
    }

    /// Save what the form holds right now
    pub fn save_task(&self) -> JoinHandle<()> {
        let draft = TaskDraft::new(self.state.title.value(), self.state.description.value());
        self.launch(|state| async move { state.save_task(draft).await })
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.title.set_value(title.into());
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.state.description.set_value(description.into());
    }

    pub fn mode(&self) -> Option<EditMode> {
        self.state.edit().mode.clone()
    }

    pub fn is_new_task(&self) -> bool {
        matches!(self.mode(), None | Some(EditMode::New))
    }

    pub fn title(&self) -> &LiveData<String> {
        &self.state.title
    }

    pub fn description(&self) -> &LiveData<String> {
        &self.state.description
    }

    pub fn data_loading(&self) -> &LiveData<bool> {
        self.state.base.data_loading()
    }

    /// Fires after a save, carrying whether the task was new
    pub fn task_updated_event(&self) -> &SingleLiveEvent<bool> {
        &self.state.task_updated_event
    }

    pub fn toast(&self) -> &SingleLiveEvent<Message> {
        self.state.base.toast()
    }
}

impl FormState {
    fn edit(&self) -> MutexGuard<'_, EditState> {
        self.edit.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[instrument(skip(self))]
    async fn start(&self, task_id: Option<String>) {
        if self.base.is_loading() {
            return;
        }

        let Some(task_id) = task_id else {
            self.edit().mode = Some(EditMode::New);
            return;
        };

        {
            let mut edit = self.edit();
            if edit.is_data_loaded {
                return;
            }
            edit.mode = Some(EditMode::Existing {
                id: task_id.clone(),
                completed: false,
            });
        }

        self.base.set_loading(true);
        match self.repository.get_task(&task_id).await {
            Ok(task) => self.on_task_loaded(task),
            Err(e) => {
                self.base.set_loading(false);
                warn!(error = %e, "Failed to load task for editing");
                self.base.show_toast(Message::from(&e));
            }
        }
    }

    fn on_task_loaded(&self, task: Task) {
        {
            let mut edit = self.edit();
            edit.mode = Some(EditMode::Existing {
                id: task.id,
                completed: task.completed,
            });
            edit.is_data_loaded = true;
        }
        self.title.set_value(task.title.unwrap_or_default());
        self.description.set_value(task.description.unwrap_or_default());
        self.base.set_loading(false);
    }

    #[instrument(skip(self, draft))]
    async fn save_task(&self, draft: TaskDraft) {
        if let Err(e) = draft.validate() {
            let err = TaskError::from(e);
            warn!(error = %err, "Rejected task");
            self.base.show_toast(Message::from(&err));
            return;
        }

        let mode = self.edit().mode.clone().unwrap_or(EditMode::New);
        let (task, is_new_task) = match mode {
            EditMode::New => (draft.into_new_task(), true),
            EditMode::Existing { id, completed } => (draft.into_existing_task(id, completed), false),
        };

        match self.repository.save_task(task).await {
            Ok(()) => self.task_updated_event.emit(is_new_task),
            Err(e) => {
                warn!(error = %e, "Failed to save task");
                self.base.show_toast(Message::from(&e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryTaskStore, MockTaskStore, TaskStore};
    use mockall::predicate::*;
    use std::time::Duration;

    fn view_model(store: impl TaskStore + 'static) -> AddEditTaskViewModel {
        let repository = TasksRepository::with_latency(Arc::new(store), Duration::ZERO);
        AddEditTaskViewModel::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn test_save_new_task_to_repository() {
        let store = InMemoryTaskStore::new();
        let vm = view_model(store.clone());
        vm.start(None).await.unwrap();

        vm.set_title("New Task Title");
        vm.set_description("Some Task Description");
        vm.save_task().await.unwrap();

        let saved = store.get_all().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title.as_deref(), Some("New Task Title"));
        assert_eq!(saved[0].description.as_deref(), Some("Some Task Description"));
        assert!(saved[0].is_active());
        assert_eq!(vm.task_updated_event().take(), Some(true));
    }

    #[tokio::test]
    async fn test_empty_task_is_rejected() {
        let mut store = MockTaskStore::new();
        store.expect_insert().never();
        let vm = view_model(store);
        vm.start(None).await.unwrap();

        vm.set_title("");
        vm.set_description("   ");
        vm.save_task().await.unwrap();

        assert_eq!(vm.toast().take(), Some(Message::EmptyTask));
        assert_eq!(vm.task_updated_event().take(), None);
    }

    #[tokio::test]
    async fn test_start_populates_existing_task() {
        let existing = Task::with_id("1", Some("Title1".into()), None, true);
        let vm = view_model(InMemoryTaskStore::with_tasks([existing]));

        vm.start(Some("1")).await.unwrap();

        assert_eq!(vm.title().value(), "Title1");
        assert_eq!(vm.description().value(), "");
        assert!(!vm.data_loading().value());
        assert_eq!(
            vm.mode(),
            Some(EditMode::Existing {
                id: "1".into(),
                completed: true
            })
        );
    }

    #[tokio::test]
    async fn test_start_twice_loads_once() {
        let mut store = MockTaskStore::new();
        store
            .expect_get_by_id()
            .with(eq("1"))
            .times(1)
            .returning(|id| Ok(Some(Task::with_id(id, Some("Title".into()), None, false))));
        let vm = view_model(store);

        vm.start(Some("1")).await.unwrap();
        vm.set_title("Edited");
        vm.start(Some("1")).await.unwrap();

        assert_eq!(vm.title().value(), "Edited");
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_completion() {
        let existing = Task::with_id("1", Some("Title1".into()), Some("Desc".into()), true);
        let store = InMemoryTaskStore::with_tasks([existing]);
        let vm = view_model(store.clone());
        vm.start(Some("1")).await.unwrap();

        vm.set_title("Renamed");
        vm.save_task().await.unwrap();

        let saved = store.get_by_id("1").await.unwrap().unwrap();
        assert_eq!(saved.title.as_deref(), Some("Renamed"));
        assert_eq!(saved.description.as_deref(), Some("Desc"));
        assert!(saved.completed);
        assert_eq!(store.get_all().await.unwrap().len(), 1);
        assert_eq!(vm.task_updated_event().take(), Some(false));
    }

    #[tokio::test]
    async fn test_start_failure_clears_loading_and_reports() {
        let mut store = MockTaskStore::new();
        store
            .expect_get_by_id()
            .returning(|_| Err(TaskError::Store("unavailable".into())));
        let vm = view_model(store);

        vm.start(Some("1")).await.unwrap();

        assert!(!vm.data_loading().value());
        assert_eq!(
            vm.toast().take(),
            Some(Message::Error("Store error: unavailable".into()))
        );
    }

    #[tokio::test]
    async fn test_save_failure_shows_error() {
        let mut store = MockTaskStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(TaskError::Store("disk full".into())));
        let vm = view_model(store);
        vm.start(None).await.unwrap();

        vm.set_title("Title");
        vm.save_task().await.unwrap();

        assert_eq!(vm.task_updated_event().take(), None);
        assert_eq!(
            vm.toast().take(),
            Some(Message::Error("Store error: disk full".into()))
        );
    }

    #[test]
    fn test_defaults_to_new_task() {
        let vm = view_model(InMemoryTaskStore::new());
        assert!(vm.is_new_task());
        assert_eq!(vm.mode(), None);
    }

    #[tokio::test]
    async fn test_on_cleared_aborts_pending_save() {
        let store = InMemoryTaskStore::new();
        let repository = TasksRepository::with_latency(Arc::new(store), Duration::from_secs(3600));
        let vm = AddEditTaskViewModel::new(Arc::new(repository));
        vm.start(None).await.unwrap();
        vm.set_title("Title");

        let pending = vm.save_task();
        tokio::task::yield_now().await;
        vm.on_cleared();

        assert!(pending.await.unwrap_err().is_cancelled());
        assert_eq!(vm.task_updated_event().take(), None);
    }

    #[tokio::test]
    async fn test_dropping_view_model_aborts_pending_load() {
        let existing = Task::with_id("1", Some("Title1".into()), None, false);
        let store = InMemoryTaskStore::with_tasks([existing]);
        let repository = TasksRepository::with_latency(Arc::new(store), Duration::from_secs(3600));
        let vm = AddEditTaskViewModel::new(Arc::new(repository));
        let title_rx = vm.title().subscribe();

        let pending = vm.start(Some("1"));
        tokio::task::yield_now().await;
        drop(vm);

        assert!(pending.await.unwrap_err().is_cancelled());
        assert!(title_rx.has_changed().is_err());
    }
}
