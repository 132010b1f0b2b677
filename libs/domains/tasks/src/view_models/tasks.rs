use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{instrument, warn};

use crate::live_data::{LiveData, SingleLiveEvent};
use crate::messages::Message;
use crate::models::{Task, TasksFilterType};
use crate::navigation::{REQUEST_CODE, ScreenResult};
use crate::repository::TasksRepository;
use crate::view_models::{BaseViewModel, TaskScope};

/// State behind the task list screen
///
/// Methods that talk to the repository run on the screen's [`TaskScope`] and
/// return the handle of that work. Dropping the view-model, or calling
/// [`on_cleared`](Self::on_cleared), aborts whatever is still running.
pub struct TasksViewModel {
    state: Arc<TasksState>,
    scope: TaskScope,
}

struct TasksState {
    repository: Arc<TasksRepository>,
    base: BaseViewModel,
    items: LiveData<Vec<Task>>,
    empty: LiveData<bool>,
    current_filtering: LiveData<TasksFilterType>,
    current_filtering_label: LiveData<&'static str>,
    no_tasks_label: LiveData<&'static str>,
    no_task_icon_res: LiveData<&'static str>,
    tasks_add_view_visible: LiveData<bool>,
    open_task_event: SingleLiveEvent<String>,
    new_task_event: SingleLiveEvent<()>,
}

impl TasksViewModel {
    pub fn new(repository: Arc<TasksRepository>) -> Self {
        let display = TasksFilterType::All.display();
        let state = TasksState {
            repository,
            base: BaseViewModel::new(),
            items: LiveData::new(Vec::new()),
            empty: LiveData::new(true),
            current_filtering: LiveData::new(TasksFilterType::All),
            current_filtering_label: LiveData::new(display.label),
            no_tasks_label: LiveData::new(display.no_tasks_label),
            no_task_icon_res: LiveData::new(display.no_task_icon_res),
            tasks_add_view_visible: LiveData::new(display.tasks_add_view_visible),
            open_task_event: SingleLiveEvent::new(),
            new_task_event: SingleLiveEvent::new(),
        };
        Self {
            state: Arc::new(state),
            scope: TaskScope::new(),
        }
    }

    fn launch<F, Fut>(&self, work: F) -> JoinHandle<()>
    where
        F: FnOnce(Arc<TasksState>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.scope.spawn(work(Arc::clone(&self.state)))
    }

    /// Load the list, as a freshly opened screen does
    pub fn start(&self) -> JoinHandle<()> {
        self.load_tasks(false)
    }

    /// Abort any background work; call when the screen goes away
    pub fn on_cleared(&self) {
        self.scope.dispose();
    }

    pub fn set_filtering(&self, filter: TasksFilterType) {
        self.state.set_filtering(filter);
    }

    pub fn load_tasks(&self, force_update: bool) -> JoinHandle<()> {
        self.launch(move |state| async move { state.load_tasks(force_update).await })
    }

    pub fn complete_task(&self, task: &Task, completed: bool) -> JoinHandle<()> {
        let task_id = task.id.clone();
        self.launch(move |state| async move { state.complete_task(&task_id, completed).await })
    }

    pub fn clear_completed_tasks(&self) -> JoinHandle<()> {
        self.launch(|state| async move { state.clear_completed_tasks().await })
    }

    pub fn add_new_task(&self) {
        self.state.new_task_event.emit(());
    }

    pub fn open_task(&self, task_id: impl Into<String>) {
        self.state.open_task_event.emit(task_id.into());
    }

    /// React to a child screen finishing; unknown requests and results are ignored
    pub fn handle_activity_result(&self, request_code: i32, result_code: i32) -> JoinHandle<()> {
        self.launch(move |state| async move {
            state
                .handle_activity_result(request_code, result_code)
                .await
        })
    }

    pub fn items(&self) -> &LiveData<Vec<Task>> {
        &self.state.items
    }

    pub fn empty(&self) -> &LiveData<bool> {
        &self.state.empty
    }

    pub fn data_loading(&self) -> &LiveData<bool> {
        self.state.base.data_loading()
    }

    pub fn current_filtering(&self) -> &LiveData<TasksFilterType> {
        &self.state.current_filtering
    }

    pub fn current_filtering_label(&self) -> &LiveData<&'static str> {
        &self.state.current_filtering_label
    }

    pub fn no_tasks_label(&self) -> &LiveData<&'static str> {
        &self.state.no_tasks_label
    }

    pub fn no_task_icon_res(&self) -> &LiveData<&'static str> {
        &self.state.no_task_icon_res
    }

    pub fn tasks_add_view_visible(&self) -> &LiveData<bool> {
        &self.state.tasks_add_view_visible
    }

    pub fn open_task_event(&self) -> &SingleLiveEvent<String> {
        &self.state.open_task_event
    }

    pub fn new_task_event(&self) -> &SingleLiveEvent<()> {
        &self.state.new_task_event
    }

    pub fn toast(&self) -> &SingleLiveEvent<Message> {
        self.state.base.toast()
    }
}

impl TasksState {
    fn set_filtering(&self, filter: TasksFilterType) {
        let display = filter.display();
        self.current_filtering.set_value(filter);
        self.current_filtering_label.set_value(display.label);
        self.no_tasks_label.set_value(display.no_tasks_label);
        self.no_task_icon_res.set_value(display.no_task_icon_res);
        self.tasks_add_view_visible
            .set_value(display.tasks_add_view_visible);
    }

    #[instrument(skip(self))]
    async fn load_tasks(&self, force_update: bool) {
        if force_update {
            self.repository.set_cache_is_dirty(true).await;
        }

        self.base.set_loading(true);
        match self.repository.get_tasks().await {
            Ok(tasks) => {
                let filtered = self.current_filtering.value().apply(&tasks);
                self.base.set_loading(false);
                self.publish_items(filtered);
            }
            Err(e) => {
                self.base.set_loading(false);
                warn!(error = %e, "Failed to load tasks");
                self.base.show_toast(Message::LoadingTasksError);
            }
        }
    }

    #[instrument(skip(self))]
    async fn complete_task(&self, task_id: &str, completed: bool) {
        let result = if completed {
            self.repository.complete_task(task_id).await
        } else {
            self.repository.activate_task(task_id).await
        };

        match result {
            Ok(()) => {
                let filter = self.current_filtering.value();
                let mut items = self.items.value();
                if let Some(item) = items.iter_mut().find(|t| t.id == task_id) {
                    item.completed = completed;
                }
                items.retain(|t| filter.matches(t));
                self.publish_items(items);

                self.base.show_toast(if completed {
                    Message::TaskMarkedComplete
                } else {
                    Message::TaskMarkedActive
                });
            }
            Err(e) => {
                warn!(error = %e, "Failed to change task completion");
                self.base.show_toast(Message::from(&e));
            }
        }
    }

    #[instrument(skip(self))]
    async fn clear_completed_tasks(&self) {
        match self.repository.clear_completed_tasks().await {
            Ok(()) => {
                self.base.show_toast(Message::CompletedTasksCleared);
                self.load_tasks(false).await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to clear completed tasks");
                self.base.show_toast(Message::from(&e));
            }
        }
    }

    async fn handle_activity_result(&self, request_code: i32, result_code: i32) {
        if request_code != REQUEST_CODE {
            return;
        }

        match ScreenResult::from_code(result_code) {
            Some(ScreenResult::EditOk) => {
                self.base.show_toast(Message::TodoSaved);
                self.load_tasks(false).await;
            }
            Some(ScreenResult::AddEditOk) => {
                self.base.show_toast(Message::TodoAdded);
                self.load_tasks(true).await;
            }
            Some(ScreenResult::DeleteOk) => {
                self.base.show_toast(Message::TaskDeleted);
                self.load_tasks(false).await;
            }
            None => {}
        }
    }

    fn publish_items(&self, items: Vec<Task>) {
        let empty = items.is_empty();
        self.items.set_value(items);
        self.empty.set_value(empty);
    }
}
