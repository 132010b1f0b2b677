use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{instrument, warn};

use crate::live_data::{LiveData, SingleLiveEvent};
use crate::messages::Message;
use crate::models::Task;
use crate::navigation::{EDIT_RESULT_OK, REQUEST_CODE, ScreenResult};
use crate::repository::TasksRepository;
use crate::view_models::{BaseViewModel, TaskScope};

/// State behind the screen showing a single task
pub struct TaskDetailViewModel {
    state: Arc<DetailState>,
    scope: TaskScope,
}

struct DetailState {
    repository: Arc<TasksRepository>,
    base: BaseViewModel,
    task: LiveData<Option<Task>>,
    is_data_available: LiveData<bool>,
    completed: LiveData<bool>,
    edit_task_command: SingleLiveEvent<()>,
    delete_task_command: SingleLiveEvent<()>,
}

impl TaskDetailViewModel {
    pub fn new(repository: Arc<TasksRepository>) -> Self {
        let state = DetailState {
            repository,
            base: BaseViewModel::new(),
            task: LiveData::new(None),
            is_data_available: LiveData::new(false),
            completed: LiveData::new(false),
            edit_task_command: SingleLiveEvent::new(),
            delete_task_command: SingleLiveEvent::new(),
        };
        Self {
            state: Arc::new(state),
            scope: TaskScope::new(),
        }
    }

    fn launch<F, Fut>(&self, work: F) -> JoinHandle<()>
    where
        F: FnOnce(Arc<DetailState>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.scope.spawn(work(Arc::clone(&self.state)))
    }

    /// Load the task to show. Without an id there is nothing to do.
    pub fn start(&self, task_id: Option<&str>) -> JoinHandle<()> {
        let task_id = task_id.map(str::to_owned);
        self.launch(|state| async move {
            if let Some(task_id) = task_id {
                state.load(&task_id).await;
            }
        })
    }

    pub fn on_cleared(&self) {
        self.scope.dispose();
    }

    pub fn set_completed(&self, completed: bool) -> JoinHandle<()> {
        self.launch(move |state| async move { state.set_completed(completed).await })
    }

    pub fn delete_task(&self) -> JoinHandle<()> {
        self.launch(|state| async move { state.delete_task().await })
    }

    pub fn edit_task(&self) {
        self.state.edit_task_command.emit(());
    }

    /// Result code this screen must finish with after a child screen returns
    pub fn handle_activity_result(&self, request_code: i32, result_code: i32) -> Option<i32> {
        if request_code == REQUEST_CODE
            && ScreenResult::from_code(result_code) == Some(ScreenResult::AddEditOk)
        {
            Some(EDIT_RESULT_OK)
        } else {
            None
        }
    }

    pub fn task_id(&self) -> Option<String> {
        self.state.task_id()
    }

    pub fn task(&self) -> &LiveData<Option<Task>> {
        &self.state.task
    }

    pub fn is_data_available(&self) -> &LiveData<bool> {
        &self.state.is_data_available
    }

    pub fn completed(&self) -> &LiveData<bool> {
        &self.state.completed
    }

    pub fn data_loading(&self) -> &LiveData<bool> {
        self.state.base.data_loading()
    }

    pub fn edit_task_command(&self) -> &SingleLiveEvent<()> {
        &self.state.edit_task_command
    }

    pub fn delete_task_command(&self) -> &SingleLiveEvent<()> {
        &self.state.delete_task_command
    }

    pub fn toast(&self) -> &SingleLiveEvent<Message> {
        self.state.base.toast()
    }
}

impl DetailState {
    #[instrument(skip(self))]
    async fn load(&self, task_id: &str) {
        self.base.set_loading(true);
        match self.repository.get_task(task_id).await {
            Ok(task) => {
                self.base.set_loading(false);
                self.publish_task(Some(task));
            }
            Err(e) => {
                self.base.set_loading(false);
                warn!(error = %e, "Failed to load task");
                self.publish_task(None);
                self.base.show_toast(Message::LoadingTaskError);
            }
        }
    }

    #[instrument(skip(self))]
    async fn set_completed(&self, completed: bool) {
        if self.base.is_loading() {
            return;
        }
        let Some(task) = self.task.value() else {
            return;
        };

        let result = if completed {
            self.repository.complete_task(&task.id).await
        } else {
            self.repository.activate_task(&task.id).await
        };

        match result {
            Ok(()) => {
                self.publish_task(Some(Task { completed, ..task }));
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
    async fn delete_task(&self) {
        let Some(task_id) = self.task_id() else {
            return;
        };

        match self.repository.delete_task(&task_id).await {
            Ok(()) => self.delete_task_command.emit(()),
            Err(e) => {
                warn!(error = %e, "Failed to delete task");
                self.base.show_toast(Message::from(&e));
            }
        }
    }

    fn task_id(&self) -> Option<String> {
        self.task.value().map(|task| task.id)
    }

    fn publish_task(&self, task: Option<Task>) {
        self.is_data_available.set_value(task.is_some());
        self.completed
            .set_value(task.as_ref().is_some_and(Task::is_completed));
        self.task.set_value(task);
    }
}
