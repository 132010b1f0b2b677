//! Subcommands, each played out as a short walk through the app's screens

use std::sync::Arc;

use domain_tasks::navigation::{ADD_EDIT_RESULT_OK, DELETE_RESULT_OK, REQUEST_CODE};
use domain_tasks::{
    AddEditTaskViewModel, Message, SingleLiveEvent, Task, TaskDetailViewModel, TasksFilterType,
    TasksRepository, TasksViewModel,
};
use eyre::{Result, bail};

pub struct App {
    repository: Arc<TasksRepository>,
}

impl App {
    pub fn new(repository: Arc<TasksRepository>) -> Self {
        Self { repository }
    }

    fn tasks_screen(&self) -> TasksViewModel {
        TasksViewModel::new(Arc::clone(&self.repository))
    }

    /// Open the detail screen, failing if the task cannot be loaded
    async fn detail_screen(&self, id: &str) -> Result<TaskDetailViewModel> {
        let detail = TaskDetailViewModel::new(Arc::clone(&self.repository));
        detail.start(Some(id)).await?;
        report(detail.toast())?;
        if !detail.is_data_available().value() {
            bail!("{}", Message::LoadingTaskError);
        }
        Ok(detail)
    }

    pub async fn list(&self, filter: TasksFilterType, force: bool, json: bool) -> Result<()> {
        let screen = self.tasks_screen();
        screen.set_filtering(filter);
        screen.load_tasks(force).await?;
        report(screen.toast())?;

        let items = screen.items().value();
        if json {
            println!("{}", serde_json::to_string_pretty(&items)?);
        } else {
            println!("{}", screen.current_filtering_label().value());
            if screen.empty().value() {
                println!("  {}", screen.no_tasks_label().value());
            }
            for task in &items {
                println!("  {}", task_line(task));
            }
        }
        Ok(())
    }

    pub async fn show(&self, id: &str) -> Result<()> {
        let detail = self.detail_screen(id).await?;
        if let Some(task) = detail.task().value() {
            println!("{}", task_line(&task));
            if let Some(description) = task.description.as_deref() {
                println!("\n{}", description);
            }
        }
        Ok(())
    }

    pub async fn add(&self, title: String, description: String) -> Result<()> {
        let list = self.tasks_screen();
        list.add_new_task();
        if list.new_task_event().take().is_none() {
            return Ok(());
        }

        let editor = AddEditTaskViewModel::new(Arc::clone(&self.repository));
        editor.start(None).await?;
        editor.set_title(title);
        editor.set_description(description);
        editor.save_task().await?;
        report(editor.toast())?;

        if editor.task_updated_event().take().is_some() {
            list.handle_activity_result(REQUEST_CODE, ADD_EDIT_RESULT_OK)
                .await?;
            report(list.toast())?;
        }
        Ok(())
    }

    pub async fn edit(
        &self,
        id: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<()> {
        let detail = self.detail_screen(id).await?;
        detail.edit_task();
        if detail.edit_task_command().take().is_none() {
            return Ok(());
        }

        let editor = AddEditTaskViewModel::new(Arc::clone(&self.repository));
        editor.start(detail.task_id().as_deref()).await?;
        report(editor.toast())?;
        if let Some(title) = title {
            editor.set_title(title);
        }
        if let Some(description) = description {
            editor.set_description(description);
        }
        editor.save_task().await?;
        report(editor.toast())?;

        if editor.task_updated_event().take().is_none() {
            return Ok(());
        }
        if let Some(code) = detail.handle_activity_result(REQUEST_CODE, ADD_EDIT_RESULT_OK) {
            let list = self.tasks_screen();
            list.handle_activity_result(REQUEST_CODE, code).await?;
            report(list.toast())?;
        }
        Ok(())
    }

    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<()> {
        let detail = self.detail_screen(id).await?;
        detail.set_completed(completed).await?;
        report(detail.toast())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let detail = self.detail_screen(id).await?;
        detail.delete_task().await?;
        report(detail.toast())?;

        if detail.delete_task_command().take().is_some() {
            let list = self.tasks_screen();
            list.handle_activity_result(REQUEST_CODE, DELETE_RESULT_OK)
                .await?;
            report(list.toast())?;
        }
        Ok(())
    }

    pub async fn clear_completed(&self) -> Result<()> {
        let list = self.tasks_screen();
        list.clear_completed_tasks().await?;
        report(list.toast())
    }
}

/// Print a pending toast, turning failures into errors
fn report(toast: &SingleLiveEvent<Message>) -> Result<()> {
    match toast.take() {
        Some(message) if message.is_error() => bail!("{}", message),
        Some(message) => {
            println!("{}", message);
            Ok(())
        }
        None => Ok(()),
    }
}

fn task_line(task: &Task) -> String {
    let mark = if task.is_completed() { "x" } else { " " };
    format!(
        "[{}] {} ({})",
        mark,
        task.title_for_list().unwrap_or_default(),
        task.id
    )
}
