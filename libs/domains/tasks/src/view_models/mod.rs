//! Screen state for the to-do app
//!
//! Each view-model owns the observable state of one screen and talks to the
//! shared [`TasksRepository`](crate::repository::TasksRepository). Views read
//! `LiveData` values and consume one-shot events; they never touch the store.

mod add_edit_task;
mod base;
mod task_detail;
mod tasks;

pub use add_edit_task::{AddEditTaskViewModel, EditMode};
pub use base::{BaseViewModel, TaskScope};
pub use task_detail::TaskDetailViewModel;
pub use tasks::TasksViewModel;
