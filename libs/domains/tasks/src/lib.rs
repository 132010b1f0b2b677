//! Tasks Domain
//!
//! Core of the to-do app: the task entity, its durable store, a cached
//! repository in front of the store, and the view-models behind each screen.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ View-models  │  ← Screen state, one-shot events, toasts
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Repository  │  ← Cache, dirty flag, service latency
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Store     │  ← Durable table (trait + SQLite / in-memory)
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_tasks::{SqliteTaskStore, TasksRepository, TasksViewModel};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite::memory:").await?;
//!
//! // One repository per application, shared by every screen
//! let repository = Arc::new(TasksRepository::new(Arc::new(SqliteTaskStore::new(db))));
//! let tasks = TasksViewModel::new(Arc::clone(&repository));
//! tasks.load_tasks(false).await?;
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod live_data;
pub mod messages;
pub mod models;
pub mod navigation;
pub mod repository;
pub mod sqlite;
pub mod store;
pub mod view_models;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use live_data::{Event, LiveData, SingleLiveEvent};
pub use messages::Message;
pub use models::{FilterDisplay, Task, TaskDraft, TasksFilterType};
pub use navigation::ScreenResult;
pub use repository::{SERVICE_LATENCY, TasksRepository};
pub use sqlite::SqliteTaskStore;
pub use store::{InMemoryTaskStore, TaskStore};
pub use view_models::{
    AddEditTaskViewModel, BaseViewModel, EditMode, TaskDetailViewModel, TaskScope,
    TasksViewModel,
};
