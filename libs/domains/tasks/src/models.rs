use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumCount, EnumIter, EnumString};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::messages::Message;

/// Task entity - a single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: Option<String>,
    /// Task description
    pub description: Option<String>,
    /// Whether the task is completed
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create an active task with a freshly generated id
    pub fn new(title: Option<String>, description: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, description, false)
    }

    /// Rebuild a task whose id is already known
    pub fn with_id(
        id: impl Into<String>,
        title: Option<String>,
        description: Option<String>,
        completed: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            description,
            completed,
        }
    }

    /// Title shown in lists: the title if present, otherwise the description
    pub fn title_for_list(&self) -> Option<&str> {
        match self.title.as_deref() {
            Some(title) if !is_blank(Some(title)) => Some(title),
            _ => self.description.as_deref(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }

    /// A task with neither title nor description must never be persisted
    pub fn is_empty(&self) -> bool {
        is_blank(self.title.as_deref()) && is_blank(self.description.as_deref())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The user-editable part of a task, as typed on the add/edit screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
#[validate(schema(function = "validate_not_empty"))]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

fn validate_not_empty(draft: &TaskDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() && draft.description.trim().is_empty() {
        let mut error = ValidationError::new("empty_task");
        error.message = Some(Cow::Owned(Message::EmptyTask.to_string()));
        return Err(error);
    }
    Ok(())
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Build a brand new task with a generated id
    pub fn into_new_task(self) -> Task {
        Task::new(non_blank(self.title), non_blank(self.description))
    }

    /// Build the replacement for an existing task, keeping its id and completion flag
    pub fn into_existing_task(self, id: impl Into<String>, completed: bool) -> Task {
        Task::with_id(id, non_blank(self.title), non_blank(self.description), completed)
    }
}

/// Which tasks the list screen shows
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TasksFilterType {
    /// Do not filter tasks
    #[default]
    All = 0,
    /// Only tasks that are not completed yet
    Active = 1,
    /// Only completed tasks
    Completed = 2,
}

/// Labels, icon and affordances the list screen shows for a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDisplay {
    pub label: &'static str,
    pub no_tasks_label: &'static str,
    pub no_task_icon_res: &'static str,
    pub tasks_add_view_visible: bool,
}

// Indexed by discriminant; the array length keeps it total over the enum.
static FILTER_DISPLAY: [FilterDisplay; TasksFilterType::COUNT] = [
    FilterDisplay {
        label: "All TO-DOs",
        no_tasks_label: "You have no TO-DOs!",
        no_task_icon_res: "ic_assignment_turned_in_24dp",
        tasks_add_view_visible: true,
    },
    FilterDisplay {
        label: "Active TO-DOs",
        no_tasks_label: "You have no active TO-DOs!",
        no_task_icon_res: "ic_check_circle_24dp",
        tasks_add_view_visible: false,
    },
    FilterDisplay {
        label: "Completed TO-DOs",
        no_tasks_label: "You have no completed TO-DOs!",
        no_task_icon_res: "ic_verified_user_24dp",
        tasks_add_view_visible: false,
    },
];

impl TasksFilterType {
    pub fn display(self) -> &'static FilterDisplay {
        &FILTER_DISPLAY[self as usize]
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            TasksFilterType::All => true,
            TasksFilterType::Active => task.is_active(),
            TasksFilterType::Completed => task.is_completed(),
        }
    }

    /// Tasks passing this filter, in their original order
    pub fn apply(self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn task(id: &str, completed: bool) -> Task {
        Task::with_id(id, Some(format!("Title {id}")), None, completed)
    }

    #[test]
    fn test_task_new_generates_unique_ids() {
        let a = Task::new(Some("a".into()), None);
        let b = Task::new(Some("a".into()), None);
        assert_ne!(a.id, b.id);
        assert!(a.is_active());
    }

    #[test]
    fn test_task_is_empty() {
        assert!(Task::new(None, None).is_empty());
        assert!(Task::new(Some("  ".into()), Some(String::new())).is_empty());
        assert!(!Task::new(Some("Title".into()), None).is_empty());
        assert!(!Task::new(None, Some("Description".into())).is_empty());
    }

    #[test]
    fn test_title_for_list_falls_back_to_description() {
        let titled = Task::new(Some("Title".into()), Some("Description".into()));
        assert_eq!(titled.title_for_list(), Some("Title"));

        let untitled = Task::new(Some(String::new()), Some("Description".into()));
        assert_eq!(untitled.title_for_list(), Some("Description"));
    }

    #[test]
    fn test_draft_validation_rejects_blank() {
        let err = TaskDraft::new(" ", "").validate().unwrap_err();
        assert!(err.to_string().contains("Tasks cannot be empty"));
        assert!(TaskDraft::new("Title", "").validate().is_ok());
        assert!(TaskDraft::new("", "Description").validate().is_ok());
    }

    #[test]
    fn test_draft_into_existing_task_keeps_identity() {
        let task = TaskDraft::new("Title", "").into_existing_task("id-1", true);
        assert_eq!(task.id, "id-1");
        assert_eq!(task.title.as_deref(), Some("Title"));
        assert_eq!(task.description, None);
        assert!(task.completed);
    }

    #[test]
    fn test_filter_partitions_are_disjoint_and_exhaustive() {
        let tasks = vec![
            task("1", false),
            task("2", true),
            task("3", true),
            task("4", false),
            task("5", false),
        ];

        let all = TasksFilterType::All.apply(&tasks);
        let active = TasksFilterType::Active.apply(&tasks);
        let completed = TasksFilterType::Completed.apply(&tasks);

        assert_eq!(all.len(), 5);
        assert_eq!(active.len(), 3);
        assert_eq!(completed.len(), 2);
        assert_eq!(active.len() + completed.len(), all.len());
        assert!(active.iter().all(|a| !completed.iter().any(|c| c.id == a.id)));
    }

    #[test]
    fn test_filter_preserves_order_and_input() {
        let tasks = vec![task("1", true), task("2", false), task("3", true)];
        let completed = TasksFilterType::Completed.apply(&tasks);
        let ids: Vec<_> = completed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn test_filter_display_table() {
        for filter in TasksFilterType::iter() {
            let display = filter.display();
            assert_eq!(
                display.tasks_add_view_visible,
                filter == TasksFilterType::All
            );
        }
        assert_eq!(TasksFilterType::Active.display().label, "Active TO-DOs");
        assert_eq!(
            TasksFilterType::Completed.display().no_task_icon_res,
            "ic_verified_user_24dp"
        );
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task::with_id("1", Some("Title".into()), None, true);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "title": "Title",
                "description": null,
                "completed": true
            })
        );

        let parsed: Task = serde_json::from_str(r#"{"id":"2","title":null,"description":"D"}"#).unwrap();
        assert!(parsed.is_active());
        assert_eq!(
            serde_json::to_string(&TasksFilterType::Completed).unwrap(),
            r#""completed""#
        );
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(
            "completed".parse::<TasksFilterType>().unwrap(),
            TasksFilterType::Completed
        );
        assert_eq!(
            "Active".parse::<TasksFilterType>().unwrap(),
            TasksFilterType::Active
        );
        assert!("done".parse::<TasksFilterType>().is_err());
        assert_eq!(TasksFilterType::All.to_string(), "all");
    }
}
