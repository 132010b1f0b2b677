//! User-facing messages shown as toasts
//!
//! The text of each message is part of the UI contract: screen-level tests
//! compare it verbatim.

use std::fmt;

use crate::error::TaskError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    TaskMarkedComplete,
    TaskMarkedActive,
    TodoSaved,
    TodoAdded,
    TaskDeleted,
    CompletedTasksCleared,
    EmptyTask,
    LoadingTasksError,
    LoadingTaskError,
    /// A store failure, described for the user
    Error(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Message::TaskMarkedComplete => "Task marked complete",
            Message::TaskMarkedActive => "Task marked active",
            Message::TodoSaved => "TO-DO saved",
            Message::TodoAdded => "TO-DO added",
            Message::TaskDeleted => "Task was deleted",
            Message::CompletedTasksCleared => "Completed tasks cleared",
            Message::EmptyTask => "Tasks cannot be empty",
            Message::LoadingTasksError => "Error while loading tasks",
            Message::LoadingTaskError => "Error while loading task",
            Message::Error(description) => description,
        }
    }

    /// Whether the message reports a failure rather than a completed action
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Message::EmptyTask
                | Message::LoadingTasksError
                | Message::LoadingTaskError
                | Message::Error(_)
        )
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<&TaskError> for Message {
    fn from(err: &TaskError) -> Self {
        match err {
            TaskError::Validation(_) => Message::EmptyTask,
            other => Message::Error(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_catalog_text() {
        assert_eq!(Message::TaskMarkedComplete.to_string(), "Task marked complete");
        assert_eq!(Message::TaskMarkedActive.to_string(), "Task marked active");
        assert_eq!(Message::TodoSaved.to_string(), "TO-DO saved");
        assert_eq!(Message::TodoAdded.to_string(), "TO-DO added");
        assert_eq!(Message::TaskDeleted.to_string(), "Task was deleted");
        assert_eq!(
            Message::CompletedTasksCleared.to_string(),
            "Completed tasks cleared"
        );
        assert_eq!(Message::EmptyTask.to_string(), "Tasks cannot be empty");
    }

    #[test]
    fn test_message_from_store_error_describes_failure() {
        let message = Message::from(&TaskError::Store("disk full".into()));
        assert_eq!(message.to_string(), "Store error: disk full");
        assert!(message.is_error());
    }

    #[test]
    fn test_message_is_error() {
        assert!(!Message::TodoAdded.is_error());
        assert!(!Message::CompletedTasksCleared.is_error());
        assert!(Message::EmptyTask.is_error());
        assert!(Message::LoadingTaskError.is_error());
    }
}
