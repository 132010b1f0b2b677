//! Result codes exchanged between screens
//!
//! Values are fixed: they are compared across screens and in navigation tests.

/// First result code available to applications; lower values are platform-reserved
pub const RESULT_FIRST_USER: i32 = 1;

/// Request code the list and detail screens use when opening another screen
pub const REQUEST_CODE: i32 = 1;

/// The add/edit screen saved a task
pub const ADD_EDIT_RESULT_OK: i32 = RESULT_FIRST_USER + 1;

/// The detail screen deleted its task
pub const DELETE_RESULT_OK: i32 = RESULT_FIRST_USER + 2;

/// The detail screen's task was edited
pub const EDIT_RESULT_OK: i32 = RESULT_FIRST_USER + 3;

/// A recognized result code returned by a child screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenResult {
    AddEditOk,
    DeleteOk,
    EditOk,
}

impl ScreenResult {
    pub fn from_code(result_code: i32) -> Option<Self> {
        match result_code {
            ADD_EDIT_RESULT_OK => Some(ScreenResult::AddEditOk),
            DELETE_RESULT_OK => Some(ScreenResult::DeleteOk),
            EDIT_RESULT_OK => Some(ScreenResult::EditOk),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ScreenResult::AddEditOk => ADD_EDIT_RESULT_OK,
            ScreenResult::DeleteOk => DELETE_RESULT_OK,
            ScreenResult::EditOk => EDIT_RESULT_OK,
        }
    }
}
