//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: in-memory SQLite with migrations applied (feature: "sqlite")
//! - `TestDataBuilder`: deterministic test data generation (always available)
//! - `assertions`: custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! async fn my_sqlite_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let task_id = builder.task_id("main");
//!     let title = builder.title("main");
//! }
//! ```

use uuid::Uuid;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_save_task");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a deterministic task id, distinct per suffix
    pub fn task_id(&self, suffix: &str) -> String {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        for (i, b) in suffix.bytes().enumerate() {
            uuid_bytes[8 + i % 8] ^= b.wrapping_add(i as u8);
        }
        Uuid::from_bytes(uuid_bytes).to_string()
    }

    /// Generate a unique task title
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let title = builder.title("main");
    /// // Returns: "test-title-12345-main"
    /// ```
    pub fn title(&self, suffix: &str) -> String {
        format!("test-title-{}-{}", self.seed, suffix)
    }

    /// Generate a unique task description
    pub fn description(&self, suffix: &str) -> String {
        format!("test-description-{}-{}", self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that two id lists contain the same ids, ignoring order
    pub fn assert_same_ids<S: AsRef<str>>(actual: &[S], expected: &[S], context: &str) {
        let mut actual: Vec<&str> = actual.iter().map(AsRef::as_ref).collect();
        let mut expected: Vec<&str> = expected.iter().map(AsRef::as_ref).collect();
        actual.sort_unstable();
        expected.sort_unstable();
        assert_eq!(
            actual, expected,
            "{}: expected ids {:?}, got {:?}",
            context, expected, actual
        );
    }
}
