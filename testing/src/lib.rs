//! # Todo Store Testing
//!
//! Testing utilities and helpers for the todo store.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - A middleware that records what the store dispatched
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_testing::{RecordingMiddleware, SequentialIdGenerator};
//! use todo_store_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_create_flow() {
//!     let recorder = RecordingMiddleware::new();
//!     let store = Store::new(AppState::default(), AppReducer::new(), test_environment())
//!         .with_middleware(recorder.clone());
//!
//!     store.send(AppAction::create("Buy milk")).await?;
//!
//!     assert_eq!(recorder.action_types(), vec!["todos/create"]);
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use todo_store_core::action::Action;
use todo_store_core::environment::IdGenerator;
use todo_store_runtime::Middleware;


/// Mock implementations for testing.
pub mod mocks {
    use super::{Action, Arc, AtomicU64, IdGenerator, Middleware, Mutex, Ordering};

    /// Predictable id generator for deterministic tests
    ///
    /// Yields `"{prefix}-1"`, `"{prefix}-2"`, ... in call order.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_store_testing::mocks::SequentialIdGenerator;
    /// use todo_store_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new("todo");
    /// assert_eq!(ids.next_id(), "todo-1");
    /// assert_eq!(ids.next_id(), "todo-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose ids start with `prefix`
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }

        /// Number of ids handed out so far
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.next.load(Ordering::SeqCst) - 1
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}-{n}", self.prefix)
        }
    }

    /// Create a default sequential id generator for tests (`todo-1`, `todo-2`, ...)
    #[must_use]
    pub fn test_ids() -> SequentialIdGenerator {
        SequentialIdGenerator::new("todo")
    }

    /// Middleware that records the type of every action it observes
    ///
    /// Clones share the same log, so keep one clone to inspect after handing
    /// the other to a store. Only actions that completed the reducer pass are
    /// recorded.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingMiddleware {
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl RecordingMiddleware {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Action types observed so far, in dispatch order
        #[must_use]
        pub fn action_types(&self) -> Vec<&'static str> {
            self.seen
                .lock()
                .map(|seen| seen.clone())
                .unwrap_or_default()
        }
    }

    impl<S, A: Action> Middleware<S, A> for RecordingMiddleware {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn after(&self, action: &A, _previous: &S, _next: &S) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(action.action_type());
            }
        }
    }
}

// Re-export commonly used items
pub use mocks::{RecordingMiddleware, SequentialIdGenerator, test_ids};
pub use reducer_test::ReducerTest;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let ids = test_ids();
        assert_eq!(ids.issued(), 0);
        assert_eq!(ids.next_id(), "todo-1");
        assert_eq!(ids.next_id(), "todo-2");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_sequential_ids_custom_prefix() {
        let ids = SequentialIdGenerator::new("item");
        assert_eq!(ids.next_id(), "item-1");
    }
}
