//! # Todo Store Core
//!
//! Core traits and types for the todo store.
//!
//! This crate provides the fundamental abstractions for building a
//! single-writer, reducer-driven state container.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by one reducer (a slice) or the aggregate of all slices
//! - **Action**: A tagged value describing an intended state change
//! - **Reducer**: Pure function `(State, Action, Environment) → State`
//! - **Environment**: Injected dependencies (identifier generation)
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Reducers never mutate their input, they return the next value
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use todo_store_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct CounterState {
//!     count: u64,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Reset,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &CounterState, action: &CounterAction, _env: &()) -> CounterState {
//!         match action {
//!             CounterAction::Increment => CounterState { count: state.count + 1 },
//!             CounterAction::Reset => CounterState::default(),
//!         }
//!     }
//! }
//!
//! let state = CounterReducer.reduce(&CounterState::default(), &CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

/// Reducer composition utilities
pub mod composition;

/// Action module - the common interface of everything that can be dispatched
///
/// Actions carry a stable type string of the form `"<slice>/<kind>"`, which
/// the runtime uses for logging and metrics. Implement it by hand for
/// aggregate actions, or derive it with `todo_store_macros::Action`.
pub mod action {
    /// An action that can be dispatched to a store
    ///
    /// # Example
    ///
    /// ```
    /// use todo_store_core::action::Action;
    ///
    /// enum SelectionAction {
    ///     Select { id: String },
    /// }
    ///
    /// impl Action for SelectionAction {
    ///     fn action_type(&self) -> &'static str {
    ///         match self {
    ///             Self::Select { .. } => "selectedTodo/select",
    ///         }
    ///     }
    /// }
    ///
    /// let action = SelectionAction::Select { id: "a".into() };
    /// assert_eq!(action.action_type(), "selectedTodo/select");
    /// ```
    pub trait Action {
        /// The `"<slice>/<kind>"` type string of this action
        fn action_type(&self) -> &'static str;
    }
}

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → State`
///
/// They contain all business logic and are deterministic given their
/// environment.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or slice of state) this reducer owns
    /// - `Action`: The action type this reducer observes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Reducers receive the previous state by shared reference and return the
    /// next state. The previous value is never modified, so a caller holding
    /// it keeps a consistent snapshot.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Compute the next state from the previous state and an action
        ///
        /// Actions the reducer does not handle return a value equal to
        /// `state`.
        fn reduce(
            &self,
            state: &Self::State,
            action: &Self::Action,
            env: &Self::Environment,
        ) -> Self::State;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use uuid::Uuid;

    /// Identifier generator - abstracts id minting for testability
    ///
    /// Every call must return a token not returned before by the same
    /// generator. The format is opaque to callers.
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_store_core::environment::{IdGenerator, UuidGenerator};
    ///
    /// let ids = UuidGenerator;
    /// assert_ne!(ids.next_id(), ids.next_id());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn next_id(&self) -> String;
    }

    /// Production id generator backed by random (v4) UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> String {
            Uuid::new_v4().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::environment::{IdGenerator, UuidGenerator};
    use std::collections::HashSet;

    #[test]
    fn uuid_generator_yields_distinct_ids() {
        let ids = UuidGenerator;
        let minted: HashSet<String> = (0..100).map(|_| ids.next_id()).collect();
        assert_eq!(minted.len(), 100);
    }

    #[test]
    fn uuid_generator_yields_parseable_uuids() {
        let id = UuidGenerator.next_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
