//! Reducer composition utilities
//!
//! A slice reducer usually only understands its own action type, while the
//! store dispatches one aggregate action type. [`scope_action`] bridges the
//! two: it lifts a reducer over a sub-action into a reducer over the parent
//! action, leaving the slice unchanged for every action that does not belong
//! to it.
//!
//! # Examples
//!
//! ```
//! use todo_store_core::composition::scope_action;
//! use todo_store_core::reducer::Reducer;
//!
//! enum NameAction {
//!     Rename(String),
//! }
//!
//! enum AppAction {
//!     Name(NameAction),
//!     Ping,
//! }
//!
//! struct NameReducer;
//!
//! impl Reducer for NameReducer {
//!     type State = String;
//!     type Action = NameAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, _state: &String, action: &NameAction, _env: &()) -> String {
//!         match action {
//!             NameAction::Rename(name) => name.clone(),
//!         }
//!     }
//! }
//!
//! fn name_action(action: &AppAction) -> Option<&NameAction> {
//!     match action {
//!         AppAction::Name(inner) => Some(inner),
//!         AppAction::Ping => None,
//!     }
//! }
//!
//! let scoped = scope_action(NameReducer, name_action);
//!
//! let name = scoped.reduce(&"old".to_string(), &AppAction::Ping, &());
//! assert_eq!(name, "old");
//!
//! let name = scoped.reduce(&name, &AppAction::Name(NameAction::Rename("new".into())), &());
//! assert_eq!(name, "new");
//! ```

use crate::reducer::Reducer;

/// Scopes a reducer to the subset of a larger action type it understands.
///
/// # Type Parameters
///
/// - `A`: The parent action type
/// - `R`: The inner reducer, which handles a sub-action of `A`
///
/// `extract` returns the sub-action carried by a parent action, or `None`
/// when the action belongs to another slice.
pub fn scope_action<A, R>(
    reducer: R,
    extract: fn(&A) -> Option<&R::Action>,
) -> ScopedReducer<A, R>
where
    R: Reducer,
{
    ScopedReducer { reducer, extract }
}

/// A reducer that only sees the parent actions carrying its sub-action.
///
/// Created by [`scope_action`].
pub struct ScopedReducer<A, R>
where
    R: Reducer,
{
    reducer: R,
    extract: fn(&A) -> Option<&R::Action>,
}

impl<A, R> Reducer for ScopedReducer<A, R>
where
    R: Reducer,
    R::State: Clone,
{
    type State = R::State;
    type Action = A;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &Self::State,
        action: &Self::Action,
        env: &Self::Environment,
    ) -> Self::State {
        match (self.extract)(action) {
            Some(sub_action) => self.reducer.reduce(state, sub_action, env),
            None => state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct SubState {
        value: i32,
    }

    enum SubAction {
        Add(i32),
        Multiply(i32),
    }

    enum ParentAction {
        Sub(SubAction),
        Other,
    }

    struct SubReducer;

    impl Reducer for SubReducer {
        type State = SubState;
        type Action = SubAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &Self::State,
            action: &Self::Action,
            _env: &Self::Environment,
        ) -> Self::State {
            match action {
                SubAction::Add(n) => SubState {
                    value: state.value + n,
                },
                SubAction::Multiply(n) => SubState {
                    value: state.value * n,
                },
            }
        }
    }

    fn extract(action: &ParentAction) -> Option<&SubAction> {
        match action {
            ParentAction::Sub(sub) => Some(sub),
            ParentAction::Other => None,
        }
    }

    #[test]
    fn test_scoped_reducer_handles_own_actions() {
        let scoped = scope_action(SubReducer, extract);

        let state = SubState { value: 5 };
        let state = scoped.reduce(&state, &ParentAction::Sub(SubAction::Add(3)), &());
        assert_eq!(state.value, 8);

        let state = scoped.reduce(&state, &ParentAction::Sub(SubAction::Multiply(2)), &());
        assert_eq!(state.value, 16);
    }

    #[test]
    fn test_scoped_reducer_ignores_foreign_actions() {
        let scoped = scope_action(SubReducer, extract);

        let state = SubState { value: 7 };
        let next = scoped.reduce(&state, &ParentAction::Other, &());
        assert_eq!(next, state);
    }

    #[test]
    fn test_previous_state_is_left_intact() {
        let scoped = scope_action(SubReducer, extract);

        let state = SubState { value: 1 };
        let next = scoped.reduce(&state, &ParentAction::Sub(SubAction::Add(1)), &());
        assert_eq!(state.value, 1);
        assert_eq!(next.value, 2);
    }
}
