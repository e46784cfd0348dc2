//! Reducer logic for the todo application.
//!
//! One reducer per slice of [`AppState`], each returning a new value for its
//! own slice only:
//!
//! - [`TodoReducer`] owns the todo list
//! - [`SelectionReducer`] owns the selected todo
//! - [`CounterReducer`] owns the mutation counter and observes every action
//!
//! [`AppReducer`] combines them into the aggregate state. A mutation that
//! names a missing id is a silent no-op, never an error.

use crate::types::{AppAction, AppState, SelectionAction, Todo, TodoAction, TodoId};
use std::sync::Arc;
use todo_store_core::{
    composition::{ScopedReducer, scope_action},
    environment::IdGenerator,
    reducer::Reducer,
};

/// Environment dependencies for the todo reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Mints ids for created todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

/// Reducer for the todo list slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Copy of `todos` with `update` applied to the first todo matching `id`
    fn update_first(todos: &[Todo], id: &TodoId, update: impl FnOnce(&mut Todo)) -> Vec<Todo> {
        let mut next = todos.to_vec();
        if let Some(todo) = next.iter_mut().find(|todo| &todo.id == id) {
            update(todo);
        }
        next
    }
}

impl Reducer for TodoReducer {
    type State = Vec<Todo>;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &Self::State,
        action: &Self::Action,
        env: &Self::Environment,
    ) -> Self::State {
        match action {
            TodoAction::Create { desc } => {
                let mut next = state.clone();
                next.push(Todo::new(
                    TodoId::generate(env.ids.as_ref()),
                    desc.clone(),
                    false,
                ));
                next
            },

            TodoAction::Edit { id, desc } => Self::update_first(state, id, |todo| {
                todo.desc.clone_from(desc);
            }),

            TodoAction::Toggle { id, is_complete } => Self::update_first(state, id, |todo| {
                todo.is_complete = *is_complete;
            }),

            TodoAction::Remove { id } => {
                let mut next = state.clone();
                if let Some(index) = next.iter().position(|todo| &todo.id == id) {
                    next.remove(index);
                }
                next
            },
        }
    }
}

/// Reducer for the selected todo slice
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionReducer;

impl SelectionReducer {
    /// Creates a new `SelectionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SelectionReducer {
    type State = Option<TodoId>;
    type Action = SelectionAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        _state: &Self::State,
        action: &Self::Action,
        _env: &Self::Environment,
    ) -> Self::State {
        match action {
            SelectionAction::Select { id } => Some(id.clone()),
        }
    }
}

/// Reducer for the mutation counter slice
///
/// Has no actions of its own: it observes every [`AppAction`] and counts the
/// todo list mutations, whether or not they changed the list.
#[derive(Clone, Copy, Debug, Default)]
pub struct CounterReducer;

impl CounterReducer {
    /// Creates a new `CounterReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CounterReducer {
    type State = u64;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &Self::State,
        action: &Self::Action,
        _env: &Self::Environment,
    ) -> Self::State {
        if action.is_todo_mutation() {
            state.saturating_add(1)
        } else {
            *state
        }
    }
}

/// Root reducer: computes every slice of [`AppState`] from its own reducer
pub struct AppReducer {
    todos: ScopedReducer<AppAction, TodoReducer>,
    selection: ScopedReducer<AppAction, SelectionReducer>,
    counter: CounterReducer,
}

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            todos: scope_action(TodoReducer::new(), AppAction::as_todo),
            selection: scope_action(SelectionReducer::new(), AppAction::as_selection),
            counter: CounterReducer::new(),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &Self::State,
        action: &Self::Action,
        env: &Self::Environment,
    ) -> Self::State {
        AppState {
            todos: self.todos.reduce(&state.todos, action, env),
            selected_todo: self.selection.reduce(&state.selected_todo, action, env),
            counter: self.counter.reduce(&state.counter, action, env),
        }
    }
}
