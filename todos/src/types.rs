//! Domain types for the todo list.
//!
//! The aggregate state has three slices, each owned by exactly one reducer:
//! the ordered todo list, the currently selected todo and a counter of todo
//! mutations. Actions are grouped per slice and wrapped in [`AppAction`] for
//! dispatch.

use serde::{Deserialize, Serialize};
use todo_store_core::action::Action;
use todo_store_core::environment::IdGenerator;
use todo_store_macros::Action;

/// Opaque unique identifier of a todo
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an existing token
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh id from the generator
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next_id())
    }

    /// Returns the inner token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, fixed at creation
    pub id: TodoId,
    /// Human-readable description
    pub desc: String,
    /// Whether the todo is done
    pub is_complete: bool,
}

impl Todo {
    /// Creates a new todo
    #[must_use]
    pub fn new(id: impl Into<TodoId>, desc: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id: id.into(),
            desc: desc.into(),
            is_complete,
        }
    }
}

/// Aggregate state of the application
///
/// Serializes as `{ "todos": [...], "selectedTodo": string|null, "counter": number }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Todos in display order
    pub todos: Vec<Todo>,
    /// Currently selected todo, not necessarily still present in `todos`
    pub selected_todo: Option<TodoId>,
    /// Number of todo mutations dispatched so far
    pub counter: u64,
}

impl AppState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The initial state the application ships with: three starter todos
    #[must_use]
    pub fn with_starter_todos(ids: &dyn IdGenerator) -> Self {
        Self {
            todos: vec![
                Todo::new(TodoId::generate(ids), "Learn React", true),
                Todo::new(TodoId::generate(ids), "Learn Redux", true),
                Todo::new(TodoId::generate(ids), "Learn Redux-ToolKit", false),
            ],
            selected_todo: None,
            counter: 0,
        }
    }

    /// Returns the first todo with the given id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// Returns the selected todo, if the selection still refers to one
    #[must_use]
    pub fn selected(&self) -> Option<&Todo> {
        self.selected_todo.as_ref().and_then(|id| self.get(id))
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_complete).count()
    }
}

/// Actions owned by the todo list slice
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[action(slice = "todos")]
#[serde(tag = "type", content = "payload")]
pub enum TodoAction {
    /// Append a new, incomplete todo; its id is minted by the reducer
    #[serde(rename = "todos/create")]
    Create {
        /// Description of the new todo
        desc: String,
    },

    /// Replace the description of a todo
    #[serde(rename = "todos/edit")]
    Edit {
        /// Todo to edit
        id: TodoId,
        /// New description
        desc: String,
    },

    /// Set the completion flag of a todo
    #[serde(rename = "todos/toggle")]
    Toggle {
        /// Todo to update
        id: TodoId,
        /// Target value, not a flip
        #[serde(rename = "isComplete")]
        is_complete: bool,
    },

    /// Delete a todo
    #[serde(rename = "todos/remove")]
    Remove {
        /// Todo to delete
        id: TodoId,
    },
}

/// Actions owned by the selection slice
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[action(slice = "selectedTodo")]
#[serde(tag = "type", content = "payload")]
pub enum SelectionAction {
    /// Make a todo the current selection
    #[serde(rename = "selectedTodo/select")]
    Select {
        /// Todo to select, not checked against the list
        id: TodoId,
    },
}

/// Everything that can be dispatched to the application store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppAction {
    /// A todo list mutation
    Todos(TodoAction),
    /// A selection change
    Selection(SelectionAction),
}

impl AppAction {
    /// Action creator for [`TodoAction::Create`]
    #[must_use]
    pub fn create(desc: impl Into<String>) -> Self {
        Self::Todos(TodoAction::Create { desc: desc.into() })
    }

    /// Action creator for [`TodoAction::Edit`]
    #[must_use]
    pub fn edit(id: impl Into<TodoId>, desc: impl Into<String>) -> Self {
        Self::Todos(TodoAction::Edit {
            id: id.into(),
            desc: desc.into(),
        })
    }

    /// Action creator for [`TodoAction::Toggle`]
    #[must_use]
    pub fn toggle(id: impl Into<TodoId>, is_complete: bool) -> Self {
        Self::Todos(TodoAction::Toggle {
            id: id.into(),
            is_complete,
        })
    }

    /// Action creator for [`TodoAction::Remove`]
    #[must_use]
    pub fn remove(id: impl Into<TodoId>) -> Self {
        Self::Todos(TodoAction::Remove { id: id.into() })
    }

    /// Action creator for [`SelectionAction::Select`]
    #[must_use]
    pub fn select(id: impl Into<TodoId>) -> Self {
        Self::Selection(SelectionAction::Select { id: id.into() })
    }

    /// Whether this is one of the todo list mutations the counter tracks
    #[must_use]
    pub const fn is_todo_mutation(&self) -> bool {
        match self {
            Self::Todos(
                TodoAction::Create { .. }
                | TodoAction::Edit { .. }
                | TodoAction::Toggle { .. }
                | TodoAction::Remove { .. },
            ) => true,
            Self::Selection(_) => false,
        }
    }

    /// The todo list action, if this is one
    #[must_use]
    pub const fn as_todo(&self) -> Option<&TodoAction> {
        match self {
            Self::Todos(action) => Some(action),
            Self::Selection(_) => None,
        }
    }

    /// The selection action, if this is one
    #[must_use]
    pub const fn as_selection(&self) -> Option<&SelectionAction> {
        match self {
            Self::Selection(action) => Some(action),
            Self::Todos(_) => None,
        }
    }
}

impl Action for AppAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::Todos(action) => action.action_type(),
            Self::Selection(action) => action.action_type(),
        }
    }
}

impl From<TodoAction> for AppAction {
    fn from(action: TodoAction) -> Self {
        Self::Todos(action)
    }
}

impl From<SelectionAction> for AppAction {
    fn from(action: SelectionAction) -> Self {
        Self::Selection(action)
    }
}
