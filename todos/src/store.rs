//! Store wiring for the todo application.

use crate::config::Config;
use crate::reducer::{AppReducer, TodoEnvironment};
use crate::types::{AppAction, AppState};
use todo_store_runtime::{ActionLogger, SerializableCheck, Store};

/// The application store
pub type TodoStore = Store<AppState, AppAction, TodoEnvironment, AppReducer>;

/// Builds the application store from configuration.
///
/// The middleware chain is the serializable check followed by the action
/// logger, each installed only when enabled in `config`.
#[must_use]
pub fn configure_store(config: &Config, env: TodoEnvironment) -> TodoStore {
    let initial_state = if config.seed_starter_todos {
        AppState::with_starter_todos(env.ids.as_ref())
    } else {
        AppState::new()
    };

    let mut store = Store::with_config(initial_state, AppReducer::new(), env, config.store.clone());

    if config.serializable_check {
        store = store.with_middleware(SerializableCheck::new());
    }
    if config.log_actions {
        store = store.with_middleware(ActionLogger::new(config.logger));
    }

    tracing::debug!(middleware = ?store.middleware_names(), "Store configured");
    store
}
