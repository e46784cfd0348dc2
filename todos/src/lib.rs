//! Todo list state container.
//!
//! Three reducers manage the list of todos, the currently selected todo and a
//! counter of list mutations. They are combined into one [`AppState`] behind a
//! store that runs every action through a serializable check and an action
//! logger.
//!
//! # Quick Start
//!
//! ```no_run
//! use todos::{AppAction, Config, TodoEnvironment, configure_store};
//! use todo_store_core::environment::UuidGenerator;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(UuidGenerator));
//! let store = configure_store(&Config::default(), env);
//!
//! store.send(AppAction::create("Buy milk")).await?;
//!
//! let state = store.state(Clone::clone).await;
//! println!("Total todos: {}", state.todos.len());
//! println!("Mutations: {}", state.counter);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use reducer::{AppReducer, CounterReducer, SelectionReducer, TodoEnvironment, TodoReducer};
pub use store::{TodoStore, configure_store};
pub use types::{AppAction, AppState, SelectionAction, Todo, TodoAction, TodoId};
