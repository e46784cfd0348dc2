//! Integration tests for the configured todo store
//!
//! Exercises dispatch through the full middleware chain: ordering, the
//! mutation counter, subscribers and configuration switches.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use std::sync::Arc;
use todo_store_runtime::{Middleware, MiddlewareError, Store, StoreError};
use todo_store_testing::{RecordingMiddleware, test_ids};
use todos::{
    AppAction, AppReducer, AppState, Config, Todo, TodoAction, TodoEnvironment, TodoId,
    configure_store,
};

fn test_env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(test_ids()))
}

/// Refuses every removal
struct NoRemovals;

impl Middleware<AppState, AppAction> for NoRemovals {
    fn name(&self) -> &'static str {
        "no_removals"
    }

    fn before(&self, action: &AppAction, _state: &AppState) -> Result<(), MiddlewareError> {
        match action {
            AppAction::Todos(TodoAction::Remove { .. }) => {
                Err(MiddlewareError::Refused("removals are disabled".to_string()))
            }
            _ => Ok(()),
        }
    }
}

fn empty_config() -> Config {
    Config {
        seed_starter_todos: false,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_create_edit_toggle_remove_through_store() {
    let store = configure_store(&empty_config(), test_env());

    store.send(AppAction::create("Buy milk")).await.unwrap();
    store.send(AppAction::create("Walk dog")).await.unwrap();
    store.send(AppAction::edit("todo-1", "Buy oat milk")).await.unwrap();
    store.send(AppAction::toggle("todo-2", true)).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(
        state.todos,
        vec![
            Todo::new("todo-1", "Buy oat milk", false),
            Todo::new("todo-2", "Walk dog", true),
        ]
    );
    assert_eq!(state.counter, 4);

    store.send(AppAction::remove("todo-1")).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.todos, vec![Todo::new("todo-2", "Walk dog", true)]);
    assert_eq!(state.counter, 5);
}

#[tokio::test]
async fn test_counter_counts_no_op_mutations_but_not_select() {
    let store = configure_store(&empty_config(), test_env());

    store.send(AppAction::edit("missing", "x")).await.unwrap();
    store.send(AppAction::toggle("missing", true)).await.unwrap();
    store.send(AppAction::remove("missing")).await.unwrap();
    store.send(AppAction::select("missing")).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert!(state.todos.is_empty());
    assert_eq!(state.counter, 3);
    assert_eq!(state.selected_todo, Some(TodoId::new("missing")));
}

#[tokio::test]
async fn test_documented_example_sequence() {
    let initial = AppState {
        todos: vec![Todo::new("a", "x", false)],
        ..AppState::default()
    };
    let store = Store::new(initial, AppReducer::new(), test_env());

    store.send(AppAction::edit("a", "y")).await.unwrap();
    assert_eq!(
        store.state(Clone::clone).await,
        AppState {
            todos: vec![Todo::new("a", "y", false)],
            selected_todo: None,
            counter: 1,
        }
    );

    store.send(AppAction::remove("a")).await.unwrap();
    assert_eq!(store.state(|s| (s.todos.len(), s.counter)).await, (0, 2));

    store.send(AppAction::remove("a")).await.unwrap();
    assert_eq!(store.state(|s| (s.todos.len(), s.counter)).await, (0, 3));
}

#[tokio::test]
async fn test_starter_todos_seeded_by_default() {
    let store = configure_store(&Config::default(), test_env());

    let state = store.state(Clone::clone).await;
    assert_eq!(state.todos.len(), 3);
    assert_eq!(state.todos[0], Todo::new("todo-1", "Learn React", true));
    assert_eq!(state.todos[2], Todo::new("todo-3", "Learn Redux-ToolKit", false));

    // Ids minted for the seed are not reused by later creates.
    store.send(AppAction::create("Learn Rust")).await.unwrap();
    assert_eq!(
        store.state(|s| s.todos[3].id.clone()).await,
        TodoId::new("todo-4")
    );
}

#[tokio::test]
async fn test_default_middleware_chain() {
    let store = configure_store(&Config::default(), test_env());
    assert_eq!(
        store.middleware_names(),
        vec!["serializable_check", "action_logger"]
    );

    let config = Config {
        log_actions: false,
        serializable_check: false,
        ..Config::default()
    };
    let store = configure_store(&config, test_env());
    assert!(store.middleware_names().is_empty());
}

#[tokio::test]
async fn test_logger_runs_with_subscriber_installed() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let store = configure_store(&Config::default(), test_env());
    store.send(AppAction::create("Logged")).await.unwrap();
    store.send(AppAction::select("todo-4")).await.unwrap();

    assert_eq!(store.state(|s| s.counter).await, 1);
}

#[tokio::test]
async fn test_subscribers_observe_applied_actions_in_order() {
    let recorder = RecordingMiddleware::new();
    let store = configure_store(&empty_config(), test_env()).with_middleware(recorder.clone());
    let mut actions = store.subscribe_actions();
    let mut states = store.subscribe_state();

    store.send(AppAction::create("a")).await.unwrap();
    store.send(AppAction::select("todo-1")).await.unwrap();
    store.send(AppAction::remove("todo-1")).await.unwrap();

    assert_eq!(actions.recv().await.unwrap(), AppAction::create("a"));
    assert_eq!(actions.recv().await.unwrap(), AppAction::select("todo-1"));
    assert_eq!(actions.recv().await.unwrap(), AppAction::remove("todo-1"));

    assert!(states.has_changed().unwrap());
    let latest = states.borrow_and_update().clone();
    assert!(latest.todos.is_empty());
    assert_eq!(latest.counter, 2);

    assert_eq!(
        recorder.action_types(),
        vec!["todos/create", "selectedTodo/select", "todos/remove"]
    );
}

#[tokio::test]
async fn test_shutdown_rejects_further_dispatch() {
    let store = configure_store(&empty_config(), test_env());

    store.send(AppAction::create("before")).await.unwrap();
    store.shutdown();

    assert_eq!(
        store.send(AppAction::create("after")).await,
        Err(StoreError::ShutdownInProgress)
    );
    assert_eq!(store.state(|s| (s.todos.len(), s.counter)).await, (1, 1));
}

#[tokio::test]
async fn test_concurrent_dispatch_is_serialized() {
    let store = Arc::new(configure_store(&empty_config(), test_env()));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.send(AppAction::create(format!("todo {i}"))).await })
        })
        .collect();

    for handle in handles {
        handle.await.expect("task panicked").unwrap();
    }

    let state = store.state(Clone::clone).await;
    assert_eq!(state.todos.len(), 20);
    assert_eq!(state.counter, 20);

    let mut ids: Vec<&str> = state.todos.iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_refused_mutation_is_not_counted() {
    let recorder = RecordingMiddleware::new();
    let store = configure_store(&empty_config(), test_env())
        .with_middleware(NoRemovals)
        .with_middleware(recorder.clone());
    let mut actions = store.subscribe_actions();

    store.send(AppAction::create("keep me")).await.unwrap();
    let before = store.state(Clone::clone).await;

    let result = store.send(AppAction::remove("todo-1")).await;
    assert_eq!(
        result,
        Err(StoreError::Rejected {
            action_type: "todos/remove",
            middleware: "no_removals",
            reason: "removals are disabled".to_string(),
        })
    );

    let after = store.state(Clone::clone).await;
    assert_eq!(after, before);
    assert_eq!(after.counter, 1);
    assert_eq!(after.todos, vec![Todo::new("todo-1", "keep me", false)]);

    assert_eq!(actions.recv().await.unwrap(), AppAction::create("keep me"));
    assert!(actions.try_recv().is_err());
    assert_eq!(recorder.action_types(), vec!["todos/create"]);
}
