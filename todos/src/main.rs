//! Simple CLI demo for the todo store.
//!
//! Dispatches a scripted sequence of actions and prints the resulting state.
//! Set `RUST_LOG=todo_store_runtime=debug` to see every transition recorded
//! by the action logger.

use std::sync::Arc;
use todo_store_core::environment::UuidGenerator;
use todos::{AppAction, AppState, Config, TodoEnvironment, configure_store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_todos(state: &AppState) {
    for todo in &state.todos {
        let status = if todo.is_complete { "✓" } else { " " };
        let marker = if state.selected_todo.as_ref() == Some(&todo.id) { ">" } else { " " };
        println!("{marker} [{status}] {}", todo.desc);
    }
    println!(
        "  ({}/{} done, {} mutations so far)",
        state.completed_count(),
        state.todos.len(),
        state.counter
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todos=info,todo_store_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Todo Store ===\n");

    let config = Config::from_env();
    let env = TodoEnvironment::new(Arc::new(UuidGenerator));
    let store = configure_store(&config, env);

    let state = store.state(Clone::clone).await;
    println!("Initial todos:");
    print_todos(&state);

    println!("\nCreating 'Learn Rust'...");
    store.send(AppAction::create("Learn Rust")).await?;

    let new_id = store
        .state(|s| s.todos.last().map(|todo| todo.id.clone()))
        .await
        .ok_or("created todo is missing")?;

    println!("Selecting and completing it...");
    store.send(AppAction::select(new_id.clone())).await?;
    store.send(AppAction::toggle(new_id.clone(), true)).await?;
    store.send(AppAction::edit(new_id, "Learn Rust properly")).await?;

    let state = store.state(Clone::clone).await;
    println!("\nCurrent todos:");
    print_todos(&state);

    if let Some(first) = state.todos.first() {
        println!("\nRemoving '{}'...", first.desc);
        store.send(AppAction::remove(first.id.clone())).await?;
    }

    let state = store.state(Clone::clone).await;
    println!("\nFinal state:");
    println!("{}", serde_json::to_string_pretty(&state)?);

    store.shutdown();
    println!("\n=== Demo Complete ===");
    Ok(())
}
