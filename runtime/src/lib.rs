//! # Todo Store Runtime
//!
//! Runtime implementation for the todo store.
//!
//! This crate provides the Store runtime that serializes dispatch, runs the
//! middleware chain around the reducer and notifies subscribers.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and applies actions in order
//! - **Middleware**: Stages that validate or observe every dispatched action
//! - **Subscribers**: Broadcast of applied actions and a watch of the latest state
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment)
//!     .with_middleware(SerializableCheck::new())
//!     .with_middleware(ActionLogger::new(LoggerConfig::default()));
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use todo_store_core::{action::Action, reducer::Reducer};

/// Middleware stages run around every dispatch
pub mod middleware;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// A middleware refused the action before it reached the reducer
        ///
        /// State is left untouched and subscribers are not notified.
        #[error("Action {action_type} rejected by {middleware}: {reason}")]
        Rejected {
            /// Type string of the rejected action
            action_type: &'static str,
            /// Name of the middleware that refused it
            middleware: &'static str,
            /// Why it was refused
            reason: String,
        },
    }

    /// Errors raised by a middleware `before` hook
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum MiddlewareError {
        /// The action payload cannot be serialized
        #[error("action is not serializable: {0}")]
        NotSerializable(String),

        /// The middleware refused the action for another reason
        #[error("{0}")]
        Refused(String),
    }
}

pub use error::{MiddlewareError, StoreError};
pub use middleware::{ActionLogger, LoggerConfig, Middleware, SerializableCheck};

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_store_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_broadcast_capacity(64);
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Capacity of the applied-action broadcast channel
    ///
    /// Subscribers that fall further behind than this lose the oldest actions.
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize) -> Self {
        Self { broadcast_capacity }
    }

    /// Set the broadcast channel capacity
    ///
    /// A capacity of zero is raised to one, the smallest value tokio accepts.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Action, Arc, AtomicBool, Middleware, Ordering, Reducer, RwLock, StoreConfig, StoreError};
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the write lock is held for a whole dispatch)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Middleware chain (validation and logging around the reducer)
    /// 5. Subscribers (applied actions and latest state)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(AppState::default(), AppReducer::new(), env);
    ///
    /// store.send(AppAction::create("Buy milk")).await?;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        middleware: Vec<Box<dyn Middleware<S, A>>>,
        shutdown: Arc<AtomicBool>,
        /// Every action that made it through the reducer, in dispatch order.
        action_broadcast: broadcast::Sender<A>,
        state_watch: watch::Sender<S>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Action + Send + Clone + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`] and an empty middleware chain.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        ///
        /// # Example
        ///
        /// ```ignore
        /// let config = StoreConfig::default().with_broadcast_capacity(128);
        /// let store = Store::with_config(state, reducer, env, config);
        /// ```
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));
            let (state_watch, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                middleware: Vec::new(),
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
                state_watch,
            }
        }

        /// Append a middleware to the chain
        ///
        /// Middleware run in insertion order: `before` hooks before the
        /// reducer, `after` hooks once the new state is computed.
        #[must_use]
        pub fn with_middleware<M>(mut self, middleware: M) -> Self
        where
            M: Middleware<S, A> + 'static,
        {
            self.middleware.push(Box::new(middleware));
            self
        }

        /// Names of the installed middleware, in execution order
        #[must_use]
        pub fn middleware_names(&self) -> Vec<&'static str> {
            self.middleware.iter().map(|m| m.name()).collect()
        }

        /// Dispatch an action
        ///
        /// Holds the state write lock for the whole pass, so actions are
        /// applied in strict dispatch order and each one sees the state
        /// produced by the previous one:
        ///
        /// 1. every middleware `before` hook (the first refusal aborts)
        /// 2. the reducer computes the next state
        /// 3. the next state replaces the current one
        /// 4. every middleware `after` hook
        /// 5. subscribers are notified
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store is shutting down.
        /// - [`StoreError::Rejected`] if a middleware refused the action; state
        ///   is unchanged and nothing is broadcast.
        #[tracing::instrument(skip(self, action), fields(action_type = action.action_type()), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            let action_type = action.action_type();
            tracing::debug!("Processing action");
            metrics::counter!("store.actions.total", "action_type" => action_type).increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            for middleware in &self.middleware {
                if let Err(error) = middleware.before(&action, &state) {
                    tracing::warn!(middleware = middleware.name(), %error, "Action rejected");
                    metrics::counter!("store.actions.rejected", "action_type" => action_type)
                        .increment(1);
                    return Err(StoreError::Rejected {
                        action_type,
                        middleware: middleware.name(),
                        reason: error.to_string(),
                    });
                }
            }

            let next = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let next = self.reducer.reduce(&state, &action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                next
            };

            let previous = std::mem::replace(&mut *state, next);

            for middleware in &self.middleware {
                middleware.after(&action, &previous, &state);
            }

            self.state_watch.send_replace(state.clone());
            drop(state);

            // Lagging or absent subscribers are not an error for the sender.
            let _ = self.action_broadcast.send(action);
            tracing::debug!("Action processing completed");

            Ok(())
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let todo_count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to actions applied by this store
        ///
        /// Receivers only see actions dispatched after they subscribed.
        /// Rejected actions are never broadcast.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Subscribe to the latest state
        ///
        /// The receiver is marked changed after every applied action.
        #[must_use]
        pub fn subscribe_state(&self) -> watch::Receiver<S> {
            self.state_watch.subscribe()
        }

        /// Stop accepting new actions
        ///
        /// Dispatches already holding the write lock complete normally.
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }
}

pub use store::Store;
