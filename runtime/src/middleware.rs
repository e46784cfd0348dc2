//! Middleware stages run by the [`Store`](crate::Store) around every dispatch.
//!
//! A middleware sees each action twice: `before` the reducer runs, where it
//! may refuse the action, and `after` the new state has been installed, where
//! it can only observe. Middleware never own or alter state.
//!
//! Two stages are provided:
//!
//! - [`SerializableCheck`] refuses actions that cannot be serialized and
//!   reports states that cannot be serialized
//! - [`ActionLogger`] records every action and state transition through
//!   `tracing`

use crate::error::MiddlewareError;
use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;
use todo_store_core::action::Action;
use tracing::Level;

/// A stage wrapped around dispatch
///
/// # Type Parameters
///
/// - `S`: Store state type
/// - `A`: Store action type
pub trait Middleware<S, A>: Send + Sync {
    /// Short, stable name used in errors and logs
    fn name(&self) -> &'static str;

    /// Inspect an action before it reaches the reducer
    ///
    /// # Errors
    ///
    /// Returning an error aborts the dispatch; the store reports it as
    /// [`StoreError::Rejected`](crate::StoreError::Rejected).
    fn before(&self, _action: &A, _state: &S) -> Result<(), MiddlewareError> {
        Ok(())
    }

    /// Observe a completed transition
    fn after(&self, _action: &A, _previous: &S, _next: &S) {}
}

/// Refuses actions whose payload cannot be serialized.
///
/// State lives for the whole session and is expected to round-trip through
/// `serde`; an action that does not serialize is refused before it can
/// reach it. A next state that does not serialize cannot be undone, so it is
/// reported at `warn`.
pub struct SerializableCheck<S, A> {
    _phantom: PhantomData<fn(&S, &A)>,
}

impl<S, A> SerializableCheck<S, A> {
    /// Create a new check
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S, A> Default for SerializableCheck<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for SerializableCheck<S, A>
where
    S: Serialize,
    A: Serialize + Action,
{
    fn name(&self) -> &'static str {
        "serializable_check"
    }

    fn before(&self, action: &A, _state: &S) -> Result<(), MiddlewareError> {
        serde_json::to_value(action)
            .map(|_| ())
            .map_err(|error| MiddlewareError::NotSerializable(error.to_string()))
    }

    fn after(&self, action: &A, _previous: &S, next: &S) {
        if let Err(error) = serde_json::to_value(next) {
            tracing::warn!(
                action_type = action.action_type(),
                %error,
                "State is not serializable after action"
            );
        }
    }
}

/// Configuration for [`ActionLogger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Level every transition is logged at
    pub level: Level,
    /// Log the previous and next state alongside the action
    pub include_state: bool,
}

impl LoggerConfig {
    /// Create a new logger configuration
    #[must_use]
    pub const fn new(level: Level, include_state: bool) -> Self {
        Self {
            level,
            include_state,
        }
    }

    /// Set the log level
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set whether state snapshots are logged
    #[must_use]
    pub const fn with_state(mut self, include_state: bool) -> Self {
        self.include_state = include_state;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            include_state: true,
        }
    }
}

/// Dispatch `tracing` events at a level chosen at runtime.
macro_rules! event_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            Level::TRACE => tracing::trace!($($arg)+),
            Level::DEBUG => tracing::debug!($($arg)+),
            Level::INFO => tracing::info!($($arg)+),
            Level::WARN => tracing::warn!($($arg)+),
            _ => tracing::error!($($arg)+),
        }
    };
}

/// Records every dispatched action and the resulting transition.
///
/// Purely observational: it never refuses an action and never touches state.
pub struct ActionLogger<S, A> {
    config: LoggerConfig,
    _phantom: PhantomData<fn(&S, &A)>,
}

impl<S, A> ActionLogger<S, A> {
    /// Create a new logger
    #[must_use]
    pub const fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            _phantom: PhantomData,
        }
    }

    /// Returns the logger configuration
    #[must_use]
    pub const fn config(&self) -> &LoggerConfig {
        &self.config
    }
}

impl<S, A> Middleware<S, A> for ActionLogger<S, A>
where
    S: Debug,
    A: Debug + Action,
{
    fn name(&self) -> &'static str {
        "action_logger"
    }

    fn after(&self, action: &A, previous: &S, next: &S) {
        let action_type = action.action_type();

        if self.config.include_state {
            event_at!(
                self.config.level,
                action_type,
                action = ?action,
                prev_state = ?previous,
                next_state = ?next,
                "action"
            );
        } else {
            event_at!(self.config.level, action_type, action = ?action, "action");
        }
    }
}
