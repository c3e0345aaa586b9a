//! State manager messages
//!
//! Commands and responses for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::{Filter, Task, TaskStats};

/// Errors from state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Channel error")]
    ChannelError,
}

/// Response from state operations
pub type StateResponse<T> = Result<T, StateError>;

/// Commands sent to the StateManager actor
#[derive(Debug)]
pub enum StateCommand {
    /// Create a task; replies None when the text was empty
    Add {
        text: String,
        date: Option<String>,
        time: Option<String>,
        reply: oneshot::Sender<StateResponse<Option<Task>>>,
    },

    /// Flip completion; replies false on an unknown id
    Toggle {
        id: String,
        reply: oneshot::Sender<StateResponse<bool>>,
    },

    /// Remove a task; replies false on an unknown id
    Delete {
        id: String,
        reply: oneshot::Sender<StateResponse<bool>>,
    },

    /// Replace a task's subtasks; replies false on an unknown id
    AttachSubtasks {
        id: String,
        subtasks: Vec<String>,
        reply: oneshot::Sender<StateResponse<bool>>,
    },

    /// Fetch one task by id
    Get {
        id: String,
        reply: oneshot::Sender<StateResponse<Option<Task>>>,
    },

    /// Snapshot of the list through a filter, order preserved
    List {
        filter: Filter,
        reply: oneshot::Sender<StateResponse<Vec<Task>>>,
    },

    /// Aggregate counts
    Stats {
        reply: oneshot::Sender<StateResponse<TaskStats>>,
    },

    /// Stop the actor
    Shutdown,
}
