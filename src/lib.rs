//! ZenPlan - task list with LLM-assisted task breakdown
//!
//! A small local task list: create tasks with optional due date/time,
//! toggle and delete them, filter by status, and optionally ask an LLM to
//! break a task into 3-5 actionable sub-steps. All state lives on-device
//! in a key-value byte store; the only network call is the one outbound
//! generation request.
//!
//! # Core Concepts
//!
//! - **Serialized Mutations**: one actor owns the list; every change
//!   flows through it in order and is written back immediately
//! - **Fail-Open Storage**: a malformed persisted list is discarded, not
//!   an error - the user starts empty instead of seeing a crash
//! - **Degraded Generation**: any LLM failure becomes an empty sub-task
//!   list; nothing propagates out of the generator
//!
//! # Modules
//!
//! - [`domain`] - Task entity, status filter, and the pure list reducer
//! - [`store`] - key-value byte store (file-backed, in-memory for tests)
//! - [`state`] - StateManager actor owning list + storage
//! - [`llm`] - LLM client trait and Gemini/Anthropic implementations
//! - [`planning`] - the subtask generator
//! - [`session`] - per-task in-flight gating for breakdown requests
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planning;
pub mod session;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use config::{Config, LlmConfig, StorageConfig};
pub use domain::{Filter, Task, TaskList, TaskStats};
pub use llm::{
    AnthropicClient, CompletionRequest, CompletionResponse, GeminiClient, LlmClient, LlmError, Message,
    ResponseSchema, create_client,
};
pub use planning::SubtaskGenerator;
pub use session::Session;
pub use state::{StateCommand, StateError, StateManager, StateResponse};
pub use store::{FileStore, KvStore, MemoryStore, StoreError, TASKS_KEY};
