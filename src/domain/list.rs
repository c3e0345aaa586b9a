//! TaskList - the in-memory task list and its mutations
//!
//! Every operation is a plain transformation of the list; nothing here
//! touches storage. Byte-level encode/decode lives here too so the
//! round-trip contract has a single owner: `from_bytes(to_bytes(list))`
//! reproduces the list exactly, and malformed bytes decode to the empty
//! list rather than an error.

use tracing::warn;

use crate::domain::{Filter, Task};

/// Aggregate counts over the list
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TaskStats {
    /// All tasks
    pub total: usize,
    /// Tasks marked done
    pub completed: usize,
    /// Tasks still open
    pub active: usize,
    /// Tasks that have had a breakdown attached
    pub boosted: usize,
}

/// Ordered task list, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a task to the front of the list.
    ///
    /// Returns None (and leaves the list unchanged) when the trimmed text
    /// is empty. Emptiness is the only validation; it is not re-checked
    /// anywhere else.
    pub fn add(&mut self, text: &str, date: Option<String>, time: Option<String>) -> Option<Task> {
        if text.trim().is_empty() {
            return None;
        }
        let task = Task::new(text, date, time);
        self.tasks.insert(0, task.clone());
        Some(task)
    }

    /// Flip `completed` on the matching task. False when the id is absent.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove the matching task. False when the id is absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Replace `subtasks` on the matching task. False when the id is
    /// absent, which makes a late generation result for a deleted task a
    /// harmless no-op.
    pub fn attach_subtasks(&mut self, id: &str, subtasks: Vec<String>) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.subtasks = Some(subtasks);
                true
            }
            None => false,
        }
    }

    /// Order-preserving projection of the list through a filter
    pub fn filtered(&self, filter: Filter) -> Vec<Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn stats(&self) -> TaskStats {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        TaskStats {
            total: self.tasks.len(),
            completed,
            active: self.tasks.len() - completed,
            boosted: self.tasks.iter().filter(|t| t.subtasks.is_some()).count(),
        }
    }

    /// Serialize the whole list for storage
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.tasks)
    }

    /// Decode a stored list. Malformed bytes yield the empty list; the
    /// blob is discarded, not surfaced as an error.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(tasks) => Self { tasks },
            Err(e) => {
                warn!(error = %e, "Discarding unparseable task list, starting empty");
                Self::new()
            }
        }
    }
}
