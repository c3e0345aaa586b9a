//! Session orchestration: task store meets subtask generator
//!
//! Carries the per-task "generation in progress" flag that gates
//! re-entrancy. A breakdown runs to completion once started; its result
//! (possibly empty) is applied to the store by id, which absorbs the case
//! where the task was deleted while the call was in flight.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::planning::SubtaskGenerator;
use crate::state::StateManager;

/// Ties a StateManager to a SubtaskGenerator with per-task in-flight
/// tracking. Cheap to clone; clones share the in-flight set.
#[derive(Clone)]
pub struct Session {
    state: StateManager,
    generator: Arc<SubtaskGenerator>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Session {
    pub fn new(state: StateManager, generator: Arc<SubtaskGenerator>) -> Self {
        Self {
            state,
            generator,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// The store handle this session drives
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Whether a breakdown is currently running for this task
    pub async fn is_generating(&self, id: &str) -> bool {
        self.in_flight.lock().await.contains(id)
    }

    /// Trigger a breakdown for one task.
    ///
    /// No-op (None) when the id is unknown, the task already carries a
    /// non-empty breakdown, or a request for it is already in flight.
    /// Otherwise returns the handle of the spawned completion; breakdowns
    /// for different tasks run independently.
    pub async fn request_breakdown(&self, id: &str) -> Option<JoinHandle<()>> {
        let task = match self.state.get_task(id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                debug!(%id, "request_breakdown: unknown task");
                return None;
            }
            Err(e) => {
                warn!(%id, error = %e, "request_breakdown: state error");
                return None;
            }
        };

        if task.has_subtasks() {
            debug!(%id, "request_breakdown: task already has sub-tasks");
            return None;
        }

        // Mark in flight before spawning so a second trigger is a no-op
        // even if the generation task has not been polled yet
        if !self.in_flight.lock().await.insert(id.to_string()) {
            debug!(%id, "request_breakdown: already in flight");
            return None;
        }

        let state = self.state.clone();
        let generator = Arc::clone(&self.generator);
        let in_flight = Arc::clone(&self.in_flight);
        let id = id.to_string();

        Some(tokio::spawn(async move {
            let subtasks = generator.generate(&task.text).await;

            // Apply whatever came back, empty included; an unknown id
            // (deleted meanwhile) is a no-op in the store
            match state.attach_subtasks(&id, subtasks).await {
                Ok(found) => {
                    if !found {
                        debug!(%id, "breakdown finished for a task that no longer exists");
                    }
                }
                Err(e) => warn!(%id, error = %e, "Failed to attach sub-tasks"),
            }

            in_flight.lock().await.remove(&id);
        }))
    }
}
