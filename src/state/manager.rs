//! StateManager - actor that owns the task list and its storage
//!
//! Processes commands via channels so every mutation is serialized, the
//! in-process equivalent of the original single-threaded event dispatch.
//! The list is restored from storage before the command loop starts, so a
//! write can never clobber not-yet-loaded state, and the full list is
//! written back after every successful mutation.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::domain::{Filter, Task, TaskList, TaskStats};
use crate::store::{KvStore, TASKS_KEY};

use super::messages::{StateCommand, StateError, StateResponse};

/// Handle to send commands to the StateManager
#[derive(Clone)]
pub struct StateManager {
    tx: mpsc::Sender<StateCommand>,
}

impl StateManager {
    /// Spawn a new StateManager actor over the given store.
    ///
    /// Restores the persisted list first (empty on a missing key,
    /// fail-open on malformed bytes), then starts the actor task.
    pub fn spawn(store: Box<dyn KvStore>) -> eyre::Result<Self> {
        let tasks = match store.get(TASKS_KEY).map_err(|e| eyre::eyre!("Failed to read task store: {}", e))? {
            Some(bytes) => TaskList::from_bytes(&bytes),
            None => TaskList::new(),
        };
        info!(task_count = tasks.len(), "Restored task list");

        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(actor_loop(tasks, store, rx));

        Ok(Self { tx })
    }

    /// Create a task. Empty/whitespace text is rejected silently (None).
    pub async fn add_task(
        &self,
        text: impl Into<String>,
        date: Option<String>,
        time: Option<String>,
    ) -> StateResponse<Option<Task>> {
        let text = text.into();
        debug!(%text, "add_task: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::Add {
                text,
                date,
                time,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Flip a task's completed state; Ok(false) when the id is unknown
    pub async fn toggle_task(&self, id: &str) -> StateResponse<bool> {
        debug!(%id, "toggle_task: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::Toggle {
                id: id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Remove a task; Ok(false) when the id is unknown
    pub async fn delete_task(&self, id: &str) -> StateResponse<bool> {
        debug!(%id, "delete_task: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::Delete {
                id: id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Replace a task's subtasks; Ok(false) when the id is unknown, which
    /// absorbs the generation-completes-after-delete race
    pub async fn attach_subtasks(&self, id: &str, subtasks: Vec<String>) -> StateResponse<bool> {
        debug!(%id, count = subtasks.len(), "attach_subtasks: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::AttachSubtasks {
                id: id.to_string(),
                subtasks,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Fetch one task by id
    pub async fn get_task(&self, id: &str) -> StateResponse<Option<Task>> {
        debug!(%id, "get_task: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::Get {
                id: id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Snapshot of the list through a filter
    pub async fn list_tasks(&self, filter: Filter) -> StateResponse<Vec<Task>> {
        debug!(%filter, "list_tasks: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::List {
                filter,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Aggregate counts
    pub async fn stats(&self) -> StateResponse<TaskStats> {
        debug!("stats: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::Stats { reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Shutdown the StateManager
    pub async fn shutdown(&self) -> Result<(), StateError> {
        debug!("shutdown: called");
        self.tx
            .send(StateCommand::Shutdown)
            .await
            .map_err(|_| StateError::ChannelError)
    }
}

/// Serialize the list and write it under the fixed key
fn persist(tasks: &TaskList, store: &mut Box<dyn KvStore>) -> StateResponse<()> {
    let bytes = tasks
        .to_bytes()
        .map_err(|e| StateError::SerializationError(e.to_string()))?;
    store
        .put(TASKS_KEY, &bytes)
        .map_err(|e| StateError::StoreError(e.to_string()))
}

/// The actor loop that owns the list and processes commands
async fn actor_loop(mut tasks: TaskList, mut store: Box<dyn KvStore>, mut rx: mpsc::Receiver<StateCommand>) {
    debug!("StateManager actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StateCommand::Add {
                text,
                date,
                time,
                reply,
            } => {
                debug!(%text, "actor_loop: Add command");
                let result = match tasks.add(&text, date, time) {
                    Some(task) => persist(&tasks, &mut store).map(|_| Some(task)),
                    None => Ok(None),
                };
                let _ = reply.send(result);
            }

            StateCommand::Toggle { id, reply } => {
                debug!(%id, "actor_loop: Toggle command");
                let result = if tasks.toggle(&id) {
                    persist(&tasks, &mut store).map(|_| true)
                } else {
                    Ok(false)
                };
                let _ = reply.send(result);
            }

            StateCommand::Delete { id, reply } => {
                debug!(%id, "actor_loop: Delete command");
                let result = if tasks.remove(&id) {
                    persist(&tasks, &mut store).map(|_| true)
                } else {
                    Ok(false)
                };
                let _ = reply.send(result);
            }

            StateCommand::AttachSubtasks { id, subtasks, reply } => {
                debug!(%id, "actor_loop: AttachSubtasks command");
                let result = if tasks.attach_subtasks(&id, subtasks) {
                    persist(&tasks, &mut store).map(|_| true)
                } else {
                    Ok(false)
                };
                let _ = reply.send(result);
            }

            StateCommand::Get { id, reply } => {
                debug!(%id, "actor_loop: Get command");
                let _ = reply.send(Ok(tasks.get(&id).cloned()));
            }

            StateCommand::List { filter, reply } => {
                debug!(%filter, "actor_loop: List command");
                let _ = reply.send(Ok(tasks.filtered(filter)));
            }

            StateCommand::Stats { reply } => {
                debug!("actor_loop: Stats command");
                let _ = reply.send(Ok(tasks.stats()));
            }

            StateCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("StateManager shutting down");
                break;
            }
        }
    }

    debug!("StateManager actor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn spawn_empty() -> StateManager {
        StateManager::spawn(Box::new(MemoryStore::new())).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let manager = spawn_empty();

        let task = manager.add_task("Write report", None, None).await.unwrap().unwrap();
        assert_eq!(task.text, "Write report");

        let newer = manager.add_task("Newer", None, None).await.unwrap().unwrap();

        let all = manager.list_tasks(Filter::All).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, task.id);

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_add_empty_text_is_rejected() {
        let manager = spawn_empty();

        assert!(manager.add_task("", None, None).await.unwrap().is_none());
        assert!(manager.add_task("   ", None, None).await.unwrap().is_none());
        assert!(manager.list_tasks(Filter::All).await.unwrap().is_empty());

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_toggle_and_filtered_views() {
        let manager = spawn_empty();

        let a = manager.add_task("a", None, None).await.unwrap().unwrap();
        manager.add_task("b", None, None).await.unwrap().unwrap();

        assert!(manager.toggle_task(&a.id).await.unwrap());

        let active = manager.list_tasks(Filter::Active).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text, "b");

        let completed = manager.list_tasks(Filter::Completed).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, a.id);

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_ids_are_noops() {
        let manager = spawn_empty();
        manager.add_task("keep me", None, None).await.unwrap();

        assert!(!manager.toggle_task("nope").await.unwrap());
        assert!(!manager.delete_task("nope").await.unwrap());
        assert!(!manager.attach_subtasks("nope", vec!["x".to_string()]).await.unwrap());
        assert!(manager.get_task("nope").await.unwrap().is_none());

        assert_eq!(manager.list_tasks(Filter::All).await.unwrap().len(), 1);

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_attach_subtasks() {
        let manager = spawn_empty();
        let task = manager.add_task("break me down", None, None).await.unwrap().unwrap();

        assert!(
            manager
                .attach_subtasks(&task.id, vec!["one".to_string(), "two".to_string()])
                .await
                .unwrap()
        );

        let stored = manager.get_task(&task.id).await.unwrap().unwrap();
        assert_eq!(stored.subtasks, Some(vec!["one".to_string(), "two".to_string()]));

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_restore_from_persisted_bytes() {
        let mut store = MemoryStore::new();
        let mut list = TaskList::new();
        list.add("from before", Some("2026-05-01".to_string()), None);
        store.put(TASKS_KEY, &list.to_bytes().unwrap()).unwrap();

        let manager = StateManager::spawn(Box::new(store)).unwrap();
        let all = manager.list_tasks(Filter::All).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "from before");
        assert_eq!(all[0].date.as_deref(), Some("2026-05-01"));

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_restore_corrupted_bytes_starts_empty() {
        let mut store = MemoryStore::new();
        store.put(TASKS_KEY, b"{{{ definitely not json").unwrap();

        let manager = StateManager::spawn(Box::new(store)).unwrap();
        assert!(manager.list_tasks(Filter::All).await.unwrap().is_empty());

        // And the store is usable afterwards
        let task = manager.add_task("fresh start", None, None).await.unwrap();
        assert!(task.is_some());

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_stats() {
        let manager = spawn_empty();

        let a = manager.add_task("a", None, None).await.unwrap().unwrap();
        let b = manager.add_task("b", None, None).await.unwrap().unwrap();
        manager.add_task("c", None, None).await.unwrap();
        manager.toggle_task(&a.id).await.unwrap();
        manager.attach_subtasks(&b.id, vec!["s".to_string()]).await.unwrap();

        let stats = manager.stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.boosted, 1);

        manager.shutdown().await.unwrap();
    }
}
