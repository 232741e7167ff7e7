use super::actions::{Action, DialogType};
use crate::api::{load_bot_config_inputs, AdminApi};
use crate::cache::{fetch_payload, CacheKey};
use crate::constants::ERROR_OPERATION_FAILED;
use crate::operations::Operation;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs fetches and mutations on tokio tasks. Results come back to the UI
/// loop as [`Action`]s on the channel returned by [`TaskManager::new`].
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    fn track(&mut self, handle: JoinHandle<()>, description: String) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        self.tasks.insert(
            task_id,
            BackgroundTask {
                id: task_id,
                handle,
                description,
                started_at: std::time::Instant::now(),
            },
        );
        task_id
    }

    /// Spawn a fetch of one cached collection
    pub fn spawn_fetch(&mut self, api: Arc<dyn AdminApi>, key: CacheKey) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Fetching {}", key.label());

        let handle = tokio::spawn(async move {
            let result = fetch_payload(api.as_ref(), key).await.map_err(|e| e.user_message());
            let _ = action_sender.send(Action::Fetched { key, result });
        });

        self.track(handle, description)
    }

    /// Spawn the joined document-set and assistant load of the bot configuration page
    pub fn spawn_bot_config_load(&mut self, api: Arc<dyn AdminApi>) -> TaskId {
        let action_sender = self.action_sender.clone();

        let handle = tokio::spawn(async move {
            let result = load_bot_config_inputs(api.as_ref()).await;
            let _ = action_sender.send(Action::BotConfigInputsLoaded(result));
        });

        self.track(handle, "Loading document sets and assistants".to_string())
    }

    /// Spawn a mutation. Success shows an info dialog, failure an error dialog
    /// with the backend message; the operation's keys are invalidated either way.
    pub fn spawn_operation(&mut self, api: Arc<dyn AdminApi>, operation: Operation) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = operation.description();

        let handle = tokio::spawn(async move {
            let dialog = match operation.run(api.as_ref()).await {
                Ok(message) => DialogType::Info(message),
                Err(e) => {
                    log::error!("{} failed: {}", operation.description(), e);
                    DialogType::Error(format!("{}: {}", ERROR_OPERATION_FAILED, e.user_message()))
                }
            };

            for key in operation.invalidates() {
                let _ = action_sender.send(Action::Invalidate(*key));
            }
            let _ = action_sender.send(Action::ShowDialog(dialog));
        });

        self.track(handle, description)
    }

    /// Forget tasks that have finished, returning their descriptions
    pub fn cleanup_finished_tasks(&mut self) -> Vec<String> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        finished
            .into_iter()
            .filter_map(|id| self.tasks.remove(&id))
            .map(|task| task.description)
            .collect()
    }

    /// Wait for every running task to finish
    pub async fn join_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            if let Err(e) = task.handle.await {
                log::warn!("Background task '{}' did not complete: {}", task.description, e);
            }
        }
    }

    /// Descriptions of running tasks, oldest first
    pub fn active_descriptions(&self) -> Vec<String> {
        let mut tasks: Vec<&BackgroundTask> = self.tasks.values().collect();
        tasks.sort_by_key(|task| task.id);
        tasks.into_iter().map(|task| task.description.clone()).collect()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
