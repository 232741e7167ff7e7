

#[path = "core/task_manager.rs"]
mod task_manager;
