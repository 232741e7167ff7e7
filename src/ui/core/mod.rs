//! Core UI functionality for indexadmin.
//!
//! This module contains the building blocks every page and widget relies on:
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait
//! - [`context`] - Services shared by the application shell
//! - [`event_handler`] - Terminal input polling
//! - [`task_manager`] - Background fetches and mutations
//!
//! Components turn key events into [`Action`]s, actions flow down through
//! [`Component::update`] and whatever is left is handled by the app shell,
//! which may hand work to the [`TaskManager`]. Background results come back
//! as actions on the task manager's channel.

pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, DialogType, Page};
pub use component::Component;
pub use context::AppContext;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
