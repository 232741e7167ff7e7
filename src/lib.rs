//! indexadmin - a terminal admin console for a document indexing platform
//!
//! The console talks to the platform's admin API to create chat-bot
//! configurations and to set up the Salesforce KB Articles connector
//! (credential, connector and the link between them).
//!
//! # Modules
//!
//! * [`api`] - Admin API models, the [`api::AdminApi`] trait and its HTTP client
//! * [`cache`] - Keyed revalidation caches owned by the pages
//! * [`config`] - Application configuration management
//! * [`operations`] - Backend mutations and the caches they invalidate
//! * [`ui`] - Terminal user interface components and pages

/// Admin API client and data models
pub mod api;

/// Keyed caches of backend collections
pub mod cache;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Backend mutations triggered from the pages
pub mod operations;

/// Terminal user interface components and rendering
pub mod ui;
