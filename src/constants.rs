//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, endpoint paths and other
//! constant values to improve maintainability and consistency.

// Salesforce connector
pub const SALESFORCE_SOURCE: &str = "salesforce";
pub const SALESFORCE_CONNECTOR_NAME: &str = "SalesforceConnector";
/// Poll cadence used for every Salesforce connector created from the console (10 minutes)
pub const SALESFORCE_POLL_INTERVAL_SECS: u64 = 600;
pub const CONNECTOR_INPUT_TYPE_POLL: &str = "poll";

// API endpoints, relative to the configured base URL
pub const ENDPOINT_DOCUMENT_SETS: &str = "/api/manage/document-set";
pub const ENDPOINT_PERSONAS: &str = "/api/persona";
pub const ENDPOINT_INDEXING_STATUS: &str = "/api/manage/admin/connector/indexing-status";
pub const ENDPOINT_CREDENTIALS: &str = "/api/manage/credential";
pub const ENDPOINT_CONNECTORS: &str = "/api/manage/admin/connector";
pub const ENDPOINT_CONNECTOR_LINK: &str = "/api/manage/connector";
pub const ENDPOINT_BOT_CONFIG: &str = "/api/manage/admin/slack-bot/config";

// Page titles
pub const TITLE_BOT_CONFIG_PAGE: &str = "🤖 New Bot Configuration";
pub const TITLE_SALESFORCE_PAGE: &str = "☁ Salesforce KB Articles";

// Success Messages
pub const SUCCESS_CREDENTIAL_CREATED: &str = "✅ Credential created";
pub const SUCCESS_CREDENTIAL_DELETED: &str = "✅ Credential deleted";
pub const SUCCESS_CREDENTIAL_LINKED: &str = "✅ Credential linked to connector";
pub const SUCCESS_CONNECTOR_CREATED: &str = "✅ Connector created";
pub const SUCCESS_CONNECTOR_UPDATED: &str = "✅ Connector updated";
pub const SUCCESS_BOT_CONFIG_CREATED: &str = "✅ Bot configuration created";

// Error Messages
pub const ERROR_LOAD_CONNECTORS: &str = "Failed to load connectors";
pub const ERROR_FETCH_DOCUMENT_SETS: &str = "Failed to fetch document sets";
pub const ERROR_FETCH_PERSONAS: &str = "Failed to fetch personas";
pub const ERROR_OPERATION_FAILED: &str = "❌ Operation failed";
pub const ERROR_NO_CONNECTOR_SELECTED: &str = "No connector selected";
pub const ERROR_ALREADY_LINKED: &str = "The credential is already linked to this connector";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const WARN_NO_API_KEY: &str = "⚠ No API key found, requests are sent without authentication";
pub const DIALOG_TITLE_DEBUG_LOGS: &str = "🔍 Debug Logs - Press 'Esc' or 'q' to close";
pub const LOADING_MESSAGE: &str = "Loading...";

// Configuration defaults and bounds
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_API_KEY_ENV: &str = "INDEXADMIN_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Event loop tick in milliseconds
pub const TICK_RATE_MS: u64 = 100;
