//! Admin API of the indexing platform.
//!
//! [`AdminApi`] is the seam between the console and the backend: pages and
//! background operations only ever talk to this trait. [`HttpAdminApi`] is
//! the reqwest implementation used at runtime.

use async_trait::async_trait;

pub mod http;
pub mod models;

pub use http::HttpAdminApi;
pub use models::*;

use crate::constants::{ERROR_FETCH_DOCUMENT_SETS, ERROR_FETCH_PERSONAS};

/// Errors returned by admin API calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl ApiError {
    /// Text shown to the user: the response body for HTTP failures, the
    /// display form otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { body, .. } if !body.trim().is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidData(err.to_string())
    }
}

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_document_sets(&self) -> Result<Vec<DocumentSet>, ApiError>;
    async fn list_personas(&self) -> Result<Vec<Persona>, ApiError>;
    async fn list_indexing_statuses(&self) -> Result<Vec<ConnectorIndexingStatus>, ApiError>;
    async fn list_credentials(&self) -> Result<Vec<Credential>, ApiError>;

    async fn create_credential(&self, request: &CredentialBase) -> Result<Credential, ApiError>;
    async fn delete_credential(&self, credential_id: i64) -> Result<(), ApiError>;

    /// Associate a stored credential with a connector
    async fn link_credential(
        &self,
        connector_id: i64,
        credential_id: i64,
        request: &LinkCredentialRequest,
    ) -> Result<(), ApiError>;

    async fn create_connector(&self, connector: &ConnectorBase) -> Result<Connector, ApiError>;
    async fn update_connector(&self, connector_id: i64, connector: &ConnectorBase) -> Result<Connector, ApiError>;

    async fn create_bot_config(&self, request: &BotConfigCreationRequest) -> Result<BotConfig, ApiError>;
}

/// Fetch the assistants a bot configuration may use.
///
/// Never fails: an error is reported as the second tuple element instead.
pub async fn fetch_assistants(api: &dyn AdminApi) -> (Vec<Persona>, Option<String>) {
    match api.list_personas().await {
        Ok(personas) => (personas.into_iter().filter(|p| p.is_visible).collect(), None),
        Err(e) => (Vec::new(), Some(e.user_message())),
    }
}

/// Everything the bot configuration form needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotConfigInputs {
    pub document_sets: Vec<DocumentSet>,
    pub personas: Vec<Persona>,
}

/// Fetch document sets and assistants concurrently.
///
/// Both requests must succeed. A document-set failure wins over an
/// assistant failure and carries the response body in its message.
pub async fn load_bot_config_inputs(api: &dyn AdminApi) -> Result<BotConfigInputs, String> {
    let (document_sets, (personas, persona_error)) = tokio::join!(api.list_document_sets(), fetch_assistants(api));

    let document_sets =
        document_sets.map_err(|e| format!("{} - {}", ERROR_FETCH_DOCUMENT_SETS, e.user_message()))?;

    if let Some(error) = persona_error {
        return Err(format!("{} - {}", ERROR_FETCH_PERSONAS, error));
    }

    Ok(BotConfigInputs {
        document_sets,
        personas,
    })
}
