//! reqwest implementation of [`AdminApi`].

use super::{
    AdminApi, ApiError, BotConfig, BotConfigCreationRequest, Connector, ConnectorBase, ConnectorIndexingStatus,
    Credential, CredentialBase, DocumentSet, LinkCredentialRequest, Persona, StatusResponse,
};
use crate::config::ApiConfig;
use crate::constants::{
    ENDPOINT_BOT_CONFIG, ENDPOINT_CONNECTORS, ENDPOINT_CONNECTOR_LINK, ENDPOINT_CREDENTIALS, ENDPOINT_DOCUMENT_SETS,
    ENDPOINT_INDEXING_STATUS, ENDPOINT_PERSONAS,
};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub struct HttpAdminApi {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl HttpAdminApi {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            api_key,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, config.api_key(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Turn a non-2xx response into [`ApiError::Http`] carrying the body text
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Request failed with {}: {}", status, body);
        Err(ApiError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        Self::send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send_json(self.request(Method::GET, path)).await
    }

    async fn with_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::send_json(self.request(method, path).json(body)).await
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn list_document_sets(&self) -> Result<Vec<DocumentSet>, ApiError> {
        self.get(ENDPOINT_DOCUMENT_SETS).await
    }

    async fn list_personas(&self) -> Result<Vec<Persona>, ApiError> {
        self.get(ENDPOINT_PERSONAS).await
    }

    async fn list_indexing_statuses(&self) -> Result<Vec<ConnectorIndexingStatus>, ApiError> {
        self.get(ENDPOINT_INDEXING_STATUS).await
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>, ApiError> {
        self.get(ENDPOINT_CREDENTIALS).await
    }

    async fn create_credential(&self, request: &CredentialBase) -> Result<Credential, ApiError> {
        self.with_body(Method::POST, ENDPOINT_CREDENTIALS, request).await
    }

    async fn delete_credential(&self, credential_id: i64) -> Result<(), ApiError> {
        let path = format!("{}/{}", ENDPOINT_CREDENTIALS, credential_id);
        Self::send(self.request(Method::DELETE, &path)).await.map(|_| ())
    }

    async fn link_credential(
        &self,
        connector_id: i64,
        credential_id: i64,
        request: &LinkCredentialRequest,
    ) -> Result<(), ApiError> {
        let path = format!("{}/{}/credential/{}", ENDPOINT_CONNECTOR_LINK, connector_id, credential_id);
        let response: StatusResponse<i64> = self.with_body(Method::PUT, &path, request).await?;
        if response.success {
            Ok(())
        } else {
            Err(ApiError::InvalidData(response.message))
        }
    }

    async fn create_connector(&self, connector: &ConnectorBase) -> Result<Connector, ApiError> {
        self.with_body(Method::POST, ENDPOINT_CONNECTORS, connector).await
    }

    async fn update_connector(&self, connector_id: i64, connector: &ConnectorBase) -> Result<Connector, ApiError> {
        let path = format!("{}/{}", ENDPOINT_CONNECTORS, connector_id);
        self.with_body(Method::PATCH, &path, connector).await
    }

    async fn create_bot_config(&self, request: &BotConfigCreationRequest) -> Result<BotConfig, ApiError> {
        self.with_body(Method::POST, ENDPOINT_BOT_CONFIG, request).await
    }
}
