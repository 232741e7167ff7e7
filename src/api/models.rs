//! Request and response types of the admin API.
//!
//! Field names follow the backend's JSON schema. Connector- and
//! credential-specific payloads stay as raw JSON on the wire and are
//! read back through typed views ([`SalesforceCredentialJson`],
//! [`SalesforceConfig`]).

use crate::constants::{
    CONNECTOR_INPUT_TYPE_POLL, SALESFORCE_CONNECTOR_NAME, SALESFORCE_POLL_INTERVAL_SECS, SALESFORCE_SOURCE,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn default_true() -> bool {
    true
}

/// Non-string values (null, numbers, nested objects) read as empty so one
/// odd field does not hide the whole credential.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Stored secret material used to authenticate a connector against its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub id: i64,
    #[serde(default)]
    pub credential_json: Value,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub admin_public: bool,
    #[serde(default)]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_updated: Option<DateTime<Utc>>,
}

impl Credential {
    /// Read the JSON payload as a connector-specific shape.
    ///
    /// Returns `None` when the payload does not match `T`.
    pub fn payload<T: DeserializeOwned>(&self) -> Option<T> {
        T::deserialize(&self.credential_json).ok()
    }
}

/// Credential payload of the Salesforce KB Articles connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesforceCredentialJson {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sf_client_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sf_client_secret: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sf_username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sf_password: String,
}

impl SalesforceCredentialJson {
    pub fn has_username(&self) -> bool {
        !self.sf_username.is_empty()
    }
}

/// Body of `POST /api/manage/credential`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialBase {
    pub credential_json: Value,
    pub admin_public: bool,
}

impl CredentialBase {
    pub fn salesforce(payload: &SalesforceCredentialJson) -> Result<Self, serde_json::Error> {
        Ok(Self {
            credential_json: serde_json::to_value(payload)?,
            admin_public: true,
        })
    }
}

/// A configured data source the backend polls and indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: i64,
    pub name: String,
    pub source: String,
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub connector_specific_config: Value,
    #[serde(default)]
    pub refresh_freq: Option<u64>,
    #[serde(default)]
    pub prune_freq: Option<u64>,
    #[serde(default)]
    pub credential_ids: Vec<i64>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_updated: Option<DateTime<Utc>>,
}

impl Connector {
    pub fn is_source(&self, source: &str) -> bool {
        self.source == source
    }

    /// Read `connector_specific_config` as a connector-specific shape.
    pub fn specific_config<T: DeserializeOwned>(&self) -> Option<T> {
        T::deserialize(&self.connector_specific_config).ok()
    }

    pub fn is_linked_to(&self, credential_id: i64) -> bool {
        self.credential_ids.contains(&credential_id)
    }
}

/// `connector_specific_config` of the Salesforce KB Articles connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesforceConfig {
    #[serde(default)]
    pub requested_objects: Vec<String>,
}

impl SalesforceConfig {
    pub fn new(requested_objects: Vec<String>) -> Self {
        Self { requested_objects }
    }

    /// Comma-separated rendering used by the summary table
    pub fn requested_objects_summary(&self) -> String {
        self.requested_objects.join(", ")
    }
}

/// Body of the create and update connector endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorBase {
    pub name: String,
    pub source: String,
    pub input_type: String,
    pub connector_specific_config: Value,
    pub refresh_freq: Option<u64>,
    pub prune_freq: Option<u64>,
    pub disabled: bool,
}

impl ConnectorBase {
    /// Salesforce connector polled every ten minutes
    pub fn salesforce(config: &SalesforceConfig) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: SALESFORCE_CONNECTOR_NAME.to_string(),
            source: SALESFORCE_SOURCE.to_string(),
            input_type: CONNECTOR_INPUT_TYPE_POLL.to_string(),
            connector_specific_config: serde_json::to_value(config)?,
            refresh_freq: Some(SALESFORCE_POLL_INTERVAL_SECS),
            prune_freq: None,
            disabled: false,
        })
    }

    /// Same connector with a replaced configuration, keeping name and cadence
    pub fn from_existing(connector: &Connector, connector_specific_config: Value) -> Self {
        Self {
            name: connector.name.clone(),
            source: connector.source.clone(),
            input_type: connector
                .input_type
                .clone()
                .unwrap_or_else(|| CONNECTOR_INPUT_TYPE_POLL.to_string()),
            connector_specific_config,
            refresh_freq: connector.refresh_freq,
            prune_freq: connector.prune_freq,
            disabled: connector.disabled,
        }
    }
}

/// A connector joined with its credential and current indexing progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorIndexingStatus {
    pub cc_pair_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub connector: Connector,
    pub credential: Credential,
    #[serde(default)]
    pub last_status: Option<String>,
    #[serde(default)]
    pub last_success: Option<DateTime<Utc>>,
    #[serde(default)]
    pub docs_indexed: u64,
    #[serde(default)]
    pub is_deletable: bool,
    #[serde(default)]
    pub in_progress: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    #[default]
    Public,
    Private,
    Sync,
}

/// Metadata sent when associating a credential with a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCredentialRequest {
    pub name: String,
    pub access_type: AccessType,
    #[serde(default)]
    pub groups: Vec<i64>,
    #[serde(default)]
    pub auto_sync_options: Option<Value>,
}

impl LinkCredentialRequest {
    /// Public pair named after its connector and credential. The backend
    /// requires pair names to be unique and a connector/credential pair
    /// exists at most once.
    pub fn for_pair(connector_name: &str, connector_id: i64, credential_id: i64) -> Self {
        Self::public(pair_name(connector_name, connector_id, credential_id))
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access_type: AccessType::Public,
            groups: Vec::new(),
            auto_sync_options: None,
        }
    }
}

/// Name of the pair linking `credential_id` to a connector
pub fn pair_name(connector_name: &str, connector_id: i64, credential_id: i64) -> String {
    format!("{}-{}-{}", connector_name, connector_id, credential_id)
}

/// Generic `{success, message, data}` envelope returned by mutation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_up_to_date: bool,
    #[serde(default)]
    pub is_public: bool,
}

/// Assistant profile a bot configuration can answer with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

/// Body of `POST /api/manage/admin/slack-bot/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotConfigCreationRequest {
    pub channel_names: Vec<String>,
    pub document_sets: Vec<i64>,
    pub persona_id: Option<i64>,
    pub respond_tag_only: bool,
    pub respond_to_bots: bool,
    pub enable_auto_filters: bool,
    #[serde(default)]
    pub answer_filters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    pub id: i64,
    #[serde(default)]
    pub persona: Option<Persona>,
    #[serde(default)]
    pub channel_config: Value,
}
