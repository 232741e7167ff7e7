//! Backend mutations triggered from the pages.
//!
//! Every operation names the cache keys it invalidates. The task manager
//! invalidates those keys whether the call succeeded or failed, so the
//! pages always re-read backend state after a mutation.

use crate::api::{AdminApi, ApiError, BotConfigCreationRequest, ConnectorBase, CredentialBase, LinkCredentialRequest};
use crate::cache::CacheKey;
use crate::constants::{
    SUCCESS_BOT_CONFIG_CREATED, SUCCESS_CONNECTOR_CREATED, SUCCESS_CONNECTOR_UPDATED, SUCCESS_CREDENTIAL_CREATED,
    SUCCESS_CREDENTIAL_DELETED, SUCCESS_CREDENTIAL_LINKED,
};
use log::info;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    CreateCredential(CredentialBase),
    DeleteCredential(i64),
    /// Link an existing connector, naming the pair after it
    LinkCredential {
        connector_id: i64,
        credential_id: i64,
        connector_name: String,
    },
    /// Create a connector and, when a credential is given, link it right away
    CreateConnector {
        connector: ConnectorBase,
        credential_id: Option<i64>,
    },
    UpdateConnector {
        connector_id: i64,
        connector: ConnectorBase,
    },
    CreateBotConfig(BotConfigCreationRequest),
}

impl Operation {
    pub fn description(&self) -> String {
        match self {
            Operation::CreateCredential(_) => "Create credential".to_string(),
            Operation::DeleteCredential(id) => format!("Delete credential {}", id),
            Operation::LinkCredential {
                connector_id,
                credential_id,
                ..
            } => format!("Link credential {} to connector {}", credential_id, connector_id),
            Operation::CreateConnector { connector, .. } => format!("Create connector '{}'", connector.name),
            Operation::UpdateConnector { connector_id, .. } => format!("Update connector {}", connector_id),
            Operation::CreateBotConfig(request) => {
                format!("Create bot configuration for {}", request.channel_names.join(", "))
            }
        }
    }

    pub fn invalidates(&self) -> &'static [CacheKey] {
        match self {
            Operation::CreateCredential(_) | Operation::DeleteCredential(_) => &[CacheKey::Credentials],
            Operation::LinkCredential { .. } | Operation::CreateConnector { .. } | Operation::UpdateConnector { .. } => {
                &[CacheKey::IndexingStatuses]
            }
            Operation::CreateBotConfig(_) => &[],
        }
    }

    /// Execute the operation, returning the success message to show
    pub async fn run(&self, api: &dyn AdminApi) -> Result<String, ApiError> {
        match self {
            Operation::CreateCredential(request) => {
                let credential = api.create_credential(request).await?;
                info!("Created credential {}", credential.id);
                Ok(SUCCESS_CREDENTIAL_CREATED.to_string())
            }
            Operation::DeleteCredential(id) => {
                api.delete_credential(*id).await?;
                info!("Deleted credential {}", id);
                Ok(SUCCESS_CREDENTIAL_DELETED.to_string())
            }
            Operation::LinkCredential {
                connector_id,
                credential_id,
                connector_name,
            } => {
                let request = LinkCredentialRequest::for_pair(connector_name, *connector_id, *credential_id);
                api.link_credential(*connector_id, *credential_id, &request).await?;
                info!("Linked credential {} to connector {}", credential_id, connector_id);
                Ok(SUCCESS_CREDENTIAL_LINKED.to_string())
            }
            Operation::CreateConnector {
                connector,
                credential_id,
            } => {
                let created = api.create_connector(connector).await?;
                info!("Created connector {} ({})", created.id, created.name);
                if let Some(credential_id) = credential_id {
                    let request = LinkCredentialRequest::for_pair(&created.name, created.id, *credential_id);
                    api.link_credential(created.id, *credential_id, &request).await?;
                    info!("Linked credential {} to connector {}", credential_id, created.id);
                }
                Ok(SUCCESS_CONNECTOR_CREATED.to_string())
            }
            Operation::UpdateConnector {
                connector_id,
                connector,
            } => {
                let updated = api.update_connector(*connector_id, connector).await?;
                info!("Updated connector {}", updated.id);
                Ok(SUCCESS_CONNECTOR_UPDATED.to_string())
            }
            Operation::CreateBotConfig(request) => {
                let config = api.create_bot_config(request).await?;
                info!("Created bot configuration {}", config.id);
                Ok(SUCCESS_BOT_CONFIG_CREATED.to_string())
            }
        }
    }
}
