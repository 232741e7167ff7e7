use crate::mock_api::{salesforce_credential, MockAdminApi};
use indexadmin::api::{AdminApi, ApiError};
use indexadmin::cache::{CacheKey, Payload};
use indexadmin::operations::Operation;
use indexadmin::ui::core::{Action, DialogType, TaskManager};
use std::sync::Arc;

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}

#[tokio::test]
async fn test_fetch_reports_payload() {
    let api: Arc<dyn AdminApi> =
        Arc::new(MockAdminApi::new().with_credentials(vec![salesforce_credential(1, "reader")]));
    let (mut manager, mut rx) = TaskManager::new();

    manager.spawn_fetch(api, CacheKey::Credentials);
    assert_eq!(manager.task_count(), 1);
    assert_eq!(manager.active_descriptions(), vec!["Fetching credentials".to_string()]);
    manager.join_all().await;

    match drain(&mut rx).as_slice() {
        [Action::Fetched {
            key: CacheKey::Credentials,
            result: Ok(Payload::Credentials(credentials)),
        }] => assert_eq!(credentials.len(), 1),
        other => panic!("unexpected actions: {:?}", other),
    }
}

#[tokio::test]
async fn test_successful_operation_invalidates_then_informs() {
    let mock = Arc::new(MockAdminApi::new().with_credentials(vec![salesforce_credential(5, "reader")]));
    let (mut manager, mut rx) = TaskManager::new();

    manager.spawn_operation(mock.clone(), Operation::DeleteCredential(5));
    manager.join_all().await;

    let actions = drain(&mut rx);
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], Action::Invalidate(CacheKey::Credentials));
    assert!(matches!(&actions[1], Action::ShowDialog(DialogType::Info(msg)) if msg.contains("deleted")));
    assert_eq!(mock.credential_count(), 0);
}

#[tokio::test]
async fn test_failed_operation_still_invalidates() {
    let mock = Arc::new(MockAdminApi::new().fail(
        "delete_credential",
        ApiError::Http {
            status: 409,
            body: "Credential is in use".to_string(),
        },
    ));
    let (mut manager, mut rx) = TaskManager::new();

    manager.spawn_operation(mock, Operation::DeleteCredential(5));
    manager.join_all().await;

    let actions = drain(&mut rx);
    assert_eq!(actions[0], Action::Invalidate(CacheKey::Credentials));
    match &actions[1] {
        Action::ShowDialog(DialogType::Error(message)) => assert!(message.contains("Credential is in use")),
        other => panic!("expected an error dialog, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_all_tasks() {
    let api: Arc<dyn AdminApi> = Arc::new(MockAdminApi::new());
    let (mut manager, _rx) = TaskManager::new();

    manager.spawn_bot_config_load(api.clone());
    manager.spawn_fetch(api, CacheKey::IndexingStatuses);
    assert_eq!(manager.task_count(), 2);

    manager.cancel_all_tasks();
    assert_eq!(manager.task_count(), 0);
}
