use crate::mock_api::{connector, other_credential, salesforce_credential, status_for};
use crate::render::render_to_string;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indexadmin::api::{ConnectorIndexingStatus, Credential};
use indexadmin::cache::{CacheKey, Payload};
use indexadmin::operations::Operation;
use indexadmin::ui::core::{Action, Component, DialogType};
use indexadmin::ui::pages::salesforce::{find_salesforce_credential, salesforce_statuses};
use indexadmin::ui::pages::{SalesforcePage, SalesforceView};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn load(page: &mut SalesforcePage, credentials: Vec<Credential>, statuses: Vec<ConnectorIndexingStatus>) {
    for action in page.initial_actions() {
        page.update(action);
    }
    page.update(Action::Fetched {
        key: CacheKey::Credentials,
        result: Ok(Payload::Credentials(credentials)),
    });
    page.update(Action::Fetched {
        key: CacheKey::IndexingStatuses,
        result: Ok(Payload::IndexingStatuses(statuses)),
    });
}

fn screen(page: &mut SalesforcePage) -> String {
    render_to_string(100, 30, |f, area| page.render(f, area))
}

#[test]
fn test_initial_load_fetches_both_collections() {
    let mut page = SalesforcePage::new();
    assert_eq!(page.view(), &SalesforceView::Loading);

    let fetches: Vec<Action> = page.initial_actions().into_iter().map(|a| page.update(a)).collect();
    assert!(fetches.contains(&Action::Fetch(CacheKey::Credentials)));
    assert!(fetches.contains(&Action::Fetch(CacheKey::IndexingStatuses)));
    assert_eq!(page.view(), &SalesforceView::Loading);

    // Nothing left to do once both have been requested
    assert!(page.initial_actions().is_empty());
}

#[test]
fn test_no_username_shows_credential_form() {
    let mut page = SalesforcePage::new();
    load(
        &mut page,
        vec![other_credential(1), salesforce_credential(2, "")],
        vec![status_for(1, connector(3, "salesforce", &["Case"]), other_credential(1))],
    );

    assert_eq!(page.view(), &SalesforceView::NeedsCredential);
    let text = screen(&mut page);
    assert!(text.contains("Step 1: Provide your credentials"));
    assert!(!text.contains("Connectors using this credential"));
}

#[test]
fn test_credential_without_connector_shows_connector_form() {
    let mut page = SalesforcePage::new();
    let credential = salesforce_credential(7, "reader@example.com");
    load(
        &mut page,
        vec![credential.clone()],
        vec![status_for(1, connector(3, "github", &[]), other_credential(1))],
    );

    assert_eq!(page.view(), &SalesforceView::NeedsConnector { credential });
    let text = screen(&mut page);
    assert!(text.contains("Step 2: Enter connector settings"));
    assert!(text.contains("reader@example.com"));
    assert!(!text.contains("Connectors using this credential"));
}

#[test]
fn test_configured_connector_shows_summary() {
    let mut page = SalesforcePage::new();
    let credential = salesforce_credential(7, "reader@example.com");
    load(
        &mut page,
        vec![credential.clone()],
        vec![status_for(
            1,
            connector(3, "salesforce", &["Knowledge__kav", "Case"]),
            credential.clone(),
        )],
    );

    let SalesforceView::Configured { rows, .. } = page.view().clone() else {
        panic!("expected the summary view, got {:?}", page.view());
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].requested_objects, "Knowledge__kav, Case");
    assert!(rows[0].credential_linked);

    let text = screen(&mut page);
    assert!(text.contains("Knowledge__kav, Case"));
    assert!(text.contains("Connectors using this credential"));
    assert!(text.contains("refreshed"));
    assert!(!text.contains("Step 2"));
    assert!(page.cache().last_updated(CacheKey::IndexingStatuses).is_some());
}

#[test]
fn test_only_salesforce_statuses_are_kept() {
    let credential = other_credential(1);
    let mut statuses = Vec::new();
    for id in 0..4 {
        statuses.push(status_for(id, connector(id, "github", &[]), credential.clone()));
    }
    for id in 10..13 {
        statuses.push(status_for(id, connector(id, "salesforce", &[]), credential.clone()));
    }

    let kept = salesforce_statuses(&statuses);
    assert_eq!(kept.len(), 3);
    assert!(kept.iter().all(|status| status.connector.source == "salesforce"));
}

#[test]
fn test_first_credential_with_username_wins() {
    let credentials = vec![
        other_credential(1),
        salesforce_credential(2, ""),
        salesforce_credential(3, "first"),
        salesforce_credential(4, "second"),
    ];
    assert_eq!(find_salesforce_credential(&credentials).map(|c| c.id), Some(3));
    assert!(find_salesforce_credential(&credentials[..2]).is_none());
}

#[test]
fn test_fetch_error_shows_failure_until_next_success() {
    let mut page = SalesforcePage::new();
    load(&mut page, vec![salesforce_credential(1, "reader")], Vec::new());

    assert_eq!(page.update(Action::Invalidate(CacheKey::IndexingStatuses)), Action::Fetch(CacheKey::IndexingStatuses));
    page.update(Action::Fetched {
        key: CacheKey::IndexingStatuses,
        result: Err("502 Bad Gateway".to_string()),
    });
    assert_eq!(page.view(), &SalesforceView::Failed);
    assert!(screen(&mut page).contains("Failed to load connectors"));
    // The failed fetch keeps the time of the last good one
    let refreshed = page.cache().last_updated(CacheKey::IndexingStatuses);
    assert!(refreshed.is_some());

    page.update(Action::Invalidate(CacheKey::IndexingStatuses));
    page.update(Action::Fetched {
        key: CacheKey::IndexingStatuses,
        result: Ok(Payload::IndexingStatuses(Vec::new())),
    });
    assert!(matches!(page.view(), SalesforceView::NeedsConnector { .. }));
    assert!(page.cache().last_updated(CacheKey::IndexingStatuses) >= refreshed);
}

#[test]
fn test_invalidation_during_fetch_is_deferred() {
    let mut page = SalesforcePage::new();
    load(&mut page, vec![salesforce_credential(1, "reader")], Vec::new());

    assert_eq!(page.update(Action::Invalidate(CacheKey::Credentials)), Action::Fetch(CacheKey::Credentials));
    assert_eq!(page.update(Action::Invalidate(CacheKey::Credentials)), Action::None);

    // The first result triggers exactly one follow-up fetch
    let follow_up = page.update(Action::Fetched {
        key: CacheKey::Credentials,
        result: Ok(Payload::Credentials(Vec::new())),
    });
    assert_eq!(follow_up, Action::Fetch(CacheKey::Credentials));
    assert_eq!(page.cache().fetch_count(CacheKey::Credentials), 3);
}

#[test]
fn test_credential_form_submits_create_credential() {
    let mut page = SalesforcePage::new();
    load(&mut page, Vec::new(), Vec::new());
    assert!(page.captures_text_input());

    for (index, value) in ["client-id", "client-secret", "reader@example.com", "pw"].iter().enumerate() {
        if index > 0 {
            page.handle_key_events(key(KeyCode::Tab));
        }
        for c in value.chars() {
            page.handle_key_events(key(KeyCode::Char(c)));
        }
    }

    let Action::Run(Operation::CreateCredential(request)) = page.handle_key_events(key(KeyCode::Enter)) else {
        panic!("expected a create credential operation");
    };
    assert_eq!(request.credential_json["sf_username"], "reader@example.com");
    assert_eq!(request.credential_json["sf_client_secret"], "client-secret");
    assert!(request.admin_public);
}

#[test]
fn test_connector_form_creates_and_links() {
    let mut page = SalesforcePage::new();
    load(&mut page, vec![salesforce_credential(7, "reader")], Vec::new());

    for c in "Knowledge__kav, Case".chars() {
        page.handle_key_events(key(KeyCode::Char(c)));
    }
    let action = page.handle_key_events(key(KeyCode::Enter));

    let Action::Run(Operation::CreateConnector { connector, credential_id }) = action else {
        panic!("expected a create connector operation, got {:?}", action);
    };
    assert_eq!(credential_id, Some(7));
    assert_eq!(connector.refresh_freq, Some(600));
    assert_eq!(connector.input_type, "poll");
    assert_eq!(
        connector.connector_specific_config["requested_objects"],
        serde_json::json!(["Knowledge__kav", "Case"])
    );
}

#[test]
fn test_summary_actions() {
    let mut page = SalesforcePage::new();
    let credential = salesforce_credential(7, "reader");
    let linked = status_for(1, connector(3, "salesforce", &["Case"]), credential.clone());
    let unlinked = status_for(2, connector(4, "salesforce", &["Solution"]), other_credential(9));
    load(&mut page, vec![credential], vec![linked, unlinked]);
    assert!(!page.captures_text_input());

    assert_eq!(
        page.handle_key_events(key(KeyCode::Char('d'))),
        Action::ShowDialog(DialogType::ConfirmDeleteCredential { credential_id: 7 })
    );

    // First row is already linked
    assert!(matches!(
        page.handle_key_events(key(KeyCode::Char('l'))),
        Action::ShowDialog(DialogType::Info(_))
    ));

    page.handle_key_events(key(KeyCode::Char('j')));
    assert_eq!(
        page.handle_key_events(key(KeyCode::Char('l'))),
        Action::Run(Operation::LinkCredential {
            connector_id: 4,
            credential_id: 7,
            connector_name: "salesforce-4".to_string(),
        })
    );
}

#[test]
fn test_edit_connector_updates_requested_objects() {
    let mut page = SalesforcePage::new();
    let credential = salesforce_credential(7, "reader");
    load(
        &mut page,
        vec![credential.clone()],
        vec![status_for(1, connector(3, "salesforce", &["Case"]), credential)],
    );

    page.handle_key_events(key(KeyCode::Char('e')));
    assert!(page.is_editing_connector());
    assert!(page.captures_text_input());

    for c in ", Solution".chars() {
        page.handle_key_events(key(KeyCode::Char(c)));
    }
    let action = page.handle_key_events(key(KeyCode::Enter));
    let Action::Run(Operation::UpdateConnector { connector_id, connector }) = action else {
        panic!("expected an update connector operation, got {:?}", action);
    };
    assert_eq!(connector_id, 3);
    assert_eq!(
        connector.connector_specific_config["requested_objects"],
        serde_json::json!(["Case", "Solution"])
    );
    assert!(!page.is_editing_connector());
}

#[test]
fn test_summary_tooltip_toggles() {
    let mut page = SalesforcePage::new();
    let credential = salesforce_credential(7, "reader");
    load(
        &mut page,
        vec![credential.clone()],
        vec![status_for(1, connector(3, "salesforce", &["Case"]), credential)],
    );

    screen(&mut page);
    page.handle_key_events(key(KeyCode::Char('i')));
    assert!(page.tooltips().is_open("summary"));
    assert!(screen(&mut page).contains("One connector per credential"));

    page.handle_key_events(key(KeyCode::Char('i')));
    assert!(!page.tooltips().is_open("summary"));
}
