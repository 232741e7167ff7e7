use crate::mock_api::{document_set, persona, MockAdminApi};
use crate::render::render_to_string;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indexadmin::api::{load_bot_config_inputs, ApiError, BotConfigInputs};
use indexadmin::operations::Operation;
use indexadmin::ui::core::{Action, Component};
use indexadmin::ui::pages::bot_config::creation_request;
use indexadmin::ui::pages::{BotConfigPage, BotConfigView};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn inputs() -> BotConfigInputs {
    BotConfigInputs {
        document_sets: vec![document_set(11, "Handbook"), document_set(12, "Runbooks")],
        personas: vec![persona(21, "Support", true), persona(22, "Sales", true)],
    }
}

#[test]
fn test_inputs_are_requested_once() {
    let mut page = BotConfigPage::new();
    assert_eq!(page.initial_actions(), vec![Action::LoadBotConfigInputs]);
    assert!(page.initial_actions().is_empty());
    assert_eq!(page.view(), &BotConfigView::Loading);
    assert!(page.form().is_none());
}

#[tokio::test]
async fn test_document_set_failure_replaces_form_with_error() {
    let api = MockAdminApi::new().fail(
        "list_document_sets",
        ApiError::Http {
            status: 500,
            body: "document index offline".to_string(),
        },
    );
    let result = load_bot_config_inputs(&api).await;

    let mut page = BotConfigPage::new();
    page.update(Action::BotConfigInputsLoaded(result));

    let BotConfigView::Failed(message) = page.view() else {
        panic!("expected a failed view, got {:?}", page.view());
    };
    assert!(message.contains("document index offline"));
    assert!(page.form().is_none());
    assert!(!page.captures_text_input());

    let screen = render_to_string(100, 10, |f, area| page.render(f, area));
    assert!(screen.contains("document index offline"));
    assert!(!screen.contains("Channel Names"));
}

#[test]
fn test_loaded_inputs_show_form() {
    let mut page = BotConfigPage::new();
    page.update(Action::BotConfigInputsLoaded(Ok(inputs())));

    assert_eq!(page.view(), &BotConfigView::Ready);
    assert!(page.captures_text_input());

    let screen = render_to_string(100, 24, |f, area| page.render(f, area));
    assert!(screen.contains("Channel Names"));
    assert!(screen.contains("Handbook"));
}

#[test]
fn test_submit_maps_choices_to_ids() {
    let mut page = BotConfigPage::new();
    page.update(Action::BotConfigInputsLoaded(Ok(inputs())));

    for c in "support, help-desk".chars() {
        page.handle_key_events(key(KeyCode::Char(c)));
    }
    // Assistant: skip "None" and pick the second persona
    page.handle_key_events(key(KeyCode::Tab));
    page.handle_key_events(key(KeyCode::Right));
    page.handle_key_events(key(KeyCode::Right));
    // Document sets: select the second one
    page.handle_key_events(key(KeyCode::Tab));
    page.handle_key_events(key(KeyCode::Right));
    page.handle_key_events(key(KeyCode::Char(' ')));
    // Respond only when tagged
    page.handle_key_events(key(KeyCode::Tab));
    page.handle_key_events(key(KeyCode::Char(' ')));

    let action = page.handle_key_events(key(KeyCode::Enter));
    let Action::Run(Operation::CreateBotConfig(request)) = action else {
        panic!("expected a create bot config operation, got {:?}", action);
    };
    assert_eq!(request.channel_names, vec!["support", "help-desk"]);
    assert_eq!(request.persona_id, Some(22));
    assert_eq!(request.document_sets, vec![12]);
    assert!(request.respond_tag_only);
    assert!(!request.respond_to_bots);
    assert!(!request.enable_auto_filters);

    // The form starts over after a submit
    assert_eq!(page.form().map(|form| form.focus()), Some(0));
}

#[test]
fn test_missing_channels_block_submit() {
    let mut page = BotConfigPage::new();
    page.update(Action::BotConfigInputsLoaded(Ok(inputs())));

    assert_eq!(page.handle_key_events(key(KeyCode::Enter)), Action::None);
    assert_eq!(
        page.form().and_then(|form| form.error()),
        Some("Channel Names is required")
    );
}

#[test]
fn test_no_assistant_means_no_persona() {
    let mut page = BotConfigPage::new();
    page.update(Action::BotConfigInputsLoaded(Ok(inputs())));
    let form = page.form().expect("form is ready");

    let request = creation_request(&form.values(), &inputs());
    assert_eq!(request.persona_id, None);
    assert!(request.document_sets.is_empty());
    assert!(request.channel_names.is_empty());
}

#[test]
fn test_ctrl_t_toggles_focused_field_help() {
    let mut page = BotConfigPage::new();
    page.update(Action::BotConfigInputsLoaded(Ok(inputs())));
    let ctrl_t = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);

    let closed = render_to_string(100, 24, |f, area| page.render(f, area));
    assert!(!closed.contains("Comma separated"));

    assert_eq!(page.handle_key_events(ctrl_t), Action::None);
    let open = render_to_string(100, 24, |f, area| page.render(f, area));
    assert!(open.contains("Comma separated"));

    page.handle_key_events(ctrl_t);
    let closed_again = render_to_string(100, 24, |f, area| page.render(f, area));
    assert!(!closed_again.contains("Comma separated"));
    // Ctrl+T never types into the field
    assert!(page.form().is_some_and(|form| form.values().list("channel_names").is_empty()));
}
