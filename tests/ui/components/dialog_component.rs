use crate::render::render_to_string;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indexadmin::logger::Logger;
use indexadmin::operations::Operation;
use indexadmin::ui::components::DialogComponent;
use indexadmin::ui::core::{Action, Component, DialogType};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_dialog_shows_and_hides_through_update() {
    let mut dialog = DialogComponent::new(Logger::new());
    assert!(!dialog.is_visible());

    assert_eq!(dialog.update(Action::ShowDialog(DialogType::Help)), Action::None);
    assert!(dialog.is_visible());

    assert_eq!(dialog.update(Action::HideDialog), Action::None);
    assert!(!dialog.is_visible());

    // Unrelated actions pass through
    assert_eq!(dialog.update(Action::RevalidateAll), Action::RevalidateAll);
}

#[test]
fn test_any_key_dismisses_messages() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.show(DialogType::Error("boom".to_string()));
    assert_eq!(dialog.handle_key_events(key(KeyCode::Char('x'))), Action::HideDialog);
}

#[test]
fn test_confirm_delete_runs_operation() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.show(DialogType::ConfirmDeleteCredential { credential_id: 12 });

    assert_eq!(dialog.handle_key_events(key(KeyCode::Char('x'))), Action::None);
    assert!(dialog.is_visible());

    assert_eq!(
        dialog.handle_key_events(key(KeyCode::Enter)),
        Action::Run(Operation::DeleteCredential(12))
    );
    assert!(!dialog.is_visible());
}

#[test]
fn test_confirm_delete_can_be_cancelled() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.show(DialogType::ConfirmDeleteCredential { credential_id: 12 });
    assert_eq!(dialog.handle_key_events(key(KeyCode::Esc)), Action::HideDialog);
}

#[test]
fn test_logs_dialog_lists_logger_entries() {
    let logger = Logger::new();
    logger.log("Fetching credentials".to_string());
    let mut dialog = DialogComponent::new(logger);
    dialog.show(DialogType::Logs);

    assert_eq!(dialog.handle_key_events(key(KeyCode::Char('j'))), Action::None);
    assert_eq!(dialog.scroll_offset, 1);

    let screen = render_to_string(80, 20, |f, area| dialog.render(f, area));
    assert!(screen.contains("Fetching credentials"));
}

#[test]
fn test_dialog_arriving_during_confirmation_waits_its_turn() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.update(Action::ShowDialog(DialogType::ConfirmDeleteCredential { credential_id: 12 }));
    dialog.update(Action::ShowDialog(DialogType::Error("❌ Operation failed: timeout".to_string())));
    dialog.update(Action::ShowDialog(DialogType::Info("Connector updated".to_string())));

    assert_eq!(
        dialog.dialog_type,
        Some(DialogType::ConfirmDeleteCredential { credential_id: 12 })
    );
    assert_eq!(dialog.pending_count(), 2);

    // Cancelling the confirmation reveals the queued results in order
    let action = dialog.handle_key_events(key(KeyCode::Esc));
    dialog.update(action);
    assert_eq!(
        dialog.dialog_type,
        Some(DialogType::Error("❌ Operation failed: timeout".to_string()))
    );

    let action = dialog.handle_key_events(key(KeyCode::Char('x')));
    dialog.update(action);
    assert_eq!(dialog.dialog_type, Some(DialogType::Info("Connector updated".to_string())));

    let action = dialog.handle_key_events(key(KeyCode::Enter));
    dialog.update(action);
    assert!(!dialog.is_visible());
    assert_eq!(dialog.pending_count(), 0);
}

#[test]
fn test_repeated_dialog_is_not_queued_twice() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.show(DialogType::Help);
    dialog.show(DialogType::Help);
    dialog.show(DialogType::Error("boom".to_string()));
    dialog.show(DialogType::Error("boom".to_string()));
    assert_eq!(dialog.pending_count(), 1);
}

#[test]
fn test_confirming_delete_brings_up_queued_dialog() {
    let mut dialog = DialogComponent::new(Logger::new());
    dialog.show(DialogType::ConfirmDeleteCredential { credential_id: 12 });
    dialog.show(DialogType::Info("Credential linked".to_string()));

    assert_eq!(
        dialog.handle_key_events(key(KeyCode::Char('y'))),
        Action::Run(Operation::DeleteCredential(12))
    );
    assert_eq!(dialog.dialog_type, Some(DialogType::Info("Credential linked".to_string())));
}
