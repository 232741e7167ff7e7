use crate::render::render_to_string;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indexadmin::ui::components::form::parse_list;
use indexadmin::ui::components::{Form, FormEvent, FormField, FormValue, TooltipProvider};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(form: &mut Form, text: &str) {
    for c in text.chars() {
        form.handle_key(key(KeyCode::Char(c)));
    }
}

fn sample_form() -> Form {
    Form::new(
        "Sample",
        vec![
            FormField::text("name", "Name").required(),
            FormField::list("objects", "Objects"),
            FormField::toggle("enabled", "Enabled"),
            FormField::select("color", "Color", vec!["red".to_string(), "blue".to_string()]),
            FormField::multi_select("tags", "Tags", vec!["a".to_string(), "b".to_string(), "c".to_string()]),
        ],
    )
}

#[test]
fn test_parse_list_trims_and_drops_blanks() {
    assert_eq!(parse_list(" Case, Knowledge__kav ,,  "), vec!["Case", "Knowledge__kav"]);
    assert!(parse_list("").is_empty());
}

#[test]
fn test_required_field_blocks_submit() {
    let mut form = sample_form();
    form.focus_next();

    assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::None);
    assert_eq!(form.error(), Some("Name is required"));
    // Focus jumps back to the missing field
    assert_eq!(form.focus(), 0);
}

#[test]
fn test_submit_collects_typed_values() {
    let mut form = sample_form();
    type_text(&mut form, "Docs");
    form.handle_key(key(KeyCode::Tab));
    type_text(&mut form, "Case, Solution");
    form.handle_key(key(KeyCode::Tab));
    form.handle_key(key(KeyCode::Char(' ')));
    form.handle_key(key(KeyCode::Tab));
    form.handle_key(key(KeyCode::Right));
    form.handle_key(key(KeyCode::Tab));
    form.handle_key(key(KeyCode::Char(' ')));
    form.handle_key(key(KeyCode::Right));
    form.handle_key(key(KeyCode::Right));
    form.handle_key(key(KeyCode::Char(' ')));

    let FormEvent::Submitted(values) = form.handle_key(key(KeyCode::Enter)) else {
        panic!("form should submit");
    };
    assert_eq!(values.text("name"), "Docs");
    assert_eq!(values.list("objects"), vec!["Case", "Solution"]);
    assert!(values.flag("enabled"));
    assert_eq!(values.choice("color"), Some(1));
    assert_eq!(values.choices("tags"), vec![0, 2]);
    assert!(form.error().is_none());
}

#[test]
fn test_text_editing_moves_cursor() {
    let mut form = Form::new("Edit", vec![FormField::text("name", "Name").with_text("abc")]);
    form.handle_key(key(KeyCode::Left));
    form.handle_key(key(KeyCode::Backspace));
    form.handle_key(key(KeyCode::Home));
    form.handle_key(key(KeyCode::Char('x')));

    assert_eq!(form.values().get("name"), Some(&FormValue::Text("xac".to_string())));
}

#[test]
fn test_escape_cancels_and_ctrl_keys_are_ignored() {
    let mut form = sample_form();
    assert_eq!(
        form.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
        FormEvent::None
    );
    assert_eq!(form.values().get("name"), Some(&FormValue::Text(String::new())));
    assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Cancelled);
}

#[test]
fn test_text_focus_is_reported() {
    let mut form = sample_form();
    assert!(form.is_editing_text());
    form.focus_previous();
    assert!(!form.is_editing_text());
}

#[test]
fn test_secret_field_is_masked() {
    let mut form = Form::new("Login", vec![FormField::secret("password", "Password")]);
    type_text(&mut form, "hunter2");

    let mut tooltips = TooltipProvider::new();
    let screen = render_to_string(40, form.height(), |f, area| form.render(f, area, &mut tooltips));
    assert!(!screen.contains("hunter2"));
    assert!(screen.contains("•••••••"));
}

#[test]
fn test_help_field_gets_tooltip_trigger() {
    let form = Form::new("Help", vec![FormField::text("id", "Client ID").help("Consumer key")]);
    let mut tooltips = TooltipProvider::new();
    tooltips.open("id");

    let screen = render_to_string(60, form.height() + 4, |f, area| form.render(f, area, &mut tooltips));
    assert!(screen.contains("(?)"));
    assert!(screen.contains("Consumer key"));
    assert!(tooltips.anchor("id").is_some());
}
