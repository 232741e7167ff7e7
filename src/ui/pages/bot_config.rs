//! Bot configuration creation page.
//!
//! Loads document sets and assistants once, in parallel. Any load failure is
//! final for the page and shown as an error callout instead of the form.

use crate::api::{BotConfigCreationRequest, BotConfigInputs};
use crate::constants::{LOADING_MESSAGE, TITLE_BOT_CONFIG_PAGE};
use crate::operations::Operation;
use crate::ui::components::dialogs::common::{shortcuts, InstructionShortcut};
use crate::ui::components::{CardSection, Form, FormEvent, FormField, FormValues, TooltipProvider, TooltipTrigger};
use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

const NO_ASSISTANT: &str = "None";

#[derive(Debug, Clone, PartialEq)]
pub enum BotConfigView {
    Loading,
    Failed(String),
    Ready,
}

fn creation_form(inputs: &BotConfigInputs) -> Form {
    let mut assistants = vec![NO_ASSISTANT.to_string()];
    assistants.extend(inputs.personas.iter().map(|persona| persona.name.clone()));

    Form::new(
        "Create a new bot configuration",
        vec![
            FormField::list("channel_names", "Channel Names")
                .required()
                .help("Comma separated channel names the bot listens in, without the leading '#'"),
            FormField::select("persona", "Assistant", assistants)
                .help("Assistant that answers in these channels; None uses the document sets below"),
            FormField::multi_select(
                "document_sets",
                "Document Sets",
                inputs.document_sets.iter().map(|set| set.name.clone()).collect(),
            )
            .help("Restrict answers to these document sets; leave empty to search everything"),
            FormField::toggle("respond_tag_only", "Respond only when tagged"),
            FormField::toggle("respond_to_bots", "Respond to other bots"),
        ],
    )
}

/// Build the creation request from submitted form values
pub fn creation_request(values: &FormValues, inputs: &BotConfigInputs) -> BotConfigCreationRequest {
    let persona_id = values
        .choice("persona")
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| inputs.personas.get(index))
        .map(|persona| persona.id);

    let document_sets = values
        .choices("document_sets")
        .into_iter()
        .filter_map(|index| inputs.document_sets.get(index))
        .map(|set| set.id)
        .collect();

    BotConfigCreationRequest {
        channel_names: values.list("channel_names"),
        document_sets,
        persona_id,
        respond_tag_only: values.flag("respond_tag_only"),
        respond_to_bots: values.flag("respond_to_bots"),
        enable_auto_filters: false,
        answer_filters: Vec::new(),
    }
}

pub struct BotConfigPage {
    view: BotConfigView,
    inputs: BotConfigInputs,
    form: Option<Form>,
    requested: bool,
    tooltips: TooltipProvider,
}

impl Default for BotConfigPage {
    fn default() -> Self {
        Self::new()
    }
}

impl BotConfigPage {
    pub fn new() -> Self {
        Self {
            view: BotConfigView::Loading,
            inputs: BotConfigInputs::default(),
            form: None,
            requested: false,
            tooltips: TooltipProvider::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        TITLE_BOT_CONFIG_PAGE
    }

    pub fn view(&self) -> &BotConfigView {
        &self.view
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    /// The page loads its inputs the first time it is shown, never again
    pub fn initial_actions(&mut self) -> Vec<Action> {
        if std::mem::replace(&mut self.requested, true) {
            Vec::new()
        } else {
            vec![Action::LoadBotConfigInputs]
        }
    }

    fn reset_form(&mut self) {
        self.form = Some(creation_form(&self.inputs));
    }
}

impl Component for BotConfigPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let Some(form) = self.form.as_mut() else {
            return Action::None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
            if let Some(field) = form.focused() {
                TooltipTrigger::new(field.key()).toggle(&mut self.tooltips);
            }
            return Action::None;
        }

        match form.handle_key(key) {
            FormEvent::Submitted(values) => {
                let request = creation_request(&values, &self.inputs);
                self.reset_form();
                Action::Run(Operation::CreateBotConfig(request))
            }
            FormEvent::Cancelled => {
                self.reset_form();
                Action::None
            }
            FormEvent::None => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::BotConfigInputsLoaded(Ok(inputs)) => {
                log::info!(
                    "Loaded {} document sets and {} assistants",
                    inputs.document_sets.len(),
                    inputs.personas.len()
                );
                self.inputs = inputs;
                self.reset_form();
                self.view = BotConfigView::Ready;
                Action::None
            }
            Action::BotConfigInputsLoaded(Err(message)) => {
                log::error!("{}", message);
                self.form = None;
                self.view = BotConfigView::Failed(message);
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        match &self.view {
            BotConfigView::Loading => {
                let area = Rect::new(rect.x, rect.y, rect.width, rect.height.min(3));
                CardSection::new().render_with(f, area, Paragraph::new(LOADING_MESSAGE));
            }
            BotConfigView::Failed(message) => {
                let area = Rect::new(rect.x, rect.y, rect.width, rect.height.min(5));
                CardSection::new()
                    .title("Error")
                    .style(Style::default().fg(Color::Red))
                    .render_with(
                        f,
                        area,
                        Paragraph::new(Line::from(message.clone())).wrap(Wrap { trim: true }),
                    );
            }
            BotConfigView::Ready => {
                if let Some(form) = &self.form {
                    let chunks = Layout::vertical([Constraint::Length(form.height()), Constraint::Min(0)]).split(rect);
                    form.render(f, chunks[0], &mut self.tooltips);
                }
            }
        }
    }

    fn captures_text_input(&self) -> bool {
        self.form.as_ref().is_some_and(Form::is_editing_text)
    }

    fn shortcuts(&self) -> Vec<InstructionShortcut> {
        match &self.form {
            Some(form) => form.shortcuts(),
            None => vec![shortcuts::HELP, shortcuts::QUIT],
        }
    }
}
