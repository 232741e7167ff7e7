//! Salesforce KB Articles connector page.
//!
//! The page reads two cached collections, credentials and connector indexing
//! statuses, and walks the admin through three steps: store a credential,
//! create a connector using it, then review the configured connector.
//! Which step is shown is a pure function of the cache ([`SalesforceView::derive`]).

use crate::api::{
    ConnectorBase, ConnectorIndexingStatus, Credential, CredentialBase, SalesforceConfig, SalesforceCredentialJson,
};
use crate::cache::{CacheKey, QueryCache};
use crate::constants::{
    ERROR_ALREADY_LINKED, ERROR_LOAD_CONNECTORS, ERROR_NO_CONNECTOR_SELECTED, LOADING_MESSAGE, SALESFORCE_SOURCE,
    TITLE_SALESFORCE_PAGE,
};
use crate::operations::Operation;
use crate::ui::components::dialogs::common::{shortcuts, InstructionShortcut};
use crate::ui::components::{
    CardSection, ConnectorRow, ConnectorTable, Form, FormEvent, FormField, FormValues, TooltipContent,
    TooltipProvider, TooltipTrigger,
};
use crate::ui::core::{Action, Component, DialogType};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Collections the page reads
pub const SALESFORCE_KEYS: [CacheKey; 2] = [CacheKey::IndexingStatuses, CacheKey::Credentials];

const SUMMARY_TOOLTIP: &str = "summary";
const SUMMARY_HELP: &str = "One connector per credential. Select a row with j/k, press e to change its \
requested objects or l to link the credential to it. d deletes the credential.";

/// First credential whose payload is a Salesforce credential with a username
pub fn find_salesforce_credential(credentials: &[Credential]) -> Option<&Credential> {
    credentials.iter().find(|credential| {
        credential
            .payload::<SalesforceCredentialJson>()
            .is_some_and(|payload| payload.has_username())
    })
}

/// Statuses whose connector reads from Salesforce
pub fn salesforce_statuses(statuses: &[ConnectorIndexingStatus]) -> Vec<&ConnectorIndexingStatus> {
    statuses
        .iter()
        .filter(|status| status.connector.is_source(SALESFORCE_SOURCE))
        .collect()
}

pub fn connector_row(status: &ConnectorIndexingStatus, credential_id: i64) -> ConnectorRow {
    let requested_objects = status
        .connector
        .specific_config::<SalesforceConfig>()
        .map(|config| config.requested_objects_summary())
        .unwrap_or_default();

    ConnectorRow {
        cc_pair_id: status.cc_pair_id,
        name: status.name.clone().unwrap_or_else(|| status.connector.name.clone()),
        last_status: status.last_status.clone(),
        in_progress: status.in_progress,
        requested_objects,
        credential_linked: status.credential.id == credential_id || status.connector.is_linked_to(credential_id),
        docs_indexed: status.docs_indexed,
        connector: status.connector.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SalesforceView {
    Loading,
    /// Either collection failed to load
    Failed,
    NeedsCredential,
    NeedsConnector {
        credential: Credential,
    },
    Configured {
        credential: Credential,
        rows: Vec<ConnectorRow>,
    },
}

impl SalesforceView {
    pub fn derive(cache: &QueryCache) -> Self {
        let queries: Vec<_> = SALESFORCE_KEYS.iter().filter_map(|key| cache.query(*key)).collect();

        if queries.iter().any(|query| query.is_loading() && query.data().is_none()) {
            return SalesforceView::Loading;
        }
        if queries.iter().any(|query| query.error().is_some()) {
            return SalesforceView::Failed;
        }

        let (Some(credentials), Some(statuses)) = (cache.credentials(), cache.indexing_statuses()) else {
            return SalesforceView::Loading;
        };

        let Some(credential) = find_salesforce_credential(credentials) else {
            return SalesforceView::NeedsCredential;
        };

        let connectors = salesforce_statuses(statuses);
        if connectors.is_empty() {
            return SalesforceView::NeedsConnector {
                credential: credential.clone(),
            };
        }

        SalesforceView::Configured {
            credential: credential.clone(),
            rows: connectors
                .into_iter()
                .map(|status| connector_row(status, credential.id))
                .collect(),
        }
    }
}

fn credential_form() -> Form {
    Form::new(
        "Step 1: Provide your credentials",
        vec![
            FormField::text("sf_client_id", "Client ID")
                .required()
                .help("Consumer key of the connected app in Salesforce Setup"),
            FormField::secret("sf_client_secret", "Client Secret").required(),
            FormField::text("sf_username", "Username")
                .required()
                .help("Integration user the connector signs in as; it needs read access to Knowledge"),
            FormField::secret("sf_password", "Password").required(),
        ],
    )
}

fn connector_form(title: &str, requested_objects: &str) -> Form {
    Form::new(
        title,
        vec![FormField::list("requested_objects", "Requested Objects")
            .with_text(requested_objects)
            .help("Comma separated Salesforce object names to index, for example Knowledge__kav. Leave empty to index the default objects.")],
    )
}

fn credential_request(values: &FormValues) -> Result<CredentialBase, serde_json::Error> {
    CredentialBase::salesforce(&SalesforceCredentialJson {
        sf_client_id: values.text("sf_client_id").to_string(),
        sf_client_secret: values.text("sf_client_secret").to_string(),
        sf_username: values.text("sf_username").to_string(),
        sf_password: values.text("sf_password").to_string(),
    })
}

struct ConnectorEdit {
    row: ConnectorRow,
    form: Form,
}

pub struct SalesforcePage {
    cache: QueryCache,
    view: SalesforceView,
    credential_form: Form,
    connector_form: Form,
    edit: Option<ConnectorEdit>,
    table: ConnectorTable,
    tooltips: TooltipProvider,
}

impl Default for SalesforcePage {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesforcePage {
    pub fn new() -> Self {
        let cache = QueryCache::new(&SALESFORCE_KEYS);
        Self {
            view: SalesforceView::derive(&cache),
            cache,
            credential_form: credential_form(),
            connector_form: connector_form("Step 2: Enter connector settings", ""),
            edit: None,
            table: ConnectorTable::new(),
            tooltips: TooltipProvider::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        TITLE_SALESFORCE_PAGE
    }

    pub fn view(&self) -> &SalesforceView {
        &self.view
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn is_editing_connector(&self) -> bool {
        self.edit.is_some()
    }

    pub fn tooltips(&self) -> &TooltipProvider {
        &self.tooltips
    }

    /// Invalidate every collection that was never fetched
    pub fn initial_actions(&self) -> Vec<Action> {
        SALESFORCE_KEYS
            .iter()
            .filter(|key| self.cache.fetch_count(**key) == 0)
            .map(|key| Action::Invalidate(*key))
            .collect()
    }

    pub fn revalidate_actions(&self) -> Vec<Action> {
        SALESFORCE_KEYS.iter().map(|key| Action::Invalidate(*key)).collect()
    }

    fn refresh_view(&mut self) {
        let view = SalesforceView::derive(&self.cache);
        if !matches!(view, SalesforceView::Configured { .. }) {
            self.edit = None;
        }
        self.view = view;
    }

    fn active_form(&self) -> Option<&Form> {
        match &self.view {
            SalesforceView::NeedsCredential => Some(&self.credential_form),
            SalesforceView::NeedsConnector { .. } => Some(&self.connector_form),
            SalesforceView::Configured { .. } => self.edit.as_ref().map(|edit| &edit.form),
            _ => None,
        }
    }

    fn toggle_field_tooltip(&mut self) {
        let key = self.active_form().and_then(|form| form.focused()).map(FormField::key);
        match key {
            Some(key) => TooltipTrigger::new(key).toggle(&mut self.tooltips),
            None => self.tooltips.close(),
        }
    }

    fn handle_credential_form(&mut self, key: KeyEvent) -> Action {
        match self.credential_form.handle_key(key) {
            FormEvent::Submitted(values) => match credential_request(&values) {
                Ok(request) => {
                    self.credential_form = credential_form();
                    Action::Run(Operation::CreateCredential(request))
                }
                Err(e) => Action::ShowDialog(DialogType::Error(e.to_string())),
            },
            FormEvent::Cancelled => {
                self.credential_form = credential_form();
                Action::None
            }
            FormEvent::None => Action::None,
        }
    }

    fn handle_connector_form(&mut self, key: KeyEvent, credential_id: i64) -> Action {
        match self.connector_form.handle_key(key) {
            FormEvent::Submitted(values) => {
                let config = SalesforceConfig::new(values.list("requested_objects"));
                match ConnectorBase::salesforce(&config) {
                    Ok(connector) => {
                        self.connector_form = connector_form("Step 2: Enter connector settings", "");
                        Action::Run(Operation::CreateConnector {
                            connector,
                            credential_id: Some(credential_id),
                        })
                    }
                    Err(e) => Action::ShowDialog(DialogType::Error(e.to_string())),
                }
            }
            FormEvent::Cancelled => {
                self.connector_form = connector_form("Step 2: Enter connector settings", "");
                Action::None
            }
            FormEvent::None => Action::None,
        }
    }

    fn handle_edit_form(&mut self, key: KeyEvent) -> Action {
        let Some(edit) = self.edit.as_mut() else {
            return Action::None;
        };

        match edit.form.handle_key(key) {
            FormEvent::Submitted(values) => {
                let config = SalesforceConfig::new(values.list("requested_objects"));
                let action = match serde_json::to_value(&config) {
                    Ok(value) => Action::Run(Operation::UpdateConnector {
                        connector_id: edit.row.connector.id,
                        connector: ConnectorBase::from_existing(&edit.row.connector, value),
                    }),
                    Err(e) => Action::ShowDialog(DialogType::Error(e.to_string())),
                };
                self.edit = None;
                action
            }
            FormEvent::Cancelled => {
                self.edit = None;
                Action::None
            }
            FormEvent::None => Action::None,
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent, credential_id: i64, rows: &[ConnectorRow]) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.table.next(rows.len());
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.table.previous();
                Action::None
            }
            KeyCode::Char('d') => Action::ShowDialog(DialogType::ConfirmDeleteCredential { credential_id }),
            KeyCode::Char('l') => match self.table.selected_row(rows) {
                None => Action::ShowDialog(DialogType::Error(ERROR_NO_CONNECTOR_SELECTED.to_string())),
                Some(row) if row.credential_linked => {
                    Action::ShowDialog(DialogType::Info(ERROR_ALREADY_LINKED.to_string()))
                }
                Some(row) => Action::Run(Operation::LinkCredential {
                    connector_id: row.connector.id,
                    credential_id,
                    connector_name: row.connector.name.clone(),
                }),
            },
            KeyCode::Char('e') => match self.table.selected_row(rows) {
                None => Action::ShowDialog(DialogType::Error(ERROR_NO_CONNECTOR_SELECTED.to_string())),
                Some(row) => {
                    let title = format!("Edit connector '{}'", row.name);
                    self.edit = Some(ConnectorEdit {
                        form: connector_form(&title, &row.requested_objects),
                        row: row.clone(),
                    });
                    Action::None
                }
            },
            KeyCode::Char('i') => {
                TooltipTrigger::new(SUMMARY_TOOLTIP).toggle(&mut self.tooltips);
                Action::None
            }
            KeyCode::Esc => {
                self.tooltips.close();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render_message(&self, f: &mut Frame, area: Rect, text: &str, hint: Option<&str>, style: Style) {
        let mut lines = vec![Line::from(text.to_string())];
        if let Some(hint) = hint {
            lines.push(Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::Gray))));
        }
        let height = (lines.len() as u16 + 2).min(area.height);
        let area = Rect::new(area.x, area.y, area.width, height);
        CardSection::new()
            .style(style)
            .render_with(f, area, Paragraph::new(lines).wrap(Wrap { trim: true }));
    }

    fn render_credential_card(&self, f: &mut Frame, area: Rect, credential: &Credential) {
        let username = credential
            .payload::<SalesforceCredentialJson>()
            .map(|payload| payload.sf_username)
            .unwrap_or_default();

        let lines = vec![
            Line::from(vec![
                Span::styled("Existing credential: ", Style::default().fg(Color::Gray)),
                Span::styled(username, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                Span::styled(format!("  (id {})", credential.id), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(Span::styled("d: delete credential", Style::default().fg(Color::Red))),
        ];
        CardSection::new().title("Credential").render_with(f, area, Paragraph::new(lines));
    }

    fn render_summary(&mut self, f: &mut Frame, area: Rect, rows: &[ConnectorRow]) {
        let inner = CardSection::new().title("Connectors").render(f, area);
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);

        let hint_chunks = Layout::horizontal([Constraint::Length(4), Constraint::Min(0)]).split(chunks[0]);
        TooltipTrigger::new(SUMMARY_TOOLTIP).render(f, hint_chunks[0], &mut self.tooltips);
        let mut hint = "Connectors using this credential".to_string();
        if let Some(updated) = self.cache.last_updated(CacheKey::IndexingStatuses) {
            hint.push_str(&format!(" · refreshed {}", updated.with_timezone(&Local).format("%H:%M:%S")));
        }
        f.render_widget(Paragraph::new(hint).style(Style::default().fg(Color::Gray)), hint_chunks[1]);

        self.table.render(f, chunks[1], rows);
    }
}

impl Component for SalesforcePage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
            self.toggle_field_tooltip();
            return Action::None;
        }

        match self.view.clone() {
            SalesforceView::NeedsCredential => self.handle_credential_form(key),
            SalesforceView::NeedsConnector { credential } => self.handle_connector_form(key, credential.id),
            SalesforceView::Configured { credential, rows } => {
                if self.edit.is_some() {
                    self.handle_edit_form(key)
                } else {
                    self.handle_summary_key(key, credential.id, &rows)
                }
            }
            SalesforceView::Loading | SalesforceView::Failed => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::Invalidate(key) if self.cache.owns(key) => {
                let fetch = self.cache.revalidate(key);
                self.refresh_view();
                if fetch {
                    Action::Fetch(key)
                } else {
                    Action::None
                }
            }
            Action::Fetched { key, result } if self.cache.owns(key) => {
                if let Err(e) = &result {
                    log::warn!("Loading {} failed: {}", key.label(), e);
                }
                let again = self.cache.resolve(key, result) && self.cache.revalidate(key);
                self.refresh_view();
                if again {
                    Action::Fetch(key)
                } else {
                    Action::None
                }
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        match self.view.clone() {
            SalesforceView::Loading => {
                self.render_message(f, rect, LOADING_MESSAGE, None, Style::default());
            }
            SalesforceView::Failed => {
                self.render_message(
                    f,
                    rect,
                    ERROR_LOAD_CONNECTORS,
                    Some("Press r to try again"),
                    Style::default().fg(Color::Red),
                );
            }
            SalesforceView::NeedsCredential => {
                let chunks = Layout::vertical([Constraint::Length(self.credential_form.height()), Constraint::Min(0)])
                    .split(rect);
                self.credential_form.render(f, chunks[0], &mut self.tooltips);
            }
            SalesforceView::NeedsConnector { credential } => {
                let chunks = Layout::vertical([
                    Constraint::Length(4),
                    Constraint::Length(self.connector_form.height()),
                    Constraint::Min(0),
                ])
                .split(rect);
                self.render_credential_card(f, chunks[0], &credential);
                self.connector_form.render(f, chunks[1], &mut self.tooltips);
            }
            SalesforceView::Configured { credential, rows } => {
                let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).split(rect);
                self.render_credential_card(f, chunks[0], &credential);

                if let Some(edit) = &self.edit {
                    let height = edit.form.height();
                    let area = Rect::new(chunks[1].x, chunks[1].y, chunks[1].width, height.min(chunks[1].height));
                    edit.form.render(f, area, &mut self.tooltips);
                } else {
                    self.render_summary(f, chunks[1], &rows);
                    TooltipContent::new(SUMMARY_HELP)
                        .width(50)
                        .render(f, &self.tooltips, SUMMARY_TOOLTIP);
                }
            }
        }
    }

    fn captures_text_input(&self) -> bool {
        self.active_form().is_some_and(Form::is_editing_text)
    }

    fn shortcuts(&self) -> Vec<InstructionShortcut> {
        if let Some(form) = self.active_form() {
            return form.shortcuts();
        }
        match self.view {
            SalesforceView::Configured { .. } => vec![
                ("j/k", Color::Cyan, " Select"),
                ("e", Color::Green, " Edit"),
                ("l", Color::Green, " Link"),
                ("d", Color::Red, " Delete credential"),
                shortcuts::REFRESH,
                shortcuts::HELP,
                shortcuts::QUIT,
            ],
            _ => vec![shortcuts::REFRESH, shortcuts::HELP, shortcuts::QUIT],
        }
    }
}
