use crate::api::AdminApi;
use crate::logger::Logger;
use crate::ui::components::dialogs::common::shortcuts;
use crate::ui::components::{DialogComponent, StatusBar};
use crate::ui::core::{
    actions::{Action, DialogType, Page},
    event_handler::EventType,
    task_manager::TaskManager,
    AppContext, Component,
};
use crate::ui::layout::LayoutManager;
use crate::ui::pages::{BotConfigPage, SalesforcePage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Tabs,
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Application state separate from UI concerns
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub page: Page,
    pub should_quit: bool,
}

pub struct AppComponent {
    // Pages and overlays
    bot_config: BotConfigPage,
    salesforce: SalesforcePage,
    dialog: DialogComponent,

    // Application state
    state: AppState,

    // Services
    api: Arc<dyn AdminApi>,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,
}

impl AppComponent {
    pub fn new(ctx: AppContext) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();

        Self {
            bot_config: BotConfigPage::new(),
            salesforce: SalesforcePage::new(),
            dialog: DialogComponent::new(ctx.logger.clone()),
            state: AppState {
                page: ctx.config.default_page(),
                should_quit: false,
            },
            api: ctx.api,
            task_manager,
            background_action_rx,
            logger: ctx.logger,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    pub fn page(&self) -> Page {
        self.state.page
    }

    pub fn salesforce(&self) -> &SalesforcePage {
        &self.salesforce
    }

    pub fn bot_config(&self) -> &BotConfigPage {
        &self.bot_config
    }

    pub fn dialog(&self) -> Option<&DialogType> {
        self.dialog.dialog_type.as_ref()
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn is_busy(&self) -> bool {
        self.task_manager.task_count() > 0
    }

    /// Load the data of the start page
    pub fn start(&mut self) {
        self.logger.log(format!("AppComponent: Starting on page '{}'", self.state.page.name()));
        self.activate_page(self.state.page);
    }

    fn activate_page(&mut self, page: Page) {
        self.state.page = page;
        let actions = match page {
            Page::BotConfig => self.bot_config.initial_actions(),
            Page::Salesforce => self.salesforce.initial_actions(),
        };
        for action in actions {
            self.dispatch(action);
        }
    }

    fn active_page(&self) -> &dyn Component {
        match self.state.page {
            Page::BotConfig => &self.bot_config,
            Page::Salesforce => &self.salesforce,
        }
    }

    fn active_page_mut(&mut self) -> &mut dyn Component {
        match self.state.page {
            Page::BotConfig => &mut self.bot_config,
            Page::Salesforce => &mut self.salesforce,
        }
    }

    /// Shortcuts that work everywhere, even while typing
    fn handle_control_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::F(1) {
            return Some(Action::ShowDialog(DialogType::Help));
        }
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => {
                self.logger.log("Global key: Ctrl+C - quitting application".to_string());
                Some(Action::Quit)
            }
            KeyCode::Char('r') => Some(Action::RevalidateAll),
            KeyCode::Char('g') => Some(Action::ShowDialog(DialogType::Logs)),
            KeyCode::Char('p') => Some(Action::SwitchPage(self.state.page.next())),
            _ => None,
        }
    }

    /// Single-letter shortcuts, only consulted when no text field has focus
    fn handle_global_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => {
                self.logger.log("Global key: 'q' - quitting application".to_string());
                Some(Action::Quit)
            }
            KeyCode::Char('r') => Some(Action::RevalidateAll),
            KeyCode::Char('?') => Some(Action::ShowDialog(DialogType::Help)),
            KeyCode::Char('G') => Some(Action::ShowDialog(DialogType::Logs)),
            KeyCode::Char('1') => Some(Action::SwitchPage(Page::BotConfig)),
            KeyCode::Char('2') => Some(Action::SwitchPage(Page::Salesforce)),
            _ => None,
        }
    }

    /// Route a key press: dialog first, then global shortcuts, then the page
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = if self.dialog.is_visible() {
            self.dialog.handle_key_events(key)
        } else if let Some(action) = self.handle_control_key(key) {
            action
        } else if self.active_page().captures_text_input() {
            self.active_page_mut().handle_key_events(key)
        } else if let Some(action) = self.handle_global_key(key) {
            action
        } else {
            self.active_page_mut().handle_key_events(key)
        };

        self.dispatch(action);
    }

    /// Pass an action through the component hierarchy, then handle what is left
    pub fn dispatch(&mut self, action: Action) {
        let action = self.update(action);
        self.handle_app_action(action);
    }

    pub fn handle_app_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
            }
            Action::SwitchPage(page) => {
                self.logger.log(format!("Switching to page '{}'", page.name()));
                self.activate_page(page);
            }
            Action::Fetch(key) => {
                self.logger.log(format!("Fetching {}", key.label()));
                self.task_manager.spawn_fetch(Arc::clone(&self.api), key);
            }
            Action::RevalidateAll => {
                let actions = match self.state.page {
                    Page::Salesforce => self.salesforce.revalidate_actions(),
                    Page::BotConfig => Vec::new(),
                };
                if actions.is_empty() {
                    self.logger.log("Nothing to reload on this page".to_string());
                }
                for action in actions {
                    self.dispatch(action);
                }
            }
            Action::LoadBotConfigInputs => {
                self.logger.log("Loading bot configuration inputs".to_string());
                self.task_manager.spawn_bot_config_load(Arc::clone(&self.api));
            }
            Action::Run(operation) => {
                self.logger.log(format!("Running: {}", operation.description()));
                self.task_manager.spawn_operation(Arc::clone(&self.api), operation);
            }
            Action::Invalidate(key) => {
                self.logger.log(format!("No page reads {}, ignoring invalidation", key.label()));
            }
            Action::Fetched { key, .. } => {
                self.logger.log(format!("No page reads {}, dropping result", key.label()));
            }
            Action::BotConfigInputsLoaded(_)
            | Action::ShowDialog(_)
            | Action::HideDialog
            | Action::None => {}
        }
    }

    /// Apply every action background tasks have sent so far. Returns how many there were.
    pub fn process_background_actions(&mut self) -> usize {
        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }

        let count = actions.len();
        for action in actions {
            self.logger.log(format!("Background: Received action {:?}", action));
            self.dispatch(action);
        }

        let completed_tasks = self.task_manager.cleanup_finished_tasks();
        if !completed_tasks.is_empty() {
            self.logger.log(format!("Background: Finished {}", completed_tasks.join(", ")));
        }

        count
    }

    /// Wait until no background work is left, applying results as they come in
    pub async fn settle(&mut self) {
        loop {
            self.task_manager.join_all().await;
            if self.process_background_actions() == 0 && self.task_manager.task_count() == 0 {
                break;
            }
        }
    }

    /// Process one terminal event. Returns `true` when the screen needs redrawing.
    pub fn handle_event(&mut self, event_type: EventType) -> bool {
        match event_type {
            EventType::Key(key) => {
                self.handle_key(key);
                true
            }
            EventType::Resize(_, _) => true,
            // Redraw while busy so the status bar follows running tasks
            EventType::Tick => self.process_background_actions() > 0 || self.is_busy(),
            EventType::Other => false,
        }
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let titles = vec![
            format!("1 {}", self.bot_config.title()),
            format!("2 {}", self.salesforce.title()),
        ];
        let selected = Page::ALL.iter().position(|page| *page == self.state.page).unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        // Keys are routed through handle_key; this only resolves global shortcuts
        self.handle_control_key(key)
            .or_else(|| self.handle_global_key(key))
            .unwrap_or(Action::None)
    }

    fn update(&mut self, action: Action) -> Action {
        let action = self.dialog.update(action);
        let action = self.bot_config.update(action);
        self.salesforce.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (content, status) = LayoutManager::main_layout(rect);
        let (header, body) = LayoutManager::page_layout(content);

        self.render_tabs(f, header);
        self.active_page_mut().render(f, body);

        let mut hints = self.active_page().shortcuts();
        if self.active_page().captures_text_input() {
            hints.push(shortcuts::CTRL_R_REFRESH);
        } else {
            hints.push(shortcuts::CTRL_P_PAGE);
        }
        StatusBar::render(f, status, &self.task_manager.active_descriptions(), &hints);

        // Dialogs go on top of everything
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
    }

    fn captures_text_input(&self) -> bool {
        self.active_page().captures_text_input()
    }
}
