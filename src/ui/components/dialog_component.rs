//! Modal dialog component.
//!
//! Shows one [`DialogType`] at a time on top of the current page: operation
//! results, errors, the delete-credential confirmation, help and logs.
//! Dialogs requested while another one is open wait their turn and appear
//! as each one is dismissed.

use crate::logger::Logger;
use crate::operations::Operation;
use crate::ui::components::dialogs::system_dialogs;
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, widgets::ScrollbarState, Frame};
use std::collections::VecDeque;

pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    pub scroll_offset: usize,
    pub scrollbar_state: ScrollbarState,
    pending: VecDeque<DialogType>,
    logger: Logger,
}

impl DialogComponent {
    pub fn new(logger: Logger) -> Self {
        Self {
            dialog_type: None,
            scroll_offset: 0,
            scrollbar_state: ScrollbarState::new(0),
            pending: VecDeque::new(),
            logger,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    /// Number of dialogs waiting behind the visible one
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Show `dialog_type`, or queue it behind the dialog already open
    pub fn show(&mut self, dialog_type: DialogType) {
        let Some(current) = self.dialog_type.as_ref() else {
            self.open(dialog_type);
            return;
        };
        if *current == dialog_type || self.pending.contains(&dialog_type) {
            return;
        }
        self.logger.log(format!("Queueing dialog behind the open one: {:?}", dialog_type));
        self.pending.push_back(dialog_type);
    }

    /// Close the visible dialog and bring up the next queued one
    pub fn hide(&mut self) {
        self.dialog_type = None;
        self.scroll_offset = 0;
        if let Some(next) = self.pending.pop_front() {
            self.open(next);
        }
    }

    fn open(&mut self, dialog_type: DialogType) {
        self.dialog_type = Some(dialog_type);
        self.scroll_offset = 0;
        self.scrollbar_state = ScrollbarState::new(0);
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.scrollbar_state = self.scrollbar_state.position(self.scroll_offset);
    }

    /// Scrolling keys shared by the help and logs dialogs
    fn handle_scroll_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::Home => self.scroll_offset = 0,
            KeyCode::End => self.scroll_offset = usize::MAX / 2,
            _ => {}
        }
        Action::None
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match &self.dialog_type {
            None => Action::None,
            // Any key dismisses a message
            Some(DialogType::Info(_)) | Some(DialogType::Error(_)) => Action::HideDialog,
            Some(DialogType::ConfirmDeleteCredential { credential_id }) => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    let credential_id = *credential_id;
                    self.hide();
                    Action::Run(Operation::DeleteCredential(credential_id))
                }
                KeyCode::Esc | KeyCode::Char('n') => Action::HideDialog,
                _ => Action::None,
            },
            Some(DialogType::Help) => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::HideDialog,
                _ => self.handle_scroll_key(key),
            },
            Some(DialogType::Logs) => match key.code {
                KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => Action::HideDialog,
                _ => self.handle_scroll_key(key),
            },
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => {
                self.show(dialog_type);
                Action::None
            }
            Action::HideDialog => {
                self.hide();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(dialog_type) = self.dialog_type.clone() else {
            return;
        };

        match dialog_type {
            DialogType::Error(message) => system_dialogs::render_error_dialog(f, rect, &message),
            DialogType::Info(message) => system_dialogs::render_info_dialog(f, rect, &message),
            DialogType::ConfirmDeleteCredential { credential_id } => {
                system_dialogs::render_confirm_delete_credential_dialog(f, rect, credential_id);
            }
            DialogType::Help => {
                system_dialogs::render_help_dialog(f, rect, self.scroll_offset, &mut self.scrollbar_state);
            }
            DialogType::Logs => {
                system_dialogs::render_logs_dialog(
                    f,
                    rect,
                    &self.logger,
                    self.scroll_offset,
                    &mut self.scrollbar_state,
                );
            }
        }
    }
}
