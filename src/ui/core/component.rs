use super::actions::Action;
use crate::ui::components::dialogs::common::InstructionShortcut;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub trait Component {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    fn update(&mut self, action: Action) -> Action {
        // Default implementation passes action through
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect);

    /// True while a text field has focus; global single-letter shortcuts are
    /// then left to the component.
    fn captures_text_input(&self) -> bool {
        false
    }

    /// Key hints shown in the status bar
    fn shortcuts(&self) -> Vec<InstructionShortcut> {
        Vec::new()
    }
}
