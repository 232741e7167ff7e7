//! Bordered container used to group related content on a page.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Padding, Widget},
    Frame,
};

/// A card: rounded border, one column of horizontal padding, optional title.
///
/// `style` is patched onto the default card style, so callers only name what
/// they want to change (for example an error card sets a red foreground).
#[derive(Debug, Clone, Default)]
pub struct CardSection {
    title: Option<String>,
    style: Option<Style>,
}

impl CardSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn default_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// The default style with the caller's overrides applied
    pub fn effective_style(&self) -> Style {
        match self.style {
            Some(extra) => Self::default_style().patch(extra),
            None => Self::default_style(),
        }
    }

    pub fn block(&self) -> Block<'static> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .style(self.effective_style());

        match &self.title {
            Some(title) => block.title(format!(" {} ", title)),
            None => block,
        }
    }

    /// Draw the card and return the area left for its content
    pub fn render(&self, f: &mut Frame, area: Rect) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        f.render_widget(block, area);
        inner
    }

    /// Draw the card with `child` inside it
    pub fn render_with<W: Widget>(&self, f: &mut Frame, area: Rect, child: W) {
        let inner = self.render(f, area);
        f.render_widget(child, inner);
    }
}
