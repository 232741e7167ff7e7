//! Keyboard-toggled tooltips.
//!
//! A [`TooltipProvider`] is the scope: it remembers which trigger is open
//! (at most one) and where every trigger was last drawn. A [`TooltipTrigger`]
//! draws a small marker and registers its rect, a [`TooltipContent`] draws the
//! panel next to the open trigger. Pages render content after everything else
//! so the panel sits on top.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::collections::HashMap;

const MAX_WIDTH: u16 = 48;

#[derive(Debug, Clone, Default)]
pub struct TooltipProvider {
    open: Option<String>,
    anchors: HashMap<String, Rect>,
}

impl TooltipProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Open `id`, closing whatever was open before
    pub fn open(&mut self, id: &str) {
        self.open = Some(id.to_string());
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn toggle(&mut self, id: &str) {
        if self.is_open(id) {
            self.close();
        } else {
            self.open(id);
        }
    }

    pub fn register_anchor(&mut self, id: &str, rect: Rect) {
        self.anchors.insert(id.to_string(), rect);
    }

    pub fn anchor(&self, id: &str) -> Option<Rect> {
        self.anchors.get(id).copied()
    }
}

/// Marker a tooltip is attached to.
#[derive(Debug, Clone, Copy)]
pub struct TooltipTrigger<'a> {
    id: &'a str,
}

const TRIGGER_LABEL: &str = "(?)";

impl<'a> TooltipTrigger<'a> {
    pub fn new(id: &'a str) -> Self {
        Self { id }
    }

    pub fn toggle(&self, provider: &mut TooltipProvider) {
        provider.toggle(self.id);
    }

    pub fn span(&self, provider: &TooltipProvider) -> Span<'a> {
        let style = if provider.is_open(self.id) {
            Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue)
        };
        Span::styled(TRIGGER_LABEL, style)
    }

    /// Draw the marker at the start of `area` and remember where it went
    pub fn render(&self, f: &mut Frame, area: Rect, provider: &mut TooltipProvider) {
        let width = (TRIGGER_LABEL.chars().count() as u16).min(area.width);
        let rect = Rect::new(area.x, area.y, width, area.height.min(1));
        f.render_widget(Paragraph::new(Line::from(self.span(provider))), rect);
        provider.register_anchor(self.id, rect);
    }
}

/// The tooltip panel.
#[derive(Debug, Clone)]
pub struct TooltipContent {
    text: String,
    width: Option<u16>,
    height: Option<u16>,
    color: Option<Color>,
}

impl TooltipContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width: None,
            height: None,
            color: None,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Outer size of the panel, borders included
    pub fn size(&self) -> (u16, u16) {
        let longest = self.text.lines().map(|line| line.chars().count()).max().unwrap_or(0) as u16;
        let width = self.width.unwrap_or_else(|| longest.saturating_add(4).min(MAX_WIDTH)).max(4);
        let inner = usize::from(width.saturating_sub(4)).max(1);

        let height = self.height.unwrap_or_else(|| {
            let lines: usize = self
                .text
                .lines()
                .map(|line| line.chars().count().div_ceil(inner).max(1))
                .sum();
            (lines.max(1) as u16).saturating_add(2)
        });
        (width, height)
    }

    /// Draw the panel if `id` is the open trigger of `provider`
    pub fn render(&self, f: &mut Frame, provider: &TooltipProvider, id: &str) {
        if !provider.is_open(id) {
            return;
        }
        let Some(anchor) = provider.anchor(id) else {
            return;
        };

        let (width, height) = self.size();
        let area = placement(anchor, width, height, f.area());
        let color = self.color.unwrap_or(Color::Blue);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(ratatui::widgets::Padding::horizontal(1))
            .style(Style::default().fg(color));

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(self.text.as_str())
                .block(block)
                .style(Style::default().fg(Color::White))
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

/// Where a `width` x `height` panel goes for a trigger at `anchor`: directly
/// below it, above it when below would leave `bounds`, and shifted left so it
/// never crosses the right edge.
pub fn placement(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let below = anchor.bottom();
    let y = if below.saturating_add(height) <= bounds.bottom() {
        below
    } else if anchor.y >= bounds.y.saturating_add(height) {
        anchor.y - height
    } else {
        bounds.bottom().saturating_sub(height)
    };

    let x = anchor
        .x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);

    Rect::new(x, y, width, height)
}
