//! Terminal setup and the main event loop

use crate::ui::app_component::AppComponent;
use crate::ui::core::{AppContext, Component, EventHandler};
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

/// Run the console until the user quits
pub async fn run_app(ctx: AppContext) -> Result<()> {
    let mouse_enabled = ctx.config.ui.mouse_enabled;

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppComponent::new(ctx);
    let mut event_handler = EventHandler::default();

    app.start();
    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> Result<()> {
    let mut needs_render = true;

    while !app.should_quit() {
        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
        }

        let event = event_handler.next_event().await?;
        needs_render = app.handle_event(event);
    }

    Ok(())
}
