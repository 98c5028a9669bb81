//! Application state and main loop

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use lectern_core::UiRuntimeContext;

use crate::tui::themes::Theme;

/// Idle wakeup interval when no events arrive
const TICK: Duration = Duration::from_millis(250);

pub struct App {
    pub runtime: UiRuntimeContext,
    pub theme: Theme,
    pub should_quit: bool,
    needs_redraw: bool,
}

impl App {
    pub fn new(runtime: UiRuntimeContext, theme: Theme) -> Self {
        Self {
            runtime,
            theme,
            should_quit: false,
            needs_redraw: true,
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        tracing::info!("Lectern exited");
        result
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            // Only render if something changed
            if self.needs_redraw {
                terminal.draw(|f| self.ui(f))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                        None => self.should_quit = true,
                    }
                }
                _ = tokio::time::sleep(TICK) => {}
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                self.handle_key(key);
                self.needs_redraw = true;
            }
            Event::Mouse(mouse) => {
                self.handle_mouse_event(mouse);
                self.needs_redraw = true;
            }
            // The next frame picks up the new area
            Event::Resize(_, _) => {
                self.needs_redraw = true;
            }
            _ => {}
        }
    }
}
