//! UI rendering coordinator
//!
//! Main entry point that dispatches to the home and lesson views.

mod views;

use ratatui::{style::Style, widgets::Block, Frame};

use lectern_core::ScreenState;

use crate::tui::app::App;
use crate::tui::utils::to_core_rect;

impl App {
    /// Main UI rendering dispatcher
    pub fn ui(&mut self, f: &mut Frame) {
        let area = f.area();
        // Widget bounds follow the frame; a changed width re-wraps the open surface
        self.runtime.resize(to_core_rect(area));

        let bg = Block::default().style(
            Style::default()
                .bg(self.theme.bg_color)
                .fg(self.theme.text_color),
        );
        f.render_widget(bg, area);

        match self.runtime.state() {
            ScreenState::Home => self.render_home(f),
            ScreenState::LessonView(_) | ScreenState::QuizView(_) => self.render_lesson_screen(f),
        }
    }
}
