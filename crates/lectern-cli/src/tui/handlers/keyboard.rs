//! Keyboard event handlers

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use lectern_core::ScreenState;

use crate::tui::app::App;

impl App {
    /// Main keyboard event dispatcher
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        let code = key_event.code;
        let modifiers = key_event.modifiers;
        let is_press =
            key_event.kind == KeyEventKind::Press || key_event.kind == KeyEventKind::Repeat;
        if !is_press {
            return;
        }

        // Ctrl+C / Ctrl+Q quit from anywhere
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        match self.runtime.state() {
            ScreenState::Home => self.handle_home_key(code),
            ScreenState::LessonView(_) | ScreenState::QuizView(_) => self.handle_lesson_key(code),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        if let KeyCode::Char(c) = code {
            if let Some(id) = c.to_digit(10) {
                self.runtime.open_lesson(id);
            }
        }
    }

    fn handle_lesson_key(&mut self, code: KeyCode) {
        let page = isize::try_from(self.runtime.config().scroll.page_units).unwrap_or(isize::MAX);
        match code {
            KeyCode::Char('q') | KeyCode::Tab => {
                self.runtime.toggle_view();
            }
            KeyCode::Esc | KeyCode::Char('h') => self.runtime.go_home(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.runtime.scroll_focused(-1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.runtime.scroll_focused(1);
            }
            KeyCode::PageUp => {
                self.runtime.scroll_focused(-page);
            }
            KeyCode::PageDown => {
                self.runtime.scroll_focused(page);
            }
            KeyCode::Home => {
                self.runtime.scroll_focused_to_top();
            }
            _ => {}
        }
    }
}
