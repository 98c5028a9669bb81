//! Mouse event handling
//!
//! Wheel events go through the runtime's router, left clicks through its
//! hit test.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use lectern_core::{Position, WheelEvent};

use crate::tui::app::App;

impl App {
    /// Handle mouse events for scrolling and clicking
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollDown => self.handle_scroll(WheelEvent::down(position)),
            MouseEventKind::ScrollUp => self.handle_scroll(WheelEvent::up(position)),
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_click(position),
            _ => {}
        }
    }

    fn handle_scroll(&mut self, event: WheelEvent) {
        if self.runtime.handle_wheel(&event).is_none() {
            tracing::trace!(
                x = event.position.x,
                y = event.position.y,
                "Wheel event outside any surface"
            );
        }
    }

    fn handle_left_click(&mut self, position: Position) {
        if let Some(action) = self.runtime.handle_click(position) {
            tracing::debug!(?action, x = position.x, y = position.y, "Click");
        }
    }
}
