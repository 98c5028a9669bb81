//! Conversions between ratatui and core geometry

use ratatui::layout::Rect as TuiRect;

use lectern_core::Rect;

pub fn to_core_rect(area: TuiRect) -> Rect {
    Rect::new(area.x, area.y, area.width, area.height)
}

pub fn to_tui_rect(rect: Rect) -> TuiRect {
    TuiRect::new(rect.x, rect.y, rect.width, rect.height)
}
