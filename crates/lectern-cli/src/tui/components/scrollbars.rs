//! Scrollbar rendering
//!
//! 1-column track with a solid thumb. Visual: ░ (track) and █ (thumb)

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use lectern_core::Scrollable;

use crate::tui::themes::Theme;

/// Thumb position and length in rows for a track of `height` rows
pub fn thumb_span(height: usize, offset: usize, total: usize, visible: usize) -> Option<(usize, usize)> {
    if total <= visible || height == 0 {
        return None;
    }
    let size = (visible * height / total).clamp(1, height);
    let max_offset = total - visible;
    let travel = height - size;
    let pos = (offset.min(max_offset) * travel + max_offset / 2) / max_offset;
    Some((pos, size))
}

/// Draw a scrollbar into `area` (only its first column is used)
pub fn render_scrollbar(
    buf: &mut Buffer,
    area: Rect,
    offset: usize,
    total: usize,
    visible: usize,
    thumb_color: Color,
    track_color: Color,
) {
    // Clear first so a bar that is no longer needed leaves no glyphs behind
    for y in area.top()..area.bottom() {
        if let Some(cell) = buf.cell_mut((area.x, y)) {
            cell.set_char(' ');
        }
    }

    let Some((pos, size)) = thumb_span(usize::from(area.height), offset, total, visible) else {
        return;
    };

    for (row, y) in (area.top()..area.bottom()).enumerate() {
        let (ch, color) = if row >= pos && row < pos + size {
            ('█', thumb_color)
        } else {
            ('░', track_color)
        };
        if let Some(cell) = buf.cell_mut((area.x, y)) {
            cell.set_char(ch).set_fg(color);
        }
    }
}

/// Scrollbar for a lesson or quiz surface
pub fn render_surface_scrollbar(buf: &mut Buffer, area: Rect, surface: &dyn Scrollable, theme: &Theme) {
    render_scrollbar(
        buf,
        area,
        surface.offset(),
        surface.content_height(),
        surface.viewport_height(),
        theme.accent_color,
        theme.scrollbar_bg_color,
    );
}
