//! Scroll surfaces - vertical viewports onto taller content
//!
//! A surface owns:
//! - Content height (total rows of laid-out content)
//! - Viewport height (rows visible at once)
//! - The current offset, always clamped to `0..=max_offset`
//!
//! [`Scrollable`] is the capability the wheel router and the layout engine
//! talk to; [`ScrollableSurface`] is the standard implementation.

/// Capability of a widget that can be scrolled vertically
pub trait Scrollable {
    /// Move by `delta_units` scroll units (negative = towards the top).
    /// Saturates at both ends.
    fn scroll_by(&mut self, delta_units: isize);

    /// Update the content extent and re-clamp the offset
    fn set_content_height(&mut self, height: usize);

    /// Update the visible extent and re-clamp the offset
    fn set_viewport_height(&mut self, height: usize);

    /// Jump back to the first row
    fn scroll_to_top(&mut self);

    fn offset(&self) -> usize;

    fn viewport_height(&self) -> usize;

    fn content_height(&self) -> usize;

    /// Largest valid offset
    fn max_offset(&self) -> usize {
        self.content_height().saturating_sub(self.viewport_height())
    }

    /// Check if can scroll up (not at top)
    fn can_scroll_up(&self) -> bool {
        self.offset() > 0
    }

    /// Check if can scroll down (not at bottom)
    fn can_scroll_down(&self) -> bool {
        self.offset() < self.max_offset()
    }

    /// Check if scrollbar is needed (content exceeds viewport)
    fn needs_scrollbar(&self) -> bool {
        self.max_offset() > 0
    }
}

/// Standard scroll surface with a fixed number of rows per scroll unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollableSurface {
    /// Current scroll offset in rows (0 = top)
    offset: usize,
    /// Rows of laid-out content
    content_height: usize,
    /// Rows visible at once
    viewport_height: usize,
    /// Rows moved per scroll unit
    unit_rows: usize,
}

impl ScrollableSurface {
    /// Create an empty surface; `unit_rows` is raised to at least 1
    pub fn new(unit_rows: usize) -> Self {
        Self {
            offset: 0,
            content_height: 0,
            viewport_height: 0,
            unit_rows: unit_rows.max(1),
        }
    }

    pub fn unit_rows(&self) -> usize {
        self.unit_rows
    }

    fn clamp_offset(&mut self) {
        let max = self.max_offset();
        if self.offset > max {
            self.offset = max;
        }
    }
}

impl Default for ScrollableSurface {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Scrollable for ScrollableSurface {
    fn scroll_by(&mut self, delta_units: isize) {
        let rows = delta_units.unsigned_abs().saturating_mul(self.unit_rows);
        self.offset = if delta_units < 0 {
            self.offset.saturating_sub(rows)
        } else {
            self.offset.saturating_add(rows).min(self.max_offset())
        };
    }

    fn set_content_height(&mut self, height: usize) {
        self.content_height = height;
        self.clamp_offset();
    }

    fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.clamp_offset();
    }

    fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    fn content_height(&self) -> usize {
        self.content_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(content: usize, viewport: usize, unit_rows: usize) -> ScrollableSurface {
        let mut surface = ScrollableSurface::new(unit_rows);
        surface.set_viewport_height(viewport);
        surface.set_content_height(content);
        surface
    }

    fn assert_clamped(surface: &ScrollableSurface) {
        let max = surface
            .content_height()
            .saturating_sub(surface.viewport_height());
        assert!(surface.offset() <= max, "offset {} > max {}", surface.offset(), max);
    }

    #[test]
    fn test_scroll_by_moves_whole_units() {
        let mut s = surface(100, 10, 3);
        s.scroll_by(1);
        assert_eq!(s.offset(), 3);
        s.scroll_by(2);
        assert_eq!(s.offset(), 9);
        s.scroll_by(-1);
        assert_eq!(s.offset(), 6);
    }

    #[test]
    fn test_scroll_saturates_at_extremes() {
        let mut s = surface(30, 10, 1);
        s.scroll_by(-5);
        assert_eq!(s.offset(), 0);
        assert!(!s.can_scroll_up());

        s.scroll_by(1000);
        assert_eq!(s.offset(), 20);
        assert!(!s.can_scroll_down());

        // Already at the bottom: no-op
        s.scroll_by(1);
        assert_eq!(s.offset(), 20);

        s.scroll_by(isize::MIN);
        assert_eq!(s.offset(), 0);
        s.scroll_by(isize::MAX);
        assert_eq!(s.offset(), 20);
    }

    #[test]
    fn test_content_shrink_reclamps_offset() {
        let mut s = surface(50, 10, 1);
        s.scroll_by(40);
        assert_eq!(s.offset(), 40);

        s.set_content_height(25);
        assert_eq!(s.offset(), 15);

        s.set_content_height(5);
        assert_eq!(s.offset(), 0);
        assert!(!s.needs_scrollbar());
    }

    #[test]
    fn test_viewport_growth_reclamps_offset() {
        let mut s = surface(50, 10, 1);
        s.scroll_by(40);
        s.set_viewport_height(45);
        assert_eq!(s.offset(), 5);
        s.set_viewport_height(80);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn test_offset_always_in_range() {
        let mut s = ScrollableSurface::new(2);
        let ops: [(usize, usize, isize); 8] = [
            (0, 0, 3),
            (40, 10, 7),
            (40, 10, 100),
            (12, 10, 1),
            (12, 30, -2),
            (90, 3, 44),
            (90, 3, -1),
            (1, 1, 5),
        ];
        for (content, viewport, delta) in ops {
            s.set_content_height(content);
            assert_clamped(&s);
            s.scroll_by(delta);
            assert_clamped(&s);
            s.set_viewport_height(viewport);
            assert_clamped(&s);
        }
    }

    #[test]
    fn test_unit_rows_never_zero() {
        let mut s = surface(20, 5, 0);
        assert_eq!(s.unit_rows(), 1);
        s.scroll_by(1);
        assert_eq!(s.offset(), 1);
    }
}
