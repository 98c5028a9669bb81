//! View rendering
//!
//! Renders the two views: the home screen and a lesson screen (lesson or
//! quiz pane). Positions come from the runtime's widget bounds; surface
//! content is drawn from the cached layout shifted by the scroll offset.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect as TuiRect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use lectern_core::constants::labels::HOME_BUTTON;
use lectern_core::constants::ui::HOME_BANNER_HEIGHT;
use lectern_core::{
    home_label, AnswerState, BlockKind, PlacedBlock, QuizStateMachine, Rect, Score, TextStyle,
};

use crate::tui::app::App;
use crate::tui::components::render_surface_scrollbar;
use crate::tui::themes::Theme;
use crate::tui::utils::to_tui_rect;

const HOME_HINT: &str = "1-9 open · wheel/↑↓ scroll · q/Tab quiz · Esc home · Ctrl+Q quit";

/// Write `text` at (x, y), at most `max_width` cells, ignoring points off the buffer
fn put(buf: &mut Buffer, x: u16, y: u16, text: &str, max_width: u16, style: Style) {
    if !buf.area.contains(Position::new(x, y)) {
        return;
    }
    buf.set_stringn(x, y, text, usize::from(max_width), style);
}

fn button_text(label: &str) -> String {
    format!("[ {} ]", label)
}

/// Longest prefix of `text` that fits in `width` cells
fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return &text[..i];
        }
        used += w;
    }
    text
}

/// Row `row` of a framed image placeholder, asset name on the middle row
fn image_row(asset: &str, row: usize, height: usize, width: u16) -> String {
    if width < 2 {
        return String::new();
    }
    let inner = usize::from(width - 2);
    let last = height.saturating_sub(1);
    let (left, fill, right) = match row {
        0 => ('┌', '─', '┐'),
        r if r == last => ('└', '─', '┘'),
        _ => ('│', ' ', '│'),
    };
    let middle = if row == height / 2 && row != 0 && row != last {
        let name = truncate_to_width(asset, inner);
        let pad = inner - name.width();
        format!(
            "{}{}{}",
            " ".repeat(pad / 2),
            name,
            " ".repeat(pad - pad / 2)
        )
    } else {
        fill.to_string().repeat(inner)
    };
    format!("{left}{middle}{right}")
}

/// Draws layout blocks of one surface
struct BlockPainter<'a> {
    theme: &'a Theme,
    quiz: &'a QuizStateMachine,
    score: Option<Score>,
}

impl BlockPainter<'_> {
    fn paint(&self, buf: &mut Buffer, viewport: Rect, offset: usize, block: &PlacedBlock) {
        let rect = &block.rect;
        if rect.x >= viewport.width {
            return;
        }
        let max_width = rect.width.min(viewport.width - rect.x);
        let x = viewport.x + rect.x;

        for row in 0..rect.height {
            let Some(screen_row) = (rect.y + row).checked_sub(offset) else {
                continue;
            };
            if screen_row >= usize::from(viewport.height) {
                break;
            }
            let Some((text, style)) = self.row(&block.kind, row, rect.height, rect.width) else {
                continue;
            };
            put(buf, x, viewport.y + screen_row as u16, &text, max_width, style);
        }
    }

    fn row(&self, kind: &BlockKind, row: usize, height: usize, width: u16) -> Option<(String, Style)> {
        let theme = self.theme;
        match kind {
            BlockKind::Spacer => None,
            BlockKind::Text { lines, style } => {
                lines.get(row).map(|line| (line.clone(), self.text_style(*style)))
            }
            BlockKind::Image { asset } => Some((
                image_row(asset, row, height, width),
                Style::default().fg(theme.image_color),
            )),
            BlockKind::Button { label, .. } => (row == 0).then(|| {
                (
                    button_text(label),
                    Style::default()
                        .fg(theme.accent_color)
                        .add_modifier(Modifier::BOLD),
                )
            }),
            BlockKind::Choice {
                question,
                option,
                lines,
            } => {
                let line = lines.get(row)?;
                let selected = self.quiz.answer(*question) == Some(AnswerState::Answered(*option));
                let marker = match (row, selected) {
                    (0, true) => "(•) ",
                    (0, false) => "( ) ",
                    _ => "    ",
                };
                let style = if selected {
                    Style::default().fg(theme.accent_color)
                } else {
                    Style::default().fg(theme.text_color)
                };
                Some((format!("{marker}{line}"), style))
            }
            BlockKind::ScoreLabel => self.score.filter(|_| row == 0).map(|score| {
                (
                    score.to_string(),
                    Style::default()
                        .fg(theme.score_color)
                        .add_modifier(Modifier::BOLD),
                )
            }),
        }
    }

    fn text_style(&self, style: TextStyle) -> Style {
        let theme = self.theme;
        match style {
            TextStyle::Normal => Style::default().fg(theme.text_color),
            TextStyle::Heading => Style::default()
                .fg(theme.heading_color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            TextStyle::Prompt => Style::default()
                .fg(theme.text_color)
                .add_modifier(Modifier::BOLD),
            TextStyle::Header => Style::default()
                .fg(theme.heading_color)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl App {
    /// Render the home screen: banner, one button per lesson, key hints
    pub fn render_home(&self, f: &mut Frame) {
        let area = f.area();
        let theme = &self.theme;
        let lessons = self.runtime.lessons();

        let banner = TuiRect::new(
            area.x,
            area.y,
            area.width,
            HOME_BANNER_HEIGHT.saturating_sub(1).min(area.height),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.dim_color));
        let text = vec![
            Line::from(Span::styled(
                "Lectern",
                Style::default()
                    .fg(theme.heading_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} lessons. Pick one to start reading.", lessons.len()),
                Style::default().fg(theme.dim_color),
            )),
        ];
        f.render_widget(Paragraph::new(text).block(block), banner);

        let tree = self.runtime.tree();
        let buf = f.buffer_mut();
        let button_style = Style::default()
            .fg(theme.accent_color)
            .add_modifier(Modifier::BOLD);
        for (id, widget) in self.runtime.home_buttons() {
            let (Some(bounds), Some(lesson)) =
                (tree.bounds(*widget), lessons.iter().find(|l| l.id == *id))
            else {
                continue;
            };
            let label = button_text(&home_label(lesson));
            put(buf, bounds.x, bounds.y, &label, bounds.width, button_style);
        }

        if area.height > HOME_BANNER_HEIGHT {
            put(
                buf,
                area.x + 1,
                area.bottom() - 1,
                HOME_HINT,
                area.width.saturating_sub(2),
                Style::default().fg(theme.dim_color),
            );
        }
    }

    /// Render the open lesson screen: header bar, active pane, scrollbar
    pub fn render_lesson_screen(&self, f: &mut Frame) {
        let Some(screen) = self.runtime.current_screen() else {
            return;
        };
        let tree = self.runtime.tree();
        let theme = &self.theme;
        let buf = f.buffer_mut();

        let header_style = Style::default()
            .bg(theme.header_bg_color)
            .fg(theme.header_fg_color);
        if let Some(header) = tree.bounds(screen.header()) {
            buf.set_style(to_tui_rect(header), header_style);
        }
        if let Some(b) = tree.bounds(screen.home_button()) {
            let label = button_text(HOME_BUTTON);
            put(buf, b.x, b.y, &label, b.width, header_style.add_modifier(Modifier::BOLD));
        }
        if let Some(t) = tree.bounds(screen.title_label()) {
            let title = screen.title();
            put(buf, t.x, t.y, &title, t.width, header_style.add_modifier(Modifier::BOLD));
        }

        let surface_id = screen.active_surface();
        let (Some(viewport), Some(surface)) =
            (tree.bounds(surface_id), self.runtime.router().surface(surface_id))
        else {
            return;
        };

        let painter = BlockPainter {
            theme,
            quiz: screen.quiz(),
            score: screen.last_score(),
        };
        let offset = surface.offset();
        for block in &screen.active_layout().blocks {
            painter.paint(buf, viewport, offset, block);
        }

        if let Some(body) = tree.bounds(screen.body()) {
            let bar = TuiRect::new(
                viewport.right(),
                body.y,
                body.right().saturating_sub(viewport.right()),
                body.height,
            );
            render_surface_scrollbar(buf, bar, surface, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use lectern_core::{Config, LessonCatalog, UiRuntimeContext};

    use super::*;
    use crate::tui::themes::lectern;

    fn app() -> App {
        let runtime = UiRuntimeContext::new(
            Box::new(LessonCatalog::embedded().unwrap()),
            Config::default(),
        );
        App::new(runtime, lectern())
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.ui(f)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn screen_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_home_lists_every_lesson() {
        let mut app = app();
        let buf = draw(&mut app, 80, 24);
        assert!(row_text(&buf, 1).contains("Lectern"));
        assert!(row_text(&buf, HOME_BANNER_HEIGHT)
            .contains("[ [1] Lesson 1: Introduction to software testing ]"));
        assert!(screen_text(&buf).contains("[6] Lesson 6: Load and performance basics"));
        assert!(row_text(&buf, 23).contains("Ctrl+Q quit"));
    }

    #[test]
    fn test_lesson_header_and_heading_style() {
        let mut app = app();
        app.runtime.open_lesson(1);
        let buf = draw(&mut app, 80, 24);

        let header = row_text(&buf, 1);
        assert!(header.contains("[ ← Home ]"));
        assert!(header.contains("Lesson 1: Introduction to software testing"));

        // First body line sits one row below the top of the surface
        let first = row_text(&buf, 4);
        assert!(first.contains("What is software testing?"));
        let cell = &buf[(2, 4)];
        assert!(cell.modifier.contains(Modifier::BOLD | Modifier::UNDERLINED));
        assert!(!buf[(2, 5)].modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_image_placeholder_drawn_in_right_column() {
        let mut app = app();
        app.runtime.open_lesson(1);
        let text = screen_text(&draw(&mut app, 80, 24));
        assert!(text.contains("lesson1_1.png"));
        assert!(text.contains('┌'));
    }

    #[test]
    fn test_quiz_selection_and_score() {
        let mut app = app();
        app.runtime.open_lesson(1);
        app.runtime.show_quiz();
        draw(&mut app, 80, 24);

        app.runtime.select_answer(0, 2).unwrap();
        let text = screen_text(&draw(&mut app, 80, 24));
        assert!(text.contains("Lesson 1: Questions"));
        assert!(text.contains("1. "));
        assert!(text.contains("(•) To assess requirement coverage"));
        assert!(text.contains("( ) To reduce the number of developers"));

        app.runtime.check_score().unwrap();
        app.runtime.scroll_focused(1000);
        let text = screen_text(&draw(&mut app, 80, 24));
        assert!(text.contains("Score: 1/5"));
        assert!(text.contains("[ Check ]"));
    }

    #[test]
    fn test_scrollbar_follows_offset() {
        let mut app = app();
        app.runtime.open_lesson(1);
        let buf = draw(&mut app, 80, 24);
        assert_eq!(buf[(79, 3)].symbol(), "█");
        assert_eq!(buf[(79, 23)].symbol(), "░");

        app.runtime.scroll_focused(1000);
        let buf = draw(&mut app, 80, 24);
        assert_eq!(buf[(79, 3)].symbol(), "░");
        assert_eq!(buf[(79, 23)].symbol(), "█");
    }

    #[test]
    fn test_frame_resize_rewraps_surface() {
        let mut app = app();
        app.runtime.open_lesson(2);
        draw(&mut app, 80, 24);
        assert_eq!(app.runtime.current_screen().unwrap().active_layout().width, 79);
        draw(&mut app, 50, 20);
        assert_eq!(app.runtime.current_screen().unwrap().active_layout().width, 49);
    }

    #[test]
    fn test_image_row_frame() {
        assert_eq!(image_row("a.png", 0, 5, 9), "┌───────┐");
        assert_eq!(image_row("a.png", 1, 5, 9), "│       │");
        assert_eq!(image_row("a.png", 2, 5, 9), "│ a.png │");
        assert_eq!(image_row("a.png", 4, 5, 9), "└───────┘");
        // Names longer than the frame are cut
        assert_eq!(image_row("long_name.png", 2, 5, 6), "│long│");
        assert_eq!(image_row("a.png", 0, 5, 1), "");
    }
}
