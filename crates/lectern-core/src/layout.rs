//! Content layout for lesson and quiz surfaces
//!
//! Layout works in content coordinates: columns relative to the surface's
//! left edge, rows from the top of the content (before scrolling). The host
//! subtracts the surface offset when placing blocks on screen.
//!
//! Lesson layout is two columns:
//! - left: one block per body line, then the "Questions" button
//! - right: up to two side images, only when the lesson has images
//!
//! The number and order of blocks depends only on the input, never on the
//! width, so a host can keep one widget per block across relayouts.

use textwrap::Options;
use tracing::trace;
use unicode_width::UnicodeWidthStr;

use crate::config::LayoutSettings;
use crate::constants::labels;
use crate::constants::layout::{
    BUTTON_CHROME, BUTTON_GAP, COLUMN_GAP, IMAGE_SPACING, MAX_IMAGES, OPTION_INDENT,
    OPTION_MARKER_WIDTH, PAD_X, PAD_Y, SPACER_HEIGHT,
};
use crate::content::{LessonContent, QuizSpec};
use crate::surface::Scrollable;
use crate::widget::{ButtonAction, WidgetKind};

/// Text emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    /// Lesson section heading (bold + underline)
    Heading,
    /// Numbered quiz prompt (bold)
    Prompt,
    /// Quiz header
    Header,
}

/// What a placed block shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Spacer,
    Text {
        lines: Vec<String>,
        style: TextStyle,
    },
    Image {
        asset: String,
    },
    Button {
        label: String,
        action: ButtonAction,
    },
    /// One radio option of a quiz question
    Choice {
        question: usize,
        option: usize,
        lines: Vec<String>,
    },
    /// Row reserved for the quiz score
    ScoreLabel,
}

impl BlockKind {
    /// Widget role used for this block in the widget tree
    pub fn widget_kind(&self) -> WidgetKind {
        match self {
            BlockKind::Spacer => WidgetKind::Spacer,
            BlockKind::Text { .. } | BlockKind::ScoreLabel => WidgetKind::Label,
            BlockKind::Image { .. } => WidgetKind::Image,
            BlockKind::Button { action, .. } => WidgetKind::Button(*action),
            BlockKind::Choice {
                question, option, ..
            } => WidgetKind::Button(ButtonAction::SelectAnswer {
                question: *question,
                option: *option,
            }),
        }
    }
}

/// Rectangle in content coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentRect {
    pub x: u16,
    pub y: usize,
    pub width: u16,
    pub height: usize,
}

impl ContentRect {
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBlock {
    pub rect: ContentRect,
    pub kind: BlockKind,
}

/// Result of laying out one surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentLayout {
    pub blocks: Vec<PlacedBlock>,
    pub content_height: usize,
    /// Surface width the layout was computed for
    pub width: u16,
}

/// What to lay out
#[derive(Debug, Clone, Copy)]
pub enum LayoutSource<'a> {
    Lesson(&'a LessonContent),
    Quiz(&'a QuizSpec),
}

/// Display width of a button with its chrome
pub fn button_width(label: &str) -> u16 {
    let label = u16::try_from(label.width()).unwrap_or(u16::MAX);
    label.saturating_add(BUTTON_CHROME)
}

fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let options = Options::new(usize::from(width.max(1))).break_words(true);
    let lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Deterministic lesson/quiz layout
#[derive(Debug, Clone, Default)]
pub struct ContentLayoutEngine {
    settings: LayoutSettings,
}

impl ContentLayoutEngine {
    pub fn new(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn layout(&self, source: LayoutSource<'_>, width: u16) -> ContentLayout {
        match source {
            LayoutSource::Lesson(content) => self.layout_lesson(content, width),
            LayoutSource::Quiz(quiz) => self.layout_quiz(quiz, width),
        }
    }

    /// Lay out `source` and push the resulting extent into `surface`
    pub fn layout_into(
        &self,
        source: LayoutSource<'_>,
        width: u16,
        surface: &mut dyn Scrollable,
    ) -> ContentLayout {
        let layout = self.layout(source, width);
        surface.set_content_height(layout.content_height);
        layout
    }

    pub fn layout_lesson(&self, content: &LessonContent, width: u16) -> ContentLayout {
        let inner = width.saturating_sub(PAD_X * 2).max(1);
        let images = &content.images[..content.images.len().min(MAX_IMAGES)];

        let (text_width, image_column) = if images.is_empty() {
            (inner, None)
        } else {
            let right = self
                .settings
                .image_width
                .min(inner.saturating_sub(COLUMN_GAP + 1))
                .max(1);
            let left = inner.saturating_sub(right + COLUMN_GAP).max(1);
            let x = width.saturating_sub(PAD_X + right);
            (left, Some((x, right)))
        };
        let wrap = text_width.min(self.settings.max_wrap_width).max(1);

        let mut blocks = Vec::with_capacity(content.body.len() + images.len() + 1);
        let mut y = PAD_Y;

        for line in &content.body {
            let (kind, height) = if line.trim().is_empty() {
                (BlockKind::Spacer, SPACER_HEIGHT)
            } else {
                let style = if content.is_heading(line) {
                    TextStyle::Heading
                } else {
                    TextStyle::Normal
                };
                let lines = wrap_lines(line, wrap);
                let height = lines.len();
                (BlockKind::Text { lines, style }, height)
            };
            blocks.push(PlacedBlock {
                rect: ContentRect {
                    x: PAD_X,
                    y,
                    width: wrap,
                    height,
                },
                kind,
            });
            y += height;
        }

        // Questions button below the text
        y += 1;
        let label = labels::QUESTIONS_BUTTON;
        blocks.push(PlacedBlock {
            rect: ContentRect {
                x: PAD_X,
                y,
                width: button_width(label).min(text_width),
                height: 1,
            },
            kind: BlockKind::Button {
                label: label.to_string(),
                action: ButtonAction::ShowQuiz,
            },
        });
        y += 1;
        let left_extent = y;

        let mut right_extent = 0;
        if let Some((x, right)) = image_column {
            let mut y = PAD_Y;
            for asset in images {
                y += IMAGE_SPACING;
                blocks.push(PlacedBlock {
                    rect: ContentRect {
                        x,
                        y,
                        width: right,
                        height: self.settings.image_height,
                    },
                    kind: BlockKind::Image {
                        asset: asset.clone(),
                    },
                });
                y += self.settings.image_height + IMAGE_SPACING;
            }
            right_extent = y;
        }

        let content_height = left_extent.max(right_extent) + PAD_Y;
        trace!(width, wrap, content_height, blocks = blocks.len(), "Lesson layout");
        ContentLayout {
            blocks,
            content_height,
            width,
        }
    }

    pub fn layout_quiz(&self, quiz: &QuizSpec, width: u16) -> ContentLayout {
        let inner = width.saturating_sub(PAD_X * 2).max(1);
        let wrap = inner.min(self.settings.max_wrap_width).max(1);
        let option_width = wrap.saturating_sub(OPTION_INDENT).max(1);
        let option_text = option_width.saturating_sub(OPTION_MARKER_WIDTH).max(1);

        let mut blocks = Vec::new();
        let mut y = PAD_Y;

        let header = wrap_lines(labels::QUIZ_HEADER, wrap);
        let height = header.len();
        blocks.push(PlacedBlock {
            rect: ContentRect {
                x: PAD_X,
                y,
                width: wrap,
                height,
            },
            kind: BlockKind::Text {
                lines: header,
                style: TextStyle::Header,
            },
        });
        y += height;

        for (q, question) in quiz.questions.iter().enumerate() {
            y += 1;
            let prompt = wrap_lines(&format!("{}. {}", q + 1, question.prompt), wrap);
            let height = prompt.len();
            blocks.push(PlacedBlock {
                rect: ContentRect {
                    x: PAD_X,
                    y,
                    width: wrap,
                    height,
                },
                kind: BlockKind::Text {
                    lines: prompt,
                    style: TextStyle::Prompt,
                },
            });
            y += height;

            for (i, option) in question.options.iter().enumerate() {
                let lines = wrap_lines(option, option_text);
                let height = lines.len();
                blocks.push(PlacedBlock {
                    rect: ContentRect {
                        x: PAD_X + OPTION_INDENT,
                        y,
                        width: option_width,
                        height,
                    },
                    kind: BlockKind::Choice {
                        question: q,
                        option: i,
                        lines,
                    },
                });
                y += height;
            }
        }

        // Back + Check on one row, score below
        y += 1;
        let mut x = PAD_X;
        for (label, action) in [
            (labels::BACK_TO_LESSON_BUTTON, ButtonAction::ShowLesson),
            (labels::CHECK_BUTTON, ButtonAction::CheckScore),
        ] {
            let w = button_width(label);
            blocks.push(PlacedBlock {
                rect: ContentRect {
                    x,
                    y,
                    width: w,
                    height: 1,
                },
                kind: BlockKind::Button {
                    label: label.to_string(),
                    action,
                },
            });
            x = x.saturating_add(w + BUTTON_GAP);
        }
        y += 1;
        blocks.push(PlacedBlock {
            rect: ContentRect {
                x: PAD_X,
                y,
                width: wrap,
                height: 1,
            },
            kind: BlockKind::ScoreLabel,
        });
        y += 1;

        let content_height = y + PAD_Y;
        trace!(width, wrap, content_height, blocks = blocks.len(), "Quiz layout");
        ContentLayout {
            blocks,
            content_height,
            width,
        }
    }
}

/// Layout of one surface, recomputed only when the width changes
#[derive(Debug, Clone, Default)]
pub struct CachedLayout {
    layout: ContentLayout,
    cached_width: Option<u16>,
}

impl CachedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out for `width` unless already laid out for it.
    /// Returns true when a new layout was computed.
    pub fn ensure(
        &mut self,
        engine: &ContentLayoutEngine,
        source: LayoutSource<'_>,
        width: u16,
        surface: &mut dyn Scrollable,
    ) -> bool {
        if self.cached_width == Some(width) {
            return false;
        }
        self.layout = engine.layout_into(source, width, surface);
        self.cached_width = Some(width);
        true
    }

    pub fn layout(&self) -> &ContentLayout {
        &self.layout
    }

    pub fn cached_width(&self) -> Option<u16> {
        self.cached_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Question;
    use crate::surface::ScrollableSurface;

    fn lesson(images: &[&str]) -> LessonContent {
        LessonContent {
            title: "Lesson 1: Basics".into(),
            body: vec![
                "Heading one:".into(),
                "A short body line.".into(),
                "".into(),
                "  ".into(),
                "Another paragraph that is long enough to wrap when the column gets narrow enough for it."
                    .into(),
            ],
            headings: ["Heading one:".to_string()].into_iter().collect(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn quiz() -> QuizSpec {
        QuizSpec {
            questions: vec![
                Question {
                    prompt: "First?".into(),
                    options: vec!["yes".into(), "no".into()],
                    correct_option: 0,
                },
                Question {
                    prompt: "Second?".into(),
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct_option: 2,
                },
            ],
        }
    }

    fn engine() -> ContentLayoutEngine {
        ContentLayoutEngine::new(LayoutSettings::default())
    }

    #[test]
    fn test_layout_is_idempotent() {
        let content = lesson(&["a.png"]);
        let e = engine();
        assert_eq!(e.layout_lesson(&content, 100), e.layout_lesson(&content, 100));
        assert_eq!(e.layout_quiz(&quiz(), 60), e.layout_quiz(&quiz(), 60));
    }

    #[test]
    fn test_headings_and_spacers() {
        let layout = engine().layout_lesson(&lesson(&[]), 100);
        let kinds: Vec<_> = layout.blocks.iter().map(|b| &b.kind).collect();

        assert!(matches!(
            kinds[0],
            BlockKind::Text {
                style: TextStyle::Heading,
                ..
            }
        ));
        assert!(matches!(
            kinds[1],
            BlockKind::Text {
                style: TextStyle::Normal,
                ..
            }
        ));
        assert_eq!(kinds[2], &BlockKind::Spacer);
        assert_eq!(kinds[3], &BlockKind::Spacer);
        assert_eq!(layout.blocks[2].rect.height, SPACER_HEIGHT);
        assert!(matches!(
            kinds.last(),
            Some(BlockKind::Button {
                action: ButtonAction::ShowQuiz,
                ..
            })
        ));
    }

    #[test]
    fn test_right_column_absent_without_images() {
        let layout = engine().layout_lesson(&lesson(&[]), 100);
        assert!(!layout
            .blocks
            .iter()
            .any(|b| matches!(b.kind, BlockKind::Image { .. })));
        // Text uses the full inner width (up to the wrap limit)
        assert_eq!(layout.blocks[0].rect.width, 90);
    }

    #[test]
    fn test_images_stack_on_the_right() {
        let content = lesson(&["one.png", "two.png", "three.png"]);
        let layout = engine().layout_lesson(&content, 100);
        let images: Vec<_> = layout
            .blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Image { .. }))
            .collect();
        assert_eq!(images.len(), 2);
        let text_right = layout.blocks[0].rect.x + layout.blocks[0].rect.width;
        for image in &images {
            assert!(image.rect.x >= text_right + COLUMN_GAP);
            assert!(image.rect.x + image.rect.width <= 100);
        }
        assert!(images[1].rect.y > images[0].rect.bottom());

        // Right column is taller than the short text here
        let right_extent = images[1].rect.bottom() + IMAGE_SPACING;
        assert_eq!(layout.content_height, right_extent + PAD_Y);
    }

    #[test]
    fn test_content_height_covers_every_block() {
        let layout = engine().layout_lesson(&lesson(&["a.png"]), 60);
        let max_bottom = layout.blocks.iter().map(|b| b.rect.bottom()).max().unwrap();
        assert!(layout.content_height >= max_bottom + PAD_Y);
    }

    #[test]
    fn test_narrow_width_wraps_taller() {
        let e = engine();
        let content = lesson(&[]);
        let wide = e.layout_lesson(&content, 120);
        let narrow = e.layout_lesson(&content, 30);
        assert_eq!(wide.blocks.len(), narrow.blocks.len());
        assert!(narrow.content_height > wide.content_height);
        assert!(narrow.blocks[4].rect.height > 1);
        for block in &narrow.blocks {
            if let BlockKind::Text { lines, .. } = &block.kind {
                assert!(lines.iter().all(|l| l.width() <= usize::from(block.rect.width)));
            }
        }
    }

    #[test]
    fn test_max_wrap_width_limits_text() {
        let e = ContentLayoutEngine::new(LayoutSettings {
            max_wrap_width: 20,
            ..LayoutSettings::default()
        });
        let layout = e.layout_lesson(&lesson(&[]), 200);
        assert_eq!(layout.blocks[4].rect.width, 20);
        assert!(layout.blocks[4].rect.height > 1);
    }

    #[test]
    fn test_quiz_layout_structure() {
        let layout = engine().layout_quiz(&quiz(), 80);
        let blocks = &layout.blocks;

        assert!(matches!(
            &blocks[0].kind,
            BlockKind::Text {
                style: TextStyle::Header,
                lines
            } if lines[0] == "Mini quiz:"
        ));
        assert!(matches!(
            &blocks[1].kind,
            BlockKind::Text {
                style: TextStyle::Prompt,
                lines
            } if lines[0] == "1. First?"
        ));
        let choices = blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Choice { .. }))
            .count();
        assert_eq!(choices, 5);
        // header, prompt, 2 options, prompt, then question 2's options
        assert!(matches!(
            blocks[6].kind,
            BlockKind::Choice {
                question: 1,
                option: 1,
                ..
            }
        ));

        let n = blocks.len();
        assert!(matches!(
            blocks[n - 3].kind,
            BlockKind::Button {
                action: ButtonAction::ShowLesson,
                ..
            }
        ));
        assert!(matches!(
            blocks[n - 2].kind,
            BlockKind::Button {
                action: ButtonAction::CheckScore,
                ..
            }
        ));
        // Back and Check share a row
        assert_eq!(blocks[n - 3].rect.y, blocks[n - 2].rect.y);
        assert!(blocks[n - 2].rect.x > blocks[n - 3].rect.x + blocks[n - 3].rect.width);
        assert_eq!(blocks[n - 1].kind, BlockKind::ScoreLabel);
        assert_eq!(layout.content_height, blocks[n - 1].rect.bottom() + PAD_Y);
    }

    #[test]
    fn test_layout_into_sets_content_height() {
        let mut surface = ScrollableSurface::new(1);
        surface.set_viewport_height(5);
        let layout = engine().layout_into(LayoutSource::Quiz(&quiz()), 80, &mut surface);
        assert_eq!(surface.content_height(), layout.content_height);
    }

    #[test]
    fn test_cached_layout_skips_same_width() {
        let e = engine();
        let content = lesson(&["a.png"]);
        let mut cache = CachedLayout::new();
        let mut surface = ScrollableSurface::new(1);

        assert!(cache.ensure(&e, LayoutSource::Lesson(&content), 80, &mut surface));
        assert!(!cache.ensure(&e, LayoutSource::Lesson(&content), 80, &mut surface));
        assert!(cache.ensure(&e, LayoutSource::Lesson(&content), 50, &mut surface));
        assert_eq!(cache.cached_width(), Some(50));
        assert_eq!(surface.content_height(), cache.layout().content_height);
    }

    #[test]
    fn test_block_widget_kinds() {
        assert_eq!(BlockKind::Spacer.widget_kind(), WidgetKind::Spacer);
        assert_eq!(BlockKind::ScoreLabel.widget_kind(), WidgetKind::Label);
        let choice = BlockKind::Choice {
            question: 2,
            option: 1,
            lines: vec![],
        };
        assert_eq!(
            choice.widget_kind(),
            WidgetKind::Button(ButtonAction::SelectAnswer {
                question: 2,
                option: 1
            })
        );
    }

    #[test]
    fn test_button_width_includes_chrome() {
        assert_eq!(button_width("Check"), 5 + BUTTON_CHROME);
    }
}
