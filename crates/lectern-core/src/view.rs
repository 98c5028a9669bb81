//! Lesson/quiz view switching
//!
//! Each lesson screen has two panes. Exactly one is mounted at a time and
//! only its surface is bound in the wheel router. The hidden pane keeps
//! its scroll offset.

use tracing::debug;

use crate::constants::labels::QUIZ_TITLE_SUFFIX;
use crate::router::WheelRouter;
use crate::widget::{WidgetId, WidgetTree};

/// Which pane of a lesson screen is visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Lesson,
    Quiz,
}

/// A pane's container widget and the surface inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pane {
    pub container: WidgetId,
    pub surface: WidgetId,
}

#[derive(Debug, Clone)]
pub struct ViewToggleController {
    title: String,
    lesson: Pane,
    quiz: Pane,
    mode: ViewMode,
}

impl ViewToggleController {
    pub fn new(title: impl Into<String>, lesson: Pane, quiz: Pane) -> Self {
        Self {
            title: title.into(),
            lesson,
            quiz,
            mode: ViewMode::Lesson,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn lesson_pane(&self) -> Pane {
        self.lesson
    }

    pub fn quiz_pane(&self) -> Pane {
        self.quiz
    }

    pub fn active_pane(&self) -> Pane {
        match self.mode {
            ViewMode::Lesson => self.lesson,
            ViewMode::Quiz => self.quiz,
        }
    }

    fn hidden_pane(&self) -> Pane {
        match self.mode {
            ViewMode::Lesson => self.quiz,
            ViewMode::Quiz => self.lesson,
        }
    }

    pub fn active_surface(&self) -> WidgetId {
        self.active_pane().surface
    }

    /// Title for the header bar: the full lesson title, or
    /// `"<prefix before ':'>: Questions"` while the quiz is shown
    pub fn view_title(&self) -> String {
        match self.mode {
            ViewMode::Lesson => self.title.clone(),
            ViewMode::Quiz => {
                let prefix = self.title.split(':').next().unwrap_or_default();
                format!("{}: {}", prefix, QUIZ_TITLE_SUFFIX)
            }
        }
    }

    /// Mount the active pane, hide the other, bind and focus the active surface.
    /// The screen itself must already be mounted.
    pub fn attach(&self, tree: &mut WidgetTree, router: &mut WheelRouter) {
        let hidden = self.hidden_pane();
        tree.unmount(hidden.container);
        router.unbind(hidden.surface);

        let active = self.active_pane();
        tree.mount(active.container);
        router.bind(active.surface);
        tree.set_focus(active.surface);
    }

    /// Unbind both surfaces, for when the whole screen is hidden
    pub fn detach(&self, router: &mut WheelRouter) {
        router.unbind(self.lesson.surface);
        router.unbind(self.quiz.surface);
    }

    pub fn show_quiz(&mut self, tree: &mut WidgetTree, router: &mut WheelRouter) -> bool {
        self.show(ViewMode::Quiz, tree, router)
    }

    pub fn show_lesson(&mut self, tree: &mut WidgetTree, router: &mut WheelRouter) -> bool {
        self.show(ViewMode::Lesson, tree, router)
    }

    pub fn toggle(&mut self, tree: &mut WidgetTree, router: &mut WheelRouter) {
        let next = match self.mode {
            ViewMode::Lesson => ViewMode::Quiz,
            ViewMode::Quiz => ViewMode::Lesson,
        };
        self.show(next, tree, router);
    }

    /// Switch to `mode`. Returns false when it was already shown, in which
    /// case only focus is re-asserted.
    fn show(&mut self, mode: ViewMode, tree: &mut WidgetTree, router: &mut WheelRouter) -> bool {
        if self.mode == mode {
            tree.set_focus(self.active_surface());
            return false;
        }
        self.mode = mode;
        self.attach(tree, router);
        debug!(?mode, title = %self.view_title(), "View switched");
        true
    }
}
