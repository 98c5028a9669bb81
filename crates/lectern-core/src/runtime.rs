//! Runtime context
//!
//! `UiRuntimeContext` is the application root below the terminal host. It
//! owns the widget tree, the wheel router, the layout engine and the arena
//! of lesson screens, and it exposes the operations the host calls in
//! response to input: open a lesson, go home, toggle views, answer and
//! score, route wheel and click events, resize.
//!
//! Lesson screens are built on first visit and kept for the life of the
//! context, so a re-opened lesson comes back with its scroll offsets,
//! answers and view mode intact.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::constants::labels::HOME_BUTTON;
use crate::constants::layout::BUTTON_CHROME;
use crate::constants::ui::{
    HEADER_HEIGHT, HOME_BANNER_HEIGHT, HOME_BUTTON_PITCH, HOME_MARGIN_X, SCROLLBAR_WIDTH,
};
use crate::content::{ContentProvider, Lesson, LessonId};
use crate::error::CoreError;
use crate::geometry::{Position, Rect};
use crate::layout::{
    button_width, CachedLayout, ContentLayout, ContentLayoutEngine, ContentRect, LayoutSource,
};
use crate::quiz::{QuizStateMachine, Score};
use crate::router::{WheelEvent, WheelRouter};
use crate::surface::{Scrollable, ScrollableSurface};
use crate::view::{Pane, ViewMode, ViewToggleController};
use crate::widget::{ButtonAction, WidgetId, WidgetKind, WidgetTree};

/// Which screen is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Home,
    LessonView(LessonId),
    QuizView(LessonId),
}

impl ScreenState {
    pub fn lesson_id(self) -> Option<LessonId> {
        match self {
            ScreenState::Home => None,
            ScreenState::LessonView(id) | ScreenState::QuizView(id) => Some(id),
        }
    }
}

/// Label of a home screen lesson button
pub fn home_label(lesson: &Lesson) -> String {
    format!("[{}] {}", lesson.id, lesson.content.title)
}

/// Widgets and cached layout of one pane
#[derive(Debug)]
struct PaneLayout {
    /// One widget per layout block, in block order
    widgets: Vec<WidgetId>,
    cache: CachedLayout,
}

impl PaneLayout {
    fn build(
        tree: &mut WidgetTree,
        engine: &ContentLayoutEngine,
        source: LayoutSource<'_>,
        width: u16,
        surface_id: WidgetId,
        surface: &mut dyn Scrollable,
    ) -> Self {
        let mut cache = CachedLayout::new();
        cache.ensure(engine, source, width, surface);
        let widgets = cache
            .layout()
            .blocks
            .iter()
            .map(|block| tree.insert(surface_id, block.kind.widget_kind()))
            .collect();
        Self { widgets, cache }
    }
}

/// A built lesson screen: header, lesson pane and quiz pane
#[derive(Debug)]
pub struct LessonScreen {
    lesson: Arc<Lesson>,
    root: WidgetId,
    header: WidgetId,
    home_button: WidgetId,
    title_label: WidgetId,
    body: WidgetId,
    view: ViewToggleController,
    quiz: QuizStateMachine,
    last_score: Option<Score>,
    lesson_pane: PaneLayout,
    quiz_pane: PaneLayout,
}

impl LessonScreen {
    pub fn id(&self) -> LessonId {
        self.lesson.id
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn header(&self) -> WidgetId {
        self.header
    }

    pub fn home_button(&self) -> WidgetId {
        self.home_button
    }

    pub fn title_label(&self) -> WidgetId {
        self.title_label
    }

    pub fn body(&self) -> WidgetId {
        self.body
    }

    pub fn view(&self) -> &ViewToggleController {
        &self.view
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    /// Header title for the current view
    pub fn title(&self) -> String {
        self.view.view_title()
    }

    pub fn quiz(&self) -> &QuizStateMachine {
        &self.quiz
    }

    /// Score from the last "Check", if any
    pub fn last_score(&self) -> Option<Score> {
        self.last_score
    }

    pub fn active_surface(&self) -> WidgetId {
        self.view.active_surface()
    }

    pub fn layout(&self, mode: ViewMode) -> &ContentLayout {
        self.pane(mode).cache.layout()
    }

    /// Widgets of `mode`'s pane, parallel to its layout blocks
    pub fn block_widgets(&self, mode: ViewMode) -> &[WidgetId] {
        &self.pane(mode).widgets
    }

    pub fn active_layout(&self) -> &ContentLayout {
        self.layout(self.mode())
    }

    fn pane(&self, mode: ViewMode) -> &PaneLayout {
        match mode {
            ViewMode::Lesson => &self.lesson_pane,
            ViewMode::Quiz => &self.quiz_pane,
        }
    }

    fn state(&self) -> ScreenState {
        match self.mode() {
            ViewMode::Lesson => ScreenState::LessonView(self.id()),
            ViewMode::Quiz => ScreenState::QuizView(self.id()),
        }
    }
}

/// Screen rectangle of a block, clipped to its surface viewport
fn block_bounds(surface: Rect, offset: usize, rect: &ContentRect) -> Option<Rect> {
    let viewport = usize::from(surface.height);
    let top = rect.y.saturating_sub(offset);
    let bottom = rect.bottom().saturating_sub(offset).min(viewport);
    if rect.bottom() <= offset || top >= bottom || rect.x >= surface.width {
        return None;
    }
    let y = surface.y.saturating_add(u16::try_from(top).ok()?);
    let height = u16::try_from(bottom - top).ok()?;
    let width = rect.width.min(surface.width - rect.x);
    Some(Rect::new(surface.x.saturating_add(rect.x), y, width, height))
}

/// Application root for the lesson reader
pub struct UiRuntimeContext {
    provider: Box<dyn ContentProvider>,
    config: Config,
    tree: WidgetTree,
    router: WheelRouter,
    engine: ContentLayoutEngine,
    screens: BTreeMap<LessonId, LessonScreen>,
    state: ScreenState,
    home: WidgetId,
    home_buttons: Vec<(LessonId, WidgetId)>,
    area: Rect,
}

impl UiRuntimeContext {
    pub fn new(provider: Box<dyn ContentProvider>, config: Config) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let home = tree.insert(root, WidgetKind::Home);
        let home_buttons = provider
            .lesson_ids()
            .into_iter()
            .map(|id| (id, tree.insert(home, WidgetKind::Button(ButtonAction::OpenLesson(id)))))
            .collect();

        Self {
            router: WheelRouter::new(config.scroll.wheel_step),
            engine: ContentLayoutEngine::new(config.layout.clone()),
            provider,
            config,
            tree,
            screens: BTreeMap::new(),
            state: ScreenState::Home,
            home,
            home_buttons,
            area: Rect::default(),
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn router(&self) -> &WheelRouter {
        &self.router
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn home(&self) -> WidgetId {
        self.home
    }

    pub fn home_buttons(&self) -> &[(LessonId, WidgetId)] {
        &self.home_buttons
    }

    pub fn lesson_ids(&self) -> Vec<LessonId> {
        self.provider.lesson_ids()
    }

    pub fn lessons(&self) -> Vec<Arc<Lesson>> {
        self.provider.lessons()
    }

    pub fn screen(&self, id: LessonId) -> Option<&LessonScreen> {
        self.screens.get(&id)
    }

    pub fn current_screen(&self) -> Option<&LessonScreen> {
        self.state.lesson_id().and_then(|id| self.screens.get(&id))
    }

    pub fn is_built(&self, id: LessonId) -> bool {
        self.screens.contains_key(&id)
    }

    pub fn built_count(&self) -> usize {
        self.screens.len()
    }

    /// Scroll offset of a surface
    pub fn surface_offset(&self, surface: WidgetId) -> Option<usize> {
        self.router.surface(surface).map(|s| s.offset())
    }

    /// Show lesson `id`, building its screen on first visit.
    /// Returns false (and stays where it is) for an unknown id.
    pub fn open_lesson(&mut self, id: LessonId) -> bool {
        let Some(lesson) = self.provider.lesson(id) else {
            debug!(lesson_id = id, "Unknown lesson id, ignored");
            return false;
        };

        self.hide_current();
        if !self.screens.contains_key(&id) {
            self.build_screen(lesson);
            self.router.install();
        }

        self.tree.unmount(self.home);
        let Some(screen) = self.screens.get(&id) else {
            return false;
        };
        self.tree.mount(screen.root);
        screen.view.attach(&mut self.tree, &mut self.router);
        self.state = screen.state();
        self.arrange();
        info!(lesson_id = id, state = ?self.state, "Lesson opened");
        true
    }

    /// Hide any lesson screen and show the home screen
    pub fn go_home(&mut self) {
        self.hide_current();
        self.tree.mount(self.home);
        self.tree.clear_focus();
        self.state = ScreenState::Home;
        self.arrange();
        debug!("Home screen shown");
    }

    /// Switch the open lesson to its quiz view
    pub fn show_quiz(&mut self) -> bool {
        self.switch_view(ViewMode::Quiz)
    }

    /// Switch the open lesson back to its lesson view
    pub fn show_lesson(&mut self) -> bool {
        self.switch_view(ViewMode::Lesson)
    }

    pub fn toggle_view(&mut self) -> bool {
        let next = match self.current_screen().map(LessonScreen::mode) {
            Some(ViewMode::Lesson) => ViewMode::Quiz,
            Some(ViewMode::Quiz) => ViewMode::Lesson,
            None => return false,
        };
        self.switch_view(next)
    }

    fn switch_view(&mut self, mode: ViewMode) -> bool {
        let Some(id) = self.state.lesson_id() else {
            return false;
        };
        let Some(screen) = self.screens.get_mut(&id) else {
            return false;
        };
        let changed = match mode {
            ViewMode::Quiz => screen.view.show_quiz(&mut self.tree, &mut self.router),
            ViewMode::Lesson => screen.view.show_lesson(&mut self.tree, &mut self.router),
        };
        self.state = screen.state();
        if changed {
            self.arrange();
        }
        changed
    }

    /// Record an answer in the open lesson's quiz
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<(), CoreError> {
        let screen = self.current_screen_mut()?;
        let lesson_id = screen.id();
        screen.quiz.select_answer(question, option).map_err(|e| {
            error!(lesson_id, question, option, error = %e, "Answer rejected");
            e
        })
    }

    /// Score the open lesson's quiz without recording it
    pub fn compute_score(&self) -> Result<Score, CoreError> {
        self.current_screen()
            .map(|s| s.quiz.compute_score())
            .ok_or(CoreError::NoOpenLesson)
    }

    /// Score the open lesson's quiz and keep it for the score label
    pub fn check_score(&mut self) -> Result<Score, CoreError> {
        let screen = self.current_screen_mut()?;
        let score = screen.quiz.compute_score();
        screen.last_score = Some(score);
        info!(lesson_id = screen.id(), correct = score.correct, total = score.total, "Quiz checked");
        Ok(score)
    }

    /// Route a wheel event. Returns the surface that scrolled.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> Option<WidgetId> {
        let target = self.router.dispatch(&self.tree, event)?;
        self.arrange();
        Some(target)
    }

    /// Activate whatever is under `position`. Clicking inside a surface
    /// also focuses it. Returns the activated button action.
    pub fn handle_click(&mut self, position: Position) -> Option<ButtonAction> {
        let hit = self.tree.widget_at(position)?;
        let surface = self
            .tree
            .ancestors(hit)
            .find(|id| self.router.is_bound(*id));
        if let Some(surface) = surface {
            self.tree.set_focus(surface);
        }

        let WidgetKind::Button(action) = self.tree.kind(hit)? else {
            return None;
        };
        self.activate(action);
        Some(action)
    }

    /// Perform a button action
    pub fn activate(&mut self, action: ButtonAction) {
        debug!(?action, "Button activated");
        match action {
            ButtonAction::OpenLesson(id) => {
                self.open_lesson(id);
            }
            ButtonAction::Home => self.go_home(),
            ButtonAction::ShowQuiz => {
                self.show_quiz();
            }
            ButtonAction::ShowLesson => {
                self.show_lesson();
            }
            ButtonAction::CheckScore => {
                let _ = self.check_score();
            }
            ButtonAction::SelectAnswer { question, option } => {
                // Rejections are logged by select_answer
                let _ = self.select_answer(question, option);
            }
        }
    }

    /// Scroll the focused surface by `delta_units`. Returns true if it moved.
    pub fn scroll_focused(&mut self, delta_units: isize) -> bool {
        let moved = match self.focused_surface_mut() {
            Some(surface) => {
                let before = surface.offset();
                surface.scroll_by(delta_units);
                surface.offset() != before
            }
            None => false,
        };
        if moved {
            self.arrange();
        }
        moved
    }

    pub fn scroll_focused_to_top(&mut self) -> bool {
        let moved = match self.focused_surface_mut() {
            Some(surface) => {
                let before = surface.offset();
                surface.scroll_to_top();
                before != 0
            }
            None => false,
        };
        if moved {
            self.arrange();
        }
        moved
    }

    /// Nearest bound surface at or above the focused widget
    pub fn focused_surface(&self) -> Option<WidgetId> {
        let focused = self.tree.focused()?;
        self.tree
            .ancestors(focused)
            .find(|id| self.router.is_bound(*id))
    }

    /// New terminal area: recompute bounds, re-wrap if widths changed
    pub fn resize(&mut self, area: Rect) {
        if self.area == area {
            return;
        }
        debug!(width = area.width, height = area.height, "Resize");
        self.area = area;
        self.arrange();
    }

    fn focused_surface_mut(&mut self) -> Option<&mut (dyn Scrollable + 'static)> {
        let id = self.focused_surface()?;
        self.router.surface_mut(id)
    }

    fn current_screen_mut(&mut self) -> Result<&mut LessonScreen, CoreError> {
        self.state
            .lesson_id()
            .and_then(|id| self.screens.get_mut(&id))
            .ok_or(CoreError::NoOpenLesson)
    }

    fn hide_current(&mut self) {
        let Some(screen) = self.state.lesson_id().and_then(|id| self.screens.get(&id)) else {
            return;
        };
        screen.view.detach(&mut self.router);
        self.tree.unmount(screen.root);
    }

    /// Width available to a surface in the current area
    fn surface_width(&self) -> u16 {
        self.area.width.saturating_sub(SCROLLBAR_WIDTH)
    }

    fn build_screen(&mut self, lesson: Arc<Lesson>) {
        let id = lesson.id;
        let width = self.surface_width();
        let unit_rows = self.config.scroll.unit_rows;

        let tree = &mut self.tree;
        let root = tree.root();
        let screen_root = tree.insert(root, WidgetKind::Screen(id));
        let header = tree.insert(screen_root, WidgetKind::Container);
        let home_button = tree.insert(header, WidgetKind::Button(ButtonAction::Home));
        let title_label = tree.insert(header, WidgetKind::Label);
        let body = tree.insert(screen_root, WidgetKind::Container);

        let pane = |tree: &mut WidgetTree| {
            let container = tree.insert(body, WidgetKind::Container);
            let surface = tree.insert(container, WidgetKind::Surface);
            Pane { container, surface }
        };
        let lesson_ids = pane(&mut *tree);
        let quiz_ids = pane(&mut *tree);

        let mut lesson_surface = ScrollableSurface::new(unit_rows);
        let mut quiz_surface = ScrollableSurface::new(unit_rows);
        let lesson_pane = PaneLayout::build(
            tree,
            &self.engine,
            LayoutSource::Lesson(&lesson.content),
            width,
            lesson_ids.surface,
            &mut lesson_surface,
        );
        let quiz_pane = PaneLayout::build(
            tree,
            &self.engine,
            LayoutSource::Quiz(&lesson.quiz),
            width,
            quiz_ids.surface,
            &mut quiz_surface,
        );
        self.router.register(lesson_ids.surface, Box::new(lesson_surface));
        self.router.register(quiz_ids.surface, Box::new(quiz_surface));

        let screen = LessonScreen {
            view: ViewToggleController::new(lesson.content.title.clone(), lesson_ids, quiz_ids),
            quiz: QuizStateMachine::new(&lesson.quiz),
            lesson,
            root: screen_root,
            header,
            home_button,
            title_label,
            body,
            last_score: None,
            lesson_pane,
            quiz_pane,
        };
        self.screens.insert(id, screen);
        debug!(lesson_id = id, built = self.screens.len(), "Lesson screen built");
    }

    /// Recompute widget bounds for the visible screen
    fn arrange(&mut self) {
        let area = self.area;
        self.tree.set_bounds(self.tree.root(), Some(area));
        match self.state.lesson_id() {
            None => self.arrange_home(area),
            Some(id) => self.arrange_screen(id, area),
        }
    }

    fn arrange_home(&mut self, area: Rect) {
        self.tree.set_bounds(self.home, Some(area));
        let lessons = self.provider.lessons();
        for (i, (id, widget)) in self.home_buttons.iter().enumerate() {
            let label_width = lessons
                .iter()
                .find(|l| l.id == *id)
                .map(|l| home_label(l).width())
                .unwrap_or_default();
            let row = u16::try_from(i)
                .unwrap_or(u16::MAX)
                .saturating_mul(HOME_BUTTON_PITCH)
                .saturating_add(HOME_BANNER_HEIGHT);
            let rect = Rect::new(
                area.x.saturating_add(HOME_MARGIN_X),
                area.y.saturating_add(row),
                u16::try_from(label_width)
                    .unwrap_or(u16::MAX)
                    .saturating_add(BUTTON_CHROME),
                1,
            );
            self.tree.set_bounds(*widget, area.intersection(rect));
        }
    }

    fn arrange_screen(&mut self, id: LessonId, area: Rect) {
        let Some(screen) = self.screens.get_mut(&id) else {
            return;
        };
        let tree = &mut self.tree;
        tree.set_bounds(screen.root, Some(area));

        let header_height = HEADER_HEIGHT.min(area.height);
        let header = Rect::new(area.x, area.y, area.width, header_height);
        tree.set_bounds(screen.header, Some(header));
        let button = Rect::new(
            header.x.saturating_add(1),
            header.y.saturating_add(header_height / 2),
            button_width(HOME_BUTTON),
            1,
        );
        let button = header.intersection(button);
        tree.set_bounds(screen.home_button, button);
        let title_x = button.map_or(header.x, |b| b.right().saturating_add(2));
        let title = Rect::new(
            title_x,
            header.y.saturating_add(header_height / 2),
            header.right().saturating_sub(title_x),
            1,
        );
        tree.set_bounds(screen.title_label, header.intersection(title));

        let body = Rect::new(
            area.x,
            area.y.saturating_add(header_height),
            area.width,
            area.height.saturating_sub(header_height),
        );
        tree.set_bounds(screen.body, Some(body));
        let surface_rect = Rect::new(
            body.x,
            body.y,
            body.width.saturating_sub(SCROLLBAR_WIDTH),
            body.height,
        );

        let mode = screen.view.mode();
        let pane_ids = screen.view.active_pane();
        tree.set_bounds(pane_ids.container, Some(body));
        tree.set_bounds(pane_ids.surface, Some(surface_rect));

        let LessonScreen {
            lesson,
            lesson_pane,
            quiz_pane,
            ..
        } = screen;
        let (pane, source) = match mode {
            ViewMode::Lesson => (lesson_pane, LayoutSource::Lesson(&lesson.content)),
            ViewMode::Quiz => (quiz_pane, LayoutSource::Quiz(&lesson.quiz)),
        };
        let Some(surface) = self.router.surface_mut(pane_ids.surface) else {
            return;
        };
        surface.set_viewport_height(usize::from(surface_rect.height));
        pane.cache
            .ensure(&self.engine, source, surface_rect.width, surface);
        let offset = surface.offset();

        for (block, widget) in pane.cache.layout().blocks.iter().zip(&pane.widgets) {
            tree.set_bounds(*widget, block_bounds(surface_rect, offset, &block.rect));
        }
    }
}
