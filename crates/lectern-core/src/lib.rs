//! Lectern Core - Shared library for the Lectern lesson reader
//!
//! This crate provides everything below the terminal host:
//! - Scroll surfaces and the wheel router that drives them
//! - The widget tree used for hit testing, mounting and focus
//! - Lesson and quiz layout
//! - The quiz state machine and scoring
//! - Lesson/quiz view toggling and the runtime context that owns it all
//! - Lesson catalog loading, configuration and paths

pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod paths;
pub mod quiz;
pub mod router;
pub mod runtime;
pub mod surface;
pub mod view;
pub mod widget;


// Re-exports for convenience
pub use config::{Config, LayoutSettings, ScrollSettings};
pub use content::{ContentError, ContentProvider, Lesson, LessonCatalog, LessonContent, LessonId};
pub use content::{Question, QuizSpec};
pub use error::{CoreError, IndexKind};
pub use geometry::{Position, Rect};
pub use layout::{BlockKind, CachedLayout, ContentLayout, ContentLayoutEngine, ContentRect};
pub use layout::{LayoutSource, PlacedBlock, TextStyle};
pub use quiz::{AnswerState, QuizStateMachine, Score};
pub use router::{ScrollDirection, WheelButton, WheelDelta, WheelEvent, WheelRouter};
pub use runtime::{home_label, LessonScreen, ScreenState, UiRuntimeContext};
pub use surface::{Scrollable, ScrollableSurface};
pub use view::{Pane, ViewMode, ViewToggleController};
pub use widget::{ButtonAction, WidgetId, WidgetKind, WidgetTree};
