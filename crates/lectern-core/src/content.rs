//! Lesson catalog - lesson text, side images and quizzes
//!
//! Lessons are immutable once loaded. The catalog is read from a TOML
//! document; a default catalog is compiled into the crate.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::constants::layout::MAX_IMAGES;

/// Lesson identifier, as shown on the home screen
pub type LessonId = u32;

const EMBEDDED_CATALOG: &str = include_str!("../data/lessons.toml");

/// Catalog loading and validation errors
#[derive(Debug, Error)]
pub enum ContentError {
    /// Malformed TOML or wrong field types
    #[error("failed to parse lesson catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// Catalog file could not be read
    #[error("failed to read lesson catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two lessons share an id
    #[error("duplicate lesson id {0}")]
    DuplicateLesson(LessonId),

    /// A question without options can never be answered
    #[error("lesson {lesson}, question {question}: no options")]
    EmptyOptions { lesson: LessonId, question: usize },

    /// Correct option index points past the option list
    #[error("lesson {lesson}, question {question}: correct option {correct} out of range (options: {options})")]
    CorrectOutOfRange {
        lesson: LessonId,
        question: usize,
        correct: usize,
        options: usize,
    },
}

/// Text and images of one lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonContent {
    pub title: String,
    /// One entry per source line; blank entries become spacers
    pub body: Vec<String>,
    /// Lines (compared trimmed) rendered as headings
    pub headings: BTreeSet<String>,
    /// Side images, at most [`MAX_IMAGES`]
    pub images: Vec<String>,
}

impl LessonContent {
    pub fn is_heading(&self, line: &str) -> bool {
        self.headings.contains(line.trim())
    }
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "correct")]
    pub correct_option: usize,
}

/// Ordered list of questions for one lesson
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSpec {
    pub questions: Vec<Question>,
}

impl QuizSpec {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: LessonId,
    pub content: LessonContent,
    pub quiz: QuizSpec,
}

/// Source of lesson data for the runtime
pub trait ContentProvider {
    fn lesson(&self, id: LessonId) -> Option<Arc<Lesson>>;

    /// All lessons in id order
    fn lessons(&self) -> Vec<Arc<Lesson>>;

    fn lesson_ids(&self) -> Vec<LessonId> {
        self.lessons().iter().map(|l| l.id).collect()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    lessons: Vec<LessonEntry>,
}

#[derive(Debug, Deserialize)]
struct LessonEntry {
    id: LessonId,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    headings: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    quiz: Vec<Question>,
}

impl LessonEntry {
    fn into_lesson(self) -> Result<Lesson, ContentError> {
        for (index, question) in self.quiz.iter().enumerate() {
            if question.options.is_empty() {
                return Err(ContentError::EmptyOptions {
                    lesson: self.id,
                    question: index,
                });
            }
            if question.correct_option >= question.options.len() {
                return Err(ContentError::CorrectOutOfRange {
                    lesson: self.id,
                    question: index,
                    correct: question.correct_option,
                    options: question.options.len(),
                });
            }
        }

        let mut images = self.images;
        if images.len() > MAX_IMAGES {
            warn!(
                lesson_id = self.id,
                ignored = ?&images[MAX_IMAGES..],
                "Lesson has more than {} images, extra ignored",
                MAX_IMAGES
            );
            images.truncate(MAX_IMAGES);
        }

        Ok(Lesson {
            id: self.id,
            content: LessonContent {
                title: self.title,
                body: self.body.lines().map(str::to_string).collect(),
                headings: self.headings.into_iter().map(|h| h.trim().to_string()).collect(),
                images,
            },
            quiz: QuizSpec {
                questions: self.quiz,
            },
        })
    }
}

/// Lessons keyed by id
#[derive(Debug, Clone, Default)]
pub struct LessonCatalog {
    lessons: BTreeMap<LessonId, Arc<Lesson>>,
}

impl LessonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a catalog document
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self::new();
        for entry in file.lessons {
            catalog.insert(entry.into_lesson()?)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from disk
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let source = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&source)?;
        info!(path = %path.display(), lessons = catalog.len(), "Loaded lesson catalog");
        Ok(catalog)
    }

    /// The catalog compiled into the crate
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    pub fn insert(&mut self, lesson: Lesson) -> Result<(), ContentError> {
        if self.lessons.contains_key(&lesson.id) {
            return Err(ContentError::DuplicateLesson(lesson.id));
        }
        self.lessons.insert(lesson.id, Arc::new(lesson));
        Ok(())
    }

    pub fn get(&self, id: LessonId) -> Option<&Arc<Lesson>> {
        self.lessons.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = LessonId> + '_ {
        self.lessons.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

impl ContentProvider for LessonCatalog {
    fn lesson(&self, id: LessonId) -> Option<Arc<Lesson>> {
        self.lessons.get(&id).cloned()
    }

    fn lessons(&self) -> Vec<Arc<Lesson>> {
        self.lessons.values().cloned().collect()
    }

    fn lesson_ids(&self) -> Vec<LessonId> {
        self.ids().collect()
    }
}
