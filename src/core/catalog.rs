//! # Content Catalog
//!
//! The read-only model behind every screen: subjects, their topics, their
//! external resources and their quiz banks.
//!
//! ```text
//! Catalog
//! └── Subject ("Mathematics")
//!     ├── topics:    [Topic { name, description, examples }]
//!     ├── resources: [Resource { display_name, url }]
//!     └── quiz:      [Question { prompt, options, correct_answer }]
//! ```
//!
//! Built once at startup (see [`Catalog::builtin`]) and shared behind an
//! `Arc`. Nothing here mutates after construction.

use std::fmt;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub description: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub display_name: String,
    pub url: String,
}

/// A multiple-choice question. The correct answer is always one of the options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    /// Builds a question, checking that there are at least two options and
    /// that the correct answer appears among them exactly once.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if options.len() < 2 {
            return Err(CatalogError::InvalidQuestion {
                prompt,
                reason: format!("needs at least 2 options, got {}", options.len()),
            });
        }
        let matches = options.iter().filter(|o| **o == correct_answer).count();
        if matches != 1 {
            return Err(CatalogError::InvalidQuestion {
                prompt,
                reason: format!("correct answer appears {matches} times in options"),
            });
        }

        Ok(Self {
            prompt,
            options,
            correct_answer,
        })
    }

    /// Builds a question from compiled-in data. The option invariant is
    /// covered by `test_builtin_questions_satisfy_invariant`.
    pub(super) fn trusted(prompt: &str, options: &[&str], correct_answer: &str) -> Self {
        debug_assert!(options.iter().filter(|o| **o == correct_answer).count() == 1);
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct_answer.to_string(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub topics: Vec<Topic>,
    pub resources: Vec<Resource>,
    pub quiz: Vec<Question>,
}

impl Subject {
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }
}

/// A resource search hit, tagged with the subject it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMatch {
    pub subject: String,
    pub resource: Resource,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No subject with this name exists in the catalog.
    UnknownSubject(String),
    /// A question violates the option invariant.
    InvalidQuestion { prompt: String, reason: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownSubject(name) => write!(f, "unknown subject: {name}"),
            CatalogError::InvalidQuestion { prompt, reason } => {
                write!(f, "invalid question \"{prompt}\": {reason}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        Self::new(super::content::subjects())
    }

    /// Subject names in their defined order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(|s| s.name.as_str())
    }

    /// Subjects that have at least one quiz question.
    pub fn quiz_subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects
            .iter()
            .filter(|s| !s.quiz.is_empty())
            .map(|s| s.name.as_str())
    }

    pub fn subject(&self, name: &str) -> Result<&Subject, CatalogError> {
        self.subjects
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CatalogError::UnknownSubject(name.to_string()))
    }

    pub fn lookup_topics(&self, subject: &str) -> Result<&[Topic], CatalogError> {
        self.subject(subject).map(|s| s.topics.as_slice())
    }

    pub fn lookup_resources(&self, subject: &str) -> Result<&[Resource], CatalogError> {
        self.subject(subject).map(|s| s.resources.as_slice())
    }

    pub fn lookup_quiz(&self, subject: &str) -> Result<&[Question], CatalogError> {
        self.subject(subject).map(|s| s.quiz.as_slice())
    }

    /// Case-insensitive substring search over resource names and subject names.
    ///
    /// A blank query matches nothing.
    pub fn search_resources(&self, query: &str) -> Vec<ResourceMatch> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for subject in &self.subjects {
            let subject_hit = subject.name.to_lowercase().contains(&needle);
            for resource in &subject.resources {
                if subject_hit || resource.display_name.to_lowercase().contains(&needle) {
                    hits.push(ResourceMatch {
                        subject: subject.name.clone(),
                        resource: resource.clone(),
                    });
                }
            }
        }
        hits
    }
}
