//! Task entity and the unpersisted task candidate.

use super::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Candidate task submitted for creation or update.
///
/// A draft has no identifier and no timestamps; the store assigns both when
/// the draft is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    title: String,
    description: String,
    long_description: Option<String>,
    completed: bool,
}

impl TaskDraft {
    /// Creates a draft with the required text fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            long_description: None,
            completed: false,
        }
    }

    /// Sets the long description.
    #[must_use]
    pub fn with_long_description(mut self, long_description: impl Into<String>) -> Self {
        self.long_description = Some(long_description.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the short description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the long description, if any.
    #[must_use]
    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    long_description: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted short description.
    pub description: String,
    /// Persisted long description, if any.
    pub long_description: Option<String>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp, if the task was ever mutated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            long_description: data.long_description,
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the short description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the long description, if any.
    #[must_use]
    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns an editable draft holding this task's current values.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            long_description: self.long_description.clone(),
            completed: self.completed,
        }
    }
}

/// Returns the mutation timestamp to persist for a task created at
/// `created_at`.
///
/// A clock that lags behind the stored creation time would otherwise produce
/// an `updated_at` earlier than `created_at`.
#[must_use]
pub fn mutation_stamp(created_at: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(created_at)
}
