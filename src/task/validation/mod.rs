//! Task validation.
//!
//! Validation checks every field of a [`TaskDraft`] and collects one message
//! per failing field rather than stopping at the first failure. Within a
//! field only the first failing rule reports.
//!
//! A successful validation yields a [`ValidTask`], the only form of a draft
//! that repository write operations accept.

pub mod rules;

use crate::task::domain::TaskDraft;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Draft fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskField {
    /// The task title.
    Title,
    /// The short description.
    Description,
    /// The optional long description.
    LongDescription,
}

impl TaskField {
    /// Returns the field name used in forms and error maps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::LongDescription => "longDescription",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Field-level validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<TaskField, String>);

impl FieldErrors {
    /// Returns the message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: TaskField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns whether `field` failed validation.
    #[must_use]
    pub fn contains(&self, field: TaskField) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns whether no field failed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over failing fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn record(&mut self, field: TaskField, message: Option<String>) {
        if let Some(text) = message {
            self.0.insert(field, text);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTask(TaskDraft);

impl ValidTask {
    /// Returns the validated draft.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.0
    }

    /// Consumes the wrapper and returns the validated draft.
    #[must_use]
    pub fn into_draft(self) -> TaskDraft {
        self.0
    }
}

/// Validates a draft.
///
/// # Errors
///
/// Returns [`FieldErrors`] holding one message per failing field.
///
/// # Examples
///
/// ```
/// use taskboard::task::domain::TaskDraft;
/// use taskboard::task::validation::{TaskField, validate_task};
///
/// let valid = validate_task(TaskDraft::new("Water plants", "Both balconies, twice"));
/// assert!(valid.is_ok());
///
/// let errors = validate_task(TaskDraft::new("  ", "short")).expect_err("invalid draft");
/// assert_eq!(errors.get(TaskField::Title), Some("Title cannot be empty"));
/// assert!(errors.contains(TaskField::Description));
/// ```
pub fn validate_task(draft: TaskDraft) -> Result<ValidTask, FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.record(TaskField::Title, rules::check_title(draft.title()));
    errors.record(
        TaskField::Description,
        rules::check_description(draft.description()),
    );
    errors.record(
        TaskField::LongDescription,
        rules::check_long_description(draft.long_description()),
    );

    if errors.is_empty() {
        Ok(ValidTask(draft))
    } else {
        Err(errors)
    }
}
