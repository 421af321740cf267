//! Request payloads accepted by the task routes.

use crate::task::domain::TaskDraft;
use serde::Deserialize;

/// Query string of the task list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Requested page; anything other than a positive integer means page 1.
    pub page: Option<String>,
}

impl PageQuery {
    /// Returns the requested 1-based page number.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }
}

/// URL-encoded task form.
///
/// Missing fields deserialise as empty strings so validation, not the
/// extractor, reports them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    /// Task title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Long description; empty means absent.
    #[serde(rename = "longDescription")]
    pub long_description: String,
    /// Checkbox value; any submitted value means completed.
    pub completed: Option<String>,
}

impl TaskForm {
    /// Converts the submitted values into a draft.
    #[must_use]
    pub fn into_draft(self) -> TaskDraft {
        let draft = TaskDraft::new(self.title, self.description)
            .with_completed(self.completed.is_some());
        if self.long_description.is_empty() {
            draft
        } else {
            draft.with_long_description(self.long_description)
        }
    }
}
