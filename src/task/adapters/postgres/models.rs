//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Optional long description.
    pub long_description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
///
/// `created_at` is omitted so the column default applies.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Optional long description.
    pub long_description: Option<String>,
    /// Completion flag.
    pub completed: bool,
}

/// Changeset replacing the editable columns of a task.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Optional long description; `None` clears the column.
    pub long_description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Mutation timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}
