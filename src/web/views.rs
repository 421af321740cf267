//! HTML views rendered with `minijinja`.

use crate::task::{
    domain::{PaginatedResult, Task, TaskDraft, TaskId},
    validation::FieldErrors,
};
use chrono::{DateTime, TimeDelta, Utc};
use minijinja::{Environment, context};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("create.html", include_str!("../../templates/create.html")),
    ("edit.html", include_str!("../../templates/edit.html")),
    ("show.html", include_str!("../../templates/show.html")),
];

/// Flash message shown above a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Banner {
    /// No message.
    #[default]
    None,
    /// Confirmation of a completed operation.
    Success(String),
    /// Description of a failed lookup or operation.
    Error(String),
}

impl Banner {
    /// Creates a success banner.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    /// Creates an error banner.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    fn success_text(&self) -> Option<&str> {
        match self {
            Self::Success(message) => Some(message),
            Self::None | Self::Error(_) => None,
        }
    }

    fn error_text(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::None | Self::Success(_) => None,
        }
    }
}

/// Template environment for task pages.
pub struct TaskViews {
    env: Environment<'static>,
}

impl fmt::Debug for TaskViews {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskViews").finish_non_exhaustive()
    }
}

impl TaskViews {
    /// Loads the embedded templates and registers the date filters.
    ///
    /// `clock` supplies "now" for the `time_ago` filter.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if a template fails to parse.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        env.add_filter("time_ago", move |value: Option<String>| {
            parse_timestamp(value.as_deref())
                .map(|then| time_ago(then, clock.utc()))
                .unwrap_or_default()
        });
        env.add_filter("format_date", |value: Option<String>| {
            parse_timestamp(value.as_deref())
                .map(|then| then.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default()
        });
        env.add_filter("iso_date", |value: Option<String>| {
            parse_timestamp(value.as_deref())
                .map(|then| then.to_rfc3339())
                .unwrap_or_default()
        });

        Ok(Self { env })
    }

    /// Renders the paginated task list.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if rendering fails.
    pub fn index(
        &self,
        page: &PaginatedResult<Task>,
        banner: &Banner,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {
            tasks => page.items(),
            pagination => page.navigation(),
            success => banner.success_text(),
            error => banner.error_text(),
        })
    }

    /// Renders the creation form, optionally pre-filled after a rejected
    /// submission.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if rendering fails.
    pub fn create_form(
        &self,
        values: Option<&TaskDraft>,
        errors: Option<&FieldErrors>,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("create.html")?.render(context! {
            task => values,
            errors => errors,
        })
    }

    /// Renders the edit form for task `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if rendering fails.
    pub fn edit_form(
        &self,
        id: TaskId,
        values: &TaskDraft,
        errors: Option<&FieldErrors>,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("edit.html")?.render(context! {
            id => id,
            task => values,
            errors => errors,
        })
    }

    /// Renders the detail page of a task.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] if rendering fails.
    pub fn show(&self, task: &Task, banner: &Banner) -> Result<String, minijinja::Error> {
        self.env.get_template("show.html")?.render(context! {
            task => task,
            success => banner.success_text(),
            error => banner.error_text(),
        })
    }
}

/// Describes the time elapsed between `then` and `now` in coarse units.
///
/// Timestamps in the future render as `- - -`.
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed < TimeDelta::zero() {
        return "- - -".to_owned();
    }

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if minutes < 1 {
        "just now".to_owned()
    } else if minutes < 60 {
        ago(minutes, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 30 {
        ago(days, "day")
    } else if days < 365 {
        ago(days.div_euclid(30), "month")
    } else {
        ago(days.div_euclid(365), "year")
    }
}

fn ago(count: i64, unit: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{suffix} ago")
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
