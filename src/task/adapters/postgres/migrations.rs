//! Embedded schema migrations for task persistence.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// SQL creating the task table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-18-000000_create_tasks/up.sql");

/// Applies the task schema to the connected database.
///
/// The migration is idempotent, so it is safe to run on every start.
///
/// # Errors
///
/// Returns the Diesel error raised by the database.
pub fn apply_migrations(connection: &mut PgConnection) -> diesel::QueryResult<()> {
    connection.batch_execute(CREATE_TASKS_SQL)
}
