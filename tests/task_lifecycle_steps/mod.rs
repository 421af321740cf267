//! Step definitions for task lifecycle scenarios.
