//! Taskboard: a server-rendered task list backed by `PostgreSQL`.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: task records, drafts and pagination with no infrastructure
//!   dependencies
//! - **Ports**: the [`task::ports::TaskRepository`] contract
//! - **Adapters**: in-memory and Diesel-backed repositories
//! - **Services**: validation and CRUD orchestration in
//!   [`task::services::TaskService`]
//!
//! # Modules
//!
//! - [`task`]: task model, validation, storage and orchestration
//! - [`web`]: axum routes and minijinja views
//! - [`config`]: environment-driven configuration
//! - [`app`]: startup wiring and the HTTP server
//! - [`telemetry`]: tracing subscriber setup

pub mod app;
pub mod config;
pub mod task;
pub mod telemetry;
pub mod web;
