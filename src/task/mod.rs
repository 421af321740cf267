//! Task management for Taskboard.
//!
//! This module validates task input, orchestrates create, update, toggle and
//! delete operations against a repository, and computes page metadata for
//! task listings. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Field validation in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
