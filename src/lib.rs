//! Lead Intake Pipeline Library
//!
//! This library provides the core lead intake pipeline: field validation,
//! consent gating, idempotent upsert-with-merge into a SQLite-backed store,
//! campaign tagging, and an append-only audit trail of interactions.
//!
//! It is a single-tenant, single-process component intended to be driven by
//! outer automation (forms, campaigns, chat flows); channel adapters and
//! process wiring live outside this crate.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection, pool management, and schema bootstrap.
//! - `errors`: Error handling types.
//! - `models`: Core data models.
//! - `store`: Lead persistence and interaction logging.
//! - `validator`: Input validation rules.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod store;
pub mod validator;
