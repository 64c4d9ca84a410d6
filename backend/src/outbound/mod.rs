//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: a mutex-guarded store for tests and database-less runs
//! - **password**: Argon2id password hashing
//! - **contact**: contact form delivery through the structured log
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod contact;
pub mod memory;
pub mod password;
pub mod persistence;
