//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories implement the domain's store ports on top of `diesel-async`
//! connections pooled by `bb8`. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use blog::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/blog")).await?;
//! let posts = DieselPostRepository::new(pool);
//! ```

mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
