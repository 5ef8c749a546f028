//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Queries run through `diesel-async` on a `bb8` pool. Row structs
//! (`models.rs`) and the table definition (`schema.rs`) stay private to this
//! module; callers only see the [`DieselCountryRepository`] port
//! implementation, the pool, and the migration entry point.
//!
//! ```ignore
//! use country_service::outbound::persistence::{
//!     apply_migrations, DbPool, DieselCountryRepository, PoolConfig,
//! };
//!
//! apply_migrations("postgres://localhost/countries").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/countries")).await?;
//! let repo = DieselCountryRepository::new(pool);
//! ```

mod diesel_country_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_country_repository::DieselCountryRepository;
pub use migrations::{MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
