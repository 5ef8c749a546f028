//! Outbound adapters implementing the country storage port.
//!
//! - **memory**: process-local storage used when no database is configured
//! - **persistence**: PostgreSQL-backed storage using Diesel ORM
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
