//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Country catalogue.
    ///
    /// `name` and `code` each carry a unique index on their lower-cased
    /// value, so uniqueness ignores case.
    countries (id) {
        /// Primary key assigned from a `BIGSERIAL` sequence.
        id -> Int8,
        /// Display name, 3 to 50 characters.
        name -> Varchar,
        /// Short code, 2 to 3 characters.
        code -> Varchar,
        /// Creation instant, millisecond precision.
        date_created -> Timestamptz,
        /// Last modification instant, millisecond precision.
        date_updated -> Timestamptz,
    }
}
