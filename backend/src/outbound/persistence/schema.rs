//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the migrations exactly. They are used by
//! Diesel for compile-time query validation and type-safe SQL generation.
//! When migrations change the schema, update this file to match.

diesel::table! {
    /// Product records table.
    ///
    /// The `id` column is an auto-incrementing primary key; timestamps are
    /// stored as UTC and written by the repository on insert and update.
    products (id) {
        /// Primary key assigned by the storage engine.
        id -> Integer,
        /// Product name (bounded to 255 characters by the validator).
        name -> Text,
        /// Free-form product description.
        detail -> Text,
        /// Record creation timestamp (UTC).
        created_at -> Timestamp,
        /// Last modification timestamp (UTC).
        updated_at -> Timestamp,
    }
}
