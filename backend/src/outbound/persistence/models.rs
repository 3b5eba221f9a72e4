//! Row types mapping between Diesel and the domain.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::products;

/// Read model for one `products` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub detail: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert model for a new product.
#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow<'a> {
    pub name: &'a str,
    pub detail: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset applied by the update operation; `created_at` is deliberately
/// absent so it can never be rewritten.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset<'a> {
    pub name: &'a str,
    pub detail: &'a str,
    pub updated_at: NaiveDateTime,
}
