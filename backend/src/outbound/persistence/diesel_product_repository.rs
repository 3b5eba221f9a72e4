//! SQLite-backed `ProductRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `ProductRepository` port. Diesel's
//! SQLite driver is synchronous, so every operation moves onto the Tokio
//! blocking pool before touching a connection; the async workers only await
//! the join handle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::debug;

use pagination::{Page, PageRequest};

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductDetail, ProductDraft, ProductId, ProductName};

use super::models::{NewProductRow, ProductChangeset, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel-backed implementation of the `ProductRepository` port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Check out a connection and run `f` on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, ProductRepositoryError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, ProductRepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(map_pool_error)?;
            f(&mut conn)
        })
        .await
        .map_err(|err| ProductRepositoryError::connection(format!("blocking task failed: {err}")))?
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::Migration { message } => ProductRepositoryError::connection(message),
    }
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ProductRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ProductRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ProductRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProductRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => ProductRepositoryError::query("database error"),
        _ => ProductRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain product.
///
/// Stored values are validator-enforced; a row that fails the domain rules
/// anyway (e.g. edited out-of-band) surfaces as a query error rather than
/// panicking.
fn row_to_product(row: ProductRow) -> Result<Product, ProductRepositoryError> {
    let id = ProductId::new(row.id);
    let name = ProductName::new(&row.name)
        .map_err(|err| ProductRepositoryError::query(format!("stored product {id} invalid: {err}")))?;
    let detail = ProductDetail::new(&row.detail)
        .map_err(|err| ProductRepositoryError::query(format!("stored product {id} invalid: {err}")))?;
    Ok(Product::new(
        id,
        name,
        detail,
        as_utc(row.created_at),
        as_utc(row.updated_at),
    ))
}

/// Timestamps are persisted naive; the repository only ever writes UTC.
fn as_utc(naive: chrono::NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list_recent(
        &self,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductRepositoryError> {
        self.with_conn(move |conn| {
            let total: i64 = products::table
                .count()
                .get_result(conn)
                .map_err(map_diesel_error)?;

            let rows: Vec<ProductRow> = products::table
                .order((products::created_at.desc(), products::id.desc()))
                .offset(i64::try_from(request.offset()).unwrap_or(i64::MAX))
                .limit(i64::try_from(request.limit()).unwrap_or(i64::MAX))
                .select(ProductRow::as_select())
                .load(conn)
                .map_err(map_diesel_error)?;

            let items = rows
                .into_iter()
                .map(row_to_product)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Page::new(items, request, u64::try_from(total).unwrap_or_default()))
        })
        .await
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        self.with_conn(move |conn| {
            let row: Option<ProductRow> = products::table
                .find(id.get())
                .select(ProductRow::as_select())
                .first(conn)
                .optional()
                .map_err(map_diesel_error)?;
            row.map(row_to_product).transpose()
        })
        .await
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, ProductRepositoryError> {
        self.with_conn(move |conn| {
            let now = Utc::now().naive_utc();
            let new_row = NewProductRow {
                name: draft.name.as_str(),
                detail: draft.detail.as_str(),
                created_at: now,
                updated_at: now,
            };

            let stored: ProductRow = diesel::insert_into(products::table)
                .values(&new_row)
                .returning(ProductRow::as_returning())
                .get_result(conn)
                .map_err(map_diesel_error)?;
            row_to_product(stored)
        })
        .await
    }

    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, ProductRepositoryError> {
        self.with_conn(move |conn| {
            let changes = ProductChangeset {
                name: draft.name.as_str(),
                detail: draft.detail.as_str(),
                updated_at: Utc::now().naive_utc(),
            };

            let stored: Option<ProductRow> = diesel::update(products::table.find(id.get()))
                .set(&changes)
                .returning(ProductRow::as_returning())
                .get_result(conn)
                .optional()
                .map_err(map_diesel_error)?;

            stored
                .map(row_to_product)
                .transpose()?
                .ok_or_else(|| ProductRepositoryError::not_found(id))
        })
        .await
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductRepositoryError> {
        self.with_conn(move |conn| {
            let affected = diesel::delete(products::table.find(id.get()))
                .execute(conn)
                .map_err(map_diesel_error)?;
            if affected == 0 {
                return Err(ProductRepositoryError::not_found(id));
            }
            Ok(())
        })
        .await
    }
}
