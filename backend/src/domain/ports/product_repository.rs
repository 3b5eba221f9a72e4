//! Persistence port for product records.
//!
//! HTTP handlers depend on this trait rather than on the database adapter.
//! Production backs it with the Diesel repository; tests and storage-less
//! runs use the in-memory implementation below.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageRequest};
use thiserror::Error;

use crate::domain::{Product, ProductDraft, ProductId};

/// Errors surfaced by the persistence adapter when handling products.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductRepositoryError {
    /// No record exists for the addressed identifier.
    #[error("product {id} does not exist")]
    NotFound { id: ProductId },
    /// Database connectivity failures.
    #[error("product store connection failed: {message}")]
    Connection { message: String },
    /// Catch-all for query failures that bubble up from the adapter.
    #[error("product store query failed: {message}")]
    Query { message: String },
}

impl ProductRepositoryError {
    /// Helper for misses on id-addressed operations.
    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound { id }
    }

    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Domain port owning all product persistence.
///
/// Every operation maps to a single statement against the store; mutations
/// touch exactly one record.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Return one page of products ordered newest-first.
    async fn list_recent(
        &self,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductRepositoryError>;

    /// Fetch the product with the given id, if it exists.
    async fn find(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Insert a new product and return it with its assigned identity and
    /// timestamps.
    async fn create(&self, draft: ProductDraft) -> Result<Product, ProductRepositoryError>;

    /// Overwrite name and detail on an existing product, refreshing its
    /// `updated_at` marker.
    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, ProductRepositoryError>;

    /// Remove the product with the given id.
    async fn delete(&self, id: ProductId) -> Result<(), ProductRepositoryError>;
}

#[derive(Debug, Default)]
struct StoreState {
    next_id: i32,
    rows: Vec<Product>,
}

/// Mutex-guarded in-memory `ProductRepository` implementation.
///
/// Identifiers are assigned from a monotonically increasing counter, matching
/// the auto-increment behaviour of the SQL adapter.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    state: Mutex<StoreState>,
}

impl InMemoryProductRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_recent(
        &self,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductRepositoryError> {
        let state = self.lock();
        let mut rows: Vec<Product> = state.rows.clone();
        rows.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });

        let total = rows.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = rows.into_iter().skip(offset).take(limit).collect();
        Ok(Page::new(items, request, total))
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let state = self.lock();
        Ok(state.rows.iter().find(|p| p.id() == id).cloned())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, ProductRepositoryError> {
        let mut state = self.lock();
        state.next_id += 1;
        let now = Utc::now();
        let product = Product::new(
            ProductId::new(state.next_id),
            draft.name,
            draft.detail,
            now,
            now,
        );
        state.rows.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, ProductRepositoryError> {
        let mut state = self.lock();
        let row = state
            .rows
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| ProductRepositoryError::not_found(id))?;
        let updated = Product::new(id, draft.name, draft.detail, row.created_at(), Utc::now());
        *row = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductRepositoryError> {
        let mut state = self.lock();
        let position = state
            .rows
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| ProductRepositoryError::not_found(id))?;
        state.rows.remove(position);
        Ok(())
    }
}
