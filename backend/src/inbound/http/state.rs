//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ProductRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Product persistence port.
    pub products: Arc<dyn ProductRepository>,
}

impl HttpState {
    /// Construct state around a repository implementation.
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}
