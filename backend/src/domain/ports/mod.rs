//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

mod product_repository;

pub use product_repository::{InMemoryProductRepository, ProductRepository, ProductRepositoryError};
