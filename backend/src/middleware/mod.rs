//! Actix middleware shared across the HTTP surface.

pub mod method_override;
