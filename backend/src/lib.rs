//! Backend library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Method-override middleware re-exported for server wiring.
pub use middleware::method_override::MethodOverride;
