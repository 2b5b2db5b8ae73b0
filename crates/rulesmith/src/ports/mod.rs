//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (AI services, rule sources, storage).
//!
//! Implementations of these traits live in `adapters`.

pub mod repositories;
pub mod services;

// Re-exports
pub use repositories::*;
pub use services::*;
