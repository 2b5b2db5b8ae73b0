//! Repository Ports
//!
//! Abstract interfaces for persisting optimization results.

mod review_store;

pub use review_store::*;
