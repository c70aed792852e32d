//! Folio application library
//!
//! Books, items, and hello modules demonstrating prefix, header, and URL API
//! versioning, plus the bootstrap that wires them into a server.

pub mod bootstrap;
pub mod modules;

pub use bootstrap::{build_registry, run};
