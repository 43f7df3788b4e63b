//! Common types module for the point-of-service core.
//!
//! This module defines the core data types and structures shared by all
//! components of the system. It provides a centralized location for the
//! data model to ensure consistency across crates.

/// Identity and role types for authenticated users.
pub mod auth;
/// Event types published to the view layer.
pub mod events;
/// Order, order item, and status types.
pub mod order;
/// Secure string type for credential secrets.
pub mod passcode;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Storage key tags for persisted data.
pub mod storage;
/// Configuration validation types.
pub mod validation;

// Re-export all types for convenient access
pub use auth::*;
pub use events::*;
pub use order::*;
pub use passcode::Passcode;
pub use registry::ImplementationRegistry;
pub use storage::*;
pub use validation::*;
