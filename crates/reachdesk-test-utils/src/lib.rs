//! Shared testing utilities: entity fixtures and an in-memory backend.

pub mod fixtures;
pub mod mock;

pub use mock::MockBackend;
