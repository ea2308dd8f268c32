//! Repository layer: entity store contract and in-memory implementation.
//!
//! # Responsibility
//! - Define the storage contract consumed by services.
//! - Keep id assignment, id validation and criteria scans inside the store.
//!
//! # Invariants
//! - Non-positive ids fail with `RepoError::InvalidId`; absent ids are `None`.
//! - Query results follow insertion order.

pub mod book_repo;
pub mod entity_repo;
pub mod in_memory;
