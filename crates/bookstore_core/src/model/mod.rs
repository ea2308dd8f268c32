//! Domain model for the bookstore test stand.
//!
//! # Responsibility
//! - Define the entity contract the generic repository stores.
//! - Define the `Book` record served by the bookstore API.
//!
//! # Invariants
//! - Stored entities always carry a strictly positive `EntityId`.
//! - Ids are assigned by the repository, never by callers.

pub mod book;
pub mod entity;
