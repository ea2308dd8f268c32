//! Entity repository contract.
//!
//! # Responsibility
//! - Define the CRUD + criteria-query API every entity store provides.
//! - Define the single repository error kind and the shared id guard.
//!
//! # Invariants
//! - Non-positive ids are rejected with [`RepoError::InvalidId`] before any
//!   lookup or mutation happens.
//! - "Not found" is `Ok(None)`, never an error.
//! - Criteria queries never fail; a criteria nothing matches yields an empty list.

use crate::model::entity::{Entity, EntityId};
use thiserror::Error;

/// Limit value meaning "return every match".
///
/// Any limit that does not fit in `usize` is treated the same way.
pub const UNBOUNDED_LIMIT: u64 = u64::MAX;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error returned for invalid caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    /// The id argument was zero or negative.
    #[error("Id must be greater than 0. Your id = {0}")]
    InvalidId(EntityId),
}

/// Repository interface for entity CRUD and criteria queries.
///
/// Reads take `&self`; mutations take `&mut self`, so a repository has a
/// single owner that callers inject into their service.
pub trait EntityRepository<E: Entity> {
    /// Returns the number of stored entities.
    fn count_of_entities(&self) -> usize;

    /// Returns every stored entity in insertion order.
    fn get_all_entities(&self) -> Vec<E>;

    /// Returns the entity stored under `id`, if any.
    fn get_entity_by_id(&self, id: EntityId) -> RepoResult<Option<E>>;

    /// Returns the first `limit` entities matching `criteria`, in insertion order.
    fn get_entities_by_criteria(&self, criteria: &str, limit: u64) -> Vec<E>;

    /// Stores `entity` under a freshly assigned id and returns the stored copy.
    fn add_entity(&mut self, entity: E) -> E;

    /// Replaces the entity stored under `id` with `edited`, keeping `id`.
    ///
    /// Returns `Ok(None)` without mutating anything when `id` is absent.
    fn edit_entity(&mut self, id: EntityId, edited: E) -> RepoResult<Option<E>>;

    /// Removes the entity stored under `id` and returns it.
    ///
    /// Deleting an absent id is a no-op that returns `Ok(None)`.
    fn delete_entity_by_id(&mut self, id: EntityId) -> RepoResult<Option<E>>;
}

/// Rejects ids that can never be assigned by a repository.
pub fn validate_id(id: EntityId) -> RepoResult<EntityId> {
    if id <= 0 {
        return Err(RepoError::InvalidId(id));
    }
    Ok(id)
}

/// Converts a caller limit into an iterator bound.
pub(crate) fn effective_limit(limit: u64) -> usize {
    usize::try_from(limit).unwrap_or(usize::MAX)
}
