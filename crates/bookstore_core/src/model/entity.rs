//! Entity contract shared by all repository-managed records.

/// Identifier assigned to an entity by its repository.
///
/// Valid ids are strictly positive. Signed so that caller input can be
/// rejected with the offending value instead of failing to parse.
pub type EntityId = i64;

/// Record that can be stored in an [`EntityRepository`](crate::repo::entity_repo::EntityRepository).
///
/// A repository only needs to read and replace the identifier; every other
/// field is opaque to it and matched through injected predicates.
pub trait Entity: Clone {
    /// Returns the stored id, or `None` for a record not yet added.
    fn id(&self) -> Option<EntityId>;

    /// Returns this record carrying `id`, discarding any previous id.
    fn assign_id(self, id: EntityId) -> Self;
}
