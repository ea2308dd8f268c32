//! Generic in-memory entity repository.
//!
//! # Responsibility
//! - Keep entities in process memory, addressable by id and ordered by insertion.
//! - Evaluate criteria queries through an injected matcher factory.
//!
//! # Invariants
//! - Ids are strictly positive and unique at all times.
//! - Iteration order is insertion order; edits keep an entity's position.
//! - Deletion never renumbers remaining entities.

use crate::model::entity::{Entity, EntityId};
use crate::repo::entity_repo::{effective_limit, validate_id, EntityRepository, RepoResult};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Formatter};

/// Predicate over a single entity, built from a criteria string.
pub type Predicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// Factory turning a criteria string into an entity predicate.
pub type MatcherFactory<E> = Box<dyn Fn(&str) -> Predicate<E> + Send + Sync>;

/// In-memory repository generic over the stored entity type.
///
/// Field matching lives entirely in the injected [`MatcherFactory`], so the
/// store itself never looks inside an entity beyond its id.
pub struct InMemoryRepository<E: Entity> {
    /// Insertion slot -> entity. Slots only grow, so map order is insertion order.
    entries: BTreeMap<u64, E>,
    /// Entity id -> insertion slot.
    slots: HashMap<EntityId, u64>,
    next_slot: u64,
    matcher: MatcherFactory<E>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates an empty repository using `matcher` for criteria queries.
    pub fn new<F>(matcher: F) -> Self
    where
        F: Fn(&str) -> Predicate<E> + Send + Sync + 'static,
    {
        Self {
            entries: BTreeMap::new(),
            slots: HashMap::new(),
            next_slot: 0,
            matcher: Box::new(matcher),
        }
    }

    /// Picks the id for the next insert.
    ///
    /// Prefers `count + 1`. After a delete that id can still be taken, in
    /// which case the next id above the current maximum is used instead.
    fn next_id(&self) -> EntityId {
        let preferred = self.entries.len() as EntityId + 1;
        if !self.slots.contains_key(&preferred) {
            return preferred;
        }

        let fallback = self.slots.keys().copied().max().unwrap_or(0) + 1;
        warn!(
            "event=entity_add module=repo status=id_collision preferred_id={} assigned_id={}",
            preferred, fallback
        );
        fallback
    }
}

impl<E: Entity> Debug for InMemoryRepository<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("count", &self.entries.len())
            .field("next_slot", &self.next_slot)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    fn count_of_entities(&self) -> usize {
        self.entries.len()
    }

    fn get_all_entities(&self) -> Vec<E> {
        self.entries.values().cloned().collect()
    }

    fn get_entity_by_id(&self, id: EntityId) -> RepoResult<Option<E>> {
        let id = validate_id(id)?;
        Ok(self
            .slots
            .get(&id)
            .and_then(|slot| self.entries.get(slot))
            .cloned())
    }

    fn get_entities_by_criteria(&self, criteria: &str, limit: u64) -> Vec<E> {
        let predicate = (self.matcher)(criteria);
        let matches: Vec<E> = self
            .entries
            .values()
            .filter(|&entity| predicate(entity))
            .take(effective_limit(limit))
            .cloned()
            .collect();

        debug!(
            "event=entity_query module=repo status=ok limit={} hits={}",
            limit,
            matches.len()
        );
        matches
    }

    fn add_entity(&mut self, entity: E) -> E {
        let id = self.next_id();
        let stored = entity.assign_id(id);
        let slot = self.next_slot;
        self.next_slot += 1;

        self.slots.insert(id, slot);
        self.entries.insert(slot, stored.clone());

        debug!(
            "event=entity_add module=repo status=ok id={} count={}",
            id,
            self.entries.len()
        );
        stored
    }

    fn edit_entity(&mut self, id: EntityId, edited: E) -> RepoResult<Option<E>> {
        let id = validate_id(id)?;
        let Some(slot) = self.slots.get(&id).copied() else {
            debug!("event=entity_edit module=repo status=not_found id={}", id);
            return Ok(None);
        };

        let updated = edited.assign_id(id);
        self.entries.insert(slot, updated.clone());

        debug!("event=entity_edit module=repo status=ok id={}", id);
        Ok(Some(updated))
    }

    fn delete_entity_by_id(&mut self, id: EntityId) -> RepoResult<Option<E>> {
        let id = validate_id(id)?;
        let Some(slot) = self.slots.remove(&id) else {
            debug!("event=entity_delete module=repo status=not_found id={}", id);
            return Ok(None);
        };

        let removed = self.entries.remove(&slot);
        debug!(
            "event=entity_delete module=repo status=ok id={} count={}",
            id,
            self.entries.len()
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRepository, Predicate};
    use crate::model::entity::{Entity, EntityId};
    use crate::repo::entity_repo::{EntityRepository, RepoError, UNBOUNDED_LIMIT};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Tag {
        id: Option<EntityId>,
        name: String,
    }

    impl Tag {
        fn named(name: &str) -> Self {
            Self {
                id: None,
                name: name.to_string(),
            }
        }
    }

    impl Entity for Tag {
        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn assign_id(mut self, id: EntityId) -> Self {
            self.id = Some(id);
            self
        }
    }

    fn name_matcher(criteria: &str) -> Predicate<Tag> {
        let criteria = criteria.to_string();
        Box::new(move |tag: &Tag| tag.name == criteria)
    }

    fn repo_with(names: &[&str]) -> InMemoryRepository<Tag> {
        let mut repo = InMemoryRepository::new(name_matcher);
        for name in names {
            repo.add_entity(Tag::named(name));
        }
        repo
    }

    fn ids(tags: &[Tag]) -> Vec<EntityId> {
        tags.iter().filter_map(Entity::id).collect()
    }

    #[test]
    fn add_assigns_dense_ids_from_one() {
        let repo = repo_with(&["a", "b", "c"]);
        assert_eq!(ids(&repo.get_all_entities()), vec![1, 2, 3]);
    }

    #[test]
    fn add_overrides_caller_supplied_id() {
        let mut repo = repo_with(&[]);
        let mut tag = Tag::named("a");
        tag.id = Some(42);

        let stored = repo.add_entity(tag);
        assert_eq!(stored.id, Some(1));
        assert_eq!(repo.get_entity_by_id(42).unwrap(), None);
    }

    #[test]
    fn add_after_delete_never_duplicates_an_id() {
        let mut repo = repo_with(&["a", "b", "c"]);
        repo.delete_entity_by_id(2).unwrap();

        // count + 1 == 3 is still taken by "c".
        let added = repo.add_entity(Tag::named("d"));
        assert_eq!(added.id, Some(4));
        assert_eq!(repo.count_of_entities(), 3);
        assert_eq!(ids(&repo.get_all_entities()), vec![1, 3, 4]);
    }

    #[test]
    fn add_reuses_count_plus_one_when_it_is_free() {
        let mut repo = repo_with(&["a", "b", "c", "d", "e"]);
        repo.delete_entity_by_id(3).unwrap();
        repo.delete_entity_by_id(4).unwrap();

        let added = repo.add_entity(Tag::named("f"));
        assert_eq!(added.id, Some(4));
        // Appended last even though its id sorts before 5.
        assert_eq!(ids(&repo.get_all_entities()), vec![1, 2, 5, 4]);
    }

    #[test]
    fn edit_keeps_insertion_position() {
        let mut repo = repo_with(&["a", "b", "c"]);
        repo.edit_entity(2, Tag::named("z")).unwrap();

        let names: Vec<String> = repo
            .get_all_entities()
            .into_iter()
            .map(|tag| tag.name)
            .collect();
        assert_eq!(names, vec!["a", "z", "c"]);
    }

    #[test]
    fn criteria_scan_respects_limit_and_order() {
        let repo = repo_with(&["x", "y", "x", "x"]);
        assert_eq!(
            ids(&repo.get_entities_by_criteria("x", UNBOUNDED_LIMIT)),
            vec![1, 3, 4]
        );
        assert_eq!(ids(&repo.get_entities_by_criteria("x", 2)), vec![1, 3]);
        assert!(repo.get_entities_by_criteria("x", 0).is_empty());
        assert!(repo.get_entities_by_criteria("missing", 10).is_empty());
    }

    #[test]
    fn mutations_reject_non_positive_ids() {
        let mut repo = repo_with(&["a"]);
        assert_eq!(
            repo.edit_entity(0, Tag::named("b")),
            Err(RepoError::InvalidId(0))
        );
        assert_eq!(repo.delete_entity_by_id(-3), Err(RepoError::InvalidId(-3)));
        assert_eq!(repo.count_of_entities(), 1);
    }

    #[test]
    fn debug_output_reports_count() {
        let repo = repo_with(&["a", "b"]);
        let rendered = format!("{repo:?}");
        assert!(rendered.contains("count: 2"), "unexpected debug: {rendered}");
    }
}
