use super::entity::{Entity, EntityRef};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Immutable view of the starred set at one moment.
///
/// The membership predicate ([`is_starred`](Self::is_starred)) reads the same
/// set that [`starred_entities`](Self::starred_entities) exposes, so the two can
/// never disagree. Cloning is cheap; the set is shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarredEntitiesSnapshot {
    starred_entities: Arc<BTreeSet<String>>,
}

impl StarredEntitiesSnapshot {
    pub fn new(starred_entities: BTreeSet<String>) -> Self {
        Self {
            starred_entities: Arc::new(starred_entities),
        }
    }

    /// The canonical references of every starred entity.
    pub fn starred_entities(&self) -> &BTreeSet<String> {
        &self.starred_entities
    }

    /// Returns true if the entity is starred. An entity without a valid
    /// reference is never starred.
    pub fn is_starred(&self, entity: &Entity) -> bool {
        entity
            .entity_ref()
            .map(|entity_ref| self.contains(&entity_ref))
            .unwrap_or(false)
    }

    pub fn contains(&self, entity_ref: &EntityRef) -> bool {
        self.starred_entities.contains(entity_ref.as_str())
    }

    pub fn len(&self) -> usize {
        self.starred_entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starred_entities.is_empty()
    }
}

impl From<BTreeSet<String>> for StarredEntitiesSnapshot {
    fn from(starred_entities: BTreeSet<String>) -> Self {
        Self::new(starred_entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_agrees_with_set() {
        let set: BTreeSet<String> = ["component:default/a", "api:tools/b"]
            .into_iter()
            .map(String::from)
            .collect();
        let snapshot = StarredEntitiesSnapshot::new(set);

        let candidates = [
            Entity::new("Component", "A"),
            Entity::new("API", "b").with_namespace("tools"),
            Entity::new("API", "b"),
            Entity::new("System", "c"),
        ];
        for entity in &candidates {
            let entity_ref = entity.entity_ref().unwrap();
            assert_eq!(
                snapshot.is_starred(entity),
                snapshot.starred_entities().contains(entity_ref.as_str()),
                "predicate disagrees with set for {entity_ref}"
            );
        }
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_invalid_entity_is_not_starred() {
        let snapshot = StarredEntitiesSnapshot::default();
        assert!(snapshot.is_empty());
        assert!(!snapshot.is_starred(&Entity::new("", "")));
    }
}
