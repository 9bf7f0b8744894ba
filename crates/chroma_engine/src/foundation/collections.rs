//! Handle types for the entity arena

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle of a game object in the world arena.
    ///
    /// Colliders store it as their owner back-reference.
    pub struct EntityId;
}

/// Arena of game objects addressed by [`EntityId`]
pub type EntityMap<T> = SlotMap<EntityId, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_handle_is_stale() {
        let mut arena: EntityMap<&str> = EntityMap::with_key();
        let door = arena.insert("door");
        let button = arena.insert("button");
        arena.remove(door);

        assert!(arena.get(door).is_none());
        assert_eq!(arena.get(button), Some(&"button"));
        let reused = arena.insert("platform");
        assert_ne!(reused, door);
    }
}
