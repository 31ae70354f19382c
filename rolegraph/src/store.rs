// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store holding the five entity collections.
//!
//! The store is the single source of truth all queries read from. Mutations never cascade:
//! removing an entity leaves references to it in other collections untouched, those become
//! orphan references which every query silently skips.
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::model::{Group, Permission, Resource, Role, User};
use crate::tier::{NodeKey, Tier};
use crate::traits::{Entity, Patch};

/// Ordered collection of entities of one tier, with identifiers unique within it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Collection<E> {
    entries: Vec<E>,
    counter: u64,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            counter: 0,
        }
    }
}

impl<E> Collection<E>
where
    E: Entity,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities in insertion order.
    pub fn as_slice(&self) -> &[E] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.entries.iter().find(|entity| entity.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entity| entity.id())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entity| entity.id() == id)
    }

    /// Generate an identifier which is not taken yet in this collection.
    fn next_id(&mut self) -> String {
        loop {
            self.counter += 1;
            let id = format!("{}{}", E::TIER.id_prefix(), self.counter);
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Add an entity under a freshly generated identifier and return that identifier.
    ///
    /// Any identifier already set on the given entity is ignored.
    pub fn add(&mut self, entity: E) -> String {
        let id = self.next_id();
        debug!(tier = %E::TIER, %id, "add entity");
        self.entries.push(entity.with_id(id.clone()));
        id
    }

    /// Insert an entity keeping its identifier.
    ///
    /// An existing entity with the same identifier is replaced in place.
    pub fn insert(&mut self, entity: E) {
        debug!(tier = %E::TIER, id = entity.id(), "insert entity");
        match self.position(entity.id()) {
            Some(index) => self.entries[index] = entity,
            None => self.entries.push(entity),
        }
    }

    /// Apply a patch to the entity with the given identifier.
    ///
    /// Unknown identifiers are ignored, returns `true` if an entity was updated.
    pub fn update(&mut self, id: &str, patch: E::Patch) -> bool {
        match self.position(id) {
            Some(index) => {
                debug!(tier = %E::TIER, id, "update entity");
                patch.apply(&mut self.entries[index]);
                true
            }
            None => {
                debug!(tier = %E::TIER, id, "entity to update not found, ignoring");
                false
            }
        }
    }

    /// Remove the entity with the given identifier.
    ///
    /// References to it held by other entities are kept. Unknown identifiers are ignored, returns
    /// `true` if an entity was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                debug!(tier = %E::TIER, id, "remove entity");
                self.entries.remove(index);
                true
            }
            None => {
                debug!(tier = %E::TIER, id, "entity to remove not found, ignoring");
                false
            }
        }
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut E> {
        self.entries.iter_mut().find(|entity| entity.id() == id)
    }
}

impl<E> FromIterator<E> for Collection<E>
where
    E: Entity,
{
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        let mut collection = Collection::new();
        for entity in iter {
            collection.insert(entity);
        }
        collection
    }
}

/// Decoded collections must keep identifiers unique, entries sharing an id are rejected.
#[cfg(feature = "serde")]
impl<'de, E> Deserialize<'de> for Collection<E>
where
    E: Entity + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        struct Encoded<E> {
            entries: Vec<E>,
            #[serde(default)]
            counter: u64,
        }

        let encoded = Encoded::<E>::deserialize(deserializer)?;
        let mut collection = Collection::new();
        for entity in encoded.entries {
            if collection.contains(entity.id()) {
                return Err(D::Error::custom(format!(
                    "duplicate {} id \"{}\"",
                    E::TIER,
                    entity.id()
                )));
            }
            collection.entries.push(entity);
        }
        collection.counter = encoded.counter;
        Ok(collection)
    }
}

/// The five collections of the access-control model.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct EntityStore {
    users: Collection<User>,
    groups: Collection<Group>,
    roles: Collection<Role>,
    permissions: Collection<Permission>,
    resources: Collection<Resource>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn groups(&self) -> &Collection<Group> {
        &self.groups
    }

    pub fn roles(&self) -> &Collection<Role> {
        &self.roles
    }

    pub fn permissions(&self) -> &Collection<Permission> {
        &self.permissions
    }

    pub fn resources(&self) -> &Collection<Resource> {
        &self.resources
    }

    pub fn users_mut(&mut self) -> &mut Collection<User> {
        &mut self.users
    }

    pub fn groups_mut(&mut self) -> &mut Collection<Group> {
        &mut self.groups
    }

    pub fn roles_mut(&mut self) -> &mut Collection<Role> {
        &mut self.roles
    }

    pub fn permissions_mut(&mut self) -> &mut Collection<Permission> {
        &mut self.permissions
    }

    pub fn resources_mut(&mut self) -> &mut Collection<Resource> {
        &mut self.resources
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> EntityStore {
        self.clone()
    }

    /// Number of entities kept in the collection of the given tier.
    pub fn count(&self, tier: Tier) -> usize {
        match tier {
            Tier::User => self.users.len(),
            Tier::Group => self.groups.len(),
            Tier::Role => self.roles.len(),
            Tier::Permission => self.permissions.len(),
            Tier::Resource => self.resources.len(),
        }
    }

    /// Return `true` if the referenced node exists in its tier's collection.
    pub fn contains(&self, node: NodeKey<'_>) -> bool {
        match node.tier {
            Tier::User => self.users.contains(node.id),
            Tier::Group => self.groups.contains(node.id),
            Tier::Role => self.roles.contains(node.id),
            Tier::Permission => self.permissions.contains(node.id),
            Tier::Resource => self.resources.contains(node.id),
        }
    }

    /// Grant the permission to the role if it lacks it, revoke it otherwise.
    ///
    /// Returns the new grant state, or `None` when the role does not exist.
    pub fn toggle_role_permission(&mut self, role_id: &str, permission_id: &str) -> Option<bool> {
        let Some(role) = self.roles.get_mut(role_id) else {
            debug!(role_id, "role to toggle permission on not found, ignoring");
            return None;
        };
        let granted = role.permission_ids.toggle(permission_id);
        debug!(role_id, permission_id, granted, "toggle role permission");
        Some(granted)
    }

    /// Users whose name or email contains the given term, ignoring case.
    pub fn search_users(&self, term: &str) -> Vec<&User> {
        let term = term.to_lowercase();
        self.users
            .iter()
            .filter(|user| {
                user.name.to_lowercase().contains(&term)
                    || user.email.to_lowercase().contains(&term)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::sample_store;
    use crate::model::{Group, IdSet, Role, RolePatch, User, UserPatch, UserStatus};
    use crate::tier::{NodeKey, Tier};
    use crate::traits::Entity;

    use super::{Collection, EntityStore};

    #[test]
    fn add_generates_unique_ids() {
        let mut store = sample_store();

        // "u1" to "u5" are taken by the fixtures.
        let id = store.users_mut().add(User::new("Eve", "eve@example.com").with_id("u1"));
        assert_eq!(id, "u6");
        assert_eq!(store.users().len(), 6);
        assert_eq!(store.users().get("u1").unwrap().name, "Zhang San");
        assert_eq!(store.users().get("u6").unwrap().name, "Eve");

        let next = store.users_mut().add(User::new("Mallory", "mallory@example.com"));
        assert_eq!(next, "u7");
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut roles: Collection<Role> = [
            Role::new("A", "").with_id("r1"),
            Role::new("B", "").with_id("r2"),
        ]
        .into_iter()
        .collect();

        roles.insert(Role::new("A2", "").with_id("r1"));
        let names: Vec<_> = roles.iter().map(|role| role.name.as_str()).collect();
        assert_eq!(names, vec!["A2", "B"]);
    }

    #[test]
    fn update_and_remove_unknown_are_noops() {
        let mut store = sample_store();
        let before = store.snapshot();

        assert!(!store.users_mut().update(
            "u404",
            UserPatch {
                name: Some("Ghost".to_string()),
                ..Default::default()
            }
        ));
        assert!(!store.roles_mut().remove("r404"));
        assert_eq!(store.users().as_slice(), before.users().as_slice());
        assert_eq!(store.roles().as_slice(), before.roles().as_slice());
    }

    #[test]
    fn update_merges_patch() {
        let mut store = sample_store();
        assert!(store.users_mut().update(
            "u3",
            UserPatch {
                status: Some(UserStatus::Inactive),
                ..Default::default()
            }
        ));

        let user = store.users().get("u3").unwrap();
        assert_eq!(user.status, UserStatus::Inactive);
        assert_eq!(user.role_ids, IdSet::from(["r3", "r4"]));

        assert!(store.roles_mut().update(
            "r4",
            RolePatch {
                permission_ids: Some(IdSet::from(["p1"])),
                ..Default::default()
            }
        ));
        assert_eq!(store.roles().get("r4").unwrap().permission_ids.len(), 1);
    }

    #[test]
    fn remove_does_not_cascade() {
        let mut store = sample_store();
        assert!(store.roles_mut().remove("r2"));
        assert!(!store.roles().contains("r2"));

        // Group "g3" still lists the removed role.
        let group = store.groups().get("g3").unwrap();
        assert!(group.role_ids.contains("r2"));
        assert!(!store.contains(NodeKey::new(Tier::Role, "r2")));
    }

    #[test]
    fn toggle_role_permission() {
        let mut store = sample_store();
        assert_eq!(store.toggle_role_permission("r4", "p9"), Some(false));
        assert_eq!(store.toggle_role_permission("r4", "p12"), Some(true));
        assert_eq!(
            store.roles().get("r4").unwrap().permission_ids,
            IdSet::from(["p1", "p5", "p12"])
        );
        assert_eq!(store.toggle_role_permission("r404", "p1"), None);
    }

    #[test]
    fn duplicate_emails_are_accepted() {
        let mut store = EntityStore::new();
        let first = store
            .users_mut()
            .add(User::new("Alice", "shared@example.com"));
        let second = store
            .users_mut()
            .add(User::new("Alice", "shared@example.com"));

        assert_eq!((first.as_str(), second.as_str()), ("u1", "u2"));
        assert_eq!(store.users().len(), 2);

        let found: Vec<&str> = store
            .search_users("shared@example.com")
            .into_iter()
            .map(|user| user.id())
            .collect();
        assert_eq!(found, vec!["u1", "u2"]);
    }

    #[test]
    fn search_users_ignores_case() {
        let mut store = EntityStore::new();
        store
            .users_mut()
            .insert(User::new("Alice Smith", "alice@example.com").with_id("u1"));
        store
            .users_mut()
            .insert(User::new("Bob", "BOB@Example.com").with_id("u2"));
        store
            .groups_mut()
            .insert(Group::new("Ops", "").with_id("g1"));

        let ids = |term: &str| -> Vec<String> {
            store
                .search_users(term)
                .into_iter()
                .map(|user| user.id.clone())
                .collect()
        };

        assert_eq!(ids("SMITH"), vec!["u1"]);
        assert_eq!(ids("bob@"), vec!["u2"]);
        assert_eq!(ids("example"), vec!["u1", "u2"]);
        assert_eq!(ids(""), vec!["u1", "u2"]);
        assert!(ids("carol").is_empty());
    }
}
