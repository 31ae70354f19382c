// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::model::{Group, IdSet, Permission, Resource, Role, User, UserStatus};
use crate::store::EntityStore;
use crate::tier::Tier;
use crate::traits::Entity;

/// Install a tracing subscriber if `RUST_LOG` is set.
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Upper bounds for the collections of a generated store.
#[derive(Clone, Copy, Debug)]
pub struct StoreShape {
    pub max_per_tier: usize,
    pub max_links: usize,
    /// Probability of a membership entry pointing at an entity which does not exist.
    pub orphan_rate: f64,
}

impl Default for StoreShape {
    fn default() -> Self {
        Self {
            max_per_tier: 12,
            max_links: 5,
            orphan_rate: 0.15,
        }
    }
}

fn pick_ids(rng: &mut ChaCha20Rng, tier: Tier, available: usize, shape: &StoreShape) -> IdSet {
    let links = rng.random_range(0..=shape.max_links);
    (0..links)
        .map(|_| {
            if available == 0 || rng.random_bool(shape.orphan_rate) {
                format!("{}-missing{}", tier.id_prefix(), rng.random_range(0..4))
            } else {
                format!("{}{}", tier.id_prefix(), rng.random_range(1..=available))
            }
        })
        .collect()
}

/// Generate a store from a seed, including orphan references in every membership list.
///
/// The same seed always yields the same store.
pub fn random_store(seed: u64, shape: StoreShape) -> EntityStore {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut store = EntityStore::new();

    let count = |rng: &mut ChaCha20Rng| rng.random_range(0..=shape.max_per_tier);
    let resources = count(&mut rng);
    let permissions = count(&mut rng);
    let roles = count(&mut rng);
    let groups = count(&mut rng);
    let users = count(&mut rng);

    for _ in 0..resources {
        store.resources_mut().add(Resource::new("resource", "module"));
    }

    for index in 0..permissions {
        let resource_id = if resources == 0 || rng.random_bool(shape.orphan_rate) {
            "res-missing".to_string()
        } else {
            format!("res{}", rng.random_range(1..=resources))
        };
        store
            .permissions_mut()
            .add(Permission::new(format!("permission {index}"), resource_id, "read"));
    }

    for index in 0..roles {
        let permission_ids = pick_ids(&mut rng, Tier::Permission, permissions, &shape);
        store
            .roles_mut()
            .add(Role::new(format!("role {index}"), "").with_permissions(permission_ids));
    }

    for index in 0..groups {
        let role_ids = pick_ids(&mut rng, Tier::Role, roles, &shape);
        store
            .groups_mut()
            .add(Group::new(format!("group {index}"), "").with_roles(role_ids));
    }

    for index in 0..users {
        let group_ids = pick_ids(&mut rng, Tier::Group, groups, &shape);
        let role_ids = pick_ids(&mut rng, Tier::Role, roles, &shape);
        let status = if rng.random_bool(0.8) {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        };
        store.users_mut().add(
            User::new(format!("user {index}"), format!("user{index}@example.com"))
                .with_groups(group_ids)
                .with_roles(role_ids)
                .with_status(status),
        );
    }

    store
}

/// Every identifier of the store's collections must resolve to its own entity.
pub fn assert_ids_unique(store: &EntityStore) {
    fn check<E: Entity>(entities: &[E]) {
        for (index, entity) in entities.iter().enumerate() {
            assert!(
                entities[index + 1..].iter().all(|other| other.id() != entity.id()),
                "duplicate {} id {}",
                E::TIER,
                entity.id()
            );
        }
    }

    check(store.users().as_slice());
    check(store.groups().as_slice());
    check(store.roles().as_slice());
    check(store.permissions().as_slice());
    check(store.resources().as_slice());
}

#[cfg(test)]
mod tests {
    use super::{StoreShape, assert_ids_unique, random_store};

    #[test]
    fn deterministic_random_store() {
        let a = random_store(7, StoreShape::default());
        let b = random_store(7, StoreShape::default());
        assert_eq!(a.users().as_slice(), b.users().as_slice());
        assert_eq!(a.roles().as_slice(), b.roles().as_slice());
        assert_ids_unique(&a);
    }
}
