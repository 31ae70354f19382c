// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolve the permissions a user holds through their directly assigned roles.
//!
//! Resolution is role-centric: only `User::role_ids` is consulted. Roles a user would reach
//! through group membership are not part of their effective permissions.
use std::collections::HashSet;

use crate::model::{Permission, Role, User};
use crate::store::EntityStore;

/// Roles directly assigned to the user, in assignment order.
///
/// Identifiers of roles which do not exist are skipped.
pub fn direct_roles<'a>(store: &'a EntityStore, user: &User) -> Vec<&'a Role> {
    user.role_ids
        .iter()
        .filter_map(|role_id| store.roles().get(role_id))
        .collect()
}

/// Deduplicated union of the permissions granted by the user's directly assigned roles.
///
/// Permissions are returned in the order of the permission collection. Identifiers which do not
/// resolve to a permission are dropped.
pub fn effective_permissions(store: &EntityStore, user: &User) -> Vec<Permission> {
    let permission_ids: HashSet<&str> = direct_roles(store, user)
        .into_iter()
        .flat_map(|role| role.permission_ids.iter())
        .collect();

    store
        .permissions()
        .iter()
        .filter(|permission| permission_ids.contains(permission.id.as_str()))
        .cloned()
        .collect()
}

/// Effective permissions of the user with the given identifier, empty for unknown users.
pub fn effective_permissions_of(store: &EntityStore, user_id: &str) -> Vec<Permission> {
    match store.users().get(user_id) {
        Some(user) => effective_permissions(store, user),
        None => Vec::new(),
    }
}
