// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate statistics derived from the current store contents.
//!
//! Every function here is a pure computation over the slices it is given, nothing is cached.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Permission, Role, User};
use crate::resolver::effective_permissions;
use crate::store::EntityStore;
use crate::tier::Tier;

/// Key used for permissions which carry no resource identifier.
pub const UNASSIGNED_RESOURCE: &str = "Other";

/// Permissions sharing one resource.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ResourceGroup {
    pub resource_id: String,
    pub permissions: Vec<Permission>,
}

/// Group permissions by resource identifier.
///
/// Groups appear in the order their resource was first seen in the input, permissions keep their
/// input order within a group.
pub fn group_by_resource(permissions: &[Permission]) -> Vec<ResourceGroup> {
    let mut groups: Vec<ResourceGroup> = Vec::new();

    for permission in permissions {
        let resource_id = if permission.resource_id.is_empty() {
            UNASSIGNED_RESOURCE
        } else {
            permission.resource_id.as_str()
        };

        match groups
            .iter_mut()
            .find(|group| group.resource_id == resource_id)
        {
            Some(group) => group.permissions.push(permission.clone()),
            None => groups.push(ResourceGroup {
                resource_id: resource_id.to_string(),
                permissions: vec![permission.clone()],
            }),
        }
    }

    groups
}

/// How many users hold a role through direct assignment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct RoleUsage {
    pub role: Role,
    pub user_count: usize,
    pub permission_count: usize,
    /// Share of all users holding the role, from 0 to 100.
    pub percentage: f64,
}

/// Count, for every role, the users listing it in their direct `role_ids`.
pub fn role_usage(roles: &[Role], users: &[User]) -> Vec<RoleUsage> {
    roles
        .iter()
        .map(|role| {
            let user_count = users
                .iter()
                .filter(|user| user.role_ids.contains(&role.id))
                .count();

            RoleUsage {
                role: role.clone(),
                user_count,
                permission_count: role.permission_ids.len(),
                percentage: percentage(user_count, users.len()).unwrap_or(0.0),
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct SummaryStats {
    pub total_users: usize,
    pub active_users: usize,
    pub total_roles: usize,
    pub total_permissions: usize,
    /// Mean length of the roles' permission lists, rounded half up. 0 without roles.
    pub avg_permissions_per_role: usize,
}

pub fn summary_stats(users: &[User], roles: &[Role], permissions: &[Permission]) -> SummaryStats {
    let assigned: usize = roles.iter().map(|role| role.permission_ids.len()).sum();

    SummaryStats {
        total_users: users.len(),
        active_users: users.iter().filter(|user| user.status.is_active()).count(),
        total_roles: roles.len(),
        total_permissions: permissions.len(),
        avg_permissions_per_role: rounded_mean(assigned, roles.len()),
    }
}

/// Integer mean rounded half up, 0 for an empty denominator.
fn rounded_mean(sum: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (2 * sum + count) / (2 * count)
}

fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(part as f64 * 100.0 / total as f64)
}

/// Share of all system permissions a user holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Coverage {
    pub held: usize,
    pub total: usize,
}

impl Coverage {
    /// Ratio between 0 and 1, `None` when the system has no permissions.
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.held as f64 / self.total as f64)
    }

    pub fn percentage(&self) -> Option<f64> {
        percentage(self.held, self.total)
    }

    /// Return `true` if the user holds every permission of the system.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.held == self.total
    }
}

pub fn coverage(store: &EntityStore, user: &User) -> Coverage {
    Coverage {
        held: effective_permissions(store, user).len(),
        total: store.permissions().len(),
    }
}

/// Fraction of all permissions held by the user, `None` when the system has no permissions.
pub fn coverage_ratio(store: &EntityStore, user: &User) -> Option<f64> {
    coverage(store, user).ratio()
}

/// Totals shown under the role/permission matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct MatrixStats {
    pub total_roles: usize,
    pub total_permissions: usize,
    /// Sum of the roles' permission list lengths, orphan identifiers included.
    pub assigned_permissions: usize,
    /// Number of distinct resources the permissions are grouped under.
    pub resource_modules: usize,
}

pub fn matrix_stats(roles: &[Role], permissions: &[Permission]) -> MatrixStats {
    MatrixStats {
        total_roles: roles.len(),
        total_permissions: permissions.len(),
        assigned_permissions: roles.iter().map(|role| role.permission_ids.len()).sum(),
        resource_modules: group_by_resource(permissions).len(),
    }
}

/// Number of entities per tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct TierCounts {
    pub users: usize,
    pub groups: usize,
    pub roles: usize,
    pub permissions: usize,
    pub resources: usize,
}

impl TierCounts {
    pub fn of(store: &EntityStore) -> Self {
        Self {
            users: store.count(Tier::User),
            groups: store.count(Tier::Group),
            roles: store.count(Tier::Role),
            permissions: store.count(Tier::Permission),
            resources: store.count(Tier::Resource),
        }
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::User => self.users,
            Tier::Group => self.groups,
            Tier::Role => self.roles,
            Tier::Permission => self.permissions,
            Tier::Resource => self.resources,
        }
    }

    /// Size of the largest collection.
    pub fn max(&self) -> usize {
        Tier::ALL
            .iter()
            .map(|tier| self.get(*tier))
            .max()
            .unwrap_or(0)
    }
}
