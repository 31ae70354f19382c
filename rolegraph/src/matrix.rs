// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role × permission grid, with permissions grouped by resource.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::aggregate::{MatrixStats, group_by_resource, matrix_stats};
use crate::model::Permission;
use crate::store::EntityStore;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct RoleColumn {
    pub role_id: String,
    pub name: String,
    pub permission_count: usize,
}

/// A permission and, per role column, whether the role grants it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct MatrixRow {
    pub permission: Permission,
    pub granted: Vec<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct MatrixSection {
    pub resource_id: String,
    pub rows: Vec<MatrixRow>,
}

/// Snapshot of which role grants which permission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PermissionMatrix {
    pub columns: Vec<RoleColumn>,
    pub sections: Vec<MatrixSection>,
    pub stats: MatrixStats,
}

impl PermissionMatrix {
    pub fn build(store: &EntityStore) -> Self {
        let roles = store.roles().as_slice();

        let columns = roles
            .iter()
            .map(|role| RoleColumn {
                role_id: role.id.clone(),
                name: role.name.clone(),
                permission_count: role.permission_ids.len(),
            })
            .collect();

        let sections = group_by_resource(store.permissions().as_slice())
            .into_iter()
            .map(|group| MatrixSection {
                resource_id: group.resource_id,
                rows: group
                    .permissions
                    .into_iter()
                    .map(|permission| MatrixRow {
                        granted: roles
                            .iter()
                            .map(|role| role.permission_ids.contains(&permission.id))
                            .collect(),
                        permission,
                    })
                    .collect(),
            })
            .collect();

        Self {
            columns,
            sections,
            stats: matrix_stats(roles, store.permissions().as_slice()),
        }
    }

    /// Return `true` if the role grants the permission. Unknown roles or permissions grant
    /// nothing.
    pub fn is_granted(&self, role_id: &str, permission_id: &str) -> bool {
        let Some(column) = self
            .columns
            .iter()
            .position(|column| column.role_id == role_id)
        else {
            return false;
        };

        self.rows()
            .find(|row| row.permission.id == permission_id)
            .and_then(|row| row.granted.get(column).copied())
            .unwrap_or(false)
    }

    /// All rows, section by section.
    pub fn rows(&self) -> impl Iterator<Item = &MatrixRow> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }
}
