// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relationship graph of an access-control system.
//!
//! Users belong to groups and hold roles, groups bundle roles, roles grant permissions and
//! permissions act on resources. The [`EntityStore`] keeps the five collections; everything else
//! is derived from a snapshot of it:
//!
//! - [`effective_permissions`] resolves what a user may do from their directly assigned roles.
//! - [`aggregate`] and [`matrix`] compute statistics, groupings and the role × permission grid.
//! - [`reachable`] and [`Highlighter`] find everything downstream of a hovered node.
//! - [`layout`] and [`diagram`] place nodes on a five-column grid and describe the edges between
//!   them.
//!
//! Memberships are stored as plain identifier lists. Deleting an entity never rewrites the lists
//! which point at it; every query silently skips identifiers which do not resolve.
pub mod aggregate;
pub mod diagram;
pub mod fixtures;
pub mod highlight;
pub mod layout;
pub mod matrix;
pub mod model;
pub mod resolver;
pub mod store;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
mod tier;
pub mod traits;

pub use aggregate::{Coverage, RoleUsage, SummaryStats, TierCounts};
pub use diagram::{Edge, RelationshipGraph};
pub use highlight::{Highlight, Highlighter, reachable};
pub use layout::{CanvasSize, Layout, LayoutConfig, NodePosition};
pub use matrix::PermissionMatrix;
pub use model::{
    Group, GroupPatch, IdSet, ParseStatusError, Permission, PermissionPatch, Resource,
    ResourcePatch, Role, RolePatch, User, UserPatch, UserStatus,
};
pub use resolver::{effective_permissions, effective_permissions_of};
pub use store::{Collection, EntityStore};
pub use tier::{NodeKey, NodeRef, ParseTierError, Tier};
pub use traits::{Entity, Patch};
