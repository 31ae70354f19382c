// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity records of the five collections and the partial records used to edit them.
//!
//! Entities reference each other only through identifiers kept in [`IdSet`] membership lists.
//! Such a reference may point at an entity which does not exist (anymore), consumers treat those
//! orphan references as absent.
use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tier::Tier;
use crate::traits::{Entity, Patch};

/// Insertion-ordered list of identifiers without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub struct IdSet(Vec<String>);

impl IdSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|item| item == id)
    }

    /// Append an identifier, returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Remove an identifier, returns `false` if it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        let len = self.0.len();
        self.0.retain(|item| item != id);
        self.0.len() != len
    }

    /// Remove the identifier when present, append it otherwise.
    ///
    /// Returns `true` if the identifier is contained after the call.
    pub fn toggle(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.remove(&id) {
            false
        } else {
            self.0.push(id);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for IdSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = IdSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl From<Vec<String>> for IdSet {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for IdSet {
    fn from(ids: [S; N]) -> Self {
        ids.into_iter().collect()
    }
}

impl From<IdSet> for Vec<String> {
    fn from(set: IdSet) -> Self {
        set.0
    }
}

/// Leaf of the chain, something permissions are granted on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-form tag, for example "module".
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
}

impl Resource {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            kind: kind.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// An action which can be performed on a single resource.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub resource_id: String,
    pub action: String,
    pub description: String,
}

impl Permission {
    pub fn new(
        name: impl Into<String>,
        resource_id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            resource_id: resource_id.into(),
            action: action.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A named bundle of permissions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permission_ids: IdSet,
}

impl Role {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            permission_ids: IdSet::new(),
        }
    }

    pub fn with_permissions(mut self, permission_ids: impl Into<IdSet>) -> Self {
        self.permission_ids = permission_ids.into();
        self
    }
}

/// A named set of roles which users can be members of.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    pub role_ids: IdSet,
}

impl Group {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            role_ids: IdSet::new(),
        }
    }

    pub fn with_roles(mut self, role_ids: impl Into<IdSet>) -> Self {
        self.role_ids = role_ids.into();
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "lowercase")
)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        };

        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown user status \"{0}\"")]
pub struct ParseStatusError(pub String);

impl FromStr for UserStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A person with group memberships and directly assigned roles.
///
/// Group memberships and direct role assignments are two independent paths from a user to roles.
/// Permission resolution only follows `role_ids`, the relationship diagram only follows
/// `group_ids`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "camelCase")
)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub group_ids: IdSet,
    pub role_ids: IdSet,
    pub status: UserStatus,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
            group_ids: IdSet::new(),
            role_ids: IdSet::new(),
            status: UserStatus::Active,
        }
    }

    pub fn with_groups(mut self, group_ids: impl Into<IdSet>) -> Self {
        self.group_ids = group_ids.into();
        self
    }

    pub fn with_roles(mut self, role_ids: impl Into<IdSet>) -> Self {
        self.role_ids = role_ids.into();
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ResourcePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PermissionPatch {
    pub name: Option<String>,
    pub resource_id: Option<String>,
    pub action: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct RolePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permission_ids: Option<IdSet>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct GroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub role_ids: Option<IdSet>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub group_ids: Option<IdSet>,
    pub role_ids: Option<IdSet>,
    pub status: Option<UserStatus>,
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

impl Patch<Resource> for ResourcePatch {
    fn apply(self, entity: &mut Resource) {
        set(&mut entity.name, self.name);
        set(&mut entity.description, self.description);
        set(&mut entity.kind, self.kind);
    }
}

impl Patch<Permission> for PermissionPatch {
    fn apply(self, entity: &mut Permission) {
        set(&mut entity.name, self.name);
        set(&mut entity.resource_id, self.resource_id);
        set(&mut entity.action, self.action);
        set(&mut entity.description, self.description);
    }
}

impl Patch<Role> for RolePatch {
    fn apply(self, entity: &mut Role) {
        set(&mut entity.name, self.name);
        set(&mut entity.description, self.description);
        set(&mut entity.permission_ids, self.permission_ids);
    }
}

impl Patch<Group> for GroupPatch {
    fn apply(self, entity: &mut Group) {
        set(&mut entity.name, self.name);
        set(&mut entity.description, self.description);
        set(&mut entity.role_ids, self.role_ids);
    }
}

impl Patch<User> for UserPatch {
    fn apply(self, entity: &mut User) {
        set(&mut entity.name, self.name);
        set(&mut entity.email, self.email);
        set(&mut entity.group_ids, self.group_ids);
        set(&mut entity.role_ids, self.role_ids);
        set(&mut entity.status, self.status);
    }
}

impl Entity for Resource {
    type Patch = ResourcePatch;
    const TIER: Tier = Tier::Resource;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> &str {
        &self.kind
    }
}

impl Entity for Permission {
    type Patch = PermissionPatch;
    const TIER: Tier = Tier::Permission;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> &str {
        &self.action
    }
}

impl Entity for Role {
    type Patch = RolePatch;
    const TIER: Tier = Tier::Role;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> &str {
        &self.description
    }
}

impl Entity for Group {
    type Patch = GroupPatch;
    const TIER: Tier = Tier::Group;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> &str {
        &self.description
    }
}

impl Entity for User {
    type Patch = UserPatch;
    const TIER: Tier = Tier::User;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> &str {
        &self.email
    }
}
