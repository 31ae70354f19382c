// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tiers of the relationship chain and typed references to the nodes living in them.
use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five ordered entity kinds forming the chain
/// `User → Group → Role → Permission → Resource`.
///
/// Variants are declared in chain order, so comparing two tiers compares their position in the
/// chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Tier {
    User,
    Group,
    Role,
    Permission,
    Resource,
}

impl Tier {
    /// All tiers, left to right.
    pub const ALL: [Tier; 5] = [
        Tier::User,
        Tier::Group,
        Tier::Role,
        Tier::Permission,
        Tier::Resource,
    ];

    /// Position of this tier in the chain, starting at 0 for users.
    pub fn ordinal(&self) -> usize {
        match self {
            Tier::User => 0,
            Tier::Group => 1,
            Tier::Role => 2,
            Tier::Permission => 3,
            Tier::Resource => 4,
        }
    }

    /// The tier edges of this tier point to, `None` for resources.
    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::User => Some(Tier::Group),
            Tier::Group => Some(Tier::Role),
            Tier::Role => Some(Tier::Permission),
            Tier::Permission => Some(Tier::Resource),
            Tier::Resource => None,
        }
    }

    /// Tag used on the inbound interface, for example in hover events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::User => "user",
            Tier::Group => "group",
            Tier::Role => "role",
            Tier::Permission => "permission",
            Tier::Resource => "resource",
        }
    }

    /// Column title in the relationship diagram.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::User => "Users",
            Tier::Group => "Groups",
            Tier::Role => "Roles",
            Tier::Permission => "Permissions",
            Tier::Resource => "Resources",
        }
    }

    /// Colour used for nodes of this tier and for highlighted edges leaving it.
    pub fn color(&self) -> &'static str {
        match self {
            Tier::User => "#3b82f6",
            Tier::Group => "#8b5cf6",
            Tier::Role => "#10b981",
            Tier::Permission => "#f59e0b",
            Tier::Resource => "#ef4444",
        }
    }

    /// Prefix of identifiers generated for new entities of this tier.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Tier::User => "u",
            Tier::Group => "g",
            Tier::Role => "r",
            Tier::Permission => "p",
            Tier::Resource => "res",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown tier tag \"{0}\"")]
pub struct ParseTierError(pub String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Tier::User),
            "group" => Ok(Tier::Group),
            "role" => Ok(Tier::Role),
            "permission" => Ok(Tier::Permission),
            "resource" => Ok(Tier::Resource),
            other => Err(ParseTierError(other.to_string())),
        }
    }
}

/// Owned reference to a node of the relationship graph.
///
/// Identifiers are only unique within their collection, the tier is therefore part of the node
/// identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct NodeRef {
    pub tier: Tier,
    pub id: String,
}

impl NodeRef {
    pub fn new(tier: Tier, id: impl Into<String>) -> Self {
        Self {
            tier,
            id: id.into(),
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self::new(Tier::User, id)
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::new(Tier::Group, id)
    }

    pub fn role(id: impl Into<String>) -> Self {
        Self::new(Tier::Role, id)
    }

    pub fn permission(id: impl Into<String>) -> Self {
        Self::new(Tier::Permission, id)
    }

    pub fn resource(id: impl Into<String>) -> Self {
        Self::new(Tier::Resource, id)
    }

    /// Borrow this reference as a copyable key.
    pub fn as_key(&self) -> NodeKey<'_> {
        NodeKey {
            tier: self.tier,
            id: &self.id,
        }
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl From<NodeKey<'_>> for NodeRef {
    fn from(key: NodeKey<'_>) -> Self {
        key.to_node_ref()
    }
}

/// Borrowed, copyable node reference, used as graph node weight and during traversals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey<'a> {
    pub tier: Tier,
    pub id: &'a str,
}

impl<'a> NodeKey<'a> {
    pub fn new(tier: Tier, id: &'a str) -> Self {
        Self { tier, id }
    }

    pub fn to_node_ref(self) -> NodeRef {
        NodeRef::new(self.tier, self.id)
    }
}

impl Display for NodeKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.tier, self.id)
    }
}
