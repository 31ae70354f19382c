// SPDX-License-Identifier: MIT OR Apache-2.0

//! Forward reachability along `User → Group → Role → Permission → Resource`.
//!
//! Starting from a seed node the walk follows the membership lists of each tier to the next one:
//! users to their groups, groups to their roles, roles to their permissions and permissions to
//! their resource. A user's directly assigned roles are never followed, the walk from a user
//! reaches roles only through groups.
//!
//! Edges always point to a strictly later tier, so every walk terminates after at most five
//! levels. The walk still keeps a visited set so that each node is expanded once, no matter how
//! many paths lead to it.
use std::collections::{HashSet, VecDeque};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::store::EntityStore;
use crate::tier::{NodeKey, NodeRef, Tier};

/// Outgoing edges of a node, restricted to targets which exist in the store.
///
/// Nodes missing from the store have no outgoing edges.
pub fn successors<'a>(store: &'a EntityStore, node: NodeKey<'_>) -> Vec<NodeKey<'a>> {
    let targets: Vec<NodeKey<'a>> = match node.tier {
        Tier::User => store
            .users()
            .get(node.id)
            .map(|user| {
                user.group_ids
                    .iter()
                    .map(|id| NodeKey::new(Tier::Group, id))
                    .collect()
            })
            .unwrap_or_default(),
        Tier::Group => store
            .groups()
            .get(node.id)
            .map(|group| {
                group
                    .role_ids
                    .iter()
                    .map(|id| NodeKey::new(Tier::Role, id))
                    .collect()
            })
            .unwrap_or_default(),
        Tier::Role => store
            .roles()
            .get(node.id)
            .map(|role| {
                role.permission_ids
                    .iter()
                    .map(|id| NodeKey::new(Tier::Permission, id))
                    .collect()
            })
            .unwrap_or_default(),
        Tier::Permission => store
            .permissions()
            .get(node.id)
            .map(|permission| vec![NodeKey::new(Tier::Resource, &permission.resource_id)])
            .unwrap_or_default(),
        Tier::Resource => Vec::new(),
    };

    targets
        .into_iter()
        .filter(|target| store.contains(*target))
        .collect()
}

/// Set of highlighted nodes, partitioned by tier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Highlight {
    nodes: [HashSet<String>; 5],
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returns `false` if it was already part of the set.
    fn insert(&mut self, node: NodeKey<'_>) -> bool {
        let ids = &mut self.nodes[node.tier.ordinal()];
        if ids.contains(node.id) {
            return false;
        }
        ids.insert(node.id.to_string())
    }

    pub fn contains(&self, tier: Tier, id: &str) -> bool {
        self.nodes[tier.ordinal()].contains(id)
    }

    pub fn contains_node(&self, node: &NodeRef) -> bool {
        self.contains(node.tier, &node.id)
    }

    /// Return `true` if the directed edge between the two nodes should be highlighted.
    ///
    /// This is the case when both endpoints are highlighted and `to` lives in the tier directly
    /// following the one of `from`.
    pub fn connects(&self, from: &NodeRef, to: &NodeRef) -> bool {
        from.tier.next() == Some(to.tier) && self.contains_node(from) && self.contains_node(to)
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(HashSet::is_empty)
    }

    /// Highlighted identifiers of one tier, in no particular order.
    pub fn ids(&self, tier: Tier) -> impl Iterator<Item = &str> {
        self.nodes[tier.ordinal()].iter().map(String::as_str)
    }

    /// All highlighted nodes, tier by tier.
    pub fn iter(&self) -> impl Iterator<Item = NodeKey<'_>> {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.ids(tier).map(move |id| NodeKey::new(tier, id)))
    }

    /// Highlighted nodes as owned references, sorted by tier and identifier.
    pub fn to_sorted_vec(&self) -> Vec<NodeRef> {
        let mut nodes: Vec<NodeRef> = self.iter().map(NodeRef::from).collect();
        nodes.sort();
        nodes
    }
}

/// Compute every node reachable from the seed by following the chain forward.
///
/// The seed itself is part of the result. A seed which does not exist in the store, as well as
/// references to missing entities met on the way, are left out.
pub fn reachable(store: &EntityStore, seed: &NodeRef) -> Highlight {
    let mut highlight = Highlight::new();
    if !store.contains(seed.as_key()) {
        trace!(%seed, "highlight seed not found");
        return highlight;
    }

    let mut queue: VecDeque<NodeKey<'_>> = VecDeque::from([seed.as_key()]);
    while let Some(node) = queue.pop_front() {
        if !highlight.insert(node) {
            continue;
        }

        for next in successors(store, node) {
            if !highlight.contains(next.tier, next.id) {
                queue.push_back(next);
            }
        }
    }

    trace!(%seed, visited = highlight.len(), "computed highlight");
    highlight
}

/// Hover state of the relationship diagram.
///
/// Idle without a seed. Hovering a node makes it active and computes the highlight from the store
/// as it is at that moment; later store mutations do not update it until the next `hover` or
/// `refresh`.
#[derive(Clone, Debug, Default)]
pub struct Highlighter {
    seed: Option<NodeRef>,
    highlight: Highlight,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed and recompute the highlighted set.
    pub fn hover(&mut self, store: &EntityStore, seed: NodeRef) -> &Highlight {
        self.highlight = reachable(store, &seed);
        self.seed = Some(seed);
        &self.highlight
    }

    /// Drop the seed, the highlighted set becomes empty.
    pub fn clear(&mut self) {
        self.seed = None;
        self.highlight = Highlight::new();
    }

    /// Recompute the highlight for the current seed against the given store.
    pub fn refresh(&mut self, store: &EntityStore) -> &Highlight {
        if let Some(seed) = &self.seed {
            self.highlight = reachable(store, seed);
        }
        &self.highlight
    }

    pub fn is_active(&self) -> bool {
        self.seed.is_some()
    }

    /// The hovered node, if any.
    pub fn seed(&self) -> Option<&NodeRef> {
        self.seed.as_ref()
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Return `true` if the node is the hovered one.
    pub fn is_hovered(&self, node: &NodeRef) -> bool {
        self.seed.as_ref() == Some(node)
    }
}
