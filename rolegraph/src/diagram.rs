// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connections, labels and GraphViz export of the relationship diagram.
use petgraph::dot::{Config, Dot};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::highlight::{Highlight, successors};
use crate::layout::Layout;
use crate::store::EntityStore;
use crate::tier::{NodeKey, NodeRef, Tier};
use crate::traits::Entity;

/// Stroke colour of edges which are not highlighted.
pub const MUTED_COLOR: &str = "#cbd5e1";

/// A directed connection between nodes of two adjacent tiers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Edge {
    pub from: NodeRef,
    pub to: NodeRef,
}

impl Edge {
    /// Return `true` if both endpoints are part of the highlight.
    pub fn is_highlighted(&self, highlight: &Highlight) -> bool {
        highlight.connects(&self.from, &self.to)
    }

    /// Stroke colour: the colour of the source tier when highlighted, muted otherwise.
    pub fn color(&self, highlight: &Highlight) -> &'static str {
        if self.is_highlighted(highlight) {
            self.from.tier.color()
        } else {
            MUTED_COLOR
        }
    }
}

/// Every connection drawn in the diagram, in source collection order.
///
/// Connections are only drawn between nodes which both have a position. A user's direct role
/// assignments are not part of the diagram.
pub fn edges(store: &EntityStore, layout: &Layout) -> Vec<Edge> {
    let mut edges = Vec::new();

    for position in layout.positions() {
        for target in successors(store, position.node.as_key()) {
            if layout.position(target.tier, target.id).is_some() {
                edges.push(Edge {
                    from: position.node.clone(),
                    to: target.to_node_ref(),
                });
            }
        }
    }

    edges
}

/// Truncation limits for node labels, counted in characters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct LabelConfig {
    pub name_limit: usize,
    pub description_limit: usize,
    pub ellipsis: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            name_limit: 12,
            description_limit: 15,
            ellipsis: "...".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct NodeLabel {
    pub title: String,
    pub subtitle: String,
}

fn truncate(text: &str, limit: usize, ellipsis: &str) -> String {
    if text.chars().count() > limit {
        let mut truncated: String = text.chars().take(limit).collect();
        truncated.push_str(ellipsis);
        truncated
    } else {
        text.to_string()
    }
}

/// Label of an entity's diagram node: its name and a tier specific subtitle.
pub fn node_label<E: Entity>(entity: &E, config: &LabelConfig) -> NodeLabel {
    NodeLabel {
        title: truncate(entity.name(), config.name_limit, &config.ellipsis),
        subtitle: truncate(entity.subtitle(), config.description_limit, &config.ellipsis),
    }
}

/// The relationship diagram as a directed graph over the nodes of one store snapshot.
#[derive(Debug)]
pub struct RelationshipGraph<'a> {
    graph: DiGraphMap<NodeKey<'a>, ()>,
}

impl<'a> RelationshipGraph<'a> {
    pub fn new(store: &'a EntityStore) -> Self {
        let mut graph = DiGraphMap::new();

        for tier in Tier::ALL {
            add_nodes(store, tier, &mut graph);
        }

        let nodes: Vec<NodeKey<'a>> = graph.nodes().collect();
        for node in nodes {
            for target in successors(store, node) {
                graph.add_edge(node, target, ());
            }
        }

        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if `to` can be reached from `from` following the diagram's edges.
    pub fn has_path(&self, from: &NodeRef, to: &NodeRef) -> bool {
        let Some(start) = self.graph.nodes().find(|node| *node == from.as_key()) else {
            return false;
        };

        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(node) = dfs.next(&self.graph) {
            if node == to.as_key() {
                return true;
            }
        }
        false
    }

    /// Render the graph in GraphViz DOT format, drawing highlighted nodes and edges in their tier
    /// colour.
    pub fn to_dot(&self, highlight: &Highlight) -> String {
        let edge_attributes =
            |_: &DiGraphMap<NodeKey<'a>, ()>, (from, to, _): (NodeKey<'a>, NodeKey<'a>, &())| {
                let (from, to) = (from.to_node_ref(), to.to_node_ref());
                if highlight.connects(&from, &to) {
                    format!("color = \"{}\", penwidth = 3", from.tier.color())
                } else {
                    format!("color = \"{}\"", MUTED_COLOR)
                }
            };
        let node_attributes = |_: &DiGraphMap<NodeKey<'a>, ()>, (node, _): (NodeKey<'a>, &NodeKey<'a>)| {
            let style = if highlight.contains(node.tier, node.id) {
                "bold"
            } else {
                "solid"
            };
            format!(
                "label = \"{}\", color = \"{}\", style = {}",
                node,
                node.tier.color(),
                style
            )
        };
        let config = [Config::NodeNoLabel, Config::EdgeNoLabel];

        let dot = Dot::with_attr_getters(
            &self.graph,
            &config,
            &edge_attributes,
            &node_attributes,
        );

        format!("{:?}", dot)
    }
}

fn add_nodes<'a>(store: &'a EntityStore, tier: Tier, graph: &mut DiGraphMap<NodeKey<'a>, ()>) {
    let ids: Vec<&'a str> = match tier {
        Tier::User => store.users().ids().collect(),
        Tier::Group => store.groups().ids().collect(),
        Tier::Role => store.roles().ids().collect(),
        Tier::Permission => store.permissions().ids().collect(),
        Tier::Resource => store.resources().ids().collect(),
    };

    for id in ids {
        graph.add_node(NodeKey::new(tier, id));
    }
}
