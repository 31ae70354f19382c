// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grid coordinates for the five-column relationship diagram.
//!
//! Each tier gets one column, left to right in chain order. Within a column nodes are stacked top
//! to bottom in collection order, so positions only depend on collection lengths and order.
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::aggregate::TierCounts;
use crate::model::{Group, Permission, Resource, Role, User};
use crate::store::EntityStore;
use crate::tier::{NodeRef, Tier};
use crate::traits::Entity;

/// Geometry of the diagram, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct LayoutConfig {
    /// Horizontal offset of the first column.
    pub start_x: u32,
    pub column_width: u32,
    pub node_width: u32,
    pub node_height: u32,
    pub vertical_spacing: u32,
    /// Space reserved above the first row for column titles.
    pub header_height: u32,
    pub bottom_padding: u32,
    pub horizontal_padding: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_x: 50,
            column_width: 180,
            node_width: 150,
            node_height: 50,
            vertical_spacing: 15,
            header_height: 60,
            bottom_padding: 50,
            horizontal_padding: 100,
        }
    }
}

/// Count as a coordinate factor, clamped to `u32::MAX`.
fn clamp(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

// Coordinates saturate at `u32::MAX` instead of wrapping.
impl LayoutConfig {
    /// Vertical distance between the tops of two consecutive nodes of a column.
    pub fn row_height(&self) -> u32 {
        self.node_height.saturating_add(self.vertical_spacing)
    }

    pub fn column_x(&self, tier: Tier) -> u32 {
        self.column_width
            .saturating_mul(clamp(tier.ordinal()))
            .saturating_add(self.start_x)
    }

    pub fn row_y(&self, index: usize) -> u32 {
        self.row_height()
            .saturating_mul(clamp(index))
            .saturating_add(self.header_height)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct NodePosition {
    pub node: NodeRef,
    pub x: u32,
    pub y: u32,
}

impl NodePosition {
    pub fn tier(&self) -> Tier {
        self.node.tier
    }

    pub fn id(&self) -> &str {
        &self.node.id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn for_counts(config: &LayoutConfig, counts: &TierCounts) -> Self {
        Self {
            width: config
                .column_width
                .saturating_mul(clamp(Tier::ALL.len()))
                .saturating_add(config.horizontal_padding),
            height: config
                .row_height()
                .saturating_mul(clamp(counts.max()))
                .saturating_add(config.header_height)
                .saturating_add(config.bottom_padding),
        }
    }
}

/// Positions of all nodes of one store snapshot.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    positions: Vec<NodePosition>,
    index: [HashMap<String, usize>; 5],
}

impl Layout {
    fn push_column<E: Entity>(&mut self, config: &LayoutConfig, entities: &[E]) {
        let x = config.column_x(E::TIER);
        for (row, entity) in entities.iter().enumerate() {
            self.index[E::TIER.ordinal()].insert(entity.id().to_string(), self.positions.len());
            self.positions.push(NodePosition {
                node: NodeRef::new(E::TIER, entity.id()),
                x,
                y: config.row_y(row),
            });
        }
    }

    /// All positions, column by column in chain order.
    pub fn positions(&self) -> &[NodePosition] {
        &self.positions
    }

    pub fn position(&self, tier: Tier, id: &str) -> Option<&NodePosition> {
        self.index[tier.ordinal()]
            .get(id)
            .map(|index| &self.positions[*index])
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Assign grid coordinates to every node of the five collections.
pub fn compute_positions(
    config: &LayoutConfig,
    users: &[User],
    groups: &[Group],
    roles: &[Role],
    permissions: &[Permission],
    resources: &[Resource],
) -> Layout {
    let mut layout = Layout::default();
    layout.push_column(config, users);
    layout.push_column(config, groups);
    layout.push_column(config, roles);
    layout.push_column(config, permissions);
    layout.push_column(config, resources);
    layout
}

/// Layout of everything currently kept in the store.
pub fn layout_store(config: &LayoutConfig, store: &EntityStore) -> Layout {
    compute_positions(
        config,
        store.users().as_slice(),
        store.groups().as_slice(),
        store.roles().as_slice(),
        store.permissions().as_slice(),
        store.resources().as_slice(),
    )
}
