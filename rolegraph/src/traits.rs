// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Debug;

use crate::tier::Tier;

/// Interface shared by the five entity records kept in the store.
pub trait Entity: Clone + Debug {
    /// Partial record used to edit an entity in place.
    type Patch: Patch<Self>;

    /// Tier of the relationship chain this entity lives in.
    const TIER: Tier;

    /// Identifier, unique within the entity's collection.
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Display name.
    fn name(&self) -> &str;

    /// Secondary text shown under the name in the relationship diagram.
    fn subtitle(&self) -> &str;

    /// Return the entity with the given identifier assigned.
    fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id.into());
        self
    }
}

/// A set of field changes which can be applied to an entity of type `E`.
///
/// Fields left unset keep their current value.
pub trait Patch<E> {
    fn apply(self, entity: &mut E);
}
