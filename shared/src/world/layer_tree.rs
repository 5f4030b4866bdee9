//! # `LayerTree` – per-node layer storage
//!
//! Every Node carries its own tree of Layers, independent of the node tree.
//! Layers are stored flat, keyed by id, and each one remembers the parent id
//! the server announced. A separate index maps *announced* parent ids to
//! their children, so:
//!
//! * a child created before its parent is adopted as soon as the parent
//!   arrives, without re-linking anything;
//! * destroying a parent leaves its children in place; they report no
//!   resolvable parent and act as top-level layers until it comes back;
//! * inserting then removing a layer restores the exact previous state.
//!
//! Cascading operations walk the index depth-first and skip ids that are not
//! mirrored, so a missing intermediate layer cuts the subtree there.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::warn;

use crate::{ItemId, Layer, LayerId, MirrorError, NodeId, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct LayerTree {
    node_id: NodeId,
    layers: BTreeMap<LayerId, Layer>,
    children: BTreeMap<LayerId, BTreeSet<LayerId>>,
}

impl LayerTree {
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            layers: BTreeMap::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn contains(&self, layer_id: &LayerId) -> bool {
        self.layers.contains_key(layer_id)
    }

    pub fn get(&self, layer_id: &LayerId) -> Option<&Layer> {
        self.layers.get(layer_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// Layers whose parent is absent or not mirrored.
    pub fn roots(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values().filter(|layer| match layer.parent_id() {
            Some(parent_id) => !self.layers.contains_key(&parent_id),
            None => true,
        })
    }

    /// The parent layer, if it is announced and currently mirrored.
    pub fn parent(&self, layer_id: &LayerId) -> Option<&Layer> {
        let parent_id = self.layers.get(layer_id)?.parent_id()?;
        self.layers.get(&parent_id)
    }

    /// Mirrored direct children, in id order.
    pub fn children(&self, layer_id: &LayerId) -> Vec<LayerId> {
        self.children
            .get(layer_id)
            .map(|set| {
                set.iter()
                    .filter(|child_id| self.layers.contains_key(child_id))
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The layer itself followed by every mirrored descendant, depth-first.
    /// Empty if the layer is not mirrored.
    pub fn subtree(&self, layer_id: &LayerId) -> Vec<LayerId> {
        let mut output = Vec::new();
        if !self.layers.contains_key(layer_id) {
            return output;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![*layer_id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                // malformed parent ids can form a loop
                continue;
            }
            output.push(current);
            // reversed so the lowest id is visited first
            for child_id in self.children(&current).into_iter().rev() {
                stack.push(child_id);
            }
        }
        output
    }

    /// Inserts a layer, replacing any layer already stored under its id.
    pub fn insert(&mut self, layer: Layer) -> Option<Layer> {
        let layer_id = layer.id();
        let replaced = self.remove(&layer_id);
        if replaced.is_some() {
            warn!(
                "Node {}: layer {} created twice, replacing",
                self.node_id, layer_id
            );
        }

        if let Some(parent_id) = layer.parent_id() {
            self.children.entry(parent_id).or_default().insert(layer_id);
        }
        self.layers.insert(layer_id, layer);
        replaced
    }

    /// Removes a single layer. Its children stay mirrored.
    pub fn remove(&mut self, layer_id: &LayerId) -> Option<Layer> {
        let layer = self.layers.remove(layer_id)?;
        if let Some(parent_id) = layer.parent_id() {
            if let Some(siblings) = self.children.get_mut(&parent_id) {
                siblings.remove(layer_id);
                if siblings.is_empty() {
                    self.children.remove(&parent_id);
                }
            }
        }
        Some(layer)
    }

    pub fn set_value(
        &mut self,
        layer_id: &LayerId,
        item_id: ItemId,
        value: Value,
    ) -> Result<(), MirrorError> {
        let node_id = self.node_id;
        let layer = self
            .layers
            .get_mut(layer_id)
            .ok_or(MirrorError::LayerNotFound {
                node_id,
                layer_id: *layer_id,
            })?;
        layer.set_value(item_id, value);
        Ok(())
    }

    /// Removes `item_id` from the layer and from every layer below it,
    /// whether or not they held a value of their own.
    ///
    /// Returns how many layers actually held the item.
    pub fn unset_value(
        &mut self,
        layer_id: &LayerId,
        item_id: &ItemId,
    ) -> Result<usize, MirrorError> {
        if !self.layers.contains_key(layer_id) {
            return Err(MirrorError::LayerNotFound {
                node_id: self.node_id,
                layer_id: *layer_id,
            });
        }

        let mut removed = 0;
        for current in self.subtree(layer_id) {
            if let Some(layer) = self.layers.get_mut(&current) {
                if layer.unset_value(item_id).is_some() {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.layers.clear();
        self.children.clear();
    }
}
