use std::collections::BTreeMap;

use crate::{CustomType, ItemId, LayerId, Value, ValueType};

/// One node of a Node's layer tree: a sparse item-indexed map of values.
///
/// The parent is held by id. Whether it resolves, and which layers are
/// children, is answered by the owning [`LayerTree`](crate::LayerTree).
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    id: LayerId,
    parent_id: Option<LayerId>,
    data_type: ValueType,
    count: u8,
    custom_type: CustomType,
    values: BTreeMap<ItemId, Value>,
}

impl Layer {
    pub fn new(
        id: LayerId,
        parent_id: Option<LayerId>,
        data_type: ValueType,
        count: u8,
        custom_type: CustomType,
    ) -> Self {
        Self {
            id,
            parent_id,
            data_type,
            count,
            custom_type,
            values: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Parent announced by the server, which may not be mirrored (yet).
    pub fn parent_id(&self) -> Option<LayerId> {
        self.parent_id
    }

    pub fn data_type(&self) -> ValueType {
        self.data_type
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn custom_type(&self) -> CustomType {
        self.custom_type
    }

    pub fn value(&self, item_id: &ItemId) -> Option<&Value> {
        self.values.get(item_id)
    }

    pub fn values(&self) -> impl Iterator<Item = (&ItemId, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn set_value(&mut self, item_id: ItemId, value: Value) {
        value.check_shape(
            self.data_type,
            self.count,
            &format!("Layer {} item {}", self.id, item_id),
        );
        self.values.insert(item_id, value);
    }

    pub(crate) fn unset_value(&mut self, item_id: &ItemId) -> Option<Value> {
        self.values.remove(item_id)
    }
}
