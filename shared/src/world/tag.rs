use crate::{CustomType, TagId, Value, ValueType};

/// A single typed value slot inside a TagGroup.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    id: TagId,
    data_type: ValueType,
    count: u8,
    custom_type: CustomType,
    value: Value,
}

impl Tag {
    pub fn new(id: TagId, data_type: ValueType, count: u8, custom_type: CustomType) -> Self {
        Self {
            id,
            data_type,
            count,
            custom_type,
            value: Value::empty(data_type),
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn data_type(&self) -> ValueType {
        self.data_type
    }

    /// Element count announced when the tag was created.
    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn custom_type(&self) -> CustomType {
        self.custom_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the whole cell. Mismatched shapes are logged and kept.
    pub fn set_value(&mut self, value: Value) {
        value.check_shape(self.data_type, self.count, &format!("Tag {}", self.id));
        self.value = value;
    }
}
