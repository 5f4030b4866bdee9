use std::fmt;

use log::warn;

use crate::{constants::STRING8_MAX_SIZE, MirrorError};

/// Scalar family carried by a Tag or a Layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Real32,
    Real64,
    String8,
}

impl ValueType {
    pub fn code(self) -> u8 {
        match self {
            ValueType::Uint8 => 1,
            ValueType::Uint16 => 2,
            ValueType::Uint32 => 3,
            ValueType::Uint64 => 4,
            ValueType::Real32 => 6,
            ValueType::Real64 => 7,
            ValueType::String8 => 8,
        }
    }
}

impl TryFrom<u8> for ValueType {
    type Error = MirrorError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ValueType::Uint8),
            2 => Ok(ValueType::Uint16),
            3 => Ok(ValueType::Uint32),
            4 => Ok(ValueType::Uint64),
            6 => Ok(ValueType::Real32),
            7 => Ok(ValueType::Real64),
            8 => Ok(ValueType::String8),
            // 0 is reserved, 5 (half precision) has no scalar here
            code => Err(MirrorError::UnknownValueType { code }),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Uint8 => "uint8",
            ValueType::Uint16 => "uint16",
            ValueType::Uint32 => "uint32",
            ValueType::Uint64 => "uint64",
            ValueType::Real32 => "real32",
            ValueType::Real64 => "real64",
            ValueType::String8 => "string8",
        };
        f.write_str(name)
    }
}

/// A typed array of scalars, the unit of data held by Tags and Layer items.
///
/// Elements are stored exactly as they arrived. A cell never converts between
/// families, and it does not know the count its owner declared: callers
/// compare [`Value::len`] against that themselves.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Uint64(Vec<u64>),
    Real32(Vec<f32>),
    Real64(Vec<f64>),
    String8(Vec<String>),
}

impl Value {
    /// An empty cell of the given family.
    pub fn empty(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Uint8 => Value::Uint8(Vec::new()),
            ValueType::Uint16 => Value::Uint16(Vec::new()),
            ValueType::Uint32 => Value::Uint32(Vec::new()),
            ValueType::Uint64 => Value::Uint64(Vec::new()),
            ValueType::Real32 => Value::Real32(Vec::new()),
            ValueType::Real64 => Value::Real64(Vec::new()),
            ValueType::String8 => Value::String8(Vec::new()),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Uint8(_) => ValueType::Uint8,
            Value::Uint16(_) => ValueType::Uint16,
            Value::Uint32(_) => ValueType::Uint32,
            Value::Uint64(_) => ValueType::Uint64,
            Value::Real32(_) => ValueType::Real32,
            Value::Real64(_) => ValueType::Real64,
            Value::String8(_) => ValueType::String8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Value::Uint8(v) => v.len(),
            Value::Uint16(v) => v.len(),
            Value::Uint32(v) => v.len(),
            Value::Uint64(v) => v.len(),
            Value::Real32(v) => v.len(),
            Value::Real64(v) => v.len(),
            Value::String8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logs a warning for every way this cell disagrees with the shape its
    /// owner declared. Returns whether the cell matched.
    pub(crate) fn check_shape(
        &self,
        declared_type: ValueType,
        declared_count: u8,
        owner: &str,
    ) -> bool {
        let mut matches = true;
        if self.value_type() != declared_type {
            warn!(
                "{}: received {} values for a {} slot, storing as received",
                owner,
                self.value_type(),
                declared_type
            );
            matches = false;
        }
        if self.len() != declared_count as usize {
            warn!(
                "{}: received {} elements, declared count is {}",
                owner,
                self.len(),
                declared_count
            );
            matches = false;
        }
        if let Value::String8(strings) = self {
            if strings.iter().any(|s| s.len() > STRING8_MAX_SIZE) {
                warn!(
                    "{}: string8 element longer than {} bytes",
                    owner, STRING8_MAX_SIZE
                );
                matches = false;
            }
        }
        matches
    }
}

impl From<Vec<u8>> for Value {
    fn from(elements: Vec<u8>) -> Self {
        Value::Uint8(elements)
    }
}

impl From<Vec<u16>> for Value {
    fn from(elements: Vec<u16>) -> Self {
        Value::Uint16(elements)
    }
}

impl From<Vec<u32>> for Value {
    fn from(elements: Vec<u32>) -> Self {
        Value::Uint32(elements)
    }
}

impl From<Vec<u64>> for Value {
    fn from(elements: Vec<u64>) -> Self {
        Value::Uint64(elements)
    }
}

impl From<Vec<f32>> for Value {
    fn from(elements: Vec<f32>) -> Self {
        Value::Real32(elements)
    }
}

impl From<Vec<f64>> for Value {
    fn from(elements: Vec<f64>) -> Self {
        Value::Real64(elements)
    }
}

impl From<Vec<String>> for Value {
    fn from(elements: Vec<String>) -> Self {
        Value::String8(elements)
    }
}
