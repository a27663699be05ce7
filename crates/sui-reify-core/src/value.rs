//! Decoded Move values.
//!
//! A [`MoveValue`] is the result of any decode path: a primitive scalar, a
//! sequence, an optional, or a struct instance carrying its resolved type
//! tag. Values compare field-wise, so round-trip and channel-equivalence
//! properties can be stated with `==`.

use primitive_types::U256;

/// A decoded on-chain value.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256(U256),
    /// Address in canonical short form (e.g. "0x2").
    Address(String),
    Vector(Vec<MoveValue>),
    Option(Option<Box<MoveValue>>),
    Struct(StructValue),
}

impl MoveValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MoveValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            MoveValue::U64(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&str> {
        match self {
            MoveValue::Address(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[MoveValue]> {
        match self {
            MoveValue::Vector(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            MoveValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Collect a `vector<u8>` value into raw bytes.
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            MoveValue::Vector(items) => items
                .iter()
                .map(|item| match item {
                    MoveValue::U8(b) => Some(*b),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

/// A decoded struct instance: named fields plus the resolved type tag.
///
/// The recorded tag is consistent with the descriptor that produced the
/// value; that consistency is enforced by the decode paths, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    /// Head name, e.g. "0x2::coin::Coin".
    pub type_name: String,
    /// Normalized type argument tags, in declaration order.
    pub type_args: Vec<String>,
    /// Head plus substituted arguments, e.g. "0x2::coin::Coin<0x2::sui::SUI>".
    pub full_type_name: String,
    /// Field values in on-chain declaration order.
    pub fields: Vec<(String, MoveValue)>,
}

impl StructValue {
    /// Look up a field by its wire name.
    pub fn field(&self, name: &str) -> Option<&MoveValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_bytes() {
        let v = MoveValue::Vector(vec![
            MoveValue::U8(1),
            MoveValue::U8(2),
            MoveValue::U8(3),
        ]);
        assert_eq!(v.as_bytes(), Some(vec![1, 2, 3]));

        let mixed = MoveValue::Vector(vec![MoveValue::U8(1), MoveValue::U64(2)]);
        assert_eq!(mixed.as_bytes(), None);
    }

    #[test]
    fn test_field_lookup() {
        let s = StructValue {
            type_name: "0x2::pair::Pair".to_string(),
            type_args: vec!["u64".to_string()],
            full_type_name: "0x2::pair::Pair<u64>".to_string(),
            fields: vec![
                ("a".to_string(), MoveValue::U64(7)),
                ("b".to_string(), MoveValue::Bool(true)),
            ],
        };
        assert_eq!(s.field("a"), Some(&MoveValue::U64(7)));
        assert!(s.field("missing").is_none());
    }
}
