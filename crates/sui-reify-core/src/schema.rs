//! Binary schemas composed from reified descriptors.
//!
//! A [`BcsSchema`] knows how to read or write exactly one value of its type
//! from a byte cursor. Struct schemas record named field schemas in on-chain
//! declaration order; building one requires the schemas of every field type
//! first, so composition is leaf-first and self-referential types are
//! unrepresentable.

use serde_json::{Map, Value};

use sui_reify_types::address::{address_from_bytes, address_to_bytes};
use sui_reify_types::MalformedTypeTag;

use crate::bcs::{BcsReader, BcsWriter};
use crate::error::ReifyError;
use crate::reified::Reified;
use crate::value::MoveValue;

/// The BCS wire grammar for one type.
#[derive(Debug, Clone)]
pub enum BcsSchema {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    /// ULEB128 count, then that many element payloads.
    Vector(Box<BcsSchema>),
    /// 0/1 presence byte, then the payload if present.
    Option(Box<BcsSchema>),
    /// Named field schemas in declaration order.
    Struct(Vec<(String, BcsSchema)>),
}

/// Compose the binary schema for a descriptor.
///
/// Struct descriptors carry their schema precomposed; a phantom marker in a
/// value position has no schema and is rejected.
pub fn schema_for(reified: &Reified) -> Result<BcsSchema, ReifyError> {
    Ok(match reified {
        Reified::Bool => BcsSchema::Bool,
        Reified::U8 => BcsSchema::U8,
        Reified::U16 => BcsSchema::U16,
        Reified::U32 => BcsSchema::U32,
        Reified::U64 => BcsSchema::U64,
        Reified::U128 => BcsSchema::U128,
        Reified::U256 => BcsSchema::U256,
        Reified::Address => BcsSchema::Address,
        Reified::Vector(element) => BcsSchema::Vector(Box::new(schema_for(element)?)),
        Reified::Option(inner) => BcsSchema::Option(Box::new(schema_for(inner)?)),
        Reified::Struct(s) => s.schema.clone(),
        Reified::Phantom(tag) => {
            return Err(MalformedTypeTag::new(
                tag.clone(),
                "phantom type parameter has no runtime representation",
            )
            .into())
        }
    })
}

impl BcsSchema {
    /// Read one value, producing the canonical field-map representation:
    /// u64 and wider as decimal strings, addresses as full-form hex,
    /// byte vectors as arrays, structs as name-keyed objects.
    pub fn read(&self, reader: &mut BcsReader<'_>) -> Result<Value, ReifyError> {
        Ok(match self {
            BcsSchema::Bool => Value::Bool(reader.read_bool()?),
            BcsSchema::U8 => Value::from(reader.read_u8()?),
            BcsSchema::U16 => Value::from(reader.read_u16()?),
            BcsSchema::U32 => Value::from(reader.read_u32()?),
            BcsSchema::U64 => Value::String(reader.read_u64()?.to_string()),
            BcsSchema::U128 => Value::String(reader.read_u128()?.to_string()),
            BcsSchema::U256 => Value::String(reader.read_u256()?.to_string()),
            BcsSchema::Address => Value::String(address_from_bytes(&reader.read_address()?)),
            BcsSchema::Vector(element) => {
                let len = reader.read_uleb128_len()?;
                let mut items = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    items.push(element.read(reader)?);
                }
                Value::Array(items)
            }
            BcsSchema::Option(inner) => {
                if reader.read_bool()? {
                    inner.read(reader)?
                } else {
                    Value::Null
                }
            }
            BcsSchema::Struct(fields) => {
                let mut map = Map::new();
                for (name, schema) in fields {
                    map.insert(name.clone(), schema.read(reader)?);
                }
                Value::Object(map)
            }
        })
    }

    /// Write one decoded value. The value's shape must match this schema;
    /// struct fields are written in schema (declaration) order.
    pub fn write(&self, value: &MoveValue, writer: &mut BcsWriter) -> Result<(), ReifyError> {
        match (self, value) {
            (BcsSchema::Bool, MoveValue::Bool(b)) => writer.write_bool(*b),
            (BcsSchema::U8, MoveValue::U8(x)) => writer.write_u8(*x),
            (BcsSchema::U16, MoveValue::U16(x)) => writer.write_u16(*x),
            (BcsSchema::U32, MoveValue::U32(x)) => writer.write_u32(*x),
            (BcsSchema::U64, MoveValue::U64(x)) => writer.write_u64(*x),
            (BcsSchema::U128, MoveValue::U128(x)) => writer.write_u128(*x),
            (BcsSchema::U256, MoveValue::U256(x)) => writer.write_u256(x),
            (BcsSchema::Address, MoveValue::Address(s)) => {
                let bytes = address_to_bytes(s).ok_or_else(|| ReifyError::MalformedFieldValue {
                    field: "address".to_string(),
                    reason: format!("'{}' is not a valid hex address", s),
                })?;
                writer.write_bytes(&bytes);
            }
            (BcsSchema::Vector(element), MoveValue::Vector(items)) => {
                writer.write_uleb128_len(items.len());
                for item in items {
                    element.write(item, writer)?;
                }
            }
            (BcsSchema::Option(inner), MoveValue::Option(opt)) => match opt {
                None => writer.write_u8(0),
                Some(v) => {
                    writer.write_u8(1);
                    inner.write(v, writer)?;
                }
            },
            (BcsSchema::Struct(fields), MoveValue::Struct(instance)) => {
                for (name, schema) in fields {
                    let field_value =
                        instance
                            .field(name)
                            .ok_or_else(|| ReifyError::MalformedFieldValue {
                                field: format!("{}.{}", instance.full_type_name, name),
                                reason: "missing field in struct value".to_string(),
                            })?;
                    schema.write(field_value, writer)?;
                }
            }
            (schema, value) => {
                return Err(ReifyError::MalformedFieldValue {
                    field: "<value>".to_string(),
                    reason: format!("value {:?} does not match schema {:?}", value, schema),
                })
            }
        }
        Ok(())
    }
}
