//! Decode entry points.
//!
//! On-chain values are retrievable through different channels: raw BCS
//! bytes, an indexer's parsed field tree (with or without runtime type
//! tags), or typed JSON. Each channel has its own entry point here, and all
//! of them produce field-wise identical [`MoveValue`]s for the same logical
//! value. The encode direction (`to_bcs`, `to_json`) closes the loop so
//! round-trips can be checked end to end.
//!
//! Representation conventions:
//! - field maps use wire (snake_case) field names;
//! - `u64`/`u128`/`u256` ride as decimal strings to avoid precision loss
//!   (plain JSON numbers are accepted where they fit);
//! - `vector<u8>` is a base64 string in field maps and a 0x-hex string in
//!   typed JSON, with element arrays accepted everywhere;
//! - typed JSON wraps structs in a `{"$typeName", "$typeArgs", ...fields}`
//!   envelope, repeated on nested struct fields.

use base64::Engine;
use primitive_types::U256;
use serde_json::{Map, Value};

use sui_reify_types::address::{normalize_address_checked, normalize_address_short};
use sui_reify_types::normalize_type_tag;

use crate::bcs::{BcsReader, BcsWriter};
use crate::error::ReifyError;
use crate::reified::{Reified, StructReified};
use crate::schema::schema_for;
use crate::validate::{assert_struct_tag_matches, assert_tag_matches, assert_type_arg_strings_match};
use crate::value::MoveValue;

/// Which channel a field tree came from. Controls the tolerated leaf
/// encodings and nested-struct wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repr {
    Fields,
    FieldsWithTypes,
    Json,
}

/// Decode from a plain field map (values already primitive-decoded by an
/// upstream binary parse or indexer).
pub fn from_fields(reified: &Reified, fields: &Value) -> Result<MoveValue, ReifyError> {
    decode_value(reified, fields, Repr::Fields)
}

/// Decode from a field map accompanied by the value's runtime type tag.
///
/// The tag is asserted against the descriptor before any field is read;
/// a mismatch is fatal, not recoverable.
pub fn from_fields_with_types(
    reified: &Reified,
    actual_tag: &str,
    fields: &Value,
) -> Result<MoveValue, ReifyError> {
    assert_tag_matches(actual_tag, reified)?;
    decode_value(reified, fields, Repr::FieldsWithTypes)
}

/// Decode from raw BCS bytes.
///
/// Parses the payload with the descriptor's binary schema into a field map,
/// then decodes that map. Trailing bytes fail the decode.
pub fn from_bcs(reified: &Reified, bytes: &[u8]) -> Result<MoveValue, ReifyError> {
    let schema = schema_for(reified)?;
    let mut reader = BcsReader::new(bytes);
    let fields = schema.read(&mut reader)?;
    reader.expect_end()?;
    decode_value(reified, &fields, Repr::Fields)
}

/// Decode a typed-JSON value, requiring and verifying the
/// `$typeName`/`$typeArgs` envelope for struct targets.
pub fn from_json(reified: &Reified, json: &Value) -> Result<MoveValue, ReifyError> {
    if let Reified::Struct(s) = reified {
        let obj = expect_object(json, &s.full_type_name)?;
        verify_envelope(s, obj)?;
    }
    decode_value(reified, json, Repr::Json)
}

/// Decode a typed-JSON field payload. Nested struct objects that carry an
/// envelope are verified against their descriptors.
pub fn from_json_field(reified: &Reified, json: &Value) -> Result<MoveValue, ReifyError> {
    decode_value(reified, json, Repr::Json)
}

/// Encode a decoded value back to BCS bytes.
pub fn to_bcs(reified: &Reified, value: &MoveValue) -> Result<Vec<u8>, ReifyError> {
    let schema = schema_for(reified)?;
    let mut writer = BcsWriter::new();
    schema.write(value, &mut writer)?;
    Ok(writer.into_bytes())
}

/// Emit the typed-JSON representation of a decoded value.
///
/// Struct instances carry the `$typeName`/`$typeArgs` envelope at every
/// level; `u64` and wider are decimal strings; byte vectors are 0x-hex.
pub fn to_json(value: &MoveValue) -> Value {
    match value {
        MoveValue::Bool(b) => Value::Bool(*b),
        MoveValue::U8(x) => Value::from(*x),
        MoveValue::U16(x) => Value::from(*x),
        MoveValue::U32(x) => Value::from(*x),
        MoveValue::U64(x) => Value::String(x.to_string()),
        MoveValue::U128(x) => Value::String(x.to_string()),
        MoveValue::U256(x) => Value::String(x.to_string()),
        MoveValue::Address(s) => Value::String(s.clone()),
        MoveValue::Vector(items) => {
            if let Some(bytes) = value.as_bytes() {
                if !bytes.is_empty() {
                    return Value::String(format!("0x{}", hex::encode(bytes)));
                }
            }
            Value::Array(items.iter().map(to_json).collect())
        }
        MoveValue::Option(opt) => match opt {
            None => Value::Null,
            Some(inner) => to_json(inner),
        },
        MoveValue::Struct(instance) => {
            let mut map = Map::new();
            map.insert(
                "$typeName".to_string(),
                Value::String(instance.type_name.clone()),
            );
            map.insert(
                "$typeArgs".to_string(),
                Value::Array(
                    instance
                        .type_args
                        .iter()
                        .map(|t| Value::String(t.clone()))
                        .collect(),
                ),
            );
            for (name, field_value) in &instance.fields {
                map.insert(name.clone(), to_json(field_value));
            }
            Value::Object(map)
        }
    }
}

fn decode_value(reified: &Reified, input: &Value, repr: Repr) -> Result<MoveValue, ReifyError> {
    match reified {
        Reified::Bool => match input {
            Value::Bool(b) => Ok(MoveValue::Bool(*b)),
            _ => Err(malformed("bool", "expected a boolean")),
        },
        Reified::U8 => Ok(MoveValue::U8(uint_from_value(input, "u8", u8::MAX as u128)? as u8)),
        Reified::U16 => Ok(MoveValue::U16(
            uint_from_value(input, "u16", u16::MAX as u128)? as u16,
        )),
        Reified::U32 => Ok(MoveValue::U32(
            uint_from_value(input, "u32", u32::MAX as u128)? as u32,
        )),
        Reified::U64 => Ok(MoveValue::U64(
            uint_from_value(input, "u64", u64::MAX as u128)? as u64,
        )),
        Reified::U128 => Ok(MoveValue::U128(uint_from_value(input, "u128", u128::MAX)?)),
        Reified::U256 => Ok(MoveValue::U256(u256_from_value(input)?)),
        Reified::Address => {
            let s = input
                .as_str()
                .ok_or_else(|| malformed("address", "expected an address string"))?;
            let normalized = normalize_address_checked(s)
                .ok_or_else(|| malformed("address", "invalid hex address"))?;
            Ok(MoveValue::Address(normalize_address_short(&normalized)))
        }
        Reified::Vector(element) => decode_vector(element, input, repr),
        Reified::Option(inner) => match input {
            Value::Null => Ok(MoveValue::Option(None)),
            other => Ok(MoveValue::Option(Some(Box::new(decode_value(
                inner, other, repr,
            )?)))),
        },
        Reified::Struct(s) => decode_struct(s, input, repr),
        Reified::Phantom(tag) => Err(malformed(tag, "phantom type parameter cannot decode a value")),
    }
}

fn decode_vector(element: &Reified, input: &Value, repr: Repr) -> Result<MoveValue, ReifyError> {
    // Byte vectors additionally travel as strings: base64 from indexer
    // field maps, 0x-hex in typed JSON.
    if matches!(element, Reified::U8) {
        if let Value::String(s) = input {
            let bytes = bytes_from_string(s, repr)?;
            return Ok(MoveValue::Vector(bytes.into_iter().map(MoveValue::U8).collect()));
        }
    }

    let items = input
        .as_array()
        .ok_or_else(|| malformed("vector", "expected an array of elements"))?;
    let mut decoded = Vec::with_capacity(items.len());
    for item in items {
        decoded.push(decode_value(element, item, repr)?);
    }
    Ok(MoveValue::Vector(decoded))
}

fn decode_struct(s: &StructReified, input: &Value, repr: Repr) -> Result<MoveValue, ReifyError> {
    let mut obj = expect_object(input, &s.full_type_name)?;

    match repr {
        Repr::FieldsWithTypes => {
            // Parsed-content trees wrap nested struct values as
            // { "type": "...", "fields": {...} }.
            if let (Some(tag), Some(fields)) = (obj.get("type").and_then(Value::as_str), obj.get("fields")) {
                assert_struct_tag_matches(tag, s)?;
                obj = expect_object(fields, &s.full_type_name)?;
            }
        }
        Repr::Json => {
            if obj.contains_key("$typeName") {
                verify_envelope(s, obj)?;
            }
        }
        Repr::Fields => {}
    }

    let mut values = Vec::with_capacity(s.fields.len());
    for (name, field_type) in &s.fields {
        let field_value = obj.get(name).ok_or_else(|| ReifyError::MalformedFieldValue {
            field: format!("{}.{}", s.full_type_name, name),
            reason: "missing field".to_string(),
        })?;
        values.push(decode_value(field_type, field_value, repr)?);
    }
    Ok(MoveValue::Struct(s.new_value(values)))
}

fn verify_envelope(s: &StructReified, obj: &Map<String, Value>) -> Result<(), ReifyError> {
    let type_name = obj
        .get("$typeName")
        .and_then(Value::as_str)
        .ok_or_else(|| ReifyError::MalformedFieldValue {
            field: s.full_type_name.clone(),
            reason: "missing $typeName envelope".to_string(),
        })?;
    let actual_head = normalize_type_tag(type_name)?;
    if actual_head != s.type_name {
        return Err(ReifyError::TypeTagMismatch {
            expected: s.type_name.clone(),
            actual: actual_head,
        });
    }

    let raw_args = obj
        .get("$typeArgs")
        .and_then(Value::as_array)
        .ok_or_else(|| ReifyError::MalformedFieldValue {
            field: s.full_type_name.clone(),
            reason: "missing $typeArgs envelope".to_string(),
        })?;
    let mut args = Vec::with_capacity(raw_args.len());
    for arg in raw_args {
        let arg = arg.as_str().ok_or_else(|| ReifyError::MalformedFieldValue {
            field: s.full_type_name.clone(),
            reason: "$typeArgs entries must be strings".to_string(),
        })?;
        args.push(arg.to_string());
    }
    assert_type_arg_strings_match(&args, &s.type_args)
}

fn expect_object<'v>(value: &'v Value, ctx: &str) -> Result<&'v Map<String, Value>, ReifyError> {
    value.as_object().ok_or_else(|| ReifyError::MalformedFieldValue {
        field: ctx.to_string(),
        reason: "expected a JSON object of fields".to_string(),
    })
}

fn malformed(field: &str, reason: &str) -> ReifyError {
    ReifyError::MalformedFieldValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn uint_from_value(value: &Value, ty: &str, max: u128) -> Result<u128, ReifyError> {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| malformed(ty, "expected an unsigned integer"))?,
        Value::String(s) => s
            .trim()
            .parse::<u128>()
            .map_err(|_| malformed(ty, "expected a decimal integer string"))?,
        _ => return Err(malformed(ty, "expected an integer or decimal string")),
    };
    if parsed > max {
        return Err(malformed(ty, "integer out of range"));
    }
    Ok(parsed)
}

fn u256_from_value(value: &Value) -> Result<U256, ReifyError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| malformed("u256", "expected an unsigned integer")),
        Value::String(s) => U256::from_dec_str(s.trim())
            .map_err(|_| malformed("u256", "expected a decimal integer string")),
        _ => Err(malformed("u256", "expected an integer or decimal string")),
    }
}

fn bytes_from_string(s: &str, repr: Repr) -> Result<Vec<u8>, ReifyError> {
    let s = s.trim();
    if let Some(hex_part) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return hex::decode(hex_part).map_err(|_| malformed("vector<u8>", "invalid hex string"));
    }
    match repr {
        Repr::Json => hex::decode(s).map_err(|_| malformed("vector<u8>", "invalid hex string")),
        _ => base64::engine::general_purpose::STANDARD
            .decode(s)
            .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(s))
            .map_err(|_| malformed("vector<u8>", "invalid base64 string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pair_u64() -> Reified {
        StructReified::builder("0x7::pair::Pair")
            .type_arg(Reified::U64)
            .field("a", Reified::U64)
            .field("b", Reified::vector(Reified::U8))
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_fields_concrete_pair() {
        let pair = pair_u64();
        let decoded = from_fields(&pair, &json!({"a": 7, "b": [1, 2, 3]})).unwrap();
        let instance = decoded.as_struct().unwrap();
        assert_eq!(instance.field("a"), Some(&MoveValue::U64(7)));
        assert_eq!(instance.field("b").unwrap().as_bytes(), Some(vec![1, 2, 3]));
        assert_eq!(instance.full_type_name, "0x7::pair::Pair<u64>");
    }

    #[test]
    fn test_from_fields_accepts_decimal_strings() {
        let decoded = from_fields(&Reified::U64, &json!("18446744073709551615")).unwrap();
        assert_eq!(decoded, MoveValue::U64(u64::MAX));

        let decoded = from_fields(
            &Reified::U256,
            &json!("115792089237316195423570985008687907853269984665640564039457584007913129639935"),
        )
        .unwrap();
        assert_eq!(decoded, MoveValue::U256(U256::MAX));
    }

    #[test]
    fn test_from_fields_rejects_out_of_range() {
        assert!(from_fields(&Reified::U8, &json!(256)).is_err());
        assert!(from_fields(&Reified::U64, &json!("not-a-number")).is_err());
    }

    #[test]
    fn test_from_fields_missing_field() {
        let err = from_fields(&pair_u64(), &json!({"a": 7})).unwrap_err();
        assert!(matches!(err, ReifyError::MalformedFieldValue { .. }));
    }

    #[test]
    fn test_byte_vector_base64_in_field_maps() {
        // base64 of [1, 2, 3]
        let decoded = from_fields(&Reified::vector(Reified::U8), &json!("AQID")).unwrap();
        assert_eq!(decoded.as_bytes(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_option_null_and_value() {
        let opt = Reified::option(Reified::U64);
        assert_eq!(
            from_fields(&opt, &Value::Null).unwrap(),
            MoveValue::Option(None)
        );
        assert_eq!(
            from_fields(&opt, &json!("9")).unwrap(),
            MoveValue::Option(Some(Box::new(MoveValue::U64(9))))
        );
    }

    #[test]
    fn test_from_fields_with_types_checks_tag() {
        let pair = pair_u64();
        let fields = json!({"a": 7, "b": [1, 2, 3]});

        assert!(from_fields_with_types(&pair, "0x7::pair::Pair<u64>", &fields).is_ok());
        // Leading-zero address still matches after normalization
        assert!(from_fields_with_types(&pair, "0x0007::pair::Pair<u64>", &fields).is_ok());

        let err = from_fields_with_types(&pair, "0x7::pair::Pair<u32>", &fields).unwrap_err();
        assert!(matches!(err, ReifyError::TypeArgumentMismatch { .. }));
    }

    #[test]
    fn test_with_types_unwraps_nested_wrapper() {
        let inner = StructReified::builder("0x7::inner::Inner")
            .field("x", Reified::U8)
            .build()
            .unwrap();
        let outer = StructReified::builder("0x7::outer::Outer")
            .field("inner", inner)
            .build()
            .unwrap();

        let fields = json!({
            "inner": {"type": "0x7::inner::Inner", "fields": {"x": 5}}
        });
        let decoded = from_fields_with_types(&outer, "0x7::outer::Outer", &fields).unwrap();
        let inner_value = decoded.as_struct().unwrap().field("inner").unwrap();
        assert_eq!(inner_value.as_struct().unwrap().field("x"), Some(&MoveValue::U8(5)));
    }

    #[test]
    fn test_from_json_requires_envelope() {
        let pair = pair_u64();
        let err = from_json(&pair, &json!({"a": "7", "b": "0x010203"})).unwrap_err();
        assert!(matches!(err, ReifyError::MalformedFieldValue { .. }));
    }

    #[test]
    fn test_from_json_envelope_mismatch() {
        let pair = pair_u64();
        let wrong_head = json!({
            "$typeName": "0x7::other::Other",
            "$typeArgs": ["u64"],
            "a": "7",
            "b": "0x010203"
        });
        assert!(matches!(
            from_json(&pair, &wrong_head).unwrap_err(),
            ReifyError::TypeTagMismatch { .. }
        ));

        let wrong_args = json!({
            "$typeName": "0x7::pair::Pair",
            "$typeArgs": ["u32"],
            "a": "7",
            "b": "0x010203"
        });
        assert!(matches!(
            from_json(&pair, &wrong_args).unwrap_err(),
            ReifyError::TypeArgumentMismatch { .. }
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let pair = pair_u64();
        let decoded = from_fields(&pair, &json!({"a": 7, "b": [1, 2, 3]})).unwrap();
        let emitted = to_json(&decoded);
        assert_eq!(emitted["$typeName"], "0x7::pair::Pair");
        assert_eq!(emitted["a"], "7");
        assert_eq!(emitted["b"], "0x010203");

        let reparsed = from_json(&pair, &emitted).unwrap();
        assert_eq!(reparsed, decoded);
    }

    #[test]
    fn test_from_json_field_decodes_leaves() {
        assert_eq!(
            from_json_field(&Reified::U64, &json!("7")).unwrap(),
            MoveValue::U64(7)
        );
        let bytes = from_json_field(&Reified::vector(Reified::U8), &json!("0x0102")).unwrap();
        assert_eq!(bytes.as_bytes(), Some(vec![1, 2]));
    }

    #[test]
    fn test_address_normalized_short() {
        let decoded = from_fields(
            &Reified::Address,
            &json!("0x0000000000000000000000000000000000000000000000000000000000000002"),
        )
        .unwrap();
        assert_eq!(decoded, MoveValue::Address("0x2".to_string()));
    }

    #[test]
    fn test_from_bcs_trailing_bytes() {
        let mut bytes = to_bcs(&Reified::U8, &MoveValue::U8(1)).unwrap();
        bytes.push(0);
        assert!(matches!(
            from_bcs(&Reified::U8, &bytes).unwrap_err(),
            ReifyError::MalformedBinaryPayload { .. }
        ));
    }
}
