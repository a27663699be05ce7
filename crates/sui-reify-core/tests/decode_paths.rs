//! End-to-end decode path tests: round-trips, channel equivalence, and
//! differential checks against the canonical `bcs` crate.

use serde_json::json;

use sui_reify_core::{
    from_bcs, from_fields, from_fields_with_types, from_json, to_bcs, to_json, MoveValue, Reified,
    ReifyError, StructReified,
};

/// `Pair<u64> { a: u64, b: vector<u8> }`
fn pair_u64() -> Reified {
    StructReified::builder("0x7::pair::Pair")
        .type_arg(Reified::U64)
        .field("a", Reified::U64)
        .field("b", Reified::vector(Reified::U8))
        .build()
        .expect("static binding shape")
}

/// `Vault<phantom T> { id: address, balances: vector<Pair<u64>>, cap: 0x1::option::Option<u128> }`
fn vault(phantom_tag: &str) -> Reified {
    StructReified::builder("0x7::vault::Vault")
        .phantom_arg(phantom_tag)
        .field("id", Reified::Address)
        .field("balances", Reified::vector(pair_u64()))
        .field("cap", Reified::option(Reified::U128))
        .build()
        .expect("static binding shape")
}

#[test]
fn pair_decodes_and_roundtrips_through_bcs() {
    let pair = pair_u64();

    let decoded = from_fields(&pair, &json!({"a": 7, "b": [1, 2, 3]})).unwrap();
    let instance = decoded.as_struct().unwrap();
    assert_eq!(instance.field("a").unwrap().as_u64(), Some(7));
    assert_eq!(instance.field("b").unwrap().as_bytes(), Some(vec![1, 2, 3]));
    assert_eq!(instance.full_type_name, "0x7::pair::Pair<u64>");

    let bytes = to_bcs(&pair, &decoded).unwrap();
    let redecoded = from_bcs(&pair, &bytes).unwrap();
    assert_eq!(redecoded, decoded);
}

#[test]
fn bare_head_pair_decodes_and_roundtrips() {
    // Heads without an address segment are legal tags too.
    let pair = StructReified::builder("Pair")
        .type_arg(Reified::U64)
        .field("a", Reified::U64)
        .field("b", Reified::vector(Reified::U8))
        .build()
        .unwrap();

    let decoded = from_fields(&pair, &json!({"a": 7, "b": [1, 2, 3]})).unwrap();
    let instance = decoded.as_struct().unwrap();
    assert_eq!(instance.field("a").unwrap().as_u64(), Some(7));
    assert_eq!(instance.field("b").unwrap().as_bytes(), Some(vec![1, 2, 3]));
    assert_eq!(instance.full_type_name, "Pair<u64>");

    let bytes = to_bcs(&pair, &decoded).unwrap();
    assert_eq!(from_bcs(&pair, &bytes).unwrap(), decoded);
}

#[test]
fn bcs_encoding_agrees_with_canonical_bcs() {
    // The same logical shape as Pair<u64>, serialized by the bcs crate.
    #[derive(serde::Serialize)]
    struct PairWire {
        a: u64,
        b: Vec<u8>,
    }

    let reference = bcs::to_bytes(&PairWire {
        a: 7,
        b: vec![1, 2, 3],
    })
    .unwrap();

    let pair = pair_u64();
    let decoded = from_fields(&pair, &json!({"a": 7, "b": [1, 2, 3]})).unwrap();
    assert_eq!(to_bcs(&pair, &decoded).unwrap(), reference);
    assert_eq!(from_bcs(&pair, &reference).unwrap(), decoded);
}

#[test]
fn nested_generic_roundtrip() {
    let vault = vault("0x2::sui::SUI");

    let fields = json!({
        "id": "0x2",
        "balances": [
            {"a": "1", "b": [0xaa]},
            {"a": "18446744073709551615", "b": []}
        ],
        "cap": "340282366920938463463374607431768211455"
    });
    let decoded = from_fields(&vault, &fields).unwrap();
    let instance = decoded.as_struct().unwrap();
    assert_eq!(
        instance.full_type_name,
        "0x7::vault::Vault<0x2::sui::SUI>"
    );

    let bytes = to_bcs(&vault, &decoded).unwrap();
    let redecoded = from_bcs(&vault, &bytes).unwrap();
    assert_eq!(redecoded, decoded);

    let second = instance.field("balances").unwrap().as_vector().unwrap()[1]
        .as_struct()
        .unwrap();
    assert_eq!(second.field("a").unwrap().as_u64(), Some(u64::MAX));
}

#[test]
fn channel_equivalence() {
    let vault = vault("0x2::sui::SUI");

    // Channel 1: plain field map
    let from_map = from_fields(
        &vault,
        &json!({
            "id": "0x2",
            "balances": [{"a": 5, "b": [9]}],
            "cap": null
        }),
    )
    .unwrap();

    // Channel 2: field map plus runtime tags, nested values wrapped
    let from_typed_map = from_fields_with_types(
        &vault,
        "0x0007::vault::Vault<0x02::sui::SUI>",
        &json!({
            "id": "0x2",
            "balances": [
                {"type": "0x7::pair::Pair<u64>", "fields": {"a": "5", "b": "CQ=="}}
            ],
            "cap": null
        }),
    )
    .unwrap();

    // Channel 3: BCS bytes
    let from_bytes = from_bcs(&vault, &to_bcs(&vault, &from_map).unwrap()).unwrap();

    // Channel 4: typed JSON
    let from_envelope = from_json(&vault, &to_json(&from_map)).unwrap();

    assert_eq!(from_typed_map, from_map);
    assert_eq!(from_bytes, from_map);
    assert_eq!(from_envelope, from_map);
}

#[test]
fn type_argument_mismatch_is_fatal() {
    let expected = vault("0x2::usdc::USDC");
    let err = from_fields_with_types(
        &expected,
        "0x7::vault::Vault<0x2::sui::SUI>",
        &json!({"id": "0x2", "balances": [], "cap": null}),
    )
    .unwrap_err();
    assert!(matches!(err, ReifyError::TypeArgumentMismatch { .. }));
}

#[test]
fn option_presence_byte_on_the_wire() {
    let vault = vault("0x2::sui::SUI");
    let with_cap = from_fields(
        &vault,
        &json!({"id": "0x2", "balances": [], "cap": "77"}),
    )
    .unwrap();
    let without_cap = from_fields(
        &vault,
        &json!({"id": "0x2", "balances": [], "cap": null}),
    )
    .unwrap();

    let with_bytes = to_bcs(&vault, &with_cap).unwrap();
    let without_bytes = to_bcs(&vault, &without_cap).unwrap();

    // 32-byte address, empty vector length, then the presence byte.
    assert_eq!(without_bytes.len(), 32 + 1 + 1);
    assert_eq!(with_bytes.len(), 32 + 1 + 1 + 16);
    assert_eq!(without_bytes[33], 0);
    assert_eq!(with_bytes[33], 1);

    assert_eq!(from_bcs(&vault, &with_bytes).unwrap(), with_cap);
}

#[test]
fn u256_survives_every_channel() {
    let holder = StructReified::builder("0x7::holder::Holder")
        .field("amount", Reified::U256)
        .build()
        .unwrap();

    let huge = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
    let decoded = from_fields(&holder, &json!({ "amount": huge })).unwrap();

    let redecoded = from_bcs(&holder, &to_bcs(&holder, &decoded).unwrap()).unwrap();
    assert_eq!(redecoded, decoded);

    let emitted = to_json(&decoded);
    assert_eq!(emitted["amount"], huge);
    assert_eq!(from_json(&holder, &emitted).unwrap(), decoded);
}

#[test]
fn vector_of_structs_differential_bcs() {
    #[derive(serde::Serialize)]
    struct Inner {
        x: u8,
        flag: bool,
    }
    #[derive(serde::Serialize)]
    struct Outer {
        items: Vec<Inner>,
        owner: [u8; 32],
    }

    let inner = StructReified::builder("0x7::inner::Inner")
        .field("x", Reified::U8)
        .field("flag", Reified::Bool)
        .build()
        .unwrap();
    let outer = StructReified::builder("0x7::outer::Outer")
        .field("items", Reified::vector(inner))
        .field("owner", Reified::Address)
        .build()
        .unwrap();

    let mut owner = [0u8; 32];
    owner[31] = 2;
    let reference = bcs::to_bytes(&Outer {
        items: vec![
            Inner { x: 1, flag: true },
            Inner { x: 2, flag: false },
        ],
        owner,
    })
    .unwrap();

    let decoded = from_bcs(&outer, &reference).unwrap();
    let instance = decoded.as_struct().unwrap();
    assert_eq!(instance.field("owner").unwrap().as_address(), Some("0x2"));
    let items = instance.field("items").unwrap().as_vector().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_struct().unwrap().field("flag"), Some(&MoveValue::Bool(true)));

    assert_eq!(to_bcs(&outer, &decoded).unwrap(), reference);
}

#[test]
fn malformed_payload_fails_loudly() {
    let pair = pair_u64();

    // Truncated: u64 present, vector length claims 3 but only 1 byte follows.
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&7u64.to_le_bytes());
    bytes.extend_from_slice(&[3, 1]);
    assert!(matches!(
        from_bcs(&pair, &bytes).unwrap_err(),
        ReifyError::MalformedBinaryPayload { .. }
    ));
}
