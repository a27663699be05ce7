//! Type tag and type argument validation.
//!
//! A generic on-chain value does not self-verify against the caller's
//! expected instantiation; without these checks a `Foo<USDC>` payload could
//! silently decode as `Foo<SUI>` and yield structurally valid but
//! semantically wrong data. All comparisons are string equality after
//! normalization, so zero-padding and whitespace variants of a tag compare
//! equal.

use sui_reify_types::{normalize_type_tag, parse_type_name};

use crate::error::ReifyError;
use crate::reified::{Reified, StructReified};

/// Assert that the type arguments of `actual_tag` match the expected ones.
///
/// Fails with [`ReifyError::TypeArgumentMismatch`] when the counts differ or
/// any positional pair differs after normalization.
pub fn assert_type_args_match(actual_tag: &str, expected: &[Reified]) -> Result<(), ReifyError> {
    let (_, actual_args) = parse_type_name(actual_tag)?;
    assert_type_arg_strings_match(&actual_args, expected)
}

/// Element-wise comparison of already-extracted argument strings against
/// expected descriptors.
pub fn assert_type_arg_strings_match(
    actual: &[String],
    expected: &[Reified],
) -> Result<(), ReifyError> {
    let mut actual_tags = Vec::with_capacity(actual.len());
    for tag in actual {
        actual_tags.push(normalize_type_tag(tag)?);
    }
    let mut expected_tags = Vec::with_capacity(expected.len());
    for arg in expected {
        expected_tags.push(normalize_type_tag(&arg.type_tag())?);
    }

    if actual_tags != expected_tags {
        return Err(ReifyError::TypeArgumentMismatch {
            expected: expected_tags.join(", "),
            actual: actual_tags.join(", "),
        });
    }
    Ok(())
}

/// Assert that a runtime type tag names the type a descriptor decodes.
///
/// For struct descriptors the head and the arguments are checked
/// separately, so a wrong head reports [`ReifyError::TypeTagMismatch`] while
/// a wrong instantiation reports [`ReifyError::TypeArgumentMismatch`].
pub fn assert_tag_matches(actual_tag: &str, expected: &Reified) -> Result<(), ReifyError> {
    match expected {
        Reified::Struct(s) => assert_struct_tag_matches(actual_tag, s),
        _ => {
            let actual = normalize_type_tag(actual_tag)?;
            let expected_tag = normalize_type_tag(&expected.type_tag())?;
            if actual != expected_tag {
                return Err(ReifyError::TypeTagMismatch {
                    expected: expected_tag,
                    actual,
                });
            }
            Ok(())
        }
    }
}

pub(crate) fn assert_struct_tag_matches(
    actual_tag: &str,
    expected: &StructReified,
) -> Result<(), ReifyError> {
    let (head, args) = parse_type_name(actual_tag)?;
    let head = normalize_type_tag(&head)?;
    if head != expected.type_name {
        return Err(ReifyError::TypeTagMismatch {
            expected: expected.full_type_name.clone(),
            actual: normalize_type_tag(actual_tag)?,
        });
    }
    assert_type_arg_strings_match(&args, &expected.type_args)
}
