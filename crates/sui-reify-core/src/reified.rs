//! Runtime type descriptors ("reified" types).
//!
//! A [`Reified`] stands in for compile-time generic information: it carries
//! a type's tag, its type arguments, its binary schema, and enough shape to
//! drive every decode path. Descriptors are immutable and cheaply shared;
//! they hold no reference to any decoded instance.
//!
//! Generated bindings declare a struct's shape once through
//! [`StructReified::builder`] and hand the resulting descriptor to callers:
//!
//! ```
//! use sui_reify_core::reified::{Reified, StructReified};
//!
//! // 0x2::coin::Coin<phantom T> with a single `balance: u64` field
//! fn coin_reified(t: &str) -> Reified {
//!     StructReified::builder("0x2::coin::Coin")
//!         .phantom_arg(t)
//!         .field("balance", Reified::U64)
//!         .build()
//!         .expect("static binding shape")
//! }
//!
//! let coin = coin_reified("0x2::sui::SUI");
//! assert_eq!(coin.type_tag(), "0x2::coin::Coin<0x2::sui::SUI>");
//! ```

use std::sync::Arc;

use sui_reify_types::{compose_type_name, normalize_type_tag, parse_type_name, MalformedTypeTag};

use crate::error::ReifyError;
use crate::schema::{schema_for, BcsSchema};
use crate::value::{MoveValue, StructValue};

/// A runtime descriptor for a concrete Move type.
///
/// Primitive descriptors are unit variants and therefore allocation-free
/// constants. `Phantom` describes a type parameter that contributes to the
/// type tag but never materializes a value.
#[derive(Debug, Clone)]
pub enum Reified {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Vector(Box<Reified>),
    /// `0x1::option::Option<T>`, encoded as a presence byte plus payload.
    Option(Box<Reified>),
    Struct(Arc<StructReified>),
    /// A phantom type parameter: a bare tag, never decoded.
    Phantom(String),
}

impl Reified {
    /// Descriptor for `vector<element>`.
    pub fn vector(element: Reified) -> Self {
        Reified::Vector(Box::new(element))
    }

    /// Descriptor for `0x1::option::Option<inner>`.
    pub fn option(inner: Reified) -> Self {
        Reified::Option(Box::new(inner))
    }

    /// Phantom marker for a type parameter with no runtime representation.
    pub fn phantom(tag: impl Into<String>) -> Self {
        Reified::Phantom(tag.into())
    }

    /// The type tag this descriptor stands for.
    ///
    /// For structs this is the precomposed full type name; for phantoms the
    /// recorded tag verbatim.
    pub fn type_tag(&self) -> String {
        match self {
            Reified::Bool => "bool".to_string(),
            Reified::U8 => "u8".to_string(),
            Reified::U16 => "u16".to_string(),
            Reified::U32 => "u32".to_string(),
            Reified::U64 => "u64".to_string(),
            Reified::U128 => "u128".to_string(),
            Reified::U256 => "u256".to_string(),
            Reified::Address => "address".to_string(),
            Reified::Vector(element) => format!("vector<{}>", element.type_tag()),
            Reified::Option(inner) => format!("0x1::option::Option<{}>", inner.type_tag()),
            Reified::Struct(s) => s.full_type_name.clone(),
            Reified::Phantom(tag) => tag.clone(),
        }
    }

    pub fn is_phantom(&self) -> bool {
        matches!(self, Reified::Phantom(_))
    }
}

/// Descriptor for a struct type: head, instantiated type arguments, and
/// fields in on-chain declaration order.
#[derive(Debug)]
pub struct StructReified {
    /// Normalized head, e.g. "0x2::coin::Coin".
    pub type_name: String,
    /// Instantiated type arguments; phantom parameters are [`Reified::Phantom`].
    pub type_args: Vec<Reified>,
    /// Normalized tag of each type argument, in declaration order.
    pub type_arg_tags: Vec<String>,
    /// Fields in on-chain declaration order. This order is part of the wire
    /// format and must match the struct's Move declaration exactly.
    pub fields: Vec<(String, Reified)>,
    /// Head plus substituted arguments.
    pub full_type_name: String,
    /// Binary schema, composed leaf-first from the field descriptors.
    pub schema: BcsSchema,
}

impl StructReified {
    /// Start declaring a struct descriptor.
    pub fn builder(type_name: impl Into<String>) -> StructBuilder {
        StructBuilder {
            type_name: type_name.into(),
            type_args: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Construct a struct instance from field values in declaration order.
    ///
    /// Performs no validation beyond shape; tag and argument consistency is
    /// enforced by the decode paths that call this.
    pub fn new_value(&self, values: Vec<MoveValue>) -> StructValue {
        debug_assert_eq!(values.len(), self.fields.len());
        StructValue {
            type_name: self.type_name.clone(),
            type_args: self.type_arg_tags.clone(),
            full_type_name: self.full_type_name.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, _)| name.clone())
                .zip(values)
                .collect(),
        }
    }
}

/// Builder for [`StructReified`].
pub struct StructBuilder {
    type_name: String,
    type_args: Vec<Reified>,
    fields: Vec<(String, Reified)>,
}

impl StructBuilder {
    /// Append a non-phantom type argument.
    pub fn type_arg(mut self, arg: Reified) -> Self {
        self.type_args.push(arg);
        self
    }

    /// Append a phantom type argument (tag only, never decoded).
    pub fn phantom_arg(mut self, tag: impl Into<String>) -> Self {
        self.type_args.push(Reified::Phantom(tag.into()));
        self
    }

    /// Append a field. Call order must match on-chain declaration order.
    pub fn field(mut self, name: impl Into<String>, ty: Reified) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    /// Normalize the head, compose the full type name, and build the binary
    /// schema. Fails on a malformed head or argument tag, and on a phantom
    /// descriptor used in a field position.
    pub fn build(self) -> Result<Reified, ReifyError> {
        let (head, head_args) = parse_type_name(&self.type_name)?;
        if !head_args.is_empty() {
            return Err(MalformedTypeTag::new(
                &self.type_name,
                "struct type name must be a bare head without type arguments",
            )
            .into());
        }
        let type_name = normalize_type_tag(&head)?;

        let mut type_arg_tags = Vec::with_capacity(self.type_args.len());
        for arg in &self.type_args {
            type_arg_tags.push(normalize_type_tag(&arg.type_tag())?);
        }
        let full_type_name = compose_type_name(&type_name, &type_arg_tags);

        let mut field_schemas = Vec::with_capacity(self.fields.len());
        for (name, ty) in &self.fields {
            field_schemas.push((name.clone(), schema_for(ty)?));
        }

        Ok(Reified::Struct(Arc::new(StructReified {
            type_name,
            type_args: self.type_args,
            type_arg_tags,
            fields: self.fields,
            full_type_name,
            schema: BcsSchema::Struct(field_schemas),
        })))
    }
}
