//! The type coercion engine: how a string becomes a field value.
//!
//! Every supported field type implements [`Decode`].
//! The built-in implementations cover:
//!
//! - [`String`], every integer type, [`bool`], [`f32`] and [`f64`];
//! - durations: [`jiff::SignedDuration`] and [`std::time::Duration`];
//! - timestamps: [`jiff::Zoned`] and [`jiff::Timestamp`];
//! - [`Vec<T>`], [`HashMap<K, V>`](std::collections::HashMap) and
//!   [`BTreeMap<K, V>`](std::collections::BTreeMap);
//! - [`Option<T>`], allocated on write.
//!
//! Floats use Rust's decimal float syntax (`inf` and `NaN` included): hexadecimal
//! literals such as `0x1p-2` are rejected, and so are finite literals that overflow
//! the target type.
//!
//! Structs deriving [`Unmarshal`](crate::Unmarshal) implement [`Decode`] too: they are
//! flattened into their own fields.
//! Types that know how to decode themselves can opt in via [`TextDecode`] or [`BinaryDecode`]
//! and `#[derive(Decode)]`.
use std::fmt;

use jiff::Zoned;

use crate::directive::FieldOptions;
use crate::errors::{BoxError, CoerceError, DirectiveError};
use crate::fields::{FieldDescriptor, Fields};
use crate::options::ParseOptions;

mod collections;
mod primitives;
mod time;

/// A type that can be decoded from the string representation of a URL value.
pub trait Decode {
    /// The kind of field this type represents.
    fn kind() -> FieldKind
    where
        Self: Sized;

    /// `true` if the current value is the zero value for its type.
    ///
    /// Default values never overwrite a value that isn't zero.
    /// Types that return `false` are always overwritten by their default.
    fn is_zero(&self) -> bool {
        false
    }

    /// Decode `value` into `self`.
    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError>;

    /// Register the fields that must be populated for a value of this type.
    ///
    /// Leaf types register themselves.
    /// Structs deriving [`Unmarshal`](crate::Unmarshal) register their own fields instead.
    fn collect<'a>(
        &'a mut self,
        name: &'static str,
        options: FieldOptions,
        fields: &mut Fields<'a>,
    ) -> Result<(), DirectiveError>
    where
        Self: Sized,
    {
        fields.push(FieldDescriptor::new(name, Self::kind(), options, self));
        Ok(())
    }
}

/// A type that decodes itself from the raw bytes of a textual value.
///
/// Use `#[derive(Decode)]` with `#[urlvalue(text)]` to plug it into the coercion engine:
///
/// ```rust
/// use urlvalues::{BoxError, Decode, TextDecode};
///
/// #[derive(Default, Decode)]
/// #[urlvalue(text)]
/// pub struct Shouting(String);
///
/// impl TextDecode for Shouting {
///     fn decode_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
///         self.0 = std::str::from_utf8(text)?.to_uppercase();
///         Ok(())
///     }
/// }
/// ```
pub trait TextDecode {
    fn decode_text(&mut self, text: &[u8]) -> Result<(), BoxError>;
}

/// A type that decodes itself from the raw bytes of a binary value.
///
/// Use `#[derive(Decode)]` with `#[urlvalue(binary)]` to plug it into the coercion engine.
/// If a type asks for both `text` and `binary`, [`TextDecode`] is used.
pub trait BinaryDecode {
    fn decode_binary(&mut self, data: &[u8]) -> Result<(), BoxError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
/// The closed set of field kinds understood by the coercion engine.
///
/// Its [`Display`](fmt::Display) representation is the type name reported in
/// [`FieldError`](crate::FieldError)s.
pub enum FieldKind {
    String,
    /// A signed integer with the given bit width.
    Int(u32),
    /// An unsigned integer with the given bit width.
    Uint(u32),
    Bool,
    /// A floating point number with the given bit width.
    Float(u32),
    Duration(&'static str),
    Timestamp(&'static str),
    Sequence(Box<FieldKind>),
    Mapping(Box<FieldKind>, Box<FieldKind>),
    Optional(Box<FieldKind>),
    /// A struct that is flattened into its own fields.
    Record(&'static str),
    /// A type with its own decoder.
    Custom(&'static str),
}

impl FieldKind {
    /// `true` for structs that are flattened into their own fields.
    pub fn is_record(&self) -> bool {
        matches!(self, FieldKind::Record(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => f.write_str("String"),
            FieldKind::Int(bits) => write!(f, "i{bits}"),
            FieldKind::Uint(bits) => write!(f, "u{bits}"),
            FieldKind::Bool => f.write_str("bool"),
            FieldKind::Float(bits) => write!(f, "f{bits}"),
            FieldKind::Duration(name)
            | FieldKind::Timestamp(name)
            | FieldKind::Record(name)
            | FieldKind::Custom(name) => f.write_str(name),
            FieldKind::Sequence(element) => write!(f, "Vec<{element}>"),
            FieldKind::Mapping(key, value) => write!(f, "Map<{key}, {value}>"),
            FieldKind::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Everything a [`Decode`] implementation needs to know besides the value itself.
pub struct DecodeContext<'a> {
    is_default: bool,
    layout: &'a str,
    options: &'a ParseOptions,
}

impl<'a> DecodeContext<'a> {
    pub(crate) fn new(options: &'a ParseOptions, layout: Option<&'a str>, is_default: bool) -> Self {
        Self {
            is_default,
            layout: layout.unwrap_or_default(),
            options,
        }
    }

    /// `true` if the value being decoded comes from a `default` directive.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// `true` if decoding must be skipped to avoid overwriting a value with a default.
    pub fn preserves(&self, current_is_zero: bool) -> bool {
        self.is_default && !current_is_zero
    }

    /// The timestamp layout for the current field. Empty if none was specified.
    pub fn layout(&self) -> &'a str {
        self.layout
    }

    /// The delimiter used to split sequences and maps.
    pub fn delimiter(&self) -> &'a str {
        self.options.delimiter()
    }

    /// A fresh reading of the configured clock.
    pub fn now(&self) -> Zoned {
        self.options.now()
    }

    /// The context used for the elements of sequences and maps.
    ///
    /// Elements are freshly allocated, so they are never treated as defaults.
    pub(crate) fn for_element(&self) -> Self {
        Self {
            is_default: false,
            ..*self
        }
    }
}
