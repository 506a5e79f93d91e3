//! Decode URL values (query strings, form bodies) into strongly-typed structs.
//!
//! # Guide
//!
//! Derive [`Unmarshal`] on the struct you want to populate, then hand it over to
//! [`unmarshal`] together with the values:
//!
//! ```rust
//! use std::time::Duration;
//! use urlvalues::{Unmarshal, UrlValues, unmarshal};
//!
//! #[derive(Default, Unmarshal)]
//! pub struct Search {
//!     #[urlvalue("q")]
//!     pub query: String,
//!     #[urlvalue("page,default:1")]
//!     pub page: u32,
//!     #[urlvalue("tag")]
//!     pub tags: Vec<String>,
//!     #[urlvalue("timeout,default:5s")]
//!     pub timeout: Duration,
//!     #[urlvalue("-")]
//!     pub internal: bool,
//! }
//!
//! let data = UrlValues::parse("q=rust&tag=web;cli");
//! let mut search = Search::default();
//! unmarshal(&data, &mut search).unwrap();
//!
//! assert_eq!(search.query, "rust");
//! assert_eq!(search.page, 1);
//! assert_eq!(search.tags, ["web", "cli"]);
//! assert_eq!(search.timeout, Duration::from_secs(5));
//! ```
//!
//! # Directives
//!
//! Each field can carry a `#[urlvalue("...")]` directive, `<key>[,default:<value>][,layout:<layout>]`:
//!
//! - `key` is the lookup key into the URL values. It defaults to the field name;
//! - `default` is decoded into the field before the input, unless the field already
//!   holds a non-zero value;
//! - `layout` drives how timestamps are parsed. See [`time::parse_time`].
//!
//! `#[urlvalue("-")]` excludes a field. Use `#[urlvalue("-,")]` to look up the key `-`.
//!
//! # Supported types
//!
//! See [`Decode`] for the list of field types that can be decoded out of the box, and
//! [`TextDecode`]/[`BinaryDecode`] to plug in your own.
extern crate self as urlvalues;

pub use decode::{BinaryDecode, Decode, DecodeContext, FieldKind, TextDecode};
pub use directive::FieldOptions;
pub use errors::{
    BoxError, CoerceError, DirectiveError, DirectiveSyntaxError, FieldError, IntErrorReason,
    ParseError, TimeError, UnmarshalError,
};
pub use fields::{FieldDescriptor, Fields, Unmarshal, flatten};
pub use options::{DEFAULT_DELIMITER, ParseOptions, SetParseOption, with_clock, with_delimiter};
pub use unmarshal::{unmarshal, unmarshal_with};
pub use values::{UrlValues, Values};

/// Derive [`Unmarshal`] for a struct with named fields.
///
/// Every field can be annotated with a `#[urlvalue("...")]` directive.
/// See the [crate-level documentation](crate) for the directive syntax.
pub use urlvalues_macros::Unmarshal;

/// Derive [`Decode`] for a type that implements [`TextDecode`] or [`BinaryDecode`].
///
/// Pick the decoder with `#[urlvalue(text)]` or `#[urlvalue(binary)]`.
pub use urlvalues_macros::Decode;

mod decode;
mod directive;
pub mod errors;
mod fields;
mod options;
pub mod time;
mod unmarshal;
mod values;
