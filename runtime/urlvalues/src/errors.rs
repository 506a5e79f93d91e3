//! Errors that can happen when unmarshalling URL values.

/// A type-erased error, returned by custom decoders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error returned by [`unmarshal`](crate::unmarshal) and
/// [`unmarshal_with`](crate::unmarshal_with).
///
/// The two tiers of coercion failures let you tell a misconfigured destination apart
/// from bad input:
///
/// - [`UnmarshalError::Field`] is returned when a **default value** can't be decoded.
///   It's a programmer error.
/// - [`UnmarshalError::Parse`] is returned when an **input value** can't be decoded.
///   It's the caller's fault.
///
/// See [`UnmarshalError::is_client_error`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UnmarshalError {
    #[error("urlvalues: no fields identified in target struct")]
    /// Every field of the destination was skipped, or it has no fields at all.
    NoFields,
    #[error(transparent)]
    /// See [`DirectiveError`] for details.
    Directive(#[from] DirectiveError),
    #[error(transparent)]
    /// See [`FieldError`] for details.
    Field(#[from] FieldError),
    #[error(transparent)]
    /// See [`ParseError`] for details.
    Parse(#[from] ParseError),
}

impl UnmarshalError {
    /// The innermost coercion failure, for both [`UnmarshalError::Field`] and
    /// [`UnmarshalError::Parse`].
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            UnmarshalError::Field(e) => Some(e),
            UnmarshalError::Parse(e) => Some(e.field_error()),
            UnmarshalError::NoFields | UnmarshalError::Directive(_) => None,
        }
    }

    /// `true` if the failure was caused by the input values rather than by the
    /// destination type.
    ///
    /// It's a good signal to choose between a `400 Bad Request` and a
    /// `500 Internal Server Error` response.
    pub fn is_client_error(&self) -> bool {
        matches!(self, UnmarshalError::Parse(_))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("urlvalues: parsing directive for field {field}: {source}")]
/// The `#[urlvalue("...")]` directive attached to a field is malformed.
pub struct DirectiveError {
    pub(crate) field: &'static str,
    #[source]
    pub(crate) source: DirectiveSyntaxError,
}

impl DirectiveError {
    /// The name of the field carrying the malformed directive.
    pub fn field_name(&self) -> &str {
        self.field
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
/// Failure modes of [`FieldOptions::parse`](crate::FieldOptions::parse).
pub enum DirectiveSyntaxError {
    #[error("option `{option}` is missing a value")]
    MissingValue { option: String },
}

#[derive(Debug, thiserror::Error)]
#[error(
    "urlvalues: error assigning to field {field}: converting '{value}' to type {type_name}. details: {source}"
)]
/// A value could not be decoded into a field of the destination.
pub struct FieldError {
    pub(crate) field: &'static str,
    pub(crate) type_name: String,
    pub(crate) value: String,
    #[source]
    pub(crate) source: CoerceError,
}

impl FieldError {
    /// The name of the field that couldn't be assigned.
    pub fn field_name(&self) -> &str {
        self.field
    }

    /// The declared type of the field, e.g. `i64` or `Vec<String>`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The string that failed to decode.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The reason why decoding failed.
    pub fn cause(&self) -> &CoerceError {
        &self.source
    }
}

#[derive(Debug, thiserror::Error)]
#[error("error parsing value of {key}: {}", .source.source)]
/// An input value could not be decoded into a field of the destination.
///
/// It wraps the underlying [`FieldError`], accessible via [`ParseError::field_error`]
/// or [`std::error::Error::source`].
pub struct ParseError {
    pub(crate) key: String,
    #[source]
    pub(crate) source: FieldError,
}

impl ParseError {
    /// The key into the URL values that holds the offending value.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The name of the field that couldn't be assigned.
    pub fn field_name(&self) -> &str {
        self.source.field
    }

    /// The underlying [`FieldError`].
    pub fn field_error(&self) -> &FieldError {
        &self.source
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The reason why a string could not be converted into a value of the target type.
pub enum CoerceError {
    #[error("parsing {value:?} as a {bits}-bit integer: {reason}")]
    InvalidInt {
        value: String,
        bits: u32,
        reason: IntErrorReason,
    },
    #[error("parsing {value:?} as a boolean: invalid syntax")]
    InvalidBool { value: String },
    #[error("parsing {value:?} as a {bits}-bit float: {source}")]
    InvalidFloat {
        value: String,
        bits: u32,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("parsing {value:?} as a {bits}-bit float: value out of range")]
    FloatOutOfRange { value: String, bits: u32 },
    #[error("parsing {value:?} as a duration: {source}")]
    InvalidDuration {
        value: String,
        #[source]
        source: jiff::Error,
    },
    #[error("{value:?} is a negative duration")]
    NegativeDuration { value: String },
    #[error("invalid map item: {pair:?}")]
    InvalidMapItem { pair: String },
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    /// A custom decoder failed. See [`TextDecode`](crate::TextDecode) and
    /// [`BinaryDecode`](crate::BinaryDecode).
    Custom(BoxError),
}

impl CoerceError {
    /// Wrap the error returned by a custom decoder.
    pub fn custom(e: impl Into<BoxError>) -> Self {
        CoerceError::Custom(e.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why an integer literal was rejected.
pub enum IntErrorReason {
    /// The literal is malformed.
    InvalidSyntax,
    /// The literal doesn't fit in the target type.
    OutOfRange,
}

impl std::fmt::Display for IntErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntErrorReason::InvalidSyntax => f.write_str("invalid syntax"),
            IntErrorReason::OutOfRange => f.write_str("value out of range"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// Failure modes of [`parse_time`](crate::time::parse_time).
pub enum TimeError {
    #[error("invalid \"now\" based format")]
    InvalidNowFormat,
    #[error("invalid sign {0:?}")]
    InvalidSign(char),
    #[error("{0:?} is not a valid integer")]
    InvalidInteger(String),
    #[error("invalid year/month/day identifier {0:?}")]
    InvalidIdentifier(char),
    #[error("parsing time {value:?} as {layout:?}: {source}")]
    Layout {
        layout: String,
        value: String,
        #[source]
        source: jiff::Error,
    },
    #[error("the offset is out of range: {0}")]
    Arithmetic(#[source] jiff::Error),
}
