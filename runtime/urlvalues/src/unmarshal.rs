use tracing_log_error::log_error;

use crate::decode::DecodeContext;
use crate::errors::{FieldError, ParseError, UnmarshalError};
use crate::fields::{FieldDescriptor, Unmarshal, flatten};
use crate::options::ParseOptions;
use crate::values::Values;

/// Populate the fields of `target` from `data`, using the default [`ParseOptions`].
///
/// See [`unmarshal_with`] for details.
pub fn unmarshal<V, T>(data: V, target: &mut T) -> Result<(), UnmarshalError>
where
    V: Values,
    T: Unmarshal,
{
    unmarshal_with(data, target, &ParseOptions::default())
}

/// Populate the fields of `target` from `data`.
///
/// Fields are processed in declaration order, nested structs included.
/// For each field:
///
/// 1. if its directive specifies a `default`, the default is decoded into the field,
///    unless the field already holds a non-zero value;
/// 2. if `data` holds at least one value for the field key, the values are
///    joined with the [delimiter](ParseOptions::delimiter) and decoded into the field.
///
/// Processing stops at the first failure, leaving the fields that were already
/// processed populated.
///
/// # Errors
///
/// - [`UnmarshalError::NoFields`] if `target` has no assignable fields;
/// - [`UnmarshalError::Directive`] if a field directive is malformed;
/// - [`UnmarshalError::Field`] if a default value can't be decoded;
/// - [`UnmarshalError::Parse`] if a value from `data` can't be decoded.
///
/// # Example
///
/// ```rust
/// use urlvalues::{ParseOptions, Unmarshal, UrlValues, unmarshal_with};
///
/// #[derive(Default, Unmarshal)]
/// pub struct Filter {
///     #[urlvalue("status,default:open")]
///     pub status: Vec<String>,
///     pub limit: u16,
/// }
///
/// let data = UrlValues::parse("status=open|closed&limit=20");
/// let options = ParseOptions::default().with_delimiter("|");
/// let mut filter = Filter::default();
/// unmarshal_with(&data, &mut filter, &options).unwrap();
///
/// assert_eq!(filter.status, ["open", "closed"]);
/// assert_eq!(filter.limit, 20);
/// ```
pub fn unmarshal_with<V, T>(
    data: V,
    target: &mut T,
    options: &ParseOptions,
) -> Result<(), UnmarshalError>
where
    V: Values,
    T: Unmarshal,
{
    let outcome = populate(&data, target, options);
    if let Err(e) = &outcome {
        log_error!(e, level: tracing::Level::DEBUG, "Failed to unmarshal URL values");
    }
    outcome
}

fn populate<V, T>(data: &V, target: &mut T, options: &ParseOptions) -> Result<(), UnmarshalError>
where
    V: Values,
    T: Unmarshal,
{
    let fields = flatten(target)?;
    if fields.is_empty() {
        return Err(UnmarshalError::NoFields);
    }

    for mut field in fields {
        apply_default(&mut field, options)?;
        apply_values(&mut field, data, options)?;
    }
    Ok(())
}

fn apply_default(field: &mut FieldDescriptor<'_>, options: &ParseOptions) -> Result<(), FieldError> {
    let Some(default) = field.options().default_value().map(ToOwned::to_owned) else {
        return Ok(());
    };
    let name = field.name();
    let layout = field.options().layout().map(ToOwned::to_owned);
    let ctx = DecodeContext::new(options, layout.as_deref(), true);
    let outcome = field.target().decode(&default, &ctx);
    outcome.map_err(|source| FieldError {
        field: name,
        type_name: field.kind().to_string(),
        value: default,
        source,
    })?;
    tracing::trace!(field = name, "Applied default value");
    Ok(())
}

fn apply_values<V: Values>(
    field: &mut FieldDescriptor<'_>,
    data: &V,
    options: &ParseOptions,
) -> Result<(), ParseError> {
    let name = field.name();
    let key = field.options().key().to_owned();
    let value = match data.get(&key) {
        Some(values) if !values.is_empty() => values.join(options.delimiter()),
        _ => {
            tracing::trace!(field = name, key = %key, "No value to assign");
            return Ok(());
        }
    };

    let layout = field.options().layout().map(ToOwned::to_owned);
    let ctx = DecodeContext::new(options, layout.as_deref(), false);
    let outcome = field.target().decode(&value, &ctx);
    outcome.map_err(|source| ParseError {
        source: FieldError {
            field: name,
            type_name: field.kind().to_string(),
            value,
            source,
        },
        key,
    })
}
