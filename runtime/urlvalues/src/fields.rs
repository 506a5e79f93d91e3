//! The field flattener: turns a destination struct into a flat list of assignable fields.
use std::fmt;

use crate::decode::{Decode, FieldKind};
use crate::directive::FieldOptions;
use crate::errors::DirectiveError;

/// A struct whose fields can be populated from URL values.
///
/// Don't implement this trait manually, use `#[derive(Unmarshal)]` instead:
///
/// ```rust
/// use urlvalues::Unmarshal;
///
/// #[derive(Default, Unmarshal)]
/// pub struct Search {
///     #[urlvalue("q")]
///     pub query: String,
///     #[urlvalue("page,default:1")]
///     pub page: u32,
///     #[urlvalue("-")]
///     pub internal: bool,
/// }
/// ```
///
/// Every field must be [`Decode`], apart from those marked with `#[urlvalue("-")]`.
/// Fields whose type derives [`Unmarshal`] are flattened: their own fields are populated
/// directly and their directive, if any, is ignored.
pub trait Unmarshal {
    /// Register every assignable field of `self`, in declaration order.
    fn collect_fields<'a>(&'a mut self, fields: &mut Fields<'a>) -> Result<(), DirectiveError>;
}

/// A single assignable field of a destination struct.
pub struct FieldDescriptor<'a> {
    name: &'static str,
    kind: FieldKind,
    options: FieldOptions,
    target: &'a mut (dyn Decode + 'a),
}

impl<'a> FieldDescriptor<'a> {
    pub fn new(
        name: &'static str,
        kind: FieldKind,
        options: FieldOptions,
        target: &'a mut (dyn Decode + 'a),
    ) -> Self {
        Self {
            name,
            kind,
            options,
            target,
        }
    }

    /// The name of the field, as declared in the struct.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type of the field.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The options parsed from the field directive.
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Mutable access to the field value.
    pub fn target(&mut self) -> &mut (dyn Decode + 'a) {
        self.target
    }
}

impl fmt::Debug for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// The flattened fields of a destination struct, in declaration order.
///
/// Built by [`flatten`].
#[derive(Debug, Default)]
pub struct Fields<'a> {
    fields: Vec<FieldDescriptor<'a>>,
}

impl<'a> Fields<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `directive` and register `target` under the resulting options.
    ///
    /// If `target` is itself a struct deriving [`Unmarshal`], its fields are registered instead.
    pub fn field<T: Decode>(
        &mut self,
        name: &'static str,
        directive: &str,
        target: &'a mut T,
    ) -> Result<(), DirectiveError> {
        let options = FieldOptions::parse(directive)
            .map_err(|source| DirectiveError {
                field: name,
                source,
            })?
            .resolve_key(name);
        target.collect(name, options, self)
    }

    /// Register a field descriptor as-is.
    pub fn push(&mut self, field: FieldDescriptor<'a>) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor<'a>> {
        self.fields.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FieldDescriptor<'a>> {
        self.fields.iter_mut()
    }
}

impl<'a> IntoIterator for Fields<'a> {
    type Item = FieldDescriptor<'a>;
    type IntoIter = std::vec::IntoIter<FieldDescriptor<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Collect the assignable fields of `target`, descending into nested structs.
pub fn flatten<T: Unmarshal>(target: &mut T) -> Result<Fields<'_>, DirectiveError> {
    let mut fields = Fields::new();
    target.collect_fields(&mut fields)?;
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::Unmarshal;

    #[derive(Default, Unmarshal)]
    struct Inner {
        #[urlvalue("inner_key,default:5")]
        count: u8,
        flag: bool,
    }

    #[derive(Default, Unmarshal)]
    struct Outer {
        #[urlvalue("a,default:x")]
        a: String,
        #[urlvalue("-")]
        _skipped: String,
        #[urlvalue("-,")]
        dash: String,
        #[urlvalue("ignored")]
        inner: Inner,
        maybe: Option<Inner>,
        tags: Vec<String>,
        labels: HashMap<String, String>,
    }

    fn summary(fields: &Fields<'_>) -> Vec<(String, String, String)> {
        fields
            .iter()
            .map(|f| {
                (
                    f.name().to_owned(),
                    f.options().key().to_owned(),
                    f.kind().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn nested_structs_are_flattened() {
        let mut target = Outer::default();
        let fields = flatten(&mut target).unwrap();
        insta::assert_debug_snapshot!(summary(&fields), @r#"
        [
            (
                "a",
                "a",
                "String",
            ),
            (
                "dash",
                "-",
                "String",
            ),
            (
                "count",
                "inner_key",
                "u8",
            ),
            (
                "flag",
                "flag",
                "bool",
            ),
            (
                "count",
                "inner_key",
                "u8",
            ),
            (
                "flag",
                "flag",
                "bool",
            ),
            (
                "tags",
                "tags",
                "Vec<String>",
            ),
            (
                "labels",
                "labels",
                "Map<String, String>",
            ),
        ]
        "#);
    }

    #[test]
    fn optional_structs_are_allocated() {
        let mut target = Outer::default();
        assert!(target.maybe.is_none());
        drop(flatten(&mut target).unwrap());
        assert!(target.maybe.is_some());
    }

    #[test]
    fn directive_options_are_kept() {
        let mut target = Outer::default();
        let fields = flatten(&mut target).unwrap();
        let a = fields.iter().next().unwrap();
        assert_eq!(a.options().default_value(), Some("x"));
    }

    #[test]
    fn malformed_directives_are_reported() {
        #[derive(Default, Unmarshal)]
        struct Broken {
            #[urlvalue("key,default:")]
            value: String,
        }

        let mut target = Broken::default();
        let err = flatten(&mut target).unwrap_err();
        assert_eq!(err.field_name(), "value");
        insta::assert_snapshot!(
            err,
            @"urlvalues: parsing directive for field value: option `default` is missing a value"
        );
    }

    #[test]
    fn targets_are_writable() {
        let mut target = Outer::default();
        {
            let options = crate::ParseOptions::default();
            let ctx = crate::DecodeContext::new(&options, None, false);
            let mut fields = flatten(&mut target).unwrap();
            for field in fields.iter_mut().filter(|f| f.name() == "a") {
                field.target().decode("hello", &ctx).unwrap();
            }
        }
        assert_eq!(target.a, "hello");
    }
}
