//! Parsing of the `#[urlvalue("...")]` field directives.
use crate::errors::DirectiveSyntaxError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// The options attached to a field via its `#[urlvalue("...")]` directive.
///
/// The directive syntax is `<key>[,default:<value>][,layout:<layout>]`:
///
/// - `key` is the lookup key into the URL values. If empty, the field name is used.
/// - `default` is decoded into the field before the actual input.
/// - `layout` customizes how timestamps are parsed. See [`parse_time`](crate::time::parse_time).
pub struct FieldOptions {
    key: String,
    default: Option<String>,
    layout: Option<String>,
}

impl FieldOptions {
    /// Parse the raw directive string attached to a field.
    ///
    /// Unknown options are ignored. An option without a value is rejected.
    ///
    /// ```rust
    /// use urlvalues::FieldOptions;
    ///
    /// let options = FieldOptions::parse("since,default:now-3m,layout:RFC3339").unwrap();
    /// assert_eq!(options.key(), "since");
    /// assert_eq!(options.default_value(), Some("now-3m"));
    /// assert_eq!(options.layout(), Some("RFC3339"));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DirectiveSyntaxError> {
        let mut options = Self::default();
        if raw.is_empty() {
            return Ok(options);
        }

        for (i, segment) in raw.split(',').enumerate() {
            match segment.split_once(':') {
                None => {
                    if i == 0 {
                        options.key = segment.trim().to_owned();
                    }
                }
                Some((name, value)) => {
                    let name = name.trim();
                    let value = value.trim();
                    if value.is_empty() {
                        return Err(DirectiveSyntaxError::MissingValue {
                            option: name.to_owned(),
                        });
                    }
                    match name {
                        "default" => options.default = Some(value.to_owned()),
                        "layout" => options.layout = Some(value.to_owned()),
                        _ => {}
                    }
                }
            }
        }
        Ok(options)
    }

    /// Use `name` as key if the directive didn't specify one.
    pub(crate) fn resolve_key(mut self, name: &str) -> Self {
        if self.key.is_empty() {
            self.key = name.to_owned();
        }
        self
    }

    /// The lookup key into the URL values.
    ///
    /// It is never empty once the options have been attached to a field.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The default value, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The timestamp layout, if any.
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directive() {
        assert_eq!(FieldOptions::parse("").unwrap(), FieldOptions::default());
    }

    #[test]
    fn key_only() {
        let options = FieldOptions::parse("aString").unwrap();
        assert_eq!(options.key(), "aString");
        assert_eq!(options.default_value(), None);
        assert_eq!(options.layout(), None);
    }

    #[test]
    fn default_without_key() {
        let options = FieldOptions::parse(",default:orange").unwrap();
        assert_eq!(options.key(), "");
        assert_eq!(options.default_value(), Some("orange"));
    }

    #[test]
    fn literal_dash_key() {
        let options = FieldOptions::parse("-,").unwrap();
        assert_eq!(options.key(), "-");
    }

    #[test]
    fn default_value_can_contain_colons() {
        let options = FieldOptions::parse("m,default:k1:v1").unwrap();
        assert_eq!(options.default_value(), Some("k1:v1"));
    }

    #[test]
    fn option_as_first_segment_is_not_a_key() {
        let options = FieldOptions::parse("default:5").unwrap();
        assert_eq!(options.key(), "");
        assert_eq!(options.default_value(), Some("5"));
    }

    #[test]
    fn unknown_options_are_ignored() {
        let options = FieldOptions::parse("since,default:now,layout=2006-01-02,color:red").unwrap();
        assert_eq!(options.key(), "since");
        assert_eq!(options.default_value(), Some("now"));
        assert_eq!(options.layout(), None);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let options = FieldOptions::parse(" alarm , layout: Kitchen ").unwrap();
        assert_eq!(options.key(), "alarm");
        assert_eq!(options.layout(), Some("Kitchen"));
    }

    #[test]
    fn option_without_value() {
        let err = FieldOptions::parse("key,default:").unwrap_err();
        insta::assert_snapshot!(err, @"option `default` is missing a value");
    }

    #[test]
    fn key_falls_back_to_field_name() {
        let options = FieldOptions::parse(",default:1").unwrap().resolve_key("value");
        assert_eq!(options.key(), "value");
        let options = FieldOptions::parse("v").unwrap().resolve_key("value");
        assert_eq!(options.key(), "v");
    }
}
