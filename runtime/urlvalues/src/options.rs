//! Knobs to customize how URL values are parsed.
use std::fmt;
use std::sync::Arc;

use jiff::Zoned;

/// The delimiter used when [`ParseOptions::delimiter`] is not set.
pub const DEFAULT_DELIMITER: &str = ";";

/// A configuration function, applied to a fresh [`ParseOptions`] by [`ParseOptions::new`].
///
/// See [`with_delimiter`] and [`with_clock`].
pub type SetParseOption = Box<dyn FnOnce(&mut ParseOptions)>;

type Clock = Arc<dyn Fn() -> Zoned + Send + Sync>;

#[derive(Clone, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// Options that customize the behaviour of [`unmarshal_with`].
///
/// Options are never shared between calls: build a fresh value for each
/// invocation, or keep one around and pass it by reference.
///
/// # Example
///
/// ```rust
/// use urlvalues::{ParseOptions, with_delimiter};
///
/// // Using configuration functions...
/// let options = ParseOptions::new([with_delimiter("|")]);
/// assert_eq!(options.delimiter(), "|");
///
/// // ...or the builder methods.
/// let options = ParseOptions::default().with_delimiter("|");
/// assert_eq!(options.delimiter(), "|");
///
/// // The delimiter falls back to `;`.
/// assert_eq!(ParseOptions::default().delimiter(), ";");
/// ```
///
/// # Configuration files
///
/// `ParseOptions` implements [`serde::Deserialize`], so it can be embedded in
/// your application configuration:
///
/// ```rust
/// use urlvalues::ParseOptions;
///
/// let options: ParseOptions = serde_json::from_str(r#"{ "delimiter": "," }"#).unwrap();
/// assert_eq!(options.delimiter(), ",");
/// ```
///
/// [`unmarshal_with`]: crate::unmarshal_with
pub struct ParseOptions {
    /// The delimiter used to split the string representation of sequences and maps.
    ///
    /// # Default
    ///
    /// `;`, also used when the delimiter is set to the empty string.
    #[serde(default)]
    delimiter: Option<String>,
    /// The source of "now" for timestamp fields.
    ///
    /// # Default
    ///
    /// The system clock, in the system time zone.
    #[serde(skip)]
    clock: Option<Clock>,
}

impl ParseOptions {
    /// Apply each configuration function, in order, to a default set of options.
    pub fn new<I>(setters: I) -> Self
    where
        I: IntoIterator<Item = SetParseOption>,
    {
        let mut options = Self::default();
        for set in setters {
            set(&mut options);
        }
        options
    }

    /// Set the delimiter used to split sequences and maps.
    ///
    /// An empty delimiter is equivalent to the default, `;`.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Set the clock used to resolve `now`-based timestamps.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> Zoned + Send + Sync + 'static,
    {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// The delimiter used to split the string representation of sequences and maps.
    pub fn delimiter(&self) -> &str {
        match self.delimiter.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => DEFAULT_DELIMITER,
        }
    }

    /// The current time, according to the configured clock.
    pub fn now(&self) -> Zoned {
        match &self.clock {
            Some(clock) => clock(),
            None => Zoned::now(),
        }
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("delimiter", &self.delimiter)
            .field("clock", &self.clock.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// A configuration function that sets the delimiter used to split sequences and maps.
///
/// ```rust
/// use urlvalues::{ParseOptions, with_delimiter};
///
/// let options = ParseOptions::new([with_delimiter("<<!>>")]);
/// assert_eq!(options.delimiter(), "<<!>>");
/// ```
pub fn with_delimiter(delimiter: impl Into<String>) -> SetParseOption {
    let delimiter = delimiter.into();
    Box::new(move |o: &mut ParseOptions| o.delimiter = Some(delimiter))
}

/// A configuration function that sets the clock used to resolve `now`-based timestamps.
pub fn with_clock<F>(clock: F) -> SetParseOption
where
    F: Fn() -> Zoned + Send + Sync + 'static,
{
    Box::new(move |o: &mut ParseOptions| o.clock = Some(Arc::new(clock)))
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz::TimeZone};

    use super::*;

    #[test]
    fn empty_delimiter_falls_back_to_default() {
        let options = ParseOptions::new([with_delimiter("")]);
        assert_eq!(options.delimiter(), ";");
    }

    #[test]
    fn setters_are_applied_in_order() {
        let options = ParseOptions::new([with_delimiter(","), with_delimiter("|")]);
        assert_eq!(options.delimiter(), "|");
    }

    #[test]
    fn custom_clock() {
        let fixed = date(2024, 1, 31)
            .at(10, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        let expected = fixed.clone();
        let options = ParseOptions::new([with_clock(move || fixed.clone())]);
        assert_eq!(options.now(), expected);
    }

    #[test]
    fn deserialize_without_delimiter() {
        let options: ParseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.delimiter(), ";");
    }
}
