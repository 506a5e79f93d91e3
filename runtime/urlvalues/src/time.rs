//! Timestamp parsing, with support for named layouts and `now`-relative expressions.
use jiff::{
    Span, Timestamp, Zoned,
    fmt::strtime::{self, BrokenDownTime},
    tz::{Offset, TimeZone},
};

use crate::errors::TimeError;

/// Parse `value` into a timestamp.
///
/// # `now`-relative expressions
///
/// `now` evaluates to `now`.
/// `now` can be followed by one or more `[+-]<digits><identifier>` offsets, where the identifier
/// is one of `y` (years), `m` (months) or `d` (days).
/// For example, `now-2y+3m-2d` subtracts two years, adds three months and subtracts two days.
///
/// The offsets are applied using calendar arithmetic: adding one month to January 31st
/// lands on the last day of February.
/// If the same identifier appears more than once, the last occurrence wins:
/// `now+1y+2y` is equivalent to `now+2y`.
///
/// # Layouts
///
/// Any other value is parsed according to `layout`, which is either one of the names below
/// or a [`strftime`-style format](jiff::fmt::strtime):
///
/// | Name                    | Format                             |
/// |-------------------------|------------------------------------|
/// | `""`, `Layout`          | `%m/%d %I:%M:%S%p '%y %z`          |
/// | `ANSIC`                 | `%a %b %d %H:%M:%S %Y`             |
/// | `UnixDate`              | `%a %b %d %H:%M:%S %Z %Y`          |
/// | `RubyDate`              | `%a %b %d %H:%M:%S %z %Y`          |
/// | `RFC822`                | `%d %b %y %H:%M %Z`                |
/// | `RFC822Z`               | `%d %b %y %H:%M %z`                |
/// | `RFC850`                | `%A, %d-%b-%y %H:%M:%S %Z`         |
/// | `RFC1123`               | `%a, %d %b %Y %H:%M:%S %Z`         |
/// | `RFC1123Z`              | `%a, %d %b %Y %H:%M:%S %z`         |
/// | `RFC3339`, `RFC3339Nano`| RFC 3339, with optional fractional seconds |
/// | `Kitchen`               | `%I:%M%p`                          |
///
/// Missing date components default to January 1st of year 0, missing time components
/// to zero and a missing offset to UTC.
/// Time zone abbreviations (`%Z`) are accepted and interpreted as UTC.
///
/// ```rust
/// use jiff::{Timestamp, Zoned};
/// use urlvalues::time::parse_time;
///
/// let now = Zoned::now();
/// let alarm = parse_time("Kitchen", "4:16PM", &now).unwrap();
/// assert_eq!(alarm.timestamp(), "0000-01-01T16:16:00Z".parse::<Timestamp>().unwrap());
/// ```
pub fn parse_time(layout: &str, value: &str, now: &Zoned) -> Result<Zoned, TimeError> {
    if value == "now" {
        return Ok(now.clone());
    }
    if let Some(offsets) = value.strip_prefix("now") {
        return relative_to(now, offsets);
    }

    let layout_name = if layout.is_empty() { "Layout" } else { layout };
    parse_layout(layout, value).map_err(|source| TimeError::Layout {
        layout: layout_name.to_owned(),
        value: value.to_owned(),
        source,
    })
}

fn relative_to(now: &Zoned, offsets: &str) -> Result<Zoned, TimeError> {
    let (mut years, mut months, mut days) = (0i64, 0i64, 0i64);

    // Each offset starts with its sign: break them apart on sign characters.
    let offsets = offsets.trim().replace('+', " +").replace('-', " -");
    for part in offsets.trim().split(' ') {
        // A sign, at least one digit and an identifier.
        if part.len() < 3 {
            return Err(TimeError::InvalidNowFormat);
        }

        let mut chars = part.chars();
        let sign = match chars.next() {
            Some('+') => 1,
            Some('-') => -1,
            Some(other) => return Err(TimeError::InvalidSign(other)),
            None => return Err(TimeError::InvalidNowFormat),
        };
        let Some(identifier) = chars.next_back() else {
            return Err(TimeError::InvalidNowFormat);
        };
        let digits = chars.as_str();
        let magnitude: i64 = digits
            .parse()
            .map_err(|_| TimeError::InvalidInteger(digits.to_owned()))?;

        match identifier {
            'y' => years = sign * magnitude,
            'm' => months = sign * magnitude,
            'd' => days = sign * magnitude,
            other => return Err(TimeError::InvalidIdentifier(other)),
        }
    }

    // Units of a `Span` share the same sign, so mixed-sign offsets are applied one at a time.
    let mut shifted = now.clone();
    for span in [
        Span::new().try_years(years),
        Span::new().try_months(months),
        Span::new().try_days(days),
    ] {
        let span = span.map_err(TimeError::Arithmetic)?;
        shifted = shifted.checked_add(span).map_err(TimeError::Arithmetic)?;
    }
    Ok(shifted)
}

enum Format<'a> {
    Rfc3339,
    Strtime {
        format: &'a str,
        /// Named layouts tolerate padding whitespace, e.g. `Jan  2`.
        named: bool,
    },
}

fn resolve(layout: &str) -> Format<'_> {
    let named = |format| Format::Strtime {
        format,
        named: true,
    };
    match layout {
        "" | "Layout" => named("%m/%d %I:%M:%S%p '%y %z"),
        "ANSIC" => named("%a %b %d %H:%M:%S %Y"),
        "UnixDate" => named("%a %b %d %H:%M:%S %Z %Y"),
        "RubyDate" => named("%a %b %d %H:%M:%S %z %Y"),
        "RFC822" => named("%d %b %y %H:%M %Z"),
        "RFC822Z" => named("%d %b %y %H:%M %z"),
        "RFC850" => named("%A, %d-%b-%y %H:%M:%S %Z"),
        "RFC1123" => named("%a, %d %b %Y %H:%M:%S %Z"),
        "RFC1123Z" => named("%a, %d %b %Y %H:%M:%S %z"),
        "RFC3339" | "RFC3339Nano" => Format::Rfc3339,
        "Kitchen" => named("%I:%M%p"),
        custom => Format::Strtime {
            format: custom,
            named: false,
        },
    }
}

fn parse_layout(layout: &str, value: &str) -> Result<Zoned, jiff::Error> {
    match resolve(layout) {
        Format::Rfc3339 => parse_rfc3339(value),
        Format::Strtime { format, named } => {
            if let Some((format, value)) = strip_zone_abbreviation(format, value) {
                return parse_strtime(&format, &value);
            }
            if named {
                let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
                parse_strtime(format, &value)
            } else {
                parse_strtime(format, value)
            }
        }
    }
}

fn parse_rfc3339(value: &str) -> Result<Zoned, jiff::Error> {
    // `Timestamp`'s parser accepts any ISO 8601 timestamp, which is a superset of RFC 3339.
    if !is_rfc3339(value) {
        return Err(jiff::Error::from_args(format_args!(
            "expected `YYYY-MM-DDTHH:MM:SS[.fraction]` followed by `Z` or `+HH:MM`/`-HH:MM`"
        )));
    }
    let timestamp: Timestamp = value.parse()?;
    let offset = numeric_offset_suffix(value).unwrap_or(Offset::UTC);
    Ok(timestamp.to_zoned(TimeZone::fixed(offset)))
}

fn is_rfc3339(value: &str) -> bool {
    let Some((date_time, rest)) = value.split_at_checked(19) else {
        return false;
    };
    if !matches_template(date_time, "dddd-dd-ddTdd:dd:dd") {
        return false;
    }
    let offset = match rest.strip_prefix('.') {
        Some(fraction) => {
            let digits = fraction.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return false;
            }
            &fraction[digits..]
        }
        None => rest,
    };
    offset == "Z"
        || offset
            .strip_prefix(['+', '-'])
            .is_some_and(|offset| matches_template(offset, "dd:dd"))
}

/// `d` in the template stands for any ASCII digit, every other byte must match exactly.
fn matches_template(value: &str, template: &str) -> bool {
    value.len() == template.len()
        && value
            .bytes()
            .zip(template.bytes())
            .all(|(v, t)| if t == b'd' { v.is_ascii_digit() } else { v == t })
}

/// The `+hh:mm`/`-hh:mm` suffix of an RFC 3339 timestamp, if there is one.
fn numeric_offset_suffix(value: &str) -> Option<Offset> {
    let suffix = value.get(value.len().checked_sub(6)?..)?;
    let sign = match suffix.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let (hours, minutes) = suffix[1..].split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    Offset::from_seconds(sign * (hours * 3600 + minutes * 60)).ok()
}

/// `strtime` can't parse time zone abbreviations, since they are ambiguous.
/// We drop the abbreviation from both the format and the value, provided it lines up
/// with the `%Z` directive, and treat it as UTC.
fn strip_zone_abbreviation(format: &str, value: &str) -> Option<(String, String)> {
    let mut format_tokens: Vec<&str> = format.split_whitespace().collect();
    let position = format_tokens.iter().position(|t| *t == "%Z")?;
    let mut value_tokens: Vec<&str> = value.split_whitespace().collect();
    if value_tokens.len() != format_tokens.len() {
        return None;
    }
    if !value_tokens[position]
        .chars()
        .all(|c| c.is_ascii_alphabetic())
    {
        return None;
    }
    format_tokens.remove(position);
    value_tokens.remove(position);
    Some((format_tokens.join(" "), value_tokens.join(" ")))
}

fn parse_strtime(format: &str, value: &str) -> Result<Zoned, jiff::Error> {
    let mut tm = strtime::parse(format, value)?;
    fill_missing_components(&mut tm)?;
    let offset = tm.offset().unwrap_or(Offset::UTC);
    tm.set_offset(Some(offset));
    let timestamp = tm.to_timestamp()?;
    Ok(timestamp.to_zoned(TimeZone::fixed(offset)))
}

fn fill_missing_components(tm: &mut BrokenDownTime) -> Result<(), jiff::Error> {
    if tm.year().is_none() {
        tm.set_year(Some(0))?;
    }
    if tm.month().is_none() {
        tm.set_month(Some(1))?;
    }
    if tm.day().is_none() {
        tm.set_day(Some(1))?;
    }
    if tm.hour().is_none() {
        tm.set_hour(Some(0))?;
    }
    if tm.minute().is_none() {
        tm.set_minute(Some(0))?;
    }
    if tm.second().is_none() {
        tm.set_second(Some(0))?;
    }
    // The weekday is informative only, it is never checked against the date.
    tm.set_weekday(None);
    Ok(())
}
