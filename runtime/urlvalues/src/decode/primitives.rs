use std::borrow::Cow;
use std::num::IntErrorKind;

use super::{Decode, DecodeContext, FieldKind};
use crate::errors::{CoerceError, IntErrorReason};

impl Decode for String {
    fn kind() -> FieldKind {
        FieldKind::String
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        if ctx.preserves(self.is_zero()) {
            return Ok(());
        }
        value.clone_into(self);
        Ok(())
    }
}

impl Decode for bool {
    fn kind() -> FieldKind {
        FieldKind::Bool
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        if ctx.preserves(self.is_zero()) {
            return Ok(());
        }
        *self = match value {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
            _ => {
                return Err(CoerceError::InvalidBool {
                    value: value.to_owned(),
                });
            }
        };
        Ok(())
    }
}

macro_rules! impl_decode_float {
    ($($ty:ty => $bits:literal),*) => {$(
        impl Decode for $ty {
            fn kind() -> FieldKind {
                FieldKind::Float($bits)
            }

            fn is_zero(&self) -> bool {
                self.to_bits() == 0
            }

            fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
                if ctx.preserves(self.is_zero()) {
                    return Ok(());
                }
                let parsed: $ty = value.parse().map_err(|source| CoerceError::InvalidFloat {
                    value: value.to_owned(),
                    bits: $bits,
                    source,
                })?;
                if parsed.is_infinite() && !is_infinity_literal(value) {
                    return Err(CoerceError::FloatOutOfRange {
                        value: value.to_owned(),
                        bits: $bits,
                    });
                }
                *self = parsed;
                Ok(())
            }
        }
    )*};
}

impl_decode_float!(f32 => 32, f64 => 64);

/// `inf` and `infinity`, in any case and with an optional sign.
/// Any other literal that parses to infinity overflowed the target type.
fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! impl_decode_signed {
    ($($ty:ty),*) => {$(
        impl Decode for $ty {
            fn kind() -> FieldKind {
                FieldKind::Int(<$ty>::BITS)
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
                if ctx.preserves(self.is_zero()) {
                    return Ok(());
                }
                *self = parse_signed(value, <$ty>::BITS)?;
                Ok(())
            }
        }
    )*};
}

macro_rules! impl_decode_unsigned {
    ($($ty:ty),*) => {$(
        impl Decode for $ty {
            fn kind() -> FieldKind {
                FieldKind::Uint(<$ty>::BITS)
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
                if ctx.preserves(self.is_zero()) {
                    return Ok(());
                }
                *self = parse_unsigned(value, <$ty>::BITS)?;
                Ok(())
            }
        }
    )*};
}

impl_decode_signed!(i8, i16, i32, i64, i128, isize);
impl_decode_unsigned!(u8, u16, u32, u64, u128, usize);

fn int_error(value: &str, bits: u32, reason: IntErrorReason) -> CoerceError {
    CoerceError::InvalidInt {
        value: value.to_owned(),
        bits,
        reason,
    }
}

fn parse_signed<T: TryFrom<i128>>(value: &str, bits: u32) -> Result<T, CoerceError> {
    let (negative, magnitude) = parse_literal(value).map_err(|r| int_error(value, bits, r))?;
    let n = if negative {
        if magnitude > i128::MAX as u128 + 1 {
            return Err(int_error(value, bits, IntErrorReason::OutOfRange));
        }
        // `2^127` wraps to `i128::MIN`, which is its own negation.
        (magnitude as i128).wrapping_neg()
    } else {
        i128::try_from(magnitude)
            .map_err(|_| int_error(value, bits, IntErrorReason::OutOfRange))?
    };
    T::try_from(n).map_err(|_| int_error(value, bits, IntErrorReason::OutOfRange))
}

fn parse_unsigned<T: TryFrom<u128>>(value: &str, bits: u32) -> Result<T, CoerceError> {
    if value.starts_with(['+', '-']) {
        return Err(int_error(value, bits, IntErrorReason::InvalidSyntax));
    }
    let (_, magnitude) = parse_literal(value).map_err(|r| int_error(value, bits, r))?;
    T::try_from(magnitude).map_err(|_| int_error(value, bits, IntErrorReason::OutOfRange))
}

/// Parse an integer literal, returning its sign and magnitude.
///
/// The base is inferred from the prefix: `0x` for hexadecimal, `0o` or a bare leading `0`
/// for octal, `0b` for binary, decimal otherwise.
/// Underscores may separate digits, e.g. `1_000`.
fn parse_literal(value: &str) -> Result<(bool, u128), IntErrorReason> {
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (radix, digits) = split_radix(unsigned);
    let digits = if digits.contains('_') {
        if !underscores_ok(unsigned) {
            return Err(IntErrorReason::InvalidSyntax);
        }
        Cow::Owned(digits.replace('_', ""))
    } else {
        Cow::Borrowed(digits)
    };
    // `from_str_radix` would accept a second sign.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(IntErrorReason::InvalidSyntax);
    }

    u128::from_str_radix(&digits, radix)
        .map(|magnitude| (negative, magnitude))
        .map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow => IntErrorReason::OutOfRange,
            _ => IntErrorReason::InvalidSyntax,
        })
}

fn split_radix(s: &str) -> (u32, &str) {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return (10, s);
    }
    match bytes[1].to_ascii_lowercase() {
        b'x' => (16, &s[2..]),
        b'o' => (8, &s[2..]),
        b'b' => (2, &s[2..]),
        _ => (8, &s[1..]),
    }
}

/// Underscores must sit between digits, or right after a base prefix.
fn underscores_ok(s: &str) -> bool {
    #[derive(PartialEq)]
    enum Saw {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let bytes = s.as_bytes();
    let mut saw = Saw::Start;
    let mut i = 0;
    let mut hex = false;
    if bytes.len() >= 2 && bytes[0] == b'0' {
        let prefix = bytes[1].to_ascii_lowercase();
        if matches!(prefix, b'b' | b'o' | b'x') {
            i = 2;
            saw = Saw::Digit;
            hex = prefix == b'x';
        }
    }

    for &b in &bytes[i..] {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            saw = Saw::Digit;
        } else if b == b'_' {
            if saw != Saw::Digit {
                return false;
            }
            saw = Saw::Underscore;
        } else {
            if saw == Saw::Underscore {
                return false;
            }
            saw = Saw::Other;
        }
    }
    saw != Saw::Underscore
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseOptions;

    fn decode<T: Decode + Default>(value: &str) -> Result<T, CoerceError> {
        let options = ParseOptions::default();
        let mut target = T::default();
        target.decode(value, &DecodeContext::new(&options, None, false))?;
        Ok(target)
    }

    #[test]
    fn integer_literals() {
        assert_eq!(decode::<i64>("42").unwrap(), 42);
        assert_eq!(decode::<i64>("-42").unwrap(), -42);
        assert_eq!(decode::<i64>("+42").unwrap(), 42);
        assert_eq!(decode::<i64>("0x1F").unwrap(), 31);
        assert_eq!(decode::<i64>("0o17").unwrap(), 15);
        assert_eq!(decode::<i64>("017").unwrap(), 15);
        assert_eq!(decode::<i64>("0b101").unwrap(), 5);
        assert_eq!(decode::<i64>("0").unwrap(), 0);
        assert_eq!(decode::<i64>("1_000").unwrap(), 1000);
        assert_eq!(decode::<i64>("0x_ff").unwrap(), 255);
        assert_eq!(decode::<u32>("0xFFFFFFFF").unwrap(), u32::MAX);
    }

    #[test]
    fn malformed_integer_literals() {
        for value in ["", "notAnInt", "0x", "08", "_1", "1_", "1__0", "++1", "+-1", "1.5", " 1"] {
            let err = decode::<i64>(value).unwrap_err();
            assert!(
                matches!(
                    err,
                    CoerceError::InvalidInt {
                        reason: IntErrorReason::InvalidSyntax,
                        ..
                    }
                ),
                "`{value}` => {err:?}"
            );
        }
    }

    #[test]
    fn integer_bounds() {
        assert_eq!(decode::<i8>("-128").unwrap(), i8::MIN);
        assert_eq!(decode::<i8>("127").unwrap(), i8::MAX);
        assert_eq!(decode::<i128>("-170141183460469231731687303715884105728").unwrap(), i128::MIN);
        for value in ["128", "-129"] {
            assert!(matches!(
                decode::<i8>(value).unwrap_err(),
                CoerceError::InvalidInt {
                    bits: 8,
                    reason: IntErrorReason::OutOfRange,
                    ..
                }
            ));
        }
        assert!(matches!(
            decode::<u8>("256").unwrap_err(),
            CoerceError::InvalidInt {
                reason: IntErrorReason::OutOfRange,
                ..
            }
        ));
    }

    #[test]
    fn unsigned_integers_reject_signs() {
        for value in ["-1", "+1"] {
            assert!(matches!(
                decode::<u64>(value).unwrap_err(),
                CoerceError::InvalidInt {
                    reason: IntErrorReason::InvalidSyntax,
                    ..
                }
            ));
        }
    }

    #[test]
    fn integer_error_message() {
        insta::assert_snapshot!(
            decode::<i64>("notAnInt").unwrap_err(),
            @r#"parsing "notAnInt" as a 64-bit integer: invalid syntax"#
        );
        insta::assert_snapshot!(
            decode::<u16>("70000").unwrap_err(),
            @r#"parsing "70000" as a 16-bit integer: value out of range"#
        );
    }

    #[test]
    fn booleans() {
        for value in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(decode::<bool>(value).unwrap(), "{value}");
        }
        for value in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!decode::<bool>(value).unwrap(), "{value}");
        }
        for value in ["yes", "tRUE", ""] {
            assert!(decode::<bool>(value).is_err(), "{value}");
        }
    }

    #[test]
    fn floats() {
        assert_eq!(decode::<f64>("12.12").unwrap(), 12.12);
        assert_eq!(decode::<f32>("11.11").unwrap(), 11.11);
        assert!(decode::<f64>("inf").unwrap().is_infinite());
        assert!(decode::<f64>("NaN").unwrap().is_nan());
        insta::assert_snapshot!(
            decode::<f32>("pi").unwrap_err(),
            @r#"parsing "pi" as a 32-bit float: invalid float literal"#
        );
    }

    #[test]
    fn float_overflow() {
        for value in ["inf", "-Infinity", "+INF"] {
            assert!(decode::<f32>(value).unwrap().is_infinite(), "{value}");
        }
        assert_eq!(decode::<f32>("1e38").unwrap(), 1e38);
        assert!(matches!(
            decode::<f32>("1e39").unwrap_err(),
            CoerceError::FloatOutOfRange { bits: 32, .. }
        ));
        assert!(matches!(
            decode::<f64>("-1e400").unwrap_err(),
            CoerceError::FloatOutOfRange { bits: 64, .. }
        ));
        insta::assert_snapshot!(
            decode::<f64>("1e400").unwrap_err(),
            @r#"parsing "1e400" as a 64-bit float: value out of range"#
        );
    }

    #[test]
    fn hexadecimal_floats_are_rejected() {
        assert!(matches!(
            decode::<f64>("0x1p-2").unwrap_err(),
            CoerceError::InvalidFloat { .. }
        ));
    }

    #[test]
    fn defaults_do_not_overwrite_values() {
        let options = ParseOptions::default();
        let as_default = DecodeContext::new(&options, None, true);

        let mut n = 7i32;
        n.decode("42", &as_default).unwrap();
        assert_eq!(n, 7);

        let mut zero = 0i32;
        zero.decode("42", &as_default).unwrap();
        assert_eq!(zero, 42);

        let mut s = String::from("apple");
        s.decode("banana", &as_default).unwrap();
        assert_eq!(s, "apple");

        let mut flag = false;
        flag.decode("true", &as_default).unwrap();
        assert!(flag);
    }
}
