use jiff::{SignedDuration, Timestamp, Zoned};

use super::{Decode, DecodeContext, FieldKind};
use crate::errors::CoerceError;
use crate::time::parse_time;

/// Parsed with [`parse_time`], honouring the field's `layout`.
impl Decode for Zoned {
    fn kind() -> FieldKind {
        FieldKind::Timestamp("Zoned")
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        *self = parse_time(ctx.layout(), value, &ctx.now())?;
        Ok(())
    }
}

/// Parsed with [`parse_time`], honouring the field's `layout`.
/// The offset is used to compute the instant and then discarded.
impl Decode for Timestamp {
    fn kind() -> FieldKind {
        FieldKind::Timestamp("Timestamp")
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        *self = parse_time(ctx.layout(), value, &ctx.now())?.timestamp();
        Ok(())
    }
}

/// Accepts both the friendly format (`1h 30m`, `2s`) and ISO 8601 (`PT1H30M`).
impl Decode for SignedDuration {
    fn kind() -> FieldKind {
        FieldKind::Duration("SignedDuration")
    }

    fn is_zero(&self) -> bool {
        self.is_zero()
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        if ctx.preserves(Decode::is_zero(self)) {
            return Ok(());
        }
        *self = parse_duration(value)?;
        Ok(())
    }
}

/// Same syntax as [`SignedDuration`], negative durations are rejected.
impl Decode for std::time::Duration {
    fn kind() -> FieldKind {
        FieldKind::Duration("Duration")
    }

    fn is_zero(&self) -> bool {
        self.is_zero()
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        if ctx.preserves(Decode::is_zero(self)) {
            return Ok(());
        }
        let duration = parse_duration(value)?;
        if duration.is_negative() {
            return Err(CoerceError::NegativeDuration {
                value: value.to_owned(),
            });
        }
        *self = duration.unsigned_abs();
        Ok(())
    }
}

fn parse_duration(value: &str) -> Result<SignedDuration, CoerceError> {
    // A zero duration needs no unit.
    if matches!(value, "0" | "+0" | "-0") {
        return Ok(SignedDuration::ZERO);
    }
    value
        .parse()
        .map_err(|source| CoerceError::InvalidDuration {
            value: value.to_owned(),
            source,
        })
}
