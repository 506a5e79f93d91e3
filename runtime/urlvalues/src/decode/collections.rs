use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::{Decode, DecodeContext, FieldKind};
use crate::directive::FieldOptions;
use crate::errors::{CoerceError, DirectiveError};
use crate::fields::{FieldDescriptor, Fields};

/// Allocated on write: `None` becomes `Some(T::default())` before decoding the value.
///
/// `Option`s wrapping a struct that derives [`Unmarshal`](crate::Unmarshal) are allocated
/// eagerly, since the struct is flattened into its own fields.
impl<T> Decode for Option<T>
where
    T: Decode + Default,
{
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(T::kind()))
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        self.get_or_insert_with(T::default).decode(value, ctx)
    }

    fn collect<'a>(
        &'a mut self,
        name: &'static str,
        options: FieldOptions,
        fields: &mut Fields<'a>,
    ) -> Result<(), DirectiveError> {
        if T::kind().is_record() {
            self.get_or_insert_with(T::default)
                .collect(name, options, fields)
        } else {
            fields.push(FieldDescriptor::new(name, Self::kind(), options, self));
            Ok(())
        }
    }
}

/// Elements are separated by the [delimiter](crate::ParseOptions::delimiter).
///
/// An empty string is a sequence with a single empty element.
impl<T> Decode for Vec<T>
where
    T: Decode + Default,
{
    fn kind() -> FieldKind {
        FieldKind::Sequence(Box::new(T::kind()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        if ctx.preserves(self.is_zero()) {
            return Ok(());
        }
        let element_ctx = ctx.for_element();
        *self = value
            .split(ctx.delimiter())
            .map(|item| {
                let mut element = T::default();
                element.decode(item, &element_ctx)?;
                Ok(element)
            })
            .collect::<Result<_, CoerceError>>()?;
        Ok(())
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Default + Eq + Hash,
    V: Decode + Default,
    S: BuildHasher + Default,
{
    fn kind() -> FieldKind {
        FieldKind::Mapping(Box::new(K::kind()), Box::new(V::kind()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        if ctx.preserves(self.is_zero()) {
            return Ok(());
        }
        let mut map = Self::default();
        decode_pairs(value, ctx, |k, v| {
            map.insert(k, v);
        })?;
        *self = map;
        Ok(())
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Default + Ord,
    V: Decode + Default,
{
    fn kind() -> FieldKind {
        FieldKind::Mapping(Box::new(K::kind()), Box::new(V::kind()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn decode(&mut self, value: &str, ctx: &DecodeContext<'_>) -> Result<(), CoerceError> {
        if ctx.preserves(self.is_zero()) {
            return Ok(());
        }
        let mut map = Self::default();
        decode_pairs(value, ctx, |k, v| {
            map.insert(k, v);
        })?;
        *self = map;
        Ok(())
    }
}

/// Pairs are separated by the delimiter, keys from values by a colon: `k1:v1;k2:v2`.
/// A blank value is an empty map.
fn decode_pairs<K, V>(
    value: &str,
    ctx: &DecodeContext<'_>,
    mut insert: impl FnMut(K, V),
) -> Result<(), CoerceError>
where
    K: Decode + Default,
    V: Decode + Default,
{
    if value.trim().is_empty() {
        return Ok(());
    }

    let element_ctx = ctx.for_element();
    for pair in value.split(ctx.delimiter()) {
        let mut sides = pair.split(':');
        let (Some(raw_key), Some(raw_value), None) = (sides.next(), sides.next(), sides.next())
        else {
            return Err(invalid_pair(pair));
        };
        if raw_key.is_empty() || raw_value.is_empty() {
            return Err(invalid_pair(pair));
        }

        let mut key = K::default();
        key.decode(raw_key, &element_ctx)?;
        let mut value = V::default();
        value.decode(raw_value, &element_ctx)?;
        insert(key, value);
    }
    Ok(())
}

fn invalid_pair(pair: &str) -> CoerceError {
    CoerceError::InvalidMapItem {
        pair: pair.to_owned(),
    }
}
